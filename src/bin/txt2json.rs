//! Dump the plain-text song library as one JSON document keyed by title.
//!
//! Usage: cargo run --bin txt2json [-- <songs-dir>]
//!
//! Logs go to stderr so stdout stays valid JSON.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use songflow::config::Config;
use songflow::format::parse_text;
use songflow::song::Song;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("songflow=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;
    let dir = std::env::args().nth(1).map_or(config.songs_dir, PathBuf::from);
    tracing::info!("Converting songs from text -> json, source: '{}'...", dir.display());

    let mut songs: BTreeMap<String, Song> = BTreeMap::new();
    let mut failed = 0usize;

    for entry in fs_err::read_dir(&dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
        {
            continue;
        }

        let text = fs_err::read_to_string(&path)?;
        match parse_text(&text) {
            Some(song) => {
                songs.insert(song.title.clone(), song);
            }
            None => {
                tracing::warn!("Failed parsing '{}'.", path.display());
                failed += 1;
            }
        }
    }

    tracing::info!("Converted {} song(s), failed: {failed}.", songs.len());
    println!("{}", serde_json::to_string_pretty(&songs)?);
    Ok(())
}
