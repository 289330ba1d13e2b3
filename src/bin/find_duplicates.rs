//! Report near-duplicate songs in the plain-text library.
//!
//! Usage: cargo run --bin find_duplicates [-- <songs-dir>]

use std::path::PathBuf;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use songflow::config::Config;
use songflow::duplicates::find_duplicates;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("songflow=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;
    let dir = std::env::args().nth(1).map_or(config.songs_dir, PathBuf::from);

    let pairs = find_duplicates(&dir, config.similarity_threshold)?;

    println!(
        "Found {} pair(s) of similar songs (>= {:.0}% similarity):\n",
        pairs.len(),
        config.similarity_threshold * 100.0
    );
    for pair in &pairs {
        println!("[{:5.1}%] {}", pair.similarity * 100.0, pair.files.0);
        println!("         {}", pair.files.1);
        println!();
    }
    Ok(())
}
