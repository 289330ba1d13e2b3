//! Convert a directory of XML song documents to plain-text songs.
//!
//! Usage: cargo run --bin xml2text -- <source> <destination>

use std::path::PathBuf;

use anyhow::bail;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use songflow::convert::{convert_dir, Direction};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("songflow=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(source), Some(destination)) = (args.next(), args.next()) else {
        bail!("Usage: xml2text <source> <destination>");
    };

    tracing::info!("Converting songs from xml -> text, source: '{source}', destination: '{destination}'...");
    let summary = convert_dir(
        &PathBuf::from(source),
        &PathBuf::from(destination),
        Direction::XmlToText,
    )?;

    println!("Converted {} song(s), failed: {}.", summary.converted, summary.failed);
    Ok(())
}
