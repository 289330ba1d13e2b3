//! Fetch and unpack the latest songs release archive.
//!
//! Usage: cargo run --bin update_songs

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use songflow::config::Config;
use songflow::update::sync_latest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("songflow=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;
    sync_latest(&config.release_repo, &config.archive_dir).await?;

    println!("Done.");
    Ok(())
}
