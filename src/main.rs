use anyhow::Context;
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use xcm_journeys::config::TrackerConfig;
use xcm_journeys::replay::{Replayed, replay_line};
use xcm_journeys::store::JourneyTracker;

/// Replays newline-delimited update messages from stdin and prints the
/// resulting journeys to stdout.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xcm_journeys=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = TrackerConfig::from_env();
    let mut tracker = JourneyTracker::new(&config).context("invalid tracker configuration")?;
    info!(cache_capacity = config.cache_capacity, "Replaying update feed");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_number = 0usize;
    let mut skipped = 0usize;

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        line_number += 1;
        if let Replayed::Skipped(_) = replay_line(&mut tracker, line_number, &line, Utc::now()) {
            skipped += 1;
        }
    }

    let snapshot = tracker.snapshot();
    info!(
        journeys = snapshot.len(),
        lines = line_number,
        skipped,
        "Replay finished"
    );

    let mut output = serde_json::to_vec_pretty(&snapshot).context("failed to encode journeys")?;
    output.push(b'\n');

    let mut stdout = tokio::io::stdout();
    stdout.write_all(&output).await?;
    stdout.flush().await?;

    Ok(())
}
