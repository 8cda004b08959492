//! audio-releaser binary entry point.
//!
//! Loads the settings file and a release manifest, then runs the
//! packaging pipeline once.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use audio_releaser::config;
use audio_releaser::models::Release;
use audio_releaser::pipeline::process_release;

/// Package one release into its MP3/FLAC distribution form.
#[derive(Parser, Debug)]
#[command(name = "audio-releaser", version)]
struct Args {
    /// Release manifest (TOML) describing the release and its tracks.
    manifest: PathBuf,

    /// Settings file; created with defaults if missing.
    #[arg(short, long, default_value = "audio-releaser.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "audio_releaser=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let settings = config::load_or_create(&args.config)
        .with_context(|| format!("loading config {}", args.config.display()))?;

    let manifest = fs::read_to_string(&args.manifest)
        .with_context(|| format!("reading manifest {}", args.manifest.display()))?;
    let release: Release = toml::from_str(&manifest)
        .with_context(|| format!("parsing manifest {}", args.manifest.display()))?;

    tracing::info!(
        "Packaging '{} - {}' ({} tracks)",
        release.artist,
        release.title,
        release.tracks.len()
    );

    let report = process_release(release, settings)?;
    println!("Duration: {:.2} s", report.elapsed.as_secs_f64());

    Ok(())
}
