mod source;

use std::{
    fs::File,
    io::BufReader,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use anyhow::{Context, Result};
use clap::Parser;
use handoverlay::{config::SessionConfig, Session};
use log::info;

use crate::source::JsonLinesSource;

/// Replay recorded hand detections and report where each model ends up
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Session configuration (JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Recorded detections, one JSON frame per line
    #[arg(short, long)]
    frames: PathBuf,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let config = SessionConfig::load(&args.config)
        .with_context(|| format!("Unable to load config from {}", args.config.display()))?;
    let mut session = Session::new(&config)?;

    let frames = File::open(&args.frames)
        .with_context(|| format!("Unable to open {}", args.frames.display()))?;
    let mut source = JsonLinesSource::new(BufReader::new(frames));

    let should_quit = Arc::new(AtomicBool::from(false));
    {
        let should_quit = should_quit.clone();
        ctrlc::set_handler(move || should_quit.store(true, Ordering::Release))
            .context("Unable to register Ctrl-C handler")?;
    }

    let stats = session.run(&mut source, &should_quit);
    info!(
        "{} frames processed, {} skipped, {} invalid landmark sets, {} unmatched detections",
        stats.processed, stats.skipped, stats.invalid_landmark_sets, stats.unmatched_detections
    );

    for binding in session.registry().snapshot()? {
        let state = if binding.visible { "visible" } else { "hidden" };
        info!(
            "{} ({}) is {state} at {:?}, rotated {:?}, scaled {:?}",
            binding.handedness,
            binding.asset,
            binding.transform.translation,
            binding.transform.rotation,
            binding.transform.scale
        );
    }

    Ok(())
}
