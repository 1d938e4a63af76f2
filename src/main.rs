//! Catsays - fetch two captioned cats and composite them side by side.

mod adapters;
mod cassette;
mod cli;
mod compose;
mod config;
mod context;
mod error;
mod output;
mod ports;
mod request;

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use crate::cli::Cli;
use crate::compose::{compose, two_up_placements, Canvas};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::CatError;
use crate::output::{infer_format, resolve_output_path, write_image};
use crate::ports::{FetchedImage, ImageFetcher};
use crate::request::build_request_url;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<PathBuf, CatError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(CatError::Config)?;
    let host = config.service_host().map_err(CatError::Config)?;

    // Resolve output and canvas before touching the network
    let output_path = resolve_output_path(&cli.output, &std::env::current_dir()?);
    let format = infer_format(cli.format, &output_path);
    let canvas = Canvas::two_up(cli.width, cli.height, format)?.with_jpeg_quality(cli.quality);

    let urls = cli.request_params().map(|params| build_request_url(&host, &params).to_string());

    if cli.verbose {
        eprintln!("Service: {}", host.as_url());
        eprintln!("Left:  {}", urls[0]);
        eprintln!("Right: {}", urls[1]);
        eprintln!("Canvas: {}x{} {}", canvas.width, canvas.height, format.name());
    }

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("CATSAYS_REPLAY").ok();
    let is_recording = std::env::var("CATSAYS_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        if cli.verbose {
            eprintln!("Replaying from: {cassette_path}");
        }
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        if cli.verbose {
            eprintln!("Recording mode enabled");
        }
        let (ctx, session) = ServiceContext::recording(&config)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config)?, None)
    };

    let fetched = fetch_pair(ctx.fetcher.as_ref(), &urls).await;

    // Save the cassette even when a fetch failed so the failure can be replayed
    drop(ctx);
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    let [left, right] = fetched?;
    if cli.verbose {
        for (side, image) in [("Left", &left), ("Right", &right)] {
            eprintln!(
                "{side}: {} bytes ({})",
                image.data.len(),
                image.content_type.as_deref().unwrap_or("unknown type")
            );
        }
    }

    let composite = compose(two_up_placements(&left.data, &right.data, cli.width), &canvas)?;
    write_image(&output_path, &composite)?;

    if cli.verbose {
        eprintln!("Wrote {} bytes", composite.len());
    }

    Ok(output_path)
}

/// Fetch both images concurrently, keeping results in request order.
async fn fetch_pair(
    fetcher: &dyn ImageFetcher,
    urls: &[String; 2],
) -> Result<[FetchedImage; 2], CatError> {
    let (left, right) = tokio::try_join!(fetcher.fetch(&urls[0]), fetcher.fetch(&urls[1]))?;
    Ok([left, right])
}
