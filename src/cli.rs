//! CLI argument parsing with clap.

use clap::Parser;

use crate::compose::{OutputFormat, DEFAULT_JPEG_QUALITY};
use crate::output::DEFAULT_OUTPUT;
use crate::request::ImageRequestParams;

/// Fetch two captioned cats and put them side by side.
#[derive(Parser, Debug)]
#[command(name = "catsays", version, about)]
pub struct Cli {
    /// Output file path, relative to the current directory.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Caption for the left image.
    #[arg(short, long, default_value = "Hello")]
    pub greeting: String,

    /// Caption for the right image.
    #[arg(long, default_value = "You")]
    pub who: String,

    /// Width of each image in pixels.
    #[arg(long, default_value_t = 400, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Height of each image in pixels.
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Caption color name.
    #[arg(short, long, default_value = "Pink")]
    pub color: String,

    /// Caption font size.
    #[arg(short, long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    pub size: u32,

    /// Output format (inferred from the output extension if omitted).
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// JPEG quality, 1-100.
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_JPEG_QUALITY,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub quality: u8,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Request parameters for the two images, left then right.
    #[must_use]
    pub fn request_params(&self) -> [ImageRequestParams; 2] {
        [self.params_for(&self.greeting), self.params_for(&self.who)]
    }

    fn params_for(&self, caption: &str) -> ImageRequestParams {
        ImageRequestParams {
            caption: caption.to_string(),
            width: self.width,
            height: self.height,
            color: self.color.clone(),
            size: self.size,
        }
    }
}
