//! Command line arguments backing the `glance` binary.
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use glance_rs::font::DEFAULT_FONT_SIZE;

#[derive(Parser, Debug)]
#[command(
  name = "glance",
  about = "A CLI tool for analyzing images with Azure AI Vision and annotating the results",
  version
)]
pub struct Args {
  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Caption, tag, detect objects and read text; annotate local images
  Analyze {
    /// Local image path or http(s) URL
    image: String,

    #[command(flatten)]
    service: ServiceArgs,

    #[command(flatten)]
    render: RenderArgs,
  },
  /// Extract text and write an annotated `<stem>_ocr` copy
  Ocr {
    /// Path to the image file to analyze
    image: PathBuf,

    #[command(flatten)]
    service: ServiceArgs,

    #[command(flatten)]
    render: RenderArgs,
  },
  /// Detect objects and write an annotated `<stem>_objects` copy
  Objects {
    /// Path to the image file to analyze
    image: PathBuf,

    #[command(flatten)]
    service: ServiceArgs,

    #[command(flatten)]
    render: RenderArgs,
  },
}

#[derive(ClapArgs, Debug)]
pub struct ServiceArgs {
  /// Vision resource endpoint, e.g. https://<name>.cognitiveservices.azure.com
  #[arg(long, env = "VISION_ENDPOINT", hide_env_values = true)]
  pub endpoint: Option<String>,

  /// Vision resource key
  #[arg(long, env = "VISION_KEY", hide_env_values = true)]
  pub key: Option<String>,

  /// Use a saved analysis response instead of calling the service
  #[arg(long, value_name = "JSON")]
  pub result: Option<PathBuf>,

  /// Language hint for captions and text reading, e.g. `en` or `fr`
  #[arg(long)]
  pub language: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct RenderArgs {
  /// TrueType font for labels (defaults to Arial, then a built-in font)
  #[arg(long)]
  pub font: Option<PathBuf>,

  /// Label font size in pixels
  #[arg(long, default_value_t = DEFAULT_FONT_SIZE)]
  pub font_size: f32,

  /// Keep labels inside the image instead of letting them run off the top edge
  #[arg(long)]
  pub clamp_labels: bool,

  /// Print the report only, do not write an annotated image
  #[arg(long)]
  pub no_image: bool,

  /// Print the report as JSON
  #[arg(long)]
  pub json: bool,
}
