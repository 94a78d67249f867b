//! Runs the `glance` subcommands.
use anyhow::{Context, Result};
use image::DynamicImage;
use log::info;
use std::path::Path;

use glance_rs::prelude::*;
use glance_vision::{
  AnalysisInput, AnalysisOptions, AnalysisResult, AzureVisionClient, ImageAnalyzer, VisionConfig,
  VisualFeature,
};

use crate::cli::{Args, Commands, RenderArgs, ServiceArgs};

pub async fn run(args: Args) -> Result<()> {
  match args.command {
    Commands::Version => {
      println!("glance {}", env!("CARGO_PKG_VERSION"));
      Ok(())
    }
    Commands::Analyze { image, service, render } => analyze(&image, &service, &render).await,
    Commands::Ocr { image, service, render } => ocr(&image, &service, &render).await,
    Commands::Objects { image, service, render } => objects(&image, &service, &render).await,
  }
}

async fn fetch(
  input: &AnalysisInput,
  features: &[VisualFeature],
  service: &ServiceArgs,
) -> Result<AnalysisResult> {
  if let Some(path) = &service.result {
    let body = tokio::fs::read_to_string(path)
      .await
      .with_context(|| format!("failed to read analysis result {}", path.display()))?;
    return AnalysisResult::from_service_json(&body)
      .with_context(|| format!("invalid analysis result {}", path.display()));
  }

  let config = VisionConfig::new(service.endpoint.clone(), service.key.clone())?;
  let client = AzureVisionClient::new(config)?;
  info!("Analyzing {:?} for {:?}", input, features);
  client
    .analyze(input, &options(features, service))
    .await
    .context("image analysis failed")
}

fn options(features: &[VisualFeature], service: &ServiceArgs) -> AnalysisOptions {
  AnalysisOptions {
    language: service.language.clone(),
    ..AnalysisOptions::new(features)
  }
}

fn renderer(render: &RenderArgs) -> AnnotationRenderer {
  let style = AnnotationStyle {
    label_placement: if render.clamp_labels {
      LabelPlacement::ClampToImage
    } else {
      LabelPlacement::Unclamped
    },
    ..Default::default()
  };
  AnnotationRenderer::new(LabelFont::resolve(render.font.as_deref(), render.font_size), style)
}

fn print_report(result: &AnalysisResult, render: &RenderArgs) -> Result<()> {
  let report = build_report(result);
  if render.json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print!("{}", report);
  }
  Ok(())
}

/// Loads the source image, annotates it and saves the copy under `suffix`.
fn write_annotated(
  path: &Path,
  suffix: &str,
  annotate: impl FnOnce(&DynamicImage) -> Annotated,
) -> Result<()> {
  let source = load_image(path)?;
  let annotated = annotate(&source.image);
  info!("Draw stats: {:?}", annotated.stats);

  let output = annotated_path(path, suffix);
  save_image(&annotated.image, source.format, &output)?;
  println!("\nAnnotated image saved as: {}", output.display());
  Ok(())
}

async fn analyze(image: &str, service: &ServiceArgs, render: &RenderArgs) -> Result<()> {
  let input = AnalysisInput::from_arg(image);
  let features = [
    VisualFeature::Caption,
    VisualFeature::Tags,
    VisualFeature::Objects,
    VisualFeature::Read,
  ];
  let result = fetch(&input, &features, service).await?;

  if !render.json {
    println!("Image analysis results:");
  }
  print_report(&result, render)?;

  match input.local_path() {
    Some(path) if !render.no_image => {
      let renderer = renderer(render);
      write_annotated(path, ANNOTATED_SUFFIX, |img| renderer.annotate(img, &result))
    }
    _ => Ok(()),
  }
}

async fn ocr(image: &Path, service: &ServiceArgs, render: &RenderArgs) -> Result<()> {
  let input = AnalysisInput::FilePath(image.to_path_buf());
  let result = fetch(&input, &[VisualFeature::Read], service).await?;
  let result = AnalysisResult {
    read: result.read,
    ..Default::default()
  };

  if !render.json {
    println!("OCR analysis results:");
  }
  print_report(&result, render)?;

  if render.no_image {
    return Ok(());
  }
  let renderer = renderer(render);
  write_annotated(image, OCR_SUFFIX, |img| renderer.annotate_text(img, result.read.as_ref()))
}

async fn objects(image: &Path, service: &ServiceArgs, render: &RenderArgs) -> Result<()> {
  let input = AnalysisInput::FilePath(image.to_path_buf());
  let result = fetch(&input, &[VisualFeature::Tags, VisualFeature::Objects], service).await?;
  let result = AnalysisResult {
    tags: result.tags,
    objects: result.objects,
    ..Default::default()
  };

  if !render.json {
    println!("Object detection results:");
  }
  print_report(&result, render)?;

  if render.no_image {
    return Ok(());
  }
  let renderer = renderer(render);
  let objects = result.objects.as_deref().unwrap_or_default();
  write_annotated(image, OBJECTS_SUFFIX, |img| renderer.annotate_objects(img, objects))
}
