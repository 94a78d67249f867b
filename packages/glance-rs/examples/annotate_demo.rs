use anyhow::Result;
use glance_rs::prelude::*;
use glance_vision::AnalysisResult;
use std::path::Path;

fn main() -> Result<()> {
    // Load a saved analysis response
    let body = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/analysis.json"
    ))?;
    let result = AnalysisResult::from_service_json(&body)?;

    if let Some(metadata) = result.metadata {
        println!("Analyzed image: {}x{}", metadata.width, metadata.height);
    }
    print!("{}", build_report(&result));

    // Draw everything onto a blank canvas of the analyzed size
    let (width, height) = result
        .metadata
        .map(|m| (m.width, m.height))
        .unwrap_or((120, 120));
    let canvas = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([255, 255, 255]),
    ));

    let renderer = AnnotationRenderer::new(LabelFont::resolve(None, 14.0), AnnotationStyle::default());
    let annotated = renderer.annotate(&canvas, &result);
    println!("\nDraw stats: {:?}", annotated.stats);

    let output = annotated_path(Path::new("demo.png"), ANNOTATED_SUFFIX);
    save_image(&annotated.image, image::ImageFormat::Png, &output)?;
    println!("Saved {}", output.display());

    Ok(())
}
