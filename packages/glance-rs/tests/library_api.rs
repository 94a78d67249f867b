//! Integration tests for the glance-rs library API

use glance_vision::{
    AnalysisResult, BoundingBox, LabeledRegion, Point, Polygon, ReadResult, TextLine, Word,
};

fn blank(size: u32) -> image::DynamicImage {
    image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        size,
        size,
        image::Rgb([255, 255, 255]),
    ))
}

fn polygon(points: &[(f32, f32)]) -> Polygon {
    Polygon::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
}

#[test]
fn test_prelude_imports() {
    // This test verifies that the prelude module exports everything correctly
    use glance_rs::prelude::*;

    assert_eq!(format_confidence(0.5), "50.00%");

    let renderer = AnnotationRenderer::new(LabelFont::builtin(16.0), AnnotationStyle::default());
    let annotated = renderer.annotate(&blank(32), &AnalysisResult::default());
    assert_eq!(annotated.stats, DrawStats::default());

    let report = build_report(&AnalysisResult::default());
    assert!(report.is_empty());
}

#[test]
fn test_dog_and_cat_boxes_are_outlined() {
    use glance_rs::{AnnotationRenderer, AnnotationStyle, LabelFont};

    let objects = vec![
        LabeledRegion::with_box("dog", 0.92, BoundingBox::new(10.0, 10.0, 50.0, 50.0)),
        LabeledRegion::with_box("cat", 0.81, BoundingBox::new(40.0, 40.0, 50.0, 50.0)),
    ];
    let renderer = AnnotationRenderer::new(LabelFont::builtin(16.0), AnnotationStyle::default());
    let annotated = renderer.annotate_objects(&blank(120), &objects);

    assert_eq!(annotated.stats.region_outlines, 2);
    assert_eq!(annotated.stats.labels, 2);

    let out = annotated.image.to_rgb8();
    assert_eq!(out.get_pixel(50, 40).0, [255, 0, 0]);
    assert_eq!(out.get_pixel(10, 30).0, [255, 0, 0]);
    // inside the overlap, away from every edge, nothing is drawn
    assert_eq!(out.get_pixel(50, 50).0, [255, 255, 255]);
}

#[test]
fn test_three_point_line_is_reported_but_not_drawn() {
    use glance_rs::{build_report, AnnotationRenderer, AnnotationStyle, LabelFont};

    let result = AnalysisResult {
        read: Some(ReadResult::from_lines(vec![TextLine {
            text: "corner".to_string(),
            polygon: polygon(&[(5.0, 5.0), (30.0, 5.0), (30.0, 20.0)]),
            words: vec![
                Word {
                    text: "corner".to_string(),
                    polygon: polygon(&[(5.0, 5.0), (30.0, 5.0), (30.0, 20.0), (5.0, 20.0)]),
                    confidence: 0.66,
                },
                Word {
                    text: "ghost".to_string(),
                    polygon: Polygon::default(),
                    confidence: 0.1,
                },
            ],
        }])),
        ..Default::default()
    };

    let renderer = AnnotationRenderer::new(LabelFont::builtin(16.0), AnnotationStyle::default());
    let annotated = renderer.annotate_text(&blank(40), result.read.as_ref());
    assert_eq!(annotated.stats.line_outlines, 0);
    assert_eq!(annotated.stats.labels, 0);
    assert_eq!(annotated.stats.word_outlines, 1);

    let text = build_report(&result).to_string();
    assert!(text.starts_with("Detected text:\nLine: 'corner'"));
    assert!(text.contains("  Word: 'ghost' (confidence: 10.00%)"));
}

#[test]
fn test_service_json_drives_renderer() {
    use glance_rs::{AnnotationRenderer, AnnotationStyle, LabelFont};

    let body = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/analysis.json"
    ))
    .unwrap();
    let result = AnalysisResult::from_service_json(&body).unwrap();

    let renderer = AnnotationRenderer::new(LabelFont::builtin(16.0), AnnotationStyle::default());
    let annotated = renderer.annotate(&blank(120), &result);
    assert_eq!(annotated.stats.region_outlines, 2);
    assert_eq!(annotated.stats.line_outlines, 1);
    assert_eq!(annotated.stats.word_outlines, 2);
    assert_eq!(annotated.stats.labels, 3);
    assert_eq!(annotated.stats.skipped, 0);
}
