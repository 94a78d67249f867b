/// A single vertex in source-image pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Minimum vertex count for a polygon to be outlined.
pub const MIN_POLYGON_POINTS: usize = 4;

/// Ordered outline of a detected region. Vertex order defines edge connectivity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// True when the polygon has enough finite vertices to be drawn.
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= MIN_POLYGON_POINTS
            && self.points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
    }
}

impl std::fmt::Display for Polygon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "({}, {})", p.x, p.y)?;
        }
        f.write_str("]")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// True when the box has finite coordinates and a strictly positive area.
    pub fn is_drawable(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Box(BoundingBox),
    Polygon(Polygon),
}

/// A labeled detection. Confidence is informational and never used for filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRegion {
    pub label: String,
    pub confidence: f32,
    pub geometry: Geometry,
}

impl LabeledRegion {
    pub fn with_box(label: impl Into<String>, confidence: f32, bbox: BoundingBox) -> Self {
        Self {
            label: label.into(),
            confidence,
            geometry: Geometry::Box(bbox),
        }
    }

    pub fn with_polygon(label: impl Into<String>, confidence: f32, polygon: Polygon) -> Self {
        Self {
            label: label.into(),
            confidence,
            geometry: Geometry::Polygon(polygon),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub polygon: Polygon,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub polygon: Polygon,
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
}
