//! Drawn-line measurement for diagram checks.
//!
//! Drawings arrive in canvas space: origin at the top-left corner, `y` growing
//! downwards. Every angle produced here is converted to the usual math
//! convention (counter-clockwise positive, `y` up) so it can be compared
//! directly with force directions measured from the `+x` axis.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Segments shorter than this are treated as a click rather than a line.
pub const MIN_SEGMENT_LENGTH: f64 = 1e-9;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum GeometryError {
    #[error("segment {index} has zero length")]
    Degenerate { index: usize },
    #[error("segment {index} has a non-finite coordinate")]
    NonFinite { index: usize },
    #[error("canvas line object {index} is missing `{field}`")]
    MissingCoordinate { index: usize, field: &'static str },
    #[error("malformed canvas document: {0}")]
    Canvas(String),
}

//
// ─── PRIMITIVES ────────────────────────────────────────────────────────────────
//

/// A point in canvas pixel space (top-left origin, y down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One raw stroke as captured from the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[must_use]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }
}

/// A measured, non-degenerate segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawnLine {
    /// Position of the segment in the submitted drawing.
    pub index: usize,
    pub start: Point,
    pub end: Point,
    /// Direction from `start` to `end`, degrees in (-180, 180], CCW from +x.
    pub angle_deg: f64,
    pub length: f64,
}

/// Measures a single segment.
///
/// # Errors
///
/// Returns `GeometryError::NonFinite` or `GeometryError::Degenerate` when the
/// segment has no usable direction.
pub fn measure(index: usize, segment: &Segment) -> Result<DrawnLine, GeometryError> {
    let Segment { start, end } = *segment;
    if ![start.x, start.y, end.x, end.y].iter().all(|v| v.is_finite()) {
        return Err(GeometryError::NonFinite { index });
    }

    let dx = end.x - start.x;
    let dy_canvas = end.y - start.y;
    let length = dx.hypot(dy_canvas);
    if length < MIN_SEGMENT_LENGTH {
        return Err(GeometryError::Degenerate { index });
    }

    // Canvas y grows downwards; flip it so CCW stays positive.
    let angle_deg = normalize_degrees((-dy_canvas).atan2(dx).to_degrees());

    Ok(DrawnLine {
        index,
        start,
        end,
        angle_deg,
        length,
    })
}

//
// ─── EXTRACTION ────────────────────────────────────────────────────────────────
//

/// Result of measuring a whole drawing.
///
/// Degenerate segments keep their slot so that indices chosen by the learner
/// still line up with what they drew.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    slots: Vec<Result<DrawnLine, GeometryError>>,
}

impl Extraction {
    /// Total number of submitted segments, degenerate ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates over usable lines in drawing order.
    pub fn lines(&self) -> impl Iterator<Item = &DrawnLine> {
        self.slots.iter().filter_map(|slot| slot.as_ref().ok())
    }

    /// Number of usable lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    /// Indices of segments that were excluded.
    #[must_use]
    pub fn degenerate_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.is_err().then_some(idx))
            .collect()
    }

    /// Looks up the measured line at `index`.
    ///
    /// Returns `None` when the index is out of range, and the stored error when
    /// the segment at that index was excluded.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Result<DrawnLine, GeometryError>> {
        self.slots.get(index)
    }
}

/// Measures every segment of a drawing. Pure; re-run on every check.
#[must_use]
pub fn extract_lines(segments: &[Segment]) -> Extraction {
    Extraction {
        slots: segments
            .iter()
            .enumerate()
            .map(|(idx, segment)| measure(idx, segment))
            .collect(),
    }
}

//
// ─── ANGLES ────────────────────────────────────────────────────────────────────
//

/// Wraps an angle into (-180, 180].
#[must_use]
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

/// Wraps an angle into [0, 360).
#[must_use]
pub fn normalize_degrees_positive(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Smallest rotation between two directions, in [0, 180].
#[must_use]
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    if d > 180.0 { 360.0 - d } else { d }
}

//
// ─── CANVAS DOCUMENTS ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct CanvasDocument {
    #[serde(default)]
    objects: Vec<CanvasObject>,
}

#[derive(Debug, Deserialize)]
struct CanvasObject {
    #[serde(rename = "type")]
    kind: String,
    x1: Option<f64>,
    y1: Option<f64>,
    x2: Option<f64>,
    y2: Option<f64>,
}

/// Reads the line objects out of a drawing-canvas JSON export.
///
/// Objects of any other type (paths, rectangles, text) are skipped.
///
/// # Errors
///
/// Returns `GeometryError::Canvas` for invalid JSON and
/// `GeometryError::MissingCoordinate` for a line without its endpoints.
pub fn segments_from_canvas_json(json: &str) -> Result<Vec<Segment>, GeometryError> {
    let doc: CanvasDocument =
        serde_json::from_str(json).map_err(|err| GeometryError::Canvas(err.to_string()))?;

    doc.objects
        .iter()
        .enumerate()
        .filter(|(_, obj)| obj.kind == "line")
        .map(|(index, obj)| {
            let coord = |value: Option<f64>, field: &'static str| {
                value.ok_or(GeometryError::MissingCoordinate { index, field })
            };
            Ok(Segment::from_coords(
                coord(obj.x1, "x1")?,
                coord(obj.y1, "y1")?,
                coord(obj.x2, "x2")?,
                coord(obj.y2, "y2")?,
            ))
        })
        .collect()
}
