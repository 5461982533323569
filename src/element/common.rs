use egui::{Pos2, Rect};

use crate::document::{NodeId, SvgDocument, parse_length};

/// Smallest width, height or radius a handle drag may produce.
pub const MIN_SHAPE_SIZE: f32 = 1.0;

/// Numeric attribute, treating absent or unparseable values as zero.
pub(crate) fn number_attr(doc: &SvgDocument, node: NodeId, name: &str) -> f32 {
    doc.attribute(node, name).and_then(parse_length).unwrap_or(0.0)
}

/// Shortest text that parses back to the same `f32`.
pub fn format_number(value: f32) -> String {
    if value == 0.0 {
        // Avoid writing "-0".
        return "0".to_owned();
    }
    value.to_string()
}

/// Widen a pointer delta through its shortest decimal text, so `0.3` adds
/// `0.3` to an `f64` and not `0.30000001192092896`.
pub(crate) fn widen(delta: f32) -> f64 {
    delta.to_string().parse().unwrap_or(f64::from(delta))
}

fn format_coordinate(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    value.to_string()
}

/// `x,y` pairs of a `points` attribute, at full precision.
pub(crate) fn parse_point_list(raw: &str) -> Vec<[f64; 2]> {
    let numbers: Vec<f64> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .filter_map(|t| t.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect();
    numbers.chunks_exact(2).map(|p| [p[0], p[1]]).collect()
}

pub(crate) fn format_point_list(points: &[[f64; 2]]) -> String {
    points
        .iter()
        .map(|[x, y]| format!("{},{}", format_coordinate(*x), format_coordinate(*y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Bounding box of a set of points, `None` when empty.
pub(crate) fn calculate_bounds(points: &[Pos2]) -> Option<Rect> {
    if points.is_empty() {
        return None;
    }
    Some(Rect::from_points(points))
}
