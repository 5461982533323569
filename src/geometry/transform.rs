//! SVG `transform` lists and the coordinate spaces built from them.

use egui::Pos2;
use glam::{Affine2, Vec2};

use super::transform_point;
use crate::document::{NodeId, SvgDocument};
use crate::element::format_number;

/// Maps points between a shape's own user space and the document root.
///
/// Anything that can answer these two questions can drive the editor: an
/// affine matrix in tests, or live DOM geometry in a browser host.
pub trait CoordinateSpace {
    fn to_local(&self, global: Pos2) -> Pos2;
    fn to_global(&self, local: Pos2) -> Pos2;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineSpace {
    forward: Affine2,
    inverse: Affine2,
}

impl AffineSpace {
    /// `None` when the matrix cannot be inverted.
    pub fn new(forward: Affine2) -> Option<Self> {
        let det = forward.matrix2.determinant();
        if !det.is_finite() || det.abs() <= f32::EPSILON || !forward.translation.is_finite() {
            return None;
        }
        Some(Self { forward, inverse: forward.inverse() })
    }

    pub fn matrix(&self) -> Affine2 {
        self.forward
    }
}

impl CoordinateSpace for AffineSpace {
    fn to_local(&self, global: Pos2) -> Pos2 {
        transform_point(&self.inverse, global)
    }

    fn to_global(&self, local: Pos2) -> Pos2 {
        transform_point(&self.forward, local)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct TransformEntry<'a> {
    name: &'a str,
    args: Vec<f32>,
    /// Byte range of the whole `name(args)` text.
    start: usize,
    end: usize,
}

fn transform_entries(attr: &str) -> Vec<TransformEntry<'_>> {
    let mut entries = Vec::new();
    let mut offset = 0;
    while let Some(open) = attr[offset..].find('(') {
        let open = offset + open;
        let Some(close) = attr[open..].find(')') else {
            break;
        };
        let close = open + close;
        let head = &attr[offset..open];
        let name = head.trim_matches(|c: char| c.is_whitespace() || c == ',');
        let start = open - head.trim_start_matches(|c: char| c.is_whitespace() || c == ',').len();
        let args = attr[open + 1..close]
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .filter_map(|t| t.parse::<f32>().ok())
            .collect();
        entries.push(TransformEntry { name, args, start, end: close + 1 });
        offset = close + 1;
    }
    entries
}

fn entry_matrix(entry: &TransformEntry<'_>) -> Option<Affine2> {
    let a = &entry.args;
    let m = match (entry.name, a.len()) {
        ("matrix", 6) => Affine2::from_cols_array(&[a[0], a[1], a[2], a[3], a[4], a[5]]),
        ("translate", 1) => Affine2::from_translation(Vec2::new(a[0], 0.0)),
        ("translate", 2) => Affine2::from_translation(Vec2::new(a[0], a[1])),
        ("scale", 1) => Affine2::from_scale(Vec2::splat(a[0])),
        ("scale", 2) => Affine2::from_scale(Vec2::new(a[0], a[1])),
        ("rotate", 1) => Affine2::from_angle(a[0].to_radians()),
        ("rotate", 3) => {
            let center = Vec2::new(a[1], a[2]);
            Affine2::from_translation(center)
                * Affine2::from_angle(a[0].to_radians())
                * Affine2::from_translation(-center)
        }
        ("skewX", 1) => Affine2::from_cols_array(&[1.0, 0.0, a[0].to_radians().tan(), 1.0, 0.0, 0.0]),
        ("skewY", 1) => Affine2::from_cols_array(&[1.0, a[0].to_radians().tan(), 0.0, 1.0, 0.0, 0.0]),
        _ => return None,
    };
    Some(m)
}

/// Parse a transform list. Unknown or malformed entries are skipped.
pub fn parse_transform(attr: &str) -> Affine2 {
    transform_entries(attr)
        .iter()
        .filter_map(entry_matrix)
        .fold(Affine2::IDENTITY, |acc, m| acc * m)
}

/// The offset of a list that starts with `translate(...)`, zero otherwise.
pub fn leading_translate(attr: Option<&str>) -> egui::Vec2 {
    let entries = attr.map(transform_entries).unwrap_or_default();
    match entries.first() {
        Some(entry) if entry.name == "translate" => match entry.args[..] {
            [tx] => egui::vec2(tx, 0.0),
            [tx, ty] => egui::vec2(tx, ty),
            _ => egui::Vec2::ZERO,
        },
        _ => egui::Vec2::ZERO,
    }
}

/// Rewrite the leading translate of a transform list, or prepend one.
pub fn with_leading_translate(attr: Option<&str>, offset: egui::Vec2) -> String {
    let translate = format!("translate({}, {})", format_number(offset.x), format_number(offset.y));
    let Some(attr) = attr.filter(|a| !a.trim().is_empty()) else {
        return translate;
    };
    match transform_entries(attr).first() {
        Some(entry) if entry.name == "translate" => {
            format!("{}{}{}", &attr[..entry.start], translate, &attr[entry.end..])
        }
        _ => format!("{translate} {}", attr.trim_start()),
    }
}

fn own_transform(doc: &SvgDocument, node: NodeId) -> Affine2 {
    doc.attribute(node, "transform")
        .map(parse_transform)
        .unwrap_or(Affine2::IDENTITY)
}

/// Transform from the node's parent space to the root's user space.
pub fn parent_ctm(doc: &SvgDocument, node: NodeId) -> Affine2 {
    let root = doc.root();
    let mut chain: Vec<NodeId> = doc.ancestors(node).take_while(|&a| a != root).collect();
    chain.reverse();
    chain
        .into_iter()
        .fold(Affine2::IDENTITY, |acc, a| acc * own_transform(doc, a))
}

/// Transform from the node's own user space to the root's user space.
pub fn element_ctm(doc: &SvgDocument, node: NodeId) -> Affine2 {
    if node == doc.root() {
        return Affine2::IDENTITY;
    }
    parent_ctm(doc, node) * own_transform(doc, node)
}
