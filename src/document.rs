//! The live, mutable SVG tree the editor works on.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Removing a node
//! detaches it from its parent; its id stays valid but [`SvgDocument::contains`]
//! reports it as gone, which is how stale selections are detected.

use std::io::Cursor;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};

use crate::error::DocumentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
    CData(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The declared canvas of the document, in user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewBox {
    pub fn rect(&self) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(self.min_x, self.min_y),
            egui::vec2(self.width, self.height),
        )
    }
}

/// Controls what [`SvgDocument::serialize`] writes.
#[derive(Debug, Clone, Default)]
pub struct SerializeOptions<'a> {
    /// Class marking editor overlay subtrees. Those subtrees are skipped
    /// unless `include_overlay` is set.
    pub overlay_class: Option<&'a str>,
    pub include_overlay: bool,
    /// Attributes forced onto the root element in the output only.
    pub root_overrides: Vec<(&'a str, String)>,
}

#[derive(Debug, Clone)]
pub struct SvgDocument {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SvgDocument {
    /// Parse SVG text into an editable tree.
    ///
    /// The XML prolog, doctype and processing instructions are dropped. If the
    /// outermost element is not `<svg>`, the first nested `<svg>` becomes the root.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(text);
        let mut nodes: Vec<Node> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut top_level: Vec<NodeId> = Vec::new();

        let mut push = |nodes: &mut Vec<Node>, stack: &[NodeId], kind: NodeKind| -> NodeId {
            let id = NodeId(nodes.len());
            let parent = stack.last().copied();
            nodes.push(Node { kind, parent, children: Vec::new() });
            match parent {
                Some(p) => nodes[p.0].children.push(id),
                None => top_level.push(id),
            }
            id
        };

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let kind = element_kind(&e)?;
                    let id = push(&mut nodes, &stack, kind);
                    stack.push(id);
                }
                Event::Empty(e) => {
                    let kind = element_kind(&e)?;
                    push(&mut nodes, &stack, kind);
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Text(e) => {
                    if !stack.is_empty() {
                        let text = e.unescape()?.into_owned();
                        push(&mut nodes, &stack, NodeKind::Text(text));
                    }
                }
                Event::CData(e) => {
                    if !stack.is_empty() {
                        let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                        push(&mut nodes, &stack, NodeKind::CData(text));
                    }
                }
                Event::Comment(e) => {
                    if !stack.is_empty() {
                        let text = String::from_utf8_lossy(&e).into_owned();
                        push(&mut nodes, &stack, NodeKind::Comment(text));
                    }
                }
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if let Some(open) = stack.last() {
            let tag = match &nodes[open.0].kind {
                NodeKind::Element { tag, .. } => tag.clone(),
                _ => String::new(),
            };
            return Err(DocumentError::UnclosedElement(tag));
        }

        let mut doc = Self { nodes, root: NodeId(0) };
        let root = top_level
            .iter()
            .copied()
            .flat_map(|top| std::iter::once(top).chain(doc.descendants(top)))
            .find(|&id| doc.tag(id).is_some_and(|t| t.eq_ignore_ascii_case("svg")))
            .ok_or(DocumentError::MissingSvgRoot)?;
        doc.nodes[root.0].parent = None;
        doc.root = root;
        Ok(doc)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.0).map(|n| &n.kind)
    }

    /// Tag name of an element node.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.tag(id).is_some()
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// Numeric attribute, `None` when absent or unparseable.
    pub fn number_attribute(&self, id: NodeId, name: &str) -> Option<f32> {
        parse_length(self.attribute(id, name)?)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(NodeKind::Element { attributes, .. }) = self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            match attributes.iter_mut().find(|(key, _)| key == name) {
                Some(entry) => entry.1 = value,
                None => attributes.push((name.to_owned(), value)),
            }
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(NodeKind::Element { attributes, .. }) = self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            attributes.retain(|(key, _)| key != name);
        }
    }

    /// Whitespace-separated class list membership.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attribute(id, "class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map_or(&[], |n| n.children.as_slice())
    }

    /// Element children only, in document order.
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id).iter().copied().filter(|&c| self.is_element(c))
    }

    /// Parents from the immediate one up to the root, inclusive.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// All nodes below `id` in pre-order (document order).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Whether `id` is still attached to this document's tree.
    pub fn contains(&self, id: NodeId) -> bool {
        if id.0 >= self.nodes.len() {
            return false;
        }
        id == self.root || self.ancestors(id).any(|a| a == self.root)
    }

    /// Detach a node (and its subtree) from the tree. The root cannot be removed.
    ///
    /// A subtree that occupies the tail of the arena, like a freshly appended
    /// overlay, is reclaimed so repeated rebuilds do not grow the arena.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.contains(id) {
            return false;
        }
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
        let subtree = self.descendants(id);
        let is_tail = id.0 + 1 + subtree.len() == self.nodes.len() && subtree.iter().all(|n| n.0 > id.0);
        if is_tail && id.0 > self.root.0 {
            self.nodes.truncate(id.0);
        }
        true
    }

    /// Append a new element as the last child of `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: Vec<(String, String)>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind: NodeKind::Element { tag: tag.to_owned(), attributes },
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// The root's `viewBox`, falling back to `width`/`height` at the origin.
    pub fn view_box(&self) -> Option<ViewBox> {
        if let Some(raw) = self.attribute(self.root, "viewBox") {
            let numbers: Vec<f32> = raw
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .filter_map(|t| t.parse().ok())
                .collect();
            if let [min_x, min_y, width, height] = numbers[..] {
                if width > 0.0 && height > 0.0 {
                    return Some(ViewBox { min_x, min_y, width, height });
                }
            }
        }
        let width = self.number_attribute(self.root, "width")?;
        let height = self.number_attribute(self.root, "height")?;
        (width > 0.0 && height > 0.0).then_some(ViewBox { min_x: 0.0, min_y: 0.0, width, height })
    }

    /// Write the tree rooted at the `<svg>` element back to text.
    pub fn serialize(&self, options: &SerializeOptions<'_>) -> Result<String, DocumentError> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        self.write_node(&mut writer, self.root, options)?;
        Ok(String::from_utf8(writer.into_inner().into_inner())?)
    }

    fn write_node(
        &self,
        writer: &mut Writer<Cursor<Vec<u8>>>,
        id: NodeId,
        options: &SerializeOptions<'_>,
    ) -> Result<(), DocumentError> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { tag, attributes } => {
                if !options.include_overlay
                    && options.overlay_class.is_some_and(|class| self.has_class(id, class))
                {
                    return Ok(());
                }
                let mut start = BytesStart::new(tag.as_str());
                let is_root = id == self.root;
                for (key, value) in attributes {
                    let overridden = is_root && options.root_overrides.iter().any(|(k, _)| k == key);
                    if !overridden {
                        start.push_attribute((key.as_str(), value.as_str()));
                    }
                }
                if is_root {
                    for (key, value) in &options.root_overrides {
                        start.push_attribute((*key, value.as_str()));
                    }
                }

                let children = &self.nodes[id.0].children;
                if children.is_empty() {
                    writer.write_event(Event::Empty(start))?;
                } else {
                    writer.write_event(Event::Start(start))?;
                    for &child in children {
                        self.write_node(writer, child, options)?;
                    }
                    writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
                }
            }
            NodeKind::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            NodeKind::CData(text) => writer.write_event(Event::CData(BytesCData::new(text.as_str())))?,
            NodeKind::Comment(text) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?
            }
        }
        Ok(())
    }
}

fn element_kind(e: &BytesStart<'_>) -> Result<NodeKind, DocumentError> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(NodeKind::Element { tag, attributes })
}

/// Parse a length attribute, ignoring a trailing `px` unit.
pub fn parse_length(raw: &str) -> Option<f32> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    number.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50"><g id="a"><rect x="1" y="2" width="3" height="4"/></g><!-- note --><text>a &amp; b</text></svg>"#;

    #[test]
    fn parses_tree_and_round_trips() {
        let doc = SvgDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.tag(doc.root()), Some("svg"));
        let group = doc.child_elements(doc.root()).next().unwrap();
        assert_eq!(doc.attribute(group, "id"), Some("a"));

        let out = doc.serialize(&SerializeOptions::default()).unwrap();
        assert!(out.starts_with("<svg"));
        assert!(out.contains(r#"<rect x="1" y="2" width="3" height="4"/>"#));
        assert!(out.contains("<!-- note -->"));
        assert!(out.contains("a &amp; b"));
    }

    #[test]
    fn view_box_and_fallback() {
        let doc = SvgDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.view_box(), Some(ViewBox { min_x: 0.0, min_y: 0.0, width: 100.0, height: 50.0 }));

        let sized = SvgDocument::parse(r#"<svg width="20px" height="10"/>"#).unwrap();
        assert_eq!(sized.view_box().map(|v| v.width), Some(20.0));

        let bare = SvgDocument::parse("<svg/>").unwrap();
        assert_eq!(bare.view_box(), None);
    }

    #[test]
    fn finds_nested_svg_root() {
        let doc = SvgDocument::parse(r#"<div><p>hi</p><svg viewBox="0 0 1 1"><path d="M0 0"/></svg></div>"#).unwrap();
        assert_eq!(doc.tag(doc.root()), Some("svg"));
        assert_eq!(doc.parent(doc.root()), None);
        let out = doc.serialize(&SerializeOptions::default()).unwrap();
        assert!(out.starts_with("<svg"));
        assert!(!out.contains("<p>"));
    }

    #[test]
    fn rejects_missing_root_and_bad_xml() {
        assert!(matches!(SvgDocument::parse("<html/>"), Err(DocumentError::MissingSvgRoot)));
        assert!(SvgDocument::parse("<svg><g></svg>").is_err());
        assert!(SvgDocument::parse("<svg><g>").is_err());
    }

    #[test]
    fn remove_detaches_subtree() {
        let mut doc = SvgDocument::parse(SAMPLE).unwrap();
        let group = doc.child_elements(doc.root()).next().unwrap();
        let rect = doc.child_elements(group).next().unwrap();
        assert!(doc.remove(group));
        assert!(!doc.contains(group));
        assert!(!doc.contains(rect));
        assert!(!doc.remove(doc.root()));
    }

    #[test]
    fn overlay_is_stripped_and_overrides_apply() {
        let mut doc = SvgDocument::parse(SAMPLE).unwrap();
        let root = doc.root();
        doc.append_element(root, "g", vec![("class".into(), "ov".into())]);
        let clean = doc
            .serialize(&SerializeOptions { overlay_class: Some("ov"), ..Default::default() })
            .unwrap();
        assert!(!clean.contains("class=\"ov\""));

        let display = doc
            .serialize(&SerializeOptions {
                overlay_class: Some("ov"),
                include_overlay: true,
                root_overrides: vec![("overflow", "visible".to_owned())],
            })
            .unwrap();
        assert!(display.contains("class=\"ov\""));
        assert!(display.contains("overflow=\"visible\""));
    }
}
