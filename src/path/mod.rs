//! Path data: the `d` attribute grammar and the geometry it implies.

mod codec;
mod points;

pub use codec::{CommandKind, PathCommand, parse_path, serialize_path};
pub use points::{
    AnchorPoint, Arc, ControlHandle, ResolvedPoints, Segment, path_bounds, path_segments,
    resolve_points,
};
