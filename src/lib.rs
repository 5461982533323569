#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod document;
pub mod editor;
pub mod element;
pub mod error;
pub mod event;
pub mod geometry;
pub mod history;
pub mod input;
pub mod overlay;
pub mod path;
pub mod selection;
pub mod state;
pub mod view;

pub use config::EditorConfig;
pub use document::{NodeId, SvgDocument};
pub use editor::{Hit, SvgEditor};
pub use element::{PointId, Shape, ShapeKind};
pub use error::{ConfigError, DocumentError, StateTransitionError};
pub use event::{EditorEvent, EventHandler, ReplaceOrigin};
pub use history::EditHistory;
pub use input::InputEvent;
pub use overlay::Handle;
pub use path::{PathCommand, parse_path, resolve_points, serialize_path};
pub use state::EditorState;
pub use view::{BackgroundMode, ViewState};
