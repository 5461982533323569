use thiserror::Error;

/// Errors raised while loading or writing an SVG document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Document has no <svg> element")]
    MissingSvgRoot,

    #[error("Element <{0}> is never closed")]
    UnclosedElement(String),

    #[error("Failed to write document: {0}")]
    Write(#[from] std::io::Error),

    #[error("Serialized document is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Errors raised while loading an [`EditorConfig`](crate::config::EditorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse editor config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid editor config: {0}")]
    Invalid(String),
}

/// Errors that can occur during editor state transitions
#[derive(Debug, Error)]
pub enum StateTransitionError {
    /// Attempted to transition between incompatible states
    #[error("Cannot transition from {from} to {to}")]
    InvalidStateTransition {
        from: &'static str,
        to: &'static str,
    },
    /// A drag is in flight and owns the pointer
    #[error("Editor busy: {0}")]
    Busy(&'static str),
}
