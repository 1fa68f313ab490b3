//! Error types for form template rendering.
//!
//! This module provides [`RenderError`], the single error type returned by
//! every fallible operation in this crate. Engine failures are classified
//! into a stable set of variants; the original messages pass through
//! unchanged.

use std::fmt;

/// Error type for renderer and engine operations.
#[derive(Debug)]
pub enum RenderError {
    /// `resolve` was invoked on the bare renderer contract.
    NotImplemented(String),

    /// Invalid engine configuration, or no project template source installed.
    ConfigError(String),

    /// Template not found in any search location.
    TemplateNotFound(String),

    /// Template syntax error or rendering failure.
    TemplateError(String),

    /// Context or request serialization failure.
    SerializationError(String),

    /// I/O error (e.g., reading a template from disk).
    IoError(std::io::Error),

    /// Other operational error.
    OperationError(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NotImplemented(msg) => write!(f, "not implemented: {}", msg),
            RenderError::ConfigError(msg) => write!(f, "configuration error: {}", msg),
            RenderError::TemplateNotFound(name) => write!(f, "template not found: {}", name),
            RenderError::TemplateError(msg) => write!(f, "template error: {}", msg),
            RenderError::SerializationError(msg) => write!(f, "serialization error: {}", msg),
            RenderError::IoError(err) => write!(f, "I/O error: {}", err),
            RenderError::OperationError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::IoError(err)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::SerializationError(err.to_string())
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::TemplateNotFound(err.to_string()),
            ErrorKind::SyntaxError
            | ErrorKind::BadEscape
            | ErrorKind::UndefinedError
            | ErrorKind::UnknownTest
            | ErrorKind::UnknownFunction
            | ErrorKind::UnknownFilter
            | ErrorKind::UnknownMethod => RenderError::TemplateError(err.to_string()),
            ErrorKind::BadSerialization => RenderError::SerializationError(err.to_string()),
            _ => RenderError::OperationError(err.to_string()),
        }
    }
}

#[cfg(feature = "tera")]
impl From<tera::Error> for RenderError {
    fn from(err: tera::Error) -> Self {
        use tera::ErrorKind;

        match &err.kind {
            ErrorKind::TemplateNotFound(name) => RenderError::TemplateNotFound(name.clone()),
            ErrorKind::Json(json_err) => RenderError::SerializationError(json_err.to_string()),
            ErrorKind::Io(kind) => RenderError::IoError(std::io::Error::from(*kind)),
            ErrorKind::Msg(msg) => RenderError::TemplateError(msg.clone()),
            _ => RenderError::TemplateError(err.to_string()),
        }
    }
}
