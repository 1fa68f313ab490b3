//! Render-call context and the opaque request handle.
//!
//! A [`Context`] is the variable mapping handed to the template. A
//! [`RequestContext`] is an opaque capture of the current HTTP request that
//! the renderer passes through without inspecting; when present it is
//! exposed to templates under the `request` variable.

use serde::Serialize;
use serde_json::Value;

use crate::error::RenderError;

/// Template context: a JSON object mapping variable names to values.
pub type Context = serde_json::Map<String, Value>;

/// Opaque request handle passed through to templates.
///
/// # Example
///
/// ```rust
/// use formcast_render::RequestContext;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct RequestInfo {
///     path: String,
///     method: String,
/// }
///
/// let request = RequestContext::new(&RequestInfo {
///     path: "/forms/new".into(),
///     method: "GET".into(),
/// }).unwrap();
/// assert_eq!(request.data()["path"], "/forms/new");
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    data: Value,
}

impl RequestContext {
    /// Captures any serializable request representation.
    pub fn new<T: Serialize>(request: &T) -> Result<Self, RenderError> {
        Ok(Self {
            data: serde_json::to_value(request)?,
        })
    }

    /// Wraps an already-built JSON value.
    pub fn from_value(data: Value) -> Self {
        Self { data }
    }

    /// The captured request data.
    pub fn data(&self) -> &Value {
        &self.data
    }
}

/// Merges the request handle into the call context under `request`.
pub(crate) fn with_request(context: &Context, request: Option<&RequestContext>) -> Context {
    match request {
        Some(req) => {
            let mut merged = context.clone();
            merged.insert("request".to_string(), req.data().clone());
            merged
        }
        None => context.clone(),
    }
}
