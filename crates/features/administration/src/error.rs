use admin_kernel::server::HostError;
use admin_kernel::store::ConfigStoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::borrow::Cow;

/// A specialized [`AdminError`] enum of this crate.
#[admin_derive::admin_error]
pub enum AdminError {
    /// Required configuration is missing or malformed after the defaults merge.
    #[error("Administration config error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// A discovered entry point could not be resolved to a view factory.
    #[error("View plugin load error{}: {message}", format_context(.context))]
    PluginLoad { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// A view could not be added to the panel.
    #[error("View registration error{}: {message}", format_context(.context))]
    Registration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// A declared schema could not be bound, or a view rendered before binding.
    #[error("View schema error{}: {message}", format_context(.context))]
    Schema { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The host rejected a wiring step.
    #[error("Host error{}: {source}", format_context(.context))]
    Host { source: HostError, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal administration error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<ConfigStoreError> for AdminError {
    fn from(err: ConfigStoreError) -> Self {
        Self::Config { message: err.to_string().into(), context: None }
    }
}

impl AdminError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Schema { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
