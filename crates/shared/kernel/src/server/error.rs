use std::borrow::Cow;

/// Errors raised by the host application while wiring or finalizing.
#[admin_derive::admin_error]
pub enum HostError {
    #[error("Invalid route{}: {message}", format_context(.context))]
    InvalidRoute { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Duplicate route{}: {message}", format_context(.context))]
    DuplicateRoute { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Blueprint already registered{}: {message}", format_context(.context))]
    DuplicateBlueprint { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Before-serving hook failed{}: {source}", format_context(.context))]
    Hook {
        source: Box<dyn std::error::Error + Send + Sync>,
        context: Option<Cow<'static, str>>,
    },
}
