use admin_derive::admin_error;
use std::borrow::Cow;

#[admin_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing key{}: {message}", format_context(.context))]
    Missing { message: Cow<'static, str>, context: Option<std::borrow::Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<Vec<u8>, DemoError> {
    let bytes = std::fs::read("missing.bin").context("Reading snapshot")?;
    if bytes.is_empty() {
        return Err("empty snapshot".into());
    }
    Ok(bytes)
}

fn main() {
    let err = read().expect_err("file does not exist");
    assert!(err.to_string().contains("(Reading snapshot)"));

    let err: Result<(), DemoError> =
        Err(DemoError::Missing { message: "APPNAME".into(), context: None });
    let err = err.context("startup").expect_err("still an error");
    assert_eq!(err.to_string(), "Missing key (startup): APPNAME");
}
