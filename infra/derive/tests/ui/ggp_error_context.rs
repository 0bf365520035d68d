use ggp_derive::ggp_error;
use std::borrow::Cow;

#[ggp_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing file{}: {message}", format_context(.context))]
    FileNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn open() -> Result<(), std::io::Error> {
    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
}

fn main() {
    let err = open().context("Opening function defaults").unwrap_err();
    assert!(matches!(err, DemoError::Io { .. }));
    assert_eq!(err.to_string(), "IO error (Opening function defaults): gone");

    let plain: DemoError = std::io::Error::other("boom").into();
    assert_eq!(plain.to_string(), "IO error: boom");

    let missing: Result<(), DemoError> =
        Err(DemoError::FileNotFound { message: "a.toml".into(), context: None });
    let err = missing.context("Resolving").unwrap_err();
    assert_eq!(err.to_string(), "Missing file (Resolving): a.toml");
}
