use ggp_derive::ggp_error;
use std::borrow::Cow;

#[ggp_error]
#[derive(Debug)]
pub enum DemoError {
    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let from_str: DemoError = "static failure".into();
    assert_eq!(from_str.to_string(), "Internal error: static failure");

    let from_string: DemoError = format!("failure #{}", 2).into();
    let err = Err::<(), _>(from_string).context("step").unwrap_err();
    assert_eq!(err.to_string(), "Internal error (step): failure #2");
}
