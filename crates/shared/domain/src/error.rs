use std::borrow::Cow;

/// A specialized [`DomainError`] enum of this crate.
#[ggp_derive::ggp_error]
pub enum DomainError {
    /// An identifier was built from an empty or whitespace-only string.
    #[error("Empty identifier{}: {message}", format_context(.context))]
    EmptyIdentifier { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
