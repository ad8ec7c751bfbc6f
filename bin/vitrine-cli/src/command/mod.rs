pub mod chrome;
pub mod fetch;
pub mod locale;
pub mod resolve;
pub mod switch;

/// A failure the command already showed to the user.
#[derive(Debug, thiserror::Error)]
#[error("failure already reported")]
pub struct AlreadyReported;

pub fn is_reported(error: &anyhow::Error) -> bool {
    error.downcast_ref::<AlreadyReported>().is_some()
}
