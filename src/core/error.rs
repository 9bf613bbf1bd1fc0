/// Failures that abort backdrop startup before any GPU work.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackdropError {
    #[error("missing #{0} render target")]
    MissingRenderTarget(String),
    #[error("#{0} is not a canvas element")]
    NotACanvas(String),
}
