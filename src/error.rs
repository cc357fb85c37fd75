use thiserror::Error;

/// Fatal failures. None of these have a recovery path: there is nothing
/// useful to render without a window, a context, and a linked program.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("error compiling shader: {0}")]
    ShaderCompile(String),

    #[error("error linking shader program: {0}")]
    ProgramLink(String),

    #[error("{0}")]
    Environment(String),
}
