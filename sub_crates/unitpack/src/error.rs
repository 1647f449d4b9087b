use thiserror::Error;

pub type UnpackResult<T> = Result<T, UnpackError>;

/// The only way decoding can fail: the caller handed over a buffer that
/// no codec of the requested kind could have produced.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum UnpackError {
    #[error("expected a {expected}-byte buffer, got {actual} bytes")]
    WrongLength { expected: usize, actual: usize },

    #[error("a depth-{depth} quad-tree path needs {needed} bytes, got {actual}")]
    TooShort {
        depth: usize,
        needed: usize,
        actual: usize,
    },
}
