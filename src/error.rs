use std::{io, path::PathBuf};

use thiserror::Error;
use unitpack::{UnknownCodec, UnpackError};

use crate::parse::ObjError;

pub type BenchResult<T> = Result<T, BenchError>;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("{}: {}", .path.display(), .source)]
    Obj {
        path: PathBuf,
        #[source]
        source: ObjError,
    },

    #[error(transparent)]
    UnknownCodec(#[from] UnknownCodec),

    #[error("codec round trip failed: {0}")]
    Unpack(#[from] UnpackError),

    #[error("invalid argument: {0}")]
    BadArgument(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
