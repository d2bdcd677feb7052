//! Crate-level error type and `Result` alias. Each variant names the stage
//! that failed: parsing the CTL file, resolving its dataset files, or
//! transcoding one of them.
use thiserror::Error;

use crate::core::parser::ParseError;
use crate::core::pattern::ResolutionError;
use crate::io::TranscodeError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("resolve error: {0}")]
    Resolve(#[from] ResolutionError),

    #[error("transcode error: {0}")]
    Transcode(#[from] TranscodeError),

    #[error("transcode error: {failed} of {total} file(s) failed")]
    PartialFailure { failed: usize, total: usize },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
