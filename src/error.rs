// CLASSIFICATION: COMMUNITY
// Filename: error.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

use thiserror::Error;

/// Errors produced while deriving or using the directory-entry template.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("unsupported d_reclen width: {0} bytes (expected 1, 2 or 4)")]
    UnsupportedReclenWidth(usize),
    #[error("d_name at offset {name_offset} does not follow d_reclen ending at {reclen_end}")]
    NameNotAdjacent { reclen_end: usize, name_offset: usize },
    #[error("d_name ends at {name_end}, past the {record_size}-byte record")]
    LayoutOverflow { name_end: usize, record_size: usize },
    #[error("invalid template syntax: {0}")]
    TemplateSyntax(String),
    #[error("buffer is {actual} bytes, template expects {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}
