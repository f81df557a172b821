//! Error types for graph extraction and rendering.

use thiserror::Error;

use crate::vertex::VertexId;

/// Errors produced while building edges, loading a [`DotConfig`], or writing
/// DOT output.
///
/// [`DotConfig`]: crate::graph::DotConfig
#[derive(Error, Debug)]
pub enum GraphError {
    /// An edge was requested between two vertices of the same kind.
    #[error("edge endpoints must alternate between variable and function: {head} -> {tail}")]
    KindMismatch { head: VertexId, tail: VertexId },

    #[error("invalid dot config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse dot config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write dot output: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        GraphError::InvalidConfig(message.into())
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
