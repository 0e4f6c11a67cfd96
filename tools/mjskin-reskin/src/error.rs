//! Reskinning error types

use mjskin_common::SkinError;

/// Errors from index building and skin assembly
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReskinError {
    /// Nearest-neighbor index requested over zero points
    #[error("source skin has no vertices to match against")]
    EmptySourceSet,

    /// Target geometry has no vertices
    #[error("target geometry has no vertices")]
    EmptyTargetGeometry,

    /// Target vertex ids would not fit the skin format
    #[error("target geometry has {0} vertices, more than a skin can index")]
    TooManyVertices(usize),

    /// Source skin failed decoding or validation, or output failed encoding
    #[error("skin format error: {0}")]
    Format(#[from] SkinError),
}
