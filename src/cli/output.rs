//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, StoreError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::StoreError(StoreError::CyclicContextTree { context, depth }) => format!(
            "Context tree is cyclic: the walk from '{}' gave up after {} nodes",
            context, depth
        ),
        ApiError::ContextIdNotFound(id) => format!("No context with id '{}' in the tree", id),
        other => other.to_string(),
    }
}
