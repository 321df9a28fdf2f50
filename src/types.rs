//! Shared types used across the codebase

use serde::{Deserialize, Serialize};

/// Mutating operations applied to the document store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Create,
    Update,
    Delete,
}
