// CLASSIFICATION: COMMUNITY
// Filename: config.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

use serde::{Deserialize, Serialize};

/// What to do when `d_name` does not immediately follow `d_reclen`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjacencyPolicy {
    /// Print the `Oops!` notice and build the template anyway.
    #[default]
    Warn,
    /// Refuse to build a template.
    Deny,
}

/// Probe configuration. The binary always runs with the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    pub adjacency: AdjacencyPolicy,
}

impl ProbeConfig {
    /// Configuration that treats a non-adjacent `d_name` as fatal.
    pub fn strict() -> Self {
        Self {
            adjacency: AdjacencyPolicy::Deny,
        }
    }
}
