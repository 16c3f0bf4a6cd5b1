// CLASSIFICATION: COMMUNITY
// Filename: lib.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Derives the constants needed to call `VFAT_IOCTL_READDIR_BOTH` and
//! `VFAT_IOCTL_READDIR_SHORT` and to decode the buffer they fill.

/// Probe configuration
pub mod config;

/// Error type shared by all modules
pub mod error;

/// ioctl request encoding and the VFAT request codes
pub mod ioctl;

/// `struct __fat_dirent` layout facts
pub mod layout;

/// Decoding template for the two-record buffer
pub mod template;

/// Report assembly and output
pub mod emit;

pub use config::{AdjacencyPolicy, ProbeConfig};
pub use emit::{run, Report};
pub use error::ProbeError;
pub use layout::LayoutFacts;
pub use template::{DecodeTemplate, Directive, IntTag, RawEntry, Value};
