// CLASSIFICATION: COMMUNITY
// Filename: emit.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Collects the derived constants and writes them out.

use crate::config::ProbeConfig;
use crate::error::ProbeError;
use crate::ioctl::{VFAT_IOCTL_READDIR_BOTH, VFAT_IOCTL_READDIR_SHORT};
use crate::layout::{LayoutFacts, HOST};
use crate::template::DecodeTemplate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Everything the probe derives in one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub readdir_both: u32,
    pub readdir_short: u32,
    pub buffer_size: usize,
    pub layout: LayoutFacts,
    pub header_probed: bool,
    /// `d_name` does not follow `d_reclen`; printed as `Oops!`.
    pub adjacency_notice: bool,
    pub format: DecodeTemplate,
}

impl Report {
    /// Probe the host's `struct __fat_dirent`.
    pub fn probe(config: &ProbeConfig) -> Result<Self, ProbeError> {
        if !LayoutFacts::header_probed() {
            info!("cross or non-Linux build: layout comes from the repr(C) mirror alone");
        }
        Self::with_layout(HOST, config)
    }

    /// Build a report for `layout`, keeping the host's request codes.
    ///
    /// The request codes always encode `2 * sizeof(struct __fat_dirent)` of
    /// the host, so for any other `layout` their size field will not match
    /// `buffer_size`.
    pub fn with_layout(layout: LayoutFacts, config: &ProbeConfig) -> Result<Self, ProbeError> {
        debug!("layout {layout:?}");
        let format = DecodeTemplate::build(&layout, config)?;
        Ok(Self {
            readdir_both: VFAT_IOCTL_READDIR_BOTH,
            readdir_short: VFAT_IOCTL_READDIR_SHORT,
            buffer_size: layout.buffer_size(),
            layout,
            header_probed: LayoutFacts::header_probed(),
            adjacency_notice: !layout.is_adjacent(),
            format,
        })
    }

    /// Write the four result lines, with `Oops!` ahead of the format line
    /// when the layout check failed.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<(), ProbeError> {
        writeln!(out, "VFAT_IOCTL_READDIR_BOTH = {}", self.readdir_both)?;
        writeln!(out, "VFAT_IOCTL_READDIR_SHORT = {}", self.readdir_short)?;
        writeln!(out, "BUFFER_SIZE = {}", self.buffer_size)?;
        if self.adjacency_notice {
            writeln!(out, "Oops!")?;
        }
        writeln!(out, "BUFFER_FORMAT = '{}'", self.format)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ProbeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Probe with the default configuration and print to stdout.
pub fn run() -> Result<(), ProbeError> {
    let report = Report::probe(&ProbeConfig::default())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    report.write_to(&mut out)?;
    out.flush()?;
    Ok(())
}
