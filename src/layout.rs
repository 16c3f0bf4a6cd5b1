// CLASSIFICATION: COMMUNITY
// Filename: layout.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Layout of the kernel's `struct __fat_dirent` on the build host.
//!
//! The record is described twice: once by the `#[repr(C)]` mirror below,
//! laid out by rustc for the target ABI, and once by `build.rs`, which
//! compiles a probe against `<linux/msdos_fs.h>` when a host C compiler is
//! available. The two must agree or the crate does not build.

use crate::error::ProbeError;
use core::mem::{offset_of, size_of};
use libc::{c_char, c_long, c_ushort};
use serde::{Deserialize, Serialize};

/// Type of `d_reclen` in `struct __fat_dirent`.
pub type Reclen = c_ushort;

/// Length of `d_name` in `struct __fat_dirent`.
pub const NAME_LEN: usize = 256;

/// Mirror of `struct __fat_dirent` from `<linux/msdos_fs.h>`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FatDirent {
    pub d_ino: c_long,
    /// `__kernel_off_t`
    pub d_off: c_long,
    pub d_reclen: Reclen,
    pub d_name: [c_char; NAME_LEN],
}

/// Facts recorded by the build-time header probe.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct HeaderLayout {
    pub reclen_offset: usize,
    pub reclen_size: usize,
    pub name_offset: usize,
    pub name_size: usize,
    pub record_size: usize,
    pub readdir_both: u32,
    pub readdir_short: u32,
}

include!(concat!(env!("OUT_DIR"), "/header_layout.rs"));

/// Offsets and sizes of the fields the template is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutFacts {
    pub reclen_offset: usize,
    pub reclen_size: usize,
    pub name_offset: usize,
    pub name_size: usize,
    pub record_size: usize,
}

/// Layout of `struct __fat_dirent` on this host.
pub const HOST: LayoutFacts = LayoutFacts::host();

const _: () = {
    if let Some(h) = HEADER_LAYOUT {
        assert!(
            h.reclen_offset == HOST.reclen_offset,
            "offsetof(d_reclen) disagrees with linux/msdos_fs.h"
        );
        assert!(
            h.reclen_size == HOST.reclen_size,
            "sizeof(d_reclen) disagrees with linux/msdos_fs.h"
        );
        assert!(
            h.name_offset == HOST.name_offset,
            "offsetof(d_name) disagrees with linux/msdos_fs.h"
        );
        assert!(
            h.name_size == HOST.name_size,
            "sizeof(d_name) disagrees with linux/msdos_fs.h"
        );
        assert!(
            h.record_size == HOST.record_size,
            "sizeof(struct __fat_dirent) disagrees with linux/msdos_fs.h"
        );
    }
    assert!(
        matches!(HOST.reclen_size, 1 | 2 | 4),
        "d_reclen must be 1, 2 or 4 bytes wide"
    );
};

impl LayoutFacts {
    pub const fn new(
        reclen_offset: usize,
        reclen_size: usize,
        name_offset: usize,
        name_size: usize,
        record_size: usize,
    ) -> Self {
        Self {
            reclen_offset,
            reclen_size,
            name_offset,
            name_size,
            record_size,
        }
    }

    /// Compute the facts from the `FatDirent` mirror.
    pub const fn host() -> Self {
        Self::new(
            offset_of!(FatDirent, d_reclen),
            size_of::<Reclen>(),
            offset_of!(FatDirent, d_name),
            size_of::<[c_char; NAME_LEN]>(),
            size_of::<FatDirent>(),
        )
    }

    /// Whether `build.rs` was able to cross-check the mirror against the header.
    pub fn header_probed() -> bool {
        HEADER_LAYOUT.is_some()
    }

    /// First byte past `d_reclen`.
    pub const fn reclen_end(&self) -> usize {
        self.reclen_offset + self.reclen_size
    }

    /// `d_name` starts right where `d_reclen` ends.
    pub const fn is_adjacent(&self) -> bool {
        self.reclen_end() == self.name_offset
    }

    /// Bytes between the end of `d_name` and the end of the record.
    pub fn trailing_padding(&self) -> Result<usize, ProbeError> {
        let name_end = self.name_offset + self.name_size;
        self.record_size
            .checked_sub(name_end)
            .ok_or(ProbeError::LayoutOverflow {
                name_end,
                record_size: self.record_size,
            })
    }

    /// Room for the two records returned by one `VFAT_IOCTL_READDIR_*` call.
    pub const fn buffer_size(&self) -> usize {
        2 * self.record_size
    }
}
