// CLASSIFICATION: COMMUNITY
// Filename: ioctl.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Linux ioctl request encoding and the VFAT directory-listing requests.

use crate::layout::{FatDirent, HEADER_LAYOUT};
use core::mem::size_of;

#[cfg(any(
    target_arch = "powerpc",
    target_arch = "powerpc64",
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "mips32r6",
    target_arch = "mips64r6",
    target_arch = "sparc",
    target_arch = "sparc64"
))]
mod encoding {
    pub const SIZEBITS: u32 = 13;
    pub const READ: u32 = 2;
}

#[cfg(not(any(
    target_arch = "powerpc",
    target_arch = "powerpc64",
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "mips32r6",
    target_arch = "mips64r6",
    target_arch = "sparc",
    target_arch = "sparc64"
)))]
mod encoding {
    pub const SIZEBITS: u32 = 14;
    pub const READ: u32 = 2;
}

const NRSHIFT: u32 = 0;
const TYPESHIFT: u32 = 8;
const SIZESHIFT: u32 = 16;
const DIRSHIFT: u32 = SIZESHIFT + encoding::SIZEBITS;

/// `_IOC(dir, ty, nr, size)`.
pub const fn ioc(dir: u32, ty: u8, nr: u8, size: usize) -> u32 {
    assert!(
        size < (1 << encoding::SIZEBITS),
        "ioctl argument too large for the size field"
    );
    (dir << DIRSHIFT)
        | ((ty as u32) << TYPESHIFT)
        | ((nr as u32) << NRSHIFT)
        | ((size as u32) << SIZESHIFT)
}

/// `_IOR(ty, nr, T)` where `size` is `sizeof(T)`.
pub const fn ior(ty: u8, nr: u8, size: usize) -> u32 {
    ioc(encoding::READ, ty, nr, size)
}

/// Argument size of both requests: `struct __fat_dirent[2]`.
pub const READDIR_ARG_SIZE: usize = size_of::<[FatDirent; 2]>();

/// Read the next entry with both its short and long name.
pub const VFAT_IOCTL_READDIR_BOTH: u32 = ior(b'r', 1, READDIR_ARG_SIZE);

/// Read the next entry with its short name only.
pub const VFAT_IOCTL_READDIR_SHORT: u32 = ior(b'r', 2, READDIR_ARG_SIZE);

const _: () = {
    if let Some(h) = HEADER_LAYOUT {
        assert!(
            h.readdir_both == VFAT_IOCTL_READDIR_BOTH,
            "VFAT_IOCTL_READDIR_BOTH disagrees with linux/msdos_fs.h"
        );
        assert!(
            h.readdir_short == VFAT_IOCTL_READDIR_SHORT,
            "VFAT_IOCTL_READDIR_SHORT disagrees with linux/msdos_fs.h"
        );
    }
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_differ_only_in_nr() {
        assert_eq!(VFAT_IOCTL_READDIR_SHORT - VFAT_IOCTL_READDIR_BOTH, 1);
        assert_eq!((VFAT_IOCTL_READDIR_BOTH >> TYPESHIFT) & 0xff, b'r' as u32);
    }

    #[test]
    fn size_field_holds_two_records() {
        let mask = (1u32 << encoding::SIZEBITS) - 1;
        let size = (VFAT_IOCTL_READDIR_BOTH >> SIZESHIFT) & mask;
        assert_eq!(size as usize, 2 * size_of::<FatDirent>());
    }

    #[cfg(all(
        target_os = "linux",
        any(target_arch = "x86_64", target_arch = "aarch64")
    ))]
    #[test]
    fn known_values_on_lp64() {
        assert_eq!(VFAT_IOCTL_READDIR_BOTH, 2184212993);
        assert_eq!(VFAT_IOCTL_READDIR_SHORT, 2184212994);
    }
}
