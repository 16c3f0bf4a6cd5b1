// CLASSIFICATION: COMMUNITY
// Filename: build.rs v0.6
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Probes `struct __fat_dirent` from the host's `<linux/msdos_fs.h>` and
//! records the result in `$OUT_DIR/header_layout.rs`.

use std::{
    env, fs,
    path::{Path, PathBuf},
    process::Command,
};

const HEADER: &str = "/usr/include/linux/msdos_fs.h";

const PROBE_SRC: &str = r#"#include <linux/ioctl.h>
#include <linux/msdos_fs.h>
#include <stddef.h>
#include <stdio.h>

int main(void)
{
    struct __fat_dirent entry;
    printf("%lu %lu %lu %lu %lu %lu %lu\n",
        (unsigned long)offsetof(struct __fat_dirent, d_reclen),
        (unsigned long)sizeof(entry.d_reclen),
        (unsigned long)offsetof(struct __fat_dirent, d_name),
        (unsigned long)sizeof(entry.d_name),
        (unsigned long)sizeof(struct __fat_dirent),
        (unsigned long)VFAT_IOCTL_READDIR_BOTH,
        (unsigned long)VFAT_IOCTL_READDIR_SHORT);
    return 0;
}
"#;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CC");
    if Path::new(HEADER).exists() {
        println!("cargo:rerun-if-changed={HEADER}");
    }

    let out_dir = match env::var("OUT_DIR") {
        Ok(d) => PathBuf::from(d),
        Err(_) => {
            println!("cargo:warning=OUT_DIR unset; skipping header probe");
            return;
        }
    };

    let generated = match probe_header(&out_dir) {
        Ok(Some(fields)) => {
            let [reclen_offset, reclen_size, name_offset, name_size, record_size, both, short] =
                fields;
            format!(
                "pub(crate) const HEADER_LAYOUT: Option<HeaderLayout> = Some(HeaderLayout {{\n    \
                 reclen_offset: {reclen_offset},\n    \
                 reclen_size: {reclen_size},\n    \
                 name_offset: {name_offset},\n    \
                 name_size: {name_size},\n    \
                 record_size: {record_size},\n    \
                 readdir_both: {both},\n    \
                 readdir_short: {short},\n}});\n"
            )
        }
        Ok(None) => "pub(crate) const HEADER_LAYOUT: Option<HeaderLayout> = None;\n".to_string(),
        Err(reason) => panic!("struct __fat_dirent probe failed: {reason}"),
    };

    if let Err(e) = fs::write(out_dir.join("header_layout.rs"), generated) {
        panic!("failed to write header_layout.rs: {e}");
    }
}

/// `Ok(None)` when the probe cannot apply to this target; any failure on a
/// native Linux build is an error.
fn probe_header(out_dir: &Path) -> Result<Option<[u64; 7]>, String> {
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "linux" {
        println!("cargo:warning=target os {target_os} has no msdos_fs.h; using repr(C) mirror of __fat_dirent");
        return Ok(None);
    }
    if env::var("HOST").ok() != env::var("TARGET").ok() {
        println!("cargo:warning=cross-compiling, header probe cannot run; using repr(C) mirror of __fat_dirent");
        return Ok(None);
    }

    let cc = match env::var_os("CC") {
        Some(cc) => PathBuf::from(cc),
        None => which::which("cc")
            .or_else(|_| which::which("gcc"))
            .or_else(|_| which::which("clang"))
            .map_err(|_| "no host C compiler".to_string())?,
    };

    let src = out_dir.join("fat_dirent_probe.c");
    let exe = out_dir.join("fat_dirent_probe");
    fs::write(&src, PROBE_SRC).map_err(|e| format!("write probe source: {e}"))?;

    let status = Command::new(&cc)
        .arg(&src)
        .arg("-o")
        .arg(&exe)
        .status()
        .map_err(|e| format!("{} failed to start: {e}", cc.display()))?;
    if !status.success() {
        return Err("linux/msdos_fs.h probe did not compile".into());
    }

    let output = Command::new(&exe)
        .output()
        .map_err(|e| format!("probe failed to run: {e}"))?;
    if !output.status.success() {
        return Err("probe exited with failure".into());
    }
    parse_probe(&String::from_utf8_lossy(&output.stdout)).map(Some)
}

fn parse_probe(text: &str) -> Result<[u64; 7], String> {
    let mut fields = [0u64; 7];
    let mut words = text.split_whitespace();
    for slot in fields.iter_mut() {
        let word = words.next().ok_or("probe output truncated")?;
        *slot = word
            .parse()
            .map_err(|_| format!("bad probe value {word:?}"))?;
    }
    Ok(fields)
}
