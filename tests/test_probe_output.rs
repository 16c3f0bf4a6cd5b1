// CLASSIFICATION: COMMUNITY
// Filename: test_probe_output.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

use std::process::Command;
use vfat_ioctl::layout::FatDirent;
use vfat_ioctl::{DecodeTemplate, Value};

fn probe_stdout() -> String {
    let out = Command::new(env!("CARGO_BIN_EXE_vfat-ioctl"))
        .env_remove("RUST_LOG")
        .output()
        .expect("run vfat-ioctl");
    assert!(out.status.success());
    String::from_utf8(out.stdout).unwrap()
}

fn value_of<'a>(text: &'a str, key: &str) -> &'a str {
    text.lines()
        .find_map(|l| l.strip_prefix(key).and_then(|r| r.strip_prefix(" = ")))
        .unwrap_or_else(|| panic!("{key} missing from output"))
}

#[test]
fn prints_four_lines_in_order() {
    let text = probe_stdout();
    let keys: Vec<&str> = text
        .lines()
        .map(|l| l.split(" = ").next().unwrap())
        .collect();
    assert_eq!(
        keys,
        [
            "VFAT_IOCTL_READDIR_BOTH",
            "VFAT_IOCTL_READDIR_SHORT",
            "BUFFER_SIZE",
            "BUFFER_FORMAT"
        ]
    );
    assert!(!text.contains("Oops!"));
}

#[test]
fn buffer_size_is_two_records() {
    let text = probe_stdout();
    let size: usize = value_of(&text, "BUFFER_SIZE").parse().unwrap();
    assert_eq!(size, 2 * std::mem::size_of::<FatDirent>());
}

#[test]
fn request_codes_match_library() {
    let text = probe_stdout();
    let both: u32 = value_of(&text, "VFAT_IOCTL_READDIR_BOTH").parse().unwrap();
    let short: u32 = value_of(&text, "VFAT_IOCTL_READDIR_SHORT").parse().unwrap();
    assert_eq!(both, vfat_ioctl::ioctl::VFAT_IOCTL_READDIR_BOTH);
    assert_eq!(short, both + 1);
}

#[test]
fn printed_format_decodes_zeroed_buffer() {
    let text = probe_stdout();
    let size: usize = value_of(&text, "BUFFER_SIZE").parse().unwrap();
    let quoted = value_of(&text, "BUFFER_FORMAT");
    let legacy = quoted.trim_matches('\'');
    let template: DecodeTemplate = legacy.parse().unwrap();
    assert_eq!(template.size().unwrap(), size);

    let values = template.unpack(&vec![0u8; size]).unwrap();
    assert_eq!(values.len(), 4);
    for v in &values {
        match v {
            Value::Int(n) => assert_eq!(*n, 0),
            Value::Bytes(b) => assert!(b.iter().all(|&x| x == 0)),
        }
    }
    let (first, second) = template.directives().split_at(4);
    assert_eq!(first, second);
}
