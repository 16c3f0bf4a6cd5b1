// CLASSIFICATION: COMMUNITY
// Filename: test_layout_probe.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

use vfat_ioctl::layout::HOST;
use vfat_ioctl::{
    DecodeTemplate, Directive, IntTag, LayoutFacts, ProbeConfig, ProbeError, Report,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn host_template_follows_layout() {
    init_logging();
    let report = Report::probe(&ProbeConfig::default()).unwrap();
    assert!(!report.adjacency_notice);
    assert_eq!(report.buffer_size, 2 * HOST.record_size);
    assert_eq!(report.layout, HOST);

    let pad = HOST.trailing_padding().unwrap();
    let record = [
        Directive::Skip(HOST.reclen_offset),
        Directive::Int(IntTag::from_width(HOST.reclen_size).unwrap()),
        Directive::Bytes(HOST.name_size),
        Directive::Skip(pad),
    ];
    assert_eq!(&report.format.directives()[..4], &record);
    assert_eq!(&report.format.directives()[4..], &record);
    assert_eq!(report.format.size().unwrap(), report.buffer_size);
}

#[test]
fn strict_probe_accepts_host() {
    init_logging();
    assert!(Report::probe(&ProbeConfig::strict()).is_ok());
}

#[test]
fn reference_layout_scenario() {
    init_logging();
    let facts = LayoutFacts::new(0, 2, 2, 260, 264);
    let report = Report::with_layout(facts, &ProbeConfig::default()).unwrap();
    assert_eq!(report.buffer_size, 528);
    assert_eq!(report.format.to_string(), "=0xH260s2x0xH260s2x");
}

#[test]
fn one_and_four_byte_reclen() {
    init_logging();
    let narrow = LayoutFacts::new(8, 1, 9, 11, 24);
    let t = DecodeTemplate::build(&narrow, &ProbeConfig::default()).unwrap();
    assert_eq!(t.to_string(), "=8xB11s4x8xB11s4x");

    let wide = LayoutFacts::new(0, 4, 4, 256, 264);
    let t = DecodeTemplate::build(&wide, &ProbeConfig::default()).unwrap();
    assert_eq!(t.to_string(), "=0xI256s4x0xI256s4x");
}

#[test]
fn odd_width_reports_error() {
    init_logging();
    let facts = LayoutFacts::new(0, 8, 8, 256, 264);
    let err = Report::with_layout(facts, &ProbeConfig::default()).unwrap_err();
    assert!(matches!(err, ProbeError::UnsupportedReclenWidth(8)));
    assert!(err.to_string().contains("8 bytes"));
}

#[test]
fn readdir_both_pair_decodes() {
    init_logging();
    let t = Report::probe(&ProbeConfig::default()).unwrap().format;
    let mut buf = vec![0u8; HOST.buffer_size()];
    let short_at = HOST.reclen_offset;
    let long_at = HOST.record_size + HOST.reclen_offset;
    buf[short_at..short_at + 2].copy_from_slice(&11u16.to_ne_bytes());
    buf[HOST.name_offset..HOST.name_offset + 11].copy_from_slice(b"SONG    MP3");
    buf[long_at..long_at + 2].copy_from_slice(&8u16.to_ne_bytes());
    let long_name = HOST.record_size + HOST.name_offset;
    buf[long_name..long_name + 8].copy_from_slice(b"song.mp3");

    let entries = t.entries(&buf).unwrap();
    assert_eq!(entries[0].significant_name(), b"SONG    MP3");
    assert_eq!(entries[1].significant_name(), b"song.mp3");
}

#[cfg(target_os = "linux")]
#[test]
fn native_linux_build_reads_header() {
    init_logging();
    assert!(LayoutFacts::header_probed());
    assert!(Report::probe(&ProbeConfig::default()).unwrap().header_probed);
}
