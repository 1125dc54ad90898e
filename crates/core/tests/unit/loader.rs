//! Memory-image loader tests.

use std::io::Write as _;

use rvcycle_core::sim::loader;
use rvcycle_core::soc::Memory;
use rvcycle_core::VmError;
use tempfile::NamedTempFile;

fn memory() -> Memory {
    Memory::new(0x1_0000, 1024)
}

#[test]
fn parses_each_record_type() {
    let mut mem = memory();
    let image = "B 0x100 0xAB\n\
                 H 0x110 0xBEEF\n\
                 W 0x0 0x00000013\n\
                 D 0x120 0x1122334455667788\n\
                 P 0x4 0x0\n";
    let loaded = loader::load_image_str(image, &mut mem).expect("image loads");
    assert_eq!(loaded.program_size, 4);
    assert_eq!(mem.read_byte(0x100).expect("read"), 0xAB);
    assert_eq!(mem.read_half(0x110).expect("read"), 0xBEEF);
    assert_eq!(mem.read_word(0x0).expect("read"), 0x13);
    assert_eq!(mem.read_double(0x120).expect("read"), 0x1122_3344_5566_7788);
}

#[test]
fn blank_lines_are_ignored() {
    let mut mem = memory();
    let image = "\nW 0x0 0x13\n\n\nP 0x4 0x0\n\n";
    let loaded = loader::load_image_str(image, &mut mem).expect("image loads");
    assert_eq!(loaded.program_size, 4);
}

#[test]
fn unknown_record_type_is_skipped() {
    let mut mem = memory();
    let image = "X 0x0 0x13\nW 0x0 0x42\n";
    loader::load_image_str(image, &mut mem).expect("unknown types skip");
    assert_eq!(mem.read_word(0x0).expect("read"), 0x42);
}

#[test]
fn hex_prefix_is_optional() {
    let mut mem = memory();
    loader::load_image_str("W ff 2a\n", &mut mem).expect("bare hex loads");
    assert_eq!(mem.read_word(0xFF).expect("read"), 0x2A);
}

#[test]
fn malformed_fields_report_the_line() {
    let mut mem = memory();
    let err = loader::load_image_str("W 0x0 0x13\nW zzz 0x1\n", &mut mem)
        .expect_err("bad address");
    match err {
        VmError::ImageFormat { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error {:?}", other),
    }

    let err = loader::load_image_str("W 0x0\n", &mut mem).expect_err("missing value");
    assert!(matches!(err, VmError::ImageFormat { line: 1, .. }));
}

#[test]
fn out_of_range_record_fails() {
    let mut mem = memory();
    let err = loader::load_image_str("W 0xFFFFFFFF 0x1\n", &mut mem)
        .expect_err("address past memory size");
    assert!(matches!(err, VmError::ImageFormat { line: 1, .. }));
}

#[test]
fn missing_program_record_leaves_size_zero() {
    let mut mem = memory();
    let loaded = loader::load_image_str("W 0x0 0x13\n", &mut mem).expect("image loads");
    assert_eq!(loaded.program_size, 0);
}

#[test]
fn loads_from_a_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "W 0x0 0x00000013").expect("write");
    writeln!(file, "P 0x4 0x0").expect("write");

    let mut mem = memory();
    let loaded = loader::load_image(file.path(), &mut mem).expect("file loads");
    assert_eq!(loaded.program_size, 4);
    assert_eq!(mem.read_word(0).expect("read"), 0x13);
}

#[test]
fn missing_file_is_an_io_error() {
    let mut mem = memory();
    let err = loader::load_image(std::path::Path::new("/nonexistent/image.mem"), &mut mem)
        .expect_err("missing file");
    assert!(matches!(err, VmError::Io(_)));
}
