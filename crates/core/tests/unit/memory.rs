//! Sparse memory tests.

use rvcycle_core::soc::Memory;
use rvcycle_core::VmError;

fn memory() -> Memory {
    Memory::new(0x1_0000, 64)
}

#[test]
fn unwritten_memory_reads_zero() {
    let mem = memory();
    assert_eq!(mem.read_byte(0).expect("in range"), 0);
    assert_eq!(mem.read_double(0x8000).expect("in range"), 0);
}

#[test]
fn round_trips_each_width() {
    let mut mem = memory();
    mem.write_byte(0x10, 0xAB).expect("write");
    mem.write_half(0x20, 0xBEEF).expect("write");
    mem.write_word(0x30, 0xDEAD_BEEF).expect("write");
    mem.write_double(0x40, 0x0123_4567_89AB_CDEF).expect("write");

    assert_eq!(mem.read_byte(0x10).expect("read"), 0xAB);
    assert_eq!(mem.read_half(0x20).expect("read"), 0xBEEF);
    assert_eq!(mem.read_word(0x30).expect("read"), 0xDEAD_BEEF);
    assert_eq!(mem.read_double(0x40).expect("read"), 0x0123_4567_89AB_CDEF);
}

#[test]
fn storage_is_little_endian() {
    let mut mem = memory();
    mem.write_word(0x30, 0x1122_3344).expect("write");
    assert_eq!(mem.read_byte(0x30).expect("read"), 0x44);
    assert_eq!(mem.read_byte(0x33).expect("read"), 0x11);
    assert_eq!(mem.read_half(0x32).expect("read"), 0x1122);
}

#[test]
fn accesses_may_straddle_blocks() {
    let mut mem = memory();
    // Block granule is 64; write across the 64-byte boundary.
    mem.write_double(60, 0x8877_6655_4433_2211).expect("write");
    assert_eq!(mem.read_double(60).expect("read"), 0x8877_6655_4433_2211);
    assert_eq!(mem.read_byte(64).expect("read"), 0x55);
}

#[test]
fn out_of_range_access_is_an_error() {
    let mut mem = memory();
    let err = mem.read_word(0x1_0000).expect_err("past the end");
    assert!(matches!(err, VmError::MemoryOutOfRange { .. }));

    // A doubleword ending past the limit must also fail.
    assert!(mem.read_double(0xFFFC).is_err());
    assert!(mem.write_word(0xFFFE, 1).is_err());
    // The last fully contained access works.
    assert!(mem.write_double(0xFFF8, 1).is_ok());
}

#[test]
fn reset_drops_contents() {
    let mut mem = memory();
    mem.write_word(0x30, 0x1234_5678).expect("write");
    mem.reset();
    assert_eq!(mem.read_word(0x30).expect("read"), 0);
}
