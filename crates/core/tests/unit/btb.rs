//! Branch target buffer tests.

use rvcycle_core::core::units::bru::Btb;

#[test]
fn lookup_misses_on_empty_buffer() {
    let btb = Btb::new();
    assert_eq!(btb.lookup(0x1000), None);
}

#[test]
fn update_then_hit() {
    let mut btb = Btb::new();
    btb.update(0x1000, 0x2000);
    assert_eq!(btb.lookup(0x1000), Some(0x2000));
    assert_eq!(btb.lookup(0x1004), None, "other PCs still miss");
}

#[test]
fn update_overwrites_target() {
    let mut btb = Btb::new();
    btb.update(0x1000, 0x2000);
    btb.update(0x1000, 0x3000);
    assert_eq!(btb.lookup(0x1000), Some(0x3000));
}

#[test]
fn reset_empties_the_buffer() {
    let mut btb = Btb::new();
    btb.update(0x1000, 0x2000);
    btb.update(0x1004, 0x2004);
    btb.reset();
    assert_eq!(btb.lookup(0x1000), None);
    assert_eq!(btb.lookup(0x1004), None);
}
