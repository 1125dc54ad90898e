//! Sparse byte-addressable memory.
//!
//! This module models main memory as a map of fixed-size blocks over a 64-bit
//! address space. It provides:
//! 1. **Sized accesses:** byte, halfword, word, and doubleword reads/writes,
//!    little-endian, with no alignment requirement.
//! 2. **Sparseness:** blocks are allocated on first write; unwritten memory
//!    reads as zero.
//! 3. **Bounds checking:** accesses past the configured size fail with
//!    [`VmError::MemoryOutOfRange`]; nothing is partially written.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::common::error::VmError;

/// Sparse main memory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Memory {
    /// Allocation granule in bytes.
    block_size: u64,
    /// Total addressable size in bytes.
    size: u64,
    /// Allocated blocks, keyed by block index.
    blocks: HashMap<u64, Vec<u8>>,
}

impl Memory {
    /// Creates an empty memory of `size` bytes with the given block granule.
    pub fn new(size: u64, block_size: u64) -> Self {
        Self {
            block_size,
            size,
            blocks: HashMap::new(),
        }
    }

    /// Total addressable size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Drops every allocated block; all of memory reads as zero again.
    pub fn reset(&mut self) {
        self.blocks.clear();
    }

    /// Checks that `len` bytes starting at `addr` fit in the address space.
    fn check_range(&self, addr: u64, len: u64) -> Result<(), VmError> {
        let ok = match addr.checked_add(len - 1) {
            Some(last) => last < self.size,
            None => false,
        };
        if ok {
            Ok(())
        } else {
            Err(VmError::MemoryOutOfRange {
                addr,
                size: self.size,
            })
        }
    }

    /// Reads one byte, treating unallocated memory as zero.
    fn byte_at(&self, addr: u64) -> u8 {
        let block = addr / self.block_size;
        let offset = (addr % self.block_size) as usize;
        self.blocks
            .get(&block)
            .map_or(0, |bytes| bytes[offset])
    }

    /// Writes one byte, allocating its block if needed.
    fn set_byte(&mut self, addr: u64, val: u8) {
        let block = addr / self.block_size;
        let offset = (addr % self.block_size) as usize;
        let bytes = self
            .blocks
            .entry(block)
            .or_insert_with(|| vec![0; self.block_size as usize]);
        bytes[offset] = val;
    }

    /// Little-endian read of `N` bytes at `addr`.
    fn read_le<const N: usize>(&self, addr: u64) -> Result<[u8; N], VmError> {
        self.check_range(addr, N as u64)?;
        let mut out = [0u8; N];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = self.byte_at(addr + i as u64);
        }
        Ok(out)
    }

    /// Little-endian write of `N` bytes at `addr`.
    fn write_le<const N: usize>(&mut self, addr: u64, bytes: [u8; N]) -> Result<(), VmError> {
        self.check_range(addr, N as u64)?;
        for (i, byte) in bytes.iter().enumerate() {
            self.set_byte(addr + i as u64, *byte);
        }
        Ok(())
    }

    /// Reads one byte at `addr`.
    pub fn read_byte(&self, addr: u64) -> Result<u8, VmError> {
        Ok(u8::from_le_bytes(self.read_le::<1>(addr)?))
    }

    /// Reads a halfword at `addr`.
    pub fn read_half(&self, addr: u64) -> Result<u16, VmError> {
        Ok(u16::from_le_bytes(self.read_le::<2>(addr)?))
    }

    /// Reads a word at `addr`.
    pub fn read_word(&self, addr: u64) -> Result<u32, VmError> {
        Ok(u32::from_le_bytes(self.read_le::<4>(addr)?))
    }

    /// Reads a doubleword at `addr`.
    pub fn read_double(&self, addr: u64) -> Result<u64, VmError> {
        Ok(u64::from_le_bytes(self.read_le::<8>(addr)?))
    }

    /// Writes one byte at `addr`.
    pub fn write_byte(&mut self, addr: u64, val: u8) -> Result<(), VmError> {
        self.write_le(addr, val.to_le_bytes())
    }

    /// Writes a halfword at `addr`.
    pub fn write_half(&mut self, addr: u64, val: u16) -> Result<(), VmError> {
        self.write_le(addr, val.to_le_bytes())
    }

    /// Writes a word at `addr`.
    pub fn write_word(&mut self, addr: u64, val: u32) -> Result<(), VmError> {
        self.write_le(addr, val.to_le_bytes())
    }

    /// Writes a doubleword at `addr`.
    pub fn write_double(&mut self, addr: u64, val: u64) -> Result<(), VmError> {
        self.write_le(addr, val.to_le_bytes())
    }
}
