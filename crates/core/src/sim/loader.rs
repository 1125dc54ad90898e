//! Memory-image loader.
//!
//! Parses the assembled-image text format: one record per line,
//! space-separated `<type> <hex-address> <hex-value>`. Types `B`, `H`, `W`,
//! and `D` write a byte, halfword, word, or doubleword to the addressed
//! location; `P <size> 0x0` records the program text size used as the fetch
//! upper bound. Blank lines are ignored; unknown record types are skipped
//! with a warning on stderr.

use std::fs;
use std::path::Path;

use crate::common::error::VmError;
use crate::soc::Memory;

/// Result of loading an image: the recorded program text size in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadedImage {
    /// Program text size from the `P` record; 0 when absent.
    pub program_size: u64,
}

/// Loads a memory image from a file.
pub fn load_image(path: &Path, memory: &mut Memory) -> Result<LoadedImage, VmError> {
    let text = fs::read_to_string(path)?;
    load_image_str(&text, memory)
}

/// Loads a memory image from its text content.
pub fn load_image_str(text: &str, memory: &mut Memory) -> Result<LoadedImage, VmError> {
    let mut image = LoadedImage::default();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let mut fields = line.split_whitespace();

        let Some(kind) = fields.next() else {
            continue; // blank line
        };
        if !matches!(kind, "B" | "H" | "W" | "D" | "P") {
            eprintln!(
                "Warning: line {}: unknown memory image record type {:?}",
                line_no, kind
            );
            continue;
        }
        let addr = parse_hex(fields.next(), line_no, "address")?;
        let value = parse_hex(fields.next(), line_no, "value")?;

        let written = match kind {
            "B" => memory.write_byte(addr, value as u8),
            "H" => memory.write_half(addr, value as u16),
            "W" => memory.write_word(addr, value as u32),
            "D" => memory.write_double(addr, value),
            // The size travels in the address field.
            _ => {
                image.program_size = addr;
                Ok(())
            }
        };
        written.map_err(|e| VmError::ImageFormat {
            line: line_no,
            reason: e.to_string(),
        })?;
    }

    Ok(image)
}

/// Parses one hex field, with or without a `0x` prefix.
fn parse_hex(field: Option<&str>, line_no: usize, what: &str) -> Result<u64, VmError> {
    let raw = field.ok_or_else(|| VmError::ImageFormat {
        line: line_no,
        reason: format!("missing {} field", what),
    })?;
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    u64::from_str_radix(digits, 16).map_err(|_| VmError::ImageFormat {
        line: line_no,
        reason: format!("invalid {} field {:?}", what, raw),
    })
}
