//! Hex dump of a project's tech stack.
//!
//! The technologies are joined with single spaces, the UTF-8 bytes are
//! truncated or null-padded to 128 bytes, and split into 8 rows of 16.

use crate::models::Project;

pub const BYTES_PER_LINE: usize = 16;
pub const LINE_COUNT: usize = 8;
pub const DUMP_WIDTH: usize = BYTES_PER_LINE * LINE_COUNT;

/// Width of the hex column: two digits per byte plus separators.
pub const HEX_COLUMN_WIDTH: usize = BYTES_PER_LINE * 3 - 1;

/// One rendered row of the dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexLine {
    pub offset: String,
    pub bytes: [u8; BYTES_PER_LINE],
    pub hex: String,
    pub ascii: String,
}

impl HexLine {
    fn from_chunk(index: usize, chunk: &[u8]) -> HexLine {
        let mut bytes = [0u8; BYTES_PER_LINE];
        bytes[..chunk.len()].copy_from_slice(chunk);

        let hex = bytes
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(" ");
        let ascii = bytes.iter().map(|&b| printable(b)).collect();

        HexLine {
            offset: format!("{:08X}", index * BYTES_PER_LINE),
            bytes,
            hex: format!("{:<width$}", hex, width = HEX_COLUMN_WIDTH),
            ascii,
        }
    }

    /// Hex digits of each byte, for per-byte rendering
    pub fn hex_bytes(&self) -> impl Iterator<Item = &str> {
        self.hex.split_whitespace()
    }
}

/// A full 8-line dump plus the decoded technologies it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexDump {
    pub lines: Vec<HexLine>,
    pub technologies: Vec<String>,
}

impl HexDump {
    pub fn is_placeholder(&self) -> bool {
        self.technologies.is_empty() && self.lines.iter().all(|l| l.bytes == [0; BYTES_PER_LINE])
    }

    /// Header readout for the hex viewer panel
    pub fn summary(&self, has_project: bool) -> String {
        if has_project {
            format!("{} technologies detected", self.technologies.len())
        } else {
            "No data loaded".to_string()
        }
    }
}

/// `.` for anything outside the printable ASCII range 0x20..=0x7E
pub fn printable(byte: u8) -> char {
    match byte {
        0x20..=0x7E => byte as char,
        _ => '.',
    }
}

/// Global position of a byte within the dump
pub fn byte_index(line: usize, column: usize) -> usize {
    line * BYTES_PER_LINE + column
}

/// Whether the byte at (line, column) is the one being "executed"
pub fn is_highlighted(line: usize, column: usize, active: bool, byte_counter: u8) -> bool {
    active && byte_index(line, column) == usize::from(byte_counter)
}

/// Build the dump for `project`, or the all-zero placeholder when none is selected.
pub fn hex_dump(project: Option<&Project>) -> HexDump {
    let (mut data, technologies) = match project {
        Some(p) => (p.tech_stack.join(" ").into_bytes(), p.tech_stack.clone()),
        None => (Vec::new(), Vec::new()),
    };
    data.resize(DUMP_WIDTH, 0);

    let lines = data
        .chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(i, chunk)| HexLine::from_chunk(i, chunk))
        .collect();

    HexDump { lines, technologies }
}
