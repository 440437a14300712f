//! Display synthesis for the analysis panels.
//!
//! Both transforms are pure: the same project always yields the same listing.
//!
//! - `disassembly`: the fixed eight-instruction pseudo listing per project
//! - `hexdump`: the 128-byte dump of a project's joined tech stack

pub mod disassembly;
pub mod hexdump;

pub use disassembly::{disassemble, Instruction};
pub use hexdump::{hex_dump, HexDump, HexLine};
