//! Pseudo-disassembly of a project.

use crate::models::Project;

/// Number of instructions in every synthesized listing.
pub const INSTRUCTION_COUNT: usize = 8;

/// Address stride between consecutive instructions.
const INSTRUCTION_WIDTH: u32 = 4;

/// One line of the disassembly listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub address: u32,
    pub mnemonic: &'static str,
    pub operands: String,
    pub comment: &'static str,
}

impl Instruction {
    /// Address label in `0x001C` form
    pub fn address_label(&self) -> String {
        format!("0x{:04X}", self.address)
    }
}

/// Produce the fixed listing for `project`.
///
/// The first operand embeds the display name; the `cmp` embeds the status.
pub fn disassemble(project: &Project) -> Vec<Instruction> {
    let body: [(&'static str, String, &'static str); INSTRUCTION_COUNT] = [
        ("mov", format!("eax, \"{}\"", project.name), "Load project name"),
        ("push", "ebp".to_string(), "Setup stack frame"),
        ("mov", "ebp, esp".to_string(), "Base pointer"),
        ("call", "init_techstack".to_string(), "Initialize technology stack"),
        (
            "cmp",
            format!("status, \"{}\"", project.status.as_str()),
            "Check deployment status",
        ),
        ("je", "deploy_success".to_string(), "Jump if deployed"),
        ("call", "optimize_performance".to_string(), "Performance optimization"),
        ("ret", String::new(), "Return to caller"),
    ];

    body.into_iter()
        .enumerate()
        .map(|(i, (mnemonic, operands, comment))| Instruction {
            address: i as u32 * INSTRUCTION_WIDTH,
            mnemonic,
            operands,
            comment,
        })
        .collect()
}
