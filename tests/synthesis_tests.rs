//! Integration tests for the display synthesis transforms
//!
//! - Disassembly listing shape and content for the builtin projects
//! - Hex dump sizing, padding and truncation
//! - Highlight addressing

use debugfolio::synth::hexdump::{self, BYTES_PER_LINE, DUMP_WIDTH, LINE_COUNT};
use debugfolio::synth::{disassemble, hex_dump};
use debugfolio::{PortfolioStore, Project};
use proptest::prelude::*;

fn project_with_stack(stack: Vec<String>) -> Project {
    let mut project = PortfolioStore::builtin().projects[0].clone();
    project.tech_stack = stack;
    project
}

#[test]
fn test_every_builtin_project_disassembles_to_eight_lines() {
    let store = PortfolioStore::builtin();
    for project in &store.projects {
        let listing = disassemble(project);
        assert_eq!(listing.len(), 8, "{}", project.id);
        assert_eq!(listing[0].operands, format!("eax, \"{}\"", project.name));
        assert_eq!(listing[7].mnemonic, "ret");
        assert_eq!(listing[7].address_label(), "0x001C");
    }
}

#[test]
fn test_listing_addresses_step_by_four() {
    let store = PortfolioStore::builtin();
    let listing = disassemble(&store.projects[2]);
    let labels: Vec<String> = listing.iter().map(|i| i.address_label()).collect();
    assert_eq!(
        labels,
        ["0x0000", "0x0004", "0x0008", "0x000C", "0x0010", "0x0014", "0x0018", "0x001C"]
    );
}

#[test]
fn test_cmp_carries_project_status() {
    let store = PortfolioStore::builtin();
    for project in &store.projects {
        let cmp = &disassemble(project)[4];
        assert_eq!(cmp.mnemonic, "cmp");
        assert!(cmp.operands.contains(project.status.as_str()));
    }
}

#[test]
fn test_long_stack_is_truncated_to_dump_width() {
    let stack = vec!["X".repeat(200)];
    let dump = hex_dump(Some(&project_with_stack(stack)));
    assert_eq!(dump.lines.len(), LINE_COUNT);
    assert!(dump.lines.iter().all(|l| l.ascii == "X".repeat(BYTES_PER_LINE)));
}

#[test]
fn test_empty_stack_renders_zero_bytes_but_not_placeholder_summary() {
    let dump = hex_dump(Some(&project_with_stack(Vec::new())));
    assert!(dump.lines.iter().all(|l| l.bytes == [0; BYTES_PER_LINE]));
    assert_eq!(dump.summary(true), "0 technologies detected");
}

#[test]
fn test_offsets_are_eight_hex_digits() {
    let dump = hex_dump(None);
    let offsets: Vec<&str> = dump.lines.iter().map(|l| l.offset.as_str()).collect();
    assert_eq!(offsets[0], "00000000");
    assert_eq!(offsets[1], "00000010");
    assert_eq!(offsets[7], "00000070");
}

#[test]
fn test_highlight_only_when_active() {
    assert!(hexdump::is_highlighted(0, 5, true, 5));
    assert!(!hexdump::is_highlighted(0, 5, false, 5));
    assert!(!hexdump::is_highlighted(1, 5, true, 5));
    assert!(hexdump::is_highlighted(0, 15, true, 15));
}

fn decode_rendered_hex(dump: &debugfolio::synth::HexDump) -> Vec<u8> {
    dump.lines
        .iter()
        .flat_map(|line| line.hex_bytes())
        .map(|digits| u8::from_str_radix(digits, 16).expect("two hex digits"))
        .collect()
}

proptest! {
    #[test]
    fn prop_dump_is_always_128_bytes(stack in proptest::collection::vec("[ -~]{0,40}", 0..8)) {
        let dump = hex_dump(Some(&project_with_stack(stack.clone())));
        prop_assert_eq!(dump.lines.len() * BYTES_PER_LINE, DUMP_WIDTH);
        prop_assert_eq!(dump.technologies, stack.clone());

        let joined = stack.join(" ").into_bytes();
        let flat: Vec<u8> = dump.lines.iter().flat_map(|l| l.bytes).collect();
        let kept = joined.len().min(DUMP_WIDTH);
        prop_assert_eq!(&flat[..kept], &joined[..kept]);
        prop_assert!(flat[kept..].iter().all(|&b| b == 0));
    }

    #[test]
    fn prop_rendered_hex_decodes_to_joined_stack(stack in proptest::collection::vec("[!-~]{1,20}", 0..8)) {
        let dump = hex_dump(Some(&project_with_stack(stack.clone())));
        for line in &dump.lines {
            for digits in line.hex_bytes() {
                prop_assert_eq!(digits.len(), 2);
                prop_assert!(digits.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
            }
        }

        let decoded = decode_rendered_hex(&dump);
        prop_assert_eq!(decoded.len(), DUMP_WIDTH);

        let joined = stack.join(" ");
        if joined.len() <= DUMP_WIDTH {
            let end = decoded.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
            prop_assert_eq!(&decoded[..end], joined.as_bytes());
        } else {
            prop_assert_eq!(&decoded[..], &joined.as_bytes()[..DUMP_WIDTH]);
        }
    }

    #[test]
    fn prop_ascii_column_is_printable(stack in proptest::collection::vec("\\PC{0,12}", 0..6)) {
        let dump = hex_dump(Some(&project_with_stack(stack)));
        for line in &dump.lines {
            prop_assert_eq!(line.ascii.chars().count(), BYTES_PER_LINE);
            prop_assert!(line.ascii.chars().all(|c| (' '..='~').contains(&c)));
            prop_assert_eq!(line.hex_bytes().count(), BYTES_PER_LINE);
        }
    }

    #[test]
    fn prop_disassembly_embeds_name(name in "[ -~]{1,32}") {
        let mut project = PortfolioStore::builtin().projects[1].clone();
        project.name = name.clone();

        let listing = disassemble(&project);
        prop_assert_eq!(listing.len(), 8);
        prop_assert_eq!(listing[0].mnemonic, "mov");
        prop_assert!(listing[0].operands.contains(&name));
        prop_assert_eq!(listing, disassemble(&project));
    }
}
