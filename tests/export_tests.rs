//! Resume dump export tests
//!
//! - Directory targets get the default file name
//! - File targets are written as given, parents created
//! - Content mirrors the portfolio store

use std::fs;

use debugfolio::config::AppState;
use debugfolio::export::{self, ResumeDump, DUMP_FILE_NAME};
use debugfolio::{AppController, ManualScheduler, PortfolioStore};
use tempfile::TempDir;

#[test]
fn test_dump_into_directory_uses_default_name() {
    let dir = TempDir::new().unwrap();
    let store = PortfolioStore::builtin();

    let written = export::write_dump(&store, dir.path()).unwrap();
    assert_eq!(written, dir.path().join(DUMP_FILE_NAME));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&written).unwrap()).unwrap();
    assert_eq!(json["name"], "Software Engineer");
    assert_eq!(json["projects"].as_array().unwrap().len(), 5);
    assert_eq!(json["skills"].as_array().unwrap().len(), 8);
}

#[test]
fn test_dump_to_explicit_file_creates_parents() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("nested").join("resume.json");

    let written = export::write_dump(&PortfolioStore::builtin(), &target).unwrap();
    assert_eq!(written, target);
    assert!(target.exists());
}

#[test]
fn test_dump_entries_follow_store_order() {
    let store = PortfolioStore::builtin();
    let dump = ResumeDump::from_store(&store);

    let names: Vec<&str> = dump.projects.iter().map(|p| p.name.as_str()).collect();
    let expected: Vec<&str> = store.projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, expected);

    for (entry, skill) in dump.skills.iter().zip(&store.skills) {
        assert_eq!(entry.name, skill.name);
        assert_eq!(entry.level, skill.level);
    }
    assert_eq!(dump.projects[2].tech, store.projects[2].tech_stack);
}

#[test]
fn test_dump_omits_ids_and_links() {
    let json = ResumeDump::from_store(&PortfolioStore::builtin()).to_pretty_json().unwrap();
    assert!(!json.contains("\"id\""));
    assert!(!json.contains("\"links\""));
    assert!(json.contains("\"achievements\""));
}

#[test]
fn test_controller_export_reports_unwritable_target() {
    let dir = TempDir::new().unwrap();
    // A regular file used as a parent directory cannot be created into
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "x").unwrap();

    let controller = AppController::new(
        AppState::default(),
        PortfolioStore::builtin(),
        Box::new(ManualScheduler::new()),
    );
    let err = controller.export_dump(&blocker.join("dump.json")).unwrap_err();
    assert!(err.user_message().starts_with("Resume dump failed"));
}
