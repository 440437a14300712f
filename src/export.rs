//! Resume dump: a JSON summary of every project and skill.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::data::PortfolioStore;
use crate::error::ExportError;

/// File name used when the target is a directory.
pub const DUMP_FILE_NAME: &str = "portfolio_dump.json";

const DUMP_OWNER: &str = "Software Engineer";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectEntry {
    pub name: String,
    pub tech: Vec<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillEntry {
    pub name: String,
    pub level: u8,
}

/// Structural transform of the data store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeDump {
    pub name: String,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<SkillEntry>,
}

impl ResumeDump {
    pub fn from_store(store: &PortfolioStore) -> ResumeDump {
        ResumeDump {
            name: DUMP_OWNER.to_string(),
            projects: store
                .projects
                .iter()
                .map(|p| ProjectEntry {
                    name: p.name.clone(),
                    tech: p.tech_stack.clone(),
                    achievements: p.achievements.clone(),
                })
                .collect(),
            skills: store
                .skills
                .iter()
                .map(|s| SkillEntry {
                    name: s.name.clone(),
                    level: s.level,
                })
                .collect(),
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Resolve the output file: directories get `portfolio_dump.json` appended.
pub fn resolve_target(target: &Path) -> PathBuf {
    if target.is_dir() {
        target.join(DUMP_FILE_NAME)
    } else {
        target.to_path_buf()
    }
}

/// Serialize the store and write it to `target`, returning the file written.
pub fn write_dump(store: &PortfolioStore, target: &Path) -> Result<PathBuf, ExportError> {
    let path = resolve_target(target);
    let json = ResumeDump::from_store(store).to_pretty_json()?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| ExportError::Write {
                path: path.display().to_string(),
                source,
            })?;
        }
    }
    std::fs::write(&path, json).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })?;

    log::info!("[Export] Resume dump written to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_shape_for_sample_data() {
        let dump = ResumeDump::from_store(&PortfolioStore::builtin());
        assert_eq!(dump.name, "Software Engineer");
        assert_eq!(dump.projects.len(), 5);
        assert_eq!(dump.skills.len(), 8);
        assert_eq!(dump.projects[2].tech[0], "Python");
        assert_eq!(dump.skills[0].level, 95);
    }

    #[test]
    fn test_pretty_json_uses_two_space_indent() {
        let json = ResumeDump::from_store(&PortfolioStore::builtin()).to_pretty_json().unwrap();
        assert!(json.starts_with("{\n  \"name\": \"Software Engineer\""));
        assert!(json.contains("\n  \"projects\": [\n    {\n      \"name\": \"E-Commerce_Platform\""));
    }
}
