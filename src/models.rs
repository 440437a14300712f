//! Core data types for Debugfolio.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PortfolioError;

/// Lifecycle status of a project ("memory region").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Loaded,
    Running,
    Stopped,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Loaded => "loaded",
            ProjectStatus::Running => "running",
            ProjectStatus::Stopped => "stopped",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "loaded" => Ok(ProjectStatus::Loaded),
            "running" => Ok(ProjectStatus::Running),
            "stopped" => Ok(ProjectStatus::Stopped),
            _ => Err(format!("Unknown project status: {}", s)),
        }
    }
}

/// Synthetic page permissions, written as `READ/WRITE/EXEC` subsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permissions {
    pub read: bool,
    pub write: bool,
    pub exec: bool,
}

impl Permissions {
    pub const READ_EXEC: Permissions = Permissions { read: true, write: false, exec: true };
    pub const READ_WRITE: Permissions = Permissions { read: true, write: true, exec: false };
    pub const EXEC: Permissions = Permissions { read: false, write: false, exec: true };
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [
            (self.read, "READ"),
            (self.write, "WRITE"),
            (self.exec, "EXEC"),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| *name)
        .collect();
        f.write_str(&parts.join("/"))
    }
}

impl FromStr for Permissions {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut perms = Permissions { read: false, write: false, exec: false };
        for token in s.split('/').map(str::trim) {
            match token.to_uppercase().as_str() {
                "READ" => perms.read = true,
                "WRITE" => perms.write = true,
                "EXEC" => perms.exec = true,
                _ => return Err(PortfolioError::InvalidPermissions(s.to_string())),
            }
        }
        Ok(perms)
    }
}

impl TryFrom<String> for Permissions {
    type Error = PortfolioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Permissions> for String {
    fn from(perms: Permissions) -> Self {
        perms.to_string()
    }
}

/// Optional external links attached to a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(rename = "case", skip_serializing_if = "Option::is_none")]
    pub case_study: Option<String>,
}

impl ProjectLinks {
    /// Present links as (label, url) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("GitHub", self.github.as_deref()),
            ("Demo", self.demo.as_deref()),
            ("Case Study", self.case_study.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.map(|u| (label, u)))
    }
}

/// A portfolio project, rendered as a memory region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub address: String,
    pub size: String,
    pub permissions: Permissions,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub achievements: Vec<String>,
    #[serde(default)]
    pub links: ProjectLinks,
    pub status: ProjectStatus,
}

impl Project {
    /// Parse the synthetic size string ("45 KB") into kilobytes.
    pub fn size_kb(&self) -> Option<u32> {
        let mut parts = self.size.split_whitespace();
        let value = parts.next()?.parse::<u32>().ok()?;
        match parts.next() {
            None => Some(value),
            Some(unit) if unit.eq_ignore_ascii_case("KB") => Some(value),
            Some(_) => None,
        }
    }
}

/// A skill, rendered as a stack frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    /// Proficiency 0-100
    pub level: u8,
    pub frame_address: String,
    pub description: String,
    /// Identifiers of the projects this skill was used in
    pub projects: Vec<String>,
}

/// Static profile metadata shown as a CPU register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    pub name: String,
    pub value: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissions_display_order() {
        let perms: Permissions = "EXEC/READ".parse().unwrap();
        assert_eq!(perms.to_string(), "READ/EXEC");
        assert_eq!(Permissions::READ_WRITE.to_string(), "READ/WRITE");
        assert_eq!(Permissions::EXEC.to_string(), "EXEC");
    }

    #[test]
    fn test_permissions_rejects_unknown_token() {
        let result = "READ/SHARE".parse::<Permissions>();
        assert!(matches!(result, Err(PortfolioError::InvalidPermissions(_))));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ProjectStatus::Running).unwrap();
        assert_eq!(json, "\"running\"");
        let parsed: ProjectStatus = serde_json::from_str("\"stopped\"").unwrap();
        assert_eq!(parsed, ProjectStatus::Stopped);
    }

    #[test]
    fn test_project_wire_format() {
        let json = r#"{
            "id": "p1",
            "name": "Demo_Project",
            "address": "0x0010",
            "size": "12 KB",
            "permissions": "READ/WRITE",
            "description": "demo",
            "techStack": ["Rust", "egui"],
            "achievements": [],
            "links": { "case": "https://example.com/case" },
            "status": "loaded"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.permissions, Permissions::READ_WRITE);
        assert_eq!(project.tech_stack, vec!["Rust", "egui"]);
        assert_eq!(project.links.case_study.as_deref(), Some("https://example.com/case"));
        assert_eq!(project.size_kb(), Some(12));
    }

    #[test]
    fn test_size_kb_rejects_other_units() {
        let mut project: Project = serde_json::from_str(
            r#"{"id":"a","name":"A","address":"0x0","size":"3 MB","permissions":"EXEC",
                "description":"","techStack":[],"achievements":[],"status":"running"}"#,
        )
        .unwrap();
        assert_eq!(project.size_kb(), None);
        project.size = "garbage".to_string();
        assert_eq!(project.size_kb(), None);
    }

    #[test]
    fn test_links_iter_skips_missing() {
        let links = ProjectLinks {
            github: Some("https://github.com/x".to_string()),
            demo: None,
            case_study: Some("https://case".to_string()),
        };
        let labels: Vec<&str> = links.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["GitHub", "Case Study"]);
    }
}
