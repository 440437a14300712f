//! Static data store: the projects, skills and registers shown by the UI.
//!
//! Data is immutable once loaded. The builtin sample set is materialized once
//! per process; an alternative set can be read from a JSON file named in the
//! settings.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::PortfolioError;
use crate::models::{Permissions, Project, ProjectLinks, ProjectStatus, Register, Skill};

/// Synthetic address space size used for the memory map "Free" readout.
pub const MEMORY_CAPACITY_KB: u32 = 1054;

static BUILTIN: Lazy<PortfolioStore> = Lazy::new(build_sample_portfolio);

/// Immutable collection of portfolio records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioStore {
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub registers: Vec<Register>,
}

impl PortfolioStore {
    /// The sample data set compiled into the binary
    pub fn builtin() -> PortfolioStore {
        BUILTIN.clone()
    }

    /// Load and validate a portfolio document from disk.
    pub fn load_from_file(path: &Path) -> Result<PortfolioStore, PortfolioError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PortfolioError::FileNotFound(path.display().to_string())
            } else {
                PortfolioError::IoError(e)
            }
        })?;
        let store: PortfolioStore = serde_json::from_str(&content)?;
        store.validate()?;
        log::info!(
            "[Data] Loaded portfolio from {} ({} projects, {} skills)",
            path.display(),
            store.projects.len(),
            store.skills.len()
        );
        Ok(store)
    }

    /// Check identifiers are unique, levels are in range, and skill references resolve.
    pub fn validate(&self) -> Result<(), PortfolioError> {
        if self.projects.is_empty() {
            return Err(PortfolioError::ValidationFailed(
                "portfolio contains no projects".to_string(),
            ));
        }

        let mut project_ids = HashSet::new();
        for project in &self.projects {
            if project.id.is_empty() {
                return Err(PortfolioError::ValidationFailed(format!(
                    "project '{}' has an empty id",
                    project.name
                )));
            }
            if !project_ids.insert(project.id.as_str()) {
                return Err(PortfolioError::DuplicateId(project.id.clone()));
            }
        }

        let mut skill_ids = HashSet::new();
        for skill in &self.skills {
            if !skill_ids.insert(skill.id.as_str()) {
                return Err(PortfolioError::DuplicateId(skill.id.clone()));
            }
            if skill.level > 100 {
                return Err(PortfolioError::LevelOutOfRange(skill.id.clone()));
            }
            if let Some(missing) = skill.projects.iter().find(|p| !project_ids.contains(p.as_str())) {
                return Err(PortfolioError::DanglingReference {
                    skill: skill.id.clone(),
                    project: missing.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn skill(&self, id: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == id)
    }

    /// Resolve a skill's project references, skipping unknown ids
    pub fn projects_using_skill<'a>(&'a self, skill: &'a Skill) -> impl Iterator<Item = &'a Project> + 'a {
        skill.projects.iter().filter_map(move |id| self.project(id))
    }

    /// Sum of all parseable project sizes
    pub fn total_size_kb(&self) -> u32 {
        self.projects.iter().filter_map(Project::size_kb).sum()
    }

    pub fn free_size_kb(&self) -> u32 {
        MEMORY_CAPACITY_KB.saturating_sub(self.total_size_kb())
    }

    /// Rounded mean skill level, 0 for an empty skill list
    pub fn average_skill_level(&self) -> u32 {
        if self.skills.is_empty() {
            return 0;
        }
        let sum: u32 = self.skills.iter().map(|s| u32::from(s.level)).sum();
        (f64::from(sum) / self.skills.len() as f64).round() as u32
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn link(url: &str) -> Option<String> {
    Some(url.to_string())
}

fn build_sample_portfolio() -> PortfolioStore {
    let projects = vec![
        Project {
            id: "e-commerce-platform".to_string(),
            name: "E-Commerce_Platform".to_string(),
            address: "0x0010".to_string(),
            size: "45 KB".to_string(),
            permissions: Permissions::READ_EXEC,
            description: "Full-stack e-commerce solution with real-time inventory management".to_string(),
            tech_stack: strings(&["React", "Node.js", "PostgreSQL", "Redis", "Stripe"]),
            achievements: strings(&[
                "Built scalable microservices architecture handling 50K+ daily users",
                "Implemented real-time inventory sync reducing oversells by 95%",
                "Optimized database queries improving page load times by 60%",
            ]),
            links: ProjectLinks {
                github: link("https://github.com/username/ecommerce-platform"),
                demo: link("https://ecommerce-demo.example.com"),
                case_study: None,
            },
            status: ProjectStatus::Running,
        },
        Project {
            id: "task-management-app".to_string(),
            name: "Task_Manager_Pro".to_string(),
            address: "0x0020".to_string(),
            size: "32 KB".to_string(),
            permissions: Permissions::READ_WRITE,
            description: "Collaborative task management application with real-time updates".to_string(),
            tech_stack: strings(&["Vue.js", "TypeScript", "Firebase", "Tailwind CSS", "PWA"]),
            achievements: strings(&[
                "Designed intuitive drag-and-drop interface increasing user engagement by 40%",
                "Implemented offline-first architecture with seamless sync",
                "Built progressive web app with native-like performance",
            ]),
            links: ProjectLinks {
                github: link("https://github.com/username/task-manager"),
                demo: link("https://taskmanager-demo.example.com"),
                case_study: None,
            },
            status: ProjectStatus::Loaded,
        },
        Project {
            id: "ai-chatbot".to_string(),
            name: "AI_Assistant_Bot".to_string(),
            address: "0x0030".to_string(),
            size: "58 KB".to_string(),
            permissions: Permissions::EXEC,
            description: "Intelligent chatbot with natural language processing capabilities".to_string(),
            tech_stack: strings(&["Python", "TensorFlow", "FastAPI", "Docker", "OpenAI API"]),
            achievements: strings(&[
                "Trained custom NLP model achieving 92% accuracy in intent recognition",
                "Integrated with multiple messaging platforms (Slack, Discord, Teams)",
                "Reduced customer support workload by 70% through automation",
            ]),
            links: ProjectLinks {
                github: link("https://github.com/username/ai-chatbot"),
                demo: None,
                case_study: link("https://case-study.example.com"),
            },
            status: ProjectStatus::Stopped,
        },
        Project {
            id: "data-visualization".to_string(),
            name: "Analytics_Dashboard".to_string(),
            address: "0x0040".to_string(),
            size: "38 KB".to_string(),
            permissions: Permissions::READ_EXEC,
            description: "Interactive data visualization dashboard for business intelligence".to_string(),
            tech_stack: strings(&["D3.js", "React", "Express", "MongoDB", "Chart.js"]),
            achievements: strings(&[
                "Created dynamic charts processing 1M+ data points in real-time",
                "Built custom visualization components used across 5+ products",
                "Improved decision-making speed by 50% through intuitive data presentation",
            ]),
            links: ProjectLinks {
                github: link("https://github.com/username/analytics-dashboard"),
                demo: None,
                case_study: None,
            },
            status: ProjectStatus::Loaded,
        },
        Project {
            id: "mobile-fitness-app".to_string(),
            name: "Fitness_Tracker".to_string(),
            address: "0x0050".to_string(),
            size: "42 KB".to_string(),
            permissions: Permissions::READ_WRITE,
            description: "Cross-platform mobile fitness tracking application".to_string(),
            tech_stack: strings(&["React Native", "Expo", "SQLite", "Redux", "Health APIs"]),
            achievements: strings(&[
                "Developed cross-platform app deployed to both iOS and Android stores",
                "Integrated with health APIs for comprehensive fitness tracking",
                "Achieved 4.8/5 star rating with 10K+ downloads in first month",
            ]),
            links: ProjectLinks {
                github: link("https://github.com/username/fitness-tracker"),
                demo: link("https://fitness-app.example.com"),
                case_study: None,
            },
            status: ProjectStatus::Running,
        },
    ];

    let skill = |id: &str, name: &str, level: u8, frame: &str, description: &str, used_in: &[&str]| Skill {
        id: id.to_string(),
        name: name.to_string(),
        level,
        frame_address: frame.to_string(),
        description: description.to_string(),
        projects: strings(used_in),
    };

    let skills = vec![
        skill(
            "javascript",
            "JavaScript/ES6+",
            95,
            "0x01",
            "Modern JavaScript development with advanced patterns and frameworks",
            &["e-commerce-platform", "task-management-app", "data-visualization"],
        ),
        skill(
            "react",
            "React.js",
            92,
            "0x02",
            "Component-based UI development with hooks and state management",
            &["e-commerce-platform", "data-visualization"],
        ),
        skill(
            "nodejs",
            "Node.js",
            88,
            "0x03",
            "Server-side JavaScript and API development",
            &["e-commerce-platform", "data-visualization"],
        ),
        skill(
            "python",
            "Python",
            90,
            "0x04",
            "Backend development, data science, and machine learning",
            &["ai-chatbot"],
        ),
        skill(
            "typescript",
            "TypeScript",
            87,
            "0x05",
            "Type-safe development for large-scale applications",
            &["task-management-app"],
        ),
        skill(
            "databases",
            "Database Design",
            85,
            "0x06",
            "SQL and NoSQL database architecture and optimization",
            &["e-commerce-platform", "data-visualization", "mobile-fitness-app"],
        ),
        skill(
            "cloud",
            "Cloud Platforms",
            83,
            "0x07",
            "AWS, Google Cloud, and containerization with Docker",
            &["ai-chatbot", "e-commerce-platform"],
        ),
        skill(
            "mobile",
            "Mobile Development",
            80,
            "0x08",
            "Cross-platform mobile app development",
            &["mobile-fitness-app"],
        ),
    ];

    let register = |name: &str, value: &str, description: &str| Register {
        name: name.to_string(),
        value: value.to_string(),
        description: description.to_string(),
    };

    let registers = vec![
        register("ROLE", "Full Stack Developer", "Primary development role"),
        register("EXP", "3+ Years", "Professional experience"),
        register("LOC", "Remote/Hybrid", "Work location preference"),
        register("CERT", "AWS/Docker", "Technical certifications"),
    ];

    PortfolioStore { projects, skills, registers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_counts() {
        let store = PortfolioStore::builtin();
        assert_eq!(store.projects.len(), 5);
        assert_eq!(store.skills.len(), 8);
        assert_eq!(store.registers.len(), 4);
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_memory_map_footer_totals() {
        let store = PortfolioStore::builtin();
        assert_eq!(store.total_size_kb(), 215);
        assert_eq!(store.free_size_kb(), 839);
    }

    #[test]
    fn test_average_skill_level() {
        let store = PortfolioStore::builtin();
        // (95 + 92 + 88 + 90 + 87 + 85 + 83 + 80) / 8 = 87.5
        assert_eq!(store.average_skill_level(), 88);

        let empty = PortfolioStore { projects: store.projects.clone(), skills: vec![], registers: vec![] };
        assert_eq!(empty.average_skill_level(), 0);
    }

    #[test]
    fn test_projects_using_skill() {
        let store = PortfolioStore::builtin();
        let databases = store.skill("databases").unwrap();
        let names: Vec<&str> = store.projects_using_skill(databases).map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["E-Commerce_Platform", "Analytics_Dashboard", "Fitness_Tracker"]);
    }

    #[test]
    fn test_validate_rejects_dangling_reference() {
        let mut store = PortfolioStore::builtin();
        store.skills[0].projects.push("ghost-project".to_string());
        assert!(matches!(
            store.validate(),
            Err(PortfolioError::DanglingReference { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_project() {
        let mut store = PortfolioStore::builtin();
        let dup = store.projects[0].clone();
        store.projects.push(dup);
        assert!(matches!(store.validate(), Err(PortfolioError::DuplicateId(_))));
    }

    #[test]
    fn test_validate_rejects_level_out_of_range() {
        let mut store = PortfolioStore::builtin();
        store.skills[1].level = 101;
        assert!(matches!(store.validate(), Err(PortfolioError::LevelOutOfRange(_))));
    }

    #[test]
    fn test_load_from_file_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("portfolio.json");
        let store = PortfolioStore::builtin();
        std::fs::write(&path, serde_json::to_string_pretty(&store).unwrap()).unwrap();

        let loaded = PortfolioStore::load_from_file(&path).expect("portfolio should load");
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_load_missing_file() {
        let result = PortfolioStore::load_from_file(Path::new("/nonexistent/portfolio.json"));
        assert!(matches!(result, Err(PortfolioError::FileNotFound(_))));
    }
}
