use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Stable identifier of an experience or project entry.
///
/// Fresh ids are millisecond timestamps, so existing literal ids (1, 2, 3...)
/// and generated ones share one integer space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Icon tag shown next to a skill group. Unrecognized tags fall back to `Terminal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SkillIcon {
    Brain,
    #[default]
    Terminal,
    Layout,
    Server,
}

impl SkillIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillIcon::Brain => "Brain",
            SkillIcon::Terminal => "Terminal",
            SkillIcon::Layout => "Layout",
            SkillIcon::Server => "Server",
        }
    }
}

impl From<String> for SkillIcon {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Brain" => SkillIcon::Brain,
            "Terminal" => SkillIcon::Terminal,
            "Layout" => SkillIcon::Layout,
            "Server" => SkillIcon::Server,
            _ => SkillIcon::default(),
        }
    }
}

impl From<SkillIcon> for String {
    fn from(value: SkillIcon) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub role: String,
    pub tagline: String,
    pub location: String,
    pub email: String,
    #[serde(default)]
    pub availability: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    /// Platform name → URL in authored order. At minimum `github`,
    /// `linkedin` and `email`; new platforms are appended.
    pub social: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct About {
    #[serde(default)]
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub icon: SkillIcon,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: EntryId,
    pub role: String,
    pub company: String,
    pub location: String,
    pub period: String,
    /// Bullet points, in display order.
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub id: EntryId,
    pub title: String,
    pub category: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub links: ProjectLinks,
}

/// The whole portfolio content tree. Every section is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub personal_info: PersonalInfo,
    pub about: About,
    pub skills: Vec<SkillGroup>,
    /// Newest first by convention; never re-sorted.
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
}

impl Document {
    /// Current index of the experience entry with `id`, if present.
    pub fn experience_position(&self, id: EntryId) -> Option<usize> {
        self.experience.iter().position(|e| e.id == id)
    }

    /// Current index of the project entry with `id`, if present.
    pub fn project_position(&self, id: EntryId) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_icon_falls_back_to_terminal() {
        let group: SkillGroup =
            serde_json::from_str(r#"{"category":"x","icon":"Rocket","items":[]}"#).unwrap();
        assert_eq!(group.icon, SkillIcon::Terminal);
    }

    #[test]
    fn test_icon_serializes_as_tag_name() {
        let json = serde_json::to_string(&SkillIcon::Layout).unwrap();
        assert_eq!(json, "\"Layout\"");
    }

    #[test]
    fn test_project_uses_camel_case_tech_stack() {
        let project = ProjectEntry {
            id: EntryId(7),
            title: "t".to_string(),
            category: "c".to_string(),
            description: "d".to_string(),
            tech_stack: vec!["Rust".to_string()],
            links: ProjectLinks::default(),
        };
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["techStack"][0], "Rust");
        assert_eq!(value["id"], 7);
    }
}
