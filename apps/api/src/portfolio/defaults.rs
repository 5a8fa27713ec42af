use crate::portfolio::models::{Document, EntryId, ExperienceEntry, ProjectEntry, ProjectLinks};

/// Content shipped with the binary; used when no seed snippet is configured.
const DEFAULT_DOCUMENT_JSON: &str = include_str!("../../data/default_portfolio.json");

pub const NEW_SKILL: &str = "New Skill";
pub const NEW_BULLET: &str = "New bullet point";

pub const NEW_EXPERIENCE_ROLE: &str = "New Role";
pub const NEW_EXPERIENCE_COMPANY: &str = "New Company";
pub const NEW_EXPERIENCE_LOCATION: &str = "Location";
pub const NEW_EXPERIENCE_PERIOD: &str = "Present";
pub const NEW_EXPERIENCE_BULLET: &str = "Did cool things.";

pub const NEW_PROJECT_TITLE: &str = "New Project";
pub const NEW_PROJECT_CATEGORY: &str = "Development";
pub const NEW_PROJECT_DESCRIPTION: &str = "Description of the project.";
pub const NEW_PROJECT_TECH_STACK: &[&str] = &["React", "Node"];
pub const NEW_PROJECT_LINK: &str = "#";

/// Parses the embedded default document.
pub fn default_document() -> Result<Document, serde_json::Error> {
    serde_json::from_str(DEFAULT_DOCUMENT_JSON)
}

pub fn placeholder_experience(id: EntryId) -> ExperienceEntry {
    ExperienceEntry {
        id,
        role: NEW_EXPERIENCE_ROLE.to_string(),
        company: NEW_EXPERIENCE_COMPANY.to_string(),
        location: NEW_EXPERIENCE_LOCATION.to_string(),
        period: NEW_EXPERIENCE_PERIOD.to_string(),
        description: vec![NEW_EXPERIENCE_BULLET.to_string()],
    }
}

pub fn placeholder_project(id: EntryId) -> ProjectEntry {
    ProjectEntry {
        id,
        title: NEW_PROJECT_TITLE.to_string(),
        category: NEW_PROJECT_CATEGORY.to_string(),
        description: NEW_PROJECT_DESCRIPTION.to_string(),
        tech_stack: NEW_PROJECT_TECH_STACK.iter().map(|s| s.to_string()).collect(),
        links: ProjectLinks {
            demo: Some(NEW_PROJECT_LINK.to_string()),
            repo: Some(NEW_PROJECT_LINK.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::models::SkillIcon;

    #[test]
    fn test_default_document_parses() {
        let doc = default_document().unwrap();
        assert_eq!(doc.experience.len(), 5);
        assert_eq!(doc.projects.len(), 4);
        assert_eq!(doc.skills.len(), 4);
        assert_eq!(doc.skills[0].icon, SkillIcon::Brain);
    }

    #[test]
    fn test_default_social_has_required_platforms() {
        let doc = default_document().unwrap();
        for platform in ["github", "linkedin", "email"] {
            assert!(doc.personal_info.social.contains_key(platform), "{platform}");
        }
    }

    #[test]
    fn test_default_ids_are_unique() {
        let doc = default_document().unwrap();
        let mut ids: Vec<_> = doc.experience.iter().map(|e| e.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), doc.experience.len());
    }
}
