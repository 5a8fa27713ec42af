//! Structural edits over the portfolio document.
//!
//! Every operation borrows the current document and returns a complete new
//! one. The input is never touched, so a failed edit leaves nothing behind:
//! the working copy is simply dropped.
//!
//! Entries are addressed by position. Positions shift on every insert and
//! delete, so a caller must derive the next index from the document an edit
//! returned, never from an older value.

use std::collections::HashSet;
use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::portfolio::defaults::{
    placeholder_experience, placeholder_project, NEW_BULLET, NEW_SKILL,
};
use crate::portfolio::fields::{split_tech_stack, ExperienceField, ProfileField, ProjectField};
use crate::portfolio::models::{Document, EntryId};

/// Ordered sequence addressed by an index argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    SkillGroups,
    SkillItems,
    Experience,
    ExperienceBullets,
    Projects,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::SkillGroups => "skill group",
            Collection::SkillItems => "skill item",
            Collection::Experience => "experience",
            Collection::ExperienceBullets => "experience bullet",
            Collection::Projects => "project",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("{collection} index {index} is out of range (len {len})")]
    IndexOutOfRange {
        collection: Collection,
        index: usize,
        len: usize,
    },

    #[error("unknown {entity} field '{key}'")]
    UnknownField { entity: &'static str, key: String },

    #[error("stale document version: expected {expected}, current is {current}")]
    StaleVersion { expected: u64, current: u64 },
}

impl DocumentError {
    pub fn unknown_field(entity: &'static str, key: &str) -> Self {
        DocumentError::UnknownField {
            entity,
            key: key.to_string(),
        }
    }
}

/// A single structural edit, as sent by the editing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    SetProfileField {
        key: String,
        value: String,
    },
    SetAboutDescription {
        value: String,
    },
    SetSkillItem {
        group_index: usize,
        item_index: usize,
        value: String,
    },
    AddSkillItem {
        group_index: usize,
    },
    RemoveSkillItem {
        group_index: usize,
        item_index: usize,
    },
    SetExperienceField {
        index: usize,
        key: String,
        value: String,
    },
    SetExperienceBullet {
        index: usize,
        bullet_index: usize,
        value: String,
    },
    AddExperienceBullet {
        index: usize,
    },
    RemoveExperienceBullet {
        index: usize,
        bullet_index: usize,
    },
    AddExperience,
    RemoveExperience {
        index: usize,
    },
    SetProjectField {
        index: usize,
        key: String,
        value: String,
    },
    AddProject,
    RemoveProject {
        index: usize,
    },
}

impl Edit {
    pub fn op_name(&self) -> &'static str {
        match self {
            Edit::SetProfileField { .. } => "set_profile_field",
            Edit::SetAboutDescription { .. } => "set_about_description",
            Edit::SetSkillItem { .. } => "set_skill_item",
            Edit::AddSkillItem { .. } => "add_skill_item",
            Edit::RemoveSkillItem { .. } => "remove_skill_item",
            Edit::SetExperienceField { .. } => "set_experience_field",
            Edit::SetExperienceBullet { .. } => "set_experience_bullet",
            Edit::AddExperienceBullet { .. } => "add_experience_bullet",
            Edit::RemoveExperienceBullet { .. } => "remove_experience_bullet",
            Edit::AddExperience => "add_experience",
            Edit::RemoveExperience { .. } => "remove_experience",
            Edit::SetProjectField { .. } => "set_project_field",
            Edit::AddProject => "add_project",
            Edit::RemoveProject { .. } => "remove_project",
        }
    }
}

fn slot<T>(items: &mut [T], index: usize, collection: Collection) -> Result<&mut T, DocumentError> {
    let len = items.len();
    items.get_mut(index).ok_or(DocumentError::IndexOutOfRange {
        collection,
        index,
        len,
    })
}

fn take<T>(items: &mut Vec<T>, index: usize, collection: Collection) -> Result<T, DocumentError> {
    if index >= items.len() {
        return Err(DocumentError::IndexOutOfRange {
            collection,
            index,
            len: items.len(),
        });
    }
    Ok(items.remove(index))
}

/// Timestamp-derived id, bumped past every id already in use.
///
/// When the largest id is already `i64::MAX` there is nothing above it, so
/// the first unused id at or after `now` is taken instead (wrapping once).
fn fresh_id(existing: impl IntoIterator<Item = EntryId>) -> EntryId {
    let now = Utc::now().timestamp_millis();
    let taken: HashSet<i64> = existing.into_iter().map(|id| id.0).collect();
    match taken.iter().max() {
        None => EntryId(now),
        Some(max) => match max.checked_add(1) {
            Some(next) => EntryId(now.max(next)),
            None => (now..=i64::MAX)
                .chain(i64::MIN..now)
                .find(|candidate| !taken.contains(candidate))
                .map(EntryId)
                .unwrap_or(EntryId(now)),
        },
    }
}

impl Document {
    /// Applies any [`Edit`], returning the resulting document.
    pub fn apply(&self, edit: &Edit) -> Result<Document, DocumentError> {
        match edit {
            Edit::SetProfileField { key, value } => self.set_profile_field(key, value),
            Edit::SetAboutDescription { value } => Ok(self.set_about_description(value)),
            Edit::SetSkillItem {
                group_index,
                item_index,
                value,
            } => self.set_skill_item(*group_index, *item_index, value),
            Edit::AddSkillItem { group_index } => self.add_skill_item(*group_index),
            Edit::RemoveSkillItem {
                group_index,
                item_index,
            } => self.remove_skill_item(*group_index, *item_index),
            Edit::SetExperienceField { index, key, value } => {
                self.set_experience_field(*index, key, value)
            }
            Edit::SetExperienceBullet {
                index,
                bullet_index,
                value,
            } => self.set_experience_bullet(*index, *bullet_index, value),
            Edit::AddExperienceBullet { index } => self.add_experience_bullet(*index),
            Edit::RemoveExperienceBullet {
                index,
                bullet_index,
            } => self.remove_experience_bullet(*index, *bullet_index),
            Edit::AddExperience => Ok(self.add_experience()),
            Edit::RemoveExperience { index } => self.remove_experience(*index),
            Edit::SetProjectField { index, key, value } => {
                self.set_project_field(*index, key, value)
            }
            Edit::AddProject => Ok(self.add_project()),
            Edit::RemoveProject { index } => self.remove_project(*index),
        }
    }

    pub fn set_profile_field(&self, key: &str, value: &str) -> Result<Document, DocumentError> {
        let field: ProfileField = key.parse()?;
        let mut doc = self.clone();
        let info = &mut doc.personal_info;
        let value = value.to_string();
        match field {
            ProfileField::Name => info.name = value,
            ProfileField::Role => info.role = value,
            ProfileField::Tagline => info.tagline = value,
            ProfileField::Location => info.location = value,
            ProfileField::Email => info.email = value,
            ProfileField::Availability => info.availability = value,
            ProfileField::Image => info.image = Some(value),
            ProfileField::HeroImage => info.hero_image = Some(value),
            ProfileField::Social(platform) => {
                info.social.insert(platform, value);
            }
        }
        Ok(doc)
    }

    pub fn set_about_description(&self, value: &str) -> Document {
        let mut doc = self.clone();
        doc.about.description = value.to_string();
        doc
    }

    pub fn set_skill_item(
        &self,
        group_index: usize,
        item_index: usize,
        value: &str,
    ) -> Result<Document, DocumentError> {
        let mut doc = self.clone();
        let group = slot(&mut doc.skills, group_index, Collection::SkillGroups)?;
        *slot(&mut group.items, item_index, Collection::SkillItems)? = value.to_string();
        Ok(doc)
    }

    /// Appends the placeholder skill to the end of a group.
    pub fn add_skill_item(&self, group_index: usize) -> Result<Document, DocumentError> {
        let mut doc = self.clone();
        let group = slot(&mut doc.skills, group_index, Collection::SkillGroups)?;
        group.items.push(NEW_SKILL.to_string());
        Ok(doc)
    }

    pub fn remove_skill_item(
        &self,
        group_index: usize,
        item_index: usize,
    ) -> Result<Document, DocumentError> {
        let mut doc = self.clone();
        let group = slot(&mut doc.skills, group_index, Collection::SkillGroups)?;
        take(&mut group.items, item_index, Collection::SkillItems)?;
        Ok(doc)
    }

    pub fn set_experience_field(
        &self,
        index: usize,
        key: &str,
        value: &str,
    ) -> Result<Document, DocumentError> {
        let field: ExperienceField = key.parse()?;
        let mut doc = self.clone();
        let entry = slot(&mut doc.experience, index, Collection::Experience)?;
        let value = value.to_string();
        match field {
            ExperienceField::Role => entry.role = value,
            ExperienceField::Company => entry.company = value,
            ExperienceField::Location => entry.location = value,
            ExperienceField::Period => entry.period = value,
        }
        Ok(doc)
    }

    pub fn set_experience_bullet(
        &self,
        index: usize,
        bullet_index: usize,
        value: &str,
    ) -> Result<Document, DocumentError> {
        let mut doc = self.clone();
        let entry = slot(&mut doc.experience, index, Collection::Experience)?;
        *slot(
            &mut entry.description,
            bullet_index,
            Collection::ExperienceBullets,
        )? = value.to_string();
        Ok(doc)
    }

    pub fn add_experience_bullet(&self, index: usize) -> Result<Document, DocumentError> {
        let mut doc = self.clone();
        let entry = slot(&mut doc.experience, index, Collection::Experience)?;
        entry.description.push(NEW_BULLET.to_string());
        Ok(doc)
    }

    pub fn remove_experience_bullet(
        &self,
        index: usize,
        bullet_index: usize,
    ) -> Result<Document, DocumentError> {
        let mut doc = self.clone();
        let entry = slot(&mut doc.experience, index, Collection::Experience)?;
        take(
            &mut entry.description,
            bullet_index,
            Collection::ExperienceBullets,
        )?;
        Ok(doc)
    }

    /// Prepends a placeholder entry with a fresh id.
    pub fn add_experience(&self) -> Document {
        let mut doc = self.clone();
        let id = fresh_id(doc.experience.iter().map(|e| e.id));
        doc.experience.insert(0, placeholder_experience(id));
        doc
    }

    pub fn remove_experience(&self, index: usize) -> Result<Document, DocumentError> {
        let mut doc = self.clone();
        take(&mut doc.experience, index, Collection::Experience)?;
        Ok(doc)
    }

    pub fn set_project_field(
        &self,
        index: usize,
        key: &str,
        value: &str,
    ) -> Result<Document, DocumentError> {
        let field: ProjectField = key.parse()?;
        let mut doc = self.clone();
        let project = slot(&mut doc.projects, index, Collection::Projects)?;
        match field {
            ProjectField::Title => project.title = value.to_string(),
            ProjectField::Category => project.category = value.to_string(),
            ProjectField::Description => project.description = value.to_string(),
            ProjectField::TechStack => project.tech_stack = split_tech_stack(value),
            ProjectField::DemoLink => project.links.demo = Some(value.to_string()),
            ProjectField::RepoLink => project.links.repo = Some(value.to_string()),
        }
        Ok(doc)
    }

    /// Prepends a placeholder project with a fresh id.
    pub fn add_project(&self) -> Document {
        let mut doc = self.clone();
        let id = fresh_id(doc.projects.iter().map(|p| p.id));
        doc.projects.insert(0, placeholder_project(id));
        doc
    }

    pub fn remove_project(&self, index: usize) -> Result<Document, DocumentError> {
        let mut doc = self.clone();
        take(&mut doc.projects, index, Collection::Projects)?;
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::defaults::{default_document, NEW_EXPERIENCE_ROLE, NEW_PROJECT_TITLE};

    fn doc() -> Document {
        default_document().unwrap()
    }

    fn assert_out_of_range(result: Result<Document, DocumentError>, expected: Collection) {
        match result {
            Err(DocumentError::IndexOutOfRange { collection, .. }) => {
                assert_eq!(collection, expected)
            }
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_set_profile_field_accepts_empty_value() {
        let original = doc();
        let updated = original.set_profile_field("tagline", "").unwrap();
        assert_eq!(updated.personal_info.tagline, "");
        assert_ne!(original.personal_info.tagline, "");
    }

    #[test]
    fn test_set_profile_optional_fields() {
        let updated = doc()
            .set_profile_field("heroImage", "hero.png")
            .unwrap()
            .set_profile_field("image", "")
            .unwrap();
        assert_eq!(updated.personal_info.hero_image.as_deref(), Some("hero.png"));
        assert_eq!(updated.personal_info.image.as_deref(), Some(""));
    }

    #[test]
    fn test_set_profile_social_inserts_platform() {
        let updated = doc()
            .set_profile_field("social.mastodon", "https://example.social/@me")
            .unwrap();
        assert_eq!(
            updated.personal_info.social.get("mastodon").map(String::as_str),
            Some("https://example.social/@me")
        );
    }

    #[test]
    fn test_set_profile_social_keeps_platform_order() {
        let updated = doc()
            .set_profile_field("social.github", "https://github.com/someone-else")
            .unwrap()
            .set_profile_field("social.mastodon", "https://example.social/@me")
            .unwrap();
        let platforms: Vec<&str> = updated.personal_info.social.keys().map(String::as_str).collect();
        assert_eq!(platforms, vec!["linkedin", "github", "huggingface", "email", "mastodon"]);
    }

    #[test]
    fn test_set_profile_unknown_field() {
        let err = doc().set_profile_field("nickname", "x").unwrap_err();
        assert_eq!(err, DocumentError::unknown_field("profile", "nickname"));
    }

    #[test]
    fn test_set_about_description() {
        let updated = doc().set_about_description("Short bio.");
        assert_eq!(updated.about.description, "Short bio.");
        assert_eq!(updated.about.title, "About Me");
    }

    #[test]
    fn test_set_skill_item() {
        let updated = doc().set_skill_item(1, 0, "Looker").unwrap();
        assert_eq!(updated.skills[1].items[0], "Looker");
    }

    #[test]
    fn test_set_skill_item_out_of_range_on_either_index() {
        let d = doc();
        assert_out_of_range(d.set_skill_item(9, 0, "x"), Collection::SkillGroups);
        let len = d.skills[0].items.len();
        assert_out_of_range(d.set_skill_item(0, len, "x"), Collection::SkillItems);
    }

    #[test]
    fn test_add_skill_item_appends_placeholder() {
        let d = doc();
        let updated = d.add_skill_item(2).unwrap();
        assert_eq!(updated.skills[2].items.len(), d.skills[2].items.len() + 1);
        assert_eq!(updated.skills[2].items.last().unwrap(), NEW_SKILL);
    }

    #[test]
    fn test_remove_skill_item_shifts_later_items() {
        let d = doc();
        let updated = d.remove_skill_item(0, 1).unwrap();
        let mut expected = d.skills[0].items.clone();
        expected.remove(1);
        assert_eq!(updated.skills[0].items, expected);
    }

    #[test]
    fn test_remove_then_add_is_not_an_inverse() {
        let d = doc();
        let last = d.skills[0].items.len() - 1;
        let round = d
            .remove_skill_item(0, last)
            .unwrap()
            .add_skill_item(0)
            .unwrap();
        assert_eq!(round.skills[0].items.len(), d.skills[0].items.len());
        assert_ne!(round, d);
        assert_eq!(round.skills[0].items[last], NEW_SKILL);
    }

    #[test]
    fn test_set_experience_field() {
        let updated = doc().set_experience_field(2, "company", "Acme").unwrap();
        assert_eq!(updated.experience[2].company, "Acme");
    }

    #[test]
    fn test_set_experience_field_rejects_unknown_key_before_index() {
        let err = doc().set_experience_field(99, "salary", "x").unwrap_err();
        assert!(matches!(err, DocumentError::UnknownField { entity: "experience", .. }));
    }

    #[test]
    fn test_experience_bullet_edits() {
        let d = doc();
        let bullets = d.experience[0].description.len();

        let added = d.add_experience_bullet(0).unwrap();
        assert_eq!(added.experience[0].description.len(), bullets + 1);
        assert_eq!(added.experience[0].description[bullets], NEW_BULLET);

        let edited = added.set_experience_bullet(0, bullets, "Shipped it.").unwrap();
        assert_eq!(edited.experience[0].description[bullets], "Shipped it.");

        let removed = edited.remove_experience_bullet(0, 0).unwrap();
        assert_eq!(removed.experience[0].description.len(), bullets);
        assert_eq!(removed.experience[0].description[0], d.experience[0].description[1]);
    }

    #[test]
    fn test_experience_bullet_out_of_range() {
        let d = doc();
        let len = d.experience[0].description.len();
        assert_out_of_range(
            d.set_experience_bullet(0, len, "x"),
            Collection::ExperienceBullets,
        );
        assert_out_of_range(
            d.remove_experience_bullet(0, len),
            Collection::ExperienceBullets,
        );
        assert_out_of_range(d.add_experience_bullet(5), Collection::Experience);
    }

    #[test]
    fn test_add_experience_prepends_placeholder() {
        let d = doc();
        let updated = d.add_experience();
        assert_eq!(updated.experience.len(), 6);
        assert_eq!(updated.experience[0].role, NEW_EXPERIENCE_ROLE);
        assert_eq!(&updated.experience[1..], &d.experience[..]);
    }

    #[test]
    fn test_add_experience_ids_are_pairwise_distinct() {
        let mut d = doc();
        for _ in 0..50 {
            d = d.add_experience();
        }
        let ids: HashSet<_> = d.experience.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), d.experience.len());
    }

    #[test]
    fn test_fresh_id_exceeds_future_ids() {
        let far_future = EntryId(i64::MAX / 2);
        let id = fresh_id([EntryId(1), far_future]);
        assert_eq!(id, EntryId(far_future.0 + 1));
    }

    #[test]
    fn test_fresh_id_below_max_when_max_is_taken() {
        let existing = [EntryId(1), EntryId(i64::MAX)];
        let id = fresh_id(existing);
        assert!(!existing.contains(&id), "{id} collides");
        assert!(id.0 >= Utc::now().timestamp_millis() - 1_000);
    }

    #[test]
    fn test_add_after_max_id_import_keeps_ids_unique() {
        let mut d = doc();
        d.experience[0].id = EntryId(i64::MAX);
        d.projects[0].id = EntryId(i64::MAX);
        for _ in 0..3 {
            d = d.add_experience().add_project();
        }
        let experience: HashSet<_> = d.experience.iter().map(|e| e.id).collect();
        let projects: HashSet<_> = d.projects.iter().map(|p| p.id).collect();
        assert_eq!(experience.len(), d.experience.len());
        assert_eq!(projects.len(), d.projects.len());
    }

    #[test]
    fn test_remove_experience_out_of_range() {
        assert_out_of_range(doc().remove_experience(5), Collection::Experience);
    }

    #[test]
    fn test_set_project_tech_stack_splits_and_trims() {
        let updated = doc()
            .set_project_field(0, "techStack", "React, Node, ")
            .unwrap();
        assert_eq!(updated.projects[0].tech_stack, vec!["React", "Node", ""]);
    }

    #[test]
    fn test_set_project_links() {
        let updated = doc()
            .set_project_field(1, "links.demo", "https://demo.example")
            .unwrap();
        assert_eq!(
            updated.projects[1].links.demo.as_deref(),
            Some("https://demo.example")
        );
    }

    #[test]
    fn test_set_project_unknown_field() {
        let err = doc().set_project_field(0, "id", "3").unwrap_err();
        assert_eq!(err, DocumentError::unknown_field("project", "id"));
    }

    #[test]
    fn test_add_and_remove_project() {
        let d = doc();
        let added = d.add_project();
        assert_eq!(added.projects[0].title, NEW_PROJECT_TITLE);
        assert_eq!(added.projects[0].tech_stack, vec!["React", "Node"]);
        assert!(d.project_position(added.projects[0].id).is_none());

        let removed = added.remove_project(0).unwrap();
        assert_eq!(removed, d);
        assert_out_of_range(removed.remove_project(4), Collection::Projects);
    }

    #[test]
    fn test_position_lookup_tracks_shifts() {
        let d = doc();
        let id = d.experience[3].id;
        let shifted = d.add_experience();
        assert_eq!(shifted.experience_position(id), Some(4));
    }

    #[test]
    fn test_apply_dispatches_tagged_edit() {
        let edit: Edit =
            serde_json::from_str(r#"{"op":"set_skill_item","group_index":0,"item_index":0,"value":"LLMs"}"#)
                .unwrap();
        let updated = doc().apply(&edit).unwrap();
        assert_eq!(updated.skills[0].items[0], "LLMs");
        assert_eq!(edit.op_name(), "set_skill_item");
    }

    #[test]
    fn test_apply_unit_variant_from_json() {
        let edit: Edit = serde_json::from_str(r#"{"op":"add_project"}"#).unwrap();
        assert_eq!(edit, Edit::AddProject);
        assert_eq!(doc().apply(&edit).unwrap().projects.len(), 5);
    }

    #[test]
    fn test_failed_apply_leaves_input_unchanged() {
        let d = doc();
        let before = d.clone();
        assert!(d.apply(&Edit::RemoveSkillItem { group_index: 0, item_index: 100 }).is_err());
        assert_eq!(d, before);
    }
}
