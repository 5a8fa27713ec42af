//! Field keys accepted by the generic setters.
//!
//! Keys arrive as strings from the editing surface (`"heroImage"`,
//! `"links.demo"`, `"social.github"`) and are parsed into closed enums here,
//! so an unknown key is rejected before any document is cloned.

use std::str::FromStr;

use crate::portfolio::edits::DocumentError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Role,
    Tagline,
    Location,
    Email,
    Availability,
    Image,
    HeroImage,
    /// One entry of the social map, keyed by platform name.
    Social(String),
}

impl FromStr for ProfileField {
    type Err = DocumentError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "name" => Ok(ProfileField::Name),
            "role" => Ok(ProfileField::Role),
            "tagline" => Ok(ProfileField::Tagline),
            "location" => Ok(ProfileField::Location),
            "email" => Ok(ProfileField::Email),
            "availability" => Ok(ProfileField::Availability),
            "image" => Ok(ProfileField::Image),
            "heroImage" => Ok(ProfileField::HeroImage),
            _ => match key.strip_prefix("social.") {
                Some(platform) if !platform.is_empty() => {
                    Ok(ProfileField::Social(platform.to_string()))
                }
                _ => Err(DocumentError::unknown_field("profile", key)),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    Role,
    Company,
    Location,
    Period,
}

impl FromStr for ExperienceField {
    type Err = DocumentError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "role" => Ok(ExperienceField::Role),
            "company" => Ok(ExperienceField::Company),
            "location" => Ok(ExperienceField::Location),
            "period" => Ok(ExperienceField::Period),
            _ => Err(DocumentError::unknown_field("experience", key)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Title,
    Category,
    Description,
    /// Takes a single comma-separated display string.
    TechStack,
    DemoLink,
    RepoLink,
}

impl FromStr for ProjectField {
    type Err = DocumentError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "title" => Ok(ProjectField::Title),
            "category" => Ok(ProjectField::Category),
            "description" => Ok(ProjectField::Description),
            "techStack" => Ok(ProjectField::TechStack),
            "links.demo" => Ok(ProjectField::DemoLink),
            "links.repo" => Ok(ProjectField::RepoLink),
            _ => Err(DocumentError::unknown_field("project", key)),
        }
    }
}

/// Splits a tech stack display string on `,` and trims each segment.
///
/// Empty segments are kept, so `"React, Node, "` yields `["React", "Node", ""]`.
pub fn split_tech_stack(display: &str) -> Vec<String> {
    display.split(',').map(|s| s.trim().to_string()).collect()
}

/// Inverse display form of [`split_tech_stack`].
pub fn join_tech_stack(stack: &[String]) -> String {
    stack.join(", ")
}
