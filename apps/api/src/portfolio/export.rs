//! Export snippet: the document as a pasteable source-level declaration.
//!
//! The snippet is the only way content survives a restart. The operator copies
//! it and re-embeds it as the default (or points `PORTFOLIO_SEED_PATH` at it).

use std::collections::HashSet;

use thiserror::Error;

use crate::portfolio::edits::Collection;
use crate::portfolio::models::{Document, EntryId};

pub const EXPORT_BINDING: &str = "portfolioData";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("snippet is neither a JSON object nor a `name = {{...}}` declaration")]
    MissingDeclaration,

    #[error("snippet JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{collection} id {id} appears more than once")]
    DuplicateId { collection: Collection, id: EntryId },
}

/// Renders `const portfolioData = {...};` with two-space indented JSON.
pub fn export_document(doc: &Document) -> Result<String, ExportError> {
    let body = serde_json::to_string_pretty(doc)?;
    Ok(format!("const {EXPORT_BINDING} = {body};"))
}

/// Reads back a snippet produced by [`export_document`].
///
/// Also accepts `export const`/`let`/`var` declarations and a bare JSON object.
pub fn parse_export(snippet: &str) -> Result<Document, ExportError> {
    let snippet = snippet.trim();
    let literal = if snippet.starts_with('{') {
        snippet
    } else {
        let (_, rhs) = snippet
            .split_once('=')
            .ok_or(ExportError::MissingDeclaration)?;
        rhs.trim()
    };
    let literal = literal.strip_suffix(';').unwrap_or(literal).trim_end();
    if !literal.starts_with('{') {
        return Err(ExportError::MissingDeclaration);
    }
    let document: Document = serde_json::from_str(literal)?;
    ensure_unique(Collection::Experience, document.experience.iter().map(|e| e.id))?;
    ensure_unique(Collection::Projects, document.projects.iter().map(|p| p.id))?;
    Ok(document)
}

fn ensure_unique(
    collection: Collection,
    ids: impl IntoIterator<Item = EntryId>,
) -> Result<(), ExportError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ExportError::DuplicateId { collection, id });
        }
    }
    Ok(())
}
