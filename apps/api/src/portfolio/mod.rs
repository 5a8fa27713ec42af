// Portfolio document: schema, structural edits, versioned store, export snippet.
// Presentational output is limited to the markdown preview in `render`.

pub mod defaults;
pub mod edits;
pub mod export;
pub mod fields;
pub mod handlers;
pub mod models;
pub mod render;
pub mod store;
