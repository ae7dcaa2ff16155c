//! Choosing which versions to release

use crate::version::{sort_ascending, Version};
use std::collections::HashSet;

/// Everything needed to create one release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDraft {
    pub version: String,
    pub tag: String,
    pub title: String,
    pub notes: String,
}

impl ReleaseDraft {
    pub fn new(version: &str, product: &str, tag_prefix: &str) -> Self {
        Self {
            version: version.to_string(),
            tag: format!("{}{}", tag_prefix, version),
            title: format!("{} {}", product, version),
            notes: format!("Release of {} version {}", product, version),
        }
    }
}

/// Drafts for `versions` whose tag is not in `existing_tags`, oldest first
pub fn plan_new_releases(
    mut versions: Vec<Version>,
    existing_tags: &[String],
    product: &str,
    tag_prefix: &str,
) -> Vec<ReleaseDraft> {
    let existing: HashSet<&str> = existing_tags.iter().map(String::as_str).collect();
    sort_ascending(&mut versions);

    versions
        .iter()
        .map(|v| ReleaseDraft::new(v.raw(), product, tag_prefix))
        .filter(|draft| !existing.contains(draft.tag.as_str()))
        .collect()
}
