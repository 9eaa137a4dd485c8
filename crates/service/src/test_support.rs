#![cfg(test)]
//! Shared fixtures for service tests.

use std::path::PathBuf;

use uuid::Uuid;

use models::post::Author;

use crate::posts::domain::PostDraft;

/// Unique collection path under the OS temp dir, one per test.
pub fn temp_store_path(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}_{}.json", prefix, Uuid::new_v4()))
}

const FIRST_NAMES: &[&str] = &["Ada", "Grace", "Edsger", "Barbara", "Donald"];
const LAST_NAMES: &[&str] = &["Lovelace", "Hopper", "Dijkstra", "Liskov", "Knuth"];

/// Deterministic draft generator standing in for random fixture data.
pub fn sample_draft(i: usize) -> PostDraft {
    PostDraft {
        title: format!("post title {}", i),
        content: format!("post content number {}", i),
        author: Author {
            first_name: FIRST_NAMES[i % FIRST_NAMES.len()].to_string(),
            last_name: LAST_NAMES[i % LAST_NAMES.len()].to_string(),
        },
        created: None,
    }
}
