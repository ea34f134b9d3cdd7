// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Slugify project names into ids.

/// Maximum length of a derived project id
pub const MAX_SLUG_LEN: usize = 48;

/// Slugify a project name for use as a project id.
///
/// Lowercases, replaces each run of non-alphanumeric characters with a single
/// hyphen, trims hyphens at both ends, and truncates to `max_len` characters
/// (trimming a trailing hyphen left by truncation).
pub fn slugify(input: &str, max_len: usize) -> String {
    let lower = input.to_lowercase();

    let mut slug = String::with_capacity(lower.len());
    let mut last_was_hyphen = false;
    for ch in lower.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    let mut result = slug.trim_matches('-').to_string();

    if result.len() > max_len {
        result.truncate(max_len);
    }

    let trimmed = result.trim_end_matches('-');
    if trimmed.len() != result.len() {
        result = trimmed.to_string();
    }

    result
}

/// Whether `id` is already a valid slug (`[a-z0-9-]`, no edge hyphens)
pub fn is_slug(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('-')
        && !id.ends_with('-')
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
#[path = "slug_tests.rs"]
mod tests;
