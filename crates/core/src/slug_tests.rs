// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    simple        = { "Demo", "demo" },
    spaces        = { "Agent Panel", "agent-panel" },
    punctuation   = { "  My App (v2)!  ", "my-app-v2" },
    collapse_runs = { "a -- b", "a-b" },
    unicode       = { "Café Ölçü", "caf-l" },
    already_slug  = { "agent-panel", "agent-panel" },
)]
fn slugify_cases(input: &str, expected: &str) {
    assert_eq!(slugify(input, MAX_SLUG_LEN), expected);
}

#[test]
fn slugify_truncation_trims_trailing_hyphen() {
    assert_eq!(slugify("abcd efgh", 5), "abcd");
}

#[test]
fn slugify_of_symbols_is_empty() {
    assert_eq!(slugify("!!!", MAX_SLUG_LEN), "");
}

#[yare::parameterized(
    valid       = { "demo-2", true },
    empty       = { "", false },
    upper       = { "Demo", false },
    underscore  = { "my_app", false },
    edge_hyphen = { "-demo", false },
    trailing    = { "demo-", false },
)]
fn is_slug_cases(id: &str, expected: bool) {
    assert_eq!(is_slug(id), expected);
}
