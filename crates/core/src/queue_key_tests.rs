// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    highest = { 1 },
    middle = { 3 },
    lowest = { 5 },
)]
fn valid_priorities_are_accepted(level: u8) {
    assert_eq!(Priority::new(level).unwrap().level(), level);
}

#[yare::parameterized(
    zero = { 0 },
    six = { 6 },
    max = { 255 },
)]
fn out_of_range_priorities_are_rejected(level: u8) {
    assert!(Priority::new(level).is_err());
}

#[yare::parameterized(
    bare = { "2", 2 },
    prefixed = { "p4", 4 },
    padded = { " 1 ", 1 },
)]
fn priority_parses_from_str(input: &str, expected: u8) {
    assert_eq!(input.parse::<Priority>().unwrap().level(), expected);
}

#[yare::parameterized(
    word = { "high" },
    zero = { "p0" },
    negative = { "-1" },
)]
fn priority_parse_rejects_garbage(input: &str) {
    assert!(input.parse::<Priority>().is_err());
}

#[test]
fn default_priority_is_the_middle_level() {
    assert_eq!(Priority::default().level(), 3);
}

#[test]
fn all_priorities_are_in_drain_order() {
    let levels: Vec<u8> = Priority::ALL.iter().map(|p| p.level()).collect();
    assert_eq!(levels, vec![1, 2, 3, 4, 5]);
}

#[test]
fn key_renders_prefix_queue_and_priority() {
    let key = QueueKey::new("ck", "mail", Priority::new(2).unwrap());
    assert_eq!(key.to_string(), "ck-mail-p2");
}

#[test]
fn key_without_prefix_omits_the_separator() {
    let key = QueueKey::new("", "mail", Priority::HIGHEST);
    assert_eq!(key.to_string(), "mail-p1");
}

#[test]
fn empty_queue_name_maps_to_default() {
    let key = QueueKey::new("ck", "  ", Priority::LOWEST);
    assert_eq!(key.queue(), DEFAULT_QUEUE);
    assert_eq!(key.to_string(), "ck-default-p5");
}

#[test]
fn all_keys_cover_five_priorities() {
    let keys: Vec<String> = QueueKey::all("ck", "default").map(|k| k.to_string()).collect();
    assert_eq!(
        keys,
        vec!["ck-default-p1", "ck-default-p2", "ck-default-p3", "ck-default-p4", "ck-default-p5"]
    );
}

#[test]
fn priority_serde_rejects_out_of_range() {
    assert!(serde_json::from_str::<Priority>("9").is_err());
    assert_eq!(serde_json::from_str::<Priority>("1").unwrap(), Priority::HIGHEST);
}
