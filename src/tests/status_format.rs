use super::*;

#[test]
fn empty_and_blank_are_idle() {
    assert_eq!(classify(""), MetadataStatus::Idle);
    assert_eq!(classify("   "), MetadataStatus::Idle);
    assert_eq!(classify("\n\t"), MetadataStatus::Idle);
}

#[test]
fn strict_json_is_valid() {
    assert_eq!(classify("{\"a\":1}"), MetadataStatus::Valid);
    assert_eq!(classify("[1, 2, 3]"), MetadataStatus::Valid);
    assert_eq!(classify("null"), MetadataStatus::Valid);
}

#[test]
fn classification_never_repairs() {
    // Repairable, but classify must report true validity.
    assert_eq!(classify("{a:1}"), MetadataStatus::Invalid);
    assert_eq!(classify("{'a': 1}"), MetadataStatus::Invalid);
    assert_eq!(classify("{\"a\": 1,}"), MetadataStatus::Invalid);
}

#[test]
fn status_words() {
    assert_eq!(MetadataStatus::Idle.to_string(), "idle");
    assert_eq!(MetadataStatus::Valid.to_string(), "valid");
    assert_eq!(MetadataStatus::Invalid.to_string(), "invalid");
}

#[test]
fn format_preserves_key_order() {
    let out = format("{\"b\":2,\"a\":1}", false).unwrap();
    assert_eq!(out, "{\n  \"b\": 2,\n  \"a\": 1\n}");
}

#[test]
fn format_empty_is_empty() {
    assert_eq!(format("", false), Some(String::new()));
    assert_eq!(format("   ", true), Some(String::new()));
}

#[test]
fn format_trims_before_parsing() {
    let out = format("  [1,2]  ", false).unwrap();
    assert_eq!(out, "[\n  1,\n  2\n]");
}

#[test]
fn format_without_repair_rejects_loose_input() {
    assert_eq!(format("{a: 1}", false), None);
}

#[test]
fn format_with_repair_fixes_loose_input() {
    let out = format("{a: 'hi', b: 2,}", true).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v, serde_json::json!({"a": "hi", "b": 2}));
}

#[test]
fn format_unrepairable_is_none() {
    assert_eq!(format("not json at all", true), None);
}

#[test]
fn parse_error_only_for_invalid() {
    assert!(parse_error("").is_none());
    assert!(parse_error("{\"a\":1}").is_none());
    let err = parse_error("{a:1}").unwrap();
    assert_eq!(err.line, 1);
    assert!(!err.message().is_empty());
}
