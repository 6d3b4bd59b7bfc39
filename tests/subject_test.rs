use email_archive::*;

#[test]
fn test_tag_and_forward_chain() {
    let parsed = parse_subject("#acme: Fwd: Re: Q4 Invoice");
    assert_eq!(parsed.tag, "acme");
    assert_eq!(parsed.clean_subject, "Q4 Invoice");
    assert!(parsed.has_tag());
}

#[test]
fn test_repeated_uppercase_prefixes() {
    let parsed = parse_subject("#beta: FW: FW: Meeting Notes");
    assert_eq!(parsed.tag, "beta");
    assert_eq!(parsed.clean_subject, "Meeting Notes");
}

#[test]
fn test_no_tag() {
    let parsed = parse_subject("No hashtag here");
    assert_eq!(parsed.tag, MISSING_TAG);
    assert_eq!(parsed.clean_subject, "No hashtag here");
    assert!(!parsed.has_tag());
}

#[test]
fn test_no_tag_still_strips_prefixes() {
    let parsed = parse_subject("Fwd: Reply: re: Lunch");
    assert_eq!(parsed.tag, "missing");
    assert_eq!(parsed.clean_subject, "Lunch");
}

#[test]
fn test_tag_sanitized() {
    assert_eq!(parse_subject("#test_client: X").tag, "testclient");
    assert_eq!(parse_subject("#ACME-Corp X").tag, "acmecorp");
}

#[test]
fn test_tag_without_colon() {
    let parsed = parse_subject("#acme Quarterly review");
    assert_eq!(parsed.tag, "acme");
    assert_eq!(parsed.clean_subject, "Quarterly review");
}

#[test]
fn test_tag_truncated() {
    let long = format!("#{}: Hi", "a".repeat(80));
    let parsed = parse_subject(&long);
    assert_eq!(parsed.tag.len(), MAX_TAG_LEN);
    assert_eq!(parsed.clean_subject, "Hi");
}

#[test]
fn test_tag_sanitizes_to_empty() {
    let parsed = parse_subject("#___: Hello");
    assert_eq!(parsed.tag, "missing");
    assert_eq!(parsed.clean_subject, "Hello");
}

#[test]
fn test_tag_only() {
    let parsed = parse_subject("#acme");
    assert_eq!(parsed.tag, "acme");
    assert_eq!(parsed.clean_subject, "");
}

#[test]
fn test_empty_subject() {
    let parsed = parse_subject("");
    assert_eq!(parsed.tag, "missing");
    assert_eq!(parsed.clean_subject, "");
}

#[test]
fn test_prefix_needs_colon() {
    assert_eq!(strip_forward_prefixes("Reports for Q1"), "Reports for Q1");
    assert_eq!(strip_forward_prefixes("Forward planning"), "Forward planning");
}

#[test]
fn test_sanitize_tag() {
    assert_eq!(sanitize_tag("Foo.Bar_42"), "foobar42");
    assert_eq!(sanitize_tag("!!!"), MISSING_TAG);
}
