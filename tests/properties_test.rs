use email_archive::*;
use proptest::prelude::*;

/// Lines drawn from the vocabulary that forwarding headers are made of
fn header_like_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("---------- Forwarded message ---------".to_string()),
        Just("-----Original Message-----".to_string()),
        Just("________________________________".to_string()),
        Just("Begin forwarded message:".to_string()),
        Just("From: Jane <jane@acme.com>".to_string()),
        Just("From: me@mine.com".to_string()),
        Just("Date: Mon, Dec 9, 2024 at 10:30 AM".to_string()),
        Just("Sent: Monday, December 9, 2024 10:30 AM".to_string()),
        Just("Subject: Re: Hello".to_string()),
        Just("To: Team <team@acme.com>".to_string()),
        Just("On Mon, Dec 9, 2024 at 10:30 AM Jane <jane@acme.com> wrote:".to_string()),
        Just("On Mon, Dec 9, 2024".to_string()),
        Just("Jane <jane@acme.com> wrote:".to_string()),
        Just("> quoted text".to_string()),
        Just(String::new()),
        "[a-z ]{0,20}",
    ]
}

proptest! {
    #[test]
    fn tag_is_always_well_formed(subject in ".*") {
        let parsed = parse_subject(&subject);
        let valid = parsed.tag.len() <= MAX_TAG_LEN
            && !parsed.tag.is_empty()
            && parsed.tag.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        prop_assert!(valid, "bad tag {:?}", parsed.tag);
    }

    #[test]
    fn clean_subject_has_no_forward_prefix(subject in "(#[a-z]{1,5}: )?((Fwd|FW|Re|reply): ){0,4}[A-Za-z ]{0,20}") {
        let clean = parse_subject(&subject).clean_subject;
        prop_assert_eq!(strip_forward_prefixes(&clean), clean.clone());
        prop_assert_eq!(clean.trim(), clean.as_str());
    }

    #[test]
    fn strip_is_idempotent_on_header_text(lines in prop::collection::vec(header_like_line(), 0..30)) {
        let body = lines.join("\n");
        let once = strip_forward_headers(&body);
        prop_assert_eq!(strip_forward_headers(&once), once);
    }

    #[test]
    fn strip_is_idempotent_on_any_text(body in "(?s).{0,300}") {
        let once = strip_forward_headers(&body);
        prop_assert_eq!(strip_forward_headers(&once), once);
    }

    #[test]
    fn chunk_ranges_cover_text(text in "[a-z \n]{0,400}", max in 1usize..50) {
        let ranges = chunk_ranges(&text, max);
        let mut expected_start = 0;

        for range in &ranges {
            prop_assert!(text[range.clone()].chars().count() <= max);
            prop_assert!(!range.is_empty());

            // Chunks are separated by nothing or by the one break character
            let gap = &text[expected_start..range.start];
            prop_assert!(gap.is_empty() || gap == " " || gap == "\n", "gap {:?}", gap);
            expected_start = range.end;
        }

        let tail = &text[expected_start..];
        prop_assert!(tail.is_empty() || tail == " " || tail == "\n", "tail {:?}", tail);
    }

    #[test]
    fn long_paragraph_rebuilds_from_chunks(
        words in prop::collection::vec("[a-z]{1,12}", 1..80),
        max in 12usize..60,
    ) {
        let text = words.join(" ");
        let blocks = BlockConverter::new(max).convert(&text);

        for block in &blocks {
            prop_assert!(matches!(block, Block::Paragraph { .. }), "expected paragraph block, got {:?}", block);
            prop_assert!(block.plain_text().chars().count() <= max);
        }

        let rebuilt = blocks.iter().map(Block::plain_text).collect::<Vec<_>>().join(" ");
        prop_assert_eq!(rebuilt, text);
    }
}
