use email_archive::strip_forward_headers;

#[test]
fn test_strips_gmail_block() {
    let body = "FYI\n\n\
                ---------- Forwarded message ---------\n\
                From: Jane Client <jane@acme.com>\n\
                Date: Mon, Dec 9, 2024 at 10:30 AM\n\
                Subject: Q4 Invoice\n\
                To: Me <me@mine.com>\n\n\
                Please find the invoice attached.";

    assert_eq!(
        strip_forward_headers(body),
        "FYI\n\nPlease find the invoice attached."
    );
}

#[test]
fn test_strips_outlook_block() {
    let body = "See below\n\
                ________________________________\n\
                From: Client <client@corp.com>\n\
                Sent: Tuesday, December 10, 2024 9:00 AM\n\
                To: Me <me@mine.com>\n\
                Cc: Boss <boss@mine.com>\n\
                Subject: Contract\n\
                \n\
                Please sign.";

    assert_eq!(strip_forward_headers(body), "See below\n\nPlease sign.");
}

#[test]
fn test_strips_apple_mail_and_original_message() {
    let body = "Begin forwarded message:\n\n\
                From: Jane <jane@example.com>\n\
                Subject: Hello\n\n\
                First body\n\n\
                -----Original Message-----\n\
                From: Bob <bob@example.com>\n\
                Sent: Monday, December 9, 2024 3:05 PM\n\n\
                Second body";

    assert_eq!(strip_forward_headers(body), "First body\n\nSecond body");
}

#[test]
fn test_strips_reply_attribution_anywhere() {
    let body = "Agreed.\n\n\
                On Mon, Dec 9, 2024 at 10:30 AM Client <client@corp.com> wrote:\n\
                > Shall we proceed?";

    assert_eq!(strip_forward_headers(body), "Agreed.\n\n> Shall we proceed?");
}

#[test]
fn test_strips_unmarked_header_run() {
    let body = "Hello\n\n\
                From: Someone <someone@example.com>\n\
                Date: Mon, Dec 9, 2024 at 10:30 AM\n\
                Subject: Thing\n\n\
                Body";

    assert_eq!(strip_forward_headers(body), "Hello\n\nBody");
}

#[test]
fn test_keeps_lone_from_line() {
    let body = "From: the desk of the CEO\nwe have news";
    assert_eq!(strip_forward_headers(body), body);
}

#[test]
fn test_unrecognized_text_passes_through() {
    let body = "Line one\nLine two\n\nParagraph two";
    assert_eq!(strip_forward_headers(body), body);
}

#[test]
fn test_marker_without_fields() {
    let body = "Intro\n---------- Forwarded message ---------\nBody text";
    assert_eq!(strip_forward_headers(body), "Intro\nBody text");
}

#[test]
fn test_idempotent_on_tricky_input() {
    let body = "From: a@example.com\n\
                On Mon, Dec 9, 2024 at 10:30 AM X <x@example.com> wrote:\n\
                Date: Mon, Dec 9, 2024 at 10:30 AM\n\
                text";

    let once = strip_forward_headers(body);
    assert_eq!(strip_forward_headers(&once), once);
    assert_eq!(once, "text");
}

#[test]
fn test_empty() {
    assert_eq!(strip_forward_headers(""), "");
}

#[test]
fn test_text_without_headers_is_byte_identical() {
    let body = "Line one\n\n\n\nLine two   \n";
    assert_eq!(strip_forward_headers(body), body);

    let indented = "\n\n  leading blank lines\t\n\n\n";
    assert_eq!(strip_forward_headers(indented), indented);
}

#[test]
fn test_only_seams_are_tidied() {
    let body = "Keep   \n\n\nthis\n\n\
                ---------- Forwarded message ---------\n\
                From: Jane <jane@acme.com>\n\n\n\
                Body   ";

    assert_eq!(strip_forward_headers(body), "Keep   \n\n\nthis\n\nBody   ");
}

#[test]
fn test_fenced_code_untouched() {
    let body = "```\n\
                From: Bot <bot@ci.dev>\n\
                To: Team <team@ci.dev>\n\
                On Mon, Dec 9, 2024 at 10:30 AM X <x@example.com> wrote:\n\
                ---------- Forwarded message ---------\n\
                ```\n\
                From: Jane <jane@acme.com>\n\
                Date: Mon, Dec 9, 2024 at 10:30 AM\n\
                after";

    assert_eq!(
        strip_forward_headers(body),
        "```\n\
         From: Bot <bot@ci.dev>\n\
         To: Team <team@ci.dev>\n\
         On Mon, Dec 9, 2024 at 10:30 AM X <x@example.com> wrote:\n\
         ---------- Forwarded message ---------\n\
         ```\n\
         after"
    );
}

#[test]
fn test_prose_is_not_a_wrapped_attribution() {
    let body = "On Monday we met.\nShe wrote:\nthe plan";
    assert_eq!(strip_forward_headers(body), body);
}

#[test]
fn test_wrapped_attribution_with_address() {
    let body = "Agreed.\n\n\
                On Mon, Dec 9, 2024 at 10:30 AM Client <\n\
                client@corp.com> wrote:\n\
                > Shall we proceed?";

    assert_eq!(strip_forward_headers(body), "Agreed.\n\n> Shall we proceed?");
}
