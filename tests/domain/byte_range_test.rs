use url_archiver::domain::ByteRange;

#[test]
fn given_open_ended_range_when_parsing_then_returns_start() {
    assert_eq!(ByteRange::parse("bytes=5-"), Some(ByteRange::From(5)));
}

#[test]
fn given_closed_range_when_parsing_then_end_is_ignored() {
    assert_eq!(ByteRange::parse("bytes=5-10"), Some(ByteRange::From(5)));
}

#[test]
fn given_multiple_ranges_when_parsing_then_only_first_is_kept() {
    assert_eq!(
        ByteRange::parse("bytes=100-199, 500-"),
        Some(ByteRange::From(100))
    );
}

#[test]
fn given_uppercase_unit_when_parsing_then_is_accepted() {
    assert_eq!(ByteRange::parse("BYTES=3-"), Some(ByteRange::From(3)));
}

#[test]
fn given_suffix_range_when_resolving_start_then_counts_from_end() {
    let range = ByteRange::parse("bytes=-100").unwrap();

    assert_eq!(range, ByteRange::Suffix(100));
    assert_eq!(range.start_offset(1000), 900);
    assert_eq!(range.start_offset(40), 0);
}

#[test]
fn given_inverted_range_when_parsing_then_returns_none() {
    assert_eq!(ByteRange::parse("bytes=10-5"), None);
}

#[test]
fn given_malformed_headers_when_parsing_then_returns_none() {
    for header in ["items=0-", "bytes", "bytes=abc-", "bytes=-", "", "bytes=1-x"] {
        assert_eq!(ByteRange::parse(header), None, "header {:?}", header);
    }
}

#[test]
fn given_start_past_end_when_resolving_then_offset_is_unchanged() {
    assert_eq!(ByteRange::From(500).start_offset(100), 500);
}
