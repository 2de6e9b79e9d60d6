use url::Url;

use url_archiver::domain::file_name_from_url;

fn name_of(raw: &str) -> String {
    file_name_from_url(&Url::parse(raw).unwrap())
}

#[test]
fn given_plain_file_url_when_deriving_name_then_returns_last_segment() {
    assert_eq!(name_of("http://files.test/x/data.bin"), "data.bin");
}

#[test]
fn given_query_and_fragment_when_deriving_name_then_they_are_dropped() {
    assert_eq!(
        name_of("https://files.test/docs/report.pdf?token=abc#page=2"),
        "report.pdf"
    );
}

#[test]
fn given_trailing_slash_when_deriving_name_then_uses_last_non_empty_segment() {
    assert_eq!(name_of("http://files.test/releases/latest/"), "latest");
}

#[test]
fn given_bare_host_when_deriving_name_then_falls_back_to_host() {
    assert_eq!(name_of("http://files.test"), "files.test");
}

#[test]
fn given_percent_encoded_segment_when_deriving_name_then_kept_verbatim() {
    assert_eq!(name_of("http://files.test/my%20notes.txt"), "my%20notes.txt");
}
