use url::Url;

const REDACTED: &str = "[REDACTED]";

const SENSITIVE_QUERY_KEYS: [&str; 7] = [
    "token",
    "key",
    "api_key",
    "password",
    "secret",
    "signature",
    "sig",
];

/// Renders a URL for logs with credentials and secret query values masked.
pub fn redact_url(url: &Url) -> String {
    let mut redacted = url.clone();

    if redacted.password().is_some() {
        let _ = redacted.set_password(Some(REDACTED));
    }

    if redacted.query().is_some() {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                let value = if is_sensitive(&k) {
                    REDACTED.to_string()
                } else {
                    v.into_owned()
                };
                (k.into_owned(), value)
            })
            .collect();
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }

    redacted.to_string()
}

/// Like [`redact_url`] for raw input that may not parse.
pub fn redact_url_str(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => redact_url(&url),
        Err(_) => String::from("[UNPARSEABLE URL]"),
    }
}

fn is_sensitive(key: &str) -> bool {
    SENSITIVE_QUERY_KEYS
        .iter()
        .any(|k| key.eq_ignore_ascii_case(k))
}
