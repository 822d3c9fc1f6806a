use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

pub const DEFAULT_CLIENT_BASE_URL: &str = "http://localhost:3090";
pub const CLIENT_LOOKUP_ROUTE: &str = "/lookup";
pub const LOOKUP_QUERY_PARAM: &str = "url";
pub const FALLBACK_SCHEME: &str = "http://";

const ACCEPTED_SCHEMES: [&str; 2] = ["https://", "http://"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupUrlError {
    #[error("lookup url has no query string")]
    MissingQuery,
    #[error("lookup url has no `url` query parameter")]
    MissingUrlParam,
    #[error("lookup url parameter is not valid base64: {0}")]
    InvalidBase64(String),
    #[error("lookup url parameter does not decode to utf-8")]
    InvalidUtf8,
}

/// Case-sensitive, matching what the lookup endpoint accepts.
#[must_use]
pub fn has_http_scheme(site_url: &str) -> bool {
    ACCEPTED_SCHEMES
        .iter()
        .any(|scheme| site_url.starts_with(scheme))
}

/// Prepends `http://` when the entered address carries no HTTP scheme.
///
/// Plain HTTP is used because the browser extension rewrites https lookups
/// to http anyway. No other validation happens here: empty input and
/// malformed hosts pass through untouched.
#[must_use]
pub fn normalize_site_url(site_url: &str) -> String {
    if has_http_scheme(site_url) {
        site_url.to_string()
    } else {
        format!("{FALLBACK_SCHEME}{site_url}")
    }
}

#[must_use]
pub fn encode_site_url(site_url: &str) -> String {
    STANDARD.encode(site_url.as_bytes())
}

#[must_use]
pub fn lookup_url_with_base(base_url: &str, route: &str, site_url: &str) -> String {
    let site_url = normalize_site_url(site_url);
    format!(
        "{base_url}{route}?{LOOKUP_QUERY_PARAM}={}",
        encode_site_url(&site_url)
    )
}

/// URL to request from the local CENO client so it performs a lookup for
/// `site_url`.
#[must_use]
pub fn lookup_url(site_url: &str) -> String {
    lookup_url_with_base(DEFAULT_CLIENT_BASE_URL, CLIENT_LOOKUP_ROUTE, site_url)
}

/// Recovers the site URL carried by a lookup URL.
pub fn decode_lookup_url(lookup_url: &str) -> Result<String, LookupUrlError> {
    let (_, query) = lookup_url
        .split_once('?')
        .ok_or(LookupUrlError::MissingQuery)?;
    let query = query.split('#').next().unwrap_or_default();

    let encoded = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(key, value)| (key == LOOKUP_QUERY_PARAM).then_some(value))
        .ok_or(LookupUrlError::MissingUrlParam)?;

    let bytes = STANDARD
        .decode(encoded)
        .map_err(|error| LookupUrlError::InvalidBase64(error.to_string()))?;
    String::from_utf8(bytes).map_err(|_| LookupUrlError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn lookup_url_prepends_http_for_bare_hosts() {
        assert_eq!(
            lookup_url("google.ca"),
            "http://localhost:3090/lookup?url=aHR0cDovL2dvb2dsZS5jYQ=="
        );
    }

    #[test]
    fn lookup_url_keeps_existing_https_scheme() {
        assert_eq!(
            lookup_url("https://x.com"),
            "http://localhost:3090/lookup?url=aHR0cHM6Ly94LmNvbQ=="
        );
    }

    #[test]
    fn lookup_url_keeps_existing_http_scheme() {
        let url = lookup_url("http://example.org/path?q=1");
        assert_eq!(
            decode_lookup_url(&url).expect("decodable lookup url"),
            "http://example.org/path?q=1"
        );
    }

    #[test]
    fn empty_input_still_produces_a_lookup_url() {
        let url = lookup_url("");
        assert_eq!(url, "http://localhost:3090/lookup?url=aHR0cDovLw==");
    }

    #[test]
    fn scheme_match_is_case_sensitive() {
        assert_eq!(normalize_site_url("HTTPS://x.com"), "http://HTTPS://x.com");
        assert!(!has_http_scheme("ftp://x.com"));
    }

    #[test]
    fn lookup_url_with_base_uses_configured_client() {
        let url = lookup_url_with_base("http://127.0.0.1:4000", "/find", "ceno.test");
        assert!(url.starts_with("http://127.0.0.1:4000/find?url="));
        assert_eq!(
            decode_lookup_url(&url).expect("decodable lookup url"),
            "http://ceno.test"
        );
    }

    #[test]
    fn encode_site_url_handles_non_ascii_as_utf8() {
        let encoded = encode_site_url("http://пример.рф");
        let decoded = STANDARD.decode(encoded).expect("valid base64");
        assert_eq!(String::from_utf8(decoded).expect("utf8"), "http://пример.рф");
    }

    #[test]
    fn decode_lookup_url_reports_missing_parts() {
        assert_eq!(
            decode_lookup_url("http://localhost:3090/lookup"),
            Err(LookupUrlError::MissingQuery)
        );
        assert_eq!(
            decode_lookup_url("http://localhost:3090/lookup?site=abc"),
            Err(LookupUrlError::MissingUrlParam)
        );
        assert!(matches!(
            decode_lookup_url("http://localhost:3090/lookup?url=***"),
            Err(LookupUrlError::InvalidBase64(_))
        ));
    }

    quickcheck! {
        fn every_lookup_url_carries_a_scheme_qualified_site(site: String) -> bool {
            decode_lookup_url(&lookup_url(&site))
                .map(|decoded| has_http_scheme(&decoded) && decoded.ends_with(site.as_str()))
                .unwrap_or(false)
        }
    }
}
