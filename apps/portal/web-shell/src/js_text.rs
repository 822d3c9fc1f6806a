//! Readable text for arbitrary JavaScript values. The callers extract
//! `as_string` / `JSON.stringify` / `typeof` results; nothing here assumes a
//! value is a string.

const UNKNOWN_JS_ERROR: &str = "unknown javascript error";

/// Text of a status returned by the navigation helper. Non-string results
/// (`undefined`, objects, numbers) are labelled by type and never read as
/// connected.
pub(crate) fn reported_status(text: Option<String>, js_type: &str) -> String {
    text.unwrap_or_else(|| format!("[{js_type}]"))
}

/// Best available description of a thrown value, preferring its own message
/// over its JSON form.
pub(crate) fn describe_thrown(message: Option<String>, json: Option<String>) -> String {
    message
        .or(json)
        .unwrap_or_else(|| UNKNOWN_JS_ERROR.to_string())
}
