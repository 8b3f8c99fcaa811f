//! Query string rebuilding for pagination links.

use url::form_urlencoded;

/// Re-encodes `raw` without the parameter `excluded`.
///
/// Keeps the original parameter order and the first value of each repeated
/// key. The result is prefixed with `&` so it can be appended after
/// `page=N`; an empty string is returned when nothing remains.
///
/// # Examples
///
/// ```
/// use user_api::utils::query_string::query_without;
///
/// assert_eq!(query_without(Some("page=2&per_page=10"), "page"), "&per_page=10");
/// assert_eq!(query_without(Some("page=2"), "page"), "");
/// assert_eq!(query_without(None, "page"), "");
/// ```
pub fn query_without(raw: Option<&str>, excluded: &str) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let mut seen: Vec<String> = Vec::new();
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        if key.is_empty() || key == excluded || seen.iter().any(|k| *k == key) {
            continue;
        }
        serializer.append_pair(&key, &value);
        seen.push(key.into_owned());
    }

    let rest = serializer.finish();
    if rest.is_empty() {
        rest
    } else {
        format!("&{rest}")
    }
}
