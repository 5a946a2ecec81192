//! Path and query string helpers

/// Percent-encode a value for use as a single path segment
pub fn encode_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Append encoded query parameters to a path or URL
///
/// Uses `&` when the target already carries a query string.
pub fn append_query(target: &str, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return target.to_string();
    }

    let query = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let separator = if target.contains('?') { "&" } else { "?" };
    format!("{}{}{}", target, separator, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_append_query_empty() {
        assert_eq!(append_query("/environments", &[]), "/environments");
    }

    #[test]
    fn test_append_query_encodes() {
        let url = append_query(
            "/features",
            &[pair("tags", "v1,beta"), pair("search", "dark mode")],
        );
        assert_eq!(url, "/features?tags=v1%2Cbeta&search=dark%20mode");
    }

    #[test]
    fn test_append_query_existing_separator() {
        let url = append_query("/rules?page=1", &[pair("per_page", "50")]);
        assert_eq!(url, "/rules?page=1&per_page=50");
    }

    #[test]
    fn test_encode_segment_crn() {
        let crn = "crn:v1:bluemix:public:internet-svcs:global:a/123::";
        let encoded = encode_segment(crn);
        assert!(!encoded.contains(':'));
        assert!(!encoded.contains('/'));
    }
}
