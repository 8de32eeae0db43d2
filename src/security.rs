use subtle::ConstantTimeEq;

/// Constant-time string comparison to prevent timing attacks
/// Used for checking the inbound `X-API-Key` header against the configured key
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Check a presented API key against the configured one.
///
/// With no key configured every request is allowed.
pub fn is_authorized(configured: Option<&str>, presented: Option<&str>) -> bool {
    match (configured, presented) {
        (None, _) => true,
        (Some(expected), Some(given)) => constant_time_compare(expected, given),
        (Some(_), None) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("secret123", "secret123"));
        assert!(!constant_time_compare("secret123", "secret124"));
        assert!(!constant_time_compare("secret123", "secret12"));
        assert!(!constant_time_compare("", "secret"));
    }

    #[test]
    fn test_is_authorized_without_configured_key() {
        assert!(is_authorized(None, None));
        assert!(is_authorized(None, Some("anything")));
    }

    #[test]
    fn test_is_authorized_with_configured_key() {
        assert!(is_authorized(Some("k"), Some("k")));
        assert!(!is_authorized(Some("k"), Some("x")));
        assert!(!is_authorized(Some("k"), None));
    }
}
