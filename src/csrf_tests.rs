#[cfg(test)]
mod tests {
    use crate::csrf::{issue_token, validate_token};

    #[test]
    fn test_issued_tokens_are_unique_and_urlsafe() {
        let first = issue_token();
        let second = issue_token();
        assert_ne!(first, second);
        assert!(first
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        // 32 bytes base64url without padding
        assert_eq!(first.len(), 43);
    }

    #[test]
    fn test_matching_tokens_validate() {
        let token = issue_token();
        assert!(validate_token(&token, Some(&token)));
    }

    #[test]
    fn test_mismatched_tokens_rejected() {
        assert!(!validate_token(&issue_token(), Some(&issue_token())));
    }

    #[test]
    fn test_missing_header_rejected() {
        assert!(!validate_token(&issue_token(), None));
    }

    #[test]
    fn test_empty_tokens_rejected() {
        assert!(!validate_token("", Some("")));
        assert!(!validate_token("abc", Some("")));
        assert!(!validate_token("", Some("abc")));
    }
}
