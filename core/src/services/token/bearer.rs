//! Token extraction from an `Authorization` header or query value

pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract a token from a header value.
///
/// `Bearer <token>` yields `<token>`; a bare non-blank value is taken as the
/// token itself (websocket handshakes pass it that way); blank or absent
/// values yield `None`.
pub fn resolve_bearer_token(value: Option<&str>) -> Option<&str> {
    let value = value?.trim();
    let token = match value.strip_prefix(BEARER_PREFIX) {
        Some(rest) => rest.trim(),
        None if value == BEARER_PREFIX.trim_end() => "",
        None => value,
    };
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_bearer_token() {
        assert_eq!(resolve_bearer_token(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(resolve_bearer_token(Some("abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(resolve_bearer_token(Some("  Bearer  abc  ")), Some("abc"));
        assert_eq!(resolve_bearer_token(Some("Bearer ")), None);
        assert_eq!(resolve_bearer_token(Some("   ")), None);
        assert_eq!(resolve_bearer_token(None), None);
    }
}
