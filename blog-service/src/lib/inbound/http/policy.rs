/// Paths that skip the bearer-token check.
///
/// A pattern is either an exact path (`/api/login`) or a prefix ending in
/// `/*`. `/api/public/*` matches `/api/public/x` but not `/api/public`.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    exact: Vec<String>,
    prefixes: Vec<String>,
}

impl AccessPolicy {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut policy = Self::default();

        for pattern in patterns.into_iter().map(Into::into) {
            match pattern.strip_suffix('*') {
                Some(prefix) if prefix.ends_with('/') => policy.prefixes.push(prefix.to_string()),
                _ => policy.exact.push(pattern),
            }
        }

        policy
    }

    /// Whether `path` (without query string) may be served without a token.
    pub fn is_exempt(&self, path: &str) -> bool {
        self.exact.iter().any(|p| p == path)
            || self
                .prefixes
                .iter()
                .any(|p| path.len() > p.len() && path.starts_with(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_patterns() {
        let policy = AccessPolicy::new(["/api/login", "/api/register"]);

        assert!(policy.is_exempt("/api/login"));
        assert!(policy.is_exempt("/api/register"));
        assert!(!policy.is_exempt("/api/login/extra"));
        assert!(!policy.is_exempt("/api/posts"));
        assert!(!policy.is_exempt("/API/LOGIN"));
    }

    #[test]
    fn test_prefix_patterns() {
        let policy = AccessPolicy::new(["/api/public/*"]);

        assert!(policy.is_exempt("/api/public/x"));
        assert!(policy.is_exempt("/api/public/a/b"));
        assert!(!policy.is_exempt("/api/public"));
        assert!(!policy.is_exempt("/api/public/"));
        assert!(!policy.is_exempt("/api/publicity"));
    }

    #[test]
    fn test_empty_policy_exempts_nothing() {
        let policy = AccessPolicy::new(Vec::<String>::new());
        assert!(!policy.is_exempt("/api/login"));
    }
}
