//! Path pattern matching.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, RouterError};
use crate::request::PathParams;

/// Matches one `:name` or `:name{constraint}` token.
static PARAM_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":([a-zA-Z_][a-zA-Z0-9_]*)(?:\{([^}]+)\})?").expect("valid parameter token regex")
});

/// A compiled path pattern for matching URLs.
#[derive(Debug, Clone)]
pub struct PathPattern {
    /// The original pattern string.
    pattern: String,
    /// Compiled regex for matching.
    regex: Regex,
    /// Parameter names in order of appearance.
    param_names: Vec<String>,
}

impl PathPattern {
    /// Parses a path pattern string.
    ///
    /// Pattern syntax:
    /// - `/users` - Literal path
    /// - `/users/:id` - Path with parameter (matches one segment)
    /// - `/items/:id{\d+}` - Parameter constrained by a regex fragment
    ///
    /// # Example
    ///
    /// ```
    /// use formwire_router::PathPattern;
    ///
    /// let pattern = PathPattern::parse(r"/posts/:id{\d+}/comments/:comment_id").unwrap();
    /// let params = pattern.match_path("/posts/123/comments/456").unwrap();
    /// assert_eq!(params.get("id"), Some("123"));
    /// assert_eq!(params.get("comment_id"), Some("456"));
    /// assert!(pattern.match_path("/posts/abc/comments/456").is_none());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] if a constraint is not a valid regex.
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut param_names = Vec::new();
        let mut regex_str = String::from("^");
        let mut last = 0;

        for caps in PARAM_TOKEN.captures_iter(pattern) {
            let Some(token) = caps.get(0) else { continue };
            regex_str.push_str(&regex::escape(&pattern[last..token.start()]));

            // Group names are positional so repeated parameter names stay legal.
            let group = format!("p{}", param_names.len());
            match caps.get(2) {
                Some(constraint) => {
                    regex_str.push_str(&format!("(?P<{group}>(?:{}))", constraint.as_str()));
                }
                None => regex_str.push_str(&format!("(?P<{group}>[^/]+)")),
            }
            param_names.push(caps[1].to_string());
            last = token.end();
        }

        regex_str.push_str(&regex::escape(&pattern[last..]));
        if !regex_str.ends_with('/') {
            regex_str.push_str("/?");
        }
        regex_str.push('$');

        let regex = Regex::new(&regex_str).map_err(|source| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            param_names,
        })
    }

    /// Parses a path pattern, panicking on an invalid constraint.
    ///
    /// # Panics
    ///
    /// Panics if the pattern contains a constraint that is not a valid regex.
    pub fn new(pattern: &str) -> Self {
        Self::parse(pattern).expect("Invalid path pattern regex")
    }

    /// Attempts to match a path against this pattern.
    ///
    /// Returns extracted parameters if the path matches.
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        let caps = self.regex.captures(path)?;

        let mut params = PathParams::new();

        for (i, name) in self.param_names.iter().enumerate() {
            if let Some(value) = caps.name(&format!("p{i}")) {
                params.insert(name.clone(), value.as_str().to_string());
            }
        }

        Some(params)
    }

    /// Returns the original pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the parameter names.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }
}
