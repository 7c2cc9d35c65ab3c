//! Path template parameters and action URL substitution.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{FormError, Result};

/// Matches one `:name` or `:name{constraint}` token.
static PARAM_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":([a-zA-Z_][a-zA-Z0-9_]*)(?:\{([^}]+)\})?").expect("valid parameter token regex")
});

/// A parameter token found in a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParam {
    /// Parameter name.
    pub name: String,
    /// Unanchored regex fragment the value must fully match.
    pub constraint: Option<String>,
}

/// Extracts the parameter tokens of `template`, left to right.
///
/// Repeated names are kept at each position they occur.
///
/// # Example
///
/// ```
/// use formwire::parse_path_params;
///
/// let params = parse_path_params(r"/users/:user/posts/:id{\d+}");
/// assert_eq!(params[0].name, "user");
/// assert_eq!(params[1].constraint.as_deref(), Some(r"\d+"));
/// ```
pub fn parse_path_params(template: &str) -> Vec<PathParam> {
    PARAM_TOKEN
        .captures_iter(template)
        .map(|caps| PathParam {
            name: caps[1].to_string(),
            constraint: caps.get(2).map(|c| c.as_str().to_string()),
        })
        .collect()
}

/// A path template compiled for render-time substitution.
#[derive(Debug, Clone)]
pub(crate) struct ActionTemplate {
    template: String,
    params: Vec<PathParam>,
    /// Anchored constraint regexes, aligned with `params`.
    constraints: Vec<Option<Regex>>,
}

impl ActionTemplate {
    /// Parses `template` and compiles its constraints.
    pub(crate) fn compile(template: &str) -> Result<Self> {
        let params = parse_path_params(template);
        let constraints = params
            .iter()
            .map(|param| {
                param
                    .constraint
                    .as_deref()
                    .map(|c| {
                        Regex::new(&format!("^(?:{c})$")).map_err(|source| {
                            FormError::InvalidPathConstraint {
                                param: param.name.clone(),
                                source,
                            }
                        })
                    })
                    .transpose()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            template: template.to_string(),
            params,
            constraints,
        })
    }

    pub(crate) fn template(&self) -> &str {
        &self.template
    }

    pub(crate) fn params(&self) -> &[PathParam] {
        &self.params
    }

    /// Substitutes every token with its percent-encoded value.
    ///
    /// All parameters are checked before anything is substituted: every
    /// missing name is reported first, otherwise every value that breaks its
    /// constraint.
    pub(crate) fn resolve(&self, values: &HashMap<String, String>) -> Result<String> {
        let mut missing: Vec<String> = Vec::new();
        let mut invalid: Vec<String> = Vec::new();

        for (param, constraint) in self.params.iter().zip(&self.constraints) {
            match values.get(&param.name).filter(|v| !v.is_empty()) {
                None => push_unique(&mut missing, &param.name),
                Some(value) => {
                    if constraint.as_ref().is_some_and(|re| !re.is_match(value)) {
                        push_unique(&mut invalid, &param.name);
                    }
                }
            }
        }

        if !missing.is_empty() {
            return Err(FormError::MissingPathParameters(missing));
        }
        if !invalid.is_empty() {
            return Err(FormError::InvalidPathParameters(invalid));
        }

        let resolved = PARAM_TOKEN.replace_all(&self.template, |caps: &Captures<'_>| {
            values
                .get(&caps[1])
                .map(|v| urlencoding::encode(v).into_owned())
                .unwrap_or_default()
        });
        Ok(resolved.into_owned())
    }
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_parse_params() {
        let params = parse_path_params(r"/users/:user_id/items/:id{\d+}");
        assert_eq!(
            params,
            vec![
                PathParam {
                    name: "user_id".into(),
                    constraint: None
                },
                PathParam {
                    name: "id".into(),
                    constraint: Some(r"\d+".into())
                },
            ]
        );
        assert!(parse_path_params("/static/path").is_empty());
    }

    #[test]
    fn test_parse_keeps_duplicates() {
        let params = parse_path_params("/:a/x/:a");
        assert_eq!(params.len(), 2);
        assert!(params.iter().all(|p| p.name == "a"));
    }

    #[test]
    fn test_resolve_substitutes_and_encodes() {
        let template = ActionTemplate::compile("/users/:name/edit").unwrap();
        let url = template.resolve(&values(&[("name", "John Doe/1")])).unwrap();
        assert_eq!(url, "/users/John%20Doe%2F1/edit");
    }

    #[test]
    fn test_resolve_duplicate_names() {
        let template = ActionTemplate::compile(r"/:id{\d+}/copy/:id").unwrap();
        let url = template.resolve(&values(&[("id", "7")])).unwrap();
        assert_eq!(url, "/7/copy/7");
    }

    #[test]
    fn test_missing_params_named_together() {
        let template = ActionTemplate::compile("/:org/:repo/:org").unwrap();
        let err = template.resolve(&values(&[("repo", "")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required path parameters: org, repo"
        );
    }

    #[test]
    fn test_constraint_is_full_match() {
        let template = ActionTemplate::compile(r"/items/:id{\d+}").unwrap();
        assert_eq!(
            template.resolve(&values(&[("id", "123")])).unwrap(),
            "/items/123"
        );
        let err = template.resolve(&values(&[("id", "12a")])).unwrap_err();
        assert!(matches!(err, FormError::InvalidPathParameters(ref names) if names == &["id"]));
    }

    #[test]
    fn test_missing_reported_before_invalid() {
        let template = ActionTemplate::compile(r"/:a{\d+}/:b").unwrap();
        let err = template.resolve(&values(&[("a", "x")])).unwrap_err();
        assert!(matches!(err, FormError::MissingPathParameters(_)));
    }

    #[test]
    fn test_invalid_constraint_rejected() {
        let err = ActionTemplate::compile("/items/:id{[}").unwrap_err();
        assert!(matches!(err, FormError::InvalidPathConstraint { ref param, .. } if param == "id"));
    }
}
