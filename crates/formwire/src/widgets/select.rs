//! Select rendering.

use super::{html_escape, labelled, unsupported, WidgetAttrs};
use crate::error::Result;
use crate::fields::{FieldSpec, SelectOptions};
use crate::value::{format_number, FieldValue};

pub(super) fn render_select(
    field: &FieldSpec,
    options: &SelectOptions,
    value: Option<&FieldValue>,
) -> Result<String> {
    let selected = value
        .map(|value| selected_values(field, value))
        .transpose()?
        .unwrap_or_default();
    let is_selected = |choice: &str| selected.iter().any(|s| s == choice);

    let mut attrs = WidgetAttrs::new().with("name", &field.name);
    if !options.optional {
        attrs.flag("required");
    }

    let mut html = format!("<select {}>", attrs.to_html());

    // An empty placeholder renders no option.
    let placeholder = options.placeholder.as_deref().filter(|p| !p.is_empty());
    if let Some(placeholder) = placeholder {
        if !selected.iter().any(|s| options.contains(s)) {
            html.push_str(&format!(
                "<option value disabled selected>{}</option>",
                html_escape(placeholder)
            ));
        }
    }

    for option in &options.options {
        html.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            html_escape(&option.value),
            if is_selected(&option.value) { " selected" } else { "" },
            html_escape(&option.label)
        ));
    }

    html.push_str("</select>");
    Ok(labelled(field, &html))
}

/// Flattens a current value into the option values it selects.
fn selected_values(field: &FieldSpec, value: &FieldValue) -> Result<Vec<String>> {
    match value {
        FieldValue::Text(text) => Ok(vec![text.clone()]),
        FieldValue::Number(n) => Ok(vec![format_number(*n)]),
        FieldValue::List(items) => items
            .iter()
            .map(|item| match item {
                FieldValue::Text(text) => Ok(text.clone()),
                FieldValue::Number(n) => Ok(format_number(*n)),
                other => Err(unsupported(field, other)),
            })
            .collect(),
        other => Err(unsupported(field, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;
    use crate::fields::FieldKind;
    use crate::widgets::render_field;

    fn country(options: SelectOptions) -> FieldSpec {
        FieldSpec::new("country", "Country", FieldKind::Select(options))
    }

    #[test]
    fn test_select_with_placeholder() {
        let field = country(
            SelectOptions::new([("us", "USA"), ("ca", "Canada")]).placeholder("Pick one"),
        );
        assert_eq!(
            render_field(&field, None).unwrap(),
            concat!(
                r#"<label>Country:<select name="country" required>"#,
                r#"<option value disabled selected>Pick one</option>"#,
                r#"<option value="us">USA</option><option value="ca">Canada</option>"#,
                "</select></label>"
            )
        );
    }

    #[test]
    fn test_select_empty_placeholder_is_skipped() {
        let field = country(SelectOptions::new([("us", "USA")]).placeholder(""));
        assert_eq!(
            render_field(&field, None).unwrap(),
            concat!(
                r#"<label>Country:<select name="country" required>"#,
                r#"<option value="us">USA</option>"#,
                "</select></label>"
            )
        );
    }

    #[test]
    fn test_select_current_value_hides_placeholder() {
        let field = country(
            SelectOptions::new([("us", "USA"), ("ca", "Canada")])
                .optional()
                .placeholder("Pick one"),
        );
        let html = render_field(&field, Some(&FieldValue::from("ca"))).unwrap();
        assert_eq!(
            html,
            concat!(
                r#"<label>Country:<select name="country">"#,
                r#"<option value="us">USA</option><option value="ca" selected>Canada</option>"#,
                "</select></label>"
            )
        );
    }

    #[test]
    fn test_select_multiple_values() {
        let field = country(SelectOptions::new([("us", "USA"), ("ca", "Canada"), ("mx", "Mexico")]));
        let html = render_field(&field, Some(&FieldValue::from(vec!["us", "mx"]))).unwrap();
        assert!(html.contains(r#"<option value="us" selected>"#));
        assert!(html.contains(r#"<option value="ca">"#));
        assert!(html.contains(r#"<option value="mx" selected>"#));
    }

    #[test]
    fn test_select_rejects_boolean() {
        let field = country(SelectOptions::new([("us", "USA")]));
        let err = render_field(&field, Some(&FieldValue::Bool(true))).unwrap_err();
        assert!(matches!(err, FormError::UnsupportedValueType { kind: "boolean", .. }));
    }
}
