//! HTML rendering for individual fields.
//!
//! Each field kind projects its options onto a fixed attribute order, so the
//! same declaration always yields the same markup.

mod select;

use ironhtml::typed::Element;
use ironhtml_elements::Label;

use crate::error::{FormError, Result};
use crate::fields::{FieldKind, FieldSpec};
use crate::value::{format_number, FieldValue};

/// Attributes that can be applied to a widget, kept in insertion order.
///
/// Boolean attributes such as `required` carry no value.
#[derive(Debug, Clone, Default)]
pub struct WidgetAttrs {
    /// HTML attributes.
    pub attrs: Vec<(String, Option<String>)>,
}

impl WidgetAttrs {
    /// Creates new empty widget attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing an earlier value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(key.into(), Some(value.into()));
    }

    /// Sets a boolean attribute.
    pub fn flag(&mut self, key: impl Into<String>) {
        self.insert(key.into(), None);
    }

    fn insert(&mut self, key: String, value: Option<String>) {
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((key, value)),
        }
    }

    /// Gets an attribute value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Returns whether an attribute is present.
    pub fn contains(&self, key: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == key)
    }

    /// Renders attributes as an HTML attribute string.
    pub fn to_html(&self) -> String {
        self.attrs
            .iter()
            .map(|(k, v)| match v {
                Some(v) => format!(r#"{k}="{}""#, html_escape(v)),
                None => k.clone(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder method to set a boolean attribute.
    #[must_use]
    pub fn with_flag(mut self, key: impl Into<String>) -> Self {
        self.flag(key);
        self
    }
}

/// Renders one field, wrapped in its label unless hidden.
///
/// # Errors
///
/// Returns [`FormError::UnsupportedValueType`] if `value` cannot be shown by
/// this kind of field.
pub fn render_field(field: &FieldSpec, value: Option<&FieldValue>) -> Result<String> {
    match &field.kind {
        FieldKind::Hidden => render_hidden(field, value),
        FieldKind::Select(options) => select::render_select(field, options, value),
        _ => render_input(field, value),
    }
}

fn render_hidden(field: &FieldSpec, value: Option<&FieldValue>) -> Result<String> {
    let mut attrs = WidgetAttrs::new()
        .with("type", "hidden")
        .with("name", &field.name);
    if let Some(value) = value {
        let text = match value {
            FieldValue::Bool(b) => b.to_string(),
            other => scalar_text(field, other)?,
        };
        attrs.set("value", text);
    }
    Ok(format!("<input {}>", attrs.to_html()))
}

fn render_input(field: &FieldSpec, value: Option<&FieldValue>) -> Result<String> {
    let mut attrs = WidgetAttrs::new()
        .with("type", field.kind.input_type())
        .with("name", &field.name);

    match &field.kind {
        FieldKind::Number(o) => number_attrs(&mut attrs, o.integer, o.min, o.max),
        FieldKind::Range(o) => number_attrs(&mut attrs, o.integer, o.min, o.max),
        FieldKind::Date(o) => {
            if let Some(min) = o.min {
                attrs.set("min", min.format("%Y-%m-%d").to_string());
            }
            if let Some(max) = o.max {
                attrs.set("max", max.format("%Y-%m-%d").to_string());
            }
        }
        kind => {
            if let Some(o) = kind.text_options() {
                if let Some(min) = o.min_length {
                    attrs.set("minlength", min.to_string());
                }
                if let Some(max) = o.max_length {
                    attrs.set("maxlength", max.to_string());
                }
                if let Some(pattern) = &o.pattern {
                    attrs.set("pattern", pattern);
                }
                if let Some(placeholder) = &o.placeholder {
                    attrs.set("placeholder", placeholder);
                }
            }
        }
    }

    if !field.is_optional() {
        attrs.flag("required");
    }

    match (&field.kind, value) {
        (FieldKind::Password(_) | FieldKind::File(_), _) | (_, None) => {}
        (FieldKind::Checkbox(_), Some(value)) => {
            if is_truthy(field, value)? {
                attrs.flag("checked");
            }
        }
        (_, Some(FieldValue::Bool(checked))) => {
            if *checked {
                attrs.flag("checked");
            }
        }
        (_, Some(value)) => attrs.set("value", scalar_text(field, value)?),
    }

    if let FieldKind::File(o) = &field.kind {
        if let Some(accept) = &o.accept {
            attrs.set("accept", accept);
        }
    }

    Ok(labelled(field, &format!("<input {}>", attrs.to_html())))
}

/// Wraps a control in a label carrying the field's caption.
fn labelled(field: &FieldSpec, control: &str) -> String {
    let caption = format!("{}:", field.display_label());
    Element::<Label>::new().text(&caption).raw(control).render()
}

fn number_attrs(attrs: &mut WidgetAttrs, integer: bool, min: Option<f64>, max: Option<f64>) {
    if integer {
        attrs.set("step", "1");
    }
    if let Some(min) = min {
        attrs.set("min", format_number(min));
    }
    if let Some(max) = max {
        attrs.set("max", format_number(max));
    }
}

/// Projects a text, number or date value to its attribute text.
fn scalar_text(field: &FieldSpec, value: &FieldValue) -> Result<String> {
    match value {
        FieldValue::Text(text) => Ok(text.clone()),
        FieldValue::Number(n) => Ok(format_number(*n)),
        FieldValue::Date(date) => Ok(date.format("%Y-%m-%d").to_string()),
        other => Err(unsupported(field, other)),
    }
}

fn is_truthy(field: &FieldSpec, value: &FieldValue) -> Result<bool> {
    match value {
        FieldValue::Bool(b) => Ok(*b),
        FieldValue::Text(text) => Ok(!text.is_empty()),
        FieldValue::Number(n) => Ok(*n != 0.0),
        other => Err(unsupported(field, other)),
    }
}

fn unsupported(field: &FieldSpec, value: &FieldValue) -> FormError {
    FormError::UnsupportedValueType {
        field: field.name.clone(),
        kind: value.type_name(),
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
