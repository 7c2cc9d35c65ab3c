//! Form builder and the built form.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use formwire_router::{FormData, Method, Request, Response};
use ironhtml::html;
use tracing::debug;

use crate::error::{BoxError, FormError, Result, SubmissionError, ValidationErrors};
use crate::fields::{
    CheckboxOptions, DateOptions, FieldKind, FieldSpec, FileOptions, NumberOptions, RangeOptions,
    SelectOptions, TextOptions,
};
use crate::path::{ActionTemplate, PathParam};
use crate::pipeline::{ErrorHandler, Pipeline, RouteTarget, SideEffect, SuccessHandler};
use crate::schema::Schema;
use crate::value::{FieldValue, ValidatedData};
use crate::widgets::render_field;

/// Values used to render a form: path parameters and current field values.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Values for the path template's parameters.
    pub url_params: HashMap<String, String>,
    /// Current field values, by field name.
    pub values: HashMap<String, FieldValue>,
}

impl RenderOptions {
    /// Creates empty render options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a path parameter.
    #[must_use]
    pub fn url_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.url_params.insert(name.into(), value.into());
        self
    }

    /// Sets a field's current value.
    #[must_use]
    pub fn value(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Uses every value of a validated record as a current value.
    #[must_use]
    pub fn values_from(mut self, data: &ValidatedData) -> Self {
        self.values.extend(
            data.iter()
                .map(|(name, value)| (name.to_string(), value.clone())),
        );
        self
    }
}

/// Builder for forms.
///
/// Fields render and validate in the order they are added. Both an error
/// handler and a success handler must be set before [`FormBuilder::build`].
pub struct FormBuilder {
    path: String,
    method: Method,
    fields: Vec<FieldSpec>,
    submit_label: String,
    side_effect: Option<SideEffect>,
    on_success: Option<SuccessHandler>,
    on_error: Option<ErrorHandler>,
}

impl std::fmt::Debug for FormBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormBuilder")
            .field("path", &self.path)
            .field("method", &self.method)
            .field("fields", &self.fields)
            .field("submit_label", &self.submit_label)
            .finish_non_exhaustive()
    }
}

impl FormBuilder {
    /// Creates a builder for a form posted to `path`.
    ///
    /// `path` may contain `:name` and `:name{regex}` parameters.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: Method::Post,
            fields: Vec::new(),
            submit_label: "Submit".to_string(),
            side_effect: None,
            on_success: None,
            on_error: None,
        }
    }

    /// Sets the HTTP method, GET or POST. GET forms read their values from the
    /// query string.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Adds a field declaration.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    fn labelled(self, name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        self.field(FieldSpec::new(name, label, kind))
    }

    /// Adds a text field.
    #[must_use]
    pub fn add_text(
        self,
        name: impl Into<String>,
        label: impl Into<String>,
        options: TextOptions,
    ) -> Self {
        self.labelled(name, label, FieldKind::Text(options))
    }

    /// Adds a URL field.
    #[must_use]
    pub fn add_url(
        self,
        name: impl Into<String>,
        label: impl Into<String>,
        options: TextOptions,
    ) -> Self {
        self.labelled(name, label, FieldKind::Url(options))
    }

    /// Adds an email field.
    #[must_use]
    pub fn add_email(
        self,
        name: impl Into<String>,
        label: impl Into<String>,
        options: TextOptions,
    ) -> Self {
        self.labelled(name, label, FieldKind::Email(options))
    }

    /// Adds a password field.
    #[must_use]
    pub fn add_password(
        self,
        name: impl Into<String>,
        label: impl Into<String>,
        options: TextOptions,
    ) -> Self {
        self.labelled(name, label, FieldKind::Password(options))
    }

    /// Adds a telephone field.
    #[must_use]
    pub fn add_tel(
        self,
        name: impl Into<String>,
        label: impl Into<String>,
        options: TextOptions,
    ) -> Self {
        self.labelled(name, label, FieldKind::Tel(options))
    }

    /// Adds a number field.
    #[must_use]
    pub fn add_number(
        self,
        name: impl Into<String>,
        label: impl Into<String>,
        options: NumberOptions,
    ) -> Self {
        self.labelled(name, label, FieldKind::Number(options))
    }

    /// Adds a range (slider) field.
    #[must_use]
    pub fn add_range(
        self,
        name: impl Into<String>,
        label: impl Into<String>,
        options: RangeOptions,
    ) -> Self {
        self.labelled(name, label, FieldKind::Range(options))
    }

    /// Adds a date field.
    #[must_use]
    pub fn add_date(
        self,
        name: impl Into<String>,
        label: impl Into<String>,
        options: DateOptions,
    ) -> Self {
        self.labelled(name, label, FieldKind::Date(options))
    }

    /// Adds a checkbox.
    #[must_use]
    pub fn add_checkbox(
        self,
        name: impl Into<String>,
        label: impl Into<String>,
        options: CheckboxOptions,
    ) -> Self {
        self.labelled(name, label, FieldKind::Checkbox(options))
    }

    /// Adds a file upload field.
    #[must_use]
    pub fn add_file(
        self,
        name: impl Into<String>,
        label: impl Into<String>,
        options: FileOptions,
    ) -> Self {
        self.labelled(name, label, FieldKind::File(options))
    }

    /// Adds a select field.
    #[must_use]
    pub fn add_select(
        self,
        name: impl Into<String>,
        label: impl Into<String>,
        options: SelectOptions,
    ) -> Self {
        self.labelled(name, label, FieldKind::Select(options))
    }

    /// Adds a color field.
    #[must_use]
    pub fn add_color(self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.labelled(name, label, FieldKind::Color)
    }

    /// Adds a hidden field.
    #[must_use]
    pub fn add_hidden(self, name: impl Into<String>) -> Self {
        self.field(FieldSpec::hidden(name))
    }

    /// Sets the submit button text.
    #[must_use]
    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    /// Sets the callback run with the validated record before the success
    /// handler. An error it returns is handed to the error handler.
    #[must_use]
    pub fn side_effect<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Request, ValidatedData) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<(), BoxError>> + Send + 'static,
    {
        self.side_effect = Some(Arc::new(move |req, data| Box::pin(f(req, data))));
        self
    }

    /// Sets the handler producing the response for accepted submissions.
    #[must_use]
    pub fn on_success<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.on_success = Some(Arc::new(move |req| Box::pin(f(req))));
        self
    }

    /// Sets the handler producing the response for rejected submissions.
    #[must_use]
    pub fn on_error<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Request, SubmissionError) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.on_error = Some(Arc::new(move |req, err| Box::pin(f(req, err))));
        self
    }

    /// Freezes the declaration into a [`Form`].
    ///
    /// # Errors
    ///
    /// Fails, in this order, when the error handler or success handler is
    /// missing, the method is not GET or POST, a select has no options, two fields share a name, a field
    /// pattern is not a valid regex, or a path constraint is not a valid regex.
    pub fn build(self) -> Result<Form> {
        let on_error = self.on_error.ok_or(FormError::MissingErrorHandler)?;
        let on_success = self.on_success.ok_or(FormError::MissingSuccessHandler)?;

        if !matches!(self.method, Method::Get | Method::Post) {
            return Err(FormError::UnsupportedMethod(self.method));
        }

        for field in &self.fields {
            if let FieldKind::Select(options) = &field.kind {
                if options.options.is_empty() {
                    return Err(FormError::EmptySelect(field.name.clone()));
                }
            }
        }
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(FormError::DuplicateField(field.name.clone()));
            }
        }

        let schema = Arc::new(Schema::compile(&self.fields)?);
        let template = ActionTemplate::compile(&self.path)?;

        debug!(
            path = %self.path,
            method = %self.method,
            fields = self.fields.len(),
            "Built form"
        );

        Ok(Form {
            inner: Arc::new(FormInner {
                template,
                fields: self.fields,
                submit_label: self.submit_label,
                pipeline: Arc::new(Pipeline {
                    method: self.method,
                    schema,
                    side_effect: self.side_effect,
                    on_success,
                    on_error,
                }),
            }),
        })
    }
}

struct FormInner {
    template: ActionTemplate,
    fields: Vec<FieldSpec>,
    submit_label: String,
    pipeline: Arc<Pipeline>,
}

/// A built form: immutable and cheap to clone across request handlers.
#[derive(Clone)]
pub struct Form {
    inner: Arc<FormInner>,
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("path", &self.path_template())
            .field("method", &self.method())
            .field("fields", &self.inner.fields)
            .finish_non_exhaustive()
    }
}

impl Form {
    /// Returns the path template.
    pub fn path_template(&self) -> &str {
        self.inner.template.template()
    }

    /// Returns the parameters of the path template.
    pub fn path_params(&self) -> &[PathParam] {
        self.inner.template.params()
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> Method {
        self.inner.pipeline.method
    }

    /// Returns the field declarations in order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.inner.fields
    }

    /// Renders the form element.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingPathParameters`] or
    /// [`FormError::InvalidPathParameters`] when the action URL cannot be
    /// built, and [`FormError::UnsupportedValueType`] when a current value
    /// cannot be shown by its field.
    pub fn render(&self, options: &RenderOptions) -> Result<String> {
        let action = self.inner.template.resolve(&options.url_params)?;
        let multipart = self
            .inner
            .fields
            .iter()
            .any(|f| matches!(f.kind, FieldKind::File(_)));

        let action = action.as_str();
        let method = self.method().as_str();
        let mut form = html! { form.action(#action).method(#method) }
            .when(multipart, |f| f.attr("enctype", "multipart/form-data"));
        for field in &self.inner.fields {
            form = form.raw(render_field(field, options.values.get(&field.name))?);
        }

        let label = self.inner.submit_label.as_str();
        let button = html! {
            button.type_("submit") { #label }
        };
        Ok(form.raw(button.render()).render())
    }

    /// Registers the submission handler for this form's method and path.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Route`] if the router rejects the path.
    pub fn register_route<R: RouteTarget + ?Sized>(&self, router: &mut R) -> Result<()> {
        let handler = Arc::clone(&self.inner.pipeline).into_handler();
        router.register(self.method(), self.path_template(), handler)?;
        debug!(path = %self.path_template(), method = %self.method(), "Registered form route");
        Ok(())
    }

    /// Runs the form's validator on a raw submission.
    ///
    /// # Errors
    ///
    /// Returns every failing field with its messages.
    pub fn validate(&self, raw: &FormData) -> std::result::Result<ValidatedData, ValidationErrors> {
        self.inner.pipeline.schema.validate(raw)
    }
}
