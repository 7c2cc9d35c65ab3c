//! Compiles field declarations into one record validator.

use formwire_router::{FormData, FormPart};

use crate::error::{FormError, Result, ValidationErrors};
use crate::fields::{FieldKind, FieldSpec, TextOptions};
use crate::validation::{
    coerce_checkbox, coerce_date, coerce_number, coerce_range, ChoiceValidator, ColorValidator,
    DateRangeValidator, EmailValidator, MaxLengthValidator, MinLengthValidator, RangeValidator,
    RegexValidator, UrlValidator, Validator, EXPECTED_FILE_MESSAGE, EXPECTED_TEXT_MESSAGE,
    INVALID_DATE_MESSAGE, INVALID_NUMBER_MESSAGE, REQUIRED_MESSAGE, UNCHECKED_MESSAGE,
};
use crate::value::{FieldValue, ValidatedData};

/// How one field coerces and checks its raw value.
enum Rule {
    Text(Vec<Box<dyn Validator>>),
    Number {
        range: RangeValidator,
        coerce: fn(&str) -> Option<f64>,
    },
    Date(DateRangeValidator),
    Checkbox,
    File,
    Choice(ChoiceValidator),
    Color(ColorValidator),
    Hidden,
}

struct CompiledField {
    name: String,
    optional: bool,
    /// Whether `""` counts as not submitted.
    empty_is_absent: bool,
    rule: Rule,
}

/// The record validator for a field list, built once and shared by requests.
pub(crate) struct Schema {
    fields: Vec<CompiledField>,
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field(
                "fields",
                &self.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Schema {
    /// Compiles each declaration's rules.
    pub(crate) fn compile(specs: &[FieldSpec]) -> Result<Self> {
        let fields = specs
            .iter()
            .map(|spec| {
                Ok(CompiledField {
                    name: spec.name.clone(),
                    optional: spec.is_optional(),
                    empty_is_absent: !matches!(
                        spec.kind,
                        FieldKind::Select(_)
                            | FieldKind::Color
                            | FieldKind::Range(_)
                            | FieldKind::Checkbox(_)
                    ),
                    rule: compile_rule(spec)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { fields })
    }

    /// Validates a raw submission, collecting every failure.
    ///
    /// Only declared fields are read; anything else in `raw` is ignored.
    pub(crate) fn validate(
        &self,
        raw: &FormData,
    ) -> std::result::Result<ValidatedData, ValidationErrors> {
        let mut data = ValidatedData::new();
        let mut errors = ValidationErrors::new();

        for field in &self.fields {
            let part = raw.get(&field.name).filter(|part| match part {
                FormPart::Text(text) => !(field.empty_is_absent && text.is_empty()),
                FormPart::File(file) => !file.is_empty_selection(),
            });

            match field.check(part) {
                Ok(Some(value)) => data.insert(field.name.clone(), value),
                Ok(None) => {}
                Err(messages) => {
                    for message in messages {
                        errors.add(&field.name, message);
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(data)
        } else {
            Err(errors)
        }
    }
}

impl CompiledField {
    fn check(&self, part: Option<&FormPart>) -> std::result::Result<Option<FieldValue>, Vec<String>> {
        // Checkboxes coerce absence to false rather than failing.
        if matches!(self.rule, Rule::Checkbox) {
            let checked = coerce_checkbox(part.and_then(FormPart::as_text));
            if !self.optional && !checked {
                return Err(vec![UNCHECKED_MESSAGE.to_string()]);
            }
            return Ok(Some(FieldValue::Bool(checked)));
        }

        let Some(part) = part else {
            return if self.optional {
                Ok(None)
            } else {
                Err(vec![REQUIRED_MESSAGE.to_string()])
            };
        };

        let text = match (part, &self.rule) {
            (FormPart::File(file), Rule::File) => return Ok(Some(FieldValue::File(file.clone()))),
            (FormPart::Text(_), Rule::File) => return Err(vec![EXPECTED_FILE_MESSAGE.to_string()]),
            (FormPart::File(_), _) => return Err(vec![EXPECTED_TEXT_MESSAGE.to_string()]),
            (FormPart::Text(text), _) => text.as_str(),
        };

        match &self.rule {
            Rule::Text(validators) => {
                let messages: Vec<String> = validators
                    .iter()
                    .filter_map(|v| v.validate(text).err())
                    .collect();
                if messages.is_empty() {
                    Ok(Some(FieldValue::Text(text.to_string())))
                } else {
                    Err(messages)
                }
            }
            Rule::Number { range, coerce } => {
                let n = coerce(text).ok_or_else(|| vec![INVALID_NUMBER_MESSAGE.to_string()])?;
                let messages = range.check(n);
                if messages.is_empty() {
                    Ok(Some(FieldValue::Number(n)))
                } else {
                    Err(messages)
                }
            }
            Rule::Date(range) => {
                let date = coerce_date(text).ok_or_else(|| vec![INVALID_DATE_MESSAGE.to_string()])?;
                let messages = range.check(date);
                if messages.is_empty() {
                    Ok(Some(FieldValue::Date(date)))
                } else {
                    Err(messages)
                }
            }
            Rule::Choice(validator) => single(validator, text),
            Rule::Color(validator) => single(validator, text),
            Rule::Hidden => Ok(Some(FieldValue::Text(text.to_string()))),
            Rule::Checkbox | Rule::File => Ok(None),
        }
    }
}

fn single(
    validator: &dyn Validator,
    text: &str,
) -> std::result::Result<Option<FieldValue>, Vec<String>> {
    validator
        .validate(text)
        .map(|()| Some(FieldValue::Text(text.to_string())))
        .map_err(|message| vec![message])
}

fn compile_rule(spec: &FieldSpec) -> Result<Rule> {
    let rule = match &spec.kind {
        FieldKind::Text(options) | FieldKind::Password(options) | FieldKind::Tel(options) => {
            Rule::Text(text_validators(&spec.name, options, None)?)
        }
        FieldKind::Url(options) => Rule::Text(text_validators(
            &spec.name,
            options,
            Some(Box::new(UrlValidator::new())),
        )?),
        FieldKind::Email(options) => Rule::Text(text_validators(
            &spec.name,
            options,
            Some(Box::new(EmailValidator::new())),
        )?),
        FieldKind::Number(options) => Rule::Number {
            range: RangeValidator::new(options.min, options.max).integer(options.integer),
            coerce: coerce_number,
        },
        FieldKind::Range(options) => Rule::Number {
            range: RangeValidator::new(options.min, options.max).integer(options.integer),
            coerce: coerce_range,
        },
        FieldKind::Date(options) => Rule::Date(DateRangeValidator::new(options.min, options.max)),
        FieldKind::Checkbox(_) => Rule::Checkbox,
        FieldKind::File(_) => Rule::File,
        FieldKind::Select(options) => {
            if options.options.is_empty() {
                return Err(FormError::EmptySelect(spec.name.clone()));
            }
            Rule::Choice(ChoiceValidator::new(
                options.options.iter().map(|o| o.value.clone()),
            ))
        }
        FieldKind::Color => Rule::Color(ColorValidator::new()),
        FieldKind::Hidden => Rule::Hidden,
    };
    Ok(rule)
}

fn text_validators(
    name: &str,
    options: &TextOptions,
    format: Option<Box<dyn Validator>>,
) -> Result<Vec<Box<dyn Validator>>> {
    let mut validators: Vec<Box<dyn Validator>> = Vec::new();
    validators.extend(format);
    if let Some(min) = options.min_length {
        validators.push(Box::new(MinLengthValidator::new(min)));
    }
    if let Some(max) = options.max_length {
        validators.push(Box::new(MaxLengthValidator::new(max)));
    }
    if let Some(pattern) = &options.pattern {
        let validator = RegexValidator::new(pattern, "Enter a value in the requested format.")
            .map_err(|source| FormError::InvalidPattern {
                field: name.to_string(),
                source,
            })?;
        validators.push(Box::new(validator));
    }
    Ok(validators)
}
