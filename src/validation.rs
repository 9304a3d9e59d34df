//! Declarative request validation.
//!
//! Each endpoint describes its payload as a table of [`FieldRules`]; the
//! single [`validate`] engine walks that table against an [`Input`] and
//! collects every failure into a field -> messages map. Uniqueness rules
//! consult the database through [`UniqueLookup`] so the engine itself stays
//! free of persistence details.

use std::{collections::BTreeMap, collections::HashMap, future::Future, str::FromStr};

use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidateEmail;

use crate::{
    error::{AppError, AppResult},
    storage::UploadedFile,
};

/// A single constraint on one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Present and not blank. When this fails the remaining rules of the field are skipped.
    Required,
    Email,
    /// Minimum length in characters.
    MinLength(usize),
    /// Must equal the `<field>_confirmation` input.
    Confirmed,
    Numeric,
    Integer,
    /// Minimum numeric value; only checked once the value parses as a number.
    Min(i64),
    /// Maximum numeric value.
    Max(i64),
    /// At most this many digits after the decimal point, trailing zeros ignored.
    Decimals(u32),
    /// No other row of `table` may hold the same value in `column`.
    Unique {
        table: &'static str,
        column: &'static str,
    },
    /// Must be an uploaded file with an image content type.
    Image,
    /// Allowed file extensions.
    Mimes(&'static [&'static str]),
    /// Maximum upload size in kilobytes.
    MaxKilobytes(u64),
}

impl Rule {
    /// Key used to look up a custom message override.
    pub fn key(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Email => "email",
            Rule::MinLength(_) => "min",
            Rule::Confirmed => "confirmed",
            Rule::Numeric => "numeric",
            Rule::Integer => "integer",
            Rule::Min(_) => "min",
            Rule::Max(_) => "max",
            Rule::Decimals(_) => "decimal",
            Rule::Unique { .. } => "unique",
            Rule::Image => "image",
            Rule::Mimes(_) => "mimes",
            Rule::MaxKilobytes(_) => "max",
        }
    }

    fn default_message(&self, field: &str) -> String {
        let attribute = field.replace('_', " ");
        match self {
            Rule::Required => format!("The {attribute} field is required."),
            Rule::Email => format!("The {attribute} must be a valid email address."),
            Rule::MinLength(n) => format!("The {attribute} must be at least {n} characters."),
            Rule::Confirmed => format!("The {attribute} confirmation does not match."),
            Rule::Numeric => format!("The {attribute} must be a number."),
            Rule::Integer => format!("The {attribute} must be an integer."),
            Rule::Min(n) => format!("The {attribute} must be at least {n}."),
            Rule::Max(n) => format!("The {attribute} must not be greater than {n}."),
            Rule::Decimals(n) => {
                format!("The {attribute} must not have more than {n} decimal places.")
            }
            Rule::Unique { .. } => format!("The {attribute} has already been taken."),
            Rule::Image => format!("The {attribute} must be an image."),
            Rule::Mimes(types) => {
                format!("The {attribute} must be a file of type: {}.", types.join(", "))
            }
            Rule::MaxKilobytes(n) => {
                format!("The {attribute} must not be greater than {n} kilobytes.")
            }
        }
    }
}

/// The ordered rules for one field, with optional per-rule message overrides.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: &'static [Rule],
    pub messages: &'static [(&'static str, &'static str)],
}

impl FieldRules {
    pub const fn new(field: &'static str, rules: &'static [Rule]) -> Self {
        Self {
            field,
            rules,
            messages: &[],
        }
    }

    pub const fn with_messages(
        mut self,
        messages: &'static [(&'static str, &'static str)],
    ) -> Self {
        self.messages = messages;
        self
    }

    fn message_for(&self, rule: &Rule) -> String {
        self.messages
            .iter()
            .find(|(key, _)| *key == rule.key())
            .map(|(_, message)| (*message).to_string())
            .unwrap_or_else(|| rule.default_message(self.field))
    }
}

/// Field -> messages, serialized as `{ "email": ["The email has already been taken."] }`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum InputValue<'a> {
    Text(&'a str),
    File(&'a UploadedFile),
}

/// Borrowed view of a request payload, keyed by field name.
#[derive(Debug, Default)]
pub struct Input<'a> {
    values: HashMap<&'a str, InputValue<'a>>,
}

impl<'a> Input<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, field: &'a str, value: Option<&'a str>) -> Self {
        if let Some(value) = value {
            self.values.insert(field, InputValue::Text(value));
        }
        self
    }

    pub fn file(mut self, field: &'a str, value: Option<&'a UploadedFile>) -> Self {
        if let Some(value) = value {
            self.values.insert(field, InputValue::File(value));
        }
        self
    }

    pub fn get(&self, field: &str) -> Option<InputValue<'a>> {
        self.values.get(field).copied()
    }

    fn is_present(&self, field: &str) -> bool {
        match self.get(field) {
            Some(InputValue::Text(text)) => !text.trim().is_empty(),
            Some(InputValue::File(file)) => !file.bytes.is_empty(),
            None => false,
        }
    }
}

/// Answers "is this value already stored?" for [`Rule::Unique`].
pub trait UniqueLookup {
    fn is_taken(
        &self,
        table: &'static str,
        column: &'static str,
        value: &str,
        ignore_id: Option<i64>,
    ) -> impl Future<Output = AppResult<bool>> + Send;
}

impl UniqueLookup for DatabaseConnection {
    fn is_taken(
        &self,
        table: &'static str,
        column: &'static str,
        value: &str,
        ignore_id: Option<i64>,
    ) -> impl Future<Output = AppResult<bool>> + Send {
        let backend = self.get_database_backend();
        // Table and column come from static rule tables, never from the request.
        let statement = match ignore_id {
            Some(id) => Statement::from_sql_and_values(
                backend,
                format!("SELECT 1 FROM {table} WHERE {column} = $1 AND id <> $2 LIMIT 1"),
                [value.into(), id.into()],
            ),
            None => Statement::from_sql_and_values(
                backend,
                format!("SELECT 1 FROM {table} WHERE {column} = $1 LIMIT 1"),
                [value.into()],
            ),
        };
        async move {
            let row = self.query_one(statement).await?;
            Ok::<bool, AppError>(row.is_some())
        }
    }
}

/// A request type with a declarative rule table.
pub trait Validatable {
    fn rules() -> &'static [FieldRules];
    fn input(&self) -> Input<'_>;
}

/// Validate a whole request against its own rule table.
pub async fn validate_request<T, L>(
    payload: &T,
    lookup: &L,
    ignore_id: Option<i64>,
) -> AppResult<()>
where
    T: Validatable,
    L: UniqueLookup,
{
    validate(T::rules(), &payload.input(), lookup, ignore_id).await
}

/// Evaluate `rules` against `input`.
///
/// `ignore_id` excludes the row being updated from uniqueness checks.
/// Returns [`AppError::Validation`] carrying every failure, so nothing is
/// persisted unless the whole payload passes.
pub async fn validate<L: UniqueLookup>(
    rules: &[FieldRules],
    input: &Input<'_>,
    lookup: &L,
    ignore_id: Option<i64>,
) -> AppResult<()> {
    let mut errors = ValidationErrors::default();

    for field_rules in rules {
        let field = field_rules.field;
        if !input.is_present(field) {
            if field_rules.rules.contains(&Rule::Required) {
                errors.add(field, field_rules.message_for(&Rule::Required));
            }
            continue;
        }
        let Some(value) = input.get(field) else {
            continue;
        };

        for rule in field_rules.rules {
            let passed = match (rule, value) {
                (Rule::Required, _) => true,
                (Rule::Unique { table, column }, InputValue::Text(text)) => {
                    !lookup.is_taken(*table, *column, text.trim(), ignore_id).await?
                }
                (Rule::Confirmed, InputValue::Text(text)) => {
                    let confirmation = format!("{field}_confirmation");
                    matches!(
                        input.get(&confirmation),
                        Some(InputValue::Text(other)) if other == text
                    )
                }
                (rule, value) => check(rule, value),
            };
            if !passed {
                errors.add(field, field_rules.message_for(rule));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

fn check(rule: &Rule, value: InputValue<'_>) -> bool {
    match (rule, value) {
        (Rule::Email, InputValue::Text(text)) => text.trim().to_string().validate_email(),
        (Rule::MinLength(n), InputValue::Text(text)) => text.chars().count() >= *n,
        (Rule::Numeric, InputValue::Text(text)) => Decimal::from_str(text.trim()).is_ok(),
        (Rule::Integer, InputValue::Text(text)) => text.trim().parse::<i64>().is_ok(),
        (Rule::Min(n), InputValue::Text(text)) => match Decimal::from_str(text.trim()) {
            Ok(number) => number >= Decimal::from(*n),
            // Non-numeric input is reported by Numeric/Integer.
            Err(_) => true,
        },
        (Rule::Max(n), InputValue::Text(text)) => match Decimal::from_str(text.trim()) {
            Ok(number) => number <= Decimal::from(*n),
            Err(_) => true,
        },
        (Rule::Decimals(n), InputValue::Text(text)) => match Decimal::from_str(text.trim()) {
            Ok(number) => number.normalize().scale() <= *n,
            Err(_) => true,
        },
        (Rule::Image, InputValue::File(file)) => file.is_image(),
        (Rule::Mimes(types), InputValue::File(file)) => file
            .extension()
            .is_some_and(|ext| types.iter().any(|allowed| allowed.eq_ignore_ascii_case(&ext))),
        (Rule::MaxKilobytes(kb), InputValue::File(file)) => file.bytes.len() as u64 <= kb * 1024,
        _ => false,
    }
}
