//! Form validation and sanitization
//!
//! Each record kind declares an ordered table of `FieldRule`s. `validate` runs
//! every rule over the submitted form and collects all violations; the
//! sanitized values come back either way so a rejected form can be shown again
//! with what the user typed.
//!
//! Every value is stored escaped. Forms are prefilled through `unescape` so
//! that submitting them unchanged stores the same text again.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const NAME_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Character count within `[min, max]`; no upper bound when `max` is `None`
    Length { min: usize, max: Option<usize> },
    /// A finite decimal number, zero or more
    NonNegativeNumber,
    /// A whole number, zero or more
    NonNegativeInteger,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub trim: bool,
    pub constraint: Constraint,
    pub message: &'static str,
}

impl FieldRule {
    const fn text(field: &'static str, min: usize, max: Option<usize>, message: &'static str) -> Self {
        Self {
            field,
            trim: true,
            constraint: Constraint::Length { min, max },
            message,
        }
    }

    const fn numeric(field: &'static str, constraint: Constraint, message: &'static str) -> Self {
        Self {
            field,
            trim: true,
            constraint,
            message,
        }
    }

    fn accepts(&self, value: &str) -> bool {
        match self.constraint {
            Constraint::Length { min, max } => {
                let length = value.chars().count();
                length >= min && max.is_none_or(|max| length <= max)
            }
            Constraint::NonNegativeNumber => value
                .parse::<f64>()
                .is_ok_and(|n| n.is_finite() && n >= 0.0),
            Constraint::NonNegativeInteger => value.parse::<i64>().is_ok_and(|n| n >= 0),
        }
    }
}

/// Rules shared by categories and sellers
pub static DIRECTORY_RULES: [FieldRule; 2] = [
    FieldRule::text(
        "name",
        1,
        Some(NAME_MAX),
        "Name can't be blank and must be at most 100 characters",
    ),
    FieldRule::text(
        "description",
        1,
        Some(DESCRIPTION_MAX),
        "Description can't be blank and must be at most 300 characters",
    ),
];

pub static ITEM_RULES: [FieldRule; 6] = [
    FieldRule::text(
        "name",
        1,
        Some(NAME_MAX),
        "Name can't be blank and must be at most 100 characters",
    ),
    FieldRule::text(
        "description",
        1,
        Some(DESCRIPTION_MAX),
        "Description can't be blank and must be at most 300 characters",
    ),
    FieldRule::text("category", 1, None, "Category can't be empty"),
    FieldRule::text("seller", 1, None, "Seller can't be empty"),
    FieldRule::numeric(
        "price",
        Constraint::NonNegativeNumber,
        "Price must be a non-negative number",
    ),
    FieldRule::numeric(
        "number_in_stock",
        Constraint::NonNegativeInteger,
        "Number in stock must be a non-negative whole number",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

/// Sanitized form values plus every rule they broke, in rule order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Submission {
    pub values: BTreeMap<&'static str, String>,
    pub violations: Vec<Violation>,
}

impl Submission {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Sanitized value of a field; empty when the rule set does not name it
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.value(field).parse().ok()
    }

    pub fn integer(&self, field: &str) -> Option<i64> {
        self.value(field).parse().ok()
    }

    pub fn has_violation(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    pub fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.violations.push(Violation {
            field,
            message: message.into(),
        });
    }
}

/// Run `rules` over the submitted form
pub fn validate(rules: &[FieldRule], input: &HashMap<String, String>) -> Submission {
    let mut submission = Submission::default();

    for rule in rules {
        let raw = input.get(rule.field).map(String::as_str).unwrap_or("");
        let value = if rule.trim { raw.trim() } else { raw };

        if !rule.accepts(value) {
            submission.reject(rule.field, rule.message);
        }

        submission.values.insert(rule.field, escape(value));
    }

    submission
}

/// Replace `& < > " ' / \` and backticks with HTML entities
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Inverse of `escape`; unknown entities are left as they are
pub fn unescape(text: &str) -> String {
    const ENTITIES: [(&str, char); 8] = [
        ("&amp;", '&'),
        ("&quot;", '"'),
        ("&#x27;", '\''),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&#x2F;", '/'),
        ("&#x5C;", '\\'),
        ("&#96;", '`'),
    ];

    let mut unescaped = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find('&') {
        unescaped.push_str(&rest[..at]);
        rest = &rest[at..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, c)) => {
                unescaped.push(*c);
                rest = &rest[entity.len()..];
            }
            None => {
                unescaped.push('&');
                rest = &rest[1..];
            }
        }
    }
    unescaped.push_str(rest);
    unescaped
}
