//! Named placeholder substitution for endpoint path templates.
//!
//! Templates contain tokens of the form `%(name)type`, where `name` matches
//! `[a-z0-9\-_]+` and `type` is one of `s` (string), `d` (integer) or
//! `f` (number). This is deliberately not a general formatter: there is no
//! escaping, no nesting, and substituted values are never rescanned.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%\(([a-z0-9\-_]+)\)([sdf])").expect("placeholder pattern is valid"));

/// Raw values keyed by placeholder name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, consuming and returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl fmt::Display) -> Option<String> {
        self.0.insert(key.into(), value.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Replaces every recognised placeholder in `template` with its coerced
/// value from `params`. Placeholders whose name is absent from `params`
/// are left untouched.
pub fn substitute(template: &str, params: &Params) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match params.get(&caps[1]) {
            Some(raw) => coerce(raw, &caps[2]),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Names referenced by placeholders in `template`, in order of appearance.
/// A name used twice is listed twice.
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

fn coerce(raw: &str, kind: &str) -> String {
    match kind {
        "d" => coerce_integer(raw),
        "f" => coerce_float(raw),
        _ => raw.to_string(),
    }
}

/// Leading-integer parse: optional sign followed by decimal digits, after
/// leading whitespace. Anything without digits becomes `NaN`.
fn coerce_integer(raw: &str) -> String {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => ("-", &trimmed[1..]),
        Some(b'+') => ("", &trimmed[1..]),
        _ => ("", trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return "NaN".to_string();
    }
    let literal = format!("{sign}{}", &rest[..digits_len]);
    match literal.parse::<i64>() {
        Ok(value) => value.to_string(),
        // Too wide for i64: fall back to the nearest float.
        Err(_) => format_number(literal.parse::<f64>().unwrap_or(f64::NAN)),
    }
}

/// Whole-string numeric parse. Empty input is zero.
fn coerce_float(raw: &str) -> String {
    let trimmed = raw.trim();
    let value = match trimmed {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E')) =>
        {
            trimmed.parse::<f64>().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    };
    format_number(value)
}

/// Shortest decimal form, integral values without a fractional part.
pub(crate) fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let label = if value > 0.0 { "Infinity" } else { "-Infinity" };
        label.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}
