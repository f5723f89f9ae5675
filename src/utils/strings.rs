//! String case conversion and inspection helpers.
//!
//! Title, Pascal and camel case capitalize each whitespace-separated word, so
//! `hELLO wORLD` becomes `Hello World`. Snake and kebab case go through `heck`,
//! which also splits on punctuation and lower→upper transitions.

use heck::{ToKebabCase, ToSnakeCase};

const DEFAULT_FALSY_VALUES: &[&str] = &[
    "", "0", "false", "no", "nil", "none", "n/a", "undefined", "null", "off",
];

pub fn camel_case(text: &str) -> String {
    let pascal = pascal_case(text);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

pub fn pascal_case(text: &str) -> String {
    text.split_whitespace().map(capitalize).collect()
}

pub fn snake_case(text: &str) -> String {
    text.to_snake_case()
}

pub fn kebab_case(text: &str) -> String {
    text.to_kebab_case()
}

pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

/// Whether `text` reads as a "no" value (`""`, `0`, `false`, `off`, ...).
///
/// Comparison trims and ignores case; `extra` extends the default list.
pub fn is_falsy(text: &str, extra: &[&str]) -> bool {
    let normalized = text.trim().to_lowercase();
    DEFAULT_FALSY_VALUES.contains(&normalized.as_str())
        || extra.iter().any(|v| v.to_lowercase() == normalized)
}

pub fn is_truthy(text: &str) -> bool {
    !is_falsy(text, &[])
}

/// Whether `text` parses as a finite number.
pub fn is_number(text: &str) -> bool {
    text.trim()
        .parse::<f64>()
        .map(|n| n.is_finite())
        .unwrap_or(false)
}

/// Count non-overlapping occurrences of `substring`.
pub fn occurrences(text: &str, substring: &str) -> usize {
    if substring.is_empty() {
        return 0;
    }
    text.matches(substring).count()
}

/// Right-pad `text` with `fill` until it is `length` characters long.
pub fn pad_string(text: &str, length: usize, fill: char) -> String {
    let current = text.chars().count();
    if current >= length {
        return text.to_string();
    }
    let mut out = String::from(text);
    out.extend(std::iter::repeat(fill).take(length - current));
    out
}

pub fn plural(word: &str, count: i64) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

pub fn remove_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}

#[derive(Debug, Clone)]
pub struct StringToArrayOptions {
    pub delimiter: String,
    pub remove_whitespace: bool,
}

impl Default for StringToArrayOptions {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            remove_whitespace: true,
        }
    }
}

/// Split a delimited list into owned parts. Empty input yields no parts.
pub fn string_to_array(text: &str, options: &StringToArrayOptions) -> Vec<String> {
    let text = if options.remove_whitespace {
        remove_whitespace(text)
    } else {
        text.to_string()
    };

    if text.is_empty() {
        return Vec::new();
    }

    text.split(options.delimiter.as_str())
        .map(str::to_string)
        .collect()
}

/// Cut `text` to `length` characters, appending `...` when anything was dropped.
pub fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() > length {
        let kept: String = text.chars().take(length).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
