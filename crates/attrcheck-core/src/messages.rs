//! Message rendering shared by the built-in validators and the record
//! validator.

use serde_json::Value;

use crate::config::ValidateOptions;

/// Turn an attribute name into lower-case words.
///
/// `first_name`, `first-name` and `firstName` all become `first name`;
/// `address.city` becomes `address city`.
pub fn prettify(name: &str) -> String {
    let chars: Vec<char> = name.chars().filter(|c| *c != '\\').collect();
    let mut out = String::with_capacity(chars.len() + 4);

    for (idx, &ch) in chars.iter().enumerate() {
        let prev = idx.checked_sub(1).map(|i| chars[i]);
        let next = chars.get(idx + 1).copied();
        match ch {
            '_' | '-' => out.push(' '),
            '.' if prev.is_some_and(|c| !c.is_whitespace())
                && next.is_some_and(|c| !c.is_whitespace()) =>
            {
                out.push(' ')
            }
            c if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase()) => {
                out.push(' ');
                out.extend(c.to_lowercase());
            }
            c => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Upper-case the first character.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Prefix a message with the attribute name unless it opts out with `^`.
pub fn full_message(attribute: &str, message: &str, options: &ValidateOptions) -> String {
    if let Some(stripped) = message.strip_prefix('^') {
        return stripped.to_string();
    }
    if !options.full_messages {
        return message.to_string();
    }
    format!("{} {}", capitalize(&prettify(attribute)), message)
}

/// Replace `%{key}` placeholders.
pub fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in vars {
        out = out.replace(&format!("%{{{key}}}"), value);
    }
    out
}

/// Render a value for inclusion in a message: strings bare, the rest as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Render a number the way it was most likely written (`5`, not `5.0`).
pub fn display_number(number: f64) -> String {
    format!("{number}")
}
