use crate::analysis::ParseError;
use heck::{ToSnakeCase, ToUpperCamelCase};
use regex::Regex;
use std::sync::OnceLock;

fn identifier_regex() -> &'static Regex {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER.get_or_init(|| {
        Regex::new(r"^[a-z_][a-z0-9_]*$").expect("identifier pattern is valid")
    })
}

fn field_name_regex() -> &'static Regex {
    static FIELD_NAME: OnceLock<Regex> = OnceLock::new();
    FIELD_NAME.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("field name pattern is valid")
    })
}

/// Normalize a declared table or entity name to snake_case
pub fn to_identifier(declared: &str) -> String {
    declared.trim().to_snake_case()
}

/// PascalCase class name for a snake_case identifier
pub fn to_class_name(identifier: &str) -> String {
    identifier.to_upper_camel_case()
}

/// Reject anything that is not safe as both a path segment and a Python identifier
pub fn validate_identifier(name: &str) -> Result<(), ParseError> {
    if identifier_regex().is_match(name) {
        Ok(())
    } else {
        Err(ParseError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

/// Field names keep their declared case but must still be usable as Python attributes
pub fn validate_field_name(name: &str) -> Result<(), ParseError> {
    if field_name_regex().is_match(name) {
        Ok(())
    } else {
        Err(ParseError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

/// Strip an English plural suffix from the last word of a snake_case identifier.
///
/// `ies` -> `y`, `sses`/`xes`/`zes`/`ches`/`shes` drop `es`, a trailing `s`
/// (but not `ss`) is dropped. Anything else is returned unchanged.
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }
    for suffix in ["sses", "xes", "zes", "ches", "shes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with('s') && !word.ends_with("ss") && word.len() > 1 {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// Pluralize a singular snake_case identifier.
///
/// consonant + `y` -> `ies`; `s`, `x`, `z`, `ch`, `sh` take `es`; everything
/// else takes `s`.
pub fn pluralize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('y') {
        let before_y = stem.chars().last();
        if before_y.is_some_and(|c| !"aeiou".contains(c)) {
            return format!("{}ies", stem);
        }
    }
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return format!("{}es", word);
    }
    format!("{}s", word)
}
