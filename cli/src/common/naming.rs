//! # HexMaker Naming Conventions
//!
//! File: cli/src/common/naming.rs
//!
//! ## Overview
//!
//! Every piece of generated code relies on the same naming scheme: an entity
//! `OrderStatus` lives in `$orderStatus`, is persisted through
//! `$orderStatusRepository`, and that repository is typed by
//! `OrderStatusRepositoryInterface`. The analyzer emits handler bodies using
//! these names and the generator injects constructor dependencies using them,
//! so both sides must call into this module rather than re-deriving the casing.
//!
//! The case helpers here only reshape what they are given. They do not
//! validate that the result is a legal PHP identifier.
//!

/// Suffix appended to an entity's lower-camel name to form its repository variable.
const REPOSITORY_SUFFIX: &str = "Repository";
/// Suffix appended to an entity's class name to form its repository port.
const REPOSITORY_INTERFACE_SUFFIX: &str = "RepositoryInterface";

/// Splits an identifier into words at each uppercase letter.
///
/// `"UserProfile"` becomes `["User", "Profile"]`, `"userProfile"` becomes
/// `["user", "Profile"]`. Concatenating the result gives back the input.
pub fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for c in input.chars() {
        if c.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Lowercases the first character, leaving the rest untouched.
pub fn lower_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts kebab-case, snake_case, dotted or space separated input to PascalCase.
/// Characters inside a word keep their case, so `createUser` becomes `CreateUser`.
pub fn to_pascal_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut capitalize_next = true;

    for c in input.chars() {
        if c == '-' || c == '_' || c == ' ' || c == '.' {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Converts any accepted input to lowerCamelCase (`OrderStatus` -> `orderStatus`).
pub fn lower_camel(input: &str) -> String {
    lower_first(&to_pascal_case(input))
}

/// Class name used for an entity in generated code.
pub fn entity_class_name_for(entity: &str) -> String {
    to_pascal_case(entity)
}

/// Variable name (without the `$` sigil) holding an entity instance.
pub fn entity_variable_name_for(entity: &str) -> String {
    lower_camel(entity)
}

/// Variable name (without the `$` sigil) of the repository that persists `entity`.
pub fn repository_variable_name_for(entity: &str) -> String {
    format!("{}{}", lower_camel(entity), REPOSITORY_SUFFIX)
}

/// Short name of the repository port for `entity`.
pub fn repository_interface_name_for(entity: &str) -> String {
    format!("{}{}", entity_class_name_for(entity), REPOSITORY_INTERFACE_SUFFIX)
}

/// Short name of the factory class generated next to a command handler.
pub fn factory_class_name_for(name: &str) -> String {
    format!("{}Factory", to_pascal_case(name))
}

/// Prefixes a PHP variable name with its `$` sigil.
pub fn php_variable(name: &str) -> String {
    format!("${}", name)
}

/// ASCII PHP label: a letter or underscore, then letters, digits and underscores.
pub fn is_php_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Backslash-separated namespace made only of PHP identifiers.
pub fn is_php_namespace(value: &str) -> bool {
    !value.is_empty() && value.split('\\').all(is_php_identifier)
}
