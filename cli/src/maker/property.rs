//! # Property Descriptors
//!
//! File: cli/src/maker/property.rs
//!
//! A `PropertyConfig` describes one constructor parameter / public property of
//! a generated DTO (command, query or response). On the command line it is
//! written `name`, `name:type` or `name:?type` for a nullable type.
//!
use crate::common::naming;
use crate::core::error::MakerError;
use serde::Serialize;
use serde_json::{json, Value};
use std::str::FromStr;

/// Type used when a property is given without one.
const DEFAULT_TYPE: &str = "string";

/// One generated property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub nullable: bool,
}

impl PropertyConfig {
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            nullable: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Type declaration as written in PHP (`?int` for a nullable int).
    pub fn php_type(&self) -> String {
        if self.nullable && self.type_name != "mixed" {
            format!("?{}", self.type_name)
        } else {
            self.type_name.clone()
        }
    }

    /// Flattens the descriptor for the template variable map.
    pub fn to_array(&self) -> Value {
        json!({
            "name": self.name,
            "type": self.type_name,
            "nullable": self.nullable,
            "php_type": self.php_type(),
        })
    }
}

impl FromStr for PropertyConfig {
    type Err = MakerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (raw_name, raw_type) = match s.split_once(':') {
            Some((name, type_name)) => (name.trim(), type_name.trim()),
            None => (s.trim(), ""),
        };

        let name = naming::lower_camel(raw_name);
        if !naming::is_php_identifier(&name) {
            return Err(MakerError::InvalidProperty(format!(
                "'{}' is not a valid property name. Expected NAME[:TYPE], e.g. email:string",
                s
            )));
        }

        let (nullable, type_name) = match raw_type.strip_prefix('?') {
            Some(rest) => (true, rest.trim()),
            None => (false, raw_type),
        };
        let type_name = if type_name.is_empty() {
            DEFAULT_TYPE
        } else {
            type_name
        };

        let property = Self::new(&name, type_name);
        Ok(if nullable { property.nullable() } else { property })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property_forms() {
        let email: PropertyConfig = "email:string".parse().unwrap();
        assert_eq!(email, PropertyConfig::new("email", "string"));

        let bare: PropertyConfig = "title".parse().unwrap();
        assert_eq!(bare.type_name, "string");
        assert!(!bare.nullable);

        let age: PropertyConfig = " age : ?int ".parse().unwrap();
        assert_eq!(age, PropertyConfig::new("age", "int").nullable());

        let snake: PropertyConfig = "first_name:string".parse().unwrap();
        assert_eq!(snake.name, "firstName");

        let class_typed: PropertyConfig = "publishedAt:\\DateTimeImmutable".parse().unwrap();
        assert_eq!(class_typed.type_name, "\\DateTimeImmutable");
    }

    #[test]
    fn test_parse_property_rejects_bad_names() {
        assert!("".parse::<PropertyConfig>().is_err());
        assert!(":string".parse::<PropertyConfig>().is_err());
        assert!("9lives:int".parse::<PropertyConfig>().is_err());
        let err = "bad name!:int".parse::<PropertyConfig>().unwrap_err();
        assert!(err.to_string().contains("Invalid property definition"));
    }

    #[test]
    fn test_to_array() {
        let value = PropertyConfig::new("age", "int").nullable().to_array();
        assert_eq!(value["name"], "age");
        assert_eq!(value["type"], "int");
        assert_eq!(value["nullable"], true);
        assert_eq!(value["php_type"], "?int");

        let mixed = PropertyConfig::new("payload", "mixed").nullable();
        assert_eq!(mixed.php_type(), "mixed");
    }
}
