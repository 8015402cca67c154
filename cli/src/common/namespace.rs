//! # HexMaker Namespace Paths
//!
//! File: cli/src/common/namespace.rs
//!
//! ## Overview
//!
//! A `NamespacePath` is the module a maker writes into, e.g. `user/account`
//! typed on the command line. The same path is needed in two shapes:
//! - as a directory below the source root (`User/Account`)
//! - as a PHP namespace below the root namespace (`App\User\Account\...`)
//!
//! Input may use `/`, `\` or `.` as separators and any of the casings accepted
//! by `naming::to_pascal_case`. A leading segment equal to the root namespace is
//! dropped so `App\User` and `user` point at the same module.
//!
use crate::common::naming;

/// Separators accepted between path segments.
const SEPARATORS: [char; 3] = ['/', '\\', '.'];

/// A normalized module path anchored below a root namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePath {
    root_namespace: String,
    segments: Vec<String>,
}

impl NamespacePath {
    /// Builds a path from raw user input and the project's root namespace.
    pub fn new(raw: &str, root_namespace: &str) -> Self {
        let root_namespace = root_namespace.trim_matches(|c| SEPARATORS.contains(&c));
        let mut segments: Vec<String> = raw
            .split(|c| SEPARATORS.contains(&c))
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(Self::normalize)
            .collect();

        // `App/User` and `User` address the same module when the root is `App`.
        if !root_namespace.contains('\\')
            && segments
                .first()
                .is_some_and(|first| first.as_str() == root_namespace)
        {
            segments.remove(0);
        }

        Self {
            root_namespace: root_namespace.to_string(),
            segments,
        }
    }

    /// Class-name casing for a raw name (`create_user` -> `CreateUser`).
    pub fn normalize(name: &str) -> String {
        naming::to_pascal_case(name.trim())
    }

    /// Filesystem form of the path, `/` separated (`User/Account`).
    pub fn normalized_value(&self) -> String {
        self.segments.join("/")
    }

    /// Fully-qualified namespace, optionally extended by `suffix`.
    ///
    /// `suffix` may itself contain `\` separated segments, e.g. `Domain\Port`.
    pub fn to_namespace(&self, suffix: &str) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.segments.len() + 2);
        if !self.root_namespace.is_empty() {
            parts.push(&self.root_namespace);
        }
        parts.extend(self.segments.iter().map(String::as_str));
        let suffix = suffix.trim_matches('\\');
        if !suffix.is_empty() {
            parts.push(suffix);
        }
        parts.join("\\")
    }

    /// Last segment of the module, e.g. `Account` for `user/account`.
    ///
    /// For the root module this is the last segment of the root namespace,
    /// or an empty string when there is none.
    pub fn to_short_class_name(&self) -> String {
        match self.segments.last() {
            Some(last) => last.clone(),
            None => self
                .root_namespace
                .rsplit('\\')
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// True when the raw input named no module below the root namespace.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_separators_and_casing() {
        let path = NamespacePath::new("user/account", "App");
        assert_eq!(path.normalized_value(), "User/Account");

        let path = NamespacePath::new("User\\Account", "App");
        assert_eq!(path.normalized_value(), "User/Account");

        let path = NamespacePath::new("/billing.invoice_line/", "App");
        assert_eq!(path.normalized_value(), "Billing/InvoiceLine");
    }

    #[test]
    fn test_strips_root_namespace_prefix() {
        let path = NamespacePath::new("App\\User", "App");
        assert_eq!(path.normalized_value(), "User");
        assert_eq!(path.to_namespace(""), "App\\User");
    }

    #[test]
    fn test_to_namespace() {
        let path = NamespacePath::new("user", "App");
        assert_eq!(
            path.to_namespace("Application\\CreateUser"),
            "App\\User\\Application\\CreateUser"
        );
        assert_eq!(path.to_namespace("\\Domain\\Port\\"), "App\\User\\Domain\\Port");
        assert_eq!(path.to_namespace(""), "App\\User");
    }

    #[test]
    fn test_empty_path_is_root() {
        let path = NamespacePath::new(" / ", "Acme\\Shop");
        assert!(path.is_root());
        assert_eq!(path.normalized_value(), "");
        assert_eq!(path.to_namespace("Domain"), "Acme\\Shop\\Domain");
    }

    #[test]
    fn test_short_class_name() {
        assert_eq!(
            NamespacePath::new("user/account", "App").to_short_class_name(),
            "Account"
        );
        assert_eq!(NamespacePath::new("", "App").to_short_class_name(), "App");
        assert_eq!(
            NamespacePath::new("", "Acme\\Shop").to_short_class_name(),
            "Shop"
        );
        assert_eq!(NamespacePath::new("", "").to_short_class_name(), "");
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(NamespacePath::normalize("create_user"), "CreateUser");
        assert_eq!(NamespacePath::normalize(" createUser "), "CreateUser");
    }
}
