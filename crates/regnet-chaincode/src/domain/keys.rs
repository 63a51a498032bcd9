//! # Composite Keys
//!
//! Ledger keys are composite keys in the chaincode-shim encoding:
//!
//! ```text
//! U+0000 <object type> U+0000 <part> U+0000 [<part> U+0000 ...]
//! ```
//!
//! Object types are `<prefix>.<namespace>`, e.g.
//! `org.property-registration-network.regnet.approvedUsers`. Neither the
//! object type nor any part may contain U+0000 or U+10FFFF, so two distinct
//! (type, parts) pairs never produce the same key.

use crate::domain::value_objects::UserId;
use crate::errors::RegistryError;

/// Namespace prefix used by records already on the ledger.
pub const DEFAULT_NAMESPACE_PREFIX: &str = "org.property-registration-network.regnet";

const KEY_DELIMITER: char = '\u{0}';
const MAX_RUNE: char = '\u{10FFFF}';

/// Record namespaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Pending user requests.
    Users,
    /// Approved users.
    ApprovedUsers,
    /// Pending property requests.
    Property,
    /// Approved properties.
    ApprovedProperty,
}

impl Namespace {
    /// Namespace segment of the object type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::ApprovedUsers => "approvedUsers",
            Self::Property => "property",
            Self::ApprovedProperty => "approvedProperty",
        }
    }
}

fn validate_segment(segment: &str, what: &str) -> Result<(), RegistryError> {
    if segment.contains(KEY_DELIMITER) || segment.contains(MAX_RUNE) {
        return Err(RegistryError::InvalidArgument(format!(
            "{what} contains a reserved character: {}",
            segment.escape_debug()
        )));
    }
    Ok(())
}

/// Builds a composite key from an object type and its parts.
pub fn composite_key(object_type: &str, parts: &[&str]) -> Result<String, RegistryError> {
    if object_type.is_empty() {
        return Err(RegistryError::InvalidArgument(
            "object type must not be empty".to_string(),
        ));
    }
    validate_segment(object_type, "object type")?;

    let mut key = String::with_capacity(
        2 + object_type.len() + parts.iter().map(|p| p.len() + 1).sum::<usize>(),
    );
    key.push(KEY_DELIMITER);
    key.push_str(object_type);
    key.push(KEY_DELIMITER);
    for part in parts {
        validate_segment(part, "key part")?;
        key.push_str(part);
        key.push(KEY_DELIMITER);
    }
    Ok(key)
}

/// Splits a composite key into its object type and parts.
///
/// Returns `None` for keys that are not composite keys.
#[must_use]
pub fn split_composite_key(key: &str) -> Option<(&str, Vec<&str>)> {
    let body = key.strip_prefix(KEY_DELIMITER)?.strip_suffix(KEY_DELIMITER)?;
    let mut segments = body.split(KEY_DELIMITER);
    let object_type = segments.next().filter(|t| !t.is_empty())?;
    Some((object_type, segments.collect()))
}

/// Printable form of a key for logs and error messages.
#[must_use]
pub fn describe_key(key: &str) -> String {
    match split_composite_key(key) {
        Some((object_type, parts)) => {
            let namespace = object_type.rsplit('.').next().unwrap_or(object_type);
            format!("{namespace}/{}", parts.join("/"))
        }
        None => key.escape_debug().to_string(),
    }
}

// =============================================================================
// KEY SPACE
// =============================================================================

/// Key derivation for every record type under one namespace prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeySpace {
    prefix: String,
}

impl Default for KeySpace {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE_PREFIX)
    }
}

impl KeySpace {
    /// Creates a key space for the given object-type prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Object-type prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Full object type of a namespace.
    #[must_use]
    pub fn object_type(&self, namespace: Namespace) -> String {
        format!("{}.{}", self.prefix, namespace.as_str())
    }

    /// Key of a pending user request.
    pub fn user_request_key(&self, user: &UserId) -> Result<String, RegistryError> {
        composite_key(&self.object_type(Namespace::Users), &[&user.key_part()])
    }

    /// Key of an approved user. This is also the owner key stored on
    /// properties.
    pub fn approved_user_key(&self, user: &UserId) -> Result<String, RegistryError> {
        composite_key(&self.object_type(Namespace::ApprovedUsers), &[&user.key_part()])
    }

    /// Key of a pending property request.
    pub fn property_request_key(&self, property_id: &str) -> Result<String, RegistryError> {
        Self::check_property_id(property_id)?;
        composite_key(&self.object_type(Namespace::Property), &[property_id])
    }

    /// Key of an approved property.
    pub fn approved_property_key(&self, property_id: &str) -> Result<String, RegistryError> {
        Self::check_property_id(property_id)?;
        composite_key(&self.object_type(Namespace::ApprovedProperty), &[property_id])
    }

    /// Returns true if `key` addresses an approved user in this key space.
    #[must_use]
    pub fn is_approved_user_key(&self, key: &str) -> bool {
        match split_composite_key(key) {
            Some((object_type, parts)) => {
                object_type == self.object_type(Namespace::ApprovedUsers)
                    && parts.len() == 1
                    && !parts[0].is_empty()
            }
            None => false,
        }
    }

    fn check_property_id(property_id: &str) -> Result<(), RegistryError> {
        if property_id.trim().is_empty() {
            return Err(RegistryError::InvalidArgument(
                "property id must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
