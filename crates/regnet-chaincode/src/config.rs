//! Registry configuration from environment variables.

use crate::domain::keys::DEFAULT_NAMESPACE_PREFIX;
use std::env;
use thiserror::Error;

/// Contract name serving user-facing functions.
pub const DEFAULT_USERS_CONTRACT: &str = "org.property-registration-network.com.regnetusers";

/// Contract name serving registrar functions.
pub const DEFAULT_REGISTRAR_CONTRACT: &str = "org.property-registration-network.com.regnetregis";

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting is blank.
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// Both contracts were given the same name.
    #[error("users and registrar contracts share the name {0}")]
    DuplicateContract(String),

    /// Value contains a character the ledger reserves for composite keys.
    #[error("{0} contains a reserved character")]
    ReservedCharacter(&'static str),
}

/// Registry service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Prefix of every composite-key object type.
    pub namespace_prefix: String,

    /// Name of the user-facing contract
    pub users_contract: String,

    /// Name of the registrar contract
    pub registrar_contract: String,

    /// Run operations without committing their writes.
    pub dry_run: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            namespace_prefix: DEFAULT_NAMESPACE_PREFIX.to_string(),
            users_contract: DEFAULT_USERS_CONTRACT.to_string(),
            registrar_contract: DEFAULT_REGISTRAR_CONTRACT.to_string(),
            dry_run: false,
        }
    }
}

impl RegistryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `REGNET_NAMESPACE_PREFIX`: Key namespace prefix
    ///   (default: org.property-registration-network.regnet)
    /// - `REGNET_USERS_CONTRACT`: User contract name
    /// - `REGNET_REGISTRAR_CONTRACT`: Registrar contract name
    /// - `REGNET_DRY_RUN`: Skip commits (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            namespace_prefix: env::var("REGNET_NAMESPACE_PREFIX")
                .unwrap_or(defaults.namespace_prefix),

            users_contract: env::var("REGNET_USERS_CONTRACT").unwrap_or(defaults.users_contract),

            registrar_contract: env::var("REGNET_REGISTRAR_CONTRACT")
                .unwrap_or(defaults.registrar_contract),

            dry_run: env::var("REGNET_DRY_RUN")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.dry_run),
        }
    }

    /// Check that the configuration can serve invocations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("namespace_prefix", &self.namespace_prefix),
            ("users_contract", &self.users_contract),
            ("registrar_contract", &self.registrar_contract),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(name));
            }
        }
        if self
            .namespace_prefix
            .chars()
            .any(|c| c == '\u{0}' || c == '\u{10FFFF}')
        {
            return Err(ConfigError::ReservedCharacter("namespace_prefix"));
        }
        if self.users_contract == self.registrar_contract {
            return Err(ConfigError::DuplicateContract(self.users_contract.clone()));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.namespace_prefix, "org.property-registration-network.regnet");
        assert_eq!(config.users_contract, DEFAULT_USERS_CONTRACT);
        assert_eq!(config.registrar_contract, DEFAULT_REGISTRAR_CONTRACT);
        assert!(!config.dry_run);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let config = RegistryConfig {
            users_contract: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Empty("users_contract")));
    }

    #[test]
    fn test_validate_rejects_shared_contract_name() {
        let config = RegistryConfig {
            registrar_contract: DEFAULT_USERS_CONTRACT.to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateContract(_))));
    }

    #[test]
    fn test_validate_rejects_reserved_prefix() {
        let config = RegistryConfig {
            namespace_prefix: "regnet\u{0}".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ReservedCharacter("namespace_prefix"))
        );
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("no"));
        assert!(!parse_flag(""));
    }
}
