//! Reader configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::registry::ListRegistry;
use crate::types::{BlockTag, ContractSet, ListDescriptor};
use crate::ReadError;

/// Reader configuration, usually loaded from a TOML file
///
/// ```toml
/// rpc_url = "http://localhost:8545"
/// block = "latest"
///
/// [contracts]
/// main = "0x1111111111111111111111111111111111111111"
/// lists = "0x2222222222222222222222222222222222222222"
///
/// [lists.Allowance]
/// count = "aa7adb3d"
/// map = "b545b11f"
/// amount = "dd62ed3e"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// RPC endpoint URL
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Currency contracts
    #[serde(default)]
    pub contracts: Option<ContractSet>,
    /// Block used when a read does not name one
    #[serde(default)]
    pub block: BlockTag,
    /// List descriptors added to, or replacing, the built-in ones
    #[serde(default)]
    pub lists: HashMap<String, ListDescriptor>,
}

fn default_rpc_url() -> String {
    "http://localhost:8545".to_string()
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            contracts: None,
            block: BlockTag::default(),
            lists: HashMap::new(),
        }
    }
}

impl ReaderConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ReadError> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ReadError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Save config to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReadError> {
        let path = path.as_ref();
        let content =
            toml::to_string_pretty(self).map_err(|e| ReadError::Config(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| ReadError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Configured contracts
    pub fn contract_set(&self) -> Result<ContractSet, ReadError> {
        self.contracts
            .ok_or_else(|| ReadError::Config("missing [contracts] section".to_string()))
    }

    /// Built-in lists with the configured overrides applied
    pub fn registry(&self) -> ListRegistry {
        let mut registry = ListRegistry::with_defaults();
        for (name, descriptor) in &self.lists {
            registry.insert(name.clone(), *descriptor);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ListKind;
    use comchain_primitives::{Address, Selector};

    const FULL: &str = r#"
        rpc_url = "http://example.com:8545"
        block = "latest"

        [contracts]
        main = "0x1111111111111111111111111111111111111111"
        lists = "0x2222222222222222222222222222222222222222"

        [lists.Allowance]
        count = "0x01020304"
        map = "05060708"
        amount = "090a0b0c"
    "#;

    #[test]
    fn test_config_default() {
        let config = ReaderConfig::default();
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.block, BlockTag::Pending);
        assert!(config.contracts.is_none());
        assert!(config.lists.is_empty());
    }

    #[test]
    fn test_config_deserialize() {
        let config = ReaderConfig::from_toml_str(FULL).unwrap();
        assert_eq!(config.rpc_url, "http://example.com:8545");
        assert_eq!(config.block, BlockTag::Latest);

        let contracts = config.contract_set().unwrap();
        assert_eq!(contracts.main, Address::from_bytes([0x11; 20]));
        assert_eq!(contracts.lists, Address::from_bytes([0x22; 20]));
    }

    #[test]
    fn test_config_empty_document() {
        let config = ReaderConfig::from_toml_str("").unwrap();
        assert_eq!(config, ReaderConfig::default());
        assert!(matches!(config.contract_set(), Err(ReadError::Config(_))));
    }

    #[test]
    fn test_config_bad_address() {
        let toml = r#"
            [contracts]
            main = "0x1234"
            lists = "0x2222222222222222222222222222222222222222"
        "#;
        assert!(matches!(
            ReaderConfig::from_toml_str(toml),
            Err(ReadError::Config(_))
        ));
    }

    #[test]
    fn test_config_block_number() {
        let config = ReaderConfig::from_toml_str(r#"block = "0x10""#).unwrap();
        assert_eq!(config.block, BlockTag::Number(16));
    }

    #[test]
    fn test_registry_overrides() {
        let config = ReaderConfig::from_toml_str(FULL).unwrap();
        let registry = config.registry();

        assert_eq!(registry.len(), ListKind::ALL.len());
        let allowance = registry.descriptor(ListKind::Allowance).unwrap();
        assert_eq!(allowance.count, Selector::from_bytes([1, 2, 3, 4]));
        assert_eq!(allowance.amount, Selector::from_bytes([9, 10, 11, 12]));
        assert_eq!(
            registry.descriptor(ListKind::Delegation).unwrap(),
            ListKind::Delegation.default_descriptor()
        );
    }

    #[test]
    fn test_config_load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reader.toml");
        std::fs::write(&path, FULL).unwrap();

        let config = ReaderConfig::load(&path).unwrap();
        let copy = dir.path().join("copy.toml");
        config.save(&copy).unwrap();
        assert_eq!(ReaderConfig::load(&copy).unwrap(), config);
    }

    #[test]
    fn test_config_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReaderConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ReadError::Config(_)));
    }
}
