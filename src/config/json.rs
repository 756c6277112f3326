//! JSON per-interface override file
//!
//! The override file maps interface names to the attribute values they are
//! expected to have:
//!
//! ```json
//! { "interfaces": { "eth0": { "mtu": 9000, "duplex": "full" } } }
//! ```

use crate::config::validation;
use crate::error::{CheckError, Result};
use crate::interface::{Attribute, AttributeValue};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Raw layout of the override file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonConfigFile {
    /// Interface name -> attribute name -> expected value
    #[serde(default)]
    pub interfaces: HashMap<String, HashMap<String, Value>>,
}

/// Validated per-interface expectations from the override file
#[derive(Debug, Clone, Default)]
pub struct InterfaceOverrides {
    interfaces: HashMap<String, BTreeMap<Attribute, AttributeValue>>,
}

impl InterfaceOverrides {
    /// Parse and validate overrides from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: JsonConfigFile = serde_json::from_str(json).map_err(|e| {
            CheckError::Serialization(format!("Failed to parse JSON config: {}", e))
        })?;
        raw.try_into()
    }

    /// Load overrides from a file.
    ///
    /// A missing file yields an empty set of overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No JSON config at {:?}, skipping overrides", path);
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(CheckError::Config(format!(
                    "Failed to read config file {:?}: {}",
                    path, e
                )))
            }
        };

        Self::from_json(&contents)
            .map_err(|e| CheckError::Config(format!("{:?}: {}", path, e)))
    }

    /// Expected value for an interface attribute, if overridden
    pub fn get(&self, interface: &str, attribute: Attribute) -> Option<&AttributeValue> {
        self.interfaces.get(interface)?.get(&attribute)
    }

    /// Number of interfaces with at least one override
    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    /// Whether the file contributed nothing
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

impl TryFrom<JsonConfigFile> for InterfaceOverrides {
    type Error = CheckError;

    fn try_from(raw: JsonConfigFile) -> Result<Self> {
        let mut interfaces = HashMap::new();

        for (name, attrs) in raw.interfaces {
            validation::validate_interface_name(&name)?;

            let mut expected = BTreeMap::new();
            for (key, value) in attrs {
                let attribute = Attribute::from_name(&key).ok_or_else(|| {
                    CheckError::Config(format!(
                        "Unknown attribute '{}' for interface '{}'",
                        key, name
                    ))
                })?;
                let value = validation::attribute_value_from_json(attribute, &value)
                    .map_err(|e| CheckError::Config(format!("Interface '{}': {}", name, e)))?;
                expected.insert(attribute, value);
            }

            interfaces.insert(name, expected);
        }

        Ok(Self { interfaces })
    }
}
