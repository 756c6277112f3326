//! Distro network-script (`ifcfg-<iface>`) parser
//!
//! Red Hat style network scripts are shell fragments of `KEY=VALUE` lines.
//! Only the keys that map onto checked attributes are read:
//!
//! - `MTU=<n>`
//! - `TXQUEUELEN=<n>`
//! - `ETHTOOL_OPTS="speed <n> duplex <half|full> ..."`
//!
//! This layer is best-effort: values that fail to parse are logged and
//! ignored.

use crate::config::validation;
use crate::error::{CheckError, Result};
use crate::interface::{Attribute, AttributeValue};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Default location of network scripts
pub const DEFAULT_IFCFG_DIR: &str = "/etc/sysconfig/network-scripts";

/// Expectations read from a single ifcfg file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IfcfgFile {
    expected: BTreeMap<Attribute, AttributeValue>,
}

impl IfcfgFile {
    /// Parse the contents of an ifcfg file
    pub fn parse(contents: &str) -> Self {
        let vars = parse_assignments(contents);
        let mut expected = BTreeMap::new();

        if let Some(mtu) = vars.get("MTU") {
            insert_number(&mut expected, Attribute::Mtu, mtu);
        }

        if let Some(len) = vars.get("TXQUEUELEN") {
            insert_number(&mut expected, Attribute::Txqueuelen, len);
        }

        if let Some(opts) = vars.get("ETHTOOL_OPTS") {
            let words: Vec<&str> = opts.split_whitespace().collect();
            for pair in words.windows(2) {
                match pair[0] {
                    "speed" => insert_number(&mut expected, Attribute::Speed, pair[1]),
                    "duplex" => insert_text(&mut expected, Attribute::Duplex, pair[1]),
                    _ => {}
                }
            }
        }

        Self { expected }
    }

    /// Expected value for an attribute, if the file sets one
    pub fn get(&self, attribute: Attribute) -> Option<&AttributeValue> {
        self.expected.get(&attribute)
    }

    /// Whether the file sets no checked attribute
    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }
}

/// Directory of ifcfg files
#[derive(Debug, Clone)]
pub struct IfcfgDir {
    path: PathBuf,
}

impl IfcfgDir {
    /// Create a loader for the given directory
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Load `ifcfg-<interface>`.
    ///
    /// Returns `Ok(None)` when the interface has no network script.
    pub fn load(&self, interface: &str) -> Result<Option<IfcfgFile>> {
        validation::validate_interface_name(interface)?;

        let file = self.path.join(format!("ifcfg-{}", interface));
        match fs::read_to_string(&file) {
            Ok(contents) => {
                debug!("Read network script {:?}", file);
                Ok(Some(IfcfgFile::parse(&contents)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CheckError::Config(format!(
                "Failed to read network script {:?}: {}",
                file, e
            ))),
        }
    }
}

/// Collect `KEY=VALUE` assignments, stripping quotes and comments
fn parse_assignments(contents: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let key = key.trim();
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            continue;
        }

        vars.insert(key.to_string(), unquote(value.trim()));
    }

    vars
}

fn unquote(value: &str) -> String {
    for quote in ['"', '\''] {
        if let Some(rest) = value.strip_prefix(quote) {
            return match rest.find(quote) {
                Some(end) => rest[..end].to_string(),
                None => rest.to_string(),
            };
        }
    }

    // Unquoted: a trailing comment ends the value
    match value.find(" #") {
        Some(idx) => value[..idx].trim_end().to_string(),
        None => value.to_string(),
    }
}

fn insert_number(expected: &mut BTreeMap<Attribute, AttributeValue>, attribute: Attribute, raw: &str) {
    let value = match raw.trim().parse::<i64>() {
        Ok(n) => AttributeValue::Number(n),
        Err(_) => {
            warn!("Ignoring non-numeric {} '{}' in network script", attribute, raw);
            return;
        }
    };
    insert_validated(expected, attribute, value);
}

fn insert_text(expected: &mut BTreeMap<Attribute, AttributeValue>, attribute: Attribute, raw: &str) {
    insert_validated(expected, attribute, AttributeValue::text(raw));
}

fn insert_validated(
    expected: &mut BTreeMap<Attribute, AttributeValue>,
    attribute: Attribute,
    value: AttributeValue,
) {
    match validation::validate_attribute_value(attribute, &value) {
        Ok(()) => {
            expected.insert(attribute, value);
        }
        Err(e) => warn!("Ignoring {} from network script: {}", attribute, e),
    }
}
