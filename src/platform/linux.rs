//! Linux sysfs implementation
//!
//! Interfaces are the directories under `/sys/class/net`; each attribute is
//! a one-line file inside the interface directory. See
//! `Documentation/ABI/testing/sysfs-class-net` in the kernel tree.

use crate::error::{CheckError, Result};
use crate::interface::{Attribute, AttributeValue, Interface, InterfaceKind};
use crate::platform::InterfaceSource;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// `type` value of loopback devices
pub const ARPHRD_LOOPBACK: i64 = 772;

/// Interfaces and attributes read from a sysfs network class directory
#[derive(Debug, Clone)]
pub struct SysfsSource {
    root: PathBuf,
}

impl SysfsSource {
    /// Create a source rooted at `root` (normally `/sys/class/net`)
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn read_trimmed(&self, interface: &str, file: &str) -> Option<String> {
        let path = self.root.join(interface).join(file);
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents.trim().to_string()),
            Err(e) => {
                // Down links answer EINVAL for speed/duplex/carrier
                debug!("Failed to read {:?}: {}", path, e);
                None
            }
        }
    }

    fn classify(&self, name: &str) -> InterfaceKind {
        if name == "lo" {
            return InterfaceKind::Loopback;
        }

        let arp_type = self
            .read_trimmed(name, "type")
            .and_then(|t| t.parse::<i64>().ok());
        if arp_type == Some(ARPHRD_LOOPBACK) {
            return InterfaceKind::Loopback;
        }

        // Link kind is not in sysfs; see InterfaceKind::Dummy
        if name.starts_with("dummy") {
            return InterfaceKind::Dummy;
        }

        InterfaceKind::Other
    }
}

impl InterfaceSource for SysfsSource {
    fn list_interfaces(&self) -> Result<Vec<Interface>> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            CheckError::Platform(format!(
                "Failed to list interfaces in {:?}: {}",
                self.root, e
            ))
        })?;

        let mut interfaces = Vec::new();
        for entry in entries {
            let entry = entry?;
            // Entries are symlinks to device directories; plain files such
            // as bonding_masters are skipped
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let kind = self.classify(&name);
            interfaces.push(Interface::new(name, kind));
        }

        interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Found {} interfaces in {:?}", interfaces.len(), self.root);
        Ok(interfaces)
    }

    fn read_attribute(&self, interface: &str, attribute: Attribute) -> Option<AttributeValue> {
        let raw = self.read_trimmed(interface, attribute.sysfs_file())?;

        match attribute {
            Attribute::Speed | Attribute::Mtu | Attribute::Txqueuelen => {
                raw.parse::<i64>().ok().map(AttributeValue::Number)
            }
            Attribute::Carrier => {
                let carrier = raw.parse::<i64>().ok()?;
                Some(AttributeValue::text(if carrier > 0 { "up" } else { "down" }))
            }
            Attribute::Duplex | Attribute::Operstate => {
                if raw.is_empty() {
                    None
                } else {
                    Some(AttributeValue::text(raw))
                }
            }
        }
    }
}
