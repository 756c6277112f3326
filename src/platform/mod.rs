//! Platform-specific implementations
//!
//! This module abstracts where interfaces and their attributes come from.
//! On Linux that is the sysfs network class directory.

mod linux;

pub use linux::{SysfsSource, ARPHRD_LOOPBACK};

use crate::error::Result;
use crate::interface::{Attribute, AttributeValue, Interface};
use tracing::debug;

/// Source of network interfaces and their attributes
pub trait InterfaceSource {
    /// Enumerate interfaces, sorted by name, with no attributes read
    fn list_interfaces(&self) -> Result<Vec<Interface>>;

    /// Read one attribute; `None` when it cannot be read
    fn read_attribute(&self, interface: &str, attribute: Attribute) -> Option<AttributeValue>;

    /// Read every checked attribute into `interface`
    fn read_attributes(&self, interface: &mut Interface) {
        for attribute in Attribute::ALL {
            let value = self.read_attribute(&interface.name, attribute);
            if value.is_none() {
                debug!("{} unreadable on {}", attribute, interface.name);
            }
            interface.attributes.insert(attribute, value);
        }
    }
}
