//! Expectation resolution
//!
//! Every attribute of every interface is resolved on its own, against the
//! layers below in precedence order. The first layer with a value wins:
//!
//! 1. JSON per-interface override file
//! 2. `ifcfg-<iface>` network script
//! 3. fixed loopback defaults (loopback interfaces only)
//! 4. command line flags
//!
//! With no value in any layer the attribute passes unconditionally.

use crate::config::{ExpectedValues, IfcfgFile, InterfaceOverrides};
use crate::interface::{Attribute, AttributeValue, Interface};
use std::fmt;

/// MTU of the loopback device
pub const LOOPBACK_MTU: i64 = 65536;

/// Transmit queue length of the loopback device
pub const LOOPBACK_TXQUEUELEN: i64 = 0;

/// Operational state the kernel reports for loopback
pub const LOOPBACK_OPERSTATE: &str = "unknown";

/// Layer an expectation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectationSource {
    /// JSON override file
    JsonConfig,
    /// Distro network script
    Ifcfg,
    /// Built-in loopback defaults
    LoopbackDefault,
    /// Command line flag
    CommandLine,
}

impl fmt::Display for ExpectationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JsonConfig => write!(f, "json config"),
            Self::Ifcfg => write!(f, "ifcfg"),
            Self::LoopbackDefault => write!(f, "loopback default"),
            Self::CommandLine => write!(f, "command line"),
        }
    }
}

/// Resolved expected value and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    /// Expected value
    pub value: AttributeValue,
    /// Layer that supplied it
    pub source: ExpectationSource,
}

/// Built-in expectation for loopback devices
pub fn loopback_default(attribute: Attribute) -> Option<AttributeValue> {
    match attribute {
        Attribute::Mtu => Some(AttributeValue::Number(LOOPBACK_MTU)),
        Attribute::Txqueuelen => Some(AttributeValue::Number(LOOPBACK_TXQUEUELEN)),
        Attribute::Operstate => Some(AttributeValue::text(LOOPBACK_OPERSTATE)),
        _ => None,
    }
}

/// Resolves expectations against the configured layers
#[derive(Debug, Clone, Copy)]
pub struct ExpectationResolver<'a> {
    overrides: &'a InterfaceOverrides,
    cli: &'a ExpectedValues,
}

impl<'a> ExpectationResolver<'a> {
    /// Create a resolver over the JSON overrides and command line values
    pub fn new(overrides: &'a InterfaceOverrides, cli: &'a ExpectedValues) -> Self {
        Self { overrides, cli }
    }

    /// Resolve the expectation for one attribute of `interface`.
    ///
    /// `ifcfg` is the interface's network script, if it has one.
    pub fn resolve(
        &self,
        interface: &Interface,
        ifcfg: Option<&IfcfgFile>,
        attribute: Attribute,
    ) -> Option<Expectation> {
        if let Some(value) = self.overrides.get(&interface.name, attribute) {
            return Some(Expectation {
                value: value.clone(),
                source: ExpectationSource::JsonConfig,
            });
        }

        if let Some(value) = ifcfg.and_then(|f| f.get(attribute)) {
            return Some(Expectation {
                value: value.clone(),
                source: ExpectationSource::Ifcfg,
            });
        }

        if interface.is_loopback() {
            if let Some(value) = loopback_default(attribute) {
                return Some(Expectation {
                    value,
                    source: ExpectationSource::LoopbackDefault,
                });
            }
        }

        self.cli.get(attribute).map(|value| Expectation {
            value,
            source: ExpectationSource::CommandLine,
        })
    }
}
