//! Configuration management
//!
//! This module holds the settings for a check run, assembled from command
//! line flags, plus the two file-based expectation layers: the JSON
//! per-interface override file and distro network scripts.

mod ifcfg;
mod json;
pub mod validation;

pub use ifcfg::{IfcfgDir, IfcfgFile, DEFAULT_IFCFG_DIR};
pub use json::{InterfaceOverrides, JsonConfigFile};

use crate::error::{CheckError, Result};
use crate::interface::{Attribute, AttributeValue, Carrier, Duplex, OperState};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default sysfs directory listing network interfaces
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/net";

/// Default address of the local monitoring agent socket
pub const DEFAULT_AGENT_ADDRESS: &str = "127.0.0.1:3030";

/// Name of the JSON override file looked up next to the executable
pub const DEFAULT_CONFIG_FILE_NAME: &str = "network-interface.json";

/// Settings for a single check run
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Interface selection rules
    pub filter: FilterConfig,
    /// Expectations given on the command line
    pub expected: ExpectedValues,
    /// JSON override file
    pub config_file: Option<PathBuf>,
    /// Directory holding `ifcfg-<iface>` scripts, `None` disables the layer
    pub ifcfg_dir: Option<PathBuf>,
    /// Directory listing network interfaces
    pub sysfs_root: PathBuf,
    /// Monitoring agent address
    pub agent_address: SocketAddr,
    /// Handlers attached to every event
    pub handlers: Vec<String>,
    /// Report mismatches as warnings instead of critical failures
    pub warn: bool,
    /// Print events instead of sending them
    pub dry_run: bool,
    /// Emit UNKNOWN events for attributes that cannot be read
    pub report_unreadable: bool,
}

/// Include/exclude rules for interface selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Exact names to check
    pub include: Vec<String>,
    /// Patterns of names to check
    pub include_regex: Vec<String>,
    /// Exact names to ignore
    pub exclude: Vec<String>,
    /// Patterns of names to ignore
    pub exclude_regex: Vec<String>,
}

/// Expected values supplied as command line flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedValues {
    /// Expected speed in Mb/s
    pub speed: Option<i64>,
    /// Expected MTU
    pub mtu: Option<i64>,
    /// Expected transmit queue length
    pub txqueuelen: Option<i64>,
    /// Expected duplex mode
    pub duplex: Option<Duplex>,
    /// Expected operational state
    pub operstate: Option<OperState>,
    /// Expected carrier state
    pub carrier: Option<Carrier>,
}

impl ExpectedValues {
    /// Expectation for an attribute, if one was given
    pub fn get(&self, attribute: Attribute) -> Option<AttributeValue> {
        match attribute {
            Attribute::Speed => self.speed.map(AttributeValue::Number),
            Attribute::Mtu => self.mtu.map(AttributeValue::Number),
            Attribute::Txqueuelen => self.txqueuelen.map(AttributeValue::Number),
            Attribute::Duplex => self.duplex.map(|d| AttributeValue::text(d.as_str())),
            Attribute::Operstate => self.operstate.map(|s| AttributeValue::text(s.as_str())),
            Attribute::Carrier => self.carrier.map(|c| AttributeValue::text(c.as_str())),
        }
    }

    /// No expectations at all; every readable attribute passes
    pub fn none() -> Self {
        Self {
            speed: None,
            mtu: None,
            txqueuelen: None,
            duplex: None,
            operstate: None,
            carrier: None,
        }
    }

    /// Validate the numeric expectations
    pub fn validate(&self) -> Result<()> {
        if let Some(speed) = self.speed {
            validation::validate_speed(speed)?;
        }
        if let Some(mtu) = self.mtu {
            validation::validate_mtu(mtu)?;
        }
        if let Some(len) = self.txqueuelen {
            validation::validate_txqueuelen(len)?;
        }
        Ok(())
    }
}

impl Default for ExpectedValues {
    /// Full duplex, link up, operationally up
    fn default() -> Self {
        Self {
            duplex: Some(Duplex::Full),
            operstate: Some(OperState::Up),
            carrier: Some(Carrier::Up),
            ..Self::none()
        }
    }
}

impl FilterConfig {
    /// Validate exact interface names
    pub fn validate(&self) -> Result<()> {
        for name in self.include.iter().chain(self.exclude.iter()) {
            validation::validate_interface_name(name)?;
        }
        Ok(())
    }
}

impl CheckConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        self.filter
            .validate()
            .map_err(|e| CheckError::Config(format!("Interface filter: {}", e)))?;
        self.expected
            .validate()
            .map_err(|e| CheckError::Config(format!("Expected values: {}", e)))?;

        if self.handlers.iter().any(|h| h.trim().is_empty()) {
            return Err(CheckError::Config("Handler names cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Load the JSON override layer
    pub fn load_overrides(&self) -> Result<InterfaceOverrides> {
        match &self.config_file {
            Some(path) => InterfaceOverrides::load(path),
            None => Ok(InterfaceOverrides::default()),
        }
    }

    /// Network script loader, unless the layer is disabled
    pub fn ifcfg(&self) -> Option<IfcfgDir> {
        self.ifcfg_dir.as_ref().map(IfcfgDir::new)
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            expected: ExpectedValues::default(),
            config_file: None,
            ifcfg_dir: Some(PathBuf::from(DEFAULT_IFCFG_DIR)),
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
            agent_address: SocketAddr::from(([127, 0, 0, 1], 3030)),
            handlers: Vec::new(),
            warn: false,
            dry_run: false,
            report_unreadable: false,
        }
    }
}
