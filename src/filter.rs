//! Interface filter engine
//!
//! Applies the include/exclude rules to the enumerated interfaces. Rules
//! are evaluated in a fixed order: exact exclude, regex exclude, exact
//! include, regex include. Regexes are unanchored.

use crate::config::FilterConfig;
use crate::error::{CheckError, Result};
use crate::interface::Interface;
use regex::Regex;
use tracing::debug;

/// Compiled interface filter
#[derive(Debug, Clone)]
pub struct InterfaceFilter {
    include: Vec<String>,
    include_regex: Vec<Regex>,
    exclude: Vec<String>,
    exclude_regex: Vec<Regex>,
}

impl InterfaceFilter {
    /// Compile the rules, rejecting invalid patterns
    pub fn new(config: &FilterConfig) -> Result<Self> {
        Ok(Self {
            include: config.include.clone(),
            include_regex: compile(&config.include_regex)?,
            exclude: config.exclude.clone(),
            exclude_regex: compile(&config.exclude_regex)?,
        })
    }

    /// Whether `name` passes the include/exclude rules
    pub fn accepts(&self, name: &str) -> bool {
        if self.exclude.iter().any(|x| x == name) {
            return false;
        }

        if self.exclude_regex.iter().any(|re| re.is_match(name)) {
            return false;
        }

        if !self.include.is_empty() && !self.include.iter().any(|i| i == name) {
            return false;
        }

        if !self.include_regex.is_empty() && !self.include_regex.iter().any(|re| re.is_match(name)) {
            return false;
        }

        true
    }

    /// Whether an include rule names `name` explicitly
    pub fn explicitly_included(&self, name: &str) -> bool {
        self.include.iter().any(|i| i == name)
            || self.include_regex.iter().any(|re| re.is_match(name))
    }

    /// Keep the interfaces that should be checked.
    ///
    /// Loopback and dummy devices are dropped unless an include rule
    /// selects them.
    pub fn apply(&self, interfaces: Vec<Interface>) -> Vec<Interface> {
        interfaces
            .into_iter()
            .filter(|iface| {
                if iface.kind.excluded_by_default() && !self.explicitly_included(&iface.name) {
                    debug!("Skipping {} ({:?}) by default", iface.name, iface.kind);
                    return false;
                }
                let keep = self.accepts(&iface.name);
                if !keep {
                    debug!("Interface {} filtered out", iface.name);
                }
                keep
            })
            .collect()
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|e| {
                CheckError::Filter(format!("Invalid interface pattern '{}': {}", p, e))
            })
        })
        .collect()
}
