//! Interface check runner
//!
//! Ties the pieces together: enumerate interfaces, filter them, read their
//! attributes, resolve expectations, compare, emit one event per attribute
//! and roll the results up into an overall status.

mod resolver;
mod status;

pub use resolver::{
    loopback_default, Expectation, ExpectationResolver, ExpectationSource, LOOPBACK_MTU,
    LOOPBACK_OPERSTATE, LOOPBACK_TXQUEUELEN,
};
pub use status::CheckStatus;

use crate::config::{CheckConfig, IfcfgDir, IfcfgFile, InterfaceOverrides};
use crate::error::Result;
use crate::event::{Event, EventSink};
use crate::filter::InterfaceFilter;
use crate::interface::{Attribute, Interface};
use crate::platform::InterfaceSource;
use tracing::{debug, info, warn};

/// Outcome of a check run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Interfaces that were checked
    pub interfaces: Vec<String>,
    /// Number of events emitted
    pub events: usize,
    /// Number of mismatched or unknown attributes
    pub problems: usize,
    /// Overall status
    pub status: CheckStatus,
    /// Summary message
    pub message: String,
}

impl CheckReport {
    /// Process exit code for this report
    pub fn exit_code(&self) -> i32 {
        i32::from(self.status.code())
    }
}

/// Check name for an interface attribute
pub fn check_name(interface: &str, attribute: Attribute) -> String {
    format!("network-interface-{}-{}", interface, attribute)
}

/// A configured check, ready to run
pub struct Check<'a> {
    config: &'a CheckConfig,
    filter: InterfaceFilter,
    overrides: InterfaceOverrides,
    ifcfg: Option<IfcfgDir>,
}

impl<'a> Check<'a> {
    /// Validate the configuration and load the file-based layers
    pub fn new(config: &'a CheckConfig) -> Result<Self> {
        config.validate()?;
        let filter = InterfaceFilter::new(&config.filter)?;
        let overrides = config.load_overrides()?;
        if !overrides.is_empty() {
            debug!("Loaded overrides for {} interfaces", overrides.len());
        }

        Ok(Self {
            config,
            filter,
            overrides,
            ifcfg: config.ifcfg(),
        })
    }

    /// Run the check, sending one event per readable attribute to `sink`
    pub fn run(&self, source: &dyn InterfaceSource, sink: &mut dyn EventSink) -> Result<CheckReport> {
        let interfaces = self.filter.apply(source.list_interfaces()?);
        let resolver = ExpectationResolver::new(&self.overrides, &self.config.expected);

        let mut events = 0;
        let mut problems = 0;

        for mut interface in interfaces.iter().cloned() {
            source.read_attributes(&mut interface);
            let ifcfg = self.load_ifcfg(&interface.name);

            for attribute in Attribute::ALL {
                let expectation = resolver.resolve(&interface, ifcfg.as_ref(), attribute);
                let Some((status, message)) = self.evaluate(&interface, attribute, expectation.as_ref())
                else {
                    continue;
                };

                if status.is_problem() {
                    problems += 1;
                }

                let event = Event::new(
                    check_name(&interface.name, attribute),
                    status,
                    message,
                    &self.config.handlers,
                );
                sink.emit(&event)?;
                events += 1;
            }
        }

        let names: Vec<String> = interfaces.into_iter().map(|i| i.name).collect();
        let status = CheckStatus::aggregate(problems, self.config.warn);
        let message = if problems > 0 {
            format!("Found {} problems", problems)
        } else if names.is_empty() {
            "No interfaces matched the filters".to_string()
        } else {
            format!(
                "All interfaces ({}) are matching the specified settings",
                names.join(", ")
            )
        };

        info!(
            "Checked {} interfaces: {} events, {} problems",
            names.len(),
            events,
            problems
        );

        Ok(CheckReport {
            interfaces: names,
            events,
            problems,
            status,
            message,
        })
    }

    /// Compare one attribute with its expectation.
    ///
    /// Returns `None` when the attribute is unreadable and such attributes
    /// are skipped.
    pub fn evaluate(
        &self,
        interface: &Interface,
        attribute: Attribute,
        expectation: Option<&Expectation>,
    ) -> Option<(CheckStatus, String)> {
        let name = &interface.name;

        let Some(observed) = interface.get(attribute) else {
            if self.config.report_unreadable {
                return Some((
                    CheckStatus::Unknown,
                    format!("Failed to look up {} on {}", attribute, name),
                ));
            }
            debug!("Skipping unreadable {} on {}", attribute, name);
            return None;
        };

        let result = match expectation {
            Some(exp) if observed.matches(&exp.value) => (
                CheckStatus::Ok,
                format!("Found expected {} ({}) on {}", attribute, exp.value, name),
            ),
            Some(exp) => {
                debug!("{} on {}: expectation from {}", attribute, name, exp.source);
                (
                    CheckStatus::failure(self.config.warn),
                    format!(
                        "Expected {} {} but found {} on {}",
                        attribute, exp.value, observed, name
                    ),
                )
            }
            None => (
                CheckStatus::Ok,
                format!("Found {} {} on {}", attribute, observed, name),
            ),
        };

        Some(result)
    }

    fn load_ifcfg(&self, interface: &str) -> Option<IfcfgFile> {
        let dir = self.ifcfg.as_ref()?;
        match dir.load(interface) {
            Ok(file) => file,
            Err(e) => {
                warn!("Ignoring network script for {}: {}", interface, e);
                None
            }
        }
    }
}
