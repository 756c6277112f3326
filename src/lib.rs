//! netif-check: network interface monitoring check
//!
//! This library inspects the network interfaces the kernel exposes in sysfs,
//! compares their attributes (speed, MTU, duplex, carrier, operational state,
//! transmit queue length) against expected values and reports one event per
//! attribute to a local monitoring agent.
//!
//! # Architecture
//!
//! A run is a single synchronous pass: enumerate interfaces, filter them,
//! read attributes, resolve the expected value of each attribute, compare,
//! emit, then aggregate the results into the process exit status.
//!
//! # Modules
//!
//! - `config`: Check settings, JSON overrides and ifcfg network scripts
//! - `platform`: Interface enumeration and attribute reading (sysfs)
//! - `filter`: Include/exclude rules
//! - `check`: Expectation resolution, comparison and status aggregation
//! - `event`: Event encoding and delivery
//! - `interface`: Interface data model
//! - `error`: Error types and handling

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod check;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod interface;
pub mod platform;

// Re-export commonly used types
pub use check::{Check, CheckReport, CheckStatus};
pub use error::{CheckError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Prefix of the summary line printed on stdout
pub const CHECK_NAME: &str = "CheckNetworkInterface";
