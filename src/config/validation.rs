//! Configuration validation functions
//!
//! This module provides validation for interface names and expected
//! attribute values coming from the command line, the JSON override file
//! and ifcfg files.

use crate::error::{CheckError, Result};
use crate::interface::{Attribute, AttributeValue, OperState};
use serde_json::Value;

/// Kernel limit on interface name length (IFNAMSIZ - 1)
const MAX_INTERFACE_NAME_LEN: usize = 15;

/// Smallest MTU the kernel accepts for IPv4
const MIN_MTU: i64 = 68;

/// Largest MTU in practical use (loopback)
const MAX_MTU: i64 = 65536;

/// Validate interface name
pub fn validate_interface_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CheckError::Validation(
            "Interface name cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_INTERFACE_NAME_LEN {
        return Err(CheckError::Validation(format!(
            "Interface name '{}' exceeds maximum length of {} characters",
            name, MAX_INTERFACE_NAME_LEN
        )));
    }

    if name == "." || name == ".." {
        return Err(CheckError::Validation(format!(
            "Interface name '{}' is reserved",
            name
        )));
    }

    if name.chars().any(|c| c == '/' || c == ':' || c.is_whitespace()) {
        return Err(CheckError::Validation(format!(
            "Interface name '{}' contains invalid characters ('/', ':' and whitespace are not allowed)",
            name
        )));
    }

    Ok(())
}

/// Validate MTU value (68-65536)
pub fn validate_mtu(mtu: i64) -> Result<()> {
    if !(MIN_MTU..=MAX_MTU).contains(&mtu) {
        return Err(CheckError::Validation(format!(
            "MTU value {} is out of valid range ({}-{})",
            mtu, MIN_MTU, MAX_MTU
        )));
    }
    Ok(())
}

/// Validate expected link speed in Mb/s
pub fn validate_speed(speed: i64) -> Result<()> {
    if speed <= 0 {
        return Err(CheckError::Validation(format!(
            "Speed {} must be a positive number of Mb/s",
            speed
        )));
    }
    Ok(())
}

/// Validate transmit queue length
pub fn validate_txqueuelen(len: i64) -> Result<()> {
    if len < 0 {
        return Err(CheckError::Validation(format!(
            "Transmit queue length {} cannot be negative",
            len
        )));
    }
    Ok(())
}

/// Validate an expected value against the attribute it is meant for
pub fn validate_attribute_value(attribute: Attribute, value: &AttributeValue) -> Result<()> {
    match (attribute, value) {
        (Attribute::Speed, AttributeValue::Number(n)) => validate_speed(*n),
        (Attribute::Mtu, AttributeValue::Number(n)) => validate_mtu(*n),
        (Attribute::Txqueuelen, AttributeValue::Number(n)) => validate_txqueuelen(*n),
        (Attribute::Duplex, AttributeValue::Text(s)) => validate_one_of(attribute, s, &["half", "full"]),
        (Attribute::Carrier, AttributeValue::Text(s)) => validate_one_of(attribute, s, &["up", "down"]),
        (Attribute::Operstate, AttributeValue::Text(s)) => {
            validate_one_of(attribute, s, &OperState::NAMES)
        }
        (attr, value) => Err(CheckError::Validation(format!(
            "Value '{}' has the wrong type for {}",
            value, attr
        ))),
    }
}

fn validate_one_of(attribute: Attribute, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.iter().any(|a| a.eq_ignore_ascii_case(value)) {
        return Ok(());
    }
    Err(CheckError::Validation(format!(
        "Invalid {} '{}' (expected one of: {})",
        attribute,
        value,
        allowed.join(", ")
    )))
}

/// Convert a JSON value into an expectation for `attribute`.
///
/// Numeric attributes accept integers and numeric strings; text attributes
/// accept strings. The result is validated.
pub fn attribute_value_from_json(attribute: Attribute, value: &Value) -> Result<AttributeValue> {
    let converted = if attribute.is_numeric() {
        match value {
            Value::Number(n) => n.as_i64().map(AttributeValue::Number),
            Value::String(s) => s.trim().parse::<i64>().ok().map(AttributeValue::Number),
            _ => None,
        }
    } else {
        match value {
            Value::String(s) => Some(AttributeValue::text(s)),
            _ => None,
        }
    };

    let converted = converted.ok_or_else(|| {
        CheckError::Validation(format!("Invalid value {} for {}", value, attribute))
    })?;

    validate_attribute_value(attribute, &converted)?;
    Ok(converted)
}
