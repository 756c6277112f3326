//! Interface data model
//!
//! Observed interfaces, the attributes the check knows about and the
//! values those attributes can take.

use clap::ValueEnum;
use std::collections::BTreeMap;
use std::fmt;

/// An attribute checked on every interface, in event order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    /// Link speed in Mb/s
    Speed,
    /// Maximum Transmission Unit
    Mtu,
    /// Duplex mode (`half` / `full`)
    Duplex,
    /// Physical link state (`up` / `down`)
    Carrier,
    /// RFC 2863 operational state
    Operstate,
    /// Transmit queue length
    Txqueuelen,
}

impl Attribute {
    /// All attributes, in the order events are emitted
    pub const ALL: [Attribute; 6] = [
        Attribute::Speed,
        Attribute::Mtu,
        Attribute::Duplex,
        Attribute::Carrier,
        Attribute::Operstate,
        Attribute::Txqueuelen,
    ];

    /// Name used in check names, messages and the JSON override file
    pub fn name(&self) -> &'static str {
        match self {
            Self::Speed => "speed",
            Self::Mtu => "mtu",
            Self::Duplex => "duplex",
            Self::Carrier => "carrier",
            Self::Operstate => "operstate",
            Self::Txqueuelen => "txqueuelen",
        }
    }

    /// File name of the attribute under the interface's sysfs directory
    pub fn sysfs_file(&self) -> &'static str {
        match self {
            Self::Txqueuelen => "tx_queue_len",
            other => other.name(),
        }
    }

    /// Whether the attribute holds an integer
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Speed | Self::Mtu | Self::Txqueuelen)
    }

    /// Look up an attribute by its name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.name() == name)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Observed or expected attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Integer value (speed, mtu, txqueuelen)
    Number(i64),
    /// Text value (duplex, carrier, operstate)
    Text(String),
}

impl AttributeValue {
    /// Build a text value, normalised to lower case
    pub fn text(value: impl AsRef<str>) -> Self {
        Self::Text(value.as_ref().trim().to_ascii_lowercase())
    }

    /// Compare an observed value with an expectation.
    ///
    /// Text is compared case-insensitively; a number never equals text.
    pub fn matches(&self, expected: &AttributeValue) -> bool {
        match (self, expected) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a.eq_ignore_ascii_case(b),
            _ => false,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Coarse interface classification used by the default exclusion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceKind {
    /// Loopback device
    Loopback,
    /// Dummy device, recognised by the `dummy` name prefix only.
    ///
    /// sysfs does not expose the rtnetlink link kind, and a missing
    /// `device` link is shared by every virtual interface (bridges, veth,
    /// bonds), so a dummy created under another name is checked like any
    /// other interface. Exclude it with `-x`/`-X`.
    Dummy,
    /// Anything else
    Other,
}

impl InterfaceKind {
    /// Loopback and dummy devices are skipped unless explicitly selected
    pub fn excluded_by_default(&self) -> bool {
        matches!(self, Self::Loopback | Self::Dummy)
    }
}

/// An interface and the attributes read for it.
///
/// `None` marks an attribute that could not be read.
#[derive(Debug, Clone)]
pub struct Interface {
    /// Interface name (e.g. `eth0`)
    pub name: String,
    /// Classification
    pub kind: InterfaceKind,
    /// Observed attributes
    pub attributes: BTreeMap<Attribute, Option<AttributeValue>>,
}

impl Interface {
    /// Create an interface with no attributes read yet
    pub fn new(name: impl Into<String>, kind: InterfaceKind) -> Self {
        Self {
            name: name.into(),
            kind,
            attributes: BTreeMap::new(),
        }
    }

    /// Whether the interface gets the fixed loopback expectations
    pub fn is_loopback(&self) -> bool {
        self.kind == InterfaceKind::Loopback
    }

    /// Observed value for an attribute, if it was readable
    pub fn get(&self, attribute: Attribute) -> Option<&AttributeValue> {
        self.attributes.get(&attribute).and_then(|v| v.as_ref())
    }
}

/// Duplex setting accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Duplex {
    /// Half duplex
    Half,
    /// Full duplex
    Full,
}

/// RFC 2863 operational state accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OperState {
    /// Unknown
    Unknown,
    /// Not present
    #[value(name = "notpresent")]
    NotPresent,
    /// Down
    Down,
    /// Lower layer down
    #[value(name = "lowerlayerdown")]
    LowerLayerDown,
    /// Testing
    Testing,
    /// Dormant
    Dormant,
    /// Up
    Up,
}

/// Carrier state accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Carrier {
    /// No link
    Down,
    /// Link detected
    Up,
}

impl Duplex {
    /// sysfs spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Half => "half",
            Self::Full => "full",
        }
    }
}

impl OperState {
    /// All states, as reported by the kernel
    pub const NAMES: [&'static str; 7] = [
        "unknown",
        "notpresent",
        "down",
        "lowerlayerdown",
        "testing",
        "dormant",
        "up",
    ];

    /// sysfs spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::NotPresent => "notpresent",
            Self::Down => "down",
            Self::LowerLayerDown => "lowerlayerdown",
            Self::Testing => "testing",
            Self::Dormant => "dormant",
            Self::Up => "up",
        }
    }
}

impl Carrier {
    /// Spelling used in events
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Up => "up",
        }
    }
}
