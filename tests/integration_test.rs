//! Integration tests for netif-check
//!
//! These tests run whole checks against a fake sysfs tree.

use netif_check::config::{CheckConfig, ExpectedValues, FilterConfig};
use netif_check::event::Event;
use netif_check::interface::{Carrier, Duplex, OperState};
use netif_check::platform::SysfsSource;
use netif_check::{Check, CheckError, CheckStatus};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct FakeHost {
    dir: TempDir,
}

impl FakeHost {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sys")).unwrap();
        fs::create_dir_all(dir.path().join("ifcfg")).unwrap();
        Self { dir }
    }

    fn sysfs(&self) -> std::path::PathBuf {
        self.dir.path().join("sys")
    }

    fn ifcfg(&self) -> std::path::PathBuf {
        self.dir.path().join("ifcfg")
    }

    fn add_interface(&self, name: &str, attrs: &[(&str, &str)]) {
        let iface = self.sysfs().join(name);
        fs::create_dir_all(&iface).unwrap();
        for (file, value) in attrs {
            fs::write(iface.join(file), format!("{}\n", value)).unwrap();
        }
    }

    fn add_ethernet(&self, name: &str, mtu: &str) {
        self.add_interface(
            name,
            &[
                ("type", "1"),
                ("speed", "1000"),
                ("mtu", mtu),
                ("duplex", "full"),
                ("carrier", "1"),
                ("operstate", "up"),
                ("tx_queue_len", "1000"),
            ],
        );
    }

    fn add_loopback(&self) {
        self.add_interface(
            "lo",
            &[
                ("type", "772"),
                ("mtu", "65536"),
                ("carrier", "1"),
                ("operstate", "unknown"),
                ("tx_queue_len", "1000"),
            ],
        );
    }

    fn write_json(&self, contents: &str) -> std::path::PathBuf {
        let path = self.dir.path().join("network-interface.json");
        fs::write(&path, contents).unwrap();
        path
    }

    fn config(&self) -> CheckConfig {
        CheckConfig {
            sysfs_root: self.sysfs(),
            ifcfg_dir: Some(self.ifcfg()),
            config_file: Some(self.dir.path().join("network-interface.json")),
            ..CheckConfig::default()
        }
    }
}

fn run(host: &FakeHost, config: &CheckConfig) -> (netif_check::CheckReport, Vec<Event>) {
    let check = Check::new(config).expect("valid config");
    let source = SysfsSource::new(host.sysfs());
    let mut events: Vec<Event> = Vec::new();
    let report = check.run(&source, &mut events).expect("check runs");
    (report, events)
}

fn event<'a>(events: &'a [Event], name: &str) -> &'a Event {
    events
        .iter()
        .find(|e| e.name == name)
        .unwrap_or_else(|| panic!("no event named {}", name))
}

#[test]
fn test_all_matching() {
    let host = FakeHost::new();
    host.add_ethernet("eth0", "1500");
    host.add_ethernet("eth1", "1500");
    host.add_loopback();

    let (report, events) = run(&host, &host.config());

    assert_eq!(report.status, CheckStatus::Ok);
    assert_eq!(report.problems, 0);
    assert_eq!(report.interfaces, vec!["eth0", "eth1"]);
    assert_eq!(
        report.message,
        "All interfaces (eth0, eth1) are matching the specified settings"
    );
    assert_eq!(events.len(), 12);
    assert!(events.iter().all(|e| e.status == 0));
    assert!(events.iter().all(|e| !e.name.contains("-lo-")));

    let duplex = event(&events, "network-interface-eth0-duplex");
    assert_eq!(duplex.output, "OK: Found expected duplex (full) on eth0");
    let mtu = event(&events, "network-interface-eth0-mtu");
    assert_eq!(mtu.output, "OK: Found mtu 1500 on eth0");
}

#[test]
fn test_event_order_per_interface() {
    let host = FakeHost::new();
    host.add_ethernet("eth0", "1500");

    let (_, events) = run(&host, &host.config());
    let names: Vec<_> = events.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "network-interface-eth0-speed",
            "network-interface-eth0-mtu",
            "network-interface-eth0-duplex",
            "network-interface-eth0-carrier",
            "network-interface-eth0-operstate",
            "network-interface-eth0-txqueuelen",
        ]
    );
}

#[test]
fn test_mismatch_is_critical() {
    let host = FakeHost::new();
    host.add_ethernet("eth0", "1500");

    let mut config = host.config();
    config.expected.mtu = Some(9000);
    let (report, events) = run(&host, &config);

    assert_eq!(report.status, CheckStatus::Critical);
    assert_eq!(report.problems, 1);
    assert_eq!(report.message, "Found 1 problems");
    assert_eq!(report.exit_code(), 2);

    let mtu = event(&events, "network-interface-eth0-mtu");
    assert_eq!(mtu.status, 2);
    assert_eq!(mtu.output, "CRITICAL: Expected mtu 9000 but found 1500 on eth0");
}

#[test]
fn test_mismatch_with_warn_flag() {
    let host = FakeHost::new();
    host.add_ethernet("eth0", "1500");
    host.add_interface(
        "eth1",
        &[("duplex", "half"), ("carrier", "0"), ("operstate", "down")],
    );

    let mut config = host.config();
    config.warn = true;
    let (report, events) = run(&host, &config);

    assert_eq!(report.status, CheckStatus::Warning);
    assert_eq!(report.problems, 3);
    assert_eq!(report.exit_code(), 1);
    for name in ["duplex", "carrier", "operstate"] {
        let e = event(&events, &format!("network-interface-eth1-{}", name));
        assert_eq!(e.status, 1);
        assert!(e.output.starts_with("WARNING: Expected"));
    }
}

#[test]
fn test_unreadable_attributes_skipped() {
    let host = FakeHost::new();
    // Down link: kernel refuses speed/duplex, so no files
    host.add_interface("eth0", &[("mtu", "1500"), ("operstate", "up"), ("carrier", "1")]);

    let (report, events) = run(&host, &host.config());
    assert_eq!(report.status, CheckStatus::Ok);
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| !e.name.ends_with("-speed")));
}

#[test]
fn test_unreadable_attributes_reported() {
    let host = FakeHost::new();
    host.add_interface("eth0", &[("mtu", "1500"), ("operstate", "up"), ("carrier", "1")]);

    let mut config = host.config();
    config.report_unreadable = true;
    let (report, events) = run(&host, &config);

    assert_eq!(report.problems, 3);
    assert_eq!(report.status, CheckStatus::Critical);
    let speed = event(&events, "network-interface-eth0-speed");
    assert_eq!(speed.status, 3);
    assert_eq!(speed.output, "UNKNOWN: Failed to look up speed on eth0");
}

#[test]
fn test_excluded_interfaces_emit_nothing() {
    let host = FakeHost::new();
    for name in ["eth0", "eth1", "virbr0", "docker0"] {
        host.add_ethernet(name, "1500");
    }

    let mut config = host.config();
    config.filter = FilterConfig {
        exclude: vec!["eth1".to_string()],
        exclude_regex: vec!["^(virbr|docker)".to_string()],
        ..Default::default()
    };
    let (report, events) = run(&host, &config);

    assert_eq!(report.interfaces, vec!["eth0"]);
    assert!(events.iter().all(|e| e.name.starts_with("network-interface-eth0-")));
}

#[test]
fn test_loopback_defaults_when_selected() {
    let host = FakeHost::new();
    host.add_loopback();
    host.add_ethernet("eth0", "1500");

    let mut config = host.config();
    config.filter.include = vec!["lo".to_string()];
    config.expected.mtu = Some(1500);
    config.expected.txqueuelen = Some(1000);
    let (report, events) = run(&host, &config);

    assert_eq!(report.interfaces, vec!["lo"]);
    assert_eq!(
        event(&events, "network-interface-lo-mtu").output,
        "OK: Found expected mtu (65536) on lo"
    );
    assert_eq!(
        event(&events, "network-interface-lo-operstate").output,
        "OK: Found expected operstate (unknown) on lo"
    );
    // The kernel reports 1000 here but loopback is expected to have 0
    let txq = event(&events, "network-interface-lo-txqueuelen");
    assert_eq!(txq.status, 2);
    assert_eq!(txq.output, "CRITICAL: Expected txqueuelen 0 but found 1000 on lo");
    assert_eq!(report.problems, 1);
}

#[test]
fn test_json_overrides_loopback_and_cli() {
    let host = FakeHost::new();
    host.add_loopback();
    host.add_ethernet("eth0", "9000");
    host.write_json(
        r#"{"interfaces": {"lo": {"txqueuelen": 1000}, "eth0": {"mtu": 9000}}}"#,
    );

    let mut config = host.config();
    config.filter.include = vec!["lo".to_string(), "eth0".to_string()];
    config.expected.mtu = Some(1500);
    let (report, events) = run(&host, &config);

    assert_eq!(report.status, CheckStatus::Ok, "events: {:?}", events);
    assert_eq!(
        event(&events, "network-interface-eth0-mtu").output,
        "OK: Found expected mtu (9000) on eth0"
    );
    assert_eq!(event(&events, "network-interface-lo-txqueuelen").status, 0);
}

#[test]
fn test_precedence_json_over_ifcfg_over_cli() {
    let host = FakeHost::new();
    host.add_ethernet("eth0", "1400");
    host.add_ethernet("eth1", "1400");
    fs::write(host.ifcfg().join("ifcfg-eth0"), "MTU=1400\n").unwrap();
    fs::write(host.ifcfg().join("ifcfg-eth1"), "MTU=1400\n").unwrap();
    host.write_json(r#"{"interfaces": {"eth1": {"mtu": 9000}}}"#);

    let mut config = host.config();
    config.expected.mtu = Some(1500);
    let (report, events) = run(&host, &config);

    assert_eq!(event(&events, "network-interface-eth0-mtu").status, 0);
    assert_eq!(
        event(&events, "network-interface-eth1-mtu").output,
        "CRITICAL: Expected mtu 9000 but found 1400 on eth1"
    );
    assert_eq!(report.problems, 1);
}

#[test]
fn test_ifcfg_layer_disabled() {
    let host = FakeHost::new();
    host.add_ethernet("eth0", "1400");
    fs::write(host.ifcfg().join("ifcfg-eth0"), "MTU=1400\n").unwrap();

    let mut config = host.config();
    config.expected.mtu = Some(1500);
    config.ifcfg_dir = None;
    let (report, _) = run(&host, &config);
    assert_eq!(report.problems, 1);
}

#[test]
fn test_custom_expectations() {
    let host = FakeHost::new();
    host.add_interface(
        "wlan0",
        &[("duplex", "half"), ("carrier", "0"), ("operstate", "dormant")],
    );

    let mut config = host.config();
    config.expected = ExpectedValues {
        duplex: Some(Duplex::Half),
        carrier: Some(Carrier::Down),
        operstate: Some(OperState::Dormant),
        ..ExpectedValues::none()
    };
    let (report, events) = run(&host, &config);
    assert_eq!(report.status, CheckStatus::Ok);
    assert_eq!(events.len(), 3);
}

#[test]
fn test_handlers_attached() {
    let host = FakeHost::new();
    host.add_ethernet("eth0", "1500");

    let mut config = host.config();
    config.handlers = vec!["default".to_string(), "slack".to_string()];
    let (_, events) = run(&host, &config);
    assert!(events.iter().all(|e| e.handlers == vec!["default", "slack"]));
}

#[test]
fn test_no_interfaces_is_ok() {
    let host = FakeHost::new();
    host.add_loopback();

    let (report, events) = run(&host, &host.config());
    assert_eq!(report.status, CheckStatus::Ok);
    assert!(events.is_empty());
    assert_eq!(report.message, "No interfaces matched the filters");
}

#[test]
fn test_invalid_json_config_fails() {
    let host = FakeHost::new();
    host.add_ethernet("eth0", "1500");
    host.write_json(r#"{"interfaces": {"eth0": {"mtu": "lots"}}}"#);

    let config = host.config();
    assert!(matches!(Check::new(&config), Err(CheckError::Config(_))));
}

#[test]
fn test_invalid_regex_fails() {
    let host = FakeHost::new();
    let mut config = host.config();
    config.filter.include_regex = vec!["[".to_string()];
    assert!(matches!(Check::new(&config), Err(CheckError::Filter(_))));
}

#[test]
fn test_missing_sysfs_fails() {
    let host = FakeHost::new();
    let config = host.config();
    let check = Check::new(&config).unwrap();
    let source = SysfsSource::new(Path::new("/nonexistent/sys/class/net"));
    let mut events: Vec<Event> = Vec::new();
    assert!(matches!(
        check.run(&source, &mut events),
        Err(CheckError::Platform(_))
    ));
}
