//! check-network-interface main entry point
//!
//! This binary runs a single interface check. It handles CLI parsing and
//! logging setup, prints the summary line and exits with the check status.

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use netif_check::config::{
    CheckConfig, ExpectedValues, FilterConfig, DEFAULT_AGENT_ADDRESS, DEFAULT_CONFIG_FILE_NAME,
    DEFAULT_IFCFG_DIR, DEFAULT_SYSFS_ROOT,
};
use netif_check::event::{DryRunSink, EventSink, UdpSink};
use netif_check::interface::{Carrier, Duplex, OperState};
use netif_check::platform::SysfsSource;
use netif_check::{Check, CheckReport, CheckStatus, APP_NAME, CHECK_NAME, VERSION};

/// Check network interface settings against expected values
#[derive(Parser, Debug)]
#[command(name = "check-network-interface", version = VERSION, about, long_about = None)]
struct Cli {
    /// Comma separated list of interfaces to check (default: ALL)
    #[arg(short = 'i', long = "interface", value_delimiter = ',')]
    interface: Vec<String>,

    /// Comma separated list of interfaces to check (regex)
    #[arg(short = 'I', long = "rinterface", value_delimiter = ',')]
    rinterface: Vec<String>,

    /// Comma separated list of interfaces to ignore
    #[arg(short = 'x', long, value_delimiter = ',')]
    ignore_interface: Vec<String>,

    /// Comma separated list of interfaces to ignore (regex)
    #[arg(short = 'X', long, value_delimiter = ',')]
    rignore_interface: Vec<String>,

    /// JSON configuration file (default: network-interface.json next to the binary)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding ifcfg-<interface> network scripts
    #[arg(long, default_value = DEFAULT_IFCFG_DIR)]
    ifcfg_dir: PathBuf,

    /// Ignore distro network scripts
    #[arg(long)]
    no_ifcfg: bool,

    /// Expected speed in Mb/s
    #[arg(short, long)]
    speed: Option<i64>,

    /// Maximum Transmission Unit
    #[arg(short, long)]
    mtu: Option<i64>,

    /// Transmit queue length
    #[arg(short, long)]
    txqueuelen: Option<i64>,

    /// Expected duplex setting
    #[arg(short, long, value_enum, default_value_t = Duplex::Full)]
    duplex: Duplex,

    /// Expected RFC 2863 operational state
    #[arg(long, value_enum, default_value_t = OperState::Up)]
    operstate: OperState,

    /// Expected physical link state
    #[arg(long, value_enum, default_value_t = Carrier::Up)]
    carrier: Carrier,

    /// Warn instead of throwing a critical failure
    #[arg(short, long)]
    warn: bool,

    /// Print events to stdout instead of sending them to the agent
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Report attributes that cannot be read as UNKNOWN
    #[arg(long)]
    report_unreadable: bool,

    /// Comma separated list of handlers attached to every event
    #[arg(long, value_delimiter = ',')]
    handlers: Vec<String>,

    /// Address of the local monitoring agent
    #[arg(long, default_value = DEFAULT_AGENT_ADDRESS)]
    agent_address: SocketAddr,

    /// Directory listing network interfaces
    #[arg(long, default_value = DEFAULT_SYSFS_ROOT)]
    sysfs_root: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> CheckConfig {
        let config_file = self.config.or_else(default_config_file);

        CheckConfig {
            filter: FilterConfig {
                include: self.interface,
                include_regex: self.rinterface,
                exclude: self.ignore_interface,
                exclude_regex: self.rignore_interface,
            },
            expected: ExpectedValues {
                speed: self.speed,
                mtu: self.mtu,
                txqueuelen: self.txqueuelen,
                duplex: Some(self.duplex),
                operstate: Some(self.operstate),
                carrier: Some(self.carrier),
            },
            config_file,
            ifcfg_dir: (!self.no_ifcfg).then_some(self.ifcfg_dir),
            sysfs_root: self.sysfs_root,
            agent_address: self.agent_address,
            handlers: self.handlers,
            warn: self.warn,
            dry_run: self.dry_run,
            report_unreadable: self.report_unreadable,
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // Bad flags are an UNKNOWN result, not a usage exit code
            let _ = e.print();
            println!("{} {}: {}", CHECK_NAME, CheckStatus::Unknown, usage_error_line(&e));
            std::process::exit(i32::from(CheckStatus::Unknown.code()));
        }
    };

    // Initialize logging
    init_logging(cli.verbose);

    info!("Starting {} v{}", APP_NAME, VERSION);

    let code = match run(cli) {
        Ok(report) => {
            println!("{} {}: {}", CHECK_NAME, report.status, report.message);
            report.exit_code()
        }
        Err(e) => {
            error!("Check failed: {:#}", e);
            println!("{} {}: {:#}", CHECK_NAME, CheckStatus::Unknown, e);
            i32::from(CheckStatus::Unknown.code())
        }
    };

    std::process::exit(code);
}

/// Initialize structured logging with tracing.
///
/// Logs go to stderr; stdout carries the check output.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// First line of a clap error without its `error: ` prefix
fn usage_error_line(e: &clap::Error) -> String {
    let rendered = e.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

/// Run the check
fn run(cli: Cli) -> anyhow::Result<CheckReport> {
    let config = cli.into_config();
    debug!("Running with config: {:?}", config);

    let check = Check::new(&config).context("invalid configuration")?;
    let source = SysfsSource::new(&config.sysfs_root);

    let mut sink: Box<dyn EventSink> = if config.dry_run {
        Box::new(DryRunSink::stdout())
    } else {
        Box::new(UdpSink::new(config.agent_address))
    };

    let report = check
        .run(&source, &mut *sink)
        .context("interface check failed")?;
    Ok(report)
}

/// `network-interface.json` in the directory of the running binary
fn default_config_file() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(DEFAULT_CONFIG_FILE_NAME))
}
