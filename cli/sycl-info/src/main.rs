//! sycl-info: lists installed SYCL implementations and the platform/device
//! configurations each can target on this machine.

mod commands;
mod hardware;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use sycl_info_matchers::{Catalog, ConfigSelector, PlatformSet};
use sycl_info_selector::{parse_target, TARGET_ENV_VAR};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "sycl-info",
    version,
    about = "Lists SYCL implementations and the hardware configurations they support"
)]
struct Cli {
    /// Selects a SYCL implementation by name or 1-based index and displays its configurations
    #[arg(long = "impl", value_name = "IMPL")]
    implementation: Option<String>,

    /// Specifies a path to a directory containing .syclinfo files
    #[arg(long, value_name = "PATH")]
    hint: Option<PathBuf>,

    /// Selects a platform/device configuration from an implementation, as <platform>:<device>
    #[arg(long, value_name = "P:D", requires = "implementation", requires = "device_cflags")]
    config: Option<ConfigSelector>,

    /// Selects a SYCL back-end from a platform/device configuration
    #[arg(long, value_name = "BACKEND", requires = "config")]
    target: Option<String>,

    /// Outputs the flags required by the device compiler for a platform/device configuration
    #[arg(long, requires = "config")]
    device_cflags: bool,

    /// Displays all available platforms and devices, supported or not
    #[arg(short, long, requires = "implementation")]
    all: bool,

    /// Restricts enumeration to vendor[:device_type], e.g. intel:gpu
    #[arg(long, value_name = "VENDOR[:TYPE]", env = TARGET_ENV_VAR, default_value = "*")]
    device: String,

    /// Only considers devices that support SPIR
    #[arg(long)]
    spir_only: bool,

    /// Displays additional details
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut out = io::stdout().lock();
    let result = run(cli, &mut out).and_then(|()| out.flush().map_err(Into::into));
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let paths = sycl_info_finder::search_paths_from_env(cli.hint.as_deref());
    debug!("Descriptor search paths: {paths:?}");
    let catalog = sycl_info_finder::load_catalog(&paths);

    debug!("Platform API: {}", hardware::api_name());
    let api = hardware::native_api();
    let snapshot = || -> Result<PlatformSet> {
        let filter = parse_target(&cli.device)
            .and_then(|request| request.filter())
            .with_context(|| format!("invalid device request '{}'", cli.device))?;
        Ok(hardware::snapshot(&api, &filter, !cli.spir_only))
    };
    run_with(&cli, &catalog, snapshot, out)
}

/// Dispatch on the parsed options. `hardware` is only called when an
/// implementation has been selected.
fn run_with(
    cli: &Cli,
    catalog: &Catalog,
    hardware: impl FnOnce() -> Result<PlatformSet>,
    out: &mut impl Write,
) -> Result<()> {
    let Some(query) = cli.implementation.as_deref() else {
        return commands::list::run(catalog, out);
    };

    let (index, descriptor) = catalog.resolve(query).ok_or_else(|| {
        anyhow!("no SYCL implementation matches '{query}' (run without --impl to list them)")
    })?;
    debug!("Selected implementation {index}: {}", descriptor.name);

    let hardware = hardware()?;
    match cli.config {
        Some(selector) => commands::config::run(
            descriptor,
            &hardware,
            selector,
            cli.target.as_deref().unwrap_or(""),
            cli.all,
            out,
        ),
        None => commands::show::run(descriptor, &hardware, cli.all, out),
    }
}
