//! Application entry point and dispatch.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use anyhow::Result;
use tracing::warn;

use fibdev_bench::io::save_report;
use fibdev_bench::report::PerfMode;
use fibdev_bench::sweep::{select_variant, set_ktime};
use fibdev_bench::{
    client_run, ktime_sweep, perf_run, utime_sweep, verify_all_variants, PerfConfig,
};
use fibdev_cli::{ui, CliPresenter, SweepProgressBar};
use fibdev_core::{CancellationToken, FibDevice, Whence};

use crate::config::{AppConfig, Command};

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        fibdev_cli::completion::generate_completion(&mut cmd, shell, &mut io::stdout());
        return Ok(());
    }

    let cancel = CancellationToken::new();
    ctrlc_handler(cancel.clone());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with(config, &FibDevice::new(), &cancel, &mut out)
}

/// Dispatch a parsed command against `device`, writing results to `out`.
pub fn run_with(
    config: &AppConfig,
    device: &FibDevice,
    cancel: &CancellationToken,
    out: &mut dyn Write,
) -> Result<()> {
    let Some(command) = &config.command else {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        write!(out, "{}", cmd.render_help())?;
        return Ok(());
    };

    let presenter = CliPresenter::new(config.quiet);
    let variant = config.method;

    match command {
        Command::Client { offset } => {
            let log = client_run(device, variant, *offset)?;
            presenter.present_client(&log, out)?;
        }
        Command::Read { index, ktime } => {
            set_ktime(device, *ktime)?;
            select_variant(device, variant)?;
            let mut session = device.open()?;
            let index = session.seek(*index, Whence::Set);
            let value = session.read();
            let latency = ktime.then(|| session.write(&[]));
            session.close();
            presenter.present_read(variant, index, value, latency, out)?;
        }
        Command::Ktime => {
            let samples = ktime_sweep(device, variant, cancel)?;
            presenter.present_sweep(&samples, out)?;
        }
        Command::Utime => {
            let samples = utime_sweep(device, variant, cancel)?;
            presenter.present_sweep(&samples, out)?;
        }
        Command::Perf {
            runs,
            compare,
            cpu,
            threshold,
            output,
        } => {
            let perf_config = PerfConfig {
                variant,
                runs: *runs,
                threshold: *threshold,
                mode: if *compare {
                    PerfMode::Compare
                } else {
                    PerfMode::UserVsDevice
                },
                cpu: *cpu,
            };
            run_perf(
                &perf_config,
                device,
                cancel,
                output.as_deref(),
                config.quiet,
                out,
            )?;
        }
        Command::Verify => {
            let checked = verify_all_variants(cancel)?;
            presenter.present_verify(checked, out)?;
        }
    }

    Ok(())
}

fn run_perf(
    perf_config: &PerfConfig,
    device: &FibDevice,
    cancel: &CancellationToken,
    output: Option<&Path>,
    quiet: bool,
    out: &mut dyn Write,
) -> Result<()> {
    perf_config.validate()?;

    if !quiet {
        let subject = match perf_config.mode {
            PerfMode::UserVsDevice => perf_config.variant.name(),
            PerfMode::Compare => "fast-doubling variants",
        };
        ui::print_header(&format!("perf: {subject}"));
    }

    let bar = SweepProgressBar::new(
        perf_config.total_sweeps(),
        !quiet && io::stderr().is_terminal(),
    );
    let report = perf_run(device, perf_config, cancel, &bar);
    bar.finish();
    let report = report?;

    if perf_config.cpu.is_some() && report.host.pinned_cpu.is_none() {
        ui::print_warning("benchmark ran unpinned");
    }
    if let Some(path) = output {
        save_report(&report, path)?;
    }

    CliPresenter::new(quiet).present_report(&report, out)?;
    Ok(())
}

fn ctrlc_handler(cancel: CancellationToken) {
    if let Err(e) = ctrlc::set_handler(move || cancel.cancel()) {
        warn!("could not install Ctrl+C handler: {e}");
    }
}
