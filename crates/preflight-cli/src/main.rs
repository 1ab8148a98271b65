//! CLI entry point for preflight.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `preflight-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use preflight_app::{
    EXIT_RUNTIME_ERROR, ExplainOutput, OutputFormat, PreflightInput, render_report,
    run_explain, run_preflight, runtime_error_report, verdict_exit_code, write_report,
    write_text,
};
use preflight_settings::Overrides;
use std::io::ErrorKind;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(
    name = "preflight",
    version,
    about = "Host preflight checks run before cluster bootstrap"
)]
struct Cli {
    /// Path to preflight config TOML (a missing file means defaults).
    #[arg(long, global = true, default_value = "preflight.toml")]
    config: Utf8PathBuf,

    /// Override profile (control-plane|node).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Checks whose errors are shown as warnings, e.g. host.memory or all.
    #[arg(long, global = true, value_delimiter = ',')]
    ignore_preflight_errors: Vec<String>,

    /// Container runtime CLI used to detect the cgroup driver.
    #[arg(long, global = true)]
    runtime: Option<String>,

    /// Override the minimum memory, in MB.
    #[arg(long, global = true)]
    min_memory_mb: Option<u64>,

    /// Deadline for each external command, in milliseconds.
    #[arg(long, global = true)]
    command_timeout_ms: Option<u64>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the pre-flight checks and print the result.
    Check {
        /// Also write the JSON report here.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Output format (text, markdown, or json).
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the rendered output here instead of stdout.
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "host.memory") or code (e.g., "memory_below_minimum") to explain.
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Check {
            ref report_out,
            ref format,
            ref output,
        } => cmd_check(&cli, report_out.clone(), format, output.as_ref()),
        Commands::Explain { ref identifier } => cmd_explain(identifier),
    }
}

/// `RUST_LOG` wins when set; otherwise `info`. `--verbose` adds `debug` on top.
fn init_tracing(verbose: bool) {
    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if verbose {
        filter = filter.add_directive(Level::DEBUG.into());
    }

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_check(
    cli: &Cli,
    report_out: Option<Utf8PathBuf>,
    format: &str,
    output_path: Option<&Utf8PathBuf>,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let format: OutputFormat = format.parse().context("invalid --format")?;

        let cfg_text = read_config(&cli.config)?;

        let overrides = Overrides {
            profile: cli.profile.clone(),
            ignore_preflight_errors: cli.ignore_preflight_errors.clone(),
            minimum_mb: cli.min_memory_mb,
            runtime: cli.runtime.clone(),
            command_timeout_ms: cli.command_timeout_ms,
        };

        let input = PreflightInput {
            config_text: &cfg_text,
            overrides,
            cancel: None,
        };
        let output = run_preflight(input)?;

        if let Some(path) = &report_out {
            write_report(path, &output.report).context("write report json")?;
        }
        let rendered = render_report(&output.report, format)?;
        match output_path {
            Some(path) => write_text(path, &rendered).context("write output")?,
            None => print!("{}", rendered),
        }

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            if let Some(path) = &report_out {
                let report = runtime_error_report(&format!("{err:#}"));
                let _ = write_report(path, &report);
            }
            eprintln!("preflight error: {err:#}");
            std::process::exit(EXIT_RUNTIME_ERROR);
        }
    }
}

/// A missing file means defaults; any other read failure is an error.
fn read_config(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(config = %path, "no config file; using defaults");
            Ok(String::new())
        }
        Err(err) => Err(err).with_context(|| format!("read config: {}", path)),
    }
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", preflight_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                preflight_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
