//! CLI entry point for metascan.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `metascan-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use metascan_app::{
    ScanInput, probe_exit_code, render_markdown, render_verdict, run_probe, run_scan,
    serialize_report, write_text,
};
use metascan_settings::Overrides;

const DEFAULT_CONFIG: &str = "metascan.toml";

#[derive(Parser, Debug)]
#[command(
    name = "metascan",
    version,
    about = "Discover classpath metadata resources and detect flattened packaging"
)]
struct Cli {
    /// Primary path list (platform path separator).
    #[arg(long, env = "CLASSPATH", default_value = "", global = true)]
    class_path: String,

    /// Module path list, same format as the class path.
    #[arg(long, env = "MODULE_PATH", default_value = "", global = true)]
    module_path: String,

    /// Path to metascan config TOML [default: metascan.toml, if present].
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    /// Override the metadata root resources must live under.
    #[arg(long, global = true)]
    metadata_root: Option<String>,

    /// Override the handling of unreadable entries (fail|skip).
    #[arg(long, global = true)]
    on_error: Option<String>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan the classpath and write the full report.
    Scan {
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Markdown)]
        format: Format,

        /// Where to write the report (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Print only the flattening verdict. Exits 3 when it is indeterminate.
    Probe,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Markdown,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("metascan error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    // RUST_LOG, when set, takes precedence over -v.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir().context("read current directory")?;
    let cwd = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow::anyhow!("current directory is not UTF-8: {}", p.display()))?;
    let config_text = read_config(&cwd, cli.config.as_deref())?;

    let input = ScanInput {
        cwd: &cwd,
        class_path: &cli.class_path,
        module_path: &cli.module_path,
        config_text: &config_text,
        overrides: Overrides {
            metadata_root: cli.metadata_root.clone(),
            on_error: cli.on_error.clone(),
        },
    };

    match &cli.cmd {
        Commands::Scan { format, output } => {
            let report = run_scan(input)?.report;
            let text = match format {
                Format::Markdown => render_markdown(&report),
                Format::Json => serialize_report(&report)?,
            };
            match output {
                Some(path) => write_text(path, &text).context("write report")?,
                None => print!("{text}"),
            }
            Ok(0)
        }
        Commands::Probe => {
            let flattening = run_probe(input)?;
            println!("{}", render_verdict(&flattening));
            Ok(probe_exit_code(flattening.verdict))
        }
    }
}

/// An explicit `--config` must exist; the default file is optional.
fn read_config(cwd: &Utf8Path, explicit: Option<&Utf8Path>) -> anyhow::Result<String> {
    match explicit {
        Some(path) => {
            let path = cwd.join(path);
            std::fs::read_to_string(&path).with_context(|| format!("read config: {path}"))
        }
        None => Ok(std::fs::read_to_string(cwd.join(DEFAULT_CONFIG)).unwrap_or_default()),
    }
}
