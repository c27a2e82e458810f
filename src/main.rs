/*!
 * kubefetch CLI - Command Line Interface
 */

use clap::{Parser, Subcommand, ValueEnum};
use kubefetch::{
    cli_style::print_error,
    commands::kubeconfig::{self, KubeconfigArgs},
    config::{default_config_path, AppConfig},
    error::{Result, EXIT_SUCCESS},
    logging::{self, LogLevel, LogSettings},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kubefetch")]
#[command(version, about = "Fetch and install the kubeconfig of a provisioned cluster", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.kubefetch/config.toml)
    #[arg(long, value_name = "FILE", env = "KUBEFETCH_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, value_name = "FILE", global = true)]
    log: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value = "warn", global = true)]
    log_level: LogLevelArg,

    /// Verbose output (debug logging)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the kubeconfig of a cluster and install it to ~/.kube/config
    Kubeconfig(KubeconfigArgs),
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => LogLevel::Error,
            LogLevelArg::Warn => LogLevel::Warn,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Trace => LogLevel::Trace,
        }
    }
}

fn main() {
    let code = match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::error!(category = %e.category(), "{}", e);
            print_error(&e.to_string(), e.suggestion());
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let log_settings = LogSettings {
        level: cli.log_level.into(),
        file: cli.log.clone(),
        verbose: cli.verbose,
    };
    if let Err(e) = logging::init_logging(&log_settings) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = AppConfig::load(&config_path)?;
    tracing::debug!(
        path = %config_path.display(),
        clusters = config.clusters.len(),
        "configuration loaded"
    );

    match cli.command {
        Commands::Kubeconfig(args) => kubeconfig::run(args, &config),
    }
}
