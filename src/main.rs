use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use helixlink::cli::commands::{classify, config, convert, hub, validate};
use helixlink::cli::{CommandContext, Destination, Output};
use helixlink::{HelixError, Phase};

/// Parse a phase name (frame, design, test, build, deploy, iterate)
fn parse_phase(s: &str) -> Result<Phase, String> {
    s.parse().map_err(|e: HelixError| e.to_string())
}

#[derive(Parser)]
#[command(name = "helixlink")]
#[command(
    version,
    about = "Convert HELIX workflow docs to wikilinks and build a navigation hub"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, global = true, help = "Additional config file")]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert markdown links and workflow references to wikilinks
    Convert {
        #[arg(required = true, help = "Files or glob patterns")]
        files: Vec<String>,
        #[arg(long, short, help = "Write converted files under this directory")]
        output: Option<PathBuf>,
        #[arg(long, conflicts_with = "output", help = "Overwrite input files")]
        in_place: bool,
        #[arg(
            long,
            conflicts_with_all = ["output", "in_place"],
            help = "Fail if any file would change"
        )]
        check: bool,
    },

    /// Lint metadata and report broken wikilinks
    Validate {
        #[arg(required = true, help = "Files or glob patterns")]
        files: Vec<String>,
        #[arg(long, help = "Write a JSON report to this path")]
        report: Option<PathBuf>,
        #[arg(long, help = "Minimum severity to print: error, warning, info")]
        severity: Option<String>,
    },

    /// Render the navigation hub
    Hub {
        #[arg(required = true, help = "Files or glob patterns")]
        files: Vec<String>,
        #[arg(long, short, help = "Output path ('-' for stdout)")]
        output: Option<PathBuf>,
    },

    /// Render the index of one phase
    PhaseIndex {
        #[arg(value_parser = parse_phase, help = "Phase: frame, design, test, build, deploy, iterate")]
        phase: Phase,
        #[arg(required = true, help = "Files or glob patterns")]
        files: Vec<String>,
        #[arg(long, short, help = "Output path (default: stdout)")]
        output: Option<PathBuf>,
    },

    /// Show how paths are classified
    Classify {
        #[arg(required = true, help = "Files or glob patterns")]
        files: Vec<String>,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        // Extract panic message
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mhelixlink encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    // Install panic handler first
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            // Content findings exit 1; failures to run exit 2
            match e.downcast_ref::<HelixError>() {
                Some(err) if err.is_finding() => ExitCode::from(1),
                _ => ExitCode::from(2),
            }
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = Output::quiet(cli.quiet);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Convert {
            files,
            output: out_dir,
            in_place,
            check,
        } => {
            let destination = if check {
                Destination::Check
            } else if in_place {
                Destination::InPlace
            } else if let Some(dir) = out_dir {
                Destination::Directory(dir)
            } else {
                Destination::Stdout
            };
            let ctx = CommandContext::load(config_path, &files)?;
            convert::run(&ctx, &destination, &output)?;
        }
        Commands::Validate {
            files,
            report,
            severity,
        } => {
            let ctx = CommandContext::load(config_path, &files)?;
            validate::run(&ctx, report.as_deref(), severity.as_deref(), &output)?;
        }
        Commands::Hub {
            files,
            output: target,
        } => {
            let ctx = CommandContext::load(config_path, &files)?;
            hub::run(&ctx, target, &output)?;
        }
        Commands::PhaseIndex {
            phase,
            files,
            output: target,
        } => {
            let ctx = CommandContext::load(config_path, &files)?;
            hub::run_phase_index(&ctx, phase, target, &output)?;
        }
        Commands::Classify { files, format } => {
            classify::run(&files, &format)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                config::show(config_path, &format)?;
            }
            ConfigAction::Path => {
                config::path()?;
            }
            ConfigAction::Init { global, force } => {
                config::init(global, force, &output)?;
            }
        },
    }

    Ok(())
}
