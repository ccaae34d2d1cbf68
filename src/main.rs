use clap::{Parser, Subcommand};
use folio::app::{self, BootstrapError};
use folio::loader::{self, FsFetcher};
use folio::target::Document;
use folio::{config, output, replay};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Data-driven personal portfolio page")]
#[command(long_about = "\
Data-driven personal portfolio page

Everything on the page comes from JSON documents under the site root.
They are fetched in parallel and merged key-by-key, later documents
winning:

  site/
  ├── folio.toml                   # Settings (optional)
  └── config/
      ├── config.json              # personal_info, social_links, skills, contact
      ├── manifest.json            # site_config
      └── portfolio.json           # portfolio (an object, or a bare list)

Run 'folio gen-config' to generate a documented folio.toml.")]
#[command(version)]
struct Cli {
    /// Site root; source documents are resolved against it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Settings file [default: <root>/folio.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (e.g. "debug", "folio::app=trace"); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and decode every source, then print an inventory
    Check,
    /// Render the page and print every written region
    Render,
    /// Render the page, then run a JSON event script against it
    Replay {
        /// Script file: [{ "at_ms": 0, "event": { "type": "scroll" } }, …]
        script: PathBuf,
    },
    /// Print a stock folio.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let settings = || load_settings(&cli.root, cli.config.as_deref());
    let fetcher = FsFetcher::new(cli.root.clone());

    match &cli.command {
        Command::Check => {
            let settings = settings()?;
            println!("==> Checking {}", cli.root.display());
            let decoded = loader::load(&fetcher, &settings.sources)
                .map_err(BootstrapError::from)
                .and_then(|configuration| {
                    let content = configuration.decode()?;
                    Ok((configuration, content))
                });
            match decoded {
                Ok((configuration, content)) => {
                    output::print_check_output(&settings.sources, &configuration, &content);
                    println!("==> Content is valid");
                }
                Err(error) => return Ok(report_failure(&error)),
            }
        }
        Command::Render => match app::bootstrap(&settings()?, &fetcher, Document::new()) {
            Ok(app) => output::print_document(app.target()),
            Err(failure) => return Ok(report_failure(&failure.error)),
        },
        Command::Replay { script } => {
            let settings = settings()?;
            let steps = replay::parse_script(&std::fs::read_to_string(script)?)?;
            match app::bootstrap(&settings, &fetcher, Document::new()) {
                Ok(mut app) => {
                    let frames = replay::replay(&mut app, steps);
                    output::print_frames(&frames);
                }
                Err(failure) => return Ok(report_failure(&failure.error)),
            }
        }
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(ExitCode::SUCCESS)
}

/// `RUST_LOG`-style filter to stderr. The flag wins over the environment;
/// with neither, only warnings and errors are shown.
fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(spec) => EnvFilter::new(spec),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .try_init()
        .ok();
}

/// An explicit `--config` must exist; the implicit `<root>/folio.toml` may be absent.
fn load_settings(
    root: &Path,
    explicit: Option<&Path>,
) -> Result<config::AppConfig, config::ConfigError> {
    match explicit {
        Some(path) => config::read_config_file(path),
        None => config::load_config(&root.join("folio.toml")),
    }
}

/// Print the visitor-facing banner, with the cause on stderr.
fn report_failure(error: &BootstrapError) -> ExitCode {
    println!("{}", error.banner());
    eprintln!("error: {error}");
    ExitCode::FAILURE
}
