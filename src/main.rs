use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use skillsmith::commands::{compile, init, interview, scan, status};
use skillsmith::config::Config;
use skillsmith::validation::clap_skill_name_validator;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable that overrides the log filter.
const LOG_ENV: &str = "SKILLSMITH_LOG";

#[derive(Parser)]
#[command(name = "skillsmith")]
#[command(
    about = "Turn expert knowledge and legacy code into AI skill packages",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Configuration file (replaces the global and project config files)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a new skill package
    Init {
        /// Package name (alphanumeric, dash, underscore only; max 128 characters)
        #[arg(value_parser = clap_skill_name_validator)]
        name: String,

        /// Author recorded in the manifest
        #[arg(long)]
        author: Option<String>,

        /// Industry recorded in the manifest
        #[arg(long)]
        industry: Option<String>,

        /// Directory the package is created under
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interview a domain expert and write SKILL.md and the manifest summary
    Interview {
        /// Skill package directory
        #[arg(short, long)]
        skill_dir: PathBuf,
    },

    /// Extract business logic from a Python file into tools
    Scan {
        /// Python source file to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// Skill package directory
        #[arg(short, long)]
        skill_dir: PathBuf,
    },

    /// Generate tools_schema.json from the package's tools
    Compile {
        /// Skill package directory
        #[arg(short, long)]
        skill_dir: PathBuf,
    },

    /// Show a summary of a skill package
    Status {
        /// Skill package directory
        #[arg(short, long)]
        skill_dir: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn,skillsmith=info",
        1 => "info,skillsmith=debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let config = Config::load(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::Init {
            name,
            author,
            industry,
            output,
        } => {
            let author = author.unwrap_or_else(|| config.package.author.clone());
            let industry = industry.unwrap_or_else(|| config.package.industry.clone());
            let output = output.unwrap_or_else(|| config.package.output_dir.clone());
            init::execute(&name, &author, &industry, &output)
        }
        Commands::Interview { skill_dir } => interview::execute(&skill_dir, &config),
        Commands::Scan { file, skill_dir } => scan::execute(&file, &skill_dir, &config),
        Commands::Compile { skill_dir } => compile::execute(&skill_dir, &config),
        Commands::Status { skill_dir } => status::execute(&skill_dir),
    }
}
