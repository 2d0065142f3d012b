use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use skillsync_core::{Config, ProviderRegistry, config};
use tracing_subscriber::EnvFilter;

mod fetch;
mod prompt;
mod skills;

#[derive(Parser)]
#[command(name = "skillsync", version)]
#[command(about = "skillsync - Sync skills from Git repositories into AI coding tools", long_about = None)]
struct Cli {
    /// Target tools, comma-separated (e.g. claude,codex)
    #[arg(short = 't', long = "target", global = true, value_delimiter = ',')]
    targets: Vec<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install skills from a repository or local directory
    Install {
        /// `owner/repo`, a Git URL, or a local path
        source: String,
        /// Install into the current project only
        #[arg(short, long)]
        local: bool,
        /// Install only the named skill (repeatable)
        #[arg(short, long = "skill")]
        skills: Vec<String>,
        /// Install every skill found without asking
        #[arg(short, long)]
        all: bool,
        /// Accept defaults instead of prompting
        #[arg(short, long)]
        yes: bool,
    },
    /// List installed skills
    List {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove an installed skill
    Remove {
        name: String,
        /// Remove from the current project only
        #[arg(short, long)]
        local: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show supported tools and their skills directories
    Targets,
    /// Show or initialise the config file
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", style("❌ Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let registry = ProviderRegistry::from_env();

    match cli.command {
        Commands::Install {
            source,
            local,
            skills: only,
            all,
            yes,
        } => {
            let config = Config::load_or_init()?;
            skills::install(
                &registry,
                &config,
                skills::InstallArgs {
                    source,
                    targets: cli.targets,
                    local,
                    only,
                    all,
                    yes,
                },
            )
        }
        Commands::List { json } => {
            let config = Config::load_or_init()?;
            skills::list(&registry, &config, &cli.targets, json)
        }
        Commands::Remove { name, local, yes } => {
            let config = Config::load_or_init()?;
            skills::remove(&registry, &config, &name, &cli.targets, local, yes)
        }
        Commands::Targets => skills::print_targets(&registry),
        Commands::Config { init } => show_config(&registry, init),
    }
}

fn show_config(registry: &ProviderRegistry, init: bool) -> Result<()> {
    let path = config::get_config_path()?;

    if init && !path.exists() {
        let written = config::save_config(&Config::default())?;
        println!(
            "{} Config written to {}",
            style("✓").green().bold(),
            style(written.display()).cyan()
        );
        return Ok(());
    }

    if !path.exists() {
        println!("{} No config file at {}", style("!").yellow(), path.display());
        println!("  Create one with: skillsync config --init");
        return Ok(());
    }

    let config = config::load_config()?;
    registry
        .parse(&config.targets)
        .with_context(|| format!("Invalid targets in {}", path.display()))?;

    println!("{} {}", style("📄").dim(), style(path.display()).cyan());
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    println!("{content}");
    Ok(())
}
