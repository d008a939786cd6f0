use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kote_stats::cli::{self, Cli, Commands};
use kote_stats::config::{self, StatsConfig};
use kote_stats::{markers, scan, table};

fn main() -> Result<()> {
    let args = cli::parse_args();
    init_logging(args.verbose);

    let config = build_config(&args)?;
    match args.command.unwrap_or(Commands::Update) {
        Commands::Update => handle_update(&config),
        Commands::Render => handle_render(&config),
        Commands::Init => handle_init(&config),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "kote_stats=debug"
    } else {
        "kote_stats=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Assemble the run configuration: defaults, then config file, then CLI flags.
fn build_config(args: &Cli) -> Result<StatsConfig> {
    let mut config = StatsConfig {
        root: args.root.clone(),
        readme: args.readme.clone(),
        skip_git: args.no_git,
        ..StatsConfig::default()
    };
    if let Some(path) = &args.config {
        config.apply(config::load_overrides(path)?);
    }
    Ok(config)
}

/// Full run: scan, render, rewrite the README block in place.
fn handle_update(config: &StatsConfig) -> Result<()> {
    markers::ensure_readme(&config.readme)?;

    let entries = scan::collect_entries(config)?;
    let solved: usize = entries.iter().map(|entry| entry.total_count).sum();
    let block = table::render(&entries);

    if markers::update_file(&config.readme, &block)? {
        println!(
            "✓ Updated {} ({} repos, {} solved)",
            config.readme.display(),
            entries.len(),
            solved
        );
    } else {
        println!("✓ {} already up to date", config.readme.display());
    }
    Ok(())
}

/// Dry run: print the freshly rendered table without touching the README.
fn handle_render(config: &StatsConfig) -> Result<()> {
    let entries = scan::collect_entries(config)?;
    print!("{}", table::render(&entries));
    Ok(())
}

/// Create the repos root and the skeleton README without scanning.
fn handle_init(config: &StatsConfig) -> Result<()> {
    std::fs::create_dir_all(&config.root)?;
    markers::ensure_readme(&config.readme)?;
    println!(
        "✓ Initialized {} and {}",
        config.root.display(),
        config.readme.display()
    );
    Ok(())
}
