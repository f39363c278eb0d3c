//! # Loot Generator Command Line
//!
//! Loads a catalog, builds a filter from flags or a saved preset, and prints
//! the generated loot.

use clap::Parser;
use log::{error, info};
use loot_generator::{
    config, load_catalog, load_presets, save_presets, utils, BudgetPolicy, FilterSpec,
    GenerationConfig, LootError, LootGenerator, LootResult, LootSummary, Period, Size,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line arguments for the loot generator.
#[derive(Parser, Debug)]
#[command(name = "loot-generator")]
#[command(about = "Generate random loot under a point budget")]
#[command(version)]
struct Args {
    /// Catalog item file
    #[arg(long, default_value = config::DEFAULT_ITEMS_FILE)]
    items: PathBuf,

    /// Material file
    #[arg(long, default_value = config::DEFAULT_MATERIALS_FILE)]
    materials: PathBuf,

    /// Point budget to spend
    #[arg(short, long)]
    points: Option<u32>,

    /// Items must carry one of these tags (repeatable)
    #[arg(short, long = "include")]
    include: Vec<String>,

    /// Items must carry every --include tag instead of any one
    #[arg(long)]
    require_all_tags: bool,

    /// Items must carry none of these tags (repeatable)
    #[arg(short, long = "exclude")]
    exclude: Vec<String>,

    /// Minimum rarity, inclusive
    #[arg(long)]
    min_rarity: Option<u32>,

    /// Maximum rarity, inclusive
    #[arg(long)]
    max_rarity: Option<u32>,

    /// Largest size allowed (tiny, small, midsize, large, huge)
    #[arg(long)]
    max_size: Option<Size>,

    /// Allowed period (repeatable; tribal, medieval, modern, postmodern, spacer)
    #[arg(long = "period")]
    periods: Vec<Period>,

    /// Start from a saved preset; other filter flags override it
    #[arg(long)]
    preset: Option<String>,

    /// Preset file
    #[arg(long, default_value = config::DEFAULT_PRESETS_FILE)]
    presets: PathBuf,

    /// Save the resulting filter as a preset under this name
    #[arg(long)]
    save_preset: Option<String>,

    /// What a draw costs: base-cost, modified-cost, or max-cost
    #[arg(long, default_value_t = BudgetPolicy::default())]
    budget_policy: BudgetPolicy,

    /// Random seed for reproducible loot
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print entries as JSON instead of a grouped list
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting loot generator v{}", loot_generator::VERSION);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        use tracing::Level;

        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .format_target(false)
            .init();
    }
}

/// Builds the filter from the preset (if any) and the command line flags.
fn build_filter(args: &Args) -> LootResult<FilterSpec> {
    let mut spec = match &args.preset {
        Some(name) => {
            let presets = load_presets(&args.presets)?;
            presets
                .get(name)
                .cloned()
                .ok_or_else(|| LootError::PresetNotFound(name.clone()))?
        }
        None => FilterSpec::new(config::DEFAULT_BUDGET),
    };

    if let Some(points) = args.points {
        spec.budget = points;
    }
    spec.include_tags.extend(args.include.iter().cloned());
    if args.require_all_tags {
        spec = spec.require_all_tags();
    }
    spec.exclude_tags.extend(args.exclude.iter().cloned());
    spec.min_rarity = args.min_rarity.or(spec.min_rarity);
    spec.max_rarity = args.max_rarity.or(spec.max_rarity);
    spec.max_size = args.max_size.or(spec.max_size);
    spec.periods.extend(args.periods.iter().copied());

    spec.validate()?;
    Ok(spec)
}

fn run(args: &Args) -> LootResult<()> {
    let catalog = load_catalog(&args.items, &args.materials)?;
    let spec = build_filter(args)?;

    if let Some(name) = &args.save_preset {
        let mut presets = load_presets(&args.presets)?;
        presets.insert(name.clone(), spec.clone());
        save_presets(&presets, &args.presets)?;
        info!("Saved preset {} to {}", name, args.presets.display());
    }

    let config = GenerationConfig {
        seed: args.seed,
        budget_policy: args.budget_policy,
    };
    let mut rng = utils::create_rng(&config);
    let loot = LootGenerator::new(config).generate(&catalog, &spec, &mut rng)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&loot)?);
    } else {
        println!("{}", LootSummary::from_entries(&loot));
    }
    Ok(())
}
