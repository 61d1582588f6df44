use clap::Parser;
use league_night::app::report::render_night;
use league_night::config::toml_config::TomlConfig;
use league_night::utils::error::ErrorSeverity;
use league_night::utils::logger::{self, LogFormat};
use league_night::utils::validation::Validate;
use league_night::{FileKeyValueStore, LeaguePipeline, LocalStorage, NightEngine, RngShuffler};

#[derive(Parser)]
#[command(name = "toml-night")]
#[command(about = "Run a full league night from a TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "league-night.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Write logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Override the flag shuffle seed from config
    #[arg(long)]
    seed: Option<u64>,

    /// Override the score sheet from config
    #[arg(long)]
    scores: Option<String>,

    /// Plan and rank without saving the roster or writing exports
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_logger(LogFormat::from_json_flag(args.log_json), args.verbose);

    tracing::info!("🚀 Starting league night");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(seed) = args.seed {
        config.flags.seed = Some(seed);
        tracing::info!("🔧 Seed overridden to: {}", seed);
    }
    if let Some(scores) = &args.scores {
        config.tags.scores_file = Some(scores.clone());
        tracing::info!("🔧 Score sheet overridden to: {}", scores);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    let storage = LocalStorage::new(config.output_path().to_string());
    let store = FileKeyValueStore::new(config.snapshot_file());
    let shuffler = RngShuffler::from_seed_option(config.seed());
    let pipeline = LeaguePipeline::new(storage, store, config, shuffler);
    let mut engine = NightEngine::new(pipeline);

    let outcome = if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be saved");
        engine.dry_run()
    } else {
        engine.run()
    };

    match outcome {
        Ok(outcome) => {
            println!("{}", render_night(&outcome.result));
            if let Some(output_path) = outcome.output_path {
                tracing::info!("✅ League night completed successfully!");
                println!("📁 Output saved to: {}", output_path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ League night failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  League: {}", config.league.name);
    println!("  Course: {} holes", config.total_holes());
    println!("  Groups: {}", config.groups.len());
    println!("  Flag policy: {}", config.flag_policy());
    if let Some(seed) = config.seed() {
        println!("  Seed: {}", seed);
    }
    println!(
        "  Score sheet: {}",
        config.tags.scores_file.as_deref().unwrap_or("(none)")
    );
    println!(
        "  Roster: {} [{}]",
        config.snapshot_file(),
        config.snapshot_key()
    );
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output.formats.join(", "));
    if config.compression_enabled() {
        println!("  Compression: ZIP");
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
