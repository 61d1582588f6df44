use anyhow::Context;
use clap::Parser;
use league_night::adapters::{load_snapshot, save_snapshot};
use league_night::app::export::{flags_csv, tags_csv};
use league_night::app::report::{render_flag_plan, render_tag_results};
use league_night::app::sheet::read_score_sheet_file;
use league_night::config::cli::{Command, FlagsArgs, TagsArgs};
use league_night::core::night::{plan_groups, settle_tags, FlagSettings};
use league_night::utils::error::{ErrorSeverity, LeagueError};
use league_night::utils::logger::{self, LogFormat};
use league_night::utils::validation::Validate;
use league_night::{CliConfig, FileKeyValueStore, RngShuffler};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(LogFormat::from_json_flag(config.log_json), config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    let outcome = match &config.command {
        Command::Flags(args) => run_flags(args),
        Command::Tags(args) => run_tags(args),
    };

    match outcome {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => exit_with(e),
        Err(e) => Err(e),
    }
}

/// Inner errors are league errors reported with a severity exit code; outer
/// errors are unexpected failures.
type CommandResult = anyhow::Result<Result<(), LeagueError>>;

fn run_flags(args: &FlagsArgs) -> CommandResult {
    if let Err(e) = args.validate() {
        return Ok(Err(e));
    }

    let groups = args.groups();
    let settings = FlagSettings {
        total_holes: args.holes,
        ctp_count: args.ctp_count,
        policy: args.policy,
        strict_starts: args.strict_starts,
    };
    let mut shuffler = RngShuffler::from_seed_option(args.seed);

    let (selection, plan) = match plan_groups(&groups, &args.ctps, settings, &mut shuffler) {
        Ok(planned) => planned,
        Err(e) => return Ok(Err(e)),
    };
    tracing::info!("CTP holes: {:?}", selection.holes());

    if args.csv {
        let data = flags_csv(&plan, &groups)?;
        print!("{}", String::from_utf8_lossy(&data));
    } else {
        print!("{}", render_flag_plan(&plan, &groups));
    }
    Ok(Ok(()))
}

fn run_tags(args: &TagsArgs) -> CommandResult {
    if let Err(e) = args.validate() {
        return Ok(Err(e));
    }

    let mut players = read_score_sheet_file(&args.scores)
        .with_context(|| format!("Failed to read score sheet '{}'", args.scores))?;

    let mut store = args
        .snapshot
        .as_ref()
        .map(|path| FileKeyValueStore::new(path.as_str()));
    let snapshot = match &store {
        Some(store) => load_snapshot(store, &args.key).context("Failed to load roster snapshot")?,
        None => Default::default(),
    };
    for player in &mut players {
        snapshot.fill_player(player);
    }

    let results = match settle_tags(&players, &snapshot, args.max_tag) {
        Ok(results) => results,
        Err(e) => return Ok(Err(e)),
    };

    if args.csv {
        let data = tags_csv(&results)?;
        print!("{}", String::from_utf8_lossy(&data));
    } else {
        print!("{}", render_tag_results(&results));
    }

    if args.save {
        if let Some(store) = store.as_mut() {
            let next = snapshot.roll_forward(&results, chrono::Utc::now());
            save_snapshot(store, &args.key, &next).context("Failed to save roster snapshot")?;
            tracing::info!("✅ Saved {} players to the roster snapshot", next.players.len());
        }
    }
    Ok(Ok(()))
}

fn exit_with(e: LeagueError) -> anyhow::Result<()> {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
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
    Ok(())
}
