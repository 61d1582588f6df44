use crate::adapters::kv::{load_snapshot, save_snapshot};
use crate::app::export::{build_export, zip_files};
use crate::app::sheet::read_score_sheet_file;
use crate::core::flags::plan_flags;
use crate::core::form::{
    duplicate_starts, finalize_scores, validate_ctp_holes, validate_groups, validate_players,
    validate_roster_holders,
};
use crate::core::holes::select_ctp_holes;
use crate::core::tags::tag_results;
use crate::domain::model::{FlagPlan, FlagPolicy, Group, Hole, Player, TagResult};
use crate::domain::night::{CtpSelection, NightInput, NightResult};
use crate::domain::ports::{ConfigProvider, KeyValueStore, Pipeline, Shuffler, Storage};
use crate::domain::roster::RosterSnapshot;
use crate::utils::error::Result;
use chrono::Utc;
use std::path::Path;

/// Course settings for one flag plan.
#[derive(Debug, Clone, Copy)]
pub struct FlagSettings {
    pub total_holes: u32,
    pub ctp_count: usize,
    pub policy: FlagPolicy,
    pub strict_starts: bool,
}

/// Checks the groups, settles the CTP holes and plans the flag duties.
///
/// Shared starts are logged and tolerated unless `strict_starts` is set.
pub fn plan_groups<S: Shuffler>(
    groups: &[Group],
    requested: &[Hole],
    settings: FlagSettings,
    shuffler: &mut S,
) -> Result<(CtpSelection, FlagPlan)> {
    validate_groups(groups, settings.total_holes)?;
    if settings.ctp_count == 0 {
        validate_ctp_holes(requested, settings.total_holes)?;
    }

    for duplicate in duplicate_starts(groups) {
        if settings.strict_starts {
            return Err(duplicate);
        }
        tracing::warn!("{}; flag duties fall back to group order", duplicate);
    }

    let selection = select_ctp_holes(
        requested,
        settings.total_holes,
        settings.ctp_count,
        shuffler,
    );
    let starts: Vec<Hole> = groups.iter().map(|g| g.start).collect();
    let plan = plan_flags(
        &starts,
        selection.holes(),
        settings.total_holes,
        settings.policy,
        shuffler,
    );

    Ok((selection, plan))
}

/// Validates the sheet against itself and the roster, then ranks it into new tags.
pub fn settle_tags(
    players: &[Player],
    snapshot: &RosterSnapshot,
    max_tag: u32,
) -> Result<Vec<TagResult>> {
    validate_players(players, max_tag)?;
    validate_roster_holders(players, snapshot)?;
    let entries = finalize_scores(players)?;
    Ok(tag_results(players, &entries))
}

pub struct LeaguePipeline<S: Storage, K: KeyValueStore, C: ConfigProvider, R: Shuffler> {
    storage: S,
    store: K,
    config: C,
    shuffler: R,
}

impl<S: Storage, K: KeyValueStore, C: ConfigProvider, R: Shuffler> LeaguePipeline<S, K, C, R> {
    pub fn new(storage: S, store: K, config: C, shuffler: R) -> Self {
        Self {
            storage,
            store,
            config,
            shuffler,
        }
    }

    pub fn store(&self) -> &K {
        &self.store
    }
}

impl<S: Storage, K: KeyValueStore, C: ConfigProvider, R: Shuffler> Pipeline
    for LeaguePipeline<S, K, C, R>
{
    fn extract(&mut self) -> Result<NightInput> {
        let snapshot = load_snapshot(&self.store, self.config.snapshot_key())?;
        tracing::debug!("Loaded roster snapshot with {} players", snapshot.players.len());

        let mut players = match self.config.scores_path() {
            Some(path) => {
                tracing::debug!("Reading score sheet from {}", path);
                read_score_sheet_file(Path::new(path))?
            }
            None => {
                tracing::info!("No score sheet configured, planning flags only");
                Vec::new()
            }
        };
        for player in &mut players {
            snapshot.fill_player(player);
        }

        Ok(NightInput {
            total_holes: self.config.total_holes(),
            groups: self.config.groups().to_vec(),
            requested_ctps: self.config.ctp_holes().to_vec(),
            players,
            snapshot,
        })
    }

    fn transform(&mut self, input: NightInput) -> Result<NightResult> {
        let settings = FlagSettings {
            total_holes: input.total_holes,
            ctp_count: self.config.ctp_count(),
            policy: self.config.flag_policy(),
            strict_starts: self.config.strict_starts(),
        };
        let (ctp, flags) = plan_groups(
            &input.groups,
            &input.requested_ctps,
            settings,
            &mut self.shuffler,
        )?;

        let tags = settle_tags(&input.players, &input.snapshot, self.config.max_tag())?;
        let snapshot = if tags.is_empty() {
            input.snapshot
        } else {
            input.snapshot.roll_forward(&tags, Utc::now())
        };

        Ok(NightResult {
            total_holes: input.total_holes,
            groups: input.groups,
            policy: settings.policy,
            ctp,
            flags,
            tags,
            snapshot,
        })
    }

    fn load(&mut self, result: &NightResult) -> Result<String> {
        let files = build_export(result, self.config.output_formats())?;
        let output_path = self.config.output_path();

        let location = match self.config.archive_name() {
            Some(archive) => {
                let data = zip_files(&files)?;
                tracing::debug!("Writing archive ({} bytes) to storage", data.len());
                self.storage.write_file(archive, &data)?;
                format!("{}/{}", output_path, archive)
            }
            None => {
                for file in &files {
                    self.storage.write_file(&file.name, &file.data)?;
                }
                output_path.to_string()
            }
        };

        // roster advances only once the night's exports are on disk
        if result.tags.is_empty() {
            tracing::debug!("No tag results, roster snapshot left unchanged");
        } else {
            save_snapshot(&mut self.store, self.config.snapshot_key(), &result.snapshot)?;
        }

        Ok(location)
    }
}
