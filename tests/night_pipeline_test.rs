use league_night::adapters::load_snapshot;
use league_night::domain::night::CtpSelection;
use league_night::{
    FileKeyValueStore, InputOrder, LeagueError, LeaguePipeline, LocalStorage, NightEngine,
    TomlConfig,
};
use std::path::Path;
use tempfile::TempDir;

fn write_config(dir: &Path, scores: &str, extra: &str) -> TomlConfig {
    let scores_path = dir.join("scores.csv");
    std::fs::write(&scores_path, scores).unwrap();

    let content = format!(
        r#"
[league]
name = "Test League"

[[groups]]
name = "Aces"
start = 1

[[groups]]
name = "Birdies"
start = 7

[[groups]]
name = "Chains"
start = 13

[[groups]]
name = "Drives"
start = 19

[ctp]
holes = [4]
count = 0

[tags]
scores_file = "{scores}"

[storage]
snapshot_file = "{state}"

[output]
path = "{output}"
formats = ["csv", "json", "text"]
{extra}
"#,
        scores = scores_path.display(),
        state = dir.join("state.json").display(),
        output = dir.join("out").display(),
        extra = extra,
    );
    TomlConfig::from_toml_str(&content).unwrap()
}

fn engine_for(
    config: TomlConfig,
) -> NightEngine<LeaguePipeline<LocalStorage, FileKeyValueStore, TomlConfig, InputOrder>> {
    let storage = LocalStorage::new(config.output_path().to_string());
    let store = FileKeyValueStore::new(config.snapshot_file());
    NightEngine::new(LeaguePipeline::new(storage, store, config, InputOrder))
}

#[test]
fn test_end_to_end_night_writes_exports_and_roster() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        "name,handicap,tag_in,score\nAna,,5,60\nBo,,2,55\nCy,3,,58\n",
        "",
    );

    let outcome = engine_for(config).run().unwrap();

    assert_eq!(outcome.result.ctp, CtpSelection::Requested { holes: vec![4] });
    let duty = outcome.result.flags.duty_for(4).unwrap();
    assert_eq!((duty.bring_out, duty.pick_up), (0, 1));

    let out = dir.path().join("out");
    for name in ["flags.csv", "tags.csv", "night.json", "summary.txt"] {
        assert!(out.join(name).exists(), "missing {}", name);
    }
    let flags = std::fs::read_to_string(out.join("flags.csv")).unwrap();
    assert!(flags.contains("4,Aces,Birdies"));
    let summary = std::fs::read_to_string(out.join("summary.txt")).unwrap();
    assert!(summary.contains("Rank 1: Bo"));

    let store = FileKeyValueStore::new(dir.path().join("state.json"));
    let snapshot = load_snapshot(&store, "league_players").unwrap();
    assert_eq!(snapshot.find("Bo").unwrap().tag, Some(2));
    assert_eq!(snapshot.find("Cy").unwrap().tag, Some(5));
    assert_eq!(snapshot.find("Cy").unwrap().handicap, Some(3.0));
    assert_eq!(snapshot.find("Ana").unwrap().tag, None);
}

#[test]
fn test_outgoing_tags_come_back_next_week() {
    let dir = TempDir::new().unwrap();

    let week1 = write_config(
        dir.path(),
        "name,handicap,tag_in,score\nAna,,1,60\nBo,,2,55\n",
        "",
    );
    engine_for(week1).run().unwrap();

    // tags left blank this week are filled from the roster
    let week2 = write_config(
        dir.path(),
        "name,handicap,tag_in,score\nAna,,,50\nBo,,,57\n",
        "",
    );
    let outcome = engine_for(week2).run().unwrap();

    let ana = outcome.result.tags.iter().find(|r| r.name == "Ana").unwrap();
    assert_eq!(ana.old_tag, Some(2));
    assert_eq!(ana.new_tag, Some(1));
    let bo = outcome.result.tags.iter().find(|r| r.name == "Bo").unwrap();
    assert_eq!(bo.old_tag, Some(1));
    assert_eq!(bo.new_tag, Some(2));
}

#[test]
fn test_incomplete_scores_block_the_night() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "name,handicap,tag_in,score\nAna,,1,60\nBo,,2,\n", "");

    match engine_for(config).run() {
        Err(LeagueError::IncompleteScores { players }) => assert_eq!(players, vec!["Bo"]),
        other => panic!("expected IncompleteScores, got {:?}", other.map(|o| o.output_path)),
    }
    assert!(!dir.path().join("state.json").exists());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "name,handicap,tag_in,score\nAna,,1,60\n", "");

    let outcome = engine_for(config).dry_run().unwrap();

    assert_eq!(outcome.output_path, None);
    assert_eq!(outcome.result.tags.len(), 1);
    assert!(!dir.path().join("state.json").exists());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_compressed_export() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        "name,handicap,tag_in,score\nAna,,1,60\n",
        "\n[output.compression]\nenabled = true\nfilename = \"night.zip\"\n",
    );

    let outcome = engine_for(config).run().unwrap();
    let archive_path = dir.path().join("out").join("night.zip");
    assert!(outcome.output_path.unwrap().ends_with("night.zip"));

    let data = std::fs::read(&archive_path).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["flags.csv", "night.json", "summary.txt", "tags.csv"]);
}

#[test]
fn test_strict_starts_rejects_shared_start() {
    let dir = TempDir::new().unwrap();
    let mut config = write_config(dir.path(), "name,handicap,tag_in,score\n", "");
    config.groups[1].start = 1;
    config.course.strict_starts = Some(true);

    assert!(matches!(
        engine_for(config).run(),
        Err(LeagueError::DuplicateStartingHole { hole: 1, .. })
    ));
}

#[test]
fn test_failed_export_keeps_last_weeks_roster() {
    let dir = TempDir::new().unwrap();
    let week1 = write_config(
        dir.path(),
        "name,handicap,tag_in,score\nAna,,1,60\nBo,,2,55\n",
        "",
    );
    engine_for(week1).run().unwrap();

    let store = FileKeyValueStore::new(dir.path().join("state.json"));
    let before = load_snapshot(&store, "league_players").unwrap();

    // output directory cannot be created under a regular file
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"").unwrap();
    let mut week2 = write_config(
        dir.path(),
        "name,handicap,tag_in,score\nAna,,,50\nBo,,,57\n",
        "",
    );
    week2.output.path = blocker.join("out").display().to_string();

    assert!(matches!(
        engine_for(week2).run(),
        Err(LeagueError::IoError(_))
    ));
    assert_eq!(load_snapshot(&store, "league_players").unwrap(), before);
}

#[test]
fn test_shared_incoming_tag_blocks_the_night() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        "name,handicap,tag_in,score\nAna,,3,50\nBo,,3,55\n",
        "",
    );

    assert!(matches!(
        engine_for(config).run(),
        Err(LeagueError::DuplicateTag { tag: 3, .. })
    ));
    assert!(!dir.path().join("state.json").exists());
}

#[test]
fn test_tag_kept_by_absent_player_cannot_be_claimed() {
    let dir = TempDir::new().unwrap();
    let week1 = write_config(
        dir.path(),
        "name,handicap,tag_in,score\nAna,,1,60\nCy,,4,52\n",
        "",
    );
    engine_for(week1).run().unwrap();

    // Cy sits out and still holds tag 1
    let week2 = write_config(dir.path(), "name,handicap,tag_in,score\nAna,,,58\nBo,,1,50\n", "");
    match engine_for(week2).run() {
        Err(LeagueError::DuplicateTag { tag, holder, claimant }) => {
            assert_eq!(tag, 1);
            assert_eq!(holder, "Cy");
            assert_eq!(claimant, "Bo");
        }
        other => panic!("expected DuplicateTag, got {:?}", other.map(|o| o.output_path)),
    }
}
