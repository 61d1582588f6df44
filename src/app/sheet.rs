use crate::domain::model::{Player, TagNumber};
use crate::utils::error::Result;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One line of the score sheet. Blank cells are absent values, never zero.
#[derive(Debug, Deserialize)]
struct SheetRow {
    name: String,
    #[serde(default)]
    handicap: Option<f64>,
    #[serde(default)]
    tag_in: Option<TagNumber>,
    #[serde(default)]
    score: Option<i32>,
}

impl From<SheetRow> for Player {
    fn from(row: SheetRow) -> Self {
        Player {
            name: row.name,
            handicap: row.handicap,
            tag_in: row.tag_in,
            raw_score: row.score,
        }
    }
}

/// Reads `name,handicap,tag_in,score` rows.
pub fn read_score_sheet<R: Read>(reader: R) -> Result<Vec<Player>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut players = Vec::new();
    for row in csv_reader.deserialize::<SheetRow>() {
        players.push(Player::from(row?));
    }
    tracing::debug!("Read {} players from score sheet", players.len());
    Ok(players)
}

pub fn read_score_sheet_file<P: AsRef<Path>>(path: P) -> Result<Vec<Player>> {
    let file = std::fs::File::open(path)?;
    read_score_sheet(file)
}
