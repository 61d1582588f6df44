use crate::app::report::render_night;
use crate::domain::model::{FlagPlan, Group, TagResult};
use crate::domain::night::NightResult;
use crate::utils::error::{LeagueError, Result};
use serde::Serialize;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const OUTPUT_FORMATS: [&str; 3] = ["csv", "json", "text"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Serialize)]
struct FlagRow<'a> {
    hole: u32,
    bring_out: &'a str,
    pick_up: &'a str,
}

#[derive(Serialize)]
struct TagRow<'a> {
    rank: usize,
    name: &'a str,
    raw_score: i32,
    handicap: Option<f64>,
    net_score: Option<f64>,
    old_tag: Option<u32>,
    new_tag: Option<u32>,
    change: String,
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| LeagueError::IoError(e.into_error()))
}

pub fn flags_csv(plan: &FlagPlan, groups: &[Group]) -> Result<Vec<u8>> {
    let name = |index: usize| groups.get(index).map(|g| g.name.as_str()).unwrap_or("");
    let mut writer = csv::Writer::from_writer(Vec::new());
    for duty in &plan.duties {
        writer.serialize(FlagRow {
            hole: duty.hole,
            bring_out: name(duty.bring_out),
            pick_up: name(duty.pick_up),
        })?;
    }
    finish_csv(writer)
}

pub fn tags_csv(results: &[TagResult]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for r in results {
        writer.serialize(TagRow {
            rank: r.rank,
            name: &r.name,
            raw_score: r.raw_score,
            handicap: r.handicap,
            net_score: r.net_score,
            old_tag: r.old_tag,
            new_tag: r.new_tag,
            change: r.change.to_string(),
        })?;
    }
    finish_csv(writer)
}

/// Export files for the requested formats. Unknown formats are skipped.
pub fn build_export(result: &NightResult, formats: &[String]) -> Result<Vec<ExportFile>> {
    let mut files = Vec::new();

    for format in formats {
        match format.as_str() {
            "csv" => {
                files.push(ExportFile {
                    name: "flags.csv".to_string(),
                    data: flags_csv(&result.flags, &result.groups)?,
                });
                files.push(ExportFile {
                    name: "tags.csv".to_string(),
                    data: tags_csv(&result.tags)?,
                });
            }
            "json" => files.push(ExportFile {
                name: "night.json".to_string(),
                data: serde_json::to_vec_pretty(result)?,
            }),
            "text" => files.push(ExportFile {
                name: "summary.txt".to_string(),
                data: render_night(result).into_bytes(),
            }),
            other => tracing::warn!("Skipping unknown output format '{}'", other),
        }
    }

    Ok(files)
}

pub fn zip_files(files: &[ExportFile]) -> Result<Vec<u8>> {
    tracing::debug!("Creating ZIP archive with {} files", files.len());

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for file in files {
        zip.start_file(file.name.as_str(), SimpleFileOptions::default())?;
        zip.write_all(&file.data)?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
