use crate::domain::model::{FlagPlan, Group, TagResult};
use crate::domain::night::{CtpSelection, NightResult};
use std::fmt::Write;

fn group_name(groups: &[Group], index: usize) -> String {
    groups
        .get(index)
        .map(|g| g.name.clone())
        .unwrap_or_else(|| format!("Group {}", index + 1))
}

fn tag_text(tag: Option<u32>) -> String {
    tag.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Duty table, one line per CTP hole, then per-group totals.
pub fn render_flag_plan(plan: &FlagPlan, groups: &[Group]) -> String {
    let mut out = String::new();
    if plan.is_empty() {
        out.push_str("No CTP flags to place.\n");
        return out;
    }

    let _ = writeln!(out, "{:<6} {:<20} {:<20}", "Hole", "Bring out", "Pick up");
    for duty in &plan.duties {
        let _ = writeln!(
            out,
            "{:<6} {:<20} {:<20}",
            duty.hole,
            group_name(groups, duty.bring_out),
            group_name(groups, duty.pick_up)
        );
    }

    out.push('\n');
    for index in 0..groups.len() {
        let bring = plan.bring_out_holes(index);
        let pick = plan.pick_up_holes(index);
        if bring.is_empty() && pick.is_empty() {
            continue;
        }
        let _ = writeln!(
            out,
            "{}: bring out {:?}, pick up {:?}",
            group_name(groups, index),
            bring,
            pick
        );
    }
    out
}

pub fn render_tag_results(results: &[TagResult]) -> String {
    let mut out = String::new();
    if results.is_empty() {
        out.push_str("No players entered.\n");
        return out;
    }

    for r in results {
        let _ = writeln!(out, "Rank {}: {}", r.rank, r.name);
        let _ = write!(out, "  Raw Score: {}", r.raw_score);
        if let (Some(handicap), Some(net)) = (r.handicap, r.net_score) {
            let _ = write!(out, " (handicap {}, net {})", handicap, net);
        }
        out.push('\n');
        let _ = writeln!(
            out,
            "  Old Tag: {} -> New Tag: {}",
            tag_text(r.old_tag),
            tag_text(r.new_tag)
        );
        let _ = writeln!(out, "  Change: {}", r.change);
    }
    out
}

pub fn render_night(result: &NightResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "CTP holes ({} policy): {:?}",
        result.policy,
        result.ctp.holes()
    );
    if let CtpSelection::Random { reason, .. } = &result.ctp {
        let _ = writeln!(out, "  picked at random: {}", reason);
    }
    out.push('\n');
    out.push_str(&render_flag_plan(&result.flags, &result.groups));
    out.push('\n');
    out.push_str(&render_tag_results(&result.tags));
    out
}
