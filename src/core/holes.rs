use crate::domain::model::Hole;
use crate::domain::night::CtpSelection;
use crate::domain::ports::Shuffler;
use std::collections::HashSet;

/// Uses the requested CTP holes when they pass the check, otherwise draws
/// `count` distinct holes at random.
///
/// With `count == 0` any non-empty in-range list passes, repeats included.
pub fn select_ctp_holes<S: Shuffler>(
    requested: &[Hole],
    total_holes: u32,
    count: usize,
    shuffler: &mut S,
) -> CtpSelection {
    match check_requested(requested, total_holes, count) {
        Ok(()) => CtpSelection::Requested {
            holes: requested.to_vec(),
        },
        Err(reason) => {
            let want = if count == 0 { requested.len().max(1) } else { count };
            let holes = random_holes(total_holes, want, shuffler);
            tracing::warn!("Using random CTP holes {:?}: {}", holes, reason);
            CtpSelection::Random { holes, reason }
        }
    }
}

fn check_requested(requested: &[Hole], total_holes: u32, count: usize) -> Result<(), String> {
    if requested.is_empty() {
        return Err("no CTP holes were given".to_string());
    }
    if let Some(&hole) = requested.iter().find(|&&h| h == 0 || h > total_holes) {
        return Err(format!("hole {} is not on a {}-hole course", hole, total_holes));
    }
    if count == 0 {
        return Ok(());
    }
    if requested.len() != count {
        return Err(format!("expected {} holes, got {}", count, requested.len()));
    }
    let unique: HashSet<Hole> = requested.iter().copied().collect();
    if unique.len() != requested.len() {
        return Err("CTP holes must not repeat".to_string());
    }
    Ok(())
}

/// `count` distinct holes from `1..=total_holes`, sorted.
pub fn random_holes<S: Shuffler>(total_holes: u32, count: usize, shuffler: &mut S) -> Vec<Hole> {
    let mut all: Vec<Hole> = (1..=total_holes).collect();
    shuffler.shuffle(&mut all);
    all.truncate(count);
    all.sort_unstable();
    all
}
