//! Closest-to-pin flag duties.
//!
//! Each CTP hole needs one group to carry its flag out and one group to
//! collect it at the end of the night. The positional policy walks the course
//! as a cycle from every group's starting hole; the load-balanced policy deals
//! duties round-robin over a shuffled group order.

use crate::domain::model::{FlagPlan, FlagPolicy, GroupIndex, Hole, HoleDuty};
use crate::domain::ports::Shuffler;

/// Holes a group plays, starting from its own first hole, before reaching `hole`.
pub fn forward_distance(start: Hole, hole: Hole, total_holes: u32) -> u32 {
    if total_holes == 0 {
        return 0;
    }
    (i64::from(hole) - i64::from(start)).rem_euclid(i64::from(total_holes)) as u32
}

pub fn plan_flags<S: Shuffler>(
    starts: &[Hole],
    ctps: &[Hole],
    total_holes: u32,
    policy: FlagPolicy,
    shuffler: &mut S,
) -> FlagPlan {
    tracing::debug!(
        "Planning {} CTP flags for {} groups ({} policy)",
        ctps.len(),
        starts.len(),
        policy
    );

    match policy {
        FlagPolicy::Positional => plan_positional(starts, ctps, total_holes),
        FlagPolicy::LoadBalanced => plan_load_balanced(starts.len(), ctps, shuffler),
    }
}

/// Nearest group ahead of each hole brings the flag out, farthest picks it up.
/// Ties go to the group listed first.
pub fn plan_positional(starts: &[Hole], ctps: &[Hole], total_holes: u32) -> FlagPlan {
    let mut plan = FlagPlan::default();
    let Some(&first_start) = starts.first() else {
        return plan;
    };
    if total_holes == 0 {
        return plan;
    }

    for &hole in ctps {
        let first = forward_distance(first_start, hole, total_holes);
        let (mut bring_out, mut nearest) = (0, first);
        let (mut pick_up, mut farthest) = (0, first);

        for (index, &start) in starts.iter().enumerate().skip(1) {
            let distance = forward_distance(start, hole, total_holes);
            if distance < nearest {
                nearest = distance;
                bring_out = index;
            }
            if distance > farthest {
                farthest = distance;
                pick_up = index;
            }
        }

        plan.push(HoleDuty {
            hole,
            bring_out,
            pick_up,
        });
    }

    plan
}

/// Deals holes round-robin over two independently shuffled group orders.
pub fn plan_load_balanced<S: Shuffler>(
    group_count: usize,
    ctps: &[Hole],
    shuffler: &mut S,
) -> FlagPlan {
    let mut plan = FlagPlan::default();
    if group_count == 0 {
        return plan;
    }

    let mut bring_order: Vec<GroupIndex> = (0..group_count).collect();
    let mut pick_order = bring_order.clone();
    shuffler.shuffle(&mut bring_order);
    shuffler.shuffle(&mut pick_order);

    for (k, &hole) in ctps.iter().enumerate() {
        plan.push(HoleDuty {
            hole,
            bring_out: bring_order[k % group_count],
            pick_up: pick_order[k % group_count],
        });
    }

    plan
}
