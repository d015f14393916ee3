//! Effort reconciliation: fit total demand into the window's capacity.

use tracing::debug;

use crate::types::PrioritizedTopic;
use studyplan_core::RescalePolicy;

/// Total estimated hours across all topics.
pub fn total_demand(topics: &[PrioritizedTopic]) -> u64 {
    topics.iter().map(|t| u64::from(t.topic.estimated_hours)).sum()
}

/// Adjusted hours for each topic, index-aligned with `topics`.
///
/// When demand fits, every topic keeps its estimate. Otherwise the topics
/// are scaled down according to `policy`. Topics with a zero estimate stay
/// at zero.
pub fn reconcile(topics: &[PrioritizedTopic], available: u64, policy: RescalePolicy) -> Vec<u32> {
    let demand = total_demand(topics);
    if demand <= available {
        return topics.iter().map(|t| t.topic.estimated_hours).collect();
    }

    debug!(
        "Rescaling demand {}h into {}h capacity ({})",
        demand, available, policy
    );

    match policy {
        RescalePolicy::ProportionalFloor => proportional_floor(topics, available, demand),
        RescalePolicy::LargestRemainder => largest_remainder(topics, available),
    }
}

/// `max(1, floor(estimated * available / demand))`, exact integer arithmetic.
fn proportional_floor(topics: &[PrioritizedTopic], available: u64, demand: u64) -> Vec<u32> {
    topics
        .iter()
        .map(|t| {
            let estimated = t.topic.estimated_hours;
            if estimated == 0 {
                return 0;
            }
            let scaled = u128::from(estimated) * u128::from(available) / u128::from(demand);
            // scaled < estimated since available < demand
            (scaled as u32).max(1)
        })
        .collect()
}

/// Every surviving topic gets one hour, the rest of the capacity is
/// apportioned over `estimated - 1` by largest remainder. If there are more
/// topics than hours, only the highest-priority topics survive.
fn largest_remainder(topics: &[PrioritizedTopic], available: u64) -> Vec<u32> {
    let mut adjusted = vec![0u32; topics.len()];

    // Highest priority first, inventory order among ties.
    let mut ranked: Vec<usize> = (0..topics.len())
        .filter(|&i| topics[i].topic.estimated_hours > 0)
        .collect();
    ranked.sort_by(|&a, &b| {
        topics[b]
            .priority_score
            .total_cmp(&topics[a].priority_score)
    });

    let survivors = ranked.len().min(usize::try_from(available).unwrap_or(usize::MAX));
    for &i in &ranked[..survivors] {
        adjusted[i] = 1;
    }
    if survivors < ranked.len() {
        debug!(
            "Capacity {}h below topic count {}; {} topics dropped",
            available,
            ranked.len(),
            ranked.len() - survivors
        );
        return adjusted;
    }

    let remaining = u128::from(available) - survivors as u128;
    let weight = |i: usize| u128::from(topics[i].topic.estimated_hours - 1);
    let total_weight: u128 = ranked.iter().map(|&i| weight(i)).sum();
    if remaining == 0 || total_weight == 0 {
        return adjusted;
    }

    let mut remainders: Vec<(usize, u128)> = Vec::with_capacity(ranked.len());
    let mut handed_out: u128 = 0;
    for &i in &ranked {
        let share = weight(i) * remaining;
        let whole = share / total_weight;
        adjusted[i] += whole as u32;
        handed_out += whole;
        remainders.push((i, share % total_weight));
    }

    // Stable sort keeps priority order among equal remainders.
    remainders.sort_by(|a, b| b.1.cmp(&a.1));
    let leftover = (remaining - handed_out) as usize;
    for &(i, _) in remainders.iter().take(leftover) {
        adjusted[i] += 1;
    }

    adjusted
}
