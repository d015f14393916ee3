//! Greedy day-by-day allocation.
//!
//! Topics are walked in priority order with a single date cursor shared
//! across all of them. Each day goes wholly to one topic's next chunk, so a
//! day is never split between topics and never revisited. Once the cursor
//! passes the end date, the remaining topics are truncated.

use chrono::{Days, NaiveDate};

use crate::scheduler::TopicAllocation;
use crate::types::{PrioritizedTopic, ScheduleWindow, ScheduledSession};

/// Indices of `topics` sorted by priority, highest first. The sort is
/// stable, so equal scores keep inventory order.
pub fn priority_order(topics: &[PrioritizedTopic]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..topics.len()).collect();
    order.sort_by(|&a, &b| {
        topics[b]
            .priority_score
            .total_cmp(&topics[a].priority_score)
    });
    order
}

/// Emit sessions for `rows` (already in priority order), recording each
/// row's scheduled hours.
pub fn allocate(rows: &mut [TopicAllocation], window: &ScheduleWindow) -> Vec<ScheduledSession> {
    let mut sessions = Vec::new();
    let mut cursor: Option<NaiveDate> = Some(window.start_date);

    for row in rows.iter_mut() {
        let mut remaining = row.adjusted_hours;

        while remaining > 0 {
            let date = match cursor {
                Some(d) if d <= window.end_date => d,
                _ => break,
            };

            let hours = remaining.min(window.daily_hours);
            sessions.push(ScheduledSession {
                topic_id: row.topic_id.clone(),
                topic_name: row.topic_name.clone(),
                date,
                hours,
            });

            remaining -= hours;
            row.scheduled_hours += hours;
            cursor = date.checked_add_days(Days::new(1));
        }
    }

    sessions
}
