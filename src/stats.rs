use std::collections::HashMap;

use crate::models::{EventRecord, UserCount};

/// Groups events by user id, counts each group, and sorts the result by
/// count descending. The sort is stable, so tied users keep the order in
/// which their first event appeared in the input.
pub fn aggregate_counts(events: &[EventRecord]) -> Vec<UserCount> {
    let mut counts: Vec<UserCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for event in events {
        match index.get(event.user_id.as_str()) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(event.user_id.as_str(), counts.len());
                counts.push(UserCount {
                    username: event.username.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Index of the entry to highlight: the first occurrence of the maximum
/// count. `None` only for an empty aggregate.
pub fn top_index(counts: &[UserCount]) -> Option<usize> {
    let max = counts.iter().map(|c| c.count).max()?;
    counts.iter().position(|c| c.count == max)
}
