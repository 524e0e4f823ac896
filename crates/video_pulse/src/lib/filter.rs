//! Selection of the scraped videos worth processing.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use itertools::Itertools;

use crate::types::VideoRecord;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Videos left after every filter, newest first
    pub videos: Vec<VideoRecord>,
    /// Videos kept before the time filter was applied
    pub total_fetched: usize,
}

/// Drops members-only videos, keeps the `max_per_channel` newest videos of every
/// channel, then keeps the ones uploaded less than `time_filter_hours` before `now`.
///
/// A `time_filter_hours` of `0` disables the time filter. Videos without a
/// parseable date never pass an enabled time filter.
pub fn select_videos(
    videos: Vec<VideoRecord>,
    max_per_channel: usize,
    time_filter_hours: u32,
    now: DateTime<Utc>,
) -> Selection {
    let mut per_channel: HashMap<Option<String>, usize> = HashMap::new();

    let capped = videos
        .into_iter()
        .filter(|v| !v.is_members_only)
        // newest first; videos without a usable date sort last
        .sorted_by(|a, b| b.published_at().cmp(&a.published_at()))
        .filter(|v| {
            let count = per_channel.entry(v.channel_url.clone()).or_default();
            *count += 1;
            *count <= max_per_channel
        })
        .collect::<Vec<_>>();

    let total_fetched = capped.len();

    if time_filter_hours == 0 {
        return Selection {
            videos: capped,
            total_fetched,
        };
    }

    let window = TimeDelta::hours(i64::from(time_filter_hours));
    let videos = capped
        .into_iter()
        .filter(|v| match v.published_at() {
            Some(published) => now - published < window,
            None => {
                tracing::warn!(
                    url = ?v.url,
                    date = ?v.date,
                    "Dropping video without a usable upload date"
                );
                false
            }
        })
        .collect();

    Selection {
        videos,
        total_fetched,
    }
}
