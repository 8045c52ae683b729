// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar dates and timestamp-derived ids.

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Format a match date the way it is shown to users (`dd/mm/yyyy`).
pub fn format_for_display(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Parse a calendar date from any of the text forms backends have produced.
///
/// Accepts `YYYY-MM-DD`, an RFC 3339 datetime (the date part is kept, in UTC),
/// and the comma-separated `year,month,day` form.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    let mut parts = raw.split(',').map(str::trim);
    let year = parts.next()?.parse().ok()?;
    let month = parts.next()?.parse().ok()?;
    let day = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Serde codec for calendar dates on the wire.
///
/// Always writes `YYYY-MM-DD`; reads any form accepted by
/// [`parse_calendar_date`] as well as a `[year, month, day]` array.
pub mod calendar_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Parts(i32, u32, u32),
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Text(raw) => super::parse_calendar_date(&raw)
                .ok_or_else(|| de::Error::custom(format!("invalid calendar date: {raw:?}"))),
            Repr::Parts(year, month, day) => NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| {
                    de::Error::custom(format!("invalid calendar date: [{year}, {month}, {day}]"))
                }),
        }
    }
}

/// Issues millisecond-timestamp ids that never repeat within one generator.
///
/// Two ids requested in the same millisecond are bumped by one so the
/// sequence stays strictly increasing.
#[derive(Debug, Default)]
pub struct TimestampIds {
    last: AtomicI64,
}

impl TimestampIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        now.max(previous + 1).to_string()
    }
}
