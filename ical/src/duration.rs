// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! DURATION values as defined in RFC 5545 Section 3.3.6.
//!
//! ```txt
//! dur-value  = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
//!
//! dur-date   = dur-day [dur-time]
//! dur-time   = "T" (dur-hour / dur-minute / dur-second)
//! dur-week   = 1*DIGIT "W"
//! dur-hour   = 1*DIGIT "H" [dur-minute]
//! dur-minute = 1*DIGIT "M" [dur-second]
//! dur-second = 1*DIGIT "S"
//! dur-day    = 1*DIGIT "D"
//! ```
//!
//! Days and weeks are taken as 24 hours, which is exact in UTC.

use jiff::SignedDuration;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Parses a duration such as `PT1H`, `P1D` or `-PT15M`.
///
/// Returns `None` if the value does not follow the grammar above. Hour,
/// minute and second parts must appear in this order but any may be left
/// out, as some clients write `PT1H30S`.
#[must_use]
pub fn parse_duration(value: &str) -> Option<SignedDuration> {
    let value = value.trim();
    let (negative, rest) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let rest = rest.strip_prefix('P')?;

    let (date, time) = match rest.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (rest, None),
    };

    let mut seconds = match date {
        "" if time.is_none() => return None,
        "" => 0,
        _ => {
            if let Some(weeks) = date.strip_suffix('W') {
                if time.is_some() {
                    return None;
                }
                number(weeks)?.checked_mul(7 * SECONDS_PER_DAY)?
            } else {
                number(date.strip_suffix('D')?)?.checked_mul(SECONDS_PER_DAY)?
            }
        }
    };
    if let Some(time) = time {
        seconds = seconds.checked_add(time_seconds(time)?)?;
    }

    let duration = SignedDuration::from_secs(seconds);
    Some(if negative { -duration } else { duration })
}

/// Sums the `H`, `M` and `S` parts of a `dur-time` without its `T`.
fn time_seconds(time: &str) -> Option<i64> {
    if time.is_empty() {
        return None;
    }

    let mut total = 0i64;
    let mut last_rank = 0;
    let mut rest = time;
    while !rest.is_empty() {
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        let n = number(rest.get(..digits)?)?;
        let (rank, scale) = match rest.get(digits..=digits)? {
            "H" => (1, 60 * 60),
            "M" => (2, 60),
            "S" => (3, 1),
            _ => return None,
        };
        if rank <= last_rank {
            return None;
        }
        last_rank = rank;
        total = total.checked_add(n.checked_mul(scale)?)?;
        rest = rest.get(digits + 1..)?;
    }
    Some(total)
}

fn number(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
