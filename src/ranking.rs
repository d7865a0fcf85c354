//! Top 10 ranking of an event tab
//!
//! Row 0 is the header. Column 0 holds the name, column 1 the score.
//! Scores parse leniently: a leading number is taken, anything else counts as 0.

use serde::{Deserialize, Serialize};

/// Number of entries kept in a ranking
pub const TOP_N: usize = 10;

/// One leaderboard line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub name: String,
    pub points: f64,
}

/// Rank the data rows of `rows` by score, highest first, keeping at most 10.
///
/// Ties keep sheet order. Fewer than two rows (header only, or nothing)
/// yields an empty ranking.
pub fn compute_top10(rows: &[Vec<String>]) -> Vec<RankedEntry> {
    if rows.len() < 2 {
        return Vec::new();
    }

    let mut scored: Vec<(&Vec<String>, f64)> = rows[1..]
        .iter()
        .map(|row| (row, row.get(1).map_or(0.0, |cell| parse_points(cell))))
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .take(TOP_N)
        .map(|(row, points)| RankedEntry {
            name: row.first().cloned().unwrap_or_default(),
            points,
        })
        .collect()
}

/// Parse the leading decimal number of `cell`, or 0 if there is none.
///
/// `"25"` → 25, `" 3.5 pts"` → 3.5, `"1e3"` → 1000, `"x"` → 0.
pub fn parse_points(cell: &str) -> f64 {
    let s = cell.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        // -0 and overflow both collapse to 0
        Ok(value) if value.is_finite() && value != 0.0 => value,
        _ => 0.0,
    }
}
