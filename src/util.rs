// Parsing and small numeric helpers.
//
// The loader leans on the `*_safe` parsers so every spreadsheet quirk is
// handled in one place; the report code assumes typed, validated values.
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use num_format::{Locale, ToFormattedString};

/// Hours the stored timestamps run ahead of local (UTC-4) time.
pub const LOCAL_OFFSET_HOURS: u32 = 4;

/// Parse a spreadsheet number, tolerating whitespace and `,` thousands
/// separators. Anything containing letters is rejected.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let v = s.replace(',', "").parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}

/// Vehicle years come out of spreadsheet exports as either `2017` or
/// `2017.0`; both are accepted, `2017.5` is not.
pub fn parse_year_safe(s: Option<&str>) -> Option<i32> {
    let s = s?.trim();
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let f = parse_f64_safe(Some(s))?;
    if f.fract() != 0.0 || f < i32::MIN as f64 || f > i32::MAX as f64 {
        return None;
    }
    Some(f as i32)
}

pub fn parse_bool_safe(s: Option<&str>) -> Option<bool> {
    match s?.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a trip timestamp. Offset-carrying values are normalised to UTC
/// before the offset is dropped; bare dates map to midnight.
pub fn parse_timestamp_safe(s: Option<&str>) -> Option<NaiveDateTime> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(ts) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(ts);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.naive_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Local hour of day (0-23). Shifting back may cross into the previous day;
/// only the hour is needed, so the shift is done modulo 24 and never touches
/// the date (no overflow at the edges of the calendar).
pub fn local_hour(ts: NaiveDateTime) -> u32 {
    (ts.hour() + 24 - LOCAL_OFFSET_HOURS) % 24
}

pub fn average(v: &[f64]) -> f64 {
    // Returns 0 for an empty slice to avoid NaNs.
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

/// Round to `decimals` places, ties to even (`0.5 -> 0`, `1.5 -> 2`).
pub fn round_half_even(x: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (x * scale).round_ties_even() / scale
}

/// Fixed decimals with locale thousands separators, e.g. `1,234,567.89`.
pub fn format_number(n: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };
    // Past u128 range the digits are printed without separators.
    let mut res = match int_part.parse::<u128>() {
        Ok(v) => v.to_formatted_string(&Locale::en),
        Err(_) => int_part.to_string(),
    };
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    // `-0.00` reads badly; only signal negatives that survive rounding.
    if n.is_sign_negative() && res.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
