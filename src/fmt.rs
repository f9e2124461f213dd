use chrono::{Datelike, NaiveDate};

/// Format a float as Indian Rupees with lakh/crore grouping: ₹1,23,456.78
pub fn rupees(val: f64) -> String {
    let negative = val < 0.0;
    let paise = format!("{:.2}", val.abs());
    let (int_part, dec_part) = paise.split_once('.').unwrap_or((paise.as_str(), "00"));

    let grouped = group_indian(int_part);
    // "-0.00" after rounding is still zero
    if negative && paise != "0.00" {
        format!("-₹{grouped}.{dec_part}")
    } else {
        format!("₹{grouped}.{dec_part}")
    }
}

/// Insert separators the Indian way: the last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::new();
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("{out},{tail}")
}

/// Compact axis label: ₹950, ₹2.5k, ₹10k, ₹1.2L, ₹3Cr.
pub fn rupees_compact(val: f64) -> String {
    let (scaled, suffix) = if val >= 10_000_000.0 {
        (val / 10_000_000.0, "Cr")
    } else if val >= 100_000.0 {
        (val / 100_000.0, "L")
    } else if val >= 1000.0 {
        (val / 1000.0, "k")
    } else {
        return format!("₹{}", val as u64);
    };
    if scaled == scaled.floor() {
        format!("₹{}{suffix}", scaled as u64)
    } else {
        format!("₹{:.1}{suffix}", scaled)
    }
}

/// Table date: "Jan 5, 2025".
pub fn date_short(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Long date with an ordinal day: "January 5th, 2025".
pub fn date_long(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{} {day}{suffix}, {}", date.format("%B"), date.year())
}

/// Shortest decimal text for an amount, as it would be typed back in.
pub fn plain_amount(val: f64) -> String {
    let s = format!("{val}");
    s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
}
