/// Format a count with a `K`/`M` suffix, one decimal place, trailing `.0` dropped.
///
/// `950 -> "950"`, `1000 -> "1K"`, `1540 -> "1.5K"`, `2_300_000 -> "2.3M"`.
pub fn format_compact(value: u64) -> String {
    if value < 1_000 {
        return value.to_string();
    }

    let thousands = round_one_decimal(value as f64 / 1_000.0);
    if thousands < 1_000.0 {
        return with_suffix(thousands, "K");
    }

    with_suffix(round_one_decimal(value as f64 / 1_000_000.0), "M")
}

/// Share of `value` in `total` as a percentage with one decimal place.
///
/// Returns 0 when `total` is 0.
pub fn percentage(value: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_one_decimal(value as f64 * 100.0 / total as f64)
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn with_suffix(value: f64, suffix: &str) -> String {
    let text = format!("{value:.1}");
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{text}{suffix}")
}
