const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
const STEP: u64 = 1024;

/// Formats a byte count for display, e.g. `1572864 -> "1.5 MB"`.
///
/// The value is rounded to one decimal and a trailing `.0` is dropped, so
/// exact multiples read `"1 KB"` rather than `"1.0 KB"`. Nothing above GB
/// exists: a terabyte-sized asset is shown as `"1024 GB"`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    // floor(log_1024(bytes)), in integers
    let mut unit = 0;
    let mut threshold = STEP;
    while unit < UNITS.len() - 1 && bytes >= threshold {
        unit += 1;
        threshold = threshold.saturating_mul(STEP);
    }

    let scaled = bytes as f64 / (STEP as f64).powi(unit as i32);
    let fixed = format!("{:.1}", scaled);
    let trimmed = fixed.strip_suffix(".0").unwrap_or(&fixed);
    format!("{} {}", trimmed, UNITS[unit])
}
