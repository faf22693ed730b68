//! Human-readable byte quantities.

/// Formats a byte count with decimal (1000-based) magnitude tiers.
///
/// KB and MB render with no decimals. GB renders with one decimal, trimming
/// a trailing `.0` (so `4_000_000_000` is `"4GB"` and `4_500_000_000` is
/// `"4.5GB"`). TB always keeps one decimal (`"1.0TB"`). Total for all inputs.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_000_000_000_000 {
        format!("{:.1}TB", bytes as f64 / 1e12)
    } else if bytes >= 1_000_000_000 {
        let value = format!("{:.1}", bytes as f64 / 1e9);
        let value = value.strip_suffix(".0").unwrap_or(&value);
        format!("{value}GB")
    } else if bytes >= 1_000_000 {
        format!("{:.0}MB", bytes as f64 / 1e6)
    } else if bytes >= 1_000 {
        format!("{:.0}KB", bytes as f64 / 1e3)
    } else {
        format!("{bytes}B")
    }
}
