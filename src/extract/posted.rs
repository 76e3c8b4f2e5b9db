use chrono::{DateTime, Duration, Utc};

/// Convert a relative age like "13h ago" into an absolute timestamp.
/// Unknown or malformed text maps to the current time.
pub fn normalize(text: &str) -> DateTime<Utc> {
    normalize_at(text, Utc::now())
}

/// Suffixes are checked in fixed order; the first one present wins, and
/// a non-numeric prefix falls back to `now` rather than trying the next.
pub fn normalize_at(text: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    const UNITS: [(&str, fn(i64) -> Duration); 3] = [
        ("h ago", Duration::hours),
        ("d ago", Duration::days),
        ("m ago", Duration::minutes),
    ];

    let text = text.trim();
    for (suffix, unit) in UNITS {
        if let Some(idx) = text.find(suffix) {
            return match text[..idx].trim().parse::<u32>() {
                Ok(n) => now - unit(i64::from(n)),
                Err(_) => now,
            };
        }
    }
    now
}
