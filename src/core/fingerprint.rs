use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The moment a record was generated (FechaHoraHusoGenRegistro).
///
/// Accepts either a timestamp with an explicit UTC offset, or a naive one —
/// in the latter case the machine's local offset (DST-aware) is inferred at
/// canonicalization time, matching AEAT's reference client behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratedAt {
    Fixed(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl GeneratedAt {
    /// Parse an RFC 3339 timestamp, falling back to a naive `YYYY-MM-DDTHH:MM:SS`
    /// (no offset) if no offset is present.
    pub fn parse(s: &str) -> Result<Self, String> {
        if let Ok(fixed) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::Fixed(fixed));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .map(Self::Naive)
            .map_err(|e| format!("'{s}' is not a valid timestamp: {e}"))
    }

    /// Canonical `YYYY-MM-DDTHH:MM:SS±HH:MM` form used both in the fingerprint
    /// payload and the XML `FechaHoraHusoGenRegistro` element.
    pub fn canonical(&self) -> String {
        match self {
            Self::Fixed(dt) => format_with_offset(dt.naive_local(), dt.offset().local_minus_utc()),
            Self::Naive(naive) => {
                let offset_seconds = local_offset_seconds(*naive);
                format_with_offset(*naive, offset_seconds)
            }
        }
    }
}

fn format_with_offset(naive: NaiveDateTime, offset_seconds: i32) -> String {
    let sign = if offset_seconds >= 0 { '+' } else { '-' };
    let abs = offset_seconds.unsigned_abs();
    let hours = abs / 3600;
    let minutes = (abs % 3600) / 60;
    format!(
        "{}{sign}{hours:02}:{minutes:02}",
        naive.format("%Y-%m-%dT%H:%M:%S")
    )
}

/// Infer the local UTC offset (DST-aware) that a naive timestamp would carry
/// if interpreted on this machine, the way the reference client falls back
/// to `time.timezone` / `time.altzone`.
fn local_offset_seconds(naive: NaiveDateTime) -> i32 {
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => local.offset().local_minus_utc(),
        None => Local::now().offset().local_minus_utc(),
    }
}

/// Canonical `DD-MM-YYYY` form used for invoice issue dates.
pub fn canonical_date(date: chrono::NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// SHA-256 over the UTF-8 payload, rendered as 64 uppercase hex characters.
///
/// AEAT requires the payload's `&`-joined key=value pairs left unescaped —
/// callers must assemble the payload themselves before calling this.
pub fn sha256_hex_upper(payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02X}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_date_format() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(canonical_date(date), "01-06-2025");
    }

    #[test]
    fn fixed_offset_round_trips() {
        let ts = GeneratedAt::parse("2025-06-01T10:20:30+02:00").unwrap();
        assert_eq!(ts.canonical(), "2025-06-01T10:20:30+02:00");
    }

    #[test]
    fn sha256_hex_is_uppercase_64() {
        let digest = sha256_hex_upper("hello");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }
}
