use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use crate::config::constants::{
    DATE_FORMAT, MAX_VOLUME_SIZE_GIB, MIN_JUSTIFICATION_CHARS, MIN_VOLUME_SIZE_GIB,
};

/// Field rules shared by the new-request and change-request forms.
/// Each check returns the user-facing message on failure.
pub struct DraftValidator;

impl DraftValidator {
    pub fn volume_size(text: &str) -> Result<u32, String> {
        let text = text.trim();
        if text.is_empty() {
            return Err("Volume size is required".to_string());
        }
        let size: u32 = text
            .parse()
            .map_err(|_| format!("Volume size must be a whole number of GiB, got '{}'", text))?;
        if !(MIN_VOLUME_SIZE_GIB..=MAX_VOLUME_SIZE_GIB).contains(&size) {
            return Err(format!(
                "Volume size must be between {} and {} GiB",
                MIN_VOLUME_SIZE_GIB, MAX_VOLUME_SIZE_GIB
            ));
        }
        Ok(size)
    }

    /// The date is read as midnight UTC and must lie strictly after `now`.
    pub fn expiry_date(text: &str, now: DateTime<Utc>) -> Result<NaiveDate, String> {
        let text = text.trim();
        if text.is_empty() {
            return Err("Expiry date is required".to_string());
        }
        let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map_err(|_| format!("Expiry date must look like YYYY-MM-DD, got '{}'", text))?;
        if date.and_time(NaiveTime::MIN).and_utc() <= now {
            return Err("Expiry date must be in the future".to_string());
        }
        Ok(date)
    }

    /// Counted in characters, not bytes, so Hangul input is measured correctly.
    pub fn justification(text: &str) -> Result<(), String> {
        let count = text.trim().chars().count();
        if count == 0 {
            return Err("Justification is required".to_string());
        }
        if count < MIN_JUSTIFICATION_CHARS {
            return Err(format!(
                "Justification must be at least {} characters ({} so far)",
                MIN_JUSTIFICATION_CHARS, count
            ));
        }
        Ok(())
    }

    pub fn identifier(text: &str, what: &str) -> Result<i64, String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(format!("Select a {}", what));
        }
        text.parse()
            .map_err(|_| format!("'{}' is not a valid {} id", text, what))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn volume_bounds_are_inclusive() {
        assert_eq!(DraftValidator::volume_size("10"), Ok(10));
        assert_eq!(DraftValidator::volume_size("2000"), Ok(2000));
        assert!(DraftValidator::volume_size("9").is_err());
        assert!(DraftValidator::volume_size("2001").is_err());
        assert!(DraftValidator::volume_size("12.5").is_err());
        assert!(DraftValidator::volume_size("abc").is_err());
    }

    #[test]
    fn expiry_must_be_after_now() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        assert!(DraftValidator::expiry_date("2026-03-02", now).is_ok());
        assert!(DraftValidator::expiry_date("2026-03-01", now).is_err());
        assert!(DraftValidator::expiry_date("2025-12-31", now).is_err());
        assert!(DraftValidator::expiry_date("03/02/2026", now).is_err());
    }

    #[test]
    fn justification_counts_characters_not_bytes() {
        // Ten Hangul syllables are 30 bytes but only ten characters.
        assert!(DraftValidator::justification("연구실습용서버신청합니").is_ok());
        assert!(DraftValidator::justification("연구용서버신청").is_err());
        assert!(DraftValidator::justification("   ").is_err());
    }
}
