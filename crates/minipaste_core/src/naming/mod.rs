//! Name synthesis for unnamed pastes.

use chrono::{DateTime, Utc};

/// Build a download name from the acceptance time.
///
/// Names must not contain `:`; browsers strip it from suggested filenames.
///
/// # Returns
/// The decimal Unix timestamp of `now`.
pub fn timestamp_name(now: DateTime<Utc>) -> String {
    now.timestamp().to_string()
}

#[cfg(test)]
mod tests {
    use super::timestamp_name;
    use chrono::{TimeZone, Utc};

    #[test]
    fn timestamp_name_is_decimal_unix_seconds() {
        let now = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap();
        assert_eq!(timestamp_name(now), "1700000000");
    }

    #[test]
    fn timestamp_name_has_no_filename_hostile_characters() {
        let name = timestamp_name(Utc::now());
        assert!(name.chars().all(|c| c.is_ascii_digit()), "name: {}", name);
    }
}
