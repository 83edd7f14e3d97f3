use chrono::{DateTime, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[must_use]
pub fn format_day(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::time::fixed_now;

    #[test]
    fn formats_are_stable() {
        assert_eq!(format_datetime(fixed_now()), "2024-01-01 00:00:00");
        assert_eq!(format_day(fixed_now()), "2024-01-01");
    }
}
