use chrono::NaiveDateTime;

/// The only timestamp layout timetally stores and accepts.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// This is the standard way of converting a moment to a record string in timetally.
pub fn format_timestamp(moment: NaiveDateTime) -> String {
    moment.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a record string. chrono is lenient about padding, so the value is formatted back and
/// compared to make sure "2024-1-2 3:04:05" doesn't sneak in and break lexicographic ordering.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .filter(|moment| format_timestamp(*moment) == value)
}
