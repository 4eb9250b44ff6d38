use jiff::civil::DateTime;
use serde::Serializer;

use crate::error::ValidationError;

/// `N` marks a required ASCII digit; every other byte must match literally.
const SHAPE: &[u8; 19] = b"NNNN-NN-NN NN:NN:NN";

/// Parses a `YYYY-MM-DD HH:MM:SS` timestamp.
///
/// The input must match the shape exactly and denote a real calendar date
/// and wall-clock time, so `2024-02-30 10:00:00` and `2024-01-01 24:00:00`
/// are both rejected.
pub fn parse_timestamp(raw: &str) -> Result<DateTime, ValidationError> {
    let invalid = || ValidationError::InvalidTimestamp(raw.to_owned());

    let bytes = raw.as_bytes();
    if bytes.len() != SHAPE.len() {
        return Err(invalid());
    }

    let shape_matches = bytes.iter().zip(SHAPE).all(|(&byte, &expected)| {
        if expected == b'N' {
            byte.is_ascii_digit()
        } else {
            byte == expected
        }
    });
    if !shape_matches {
        return Err(invalid());
    }

    let two = |at: usize| raw[at..at + 2].parse::<i8>().map_err(|_| invalid());
    let year = raw[0..4].parse::<i16>().map_err(|_| invalid())?;

    DateTime::new(year, two(5)?, two(8)?, two(11)?, two(14)?, two(17)?, 0).map_err(|_| invalid())
}

pub fn format_timestamp(dt: DateTime) -> String {
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second()
    )
}

pub(crate) fn serialize<S: Serializer>(dt: &DateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(*dt))
}
