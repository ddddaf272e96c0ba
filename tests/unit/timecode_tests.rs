/*!
 * Tests for timestamp parsing and formatting
 */

use srtalign::errors::SubtitleError;
use srtalign::timecode::{self, TimeInterval};

/// Test that canonical timestamps survive a parse/format round trip
#[test]
fn test_timestamp_roundTrip_withCanonicalValues_shouldMatch() {
    for hours in [0u64, 1, 9, 10, 99, 100] {
        for (minutes, seconds, millis) in [(0u64, 0u64, 0u64), (5, 7, 9), (59, 59, 999), (28, 48, 251)] {
            let ts = format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis);
            let ms = timecode::parse_timestamp(&ts).unwrap();
            assert_eq!(timecode::format_timestamp(ms), ts);
        }
    }
}

/// Test a known value
#[test]
fn test_parse_timestamp_withValidTimestamp_shouldReturnMillis() {
    assert_eq!(timecode::parse_timestamp("01:23:45,678").unwrap(), 5_025_678);
}

/// Test range parsing with surrounding whitespace and CRLF
#[test]
fn test_parse_timestamp_range_withCrlf_shouldParse() {
    let interval = timecode::parse_timestamp_range("  00:00:01,000   -->  00:00:04,000 \r\n")
        .unwrap()
        .expect("range expected");
    assert_eq!(interval, TimeInterval::new(1000, 4000).unwrap());
    assert_eq!(interval.duration_ms(), 3000);
}

/// Test the documented malformed shape
#[test]
fn test_parse_timestamp_range_withTwoDelimiters_shouldBeUnexpectedShape() {
    let err = timecode::parse_timestamp_range("bad --> --> worse").unwrap_err();
    assert!(matches!(err, SubtitleError::UnexpectedLineShape { .. }));
}

/// Test that an empty half is a shape error, not a timestamp error
#[test]
fn test_parse_timestamp_range_withEmptyHalf_shouldBeUnexpectedShape() {
    let err = timecode::parse_timestamp_range("00:00:01,000 -->").unwrap_err();
    assert!(matches!(err, SubtitleError::UnexpectedLineShape { .. }));
}

/// Test that a non-numeric half is a timestamp error
#[test]
fn test_parse_timestamp_range_withTextHalf_shouldBeMalformed() {
    let err = timecode::parse_timestamp_range("bad --> worse").unwrap_err();
    assert!(matches!(err, SubtitleError::MalformedTimestamp { .. }));
}

/// Test slop application
#[test]
fn test_with_slop_withRoomBeforeStart_shouldWidenBothSides() {
    let interval = TimeInterval::new(10_000, 12_000).unwrap().with_slop(500);
    assert_eq!(interval.start_ms(), 9_500);
    assert_eq!(interval.end_ms(), 12_500);
}

/// Test interval display
#[test]
fn test_interval_display_shouldUseArrowFormat() {
    let interval = TimeInterval::new(61_234, 65_432).unwrap();
    assert_eq!(interval.to_string(), "00:01:01,234 --> 00:01:05,432");
}
