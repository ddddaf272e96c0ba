/*!
 * Append-only text buffer annotated with subtitle time boundaries.
 */

use log::debug;

use crate::errors::MatchError;
use crate::subtitle_processor::SubtitleRecord;
use crate::timecode::TimeInterval;

/// Which side of an appended segment a span marks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Open,
    Close,
}

/// Offset-tagged boundary of one appended segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Character offset into the buffer
    pub offset: usize,
    /// Segment start time for `Open`, end time for `Close`
    pub time_ms: u64,
    pub kind: SpanKind,
}

/// Concatenated subtitle text plus the spans recording where each segment sits.
///
/// Offsets count `char`s. Spans are kept in non-decreasing offset order and
/// alternate `Open`/`Close`, one pair per appended segment.
#[derive(Debug, Clone, Default)]
pub struct AnnotatedText {
    chars: Vec<char>,
    spans: Vec<Span>,
}

impl AnnotatedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every record's sanitized text in track order
    pub fn from_records(records: &[SubtitleRecord]) -> Self {
        let mut text = Self::new();
        for record in records {
            text.append(&record.text(), record.interval);
        }
        debug!(
            "Indexed {} segment(s), {} chars",
            text.segment_count(),
            text.len()
        );
        text
    }

    /// Append `text`, bracketing it with an Open span at `interval.start` and a
    /// Close span at `interval.end`
    pub fn append(&mut self, text: &str, interval: TimeInterval) {
        self.spans.push(Span {
            offset: self.chars.len(),
            time_ms: interval.start_ms(),
            kind: SpanKind::Open,
        });
        self.chars.extend(text.chars());
        self.spans.push(Span {
            offset: self.chars.len(),
            time_ms: interval.end_ms(),
            kind: SpanKind::Close,
        });
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn segment_count(&self) -> usize {
        self.spans.len() / 2
    }

    /// Find the spans enclosing `start..end`.
    ///
    /// The open span is the last `Open` at or before `start`; the close span is
    /// the first `Close` at or after `end`. The scan stops at that close span.
    pub fn lookup_range(&self, start: usize, end: usize) -> Result<(Span, Span), MatchError> {
        let mut open = None;
        for span in &self.spans {
            match span.kind {
                SpanKind::Open if span.offset <= start => open = Some(*span),
                SpanKind::Close if end <= span.offset => {
                    return open
                        .map(|open| (open, *span))
                        .ok_or(MatchError::NoEnclosingSpan { start, end });
                }
                _ => {}
            }
        }
        Err(MatchError::NoEnclosingSpan { start, end })
    }
}
