/*!
 * Fixed-length best-offset substring scoring.
 *
 * A query is compared against every equal-length window of the indexed text
 * by Hamming distance in a single O((|text| - |query|) * |query|) pass.
 */

use crate::errors::MatchError;

/// Best window found for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMatch {
    /// Character offset of the window start
    pub offset: usize,
    /// Number of differing positions
    pub score: usize,
}

/// Count positions where `a` and `b` differ; both must have the same length
pub fn match_score(a: &[char], b: &[char]) -> Result<usize, MatchError> {
    if a.len() != b.len() {
        return Err(MatchError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(hamming(a, b))
}

fn hamming(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

/// Find the window of `text` closest to `query`.
///
/// Ties go to the lowest offset.
pub fn best_match(query: &[char], text: &[char]) -> Result<BestMatch, MatchError> {
    if query.is_empty() {
        return Err(MatchError::EmptyQuery);
    }
    if query.len() > text.len() {
        return Err(MatchError::QueryTooLong {
            query_len: query.len(),
            text_len: text.len(),
        });
    }

    let mut best: Option<BestMatch> = None;
    for (offset, window) in text.windows(query.len()).enumerate() {
        let score = hamming(query, window);
        if best.is_none_or(|b| score < b.score) {
            best = Some(BestMatch { offset, score });
        }
    }

    best.ok_or(MatchError::QueryTooLong {
        query_len: query.len(),
        text_len: text.len(),
    })
}
