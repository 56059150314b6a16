//! Normalized edit-distance matching for misspelled emoji references.

/// Similarity of two strings: `1 - levenshtein / max(len)`.
///
/// Symmetric, 1.0 for identical strings (including two empty ones) and 0.0
/// for strings with nothing in common.
///
/// # Examples
///
/// ```
/// use emojibot_core::ratio;
///
/// assert!((ratio("party", "pary") - 0.8).abs() < 1e-9);
/// assert_eq!(ratio("party", "party"), 1.0);
/// ```
pub fn ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Best candidate for a query and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch<'a> {
    /// Candidate with the strictly highest score, if any scored above zero.
    pub candidate: Option<&'a str>,
    /// Score of that candidate, 0.0 when there is none.
    pub score: f64,
}

/// Find the candidate most similar to `query`.
///
/// Ties keep the first candidate seen.
pub fn best_match<'a, I>(query: &str, candidates: I) -> FuzzyMatch<'a>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best = FuzzyMatch {
        candidate: None,
        score: 0.0,
    };
    for candidate in candidates {
        let score = ratio(query, candidate);
        if score > best.score {
            best = FuzzyMatch {
                candidate: Some(candidate),
                score,
            };
        }
    }
    best
}

/// Applies an acceptance threshold to [`best_match`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    threshold: f64,
}

impl FuzzyMatcher {
    /// Create a matcher accepting scores strictly above `threshold`.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Acceptance threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Candidate to correct `query` to, if one scores above the threshold.
    pub fn correct<'a, I>(&self, query: &str, candidates: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let found = best_match(query, candidates);
        found.candidate.filter(|_| found.score > self.threshold)
    }
}
