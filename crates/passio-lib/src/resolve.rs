//! Fuzzy name resolution.
//!
//! Callers hand the resolver a free-text query and a list of `(name, item)`
//! candidates. Every candidate name is scored against the query and the
//! highest scoring item is returned, provided it reaches the configured
//! floor. Scoring is case-insensitive and tolerant of typos and partial
//! names: `"Georgia Tec"` resolves to `"Georgia Tech"` and `"21"` resolves
//! to `"Route 21"`.

use tracing::debug;

/// Default minimum similarity a candidate must reach to count as a match.
pub const DEFAULT_MIN_SCORE: f64 = 0.7;

/// Weight applied to substring-window matches so an exact whole-name match
/// always outranks a partial one.
const PARTIAL_WEIGHT: f64 = 0.9;

/// Beyond this many characters names are only compared as whole strings.
const MAX_WINDOWED_LEN: usize = 256;

/// Outcome of a single resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    /// Best candidate at or above the floor.
    Matched { item: T, name: String, score: f64 },
    /// No candidates, or none reached the floor.
    NoMatch,
}

impl<T> Resolution<T> {
    /// Consume the resolution and return the matched item, if any.
    pub fn into_item(self) -> Option<T> {
        match self {
            Resolution::Matched { item, .. } => Some(item),
            Resolution::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Resolution::Matched { .. })
    }

    /// Similarity of the matched candidate.
    pub fn score(&self) -> Option<f64> {
        match self {
            Resolution::Matched { score, .. } => Some(*score),
            Resolution::NoMatch => None,
        }
    }
}

/// Picks the single best candidate for a free-text query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolver {
    min_score: f64,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SCORE)
    }
}

impl Resolver {
    /// Create a resolver with the given floor, clamped to `0.0..=1.0`.
    ///
    /// A floor of `0.0` accepts the best candidate no matter how poor it is.
    pub fn new(min_score: f64) -> Self {
        let min_score = if min_score.is_nan() {
            DEFAULT_MIN_SCORE
        } else {
            min_score.clamp(0.0, 1.0)
        };
        Self { min_score }
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    /// Resolve `query` against `candidates`.
    ///
    /// Returns the highest scoring candidate. On equal scores the earliest
    /// candidate wins. An empty candidate list always yields
    /// [`Resolution::NoMatch`].
    pub fn resolve<'a, T, I>(&self, query: &str, candidates: I) -> Resolution<T>
    where
        I: IntoIterator<Item = (&'a str, T)>,
    {
        let mut best: Option<(f64, &'a str, T)> = None;

        for (name, item) in candidates {
            let score = similarity(query, name);
            let replace = match &best {
                Some((best_score, _, _)) => score > *best_score,
                None => true,
            };
            if replace {
                best = Some((score, name, item));
            }
        }

        match best {
            Some((score, name, item)) if score >= self.min_score => {
                debug!(query, matched = name, score, "resolved name");
                Resolution::Matched {
                    item,
                    name: name.to_string(),
                    score,
                }
            }
            Some((score, name, _)) => {
                debug!(
                    query,
                    closest = name,
                    score,
                    floor = self.min_score,
                    "closest name below similarity floor"
                );
                Resolution::NoMatch
            }
            None => {
                debug!(query, "no candidates to resolve against");
                Resolution::NoMatch
            }
        }
    }

    /// Up to `limit` candidate names ordered by descending similarity.
    ///
    /// Ignores the floor; used to build "Did you mean" hints.
    pub fn suggest<'a, I>(&self, query: &str, names: I, limit: usize) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut scored: Vec<(f64, &str)> = names
            .into_iter()
            .map(|name| (similarity(query, name), name))
            .filter(|(score, _)| *score > 0.0)
            .collect();

        // Stable sort keeps input order among equal scores.
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

/// Similarity between a query and a candidate name in `0.0..=1.0`.
///
/// The score is the better of the whole-string normalized Levenshtein
/// similarity and a down-weighted best-window similarity, where the shorter
/// string is compared against every equally long window of the longer one.
/// The window scan is skipped when the longer string is very long.
pub fn similarity(query: &str, candidate: &str) -> f64 {
    let query = normalize(query);
    let candidate = normalize(candidate);

    if query == candidate {
        return 1.0;
    }
    if query.is_empty() || candidate.is_empty() {
        return 0.0;
    }

    let full = strsim::normalized_levenshtein(&query, &candidate);
    let partial = PARTIAL_WEIGHT * partial_similarity(&query, &candidate);
    full.max(partial)
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn partial_similarity(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let width = short.chars().count();
    let long_chars: Vec<char> = long.chars().collect();
    if long_chars.len() > MAX_WINDOWED_LEN {
        return 0.0;
    }
    if width == 0 || width == long_chars.len() {
        return strsim::normalized_levenshtein(short, long);
    }

    let mut window = String::with_capacity(long.len());
    long_chars
        .windows(width)
        .map(|chars| {
            window.clear();
            window.extend(chars);
            strsim::normalized_levenshtein(short, &window)
        })
        .fold(0.0, f64::max)
}
