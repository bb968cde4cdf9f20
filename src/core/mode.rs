use serde::Serialize;

/// How an explore request is served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExploreMode {
    /// Score the whole universe and return the best matches
    Ranked,
    /// Apply the supplied predicates, unranked
    Filtered,
}

impl ExploreMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExploreMode::Ranked => "ranked",
            ExploreMode::Filtered => "filtered",
        }
    }
}

/// Pick the explore mode from raw request parameter values.
///
/// Any non-empty value selects filtered search; otherwise ranked browse.
pub fn select_mode<I, S>(values: I) -> ExploreMode
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if values.into_iter().any(|v| !v.as_ref().is_empty()) {
        ExploreMode::Filtered
    } else {
        ExploreMode::Ranked
    }
}
