use crate::domain::model::Notice;

/// Titles must contain one of these, case-insensitively, to survive the
/// relevance cut.
const RELEVANCE_KEYWORDS: [&str; 5] = [
    "drug",
    "biologic",
    "clinical",
    "pharmaceutical",
    "application",
];

pub fn is_relevant(title: &str) -> bool {
    let title = title.to_lowercase();
    RELEVANCE_KEYWORDS
        .iter()
        .any(|keyword| title.contains(keyword))
}

/// Order-preserving keyword filter over a feed snapshot.
pub fn apply(notices: Vec<Notice>) -> Vec<Notice> {
    notices
        .into_iter()
        .filter(|notice| is_relevant(&notice.title))
        .collect()
}
