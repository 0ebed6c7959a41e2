//! Review filtering and selection at the pipeline entry.

use log::info;

use crate::model::Review;

/// The single has-modification predicate. Applied once when reviews enter
/// the pipeline; nothing downstream re-checks it.
pub fn reviews_with_modifications(reviews: &[Review]) -> Vec<&Review> {
    reviews
        .iter()
        .filter(|r| r.has_modification && !r.text.trim().is_empty())
        .collect()
}

/// Pick the review most worth extracting modifications from: highest
/// rating first, then the longest text. Ties keep the earliest review.
pub fn select_review<'a>(candidates: &[&'a Review]) -> Option<&'a Review> {
    let mut best: Option<&'a Review> = None;
    for review in candidates.iter().copied() {
        let better = match best {
            None => true,
            Some(current) => rank(review) > rank(current),
        };
        if better {
            best = Some(review);
        }
    }

    if let Some(review) = best {
        info!(
            "Selected review {}: {}...",
            review.review_id,
            review.text.chars().take(100).collect::<String>()
        );
    }
    best
}

fn rank(review: &Review) -> (u8, usize) {
    (review.rating.unwrap_or(0), review.text.chars().count())
}
