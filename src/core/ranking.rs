use std::cmp::Ordering;

use crate::models::ScoredCandidate;

/// Ranked recommendations for one request
///
/// Entries are ordered by score (descending), then brand (case-insensitive),
/// model and id (ascending), so two identical calls always produce the same
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet<'a> {
    ranked: Vec<ScoredCandidate<'a>>,
    total_candidates: usize,
}

impl<'a> ResultSet<'a> {
    /// Rank `scored` and wrap it; `total_candidates` is the catalog size
    pub fn new(scored: Vec<ScoredCandidate<'a>>, total_candidates: usize) -> Self {
        // Lowercase each brand once rather than on every comparison
        let mut keyed: Vec<(String, ScoredCandidate<'a>)> = scored
            .into_iter()
            .map(|candidate| (candidate.record.brand.to_lowercase(), candidate))
            .collect();
        keyed.sort_by(|(brand_a, a), (brand_b, b)| compare_candidates(brand_a, a, brand_b, b));

        Self {
            ranked: keyed.into_iter().map(|(_, candidate)| candidate).collect(),
            total_candidates,
        }
    }

    /// The first `n` entries, or all of them if there are fewer
    pub fn top(&self, n: usize) -> &[ScoredCandidate<'a>] {
        &self.ranked[..n.min(self.ranked.len())]
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn total_candidates(&self) -> usize {
        self.total_candidates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredCandidate<'a>> {
        self.ranked.iter()
    }

    pub fn into_vec(self) -> Vec<ScoredCandidate<'a>> {
        self.ranked
    }
}

/// Score descending, then brand, model and id ascending
///
/// `brand_a` and `brand_b` are the lowercased brands of `a` and `b`.
fn compare_candidates(
    brand_a: &str,
    a: &ScoredCandidate<'_>,
    brand_b: &str,
    b: &ScoredCandidate<'_>,
) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| brand_a.cmp(brand_b))
        .then_with(|| a.record.model.cmp(&b.record.model))
        .then_with(|| a.record.id.cmp(&b.record.id))
}
