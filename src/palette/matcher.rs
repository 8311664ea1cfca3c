use crate::palette::PaletteCandidate;

pub trait CandidateMatcher: Send + Sync {
    fn select(&self, input: &str, candidates: &[PaletteCandidate]) -> Vec<usize>;
}

/// Label prefix hits first, then label substrings, then detail substrings.
#[derive(Debug, Default)]
pub struct ContainsMatcher;

impl CandidateMatcher for ContainsMatcher {
    fn select(&self, input: &str, candidates: &[PaletteCandidate]) -> Vec<usize> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return (0..candidates.len()).collect();
        }

        let query = trimmed.to_lowercase();
        let mut prefix = Vec::new();
        let mut contains = Vec::new();
        let mut detail_only = Vec::new();

        for (idx, candidate) in candidates.iter().enumerate() {
            let label = candidate.label.to_lowercase();
            if label.starts_with(&query) {
                prefix.push(idx);
            } else if label.contains(&query) {
                contains.push(idx);
            } else if candidate
                .detail
                .as_deref()
                .is_some_and(|detail| detail.to_lowercase().contains(&query))
            {
                detail_only.push(idx);
            }
        }

        prefix.extend(contains);
        prefix.extend(detail_only);
        prefix
    }
}
