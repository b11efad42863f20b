//! Local search/filter engine.
//!
//! Case-insensitive subsequence matching with an ascending score: lower is a
//! better match, contiguous and early matches score lowest. An empty search
//! term is the identity filter.

/// Score a candidate against a search term.
///
/// Returns `None` when the term is not a subsequence of the candidate.
/// The score is the index of the first matched character plus one point per
/// character skipped between matches, so `"bed"` against `"bed-100"` scores 0
/// and against `"big red"` scores higher.
pub fn fuzzy_score(term: &str, candidate: &str) -> Option<u32> {
    if term.is_empty() {
        return Some(0);
    }

    let candidate: Vec<char> = candidate.chars().flat_map(|c| c.to_lowercase()).collect();
    let mut score: u32 = 0;
    let mut pos = 0usize;

    for needle in term.chars().flat_map(|c| c.to_lowercase()) {
        // Penalty: characters skipped to reach this match.
        let found = candidate[pos..].iter().position(|&c| c == needle)?;
        score += found as u32;
        pos += found + 1;
    }

    Some(score)
}

/// Filter `rows` to those whose extracted string matches `term`, ordered by
/// ascending score. An empty term returns the rows unmodified.
pub fn filter_rows<T, F>(rows: Vec<T>, term: &str, extract: F) -> Vec<T>
where
    F: Fn(&T) -> String,
{
    if term.is_empty() {
        return rows;
    }

    let mut scored: Vec<(u32, T)> = rows
        .into_iter()
        .filter_map(|row| fuzzy_score(term, &extract(&row)).map(|s| (s, row)))
        .collect();

    // Stable: equal scores keep their original relative order.
    scored.sort_by_key(|(score, _)| *score);
    scored.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_term_is_identity() {
        let rows = vec!["List 1".to_string(), "List 2".to_string()];
        let filtered = filter_rows(rows.clone(), "", |r| r.clone());
        assert_eq!(filtered, rows);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let rows = vec!["List 1".to_string(), "List 2".to_string()];
        let filtered = filter_rows(rows, "Bananarama", |r| r.clone());
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_substring_match() {
        let rows = vec![
            "BED-100".to_string(),
            "ICU-7".to_string(),
            "BED-2".to_string(),
        ];
        let filtered = filter_rows(rows, "bed", |r| r.clone());
        assert_eq!(filtered, vec!["BED-100".to_string(), "BED-2".to_string()]);
    }

    #[test]
    fn test_better_matches_sort_first() {
        // "General Ward" contains "ward" later than "Ward 3" does.
        let rows = vec!["General Ward".to_string(), "Ward 3".to_string()];
        let filtered = filter_rows(rows, "ward", |r| r.clone());
        assert_eq!(filtered[0], "Ward 3");
    }

    #[test]
    fn test_subsequence_match() {
        assert!(fuzzy_score("bd1", "BED-100").is_some());
        assert!(fuzzy_score("xyz", "BED-100").is_none());
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(fuzzy_score("BED", "bed-100"), Some(0));
        assert_eq!(fuzzy_score("bed", "BED-100"), Some(0));
    }

    #[test]
    fn test_contiguous_scores_below_scattered() {
        let contiguous = fuzzy_score("bed", "bed-100").unwrap();
        let scattered = fuzzy_score("bed", "b-e-d-100").unwrap();
        assert!(contiguous < scattered);
    }
}
