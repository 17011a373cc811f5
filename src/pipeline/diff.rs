//! New-identifier diff against previously seen state.
//!
//! The search result is filtered down to identifiers never recorded for the
//! topic, keeping the upstream order. The state store only ever grows, so
//! there is no removed or updated set to compute.

use crate::models::TopicState;

/// Identifiers from `ids` not yet recorded for `topic`, in upstream order.
pub fn new_identifiers(state: &TopicState, topic: &str, ids: &[String]) -> Vec<String> {
    ids.iter()
        .filter(|id| !state.has_seen(topic, id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Article;

    fn seen_article(pmid: &str) -> Article {
        Article {
            pmid: pmid.to_string(),
            title: None,
            abstract_text: None,
            year: None,
            authors: Vec::new(),
        }
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_only_unseen_ids_survive() {
        let mut state = TopicState::new();
        state.record("RNAseq", seen_article("111"));
        state.record("RNAseq", seen_article("222"));

        let result = new_identifiers(&state, "RNAseq", &ids(&["111", "222", "333"]));
        assert_eq!(result, ids(&["333"]));
    }

    #[test]
    fn test_empty_state_passes_everything_through() {
        let state = TopicState::new();
        let result = new_identifiers(&state, "RNAseq", &ids(&["111", "222"]));
        assert_eq!(result, ids(&["111", "222"]));
    }

    #[test]
    fn test_all_seen_yields_empty() {
        let mut state = TopicState::new();
        state.record("RNAseq", seen_article("111"));

        let result = new_identifiers(&state, "RNAseq", &ids(&["111"]));
        assert!(result.is_empty());
    }

    #[test]
    fn test_upstream_order_is_preserved() {
        let mut state = TopicState::new();
        state.record("RNAseq", seen_article("222"));

        let result = new_identifiers(&state, "RNAseq", &ids(&["444", "222", "111", "333"]));
        assert_eq!(result, ids(&["444", "111", "333"]));
    }

    #[test]
    fn test_seen_set_is_per_topic() {
        let mut state = TopicState::new();
        state.record("RNAseq", seen_article("111"));

        let result = new_identifiers(&state, "CRISPR", &ids(&["111"]));
        assert_eq!(result, ids(&["111"]));
    }

    #[test]
    fn test_empty_search_result() {
        let state = TopicState::new();
        assert!(new_identifiers(&state, "RNAseq", &[]).is_empty());
    }
}
