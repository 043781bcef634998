use ns_core::ResultSet;

pub(crate) const STOP_WORDS: &[&str] = &[
    "will", "the", "and", "for", "that", "this", "with", "from", "are", "was",
    "were", "has", "have", "had", "but", "not", "you", "his", "her", "its",
    "they", "them", "their", "our", "out", "about", "into", "over", "after",
    "before", "than", "more", "less", "above", "below", "between", "when",
    "while", "who", "what", "where", "which", "why", "how", "all", "also",
    "been", "being", "can", "could", "would", "should", "said", "says", "new",
];

/// Lowercased alphanumeric tokens of length > 2, stop words removed.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| w.len() > 2 && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Term counts over the result set's article contents, ordered by descending
/// count (ties alphabetical), truncated to `limit`. Feeds the word-cloud
/// view; empty results produce an empty list.
pub fn word_frequencies(results: &ResultSet, limit: usize) -> Vec<(String, usize)> {
    let mut counts = std::collections::HashMap::new();
    for labeled in &results.articles {
        for token in tokenize(labeled.article.content_text()) {
            *counts.entry(token).or_insert(0usize) += 1;
        }
    }

    let mut ordered: Vec<(String, usize)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ordered.truncate(limit);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_core::{Article, LabeledArticle, SentimentLabel};

    fn result_set(contents: &[&str]) -> ResultSet {
        ResultSet::new(
            "q",
            contents
                .iter()
                .map(|c| LabeledArticle {
                    article: Article {
                        content: Some(c.to_string()),
                        ..Article::default()
                    },
                    label: SentimentLabel::Neutral,
                })
                .collect(),
        )
    }

    #[test]
    fn test_counts_ordered_and_stop_words_removed() {
        let rs = result_set(&[
            "the climate summit and the climate deal",
            "climate policy after the summit",
        ]);
        let freqs = word_frequencies(&rs, 10);
        assert_eq!(freqs[0], ("climate".to_string(), 3));
        assert_eq!(freqs[1], ("summit".to_string(), 2));
        assert!(freqs.iter().all(|(w, _)| w != "the" && w != "and"));
    }

    #[test]
    fn test_empty_results_give_empty_list() {
        assert!(word_frequencies(&ResultSet::empty("q"), 10).is_empty());
    }

    #[test]
    fn test_limit_truncates() {
        let rs = result_set(&["alpha beta gamma delta epsilon"]);
        assert_eq!(word_frequencies(&rs, 2).len(), 2);
    }
}
