use std::collections::{HashMap, HashSet};

use ns_core::ResultSet;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::terms::tokenize;

/// One topic: its highest-weighted terms, strongest first.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Topic {
    pub terms: Vec<(String, f64)>,
}

/// Fixed-k topic decomposition over article contents: a tf-idf term
/// weighting followed by deterministic co-occurrence grouping. Documents
/// shorter than `min_doc_chars` are filtered out before fitting.
pub struct TopicModeler {
    k: usize,
    top_terms: usize,
    min_doc_chars: usize,
}

impl Default for TopicModeler {
    fn default() -> Self {
        Self {
            k: 5,
            top_terms: 8,
            min_doc_chars: 40,
        }
    }
}

impl TopicModeler {
    pub fn new(k: usize, top_terms: usize, min_doc_chars: usize) -> Self {
        Self {
            k,
            top_terms,
            min_doc_chars,
        }
    }

    /// Fit over the corpus. Returns None when no document survives the
    /// length filter, so callers skip the topic view with a notice instead
    /// of crashing.
    pub fn fit(&self, docs: &[&str]) -> Option<Vec<Topic>> {
        let tokenized: Vec<Vec<String>> = docs
            .iter()
            .filter(|d| d.trim().len() >= self.min_doc_chars)
            .map(|d| tokenize(d))
            .filter(|tokens| !tokens.is_empty())
            .collect();
        if tokenized.is_empty() {
            debug!("topic corpus empty after length filter, skipping fit");
            return None;
        }

        let n_docs = tokenized.len() as f64;
        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let mut seen = HashSet::new();
            for token in tokens {
                *term_freq.entry(token).or_insert(0) += 1;
                if seen.insert(token.as_str()) {
                    *doc_freq.entry(token).or_insert(0) += 1;
                }
            }
        }

        // tf-idf per term, ties broken alphabetically for determinism
        let mut weighted: Vec<(&str, f64)> = term_freq
            .iter()
            .map(|(term, tf)| {
                let df = doc_freq[term] as f64;
                (*term, *tf as f64 * (1.0 + n_docs / df).ln())
            })
            .collect();
        weighted.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });

        let weights: HashMap<&str, f64> = weighted.iter().cloned().collect();
        let mut unassigned: Vec<&str> = weighted.iter().map(|(t, _)| *t).collect();
        let mut topics = Vec::new();

        for _ in 0..self.k {
            if unassigned.is_empty() {
                break;
            }
            let seed = unassigned.remove(0);
            let mut members = vec![seed];

            // pull in the terms that co-occur most with the seed
            let mut candidates: Vec<(&str, usize)> = unassigned
                .iter()
                .map(|term| (*term, co_occurrences(&tokenized, seed, term)))
                .collect();
            candidates.sort_by(|a, b| {
                b.1.cmp(&a.1).then_with(|| {
                    weights[b.0]
                        .partial_cmp(&weights[a.0])
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
            });
            for (term, _) in candidates.into_iter().take(self.top_terms.saturating_sub(1)) {
                members.push(term);
            }
            unassigned.retain(|t| !members.contains(t));

            topics.push(Topic {
                terms: members
                    .into_iter()
                    .map(|t| (t.to_string(), weights[t]))
                    .collect(),
            });
        }

        Some(topics)
    }
}

fn co_occurrences(docs: &[Vec<String>], a: &str, b: &str) -> usize {
    docs.iter()
        .filter(|doc| {
            doc.iter().any(|t| t == a) && doc.iter().any(|t| t == b)
        })
        .count()
}

/// SHA-256 fingerprint of a result set's article contents. Identical
/// contents in identical order fingerprint identically.
pub fn fingerprint(results: &ResultSet) -> String {
    let mut hasher = Sha256::new();
    for labeled in &results.articles {
        hasher.update(labeled.article.content_text().as_bytes());
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}

/// Derived cache for the topic decomposition, keyed by the current result
/// set's content fingerprint. Refits only when the fingerprint changes
/// instead of on every request.
#[derive(Default)]
pub struct TopicCache {
    cached: Option<(String, Option<Vec<Topic>>)>,
    generation: u64,
}

impl TopicCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topics_for(
        &mut self,
        results: &ResultSet,
        modeler: &TopicModeler,
    ) -> Option<Vec<Topic>> {
        let fp = fingerprint(results);
        let stale = match &self.cached {
            Some((cached_fp, _)) => *cached_fp != fp,
            None => true,
        };
        if stale {
            let docs: Vec<&str> = results
                .articles
                .iter()
                .map(|l| l.article.content_text())
                .collect();
            self.cached = Some((fp, modeler.fit(&docs)));
            self.generation += 1;
        }
        self.cached.as_ref().and_then(|(_, topics)| topics.clone())
    }

    /// Number of refits so far; stable across cache hits.
    pub fn generation(&self) -> u64 {
        self.generation
    }
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

    const CORPUS: &[&str] = &[
        "The climate summit produced a landmark emissions agreement between nations",
        "Negotiators at the climate summit argued over emissions targets for days",
        "A rocket launch carried satellites into orbit from the coastal spaceport",
        "The space agency confirmed the rocket launch placed satellites in orbit",
        "Electric vehicle sales climbed as battery costs kept falling this quarter",
    ];

    #[test]
    fn test_fit_produces_bounded_topics() {
        let topics = TopicModeler::default()
            .fit(CORPUS)
            .expect("corpus is large enough to fit");
        assert!(!topics.is_empty());
        assert!(topics.len() <= 5);
        for topic in &topics {
            assert!(!topic.terms.is_empty());
            assert!(topic.terms.len() <= 8);
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let modeler = TopicModeler::default();
        assert_eq!(modeler.fit(CORPUS), modeler.fit(CORPUS));
    }

    #[test]
    fn test_short_corpus_skipped() {
        let modeler = TopicModeler::default();
        assert!(modeler.fit(&[]).is_none());
        assert!(modeler.fit(&["too short", "also short"]).is_none());
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = result_set(&["one", "two"]);
        let b = result_set(&["one", "two"]);
        let c = result_set(&["one", "three"]);
        assert_eq!(fingerprint(&a), fingerprint(&b));
        assert_ne!(fingerprint(&a), fingerprint(&c));
    }

    #[test]
    fn test_cache_refits_only_on_change() {
        let modeler = TopicModeler::default();
        let mut cache = TopicCache::new();

        let rs = result_set(CORPUS);
        let first = cache.topics_for(&rs, &modeler);
        let second = cache.topics_for(&rs, &modeler);
        assert_eq!(first, second);
        assert_eq!(cache.generation(), 1);

        let changed = result_set(&CORPUS[..3]);
        cache.topics_for(&changed, &modeler);
        assert_eq!(cache.generation(), 2);
    }

    #[test]
    fn test_cache_on_empty_results_yields_none() {
        let mut cache = TopicCache::new();
        assert!(cache
            .topics_for(&ResultSet::empty("q"), &TopicModeler::default())
            .is_none());
    }
}
