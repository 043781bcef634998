use ns_core::{PolarityScores, Result, SentimentScorer};

const POSITIVE_WORDS: &[&str] = &[
    "win", "wins", "success", "successful", "gain", "gains", "rise", "rises",
    "surge", "approve", "approves", "agree", "pass", "breakthrough", "progress",
    "strong", "boost", "improve", "improves", "improved", "record", "optimistic",
    "confident", "support", "supports", "growth", "good", "great", "excellent",
    "positive", "hope", "hopeful", "celebrate", "achievement", "thrive",
];

const NEGATIVE_WORDS: &[&str] = &[
    "lose", "loses", "loss", "fail", "fails", "failure", "drop", "drops",
    "fall", "falls", "crash", "reject", "rejects", "oppose", "block", "crisis",
    "collapse", "weak", "decline", "declines", "worst", "threat", "risk",
    "pessimistic", "concern", "concerns", "fear", "fears", "scandal", "bad",
    "terrible", "negative", "death", "disaster", "warning", "violence",
];

/// Lexicon-based polarity scorer. Counts positive and negative word hits and
/// folds them into a compound score in [-1, 1]; a text with no hits (or no
/// words at all) scores a zero compound, the baseline for no signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> Result<PolarityScores> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower.split_whitespace().collect();
        let total = words.len() as f64;
        if total == 0.0 {
            return Ok(PolarityScores::neutral_baseline());
        }

        let pos = words
            .iter()
            .filter(|w| POSITIVE_WORDS.iter().any(|pw| w.contains(pw)))
            .count() as f64;
        let neg = words
            .iter()
            .filter(|w| NEGATIVE_WORDS.iter().any(|nw| w.contains(nw)))
            .count() as f64;

        let hits = pos + neg;
        let compound = if hits == 0.0 { 0.0 } else { (pos - neg) / hits };

        Ok(PolarityScores {
            compound,
            positive: pos / total,
            negative: neg / total,
            neutral: (total - hits).max(0.0) / total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_core::SentimentLabel;

    #[test]
    fn test_positive_text() {
        let scores = LexiconScorer::new()
            .polarity("Team achieves breakthrough success with record gains")
            .unwrap();
        assert!(scores.compound > 0.0);
        assert_eq!(
            SentimentLabel::from_compound(scores.compound),
            SentimentLabel::Positive
        );
    }

    #[test]
    fn test_negative_text() {
        let scores = LexiconScorer::new()
            .polarity("Markets crash in worst decline amid growing fear of crisis")
            .unwrap();
        assert!(scores.compound < 0.0);
    }

    #[test]
    fn test_neutral_text() {
        let scores = LexiconScorer::new()
            .polarity("The committee met to discuss the upcoming schedule")
            .unwrap();
        assert_eq!(scores.compound, 0.0);
    }

    #[test]
    fn test_empty_text_is_neutral_baseline() {
        let scores = LexiconScorer::new().polarity("").unwrap();
        assert_eq!(scores.compound, 0.0);
        assert_eq!(scores.neutral, 1.0);
    }
}
