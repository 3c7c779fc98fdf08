use std::collections::HashSet;

/// Scores headline text for sentiment polarity using a small financial
/// lexicon.
///
/// The score is `(positive hits - negative hits) / (positive hits +
/// negative hits)`, which lands in `[-1, 1]` by construction; text with no
/// lexicon hits scores a neutral `0.0`.
pub struct SentimentScorer {
    positive_words: HashSet<&'static str>,
    negative_words: HashSet<&'static str>,
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self {
            positive_words: Self::build_positive_lexicon(),
            negative_words: Self::build_negative_lexicon(),
        }
    }

    /// Scores one piece of text. Tokenization is whitespace splitting with
    /// punctuation trimmed, so "rallies," still hits "rallies".
    pub fn score(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let mut positive = 0usize;
        let mut negative = 0usize;

        for token in lowered.split_whitespace() {
            let word = token.trim_matches(|c: char| !c.is_alphanumeric());
            if word.is_empty() {
                continue;
            }
            if self.positive_words.contains(word) {
                positive += 1;
            } else if self.negative_words.contains(word) {
                negative += 1;
            }
        }

        let hits = positive + negative;
        if hits == 0 {
            return 0.0;
        }
        (positive as f64 - negative as f64) / hits as f64
    }

    /// Buckets a score for display.
    pub fn label(score: f64) -> &'static str {
        if score > 0.15 {
            "positive"
        } else if score < -0.15 {
            "negative"
        } else {
            "neutral"
        }
    }

    fn build_positive_lexicon() -> HashSet<&'static str> {
        [
            "gain", "gains", "rally", "rallies", "rallied", "surge", "surges",
            "surged", "jump", "jumps", "jumped", "climb", "climbs", "climbed",
            "rise", "rises", "rose", "soar", "soars", "soared", "record",
            "upbeat", "optimism", "optimistic", "bullish", "strong", "strength",
            "growth", "boom", "beat", "beats", "upgrade", "upgraded", "recovery",
            "rebound", "rebounds", "profit", "profits", "boost", "boosts",
            "boosted", "outperform", "outperforms",
        ]
        .into_iter()
        .collect()
    }

    fn build_negative_lexicon() -> HashSet<&'static str> {
        [
            "loss", "losses", "fall", "falls", "fell", "drop", "drops",
            "dropped", "slide", "slides", "slid", "plunge", "plunges",
            "plunged", "tumble", "tumbles", "tumbled", "sink", "sinks", "sank",
            "slump", "slumps", "slumped", "crash", "crashes", "crashed",
            "fear", "fears", "worry", "worries", "bearish", "weak", "weakness",
            "recession", "downturn", "crisis", "miss", "misses", "missed",
            "downgrade", "downgraded", "selloff", "default", "inflation",
            "underperform", "underperforms",
        ]
        .into_iter()
        .collect()
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_headline_scores_above_zero() {
        let scorer = SentimentScorer::new();
        let score = scorer.score("Stocks rally to record highs on strong earnings beat");
        assert!(score > 0.0);
    }

    #[test]
    fn negative_headline_scores_below_zero() {
        let scorer = SentimentScorer::new();
        let score = scorer.score("Markets tumble as recession fears trigger selloff");
        assert!(score < 0.0);
    }

    #[test]
    fn neutral_text_scores_zero() {
        let scorer = SentimentScorer::new();
        assert_eq!(scorer.score("The central bank meets on Thursday"), 0.0);
    }

    #[test]
    fn empty_text_scores_zero() {
        let scorer = SentimentScorer::new();
        assert_eq!(scorer.score(""), 0.0);
    }

    #[test]
    fn score_stays_within_unit_interval() {
        let scorer = SentimentScorer::new();
        let all_positive = scorer.score("rally surge jump climb soar");
        let all_negative = scorer.score("crash plunge tumble slump selloff");

        assert_eq!(all_positive, 1.0);
        assert_eq!(all_negative, -1.0);
    }

    #[test]
    fn punctuation_does_not_hide_hits() {
        let scorer = SentimentScorer::new();
        assert!(scorer.score("Dollar rallies, euro slides.") == 0.0);
        assert!(scorer.score("Dollar rallies!") > 0.0);
    }

    #[test]
    fn mixed_headline_balances_out() {
        let scorer = SentimentScorer::new();
        let score = scorer.score("Oil gains while gold falls");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn labels_bucket_scores() {
        assert_eq!(SentimentScorer::label(0.8), "positive");
        assert_eq!(SentimentScorer::label(-0.8), "negative");
        assert_eq!(SentimentScorer::label(0.0), "neutral");
    }
}
