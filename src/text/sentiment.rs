//! Sentiment Module
//! Polarity scoring behind a narrow trait and the three-way label policy.

use std::collections::{HashMap, HashSet};
use std::fmt;

/// Sentiment label of a review.
///
/// Variant order matches the lexical order of the labels, which is the
/// column order used by the month x sentiment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive];

    /// Apply the threshold policy to a polarity score.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Sentiment::Positive
        } else if polarity < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Positive => "Positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that maps text to a polarity in [-1.0, 1.0].
pub trait PolarityScorer {
    fn score(&self, text: &str) -> f64;
}

/// Classifies text with a pluggable polarity scorer.
pub struct SentimentClassifier<S = LexiconScorer> {
    scorer: S,
}

impl SentimentClassifier<LexiconScorer> {
    /// Classifier backed by the built-in lexicon.
    pub fn lexicon() -> Self {
        Self::new(LexiconScorer::new())
    }
}

impl<S: PolarityScorer> SentimentClassifier<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    /// Label a text. Total over all strings; blank text is Neutral.
    pub fn classify(&self, text: &str) -> Sentiment {
        if text.trim().is_empty() {
            return Sentiment::Neutral;
        }
        Sentiment::from_polarity(self.scorer.score(text))
    }
}

/// Negation flips and damps the next sentiment word.
const NEGATION_FACTOR: f64 = -0.5;

/// Lexicon-based scorer.
///
/// Each sentiment-bearing word contributes its polarity, scaled by any
/// preceding intensifiers and flipped by a preceding negator. The text
/// polarity is the mean contribution, clamped to [-1, 1].
pub struct LexiconScorer {
    polarities: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
    negators: HashSet<&'static str>,
    fillers: HashSet<&'static str>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            polarities: Self::build_polarity_lexicon(),
            intensifiers: Self::build_intensifier_lexicon(),
            negators: Self::build_negator_lexicon(),
            fillers: ["a", "an", "the", "at", "all", "that", "too"].into_iter().collect(),
        }
    }

    fn words(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !(c.is_alphabetic() || c == '\''))
            .filter(|w| !w.is_empty())
            .map(|w| w.to_lowercase().replace('\'', ""))
    }

    fn build_polarity_lexicon() -> HashMap<&'static str, f64> {
        [
            // Positive
            ("good", 0.7), ("great", 0.8), ("excellent", 1.0), ("amazing", 0.6),
            ("awesome", 1.0), ("perfect", 1.0), ("best", 1.0), ("better", 0.5),
            ("love", 0.5), ("loved", 0.7), ("loves", 0.5), ("like", 0.2),
            ("liked", 0.3), ("nice", 0.6), ("happy", 0.8), ("satisfied", 0.5),
            ("fantastic", 0.4), ("wonderful", 1.0), ("beautiful", 0.85),
            ("recommend", 0.4), ("recommended", 0.4), ("useful", 0.3),
            ("helpful", 0.3), ("easy", 0.43), ("fast", 0.2), ("quick", 0.33),
            ("comfortable", 0.4), ("sturdy", 0.3), ("reliable", 0.4),
            ("durable", 0.3), ("worth", 0.3), ("fine", 0.42), ("solid", 0.3),
            ("impressive", 1.0), ("pleased", 0.5), ("enjoy", 0.4),
            ("enjoyed", 0.4), ("favorite", 0.5), ("superb", 1.0), ("cheap", 0.4),
            ("affordable", 0.3), ("clean", 0.37), ("smooth", 0.4),
            ("works", 0.1), ("quality", 0.1), ("exceeded", 0.5),
            // Negative
            ("bad", -0.7), ("terrible", -1.0), ("awful", -1.0), ("horrible", -1.0),
            ("worst", -1.0), ("worse", -0.4), ("poor", -0.4), ("hate", -0.8),
            ("hated", -0.9), ("disappointed", -0.75), ("disappointing", -0.6),
            ("broken", -0.4), ("broke", -0.4), ("useless", -0.5), ("waste", -0.2),
            ("defective", -0.5), ("cheaply", -0.4), ("flimsy", -0.4),
            ("slow", -0.3), ("difficult", -0.5), ("hard", -0.29), ("annoying", -0.8),
            ("uncomfortable", -0.5), ("returned", -0.2), ("refund", -0.2),
            ("fake", -0.5), ("wrong", -0.5), ("fail", -0.5), ("failed", -0.5),
            ("stopped", -0.2), ("unhappy", -0.6), ("mediocre", -0.3),
            ("overpriced", -0.4), ("sad", -0.5), ("angry", -0.5),
            ("frustrating", -0.4), ("junk", -0.6), ("garbage", -0.7),
            ("damaged", -0.5), ("leaks", -0.3), ("noisy", -0.3),
        ]
        .into_iter()
        .collect()
    }

    fn build_intensifier_lexicon() -> HashMap<&'static str, f64> {
        [
            ("very", 1.3), ("really", 1.3), ("extremely", 1.5), ("super", 1.3),
            ("so", 1.2), ("incredibly", 1.5), ("absolutely", 1.4), ("totally", 1.3),
            ("highly", 1.3), ("quite", 1.1), ("pretty", 1.1), ("slightly", 0.6),
            ("somewhat", 0.7), ("barely", 0.5),
        ]
        .into_iter()
        .collect()
    }

    fn build_negator_lexicon() -> HashSet<&'static str> {
        [
            "not", "no", "never", "nor", "dont", "doesnt", "didnt", "isnt",
            "wasnt", "arent", "werent", "cant", "cannot", "couldnt", "wont",
            "wouldnt", "hardly",
        ]
        .into_iter()
        .collect()
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let mut contributions: Vec<f64> = Vec::new();
        let mut modifier = 1.0;
        let mut negated = false;

        for word in Self::words(text) {
            let word = word.as_str();
            if self.negators.contains(word) {
                negated = true;
            } else if let Some(&m) = self.intensifiers.get(word) {
                modifier *= m;
            } else if let Some(&p) = self.polarities.get(word) {
                let mut value = p * modifier;
                if negated {
                    value *= NEGATION_FACTOR;
                }
                contributions.push(value);
                modifier = 1.0;
                negated = false;
            } else if !self.fillers.contains(word) {
                modifier = 1.0;
                negated = false;
            }
        }

        if contributions.is_empty() {
            return 0.0;
        }
        let mean = contributions.iter().sum::<f64>() / contributions.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedScorer(f64);

    impl PolarityScorer for FixedScorer {
        fn score(&self, _text: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn threshold_policy() {
        assert_eq!(Sentiment::from_polarity(0.01), Sentiment::Positive);
        assert_eq!(Sentiment::from_polarity(-0.01), Sentiment::Negative);
        assert_eq!(Sentiment::from_polarity(0.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_polarity(-0.0), Sentiment::Neutral);
    }

    #[test]
    fn blank_text_is_neutral() {
        let classifier = SentimentClassifier::lexicon();
        assert_eq!(classifier.classify(""), Sentiment::Neutral);
        assert_eq!(classifier.classify("   \n\t"), Sentiment::Neutral);
    }

    #[test]
    fn blank_text_is_neutral_for_any_scorer() {
        let classifier = SentimentClassifier::new(FixedScorer(0.9));
        assert_eq!(classifier.classify(" "), Sentiment::Neutral);
        assert_eq!(classifier.classify("words"), Sentiment::Positive);
    }

    #[test]
    fn classifies_reference_examples() {
        let classifier = SentimentClassifier::lexicon();
        assert_eq!(classifier.classify("I love this, it is great!"), Sentiment::Positive);
        assert_eq!(classifier.classify("Terrible, I hate it."), Sentiment::Negative);
        assert_eq!(classifier.classify("It arrived on Tuesday."), Sentiment::Neutral);
    }

    #[test]
    fn negation_flips_polarity() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score("good") > 0.0);
        assert!(scorer.score("not good") < 0.0);
        assert!(scorer.score("Don't buy, not worth it") < 0.0);
        assert!(scorer.score("not bad at all") > 0.0);
    }

    #[test]
    fn intensifiers_scale_but_stay_in_range() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score("very good") > scorer.score("good"));
        let strong = scorer.score("extremely incredibly absolutely perfect");
        assert!(strong <= 1.0);
        assert!(scorer.score("extremely incredibly absolutely awful") >= -1.0);
    }

    #[test]
    fn polarity_is_always_bounded() {
        let scorer = LexiconScorer::new();
        for text in [
            "",
            "!!!",
            "good bad good bad",
            "best best best worst",
            "¿Qué tal? 😀 ok",
        ] {
            let p = scorer.score(text);
            assert!((-1.0..=1.0).contains(&p), "{text}: {p}");
        }
    }

    #[test]
    fn labels_follow_lexical_order() {
        let mut labels = vec![Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];
        labels.sort();
        assert_eq!(labels, Sentiment::ALL.to_vec());
        assert_eq!(Sentiment::Positive.to_string(), "Positive");
    }
}
