//! Text module - tokenizing and sentiment scoring

mod sentiment;
mod tokenizer;

pub use sentiment::{LexiconScorer, PolarityScorer, Sentiment, SentimentClassifier};
pub use tokenizer::tokenize;
