//! Comment Sentiment Analysis Module
//!
//! Classifies viewer comments and aggregates them per video.
//! Key features:
//! - Lexicon scoring using VADER-style valence rules
//! - Trainable TF-IDF + multinomial Naive Bayes classifier
//! - Percentage distributions with a fixed category order

pub mod aggregator;
pub mod classifier;
pub mod lexicon;
pub mod naive_bayes;
pub mod vectorizer;

pub use aggregator::{AnalysisResult, SentimentAggregator};
pub use classifier::{Label, LabeledComment, TrainedClassifierBundle};
pub use lexicon::{categorize, LexiconAnalyzer, PolarityScorer, PolarityScores};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentiment category of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// All categories in enumeration order. Ties resolve to the earliest entry.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    /// Verdict shown to the user when this category wins
    pub fn message(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Best video! Go ahead 😊",
            Sentiment::Neutral => "It's okay. Might be worth a look 😐",
            Sentiment::Negative => "You are wasting your time 😞",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of comments per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

impl FromIterator<Sentiment> for SentimentCounts {
    fn from_iter<I: IntoIterator<Item = Sentiment>>(iter: I) -> Self {
        let mut counts = Self::default();
        for sentiment in iter {
            counts.record(sentiment);
        }
        counts
    }
}

/// Percentage of comments per category (0-100, two decimals)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl SentimentDistribution {
    /// Convert counts to percentages. With no comments every entry is 0.00.
    pub fn from_counts(counts: &SentimentCounts) -> Self {
        let total = counts.total().max(1) as f64;
        let pct = |n: usize| round2(n as f64 / total * 100.0);

        Self {
            positive: pct(counts.positive),
            neutral: pct(counts.neutral),
            negative: pct(counts.negative),
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> f64 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    /// Category with the highest share; the first maximum in `Sentiment::ALL` wins ties
    pub fn overall(&self) -> Sentiment {
        let mut best = Sentiment::ALL[0];
        for sentiment in &Sentiment::ALL[1..] {
            if self.get(*sentiment) > self.get(best) {
                best = *sentiment;
            }
        }
        best
    }

    pub fn sum(&self) -> f64 {
        self.positive + self.neutral + self.negative
    }
}

/// Round to two decimals, half to even on the exact binary value.
///
/// Fixed-precision formatting is correctly rounded, so `1/32 * 100 = 3.125`
/// becomes 3.12 and an inexact product like `100.49999...` stays below the tie.
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
