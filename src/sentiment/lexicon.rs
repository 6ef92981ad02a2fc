//! Lexicon Sentiment Engine
//!
//! VADER-style sentiment analysis tuned for short video comments.
//! Handles negation, intensifiers, contrastive "but", capitalization,
//! punctuation emphasis and emojis.

use super::Sentiment;
use std::collections::{HashMap, HashSet};

/// Compound score at or above which a comment is positive
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound score at or below which a comment is negative
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Booster increment (same scale as the lexicon valences)
const B_INCR: f64 = 0.293;
/// Dampener decrement
const B_DECR: f64 = -0.293;
/// Extra valence for an ALL CAPS sentiment word in mixed-case text
const C_INCR: f64 = 0.733;
/// Multiplier applied to a valence preceded by a negation
const N_SCALAR: f64 = -0.74;
/// Normalization constant for the compound score
const ALPHA: f64 = 15.0;

/// Bucket a compound score into a category
pub fn categorize(compound: f64) -> Sentiment {
    if compound >= POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if compound <= NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Anything that produces a compound polarity score in [-1, 1]
pub trait PolarityScorer: Send + Sync {
    fn compound(&self, text: &str) -> f64;

    /// Category of `text` under the fixed thresholds
    fn classify(&self, text: &str) -> Sentiment {
        categorize(self.compound(text))
    }
}

/// Result of lexicon analysis
#[derive(Debug, Clone, PartialEq)]
pub struct PolarityScores {
    /// Positive proportion (0.0 to 1.0)
    pub positive: f64,
    /// Negative proportion (0.0 to 1.0)
    pub negative: f64,
    /// Neutral proportion (0.0 to 1.0)
    pub neutral: f64,
    /// Compound score (-1.0 to 1.0)
    pub compound: f64,
}

impl PolarityScores {
    fn empty() -> Self {
        Self {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            compound: 0.0,
        }
    }

    pub fn sentiment(&self) -> Sentiment {
        categorize(self.compound)
    }
}

/// Sentiment analyzer using lexicon-based approach
pub struct LexiconAnalyzer {
    /// Word-level valences
    lexicon: HashMap<String, f64>,
    /// Emoji valences
    emoji_lexicon: HashMap<char, f64>,
    /// Intensity modifiers (very, barely, etc.)
    boosters: HashMap<String, f64>,
    /// Negation words
    negations: HashSet<String>,
}

impl LexiconAnalyzer {
    /// Create a new analyzer with the default lexicons
    pub fn new() -> Self {
        let mut analyzer = Self {
            lexicon: HashMap::new(),
            emoji_lexicon: HashMap::new(),
            boosters: HashMap::new(),
            negations: HashSet::new(),
        };
        analyzer.init_lexicons();
        analyzer
    }

    fn init_lexicons(&mut self) {
        let positive_words = [
            ("love", 3.2),
            ("loved", 2.9),
            ("loves", 2.7),
            ("lovely", 2.8),
            ("like", 2.0),
            ("liked", 1.8),
            ("likes", 1.8),
            ("great", 3.1),
            ("good", 1.9),
            ("nice", 1.8),
            ("awesome", 3.1),
            ("amazing", 2.8),
            ("best", 3.2),
            ("better", 1.9),
            ("excellent", 2.7),
            ("fantastic", 2.6),
            ("wonderful", 2.7),
            ("beautiful", 2.9),
            ("brilliant", 2.8),
            ("perfect", 2.7),
            ("cool", 1.3),
            ("fun", 2.3),
            ("funny", 1.9),
            ("enjoy", 2.2),
            ("enjoyed", 2.3),
            ("helpful", 1.9),
            ("useful", 1.9),
            ("interesting", 1.7),
            ("thanks", 1.9),
            ("thank", 1.5),
            ("happy", 2.7),
            ("glad", 2.0),
            ("favorite", 2.0),
            ("favourite", 2.0),
            ("recommend", 1.5),
            ("win", 2.8),
            ("wow", 2.8),
            ("yes", 1.7),
            ("lol", 1.8),
            ("haha", 2.0),
            ("super", 2.9),
            ("excited", 1.4),
            ("smart", 1.7),
            ("clear", 1.6),
            ("legend", 1.3),
        ];

        let negative_words = [
            ("bad", -2.5),
            ("terrible", -2.1),
            ("awful", -2.0),
            ("horrible", -2.5),
            ("worst", -3.1),
            ("worse", -2.1),
            ("hate", -2.7),
            ("hated", -3.2),
            ("boring", -1.3),
            ("bored", -1.1),
            ("waste", -1.8),
            ("wasted", -2.2),
            ("useless", -1.8),
            ("stupid", -2.4),
            ("dumb", -2.3),
            ("annoying", -1.7),
            ("disappointing", -2.2),
            ("disappointed", -1.9),
            ("sad", -2.1),
            ("wrong", -2.1),
            ("fake", -2.1),
            ("cringe", -1.8),
            ("trash", -1.8),
            ("garbage", -1.7),
            ("poor", -2.1),
            ("sucks", -1.5),
            ("suck", -1.9),
            ("ugly", -2.3),
            ("clickbait", -1.5),
            ("misleading", -1.7),
            ("lame", -1.8),
            ("meh", -0.3),
            ("angry", -2.3),
            ("scam", -2.6),
            ("fail", -2.5),
            ("failed", -2.3),
            ("dislike", -1.6),
            ("disgusting", -2.4),
            ("pathetic", -2.5),
            ("ridiculous", -1.9),
        ];

        for (word, score) in positive_words.iter().chain(negative_words.iter()) {
            self.lexicon.insert(word.to_string(), *score);
        }

        let emojis = [
            ('😊', 2.2),
            ('😀', 2.0),
            ('😂', 1.8),
            ('😍', 2.8),
            ('❤', 2.5),
            ('👍', 1.8),
            ('🔥', 1.5),
            ('🙌', 1.6),
            ('👏', 1.6),
            ('😢', -2.0),
            ('😭', -1.0),
            ('😞', -2.0),
            ('😡', -2.5),
            ('😠', -2.3),
            ('👎', -2.0),
            ('💩', -1.8),
            ('🤮', -2.4),
        ];

        for (emoji, score) in emojis {
            self.emoji_lexicon.insert(emoji, score);
        }

        let boosters = [
            ("absolutely", B_INCR),
            ("completely", B_INCR),
            ("extremely", B_INCR),
            ("highly", B_INCR),
            ("incredibly", B_INCR),
            ("really", B_INCR),
            ("so", B_INCR),
            ("totally", B_INCR),
            ("truly", B_INCR),
            ("very", B_INCR),
            ("hugely", B_INCR),
            ("barely", B_DECR),
            ("hardly", B_DECR),
            ("kinda", B_DECR),
            ("slightly", B_DECR),
            ("somewhat", B_DECR),
        ];

        for (word, incr) in boosters {
            self.boosters.insert(word.to_string(), incr);
        }

        let negations = [
            "not", "no", "never", "none", "neither", "nobody", "nothing", "nowhere", "nor",
            "without", "cannot", "isnt", "arent", "wasnt", "dont", "doesnt", "didnt", "cant",
            "wont", "wouldnt", "shouldnt", "couldnt",
        ];
        self.negations = negations.iter().map(|w| w.to_string()).collect();
    }

    /// Analyze sentiment of text
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        let raw: Vec<&str> = text.split_whitespace().collect();
        let words: Vec<String> = raw.iter().map(|w| clean_word(w)).collect();
        let cap_differential = has_cap_differential(&raw);

        let mut valences: Vec<f64> = Vec::with_capacity(words.len());

        for (i, word) in words.iter().enumerate() {
            // Modifiers carry no valence of their own
            if self.boosters.contains_key(word) || word.is_empty() {
                valences.push(0.0);
                continue;
            }

            let Some(&base) = self.lexicon.get(word) else {
                valences.push(0.0);
                continue;
            };

            let mut valence = base;
            if cap_differential && is_all_caps(raw[i]) {
                valence += C_INCR * base.signum();
            }

            for distance in 1..=3 {
                if i < distance {
                    break;
                }
                let prev = &words[i - distance];

                if let Some(&incr) = self.boosters.get(prev) {
                    let damp = match distance {
                        1 => 1.0,
                        2 => 0.95,
                        _ => 0.9,
                    };
                    valence += incr * damp * valence.signum();
                }

                if self.is_negation(prev) {
                    valence *= N_SCALAR;
                }
            }

            valences.push(valence);
        }

        apply_but_rule(&words, &mut valences);

        for c in text.chars() {
            if let Some(&score) = self.emoji_lexicon.get(&c) {
                valences.push(score);
            }
        }

        if valences.is_empty() {
            return PolarityScores::empty();
        }

        let punct = punctuation_emphasis(text);
        let mut sum: f64 = valences.iter().sum();
        if sum > 0.0 {
            sum += punct;
        } else if sum < 0.0 {
            sum -= punct;
        }
        let compound = normalize(sum);

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for &v in &valences {
            if v > 0.0 {
                pos_sum += v + 1.0;
            } else if v < 0.0 {
                neg_sum += v - 1.0;
            } else {
                neu_count += 1.0;
            }
        }

        if pos_sum > neg_sum.abs() {
            pos_sum += punct;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= punct;
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        if total == 0.0 {
            return PolarityScores::empty();
        }

        PolarityScores {
            positive: pos_sum / total,
            negative: neg_sum.abs() / total,
            neutral: neu_count / total,
            compound,
        }
    }

    /// Category of a single comment
    pub fn score_lexicon(&self, comment: &str) -> Sentiment {
        self.polarity_scores(comment).sentiment()
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }
}

impl Default for LexiconAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for LexiconAnalyzer {
    fn compound(&self, text: &str) -> f64 {
        self.polarity_scores(text).compound
    }
}

/// Lowercase a token and drop surrounding punctuation and apostrophes
fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect::<String>()
        .trim_matches('-')
        .to_lowercase()
}

fn is_all_caps(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() > 1 && letters.iter().all(|c| c.is_uppercase())
}

/// True when some, but not all, words are ALL CAPS
fn has_cap_differential(words: &[&str]) -> bool {
    let caps = words.iter().filter(|w| is_all_caps(w)).count();
    caps > 0 && caps < words.len()
}

/// Down-weight valences before "but" and up-weight the ones after it
fn apply_but_rule(words: &[String], valences: &mut [f64]) {
    let Some(but_idx) = words.iter().position(|w| w == "but") else {
        return;
    };

    for (i, v) in valences.iter_mut().enumerate() {
        if i < but_idx {
            *v *= 0.5;
        } else if i > but_idx {
            *v *= 1.5;
        }
    }
}

/// Emphasis added by exclamation marks (max 4) and repeated question marks
fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.chars().filter(|c| *c == '!').count().min(4);
    let ep = exclamations as f64 * 0.292;

    let questions = text.chars().filter(|c| *c == '?').count();
    let qm = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * 0.18,
        _ => 0.96,
    };

    ep + qm
}

/// Map an unbounded valence sum into [-1, 1]
fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}
