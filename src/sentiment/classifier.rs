//! Trainable statistical sentiment classifier
//!
//! Vectorizer, TF-IDF transformer and Naive Bayes model are fitted together
//! and persisted as one JSON artifact. Inference reuses the fitted
//! vocabulary and IDF weights; nothing is refit after training.

use super::naive_bayes::MultinomialNb;
use super::vectorizer::{CountVectorizer, TfidfTransformer};
use super::Sentiment;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Artifact format version
pub const BUNDLE_VERSION: u32 = 1;

/// Laplace smoothing used for training
const NB_ALPHA: f64 = 1.0;

/// Training label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    /// Binary target: positive = 1, negative = 0
    pub fn target(&self) -> u8 {
        match self {
            Label::Positive => 1,
            Label::Negative => 0,
        }
    }
}

impl FromStr for Label {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Label::Positive),
            "negative" => Ok(Label::Negative),
            other => Err(AppError::Training(format!("unknown label: {:?}", other))),
        }
    }
}

/// One training example
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledComment {
    pub text: String,
    pub label: Label,
}

/// Load a JSON array of `{"text": ..., "label": "positive" | "negative"}`
pub fn load_training_set<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledComment>> {
    let data = fs::read_to_string(path)?;
    let examples: Vec<LabeledComment> = serde_json::from_str(&data)?;
    Ok(examples)
}

/// Fitted vectorizer + transformer + model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedClassifierBundle {
    version: u32,
    vectorizer: CountVectorizer,
    transformer: TfidfTransformer,
    model: MultinomialNb,
}

impl TrainedClassifierBundle {
    /// Fit the full pipeline on labeled comments
    pub fn train<S: AsRef<str>>(comments: &[S], labels: &[Label]) -> Result<Self> {
        if comments.is_empty() {
            return Err(AppError::Training("no training comments".to_string()));
        }
        if comments.len() != labels.len() {
            return Err(AppError::Training(format!(
                "{} comments but {} labels",
                comments.len(),
                labels.len()
            )));
        }

        let targets: Vec<u8> = labels.iter().map(Label::target).collect();

        let mut vectorizer = CountVectorizer::new();
        let counts = vectorizer.fit_transform(comments);
        if vectorizer.n_features() == 0 {
            return Err(AppError::Training(
                "empty vocabulary; comments contain no usable words".to_string(),
            ));
        }

        let mut transformer = TfidfTransformer::new();
        let features = transformer.fit_transform(&counts, vectorizer.n_features());

        let model = MultinomialNb::fit(&features, &targets, vectorizer.n_features(), NB_ALPHA)?;

        tracing::info!(
            "Trained classifier on {} comments ({} features)",
            comments.len(),
            vectorizer.n_features()
        );

        Ok(Self {
            version: BUNDLE_VERSION,
            vectorizer,
            transformer,
            model,
        })
    }

    /// Train from loaded examples
    pub fn train_examples(examples: &[LabeledComment]) -> Result<Self> {
        let comments: Vec<&str> = examples.iter().map(|e| e.text.as_str()).collect();
        let labels: Vec<Label> = examples.iter().map(|e| e.label).collect();
        Self::train(&comments, &labels)
    }

    /// Binary predictions (1 = positive, 0 = negative)
    pub fn predict<S: AsRef<str>>(&self, comments: &[S]) -> Vec<u8> {
        let counts = self.vectorizer.transform(comments);
        let features = self.transformer.transform(&counts);
        self.model.predict(&features)
    }

    /// Classify comments as positive or negative. Never returns neutral.
    pub fn classify<S: AsRef<str>>(&self, comments: &[S]) -> Vec<Sentiment> {
        self.predict(comments)
            .into_iter()
            .map(|p| if p == 1 { Sentiment::Positive } else { Sentiment::Negative })
            .collect()
    }

    /// Probability that a comment is positive
    pub fn positive_probability(&self, comment: &str) -> f64 {
        let counts = self.vectorizer.transform_one(comment);
        let features = self.transformer.transform_one(&counts);
        self.model.predict_proba(&features)[1]
    }

    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }

    /// Training examples per class, indexed by target (negative, positive)
    pub fn class_count(&self) -> [f64; 2] {
        self.model.class_count()
    }

    /// Laplace smoothing the model was fitted with
    pub fn alpha(&self) -> f64 {
        self.model.alpha()
    }

    /// Persist as JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(self)?;
        fs::write(path, json)?;
        tracing::info!("Saved classifier to {}", path.display());
        Ok(())
    }

    /// Load a persisted bundle
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let bundle: Self = serde_json::from_str(&data)
            .map_err(|e| AppError::Model(format!("{}: {}", path.display(), e)))?;

        if bundle.version != BUNDLE_VERSION {
            return Err(AppError::Model(format!(
                "{}: unsupported bundle version {} (expected {})",
                path.display(),
                bundle.version,
                BUNDLE_VERSION
            )));
        }
        if bundle.model.n_features() != bundle.vectorizer.n_features()
            || bundle.transformer.idf().len() != bundle.vectorizer.n_features()
        {
            return Err(AppError::Model(format!(
                "{}: vectorizer, transformer and model disagree on feature count",
                path.display()
            )));
        }

        tracing::info!(
            "Loaded classifier from {} ({} features)",
            path.display(),
            bundle.n_features()
        );
        Ok(bundle)
    }

    /// Load the bundle if the file exists. A missing file is not an error.
    pub fn load_if_present<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(
                "No classifier at {}; statistical mode will use the lexicon",
                path.display()
            );
            return Ok(None);
        }
        Self::load(path).map(Some)
    }
}
