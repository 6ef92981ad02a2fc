//! Multinomial Naive Bayes over sparse feature rows
//!
//! Binary targets: 0 = negative, 1 = positive.

use super::vectorizer::SparseRow;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Number of target classes
pub const N_CLASSES: usize = 2;

/// Multinomial Naive Bayes classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    /// Additive (Laplace) smoothing
    alpha: f64,
    /// Training rows per class
    class_count: [f64; N_CLASSES],
    /// log P(class)
    class_log_prior: [f64; N_CLASSES],
    /// log P(feature | class)
    feature_log_prob: [Vec<f64>; N_CLASSES],
}

impl MultinomialNb {
    /// Fit on weighted feature rows. Both classes must be present.
    pub fn fit(rows: &[SparseRow], targets: &[u8], n_features: usize, alpha: f64) -> Result<Self> {
        if rows.len() != targets.len() {
            return Err(AppError::Training(format!(
                "{} rows but {} targets",
                rows.len(),
                targets.len()
            )));
        }

        let mut class_count = [0.0; N_CLASSES];
        let mut feature_count = [vec![0.0; n_features], vec![0.0; n_features]];

        for (row, &target) in rows.iter().zip(targets) {
            let class = target as usize;
            if class >= N_CLASSES {
                return Err(AppError::Training(format!("invalid target {}", target)));
            }
            class_count[class] += 1.0;
            for &(idx, value) in row {
                if idx < n_features {
                    feature_count[class][idx] += value;
                }
            }
        }

        if class_count.iter().any(|&c| c == 0.0) {
            return Err(AppError::Training(
                "training data needs both positive and negative examples".to_string(),
            ));
        }

        let total: f64 = class_count.iter().sum();
        let class_log_prior = [
            (class_count[0] / total).ln(),
            (class_count[1] / total).ln(),
        ];

        let feature_log_prob = feature_count.map(|counts| {
            let smoothed_total: f64 = counts.iter().sum::<f64>() + alpha * n_features as f64;
            counts
                .iter()
                .map(|&c| ((c + alpha) / smoothed_total).ln())
                .collect::<Vec<f64>>()
        });

        Ok(Self {
            alpha,
            class_count,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Joint log-likelihood per class
    pub fn joint_log_likelihood(&self, row: &SparseRow) -> [f64; N_CLASSES] {
        let mut jll = self.class_log_prior;
        for (class, score) in jll.iter_mut().enumerate() {
            for &(idx, value) in row {
                if let Some(lp) = self.feature_log_prob[class].get(idx) {
                    *score += value * lp;
                }
            }
        }
        jll
    }

    /// Most likely class; ties go to class 0
    pub fn predict_one(&self, row: &SparseRow) -> u8 {
        let jll = self.joint_log_likelihood(row);
        if jll[1] > jll[0] {
            1
        } else {
            0
        }
    }

    pub fn predict(&self, rows: &[SparseRow]) -> Vec<u8> {
        rows.iter().map(|row| self.predict_one(row)).collect()
    }

    /// Posterior P(class | row)
    pub fn predict_proba(&self, row: &SparseRow) -> [f64; N_CLASSES] {
        let jll = self.joint_log_likelihood(row);
        let max = jll[0].max(jll[1]);
        let exp = jll.map(|s| (s - max).exp());
        let sum: f64 = exp.iter().sum();
        exp.map(|e| e / sum)
    }

    pub fn n_features(&self) -> usize {
        self.feature_log_prob[0].len()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn class_count(&self) -> [f64; N_CLASSES] {
        self.class_count
    }
}
