//! Contract for the external performer classifier.
//!
//! The classifier itself lives outside this crate. Consumers implement
//! [`Predictor`] and call it through [`predict_sanitized`] so every
//! utterance is normalized the same way the training data was.

use std::collections::HashMap;

use crate::error::CastlineError;
use crate::normalize::sanitize;

/// A performer label with its probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked {
    pub performer: String,
    pub probability: f64,
}

/// Distribution over performer labels, most likely first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prediction {
    ranked: Vec<Ranked>,
}

impl Prediction {
    /// Rank raw label scores: probability descending, label ascending on ties.
    pub fn from_scores(scores: HashMap<String, f64>) -> Self {
        let mut ranked: Vec<Ranked> = scores
            .into_iter()
            .map(|(performer, probability)| Ranked {
                performer,
                probability,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.probability
                .total_cmp(&a.probability)
                .then_with(|| a.performer.cmp(&b.performer))
        });
        Self { ranked }
    }

    pub fn ranked(&self) -> &[Ranked] {
        &self.ranked
    }

    pub fn top(&self) -> Option<&Ranked> {
        self.ranked.first()
    }

    /// Probability of a specific performer, if the model knows the label.
    pub fn probability_of(&self, performer: &str) -> Option<f64> {
        self.ranked
            .iter()
            .find(|r| r.performer == performer)
            .map(|r| r.probability)
    }
}

/// An utterance -> performer classifier.
pub trait Predictor {
    /// Score an already sanitized utterance.
    fn predict(&self, utterance: &str) -> Result<Prediction, CastlineError>;
}

/// Sanitize `text` and hand it to `predictor`.
pub fn predict_sanitized<P: Predictor + ?Sized>(
    predictor: &P,
    text: &str,
) -> Result<Prediction, CastlineError> {
    let utterance = sanitize(text);
    tracing::debug!(utterance = %utterance, "Prediction requested");
    predictor.predict(&utterance)
}
