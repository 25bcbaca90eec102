//! Model Types
//!
//! Label, Vocabulary and the trained Naive Bayes Model.
//! A Model is read-only once built; only the trainer and the artifact
//! loader construct one.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance for `P(Negative) + P(Positive) == 1`
pub const PRIOR_SUM_TOLERANCE: f64 = 1e-9;

// ============================================================================
// LABEL
// ============================================================================

/// Binary sentiment label. Class index 0 = Negative, 1 = Positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Negative,
    Positive,
}

impl Label {
    /// Labels in class-index order
    pub const ALL: [Label; 2] = [Label::Negative, Label::Positive];

    pub fn from_class(class: u8) -> Option<Self> {
        match class {
            0 => Some(Label::Negative),
            1 => Some(Label::Positive),
            _ => None,
        }
    }

    pub fn class_index(self) -> usize {
        match self {
            Label::Negative => 0,
            Label::Positive => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Negative => "Negative",
            Label::Positive => "Positive",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown label: {0}")]
pub struct UnknownLabel(pub String);

impl FromStr for Label {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Negative" => Ok(Label::Negative),
            "Positive" => Ok(Label::Positive),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

// ============================================================================
// VOCABULARY
// ============================================================================

/// Token -> index table. Index = position in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    tokens: Vec<String>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate vocabulary token: {0:?}")]
pub struct DuplicateToken(pub String);

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token if unseen; returns its index either way
    pub fn insert(&mut self, token: &str) -> usize {
        if let Some(&idx) = self.index.get(token) {
            return idx;
        }
        let idx = self.tokens.len();
        self.tokens.push(token.to_string());
        self.index.insert(token.to_string(), idx);
        idx
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens ordered by index
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl TryFrom<Vec<String>> for Vocabulary {
    type Error = DuplicateToken;

    fn try_from(tokens: Vec<String>) -> Result<Self, Self::Error> {
        let mut index = HashMap::with_capacity(tokens.len());
        for (idx, token) in tokens.iter().enumerate() {
            if index.insert(token.clone(), idx).is_some() {
                return Err(DuplicateToken(token.clone()));
            }
        }
        Ok(Self { tokens, index })
    }
}

// ============================================================================
// MODEL
// ============================================================================

/// Broken Model invariant
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("{label} table has {actual} entries, vocabulary has {expected}")]
    LengthMismatch {
        label: Label,
        expected: usize,
        actual: usize,
    },

    #[error("non-finite value in {0}")]
    NonFinite(&'static str),

    #[error("invalid class priors [{0}, {1}]")]
    InvalidPriors(f64, f64),

    #[error("smoothing alpha must be positive, got {0}")]
    InvalidAlpha(f64),
}

/// Trained multinomial Naive Bayes model
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub(crate) version: String,
    pub(crate) vocabulary: Vocabulary,
    pub(crate) class_priors: [f64; 2],
    /// `[class][token_index] -> ln P(token | class)`
    pub(crate) token_log_likelihoods: [Vec<f64>; 2],
    pub(crate) smoothing_alpha: f64,
    pub(crate) trained_at: DateTime<Utc>,
    pub(crate) example_count: usize,
}

impl Model {
    /// Assemble a model from raw parts, checking every invariant
    pub fn from_parts(
        version: &str,
        vocabulary: Vocabulary,
        class_priors: [f64; 2],
        token_log_likelihoods: [Vec<f64>; 2],
        smoothing_alpha: f64,
        trained_at: DateTime<Utc>,
        example_count: usize,
    ) -> Result<Self, ModelError> {
        let model = Self {
            version: version.to_string(),
            vocabulary,
            class_priors,
            token_log_likelihoods,
            smoothing_alpha,
            trained_at,
            example_count,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if !(self.smoothing_alpha.is_finite() && self.smoothing_alpha > 0.0) {
            return Err(ModelError::InvalidAlpha(self.smoothing_alpha));
        }

        let [neg, pos] = self.class_priors;
        let in_range = |p: f64| p.is_finite() && p > 0.0 && p < 1.0;
        if !in_range(neg) || !in_range(pos) || ((neg + pos) - 1.0).abs() > PRIOR_SUM_TOLERANCE {
            return Err(ModelError::InvalidPriors(neg, pos));
        }

        for label in Label::ALL {
            let table = &self.token_log_likelihoods[label.class_index()];
            if table.len() != self.vocabulary.len() {
                return Err(ModelError::LengthMismatch {
                    label,
                    expected: self.vocabulary.len(),
                    actual: table.len(),
                });
            }
            if table.iter().any(|v| !v.is_finite()) {
                return Err(ModelError::NonFinite("token_log_likelihoods"));
            }
        }

        Ok(())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn class_priors(&self) -> [f64; 2] {
        self.class_priors
    }

    pub fn prior(&self, label: Label) -> f64 {
        self.class_priors[label.class_index()]
    }

    pub fn token_log_likelihoods(&self, label: Label) -> &[f64] {
        &self.token_log_likelihoods[label.class_index()]
    }

    pub fn smoothing_alpha(&self) -> f64 {
        self.smoothing_alpha
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    pub fn example_count(&self) -> usize {
        self.example_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(tokens: &[&str]) -> Vocabulary {
        Vocabulary::try_from(tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn test_vocabulary_first_seen_order() {
        let mut v = Vocabulary::new();
        assert_eq!(v.insert("good"), 0);
        assert_eq!(v.insert("bad"), 1);
        assert_eq!(v.insert("good"), 0);
        assert_eq!(v.tokens(), &["good".to_string(), "bad".to_string()]);
        assert_eq!(v.get("bad"), Some(1));
        assert_eq!(v.get("meh"), None);
    }

    #[test]
    fn test_vocabulary_rejects_duplicates() {
        let err = Vocabulary::try_from(vec!["a".to_string(), "a".to_string()]).unwrap_err();
        assert_eq!(err, DuplicateToken("a".to_string()));
    }

    #[test]
    fn test_label_round_trip_str() {
        for label in Label::ALL {
            assert_eq!(label.as_str().parse::<Label>().unwrap(), label);
        }
        assert!("Neutral".parse::<Label>().is_err());
        assert_eq!(Label::from_class(1), Some(Label::Positive));
        assert_eq!(Label::from_class(2), None);
    }

    #[test]
    fn test_from_parts_checks_lengths() {
        let err = Model::from_parts(
            "1.0",
            vocab(&["a", "b"]),
            [0.5, 0.5],
            [vec![-0.7, -0.7], vec![-0.7]],
            1.0,
            Utc::now(),
            2,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::LengthMismatch { label: Label::Positive, .. }));
    }

    #[test]
    fn test_from_parts_checks_priors() {
        let err = Model::from_parts(
            "1.0",
            vocab(&["a"]),
            [0.7, 0.7],
            [vec![-0.7], vec![-0.7]],
            1.0,
            Utc::now(),
            2,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::InvalidPriors(..)));
    }

    #[test]
    fn test_from_parts_rejects_nan() {
        let err = Model::from_parts(
            "1.0",
            vocab(&["a"]),
            [0.5, 0.5],
            [vec![f64::NAN], vec![-0.7]],
            1.0,
            Utc::now(),
            2,
        )
        .unwrap_err();
        assert_eq!(err, ModelError::NonFinite("token_log_likelihoods"));
    }
}
