//! Model Artifact Store
//!
//! Versioned, self-describing JSON artifact for a trained Model:
//! vocabulary table + parameter arrays + metadata. Any consumer can
//! rebuild predictions from the file without this crate.
//!
//! ## Rules
//! 1. Change the field layout → bump `MODEL_FORMAT_VERSION`
//! 2. Change tokenization → bump `MODEL_FORMAT_VERSION`
//! 3. Old versions stay in `SUPPORTED_VERSIONS` only while they load unchanged

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::MODEL_FORMAT_VERSION;

use super::types::{Label, Model, Vocabulary};

/// Value of the `format` field
pub const ARTIFACT_FORMAT: &str = "naive-bayes-sentiment";

/// Artifact versions this build can load
pub const SUPPORTED_VERSIONS: &[&str] = &[MODEL_FORMAT_VERSION];

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact is corrupt: {0}")]
    Corrupt(String),

    #[error("unsupported artifact version {found:?} (supported: {supported:?})")]
    UnsupportedVersion {
        found: String,
        supported: &'static [&'static str],
    },

    #[error("artifact I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode artifact: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ArtifactError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// ============================================================================
// ON-DISK LAYOUT
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct ModelArtifact {
    format: String,
    version: String,
    created_at: DateTime<Utc>,
    example_count: usize,
    labels: Vec<String>,
    smoothing_alpha: f64,
    vocabulary: Vec<String>,
    vocabulary_hash: u32,
    class_priors: [f64; 2],
    token_log_likelihoods: [Vec<f64>; 2],
}

/// Only the field needed to pick a decoder
#[derive(Deserialize)]
struct VersionProbe {
    version: String,
}

/// CRC32 over the version string and every token, NUL separated
pub fn vocabulary_hash(version: &str, tokens: &[String]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(version.as_bytes());
    for token in tokens {
        hasher.update(&[0]);
        hasher.update(token.as_bytes());
    }
    hasher.finalize()
}

fn label_names() -> Vec<String> {
    Label::ALL.iter().map(|l| l.as_str().to_string()).collect()
}

// ============================================================================
// ENCODE / DECODE
// ============================================================================

/// Serialize a model to artifact bytes
pub fn to_bytes(model: &Model) -> Result<Vec<u8>, ArtifactError> {
    let tokens = model.vocabulary().tokens().to_vec();
    let artifact = ModelArtifact {
        format: ARTIFACT_FORMAT.to_string(),
        version: model.version().to_string(),
        created_at: model.trained_at(),
        example_count: model.example_count(),
        labels: label_names(),
        smoothing_alpha: model.smoothing_alpha(),
        vocabulary_hash: vocabulary_hash(model.version(), &tokens),
        vocabulary: tokens,
        class_priors: model.class_priors(),
        token_log_likelihoods: [
            model.token_log_likelihoods(Label::Negative).to_vec(),
            model.token_log_likelihoods(Label::Positive).to_vec(),
        ],
    };

    Ok(serde_json::to_vec_pretty(&artifact)?)
}

/// Decode and validate artifact bytes
pub fn from_bytes(bytes: &[u8]) -> Result<Model, ArtifactError> {
    let probe: VersionProbe = serde_json::from_slice(bytes)
        .map_err(|e| ArtifactError::Corrupt(format!("missing or unreadable version: {}", e)))?;

    if !SUPPORTED_VERSIONS.contains(&probe.version.as_str()) {
        return Err(ArtifactError::UnsupportedVersion {
            found: probe.version,
            supported: SUPPORTED_VERSIONS,
        });
    }

    let artifact: ModelArtifact =
        serde_json::from_slice(bytes).map_err(|e| ArtifactError::Corrupt(e.to_string()))?;

    if artifact.format != ARTIFACT_FORMAT {
        return Err(ArtifactError::Corrupt(format!(
            "unexpected format {:?}",
            artifact.format
        )));
    }
    if artifact.labels != label_names() {
        return Err(ArtifactError::Corrupt(format!(
            "unexpected labels {:?}",
            artifact.labels
        )));
    }

    let expected_hash = vocabulary_hash(&artifact.version, &artifact.vocabulary);
    if artifact.vocabulary_hash != expected_hash {
        return Err(ArtifactError::Corrupt(format!(
            "vocabulary hash mismatch: stored {:x}, computed {:x}",
            artifact.vocabulary_hash, expected_hash
        )));
    }

    let vocabulary = Vocabulary::try_from(artifact.vocabulary)
        .map_err(|e| ArtifactError::Corrupt(e.to_string()))?;

    Model::from_parts(
        &artifact.version,
        vocabulary,
        artifact.class_priors,
        artifact.token_log_likelihoods,
        artifact.smoothing_alpha,
        artifact.created_at,
        artifact.example_count,
    )
    .map_err(|e| ArtifactError::Corrupt(e.to_string()))
}

// ============================================================================
// FILE STORE
// ============================================================================

/// Write the artifact to `path` via a sibling temp file + rename
pub fn save(model: &Model, path: &Path) -> Result<(), ArtifactError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ArtifactError::io(parent, e))?;
        }
    }

    let bytes = to_bytes(model)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes).map_err(|e| ArtifactError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| ArtifactError::io(path, e))?;

    log::info!(
        "Saved model artifact v{} ({} tokens) to {:?}",
        model.version(),
        model.vocabulary().len(),
        path
    );
    Ok(())
}

/// Load and validate the artifact at `path`
pub fn load(path: &Path) -> Result<Model, ArtifactError> {
    let bytes = fs::read(path).map_err(|e| ArtifactError::io(path, e))?;
    let model = from_bytes(&bytes)?;

    log::info!(
        "Loaded model artifact v{} ({} tokens, trained {}) from {:?}",
        model.version(),
        model.vocabulary().len(),
        model.trained_at(),
        path
    );
    Ok(model)
}

// ============================================================================
// TESTS
// ============================================================================
