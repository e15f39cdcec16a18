//! Single-slot model artifact storage.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::model::RegressionModel;
use crate::prelude::*;

pub const DEFAULT_MODEL_PATH: &str = "model/house_price_model.pkl";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("model artifact `{0}` does not exist")]
    NotFound(PathBuf),

    #[error("failed to read the model artifact `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to deserialize the model artifact `{path}`")]
    Deserialize {
        path: PathBuf,
        #[source]
        source: serde_pickle::Error,
    },
}

/// Pickled [`RegressionModel`] at a fixed path.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    path: PathBuf,
}

impl ArtifactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip_all, fields(path = ?self.path))]
    pub fn load(&self) -> Result<RegressionModel, LoadError> {
        let buffer = fs::read(&self.path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => LoadError::NotFound(self.path.clone()),
            _ => LoadError::Io {
                path: self.path.clone(),
                source,
            },
        })?;
        serde_pickle::from_slice(&buffer, Default::default()).map_err(|source| {
            LoadError::Deserialize {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Overwrites the artifact. Readers never observe a partially written file.
    #[instrument(skip_all, fields(path = ?self.path))]
    pub fn save(&self, model: &RegressionModel) -> Result {
        let buffer = serde_pickle::to_vec(model, Default::default())
            .context("failed to serialize the model")?;
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create `{}`", parent.display()))?;
        }
        let temporary_path = self.path.with_extension("tmp");
        fs::write(&temporary_path, buffer)
            .with_context(|| format!("failed to write `{}`", temporary_path.display()))?;
        fs::rename(&temporary_path, &self.path)
            .with_context(|| format!("failed to move the artifact to `{}`", self.path.display()))?;
        debug!("saved");
        Ok(())
    }
}
