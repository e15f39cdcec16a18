//! Prediction service: the loaded model and the inference over it.

use crate::artifact::ArtifactStore;
use crate::math::dot;
use crate::model::{HouseFeatures, RegressionModel, N_FEATURES};
use crate::prelude::*;

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("model is not loaded")]
    ModelUnavailable,

    #[error("{0}")]
    Inference(String),
}

/// Holds the model loaded at startup, if any.
///
/// Never written after construction, so it is shared between handlers without locking.
#[derive(Debug, Clone, Default)]
pub struct PredictionService {
    model: Option<Arc<RegressionModel>>,
}

impl PredictionService {
    /// Loads the model from the store. A missing or broken artifact leaves the service
    /// without a model: it still starts, and predictions report the model unavailable.
    pub fn initialize(store: &ArtifactStore) -> Self {
        match store.load() {
            Ok(model) => {
                info!(
                    path = ?store.path(),
                    coefficients = ?model.coefficients,
                    intercept = model.intercept,
                    "model loaded",
                );
                Self::from_model(model)
            }
            Err(error) => {
                warn!(path = ?store.path(), "{:#}", anyhow::Error::from(error));
                Self::default()
            }
        }
    }

    pub fn from_model(model: RegressionModel) -> Self {
        Self {
            model: Some(Arc::new(model)),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn predict(&self, features: &HouseFeatures) -> Result<f64, PredictError> {
        let model = self.model.as_ref().ok_or(PredictError::ModelUnavailable)?;
        if model.coefficients.len() != N_FEATURES {
            return Err(PredictError::Inference(format!(
                "model has {} coefficients, expected {}",
                model.coefficients.len(),
                N_FEATURES,
            )));
        }
        let prediction = model.intercept + dot(&model.coefficients, &features.to_vector());
        if prediction.is_finite() {
            Ok(prediction)
        } else {
            Err(PredictError::Inference(format!("prediction is not finite: {}", prediction)))
        }
    }

    pub fn health_check(&self) -> &'static str {
        "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_model() -> PredictionService {
        PredictionService::from_model(RegressionModel::new([100.0, 5000.0, -200.0], 10000.0))
    }

    #[test]
    fn predict_reference_scenario_ok() -> Result {
        // 10000 + 100 * 100 + 5000 * 2 - 200 * 10
        let features = HouseFeatures {
            area: 100.0,
            bedrooms: 2,
            age: 10.0,
        };
        assert!((reference_model().predict(&features)? - 28000.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn predict_is_affine_ok() -> Result {
        let service = reference_model();
        for (area, bedrooms, age) in [(0.0, 0, 0.0), (55.5, 1, 3.25), (1e4, 12, 150.0)] {
            let features = HouseFeatures { area, bedrooms, age };
            let expected = 10000.0 + 100.0 * area + 5000.0 * f64::from(bedrooms) - 200.0 * age;
            let prediction = service.predict(&features)?;
            assert!((prediction - expected).abs() < 1e-6);
            assert_eq!(prediction.to_bits(), service.predict(&features)?.to_bits());
        }
        Ok(())
    }

    #[test]
    fn predict_without_model_unavailable() {
        let service = PredictionService::default();
        for bedrooms in [0, 3, 100] {
            let features = HouseFeatures {
                area: 10.0,
                bedrooms,
                age: 1.0,
            };
            assert!(matches!(service.predict(&features), Err(PredictError::ModelUnavailable)));
        }
    }

    #[test]
    fn predict_malformed_model_inference_error() {
        let service = PredictionService::from_model(RegressionModel {
            coefficients: vec![1.0, 2.0],
            intercept: 0.0,
        });
        let features = HouseFeatures {
            area: 1.0,
            bedrooms: 1,
            age: 1.0,
        };
        match service.predict(&features) {
            Err(PredictError::Inference(message)) => assert!(message.contains("2 coefficients")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn predict_overflow_inference_error() {
        let service = PredictionService::from_model(RegressionModel::new([f64::MAX, 0.0, 0.0], 0.0));
        let features = HouseFeatures {
            area: 10.0,
            bedrooms: 0,
            age: 0.0,
        };
        assert!(matches!(service.predict(&features), Err(PredictError::Inference(_))));
    }

    #[test]
    fn health_check_ignores_model_ok() {
        assert_eq!(PredictionService::default().health_check(), "ok");
        assert_eq!(reference_model().health_check(), "ok");
    }

    #[test]
    fn initialize_missing_artifact_empty() -> Result {
        let directory = tempfile::tempdir()?;
        let service = PredictionService::initialize(&ArtifactStore::new(directory.path().join("x.pkl")));
        assert!(!service.is_loaded());
        Ok(())
    }

    #[test]
    fn initialize_corrupt_artifact_empty() -> Result {
        let directory = tempfile::tempdir()?;
        let path = directory.path().join("model.pkl");
        std::fs::write(&path, b"\x80\x04garbage")?;
        let service = PredictionService::initialize(&ArtifactStore::new(path));
        assert!(!service.is_loaded());
        let features = HouseFeatures {
            area: 100.0,
            bedrooms: 2,
            age: 10.0,
        };
        assert!(matches!(service.predict(&features), Err(PredictError::ModelUnavailable)));
        Ok(())
    }

    #[test]
    fn initialize_saved_artifact_loaded() -> Result {
        let directory = tempfile::tempdir()?;
        let store = ArtifactStore::new(directory.path().join("model.pkl"));
        store.save(&RegressionModel::new([1.0, 1.0, 1.0], 0.0))?;
        assert!(PredictionService::initialize(&store).is_loaded());
        Ok(())
    }
}
