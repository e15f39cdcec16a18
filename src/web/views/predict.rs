use poem::http::StatusCode;
use poem::web::{Data, Json};
use poem::{handler, IntoResponse, Response};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::model::HouseFeatures;
use crate::prelude::*;
use crate::service::{PredictError, PredictionService};
use crate::web::responses::detail;

pub const MODEL_UNAVAILABLE: &str = "Model is not loaded or available. Please train the model first.";

/// Only a JSON object is accepted: type errors, missing fields and arrays
/// are rejected by the `Json` extractor.
#[derive(Deserialize, Debug)]
#[serde(try_from = "Map<String, Value>")]
pub struct PredictRequest {
    pub area: f64,
    pub bedrooms: u32,
    pub age: f64,
}

#[derive(Deserialize)]
struct PredictFields {
    area: f64,
    #[serde(deserialize_with = "deserialize_count")]
    bedrooms: u32,
    age: f64,
}

impl TryFrom<Map<String, Value>> for PredictRequest {
    type Error = serde_json::Error;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: PredictFields = serde_json::from_value(Value::Object(object))?;
        Ok(Self {
            area: fields.area,
            bedrooms: fields.bedrooms,
            age: fields.age,
        })
    }
}

/// Accepts `2` as well as `2.0`, but not `2.5`.
fn deserialize_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Ok(value as u32)
    } else {
        Err(D::Error::custom(format!("expected a non-negative integer, got {}", value)))
    }
}

#[derive(Serialize)]
pub struct PredictResponse {
    pub predicted_price: f64,
}

#[handler]
#[instrument(level = "info", skip_all)]
pub async fn post_predict(
    Json(request): Json<PredictRequest>,
    Data(service): Data<&PredictionService>,
) -> Response {
    debug!(?request);
    let features = match HouseFeatures::new(request.area, request.bedrooms, request.age) {
        Ok(features) => features,
        Err(error) => {
            info!("{:#}", error);
            return detail(StatusCode::UNPROCESSABLE_ENTITY, error.to_string());
        }
    };
    match service.predict(&features) {
        Ok(predicted_price) => {
            info!(predicted_price);
            Json(PredictResponse { predicted_price }).into_response()
        }
        Err(PredictError::ModelUnavailable) => {
            warn!("prediction requested without a model");
            detail(StatusCode::SERVICE_UNAVAILABLE, MODEL_UNAVAILABLE)
        }
        Err(PredictError::Inference(message)) => {
            error!(detail = %message, "prediction failed");
            detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred during prediction: {}", message),
            )
        }
    }
}
