use poem::web::{Data, Json};
use poem::{handler, IntoResponse};
use serde::Serialize;

use crate::prelude::*;
use crate::service::PredictionService;

pub const WELCOME_MESSAGE: &str = "Welcome to the House Price Prediction API";

#[derive(Serialize)]
struct Message {
    message: &'static str,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

#[handler]
#[instrument(skip_all, level = "debug")]
pub async fn get_root() -> impl IntoResponse {
    Json(Message {
        message: WELCOME_MESSAGE,
    })
}

/// Liveness only, answers regardless of whether the model is loaded.
#[handler]
#[instrument(skip_all, level = "debug")]
pub async fn get_health(Data(service): Data<&PredictionService>) -> impl IntoResponse {
    Json(Health {
        status: service.health_check(),
    })
}

#[cfg(test)]
mod tests {
    use poem::http::StatusCode;
    use serde_json::json;

    use crate::model::RegressionModel;
    use crate::prelude::*;
    use crate::service::PredictionService;
    use crate::web::test::create_test_client;

    #[tokio::test]
    async fn get_root_ok() -> Result {
        let client = create_test_client(PredictionService::default());
        let response = client.get("/").send().await;
        response.assert_status_is_ok();
        response
            .assert_json(json!({"message": "Welcome to the House Price Prediction API"}))
            .await;
        Ok(())
    }

    #[tokio::test]
    async fn get_health_without_model_ok() -> Result {
        let client = create_test_client(PredictionService::default());
        let response = client.get("/health").send().await;
        response.assert_status_is_ok();
        response.assert_json(json!({"status": "ok"})).await;
        Ok(())
    }

    #[tokio::test]
    async fn get_health_with_model_ok() -> Result {
        let service = PredictionService::from_model(RegressionModel::new([1.0, 2.0, 3.0], 4.0));
        let response = create_test_client(service).get("/health").send().await;
        response.assert_status_is_ok();
        response.assert_json(json!({"status": "ok"})).await;
        Ok(())
    }

    #[tokio::test]
    async fn unknown_path_not_found() -> Result {
        let response = create_test_client(PredictionService::default())
            .get("/unknown")
            .send()
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        Ok(())
    }
}
