use poem::test::TestClient;
use poem::Endpoint;

use crate::service::PredictionService;
use crate::web::create_app;

pub fn create_test_client(service: PredictionService) -> TestClient<impl Endpoint> {
    TestClient::new(create_app(service))
}
