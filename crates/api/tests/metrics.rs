//! Prometheus exposition with a live recorder.
//!
//! Kept in its own test binary: the recorder is process-global.

use api::{create_router, AppState};
use data_validator::StandardScaler;
use inference_engine::{LogisticRegression, ModelArtifacts, ModelMetadata};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_metrics_report_request_counters() {
    let handle = PrometheusBuilder::new().install_recorder().unwrap();
    let artifacts = ModelArtifacts {
        classifier: LogisticRegression::from_weights(vec![1.0; 30], 0.0),
        scaler: StandardScaler::from_params(vec![0.0; 30], vec![1.0; 30]).unwrap(),
        metadata: ModelMetadata::default(),
    };
    let state = AppState::from_artifacts(artifacts).with_metrics(handle);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let app = create_router(Arc::new(state));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let health = client.get(format!("{}/", base)).send().await.unwrap();
    assert_eq!(health.status().as_u16(), 200);

    let prediction = client
        .post(format!("{}/predict", base))
        .json(&json!({ "features": vec![1.0; 30] }))
        .send()
        .await
        .unwrap();
    assert_eq!(prediction.status().as_u16(), 200);

    let rejected = client
        .post(format!("{}/predict", base))
        .json(&json!({ "features": [1, 2, 3] }))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status().as_u16(), 400);

    let response = client.get(format!("{}/metrics", base)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let text = response.text().await.unwrap();

    assert!(text.contains("diagnosis_health_checks_total"), "{}", text);
    assert!(text.contains("diagnosis_predictions_total{diagnosis=\"Maligno\"} 1"), "{}", text);
    assert!(text.contains("diagnosis_prediction_errors_total{kind=\"semantic\"} 1"), "{}", text);
}
