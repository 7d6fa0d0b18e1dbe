#![allow(clippy::unwrap_used, missing_docs)]

mod common;

use std::collections::BTreeMap;

use analytics_engine::AnalyticsEngineError;
use analytics_engine::models::{
    ApplicationDetails, ApplicationRequest, ApplicationState, InstanceState,
    ListApplicationsParams, ResizeRequest, WhitelistAction, WhitelistRequest,
};
use common::{INSTANCE_ID, MockHttpClient, client, page};
use http::{Method, StatusCode};
use serde_json::{Value, json};

fn sent_body(mock: &MockHttpClient, index: usize) -> Value {
    let request = &mock.requests()[index];
    serde_json::from_slice(request.body.as_ref().unwrap()).unwrap()
}

#[tokio::test]
async fn create_application_posts_details() {
    let mock = MockHttpClient::new();
    mock.push_json(202, &json!({ "id": "app-1", "state": "accepted" }));
    let client = client(&mock);

    let req = ApplicationRequest {
        application_details: ApplicationDetails {
            application: Some("/opt/ibm/spark/examples/src/main/python/wordcount.py".to_owned()),
            arguments: vec!["/opt/ibm/spark/examples/src/main/resources/people.txt".to_owned()],
            conf: BTreeMap::from([("spark.executor.cores".to_owned(), "2".to_owned())]),
            ..Default::default()
        },
    };
    let response = client.applications(INSTANCE_ID).create(&req).await.unwrap();

    assert_eq!(response.id, "app-1");
    assert_eq!(response.state, ApplicationState::Accepted);

    let request = &mock.requests()[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.headers[http::header::CONTENT_TYPE], "application/json");
    assert_eq!(
        sent_body(&mock, 0),
        json!({
            "application_details": {
                "application": "/opt/ibm/spark/examples/src/main/python/wordcount.py",
                "arguments": ["/opt/ibm/spark/examples/src/main/resources/people.txt"],
                "conf": { "spark.executor.cores": "2" }
            }
        })
    );
}

#[tokio::test]
async fn single_page_list_passes_start_through() {
    let mock = MockHttpClient::new();
    mock.push_json(200, &page(&["a1"], Some("c2")));
    let client = client(&mock);

    let params = ListApplicationsParams {
        start: Some("c1".to_owned()),
        ..Default::default()
    };
    let collection = client.applications(INSTANCE_ID).list(&params).await.unwrap();

    assert_eq!(collection.applications.len(), 1);
    assert_eq!(collection.next.unwrap().start.as_deref(), Some("c2"));
    assert_eq!(mock.requests()[0].query_param("start").as_deref(), Some("c1"));
}

#[tokio::test]
async fn application_state_and_delete() {
    let mock = MockHttpClient::new();
    mock.push_json(200, &json!({ "id": "app-1", "state": "running", "start_time": "2024-01-01T00:00:00Z" }));
    mock.push_empty(204);
    let client = client(&mock);
    let applications = client.applications(INSTANCE_ID);

    let state = applications.get_state("app-1").await.unwrap();
    assert_eq!(state.state, Some(ApplicationState::Running));
    applications.delete("app-1").await.unwrap();

    let requests = mock.requests();
    assert_eq!(
        requests[0].url.path(),
        format!("/v3/analytics_engines/{INSTANCE_ID}/spark_applications/app-1/state")
    );
    assert_eq!(requests[1].method, Method::DELETE);
    assert!(requests[1].body.is_none());
}

#[tokio::test]
async fn missing_application_reports_service_message() {
    let mock = MockHttpClient::new();
    mock.push_json(
        404,
        &json!({
            "errors": [{ "code": "not_found", "message": "Application not found" }],
            "trace": "7b1b7a9b"
        }),
    );
    let client = client(&mock);

    let err = client.applications(INSTANCE_ID).get("nope").await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.api_message().as_deref(), Some("Application not found"));
}

#[tokio::test]
async fn undecodable_success_body_is_a_decode_error() {
    let mock = MockHttpClient::new();
    mock.push_text(200, "<html>maintenance</html>");
    let client = client(&mock);

    let err = client.instance(INSTANCE_ID).get().await.unwrap_err();
    assert!(matches!(err, AnalyticsEngineError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn instance_state_decodes_unknown_states() {
    let mock = MockHttpClient::new();
    mock.push_json(200, &json!({ "id": INSTANCE_ID, "state": "active" }));
    mock.push_json(200, &json!({ "id": INSTANCE_ID, "state": "migrating" }));
    let client = client(&mock);
    let instance = client.instance(INSTANCE_ID);

    assert_eq!(instance.get_state().await.unwrap().state, InstanceState::Active);
    assert_eq!(instance.get_state().await.unwrap().state, InstanceState::Unknown);
}

#[tokio::test]
async fn update_default_configs_sends_null_for_removals() {
    let mock = MockHttpClient::new();
    mock.push_json(200, &json!({ "spark.driver.memory": "4G" }));
    let client = client(&mock);

    let changes = BTreeMap::from([
        ("spark.driver.memory".to_owned(), Some("4G".to_owned())),
        ("spark.executor.memory".to_owned(), None),
    ]);
    let updated = client
        .instance(INSTANCE_ID)
        .update_default_configs(&changes)
        .await
        .unwrap();

    assert_eq!(updated.get("spark.driver.memory").map(String::as_str), Some("4G"));
    let request = &mock.requests()[0];
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(
        request.headers[http::header::CONTENT_TYPE],
        "application/merge-patch+json"
    );
    assert_eq!(
        request.headers[http::header::ACCEPT],
        "application/json",
        "the response is still plain JSON"
    );
    assert_eq!(
        sent_body(&mock, 0),
        json!({ "spark.driver.memory": "4G", "spark.executor.memory": null })
    );
}

#[tokio::test]
async fn cluster_operations_target_v2_paths() {
    let mock = MockHttpClient::new();
    mock.push_json(200, &json!({ "request_id": "r-1" }));
    mock.push_json(
        200,
        &json!({ "private_endpoint_whitelist": ["10.0.0.0/8"] }),
    );
    let client = client(&mock);
    let cluster = client.cluster("guid/1");

    let resized = cluster
        .resize(&ResizeRequest {
            compute_nodes_count: 4,
        })
        .await
        .unwrap();
    assert_eq!(resized.request_id.as_deref(), Some("r-1"));

    let whitelist = cluster
        .update_private_endpoint_whitelist(&WhitelistRequest {
            ip_ranges: vec!["10.0.0.0/8".to_owned()],
            action: WhitelistAction::Add,
        })
        .await
        .unwrap();
    assert_eq!(whitelist.private_endpoint_whitelist, vec!["10.0.0.0/8"]);

    let requests = mock.requests();
    assert_eq!(requests[0].url.path(), "/v2/analytics_engines/guid%2F1/resize");
    assert_eq!(sent_body(&mock, 0), json!({ "compute_nodes_count": 4 }));
    assert_eq!(sent_body(&mock, 1)["action"], "add");
}
