use discosweb_api::types::ObjectClass;
use discosweb_api::{Client, Error, LaunchQuery, ObjectQuery, StageQuery};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn client(server: &MockServer) -> Client {
    Client::with_base_url(&server.uri(), "test-token").unwrap()
}

#[tokio::test]
async fn get_launches_sends_auth_and_filter() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("launches.json");

    Mock::given(method("GET"))
        .and(path("/api/launches"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("DiscosWeb-Api-Version", "2"))
        .and(query_param(
            "filter",
            "ge(epoch,epoch:'2022-01-01')&lt(epoch,epoch:'2023-01-01')",
        ))
        .and(query_param("sort", "epoch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resp = client(&mock_server)
        .get_launches(&LaunchQuery::default().with_year(2022))
        .await
        .unwrap();
    assert_eq!(resp.data.len(), 2);
    assert_eq!(resp.data[0].id, "6201");
}

#[tokio::test]
async fn rate_limited_response_carries_reset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/launches"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("X-RateLimit-Remaining", "0")
                .insert_header("X-RateLimit-Reset", "1700000060")
                .set_body_string("Too Many Attempts."),
        )
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .get_launches(&LaunchQuery::default())
        .await
        .unwrap_err();
    assert!(err.is_throttled());
    let state = err.rate_limit().unwrap();
    assert_eq!(state.remaining, Some(0));
    assert_eq!(state.reset, Some(1_700_000_060));
}

#[tokio::test]
async fn malformed_filter_is_client_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/launches/6201/objects"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"errors":[]}"#))
        .mount(&mock_server)
        .await;

    let query = ObjectQuery::default().with_object_class(&ObjectClass::Payload);
    let err = client(&mock_server)
        .get_launch_objects("6201", &query)
        .await
        .unwrap_err();
    assert!(err.is_client_error());
    assert!(matches!(err, Error::HttpStatus { status: 400, .. }));
}

#[tokio::test]
async fn get_launch_objects_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/launches/6201/objects"))
        .and(query_param("filter", "eq(objectClass,'Payload')"))
        .and(query_param("sort", "id"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("objects.json")))
        .mount(&mock_server)
        .await;

    let query = ObjectQuery::default().with_object_class(&ObjectClass::Payload);
    let resp = client(&mock_server)
        .get_launch_objects("6201", &query)
        .await
        .unwrap();
    assert_eq!(resp.data.len(), 2);
}

#[tokio::test]
async fn get_launch_vehicle_and_stages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/launches/6201/vehicle"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("vehicle.json")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/launch-vehicles/312/stages"))
        .and(query_param("sort", "id"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("stages.json")))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let vehicle = client.get_launch_vehicle("6201").await.unwrap().data.unwrap();
    assert_eq!(vehicle.id, "312");
    let stages = client
        .get_vehicle_stages(&vehicle.id, &StageQuery::default())
        .await
        .unwrap();
    assert_eq!(stages.data.len(), 2);
}

#[tokio::test]
async fn get_launch_vehicle_missing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/launches/6205/vehicle"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("vehicle_null.json")),
        )
        .mount(&mock_server)
        .await;

    let resp = client(&mock_server).get_launch_vehicle("6205").await.unwrap();
    assert!(resp.data.is_none());
}

#[tokio::test]
async fn malformed_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/launches"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .get_launches(&LaunchQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ParseFailed(_)));
}

#[test]
fn debug_output_redacts_token() {
    let client = Client::with_base_url("http://localhost", "super-secret").unwrap();
    let debug = format!("{:?}", client);
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("<redacted>"));
}
