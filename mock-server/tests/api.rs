use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::USER_AGENT, "geoclient-rs/test")
        .body(String::new())
        .unwrap()
}

// --- success ---

#[tokio::test]
async fn address_json_echoes_query_and_user_agent() {
    let resp = app()
        .oneshot(get(
            "/geoclient/v1/address.json?houseNumber=314&street=west+100+st&borough=manhattan&app_id=id&app_key=key",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let echo = &body["address"];
    assert_eq!(echo["endpoint"], "address");
    assert_eq!(echo["format"], "json");
    assert_eq!(echo["userAgent"], "geoclient-rs/test");
    assert_eq!(echo["query"]["street"], "west 100 st");
    assert_eq!(echo["query"]["app_id"], "id");
}

#[tokio::test]
async fn xml_format_returns_xml() {
    let resp = app()
        .oneshot(get("/geoclient/v1/bbl.xml?borough=manhattan&block=1889&lot=1&app_id=id&app_key=key"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(http::header::CONTENT_TYPE).unwrap(),
        "application/xml"
    );
    let body = body_bytes(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.starts_with("<geosupportResponse><bbl>"));
    assert!(text.contains("<param name=\"block\">1889</param>"));
}

// --- credentials ---

#[tokio::test]
async fn missing_credentials_returns_401() {
    let resp = app()
        .oneshot(get("/geoclient/v1/search.json?input=empire+state+building"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn empty_app_key_returns_401() {
    let resp = app()
        .oneshot(get("/geoclient/v1/search.json?input=x&app_id=id&app_key="))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- routing ---

#[tokio::test]
async fn unknown_endpoint_returns_404() {
    let resp = app()
        .oneshot(get("/geoclient/v1/weather.json?app_id=id&app_key=key"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_format_returns_404() {
    let resp = app()
        .oneshot(get("/geoclient/v1/address.csv?app_id=id&app_key=key"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn resource_without_extension_returns_404() {
    let resp = app()
        .oneshot(get("/geoclient/v1/address?app_id=id&app_key=key"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn path_outside_base_returns_404() {
    let resp = app().oneshot(get("/foo")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- every endpoint ---

#[tokio::test]
async fn every_endpoint_answers() {
    use tower::Service;

    let mut app = app().into_service();

    for endpoint in mock_server::ENDPOINTS {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(get(&format!("/geoclient/v1/{endpoint}.json?app_id=id&app_key=key")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{endpoint}");
        let body = body_json(resp).await;
        assert_eq!(body[endpoint]["endpoint"], endpoint);
    }
}
