//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then builds requests with the
//! client and sends them over real HTTP through the default ureq transport.
//! Confirms that resolved URLs, the User-Agent header and the credential
//! parameters reach the server intact.

use std::net::SocketAddr;

use geoclient_core::{Client, Config, Endpoint, Format, DEFAULT_USER_AGENT};

fn start_mock_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn config_for(addr: SocketAddr) -> Config {
    // No trailing slash: the client adds it.
    Config::new()
        .with_base_url(format!("http://{addr}/geoclient/v1"))
        .with_app_id("test-id")
        .with_app_key("test-key")
}

#[test]
fn geoclient_round_trip() {
    let addr = start_mock_server();
    let client = Client::new(config_for(addr)).unwrap();

    // Step 1: address lookup with credentials appended.
    let resp = client
        .get(
            Endpoint::Address,
            &[("houseNumber", "314"), ("street", "west 100 st"), ("borough", "manhattan")],
        )
        .unwrap();
    assert_eq!(resp.status, 200);
    let body: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
    let echo = &body["address"];
    assert_eq!(echo["userAgent"], DEFAULT_USER_AGENT);
    assert_eq!(echo["query"]["street"], "west 100 st");
    assert_eq!(echo["query"]["app_id"], "test-id");
    assert_eq!(echo["query"]["app_key"], "test-key");

    // Step 2: a path with a leading slash lands on the same resource.
    let req = client
        .new_request("GET", "/search.json?input=empire+state+building&app_id=a&app_key=b")
        .unwrap();
    assert_eq!(req.url.path(), "/geoclient/v1/search.json");
    let resp = client.send(&req).unwrap();
    assert_eq!(resp.status, 200);
    let body: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(body["search"]["query"]["input"], "empire state building");

    // Step 3: without credentials the server answers 401, returned as data.
    let req = client.new_request("GET", "bin.json?bin=1079043").unwrap();
    let resp = client.send(&req).unwrap();
    assert_eq!(resp.status, 401);

    // Step 4: an unknown resource is a 404, also returned as data.
    let req = client.new_request("GET", "weather.json").unwrap();
    let resp = client.send(&req).unwrap();
    assert_eq!(resp.status, 404);
}

#[test]
fn xml_format_and_custom_user_agent_reach_server() {
    let addr = start_mock_server();
    let client = Client::new(
        config_for(addr)
            .with_format(Format::Xml)
            .with_user_agent("dumb-1.0"),
    )
    .unwrap();

    let resp = client.get(Endpoint::Bin, &[("bin", "1079043")]).unwrap();
    assert_eq!(resp.status, 200);
    assert!(resp.body.starts_with("<geosupportResponse><bin>"));
    assert!(resp.body.contains("<userAgent>dumb-1.0</userAgent>"));
    assert!(resp
        .headers
        .iter()
        .any(|(k, v)| k.eq_ignore_ascii_case("content-type") && v == "application/xml"));
}

#[test]
fn unreachable_server_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = Client::new(config_for(addr)).unwrap();

    let err = client.get(Endpoint::Place, &[("name", "empire state building")]).unwrap_err();
    assert!(matches!(err, geoclient_core::GeoclientError::Transport(_)));
}
