use tokio::net::TcpListener;

/// Serves a stand-in Geoclient API at `http://127.0.0.1:$PORT/geoclient/v1/`.
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("geoclient mock listening on http://{addr}/geoclient/v1/");
    mock_server::run(listener).await
}
