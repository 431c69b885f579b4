use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;

pub const ENDPOINTS: [&str; 8] = [
    "address",
    "addresspoint",
    "bbl",
    "bin",
    "blockface",
    "intersection",
    "place",
    "search",
];

/// What the server saw, echoed back under the endpoint name.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Echo {
    pub endpoint: String,
    pub format: String,
    pub user_agent: Option<String>,
    pub query: HashMap<String, String>,
}

pub fn app() -> Router {
    Router::new().route("/geoclient/v1/{resource}", get(geoclient))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn geoclient(
    Path(resource): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let Some((endpoint, format)) = resource.rsplit_once('.') else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if !ENDPOINTS.contains(&endpoint) || !matches!(format, "json" | "xml") {
        return StatusCode::NOT_FOUND.into_response();
    }

    let has_credentials = ["app_id", "app_key"]
        .iter()
        .all(|key| query.get(*key).is_some_and(|v| !v.is_empty()));
    if !has_credentials {
        return (
            StatusCode::UNAUTHORIZED,
            "Authentication parameters missing",
        )
            .into_response();
    }

    let echo = Echo {
        endpoint: endpoint.to_string(),
        format: format.to_string(),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        query,
    };

    if format == "xml" {
        ([(header::CONTENT_TYPE, "application/xml")], to_xml(&echo)).into_response()
    } else {
        let mut body = serde_json::Map::new();
        let value = serde_json::to_value(&echo).unwrap_or_default();
        body.insert(echo.endpoint, value);
        Json(serde_json::Value::Object(body)).into_response()
    }
}

fn to_xml(echo: &Echo) -> String {
    let mut keys: Vec<_> = echo.query.keys().collect();
    keys.sort();
    let params: String = keys
        .into_iter()
        .map(|k| format!("<param name=\"{}\">{}</param>", escape(k), escape(&echo.query[k])))
        .collect();
    format!(
        "<geosupportResponse><{0}><userAgent>{1}</userAgent>{2}</{0}></geosupportResponse>",
        echo.endpoint,
        escape(echo.user_agent.as_deref().unwrap_or_default()),
        params
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo() -> Echo {
        Echo {
            endpoint: "bin".to_string(),
            format: "xml".to_string(),
            user_agent: Some("ua/1".to_string()),
            query: HashMap::from([
                ("bin".to_string(), "1079043".to_string()),
                ("app_id".to_string(), "id".to_string()),
            ]),
        }
    }

    #[test]
    fn echo_serializes_camel_case() {
        let json = serde_json::to_value(echo()).unwrap();
        assert_eq!(json["endpoint"], "bin");
        assert_eq!(json["userAgent"], "ua/1");
        assert_eq!(json["query"]["bin"], "1079043");
    }

    #[test]
    fn xml_lists_params_sorted() {
        let xml = to_xml(&echo());
        assert_eq!(
            xml,
            "<geosupportResponse><bin><userAgent>ua/1</userAgent>\
             <param name=\"app_id\">id</param><param name=\"bin\">1079043</param>\
             </bin></geosupportResponse>"
        );
    }

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape("a<b & \"c\">"), "a&lt;b &amp; &quot;c&quot;&gt;");
    }
}
