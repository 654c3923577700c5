//! Canned Yahoo Finance payloads and wiremock helpers.
#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Session crumb served by [`mount_crumb`]; the slash checks query encoding.
pub const CRUMB: &str = "abc/123";

/// 2024-01-01T00:00:00Z
pub const FIRST_SESSION: i64 = 1_704_067_200;
const DAY: i64 = 86_400;

/// Chart payload with one session per close, `None` for a non-trading row.
pub fn chart_body(closes: &[Option<f64>]) -> Value {
    let timestamps: Vec<i64> = (0..closes.len() as i64)
        .map(|i| FIRST_SESSION + i * DAY)
        .collect();
    json!({
        "chart": {
            "result": [{
                "meta": {"currency": "INR"},
                "timestamp": timestamps,
                "indicators": {"quote": [{"close": closes}]}
            }],
            "error": null
        }
    })
}

pub fn summary_body(price: f64, eps: Option<f64>, book_value: Option<f64>) -> Value {
    let raw = |v: Option<f64>| match v {
        Some(v) => json!({"raw": v, "fmt": format!("{v:.2}")}),
        None => json!({}),
    };
    json!({
        "quoteSummary": {
            "result": [{
                "price": {"regularMarketPrice": raw(Some(price))},
                "summaryDetail": {"trailingPE": raw(eps.map(|e| price / e))},
                "defaultKeyStatistics": {
                    "trailingEps": raw(eps),
                    "bookValue": raw(book_value),
                    "priceToBook": raw(book_value.map(|b| price / b))
                }
            }],
            "error": null
        }
    })
}

pub async fn mount_chart(server: &MockServer, symbol: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v8/finance/chart/{symbol}")))
        .and(query_param("range", "3mo"))
        .and(query_param("interval", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_summary(server: &MockServer, symbol: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v10/finance/quoteSummary/{symbol}")))
        .and(query_param(
            "modules",
            "price,summaryDetail,defaultKeyStatistics",
        ))
        .and(query_param("crumb", CRUMB))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_crumb(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/test/getcrumb"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CRUMB))
        .mount(server)
        .await;
}
