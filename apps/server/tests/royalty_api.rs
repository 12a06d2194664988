use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use kdphub_market_data::{ExchangeRateProvider, LatestRates, MarketDataError};
use kdphub_server::{api::app_router, build_state, build_state_with_provider, config::Config};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;

struct StubRates {
    fail: bool,
}

#[async_trait]
impl ExchangeRateProvider for StubRates {
    fn id(&self) -> &'static str {
        "STUB"
    }

    async fn latest_rates(&self, base: &str) -> Result<LatestRates, MarketDataError> {
        if self.fail {
            return Err(MarketDataError::Timeout {
                provider: "STUB".to_string(),
            });
        }
        Ok(LatestRates::new(base, "STUB".into())
            .with_rate("GBP", dec!(0.80))
            .with_rate("EUR", dec!(0.92)))
    }
}

fn app(fail: bool) -> Router {
    let state = build_state_with_provider(Arc::new(StubRates { fail }));
    app_router(state, &Config::default())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

fn calculate(body: Value) -> Request<Body> {
    Request::post("/api/v1/royalty/calculate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn paperback(list_price: Value) -> Value {
    json!({
        "bookType": "paperback",
        "interiorType": "black_white",
        "marketplace": "Amazon.com",
        "trimSize": "6x9",
        "pageCount": 120,
        "listPrice": list_price,
    })
}

#[test]
fn default_config_builds_state() {
    assert!(build_state(&Config::default()).is_ok());
}

#[tokio::test]
async fn healthz_responds_ok() {
    let (status, body) = send(
        app(false),
        Request::get("/api/v1/healthz").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, body) = send(
        app(false),
        Request::get("/api/v1/nope").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn options_list_every_choice() {
    let (status, body) = send(
        app(false),
        Request::get("/api/v1/royalty/options")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookTypes"].as_array().unwrap().len(), 2);
    assert_eq!(body["interiorTypes"].as_array().unwrap().len(), 3);
    assert_eq!(body["marketplaces"].as_array().unwrap().len(), 12);
    assert_eq!(body["trimSizes"].as_array().unwrap().len(), 16);
    assert_eq!(body["minPageCount"], 1);
    assert_eq!(body["maxPageCount"], 8000);
}

#[tokio::test]
async fn accepted_calculation_returns_report() {
    let (status, body) = send(app(false), calculate(paperback(json!("9.99")))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["baseCurrency"], "USD");
    assert_eq!(body["bookType"], "Paperback");

    let results = body["marketplaceResults"].as_array().unwrap();
    assert_eq!(results.len(), 12);
    assert_eq!(results[0]["marketplace"], "Amazon.com");
    assert_eq!(results[0]["royaltyRate"], "60%");
    assert_eq!(results[0]["estimatedRoyalty"], "$ 3.94");
    assert_eq!(results[0]["minPrice"], "$ 3.42");
    assert_eq!(results[1]["marketplace"], "Amazon.co.uk");
    assert_eq!(results[1]["listPriceFormatted"], "£ 7.99");
    assert!(body.get("warnings").is_none());
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn price_below_minimum_is_unprocessable() {
    let (status, body) = send(app(false), calculate(paperback(json!(3)))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({
            "error": "The list price for Amazon.com must be at least 4.10 USD to cover printing costs."
        })
    );
}

#[tokio::test]
async fn invalid_field_is_bad_request() {
    let mut request = paperback(json!("9.99"));
    request["pageCount"] = json!(9000);
    let (status, body) = send(app(false), calculate(request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Invalid input values"), "{message}");
}

#[tokio::test]
async fn missing_field_is_bad_request() {
    let mut request = paperback(json!("9.99"));
    request.as_object_mut().unwrap().remove("bookType");
    let (status, body) = send(app(false), calculate(request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid input values"));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let request = Request::post("/api/v1/royalty/calculate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"bookType\": "))
        .unwrap();
    let (status, body) = send(app(false), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid input values"));
}

#[tokio::test]
async fn rate_outage_still_reports_with_warning() {
    let (status, body) = send(app(true), calculate(paperback(json!("9.99")))).await;
    assert_eq!(status, StatusCode::OK);

    let warnings = body["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);

    let results = body["marketplaceResults"].as_array().unwrap();
    assert_eq!(results[0]["estimatedRoyalty"], "$ 3.94");
    assert_eq!(results[0]["rateAvailable"], true);
    let uk = &results[1];
    assert_eq!(uk["rateAvailable"], false);
    assert_eq!(uk["listPriceFormatted"], "£ 9.99");
}
