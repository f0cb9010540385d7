// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Integration tests for the LedgerX HTTP client using a mock Axum server.

use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
};
use ledgerx::{
    LedgerXConfig, LedgerXHttpClient,
    common::enums::LedgerXOrderType,
    http::{
        error::LedgerXHttpError,
        models::{CancelAndReplaceRequest, CreateOrderRequest},
    },
};
use serde_json::{Value, json};

// ------------------------------------------------------------------------------------------------
// Test Server State
// ------------------------------------------------------------------------------------------------

#[derive(Clone, Default)]
struct TestServerState {
    /// Authorization header values observed per request.
    auth_headers: Arc<tokio::sync::Mutex<Vec<Option<String>>>>,
    /// Raw query string of the last request.
    last_query: Arc<tokio::sync::Mutex<Option<String>>>,
    /// Body of the last order submission.
    last_order_body: Arc<tokio::sync::Mutex<Option<Value>>>,
    /// Order ids seen on cancel and cancel/replace requests.
    order_mids: Arc<tokio::sync::Mutex<Vec<String>>>,
    /// When set, order endpoints respond with a trading rejection.
    reject_orders: Arc<AtomicBool>,
    /// When set, all endpoints respond with the invalid token error body.
    invalid_token: Arc<AtomicBool>,
}

impl TestServerState {
    async fn record(&self, headers: &HeaderMap, query: Option<String>) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        self.auth_headers.lock().await.push(auth);
        *self.last_query.lock().await = query;
    }

    fn error_response(&self) -> Option<(StatusCode, Json<Value>)> {
        if self.invalid_token.load(Ordering::SeqCst) {
            return Some((
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "INVALID_TOKEN"})),
            ));
        }
        if self.reject_orders.load(Ordering::SeqCst) {
            return Some((
                StatusCode::BAD_REQUEST,
                Json(json!({"error": {"message": "contract not found", "code": 600}})),
            ));
        }
        None
    }
}

// ------------------------------------------------------------------------------------------------
// Mock Handlers
// ------------------------------------------------------------------------------------------------

async fn handle_list_contracts(
    State(state): State<Arc<TestServerState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.record(&headers, query).await;
    if let Some(error) = state.error_response() {
        return error;
    }
    (
        StatusCode::OK,
        Json(json!({
            "data": [{
                "id": 22_210_930,
                "label": "BTC-Mini-27NOV2020",
                "name": "Day Ahead Swap",
                "active": true,
                "min_increment": 100,
                "date_live": "2020-11-25 21:00:00+0000",
                "date_expires": "2020-11-27 21:00:00+0000",
                "date_exercise": null,
                "underlying_asset": "CBTC",
                "collateral_asset": "CBTC",
                "derivative_type": "day_ahead_swap",
                "is_next_day": true,
                "multiplier": 1,
                "type": "swap"
            }],
            "metadata": [{"total_count": 1, "limit": 100, "offset": 0}]
        })),
    )
}

async fn handle_open_orders(
    State(state): State<Arc<TestServerState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.record(&headers, query).await;
    if let Some(error) = state.error_response() {
        return error;
    }
    (
        StatusCode::OK,
        Json(json!({
            "data": [{
                "mid": "open-order-1",
                "contract_id": 22_210_930,
                "orignal_price": 1_000_000,
                "orignal_size": 5,
                "inserted_size": 5,
                "is_ask": true,
                "order_type": "customer_limit_order",
                "status_type": 200
            }],
            "metadata": []
        })),
    )
}

async fn handle_trades(
    State(state): State<Arc<TestServerState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.record(&headers, query).await;
    if let Some(error) = state.error_response() {
        return error;
    }
    (
        StatusCode::OK,
        Json(json!({
            "data": [{
                "id": 7,
                "contract_id": "22210930",
                "contract_label": "BTC-Mini-27NOV2020",
                "filled_price": 1_000_000,
                "filled_size": 1,
                "fee": 50,
                "order_type": "customer_limit_order",
                "order_id": "order-1",
                "status_type": "filled"
            }],
            "meta": {"total_count": 1, "limit": 100, "offset": 0}
        })),
    )
}

async fn handle_create_order(
    State(state): State<Arc<TestServerState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.record(&headers, query).await;
    *state.last_order_body.lock().await = Some(body);
    if let Some(error) = state.error_response() {
        return error;
    }
    (StatusCode::OK, Json(json!({"data": {"mid": "new-order-1"}})))
}

async fn handle_cancel_order(
    State(state): State<Arc<TestServerState>>,
    Path(mid): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.record(&headers, query).await;
    state.order_mids.lock().await.push(mid);
    if let Some(error) = state.error_response() {
        return error;
    }
    (StatusCode::OK, Json(json!({})))
}

async fn handle_cancel_replace(
    State(state): State<Arc<TestServerState>>,
    Path(mid): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.record(&headers, query).await;
    state.order_mids.lock().await.push(mid);
    if let Some(error) = state.error_response() {
        return error;
    }
    (StatusCode::OK, Json(json!({})))
}

async fn start_http_server(state: Arc<TestServerState>) -> SocketAddr {
    let router = Router::new()
        .route("/trading/contracts", get(handle_list_contracts))
        .route("/trading/trades", get(handle_trades))
        .route("/trading/positions", get(handle_trades))
        .route("/api/open-orders", get(handle_open_orders))
        .route("/api/orders", post(handle_create_order))
        .route("/api/orders/{mid}", delete(handle_cancel_order))
        .route("/api/orders/{mid}/edit", post(handle_cancel_replace))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind http listener");
    let addr = listener.local_addr().expect("missing local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    addr
}

fn test_client(addr: SocketAddr) -> LedgerXHttpClient {
    let config = LedgerXConfig {
        http_url: format!("http://{addr}"),
        trading_url: format!("http://{addr}"),
        api_token: Some("test-token".to_string()),
        ..Default::default()
    };
    LedgerXHttpClient::new(&config).expect("failed to construct http client")
}

// ================================================================================================
// Market Structure Tests
// ================================================================================================

#[tokio::test]
async fn test_list_contracts() {
    let state = Arc::new(TestServerState::default());
    let addr = start_http_server(state.clone()).await;
    let client = test_client(addr);

    let response = client.list_contracts().await.expect("request failed");
    assert_eq!(response.data.len(), 1);
    assert_eq!(response.data[0].id, 22_210_930);
    assert_eq!(response.data[0].derivative_type, "day_ahead_swap");
    assert!(response.data[0].date_live.is_some());
    assert_eq!(response.data[0].date_exercise, None);

    let query = state.last_query.lock().await.clone().unwrap();
    assert!(query.contains("derivative_type=day_ahead_swap"));
    assert!(query.contains("before_ts="));
    assert!(query.contains("after_ts="));

    let auth = state.auth_headers.lock().await.clone();
    assert_eq!(auth, vec![Some("JWT test-token".to_string())]);
}

#[tokio::test]
async fn test_list_trades_query_shape() {
    let state = Arc::new(TestServerState::default());
    let addr = start_http_server(state.clone()).await;
    let client = test_client(addr);

    let response = client
        .list_trades(None, None, Some("CBTC"), 5)
        .await
        .expect("request failed");
    assert_eq!(response.data.len(), 1);
    assert_eq!(response.data[0].contract_id, 22_210_930);
    assert_eq!(response.metadata.total_count, 1);

    let query = state.last_query.lock().await.clone().unwrap();
    assert!(query.contains("derivative_type=day_ahead_swap"));
    assert!(query.contains("limit=100"));
    assert!(query.contains("offset=5"));
    assert!(query.contains("asset=CBTC"));
}

#[tokio::test]
async fn test_list_positions_query_shape() {
    let state = Arc::new(TestServerState::default());
    let addr = start_http_server(state.clone()).await;
    let client = test_client(addr);

    client.list_positions(0).await.expect("request failed");

    let query = state.last_query.lock().await.clone().unwrap();
    assert!(query.contains("limit=100"));
    assert!(query.contains("offset=0"));
}

// ================================================================================================
// Order Management Tests
// ================================================================================================

#[tokio::test]
async fn test_list_open_orders() {
    let state = Arc::new(TestServerState::default());
    let addr = start_http_server(state.clone()).await;
    let client = test_client(addr);

    let response = client.list_open_orders().await.expect("request failed");
    assert_eq!(response.data.len(), 1);
    assert_eq!(response.data[0].mid, "open-order-1");
    assert_eq!(response.data[0].original_size, 5);
    assert!(response.data[0].is_ask);
}

#[tokio::test]
async fn test_create_order() {
    let state = Arc::new(TestServerState::default());
    let addr = start_http_server(state.clone()).await;
    let client = test_client(addr);

    let request = CreateOrderRequest {
        order_type: LedgerXOrderType::CustomerLimitOrder,
        contract_id: 22_210_930,
        is_ask: false,
        swap_purpose: "undisclosed".to_string(),
        size: 1,
        price: 1_000_000,
        volatile: false,
    };
    let response = client.create_order(&request).await.expect("request failed");
    assert_eq!(response.data.mid, "new-order-1");

    let body = state.last_order_body.lock().await.clone().unwrap();
    assert_eq!(body["order_type"], "customer_limit_order");
    assert_eq!(body["contract_id"], 22_210_930);
    assert_eq!(body["is_ask"], false);
}

#[tokio::test]
async fn test_cancel_order() {
    let state = Arc::new(TestServerState::default());
    let addr = start_http_server(state.clone()).await;
    let client = test_client(addr);

    client
        .cancel_order("order-to-cancel", 22_210_930)
        .await
        .expect("request failed");

    let mids = state.order_mids.lock().await.clone();
    assert_eq!(mids, vec!["order-to-cancel".to_string()]);
}

#[tokio::test]
async fn test_cancel_and_replace_order() {
    let state = Arc::new(TestServerState::default());
    let addr = start_http_server(state.clone()).await;
    let client = test_client(addr);

    let request = CancelAndReplaceRequest {
        contract_id: 22_210_930,
        size: 2,
        price: 999_000,
    };
    client
        .cancel_and_replace_order("order-to-edit", &request)
        .await
        .expect("request failed");

    let mids = state.order_mids.lock().await.clone();
    assert_eq!(mids, vec!["order-to-edit".to_string()]);
}

// ================================================================================================
// Error Handling Tests
// ================================================================================================

#[tokio::test]
async fn test_invalid_token_error() {
    let state = Arc::new(TestServerState::default());
    state.invalid_token.store(true, Ordering::SeqCst);
    let addr = start_http_server(state.clone()).await;
    let client = test_client(addr);

    let result = client.list_contracts().await;
    assert!(matches!(result, Err(LedgerXHttpError::InvalidToken)));
}

#[tokio::test]
async fn test_trading_rejection_error() {
    let state = Arc::new(TestServerState::default());
    state.reject_orders.store(true, Ordering::SeqCst);
    let addr = start_http_server(state.clone()).await;
    let client = test_client(addr);

    let request = CreateOrderRequest {
        order_type: LedgerXOrderType::CustomerLimitOrder,
        contract_id: 1,
        is_ask: false,
        swap_purpose: "undisclosed".to_string(),
        size: 1,
        price: 100,
        volatile: false,
    };
    match client.create_order(&request).await {
        Err(LedgerXHttpError::ApiError { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "contract not found");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_credentials_short_circuits() {
    let state = Arc::new(TestServerState::default());
    let addr = start_http_server(state.clone()).await;

    let config = LedgerXConfig {
        http_url: format!("http://{addr}"),
        trading_url: format!("http://{addr}"),
        api_token: None,
        ..Default::default()
    };
    let client = LedgerXHttpClient::new(&config).expect("failed to construct http client");

    let result = client.list_contracts().await;
    assert!(matches!(
        result,
        Err(LedgerXHttpError::MissingCredentials(_))
    ));

    // The request never reached the server.
    assert!(state.auth_headers.lock().await.is_empty());
}
