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

//! HTTP client for the LedgerX REST API.
//!
//! The venue splits its REST surface across two hosts: market structure endpoints
//! (`/trading/...`) live on the API host, order management (`/api/...`) on the trading
//! host. Authenticated requests carry an `Authorization: JWT <token>` header.

use std::{fmt::Debug, time::Duration};

use chrono::{Days, Utc};
use reqwest::{Method, StatusCode, header};
use serde::de::DeserializeOwned;

use super::{
    error::LedgerXHttpError,
    models::{
        CancelAndReplaceRequest, CancelOrderRequest, CreateOrderRequest, CreateOrderResponse,
        InvalidTokenErrorResponse, ListContractsResponse, ListOpenOrdersResponse,
        ListTradesResponse, TradeErrorResponse,
    },
};
use crate::{
    common::{
        consts::{DEFAULT_PAGE_SIZE, LIST_CONTRACT_LOOKBACK_DAYS},
        enums::LedgerXDerivativeType,
    },
    config::LedgerXConfig,
};

/// Default trade query window when the caller does not supply one.
const DEFAULT_TRADE_LOOKBACK_DAYS: u64 = 2;

/// HTTP client for LedgerX REST order management and market structure queries.
pub struct LedgerXHttpClient {
    client: reqwest::Client,
    http_url: String,
    trading_url: String,
    api_token: Option<String>,
}

impl Debug for LedgerXHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(LedgerXHttpClient))
            .field("http_url", &self.http_url)
            .field("trading_url", &self.trading_url)
            .field("has_credentials", &self.api_token.is_some())
            .finish()
    }
}

impl LedgerXHttpClient {
    /// Creates a new [`LedgerXHttpClient`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: &LedgerXConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            http_url: config.http_url.clone(),
            trading_url: config.trading_url.clone(),
            api_token: config.api_token.clone(),
        })
    }

    /// Lists day-ahead swap contracts within the venue's listing window.
    ///
    /// The window runs from `before_ts` (the day after tomorrow at midnight) back over
    /// the venue's contract lookback period.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, credential rejection, or an undecodable
    /// response body.
    pub async fn list_contracts(&self) -> Result<ListContractsResponse, LedgerXHttpError> {
        let now = Utc::now();
        let before_date = (now + Days::new(2)).date_naive();
        let after_date = before_date - Days::new(LIST_CONTRACT_LOOKBACK_DAYS);
        let url = format!(
            "{}/trading/contracts?derivative_type={}&before_ts={}T00:00&after_ts={}T00:00",
            self.http_url,
            LedgerXDerivativeType::DayAheadSwap,
            before_date.format("%Y-%m-%d"),
            after_date.format("%Y-%m-%d"),
        );
        self.send_request(Method::GET, &url, None).await
    }

    /// Lists the account's resting orders.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, credential rejection, or an undecodable
    /// response body.
    pub async fn list_open_orders(&self) -> Result<ListOpenOrdersResponse, LedgerXHttpError> {
        let url = format!("{}/api/open-orders", self.trading_url);
        self.send_request(Method::GET, &url, None).await
    }

    /// Lists executed trades within a lookback window, paged by `offset`.
    ///
    /// `derivative_type` defaults to day-ahead swaps and `lookback_days` to the venue's
    /// two-day window when not supplied.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, credential rejection, or an undecodable
    /// response body.
    pub async fn list_trades(
        &self,
        derivative_type: Option<LedgerXDerivativeType>,
        lookback_days: Option<u64>,
        asset: Option<&str>,
        offset: u32,
    ) -> Result<ListTradesResponse, LedgerXHttpError> {
        let derivative_type = derivative_type.unwrap_or(LedgerXDerivativeType::DayAheadSwap);
        let lookback = Days::new(lookback_days.unwrap_or(DEFAULT_TRADE_LOOKBACK_DAYS));
        let after_date = (Utc::now() - lookback).date_naive();

        let mut url = format!(
            "{}/trading/trades?derivative_type={}&after_ts={}T00:00&limit={}&offset={}",
            self.http_url,
            derivative_type,
            after_date.format("%Y-%m-%d"),
            DEFAULT_PAGE_SIZE,
            offset,
        );
        if let Some(asset) = asset {
            url.push_str(&format!("&asset={asset}"));
        }

        self.send_request(Method::GET, &url, None).await
    }

    /// Lists the account's positions, paged by `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, credential rejection, or an undecodable
    /// response body.
    pub async fn list_positions(&self, offset: u32) -> Result<ListTradesResponse, LedgerXHttpError> {
        let url = format!(
            "{}/trading/positions?limit={}&offset={}",
            self.http_url, DEFAULT_PAGE_SIZE, offset,
        );
        self.send_request(Method::GET, &url, None).await
    }

    /// Submits a new order, returning the venue-assigned `mid`.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, credential rejection, or a trading
    /// rejection decoded from the response body.
    pub async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<CreateOrderResponse, LedgerXHttpError> {
        let url = format!("{}/api/orders", self.trading_url);
        let body = serde_json::to_string(request)
            .map_err(|e| LedgerXHttpError::JsonError(e.to_string()))?;
        self.send_request(Method::POST, &url, Some(body)).await
    }

    /// Cancels a resting order by `mid`.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, credential rejection, or a trading
    /// rejection decoded from the response body.
    pub async fn cancel_order(
        &self,
        mid: &str,
        contract_id: i32,
    ) -> Result<(), LedgerXHttpError> {
        let url = format!("{}/api/orders/{mid}", self.trading_url);
        let body = serde_json::to_string(&CancelOrderRequest { contract_id })
            .map_err(|e| LedgerXHttpError::JsonError(e.to_string()))?;
        self.send_request_expect_ok(Method::DELETE, &url, body).await
    }

    /// Atomically replaces the size and price of a resting order.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, credential rejection, or a trading
    /// rejection decoded from the response body.
    pub async fn cancel_and_replace_order(
        &self,
        mid: &str,
        request: &CancelAndReplaceRequest,
    ) -> Result<(), LedgerXHttpError> {
        let url = format!("{}/api/orders/{mid}/edit", self.trading_url);
        let body = serde_json::to_string(request)
            .map_err(|e| LedgerXHttpError::JsonError(e.to_string()))?;
        self.send_request_expect_ok(Method::POST, &url, body).await
    }

    fn build_request(
        &self,
        method: Method,
        url: &str,
    ) -> Result<reqwest::RequestBuilder, LedgerXHttpError> {
        let token = self.api_token.as_ref().ok_or_else(|| {
            LedgerXHttpError::MissingCredentials("API token not configured".to_string())
        })?;

        Ok(self
            .client
            .request(method, url)
            .header(header::AUTHORIZATION, format!("JWT {token}"))
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json"))
    }

    async fn send_request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<T, LedgerXHttpError> {
        tracing::trace!("{method} {url}");

        let mut request = self.build_request(method, url)?;
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LedgerXHttpError::NetworkError(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| LedgerXHttpError::NetworkError(e.to_string()))?;

        if status != StatusCode::OK {
            return Err(decode_error(status, &bytes));
        }

        serde_json::from_slice(&bytes).map_err(|e| LedgerXHttpError::JsonError(e.to_string()))
    }

    /// Sends a request whose success is signaled purely by the status code.
    async fn send_request_expect_ok(
        &self,
        method: Method,
        url: &str,
        body: String,
    ) -> Result<(), LedgerXHttpError> {
        tracing::trace!("{method} {url}");

        let response = self
            .build_request(method, url)?
            .body(body)
            .send()
            .await
            .map_err(|e| LedgerXHttpError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LedgerXHttpError::NetworkError(e.to_string()))?;
        Err(decode_error(status, &bytes))
    }
}

/// Decodes a non-success response body into the most specific error available.
///
/// The venue uses two incompatible error body shapes: authentication failures carry a
/// bare string under `error`, trading rejections an object with `message` and `code`.
/// Both are probed in turn.
fn decode_error(status: StatusCode, body: &[u8]) -> LedgerXHttpError {
    tracing::error!("LedgerX error response ({status}): {}", String::from_utf8_lossy(body));

    if let Ok(response) = serde_json::from_slice::<InvalidTokenErrorResponse>(body) {
        if response.error == "INVALID_TOKEN" {
            return LedgerXHttpError::InvalidToken;
        }
        if !response.error.is_empty() {
            return LedgerXHttpError::ApiError {
                status: status.as_u16(),
                message: response.error,
            };
        }
    }

    if let Ok(response) = serde_json::from_slice::<TradeErrorResponse>(body) {
        if !response.error.message.is_empty() {
            return LedgerXHttpError::ApiError {
                status: status.as_u16(),
                message: response.error.message,
            };
        }
    }

    LedgerXHttpError::ApiError {
        status: status.as_u16(),
        message: "unknown error".to_string(),
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
