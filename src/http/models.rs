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

//! Wire models for the LedgerX REST API.
//!
//! Prices and sizes are integer ticks as quoted by the venue. Field names follow the
//! wire exactly, including the venue's own misspellings (`orignal_price`); renames map
//! them onto conventional Rust names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::enums::LedgerXOrderType;

/// Serde adapter for the venue's REST timestamp format.
///
/// The venue encodes timestamps as `"2021-06-01 14:30:00+0000"` and uses JSON `null`
/// for absent values.
pub mod ledgerx_datetime {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S%z";

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(s) => DateTime::parse_from_str(&s, FORMAT)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(Error::custom),
        }
    }
}

/// Serde adapter for integer identifiers the venue string-encodes.
pub mod int_string {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(Error::custom)
    }
}

/// A listed contract returned by `GET /trading/contracts`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contract {
    pub id: i64,
    pub label: String,
    pub name: String,
    pub is_call: bool,
    pub active: bool,
    pub strike_price: i32,
    pub min_increment: i32,
    #[serde(with = "ledgerx_datetime")]
    pub date_live: Option<DateTime<Utc>>,
    #[serde(with = "ledgerx_datetime")]
    pub date_expires: Option<DateTime<Utc>>,
    #[serde(with = "ledgerx_datetime")]
    pub date_exercise: Option<DateTime<Utc>>,
    pub underlying_asset: String,
    pub collateral_asset: String,
    pub derivative_type: String,
    pub open_interest: i32,
    pub is_next_day: bool,
    pub multiplier: i32,
    #[serde(rename = "type")]
    pub contract_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListContractsResponse {
    pub data: Vec<Contract>,
    pub metadata: Vec<Metadata>,
}

/// A resting order returned by `GET /api/open-orders`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenOrder {
    pub mid: String,
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(rename = "mpid")]
    pub market_participant_id: i64,
    #[serde(rename = "cid")]
    pub customer_id: i64,
    pub timestamp: i64,
    pub ticks: i64,
    pub contract_id: i64,
    #[serde(rename = "orignal_price")]
    pub original_price: i64,
    #[serde(rename = "orignal_size")]
    pub original_size: i64,
    pub inserted_price: i64,
    pub inserted_size: i64,
    pub filled_price: i64,
    pub filled_size: i64,
    pub vwap: i32,
    pub status_type: i32,
    pub status_reason: i32,
    pub is_ask: bool,
    pub inserted_time: i64,
    pub updated_time: i64,
    pub order_type: String,
    pub clock: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListOpenOrdersResponse {
    pub data: Vec<OpenOrder>,
    pub metadata: Vec<Metadata>,
}

/// Paging envelope attached to list responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub total_count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// An executed trade returned by `GET /trading/trades`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trade {
    pub id: i64,
    #[serde(with = "int_string")]
    pub contract_id: i64,
    pub contract_label: String,
    pub filled_price: i64,
    pub filled_size: i64,
    pub fee: i64,
    pub order_type: String,
    pub order_id: String,
    pub status_type: String,
    pub created: String,
    pub timestamp: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListTradesResponse {
    pub data: Vec<Trade>,
    #[serde(rename = "meta")]
    pub metadata: Metadata,
}

/// Request body for `POST /api/orders`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub order_type: LedgerXOrderType,
    pub contract_id: i32,
    pub is_ask: bool,
    pub swap_purpose: String,
    pub size: i32,
    pub price: i32,
    pub volatile: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateOrderData {
    /// Venue-assigned order identifier.
    pub mid: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateOrderResponse {
    pub data: CreateOrderData,
}

/// Request body for `DELETE /api/orders/{mid}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrderRequest {
    pub contract_id: i32,
}

/// Request body for `POST /api/orders/{mid}/edit`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelAndReplaceRequest {
    pub contract_id: i32,
    pub size: i32,
    pub price: i32,
}

/// Error body shape used for authentication failures (`error` is a bare string).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvalidTokenErrorResponse {
    pub error: String,
}

/// Error body shape used for trading rejections (`error` is an object).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeErrorResponse {
    pub error: TradeErrorObject,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeErrorObject {
    pub message: String,
    pub code: i32,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
