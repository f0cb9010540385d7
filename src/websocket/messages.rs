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

//! Typed events decoded from the LedgerX streaming feed.
//!
//! Prices and sizes are integer ticks as sent by the venue (USD cents for swaps).

use serde::{Deserialize, Serialize};

use crate::common::enums::{LedgerXReasonCode, LedgerXStatusCode};

/// A decoded event from the streaming feed.
///
/// Serializes with the venue's `type` discriminator, so an encoded event is a valid
/// inbound frame again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum LedgerXEvent {
    /// Top-of-book change for one contract.
    #[serde(rename = "book_top")]
    BookTop(BookTopMsg),
    /// Order lifecycle report (insert, fill, cancel, reject).
    #[serde(rename = "action_report")]
    ActionReport(ActionReportMsg),
    /// Collateral balance snapshot for the account.
    #[serde(rename = "collateral_balance_update")]
    BalanceUpdate(BalanceUpdateMsg),
    /// Open positions snapshot for the account.
    #[serde(rename = "open_positions_update")]
    OpenPositionsUpdate(OpenPositionsMsg),
    /// Server heartbeat carrying the exchange clock.
    #[serde(rename = "heartbeat")]
    Heartbeat(HeartbeatMsg),
}

/// Top-of-book state for one contract.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookTopMsg {
    /// Venue contract ID.
    pub contract_id: i64,
    /// Best ask price in integer ticks (0 when the side is empty).
    pub ask: i64,
    /// Size available at the best ask.
    pub ask_size: i64,
    /// Best bid price in integer ticks (0 when the side is empty).
    pub bid: i64,
    /// Size available at the best bid.
    pub bid_size: i64,
    /// Monotonic book clock for this contract.
    pub clock: i64,
}

/// Order lifecycle report.
///
/// The venue emits one report per book action; `status_type` and `status_reason`
/// qualify the transition (see [`LedgerXStatusCode`] and [`LedgerXReasonCode`]).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionReportMsg {
    /// Venue contract ID.
    pub contract_id: i64,
    /// Best ask after the action.
    pub ask: i64,
    /// Best bid after the action.
    pub bid: i64,
    /// Monotonic book clock for this contract.
    pub clock: i64,
    /// Customer ID (authenticated sessions only).
    #[serde(rename = "cid")]
    pub customer_id: i64,
    /// Market participant ID.
    #[serde(rename = "mpid")]
    pub market_participant_id: i64,
    /// Insertion time (venue nanoseconds).
    pub inserted_time: i64,
    /// Last update time (venue nanoseconds).
    pub updated_time: i64,
    /// Event timestamp (venue nanoseconds).
    pub timestamp: i64,
    /// Current price in integer ticks.
    pub price: i64,
    /// Price at original submission.
    pub original_price: i64,
    /// Price at book insertion.
    pub inserted_price: i64,
    /// Filled price for trade reports.
    pub filled_price: i64,
    /// True if the order is on the ask side.
    pub is_ask: bool,
    /// True if the order was flagged volatile.
    pub is_volatile: bool,
    /// Current remaining size.
    pub size: i64,
    /// Size at original submission.
    pub original_size: i64,
    /// Size at book insertion.
    pub inserted_size: i64,
    /// Filled size for trade reports.
    pub filled_size: i64,
    /// Venue order type label.
    pub order_type: String,
    /// Venue-assigned message ID for the order.
    pub mid: String,
    /// Raw status code.
    pub status_type: i64,
    /// Raw reason code.
    pub status_reason: i64,
}

impl ActionReportMsg {
    /// Returns the status code as a typed variant, if recognized.
    #[must_use]
    pub fn status(&self) -> Option<LedgerXStatusCode> {
        LedgerXStatusCode::from_repr(self.status_type)
    }

    /// Returns the reason code as a typed variant, if recognized.
    #[must_use]
    pub fn reason(&self) -> Option<LedgerXReasonCode> {
        LedgerXReasonCode::from_repr(self.status_reason)
    }
}

/// Collateral balance snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceUpdateMsg {
    pub collateral: LedgerXCollateral,
}

/// Balances partitioned by lock state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerXCollateral {
    pub available_balances: LedgerXBalances,
    pub deliverable_locked_balances: LedgerXBalances,
    pub fee_locked_balances: LedgerXBalances,
    pub order_locked_balances: LedgerXBalances,
    pub position_locked_balances: LedgerXBalances,
}

/// Per-asset balances in the venue's smallest units (satoshi, wei, USD cents).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerXBalances {
    #[serde(rename = "BTC")]
    pub btc: i64,
    #[serde(rename = "CBTC")]
    pub cbtc: i64,
    #[serde(rename = "USD")]
    pub usd: i64,
    #[serde(rename = "ETH")]
    pub eth: i64,
}

/// Open positions snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenPositionsMsg {
    pub positions: Vec<LedgerXPosition>,
}

/// One open position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerXPosition {
    pub contract_id: i64,
    pub exercise_size: i64,
    #[serde(rename = "mpid")]
    pub market_participant_id: i64,
    pub size: i64,
}

/// Server heartbeat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartbeatMsg {
    /// Venue timestamp (nanoseconds).
    pub timestamp: i64,
    /// Heartbeat sequence number.
    pub ticks: i64,
    /// Venue run ID; changes when the matching engine restarts.
    pub run_id: i64,
    /// Advertised heartbeat interval (milliseconds).
    pub interval_ms: i64,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
