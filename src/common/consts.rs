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

//! Venue constants: endpoint URLs, stream channel discriminators, and contract metadata.

use std::{collections::HashMap, sync::LazyLock};

pub const LEDGERX_WS_URL: &str = "wss://api.ledgerx.com/ws";
pub const LEDGERX_HTTP_URL: &str = "https://api.ledgerx.com";
pub const LEDGERX_TRADING_URL: &str = "https://trade.ledgerx.com";

pub const LEDGERX_STAGING_WS_URL: &str = "wss://api-staging.ledgerx.com/ws";
pub const LEDGERX_STAGING_HTTP_URL: &str = "https://api-staging.ledgerx.com";
pub const LEDGERX_STAGING_TRADING_URL: &str = "https://staging.ledgerx.com";

/// Stream channel discriminators carried in the `type` field of each frame.
pub const CHANNEL_BOOK_TOP: &str = "book_top";
pub const CHANNEL_ACTION_REPORT: &str = "action_report";
pub const CHANNEL_BALANCE_UPDATE: &str = "collateral_balance_update";
pub const CHANNEL_OPEN_POSITIONS_UPDATE: &str = "open_positions_update";
pub const CHANNEL_HEARTBEAT: &str = "heartbeat";
pub const CHANNEL_META: &str = "meta";
pub const CHANNEL_AUTH_SUCCESS: &str = "auth_success";
pub const CHANNEL_AUTH_FAILURE: &str = "unauth_success";
pub const CHANNEL_STATE_MANIFEST: &str = "state_manifest";

/// Liveness probe payload the venue expects on the WebSocket (plain text, not JSON).
pub const WS_KEEPALIVE_MSG: &str = "pong";

/// Contract ID for the BTC/USD day-ahead swap pair.
pub const BTC_USD_PAIR: i64 = 22_220_309;

/// Maps venue contract IDs to human-readable pair labels.
pub static CONTRACT_ID_TO_PAIRS: LazyLock<HashMap<i64, &'static str>> =
    LazyLock::new(|| HashMap::from([(BTC_USD_PAIR, "XBT/USD")]));

/// Lookback window (days) applied when listing contracts.
pub const LIST_CONTRACT_LOOKBACK_DAYS: u64 = 4;

/// Page size used for paged REST listings.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
