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

//! Configuration for the LedgerX HTTP and WebSocket clients.

use serde::{Deserialize, Serialize};

use crate::common::consts::{
    LEDGERX_HTTP_URL, LEDGERX_STAGING_HTTP_URL, LEDGERX_STAGING_TRADING_URL,
    LEDGERX_STAGING_WS_URL, LEDGERX_TRADING_URL, LEDGERX_WS_URL,
};

/// Default delay between reconnect attempts (milliseconds).
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 5_000;

/// Default rolling read deadline on the stream (milliseconds).
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 15_000;

/// Default interval between outbound liveness probes (milliseconds).
pub const DEFAULT_HEARTBEAT_INTERVAL_MS: u64 = 6_000;

/// Default bounded capacity of the decoded event channel.
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 1_024;

/// Default HTTP request timeout (seconds).
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Configuration for LedgerX clients.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerXConfig {
    /// The WebSocket streaming endpoint.
    pub ws_url: String,
    /// The REST API base URL (contracts, trades, positions).
    pub http_url: String,
    /// The trading API base URL (order management).
    pub trading_url: String,
    /// Optional API token (JWT). Without a token the stream carries market data only.
    pub api_token: Option<String>,
    /// The delay between reconnect attempts (milliseconds). Fixed, not exponential:
    /// the venue connection is expected to eventually recover.
    pub reconnect_delay_ms: u64,
    /// The rolling read deadline (milliseconds); reset after every received frame.
    pub read_timeout_ms: u64,
    /// The interval between outbound liveness probes (milliseconds).
    pub heartbeat_interval_ms: u64,
    /// The bounded capacity of the decoded event channel. A full channel stalls
    /// ingestion rather than dropping events.
    pub event_channel_capacity: usize,
    /// HTTP request timeout (seconds).
    pub http_timeout_secs: u64,
}

impl Default for LedgerXConfig {
    fn default() -> Self {
        Self {
            ws_url: LEDGERX_WS_URL.to_string(),
            http_url: LEDGERX_HTTP_URL.to_string(),
            trading_url: LEDGERX_TRADING_URL.to_string(),
            api_token: None,
            reconnect_delay_ms: DEFAULT_RECONNECT_DELAY_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            heartbeat_interval_ms: DEFAULT_HEARTBEAT_INTERVAL_MS,
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl LedgerXConfig {
    /// Creates a configuration pointing at the staging environment.
    #[must_use]
    pub fn staging() -> Self {
        Self {
            ws_url: LEDGERX_STAGING_WS_URL.to_string(),
            http_url: LEDGERX_STAGING_HTTP_URL.to_string(),
            trading_url: LEDGERX_STAGING_TRADING_URL.to_string(),
            ..Default::default()
        }
    }

    /// Returns true if an API token is configured.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.api_token.is_some()
    }

    /// Returns the WebSocket URL to dial, appending the token as a connection-time
    /// authentication parameter when configured.
    #[must_use]
    pub fn ws_connect_url(&self) -> String {
        match &self.api_token {
            Some(token) => format!("{}?token={token}", self.ws_url),
            None => self.ws_url.clone(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
