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

//! Client bindings for the [LedgerX](https://www.ledgerx.com) derivatives venue.
//!
//! LedgerX operates a CFTC-regulated exchange and clearing house for Bitcoin and Ether
//! options and swaps. This crate provides:
//!
//! - A WebSocket client for the streaming market-data and account-event feed, with a
//!   persistent connection supervisor that keeps the feed alive across network failures.
//! - An HTTP client for REST order management (contracts, orders, trades, positions).
//! - Wire models and venue constants (channels, status codes, contract identifiers).
//!
//! The streaming feed is heterogeneous: every frame is a JSON object carrying a `type`
//! discriminator which selects the schema for the full decode. Decoded events are
//! republished on a bounded channel; a slow consumer stalls ingestion rather than
//! dropping data. Feed gaps across a reconnect are possible and must be tolerated by
//! the consumer (the venue does not replay missed messages).

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod common;
pub mod config;
pub mod http;
pub mod websocket;

pub use crate::{
    config::LedgerXConfig,
    http::client::LedgerXHttpClient,
    websocket::{client::LedgerXWebSocketClient, messages::LedgerXEvent},
};
