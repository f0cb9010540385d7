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

//! WebSocket client for the LedgerX streaming market-data and account-event feed.
//!
//! One duplex connection carries every channel the session is entitled to: top of
//! book, action reports, balance and position updates, and server heartbeats. The
//! client owns three cooperating control loops:
//!
//! - A read loop per connection generation, decoding frames under a rolling deadline.
//! - A keepalive arm sending the venue's liveness probe on a fixed interval.
//! - A supervisor that serializes reconnect attempts with a fixed backoff.
//!
//! Redundant reconnect requests are coalesced so that any number of concurrent loop
//! failures produce at most one reconnect cycle.

pub mod client;
pub mod error;
pub mod messages;
pub mod parse;

/// Connection lifecycle state of the streaming client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionMode {
    /// No live connection; terminal once `close` has been requested.
    Closed = 0,
    /// A live connection generation is being read.
    Active = 1,
    /// The previous generation failed; a re-dial is pending or in flight.
    Reconnecting = 2,
}

impl ConnectionMode {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Active,
            2 => Self::Reconnecting,
            _ => Self::Closed,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
