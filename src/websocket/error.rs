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

//! Error types for LedgerX WebSocket client operations.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum LedgerXWsError {
    /// Transport-level failure: dial, handshake, read, or send.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Client operation attempted without a live connection.
    #[error("Disconnected: {0}")]
    Disconnected(String),

    /// Frame could not be decoded against the schema selected by its discriminator.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// Frame was empty or lacked the `type` discriminator.
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    /// Frame carried a discriminator no decoder is registered for. Includes the raw
    /// frame content for diagnostics.
    #[error("Unexpected message: {0}")]
    UnexpectedMessage(String),
}
