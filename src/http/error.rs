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

//! Error types for the LedgerX HTTP client.

use thiserror::Error;

/// Errors returned by [`LedgerXHttpClient`](super::client::LedgerXHttpClient).
#[derive(Debug, Clone, Error)]
pub enum LedgerXHttpError {
    /// The operation requires an API token and none was configured.
    #[error("Missing credentials for authenticated request: {0}")]
    MissingCredentials(String),
    /// Failed to build or execute the request.
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Failed to deserialize a response body.
    #[error("JSON error: {0}")]
    JsonError(String),
    /// The venue rejected the supplied API token.
    #[error("LedgerX API error: invalid token")]
    InvalidToken,
    /// The venue returned a non-success status with a decodable error payload.
    #[error("LedgerX API error {status}: {message}")]
    ApiError {
        /// HTTP status code returned by the venue.
        status: u16,
        /// Error message decoded from the response body, or `unknown error`.
        message: String,
    },
}
