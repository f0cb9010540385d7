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

//! Enumerations for LedgerX venue concepts.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, FromRepr};

/// LedgerX derivative types accepted by the contract and trade listings.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LedgerXDerivativeType {
    DayAheadSwap,
    FutureContract,
    OptionsContract,
}

/// LedgerX order types carried on action reports and order listings.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LedgerXOrderType {
    CustomerLimitOrder,
    MarketOrder,
}

/// Status codes attached to action reports and order state transitions.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, FromRepr)]
#[repr(i64)]
pub enum LedgerXStatusCode {
    OrderInserted = 200,
    TradeOccurred = 201,
    MarketOrderNotFilled = 202,
    OrderCancelled = 203,
    OrderCancelledAndReplaced = 204,
    ContractNotFound = 600,
    OrderNotFound = 601,
    InvalidOrder = 602,
    OrderRejected = 607,
    NoFunds = 608,
    ContractExpired = 610,
}

impl LedgerXStatusCode {
    /// Returns true if the code reports a venue-side rejection.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        (*self as i64) >= 600
    }
}

/// Reason codes qualifying a status transition.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, FromRepr)]
#[repr(i64)]
pub enum LedgerXReasonCode {
    FullFill = 52,
    CancelledByExchange = 53,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
