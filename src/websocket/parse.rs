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

//! Frame codec for the streaming feed.
//!
//! Every inbound frame is a JSON object with a `type` discriminator. Decoding is two
//! passes: the envelope pass reads the discriminator, then the registered decoder for
//! that discriminator interprets the full frame. The registry keeps the set of
//! recognized channels explicit; adding a channel is one entry plus its decode fn.
//!
//! Decode failures are reported to the caller for observability but are non-fatal to
//! the connection: the read loop drops the frame and continues.

use serde::{Deserialize, de::DeserializeOwned};

use super::{error::LedgerXWsError, messages::*};
use crate::common::consts;

/// Outcome of decoding one inbound frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decoded {
    /// A typed event to forward to the consumer.
    Event(LedgerXEvent),
    /// A recognized informational frame with no payload of interest; acknowledged,
    /// not forwarded.
    Ack(InfoChannel),
}

/// Informational channels acknowledged without producing an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfoChannel {
    AuthSuccess,
    AuthFailure,
    SessionMeta,
    StateManifest,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    message_type: Option<String>,
}

type DecodeFn = fn(&str) -> Result<Decoded, LedgerXWsError>;

/// Registry mapping channel discriminators to decode functions.
static DECODERS: &[(&str, DecodeFn)] = &[
    (consts::CHANNEL_BOOK_TOP, decode_book_top),
    (consts::CHANNEL_ACTION_REPORT, decode_action_report),
    (consts::CHANNEL_BALANCE_UPDATE, decode_balance_update),
    (consts::CHANNEL_OPEN_POSITIONS_UPDATE, decode_open_positions),
    (consts::CHANNEL_HEARTBEAT, decode_heartbeat),
    (consts::CHANNEL_AUTH_SUCCESS, |_| {
        Ok(Decoded::Ack(InfoChannel::AuthSuccess))
    }),
    (consts::CHANNEL_AUTH_FAILURE, |_| {
        Ok(Decoded::Ack(InfoChannel::AuthFailure))
    }),
    (consts::CHANNEL_META, |_| {
        Ok(Decoded::Ack(InfoChannel::SessionMeta))
    }),
    (consts::CHANNEL_STATE_MANIFEST, |_| {
        Ok(Decoded::Ack(InfoChannel::StateManifest))
    }),
];

/// Decodes one raw frame into a typed outcome.
///
/// # Errors
///
/// Returns an error if the frame is empty, is not a JSON object, lacks the `type`
/// discriminator, carries an unrecognized discriminator, or fails the decode selected
/// by its discriminator.
pub fn decode(data: &[u8]) -> Result<Decoded, LedgerXWsError> {
    if data.is_empty() {
        return Err(LedgerXWsError::MalformedFrame("empty frame".to_string()));
    }

    let text = std::str::from_utf8(data)
        .map_err(|e| LedgerXWsError::MalformedFrame(format!("invalid UTF-8: {e}")))?;

    let envelope: Envelope = serde_json::from_str(text).map_err(|e| {
        LedgerXWsError::MalformedFrame(format!("invalid envelope: {e}: {text}"))
    })?;

    let message_type = envelope.message_type.ok_or_else(|| {
        LedgerXWsError::MalformedFrame(format!("missing `type` discriminator: {text}"))
    })?;

    match DECODERS
        .iter()
        .find(|(channel, _)| *channel == message_type)
    {
        Some((_, decode_fn)) => decode_fn(text),
        None => Err(LedgerXWsError::UnexpectedMessage(text.to_string())),
    }
}

fn decode_typed<T: DeserializeOwned>(text: &str, channel: &str) -> Result<T, LedgerXWsError> {
    serde_json::from_str(text)
        .map_err(|e| LedgerXWsError::JsonError(format!("failed to decode {channel}: {e}: {text}")))
}

fn decode_book_top(text: &str) -> Result<Decoded, LedgerXWsError> {
    decode_typed::<BookTopMsg>(text, consts::CHANNEL_BOOK_TOP)
        .map(|msg| Decoded::Event(LedgerXEvent::BookTop(msg)))
}

fn decode_action_report(text: &str) -> Result<Decoded, LedgerXWsError> {
    decode_typed::<ActionReportMsg>(text, consts::CHANNEL_ACTION_REPORT)
        .map(|msg| Decoded::Event(LedgerXEvent::ActionReport(msg)))
}

fn decode_balance_update(text: &str) -> Result<Decoded, LedgerXWsError> {
    decode_typed::<BalanceUpdateMsg>(text, consts::CHANNEL_BALANCE_UPDATE)
        .map(|msg| Decoded::Event(LedgerXEvent::BalanceUpdate(msg)))
}

fn decode_open_positions(text: &str) -> Result<Decoded, LedgerXWsError> {
    decode_typed::<OpenPositionsMsg>(text, consts::CHANNEL_OPEN_POSITIONS_UPDATE)
        .map(|msg| Decoded::Event(LedgerXEvent::OpenPositionsUpdate(msg)))
}

fn decode_heartbeat(text: &str) -> Result<Decoded, LedgerXWsError> {
    decode_typed::<HeartbeatMsg>(text, consts::CHANNEL_HEARTBEAT)
        .map(|msg| Decoded::Event(LedgerXEvent::Heartbeat(msg)))
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
