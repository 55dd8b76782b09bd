// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Length-prefix, binary payload framing for [`WireMessage`]s.
//!
//! Each frame is a `u64` big endian payload size followed by the payload. The payload is
//! the message encoded with [`bincode`] (serde flavor). Messages are a few bytes long,
//! so payloads are not compressed.

use std::io::ErrorKind;

use miette::IntoDiagnostic;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
                BufWriter};
use tracing::debug;

use crate::{ButtonRequest, ButtonRequestCode, FlowError, PageCount, ok};

/// Type alias for the length prefix read from the stream.
pub type LengthPrefixType = u64;

/// Frames bigger than this are rejected before allocating the payload buffer.
pub const MAX_FRAME_SIZE: LengthPrefixType = 64 * 1024;

/// What travels between device and host. `pages` keeps the optional integer shape, so
/// `None` and `Some(0)` stay distinct on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireMessage {
    ButtonRequest { code: u32, pages: Option<u32> },
    ButtonAck,
}

impl From<ButtonRequest> for WireMessage {
    fn from(request: ButtonRequest) -> Self {
        WireMessage::ButtonRequest {
            code: request.code.wire_value(),
            pages: request.pages.to_wire(),
        }
    }
}

impl TryFrom<WireMessage> for ButtonRequest {
    type Error = FlowError;

    fn try_from(message: WireMessage) -> Result<Self, Self::Error> {
        match message {
            WireMessage::ButtonRequest { code, pages } => {
                let code = ButtonRequestCode::from_wire_value(code).ok_or_else(|| {
                    FlowError::UnexpectedWireMessage {
                        actual: format!("{message:?}"),
                    }
                })?;
                ok!(ButtonRequest::with_pages(code, PageCount::from_wire(pages)))
            }
            WireMessage::ButtonAck => Err(FlowError::UnexpectedWireMessage {
                actual: format!("{message:?}"),
            }),
        }
    }
}

/// Encode with [`bincode`].
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn try_encode<T: Serialize>(data: &T) -> miette::Result<Vec<u8>> {
    bincode::serde::encode_to_vec(data, bincode::config::standard()).into_diagnostic()
}

/// Decode with [`bincode`].
///
/// # Errors
///
/// Returns an error if decoding fails.
pub fn try_decode<T: DeserializeOwned>(payload: &[u8]) -> miette::Result<T> {
    match bincode::serde::decode_from_slice::<T, _>(payload, bincode::config::standard()) {
        Ok((it, _bytes_read)) => ok!(it),
        Err(err) => miette::bail!("Failed to decode wire message: {err:?}"),
    }
}

/// Write one frame and flush.
///
/// # Errors
///
/// Returns an error if encoding fails, or if writing to / flushing the writer fails.
pub async fn try_write_frame<W: AsyncWrite + Unpin, T: Serialize>(
    buf_writer: &mut BufWriter<W>,
    data: &T,
) -> miette::Result<()> {
    let payload = try_encode(data)?;
    debug!(message = "write frame", payload_size = payload.len());

    buf_writer
        .write_u64(payload.len() as LengthPrefixType)
        .await
        .into_diagnostic()?;
    buf_writer.write_all(&payload).await.into_diagnostic()?;
    buf_writer.flush().await.into_diagnostic()?;

    ok!()
}

/// Read one frame. Returns `None` if the stream ends cleanly before a new frame starts.
///
/// # Errors
///
/// Returns an error if the frame is truncated, too large, or can't be decoded.
pub async fn try_read_frame<R: AsyncRead + Unpin, T: DeserializeOwned>(
    buf_reader: &mut BufReader<R>,
) -> miette::Result<Option<T>> {
    let payload_size = match buf_reader.read_u64().await {
        Ok(it) => it,
        Err(err) if err.kind() == ErrorKind::UnexpectedEof => return ok!(None),
        Err(err) => return Err(err).into_diagnostic(),
    };

    if payload_size > MAX_FRAME_SIZE {
        miette::bail!("Frame of {payload_size} bytes exceeds {MAX_FRAME_SIZE} bytes")
    }

    // Bounded by MAX_FRAME_SIZE above, so this fits in usize.
    #[allow(clippy::cast_possible_truncation)]
    let mut payload = vec![0; payload_size as usize];
    buf_reader.read_exact(&mut payload).await.into_diagnostic()?;
    debug!(message = "read frame", payload_size);

    try_decode(&payload).map(Some)
}
