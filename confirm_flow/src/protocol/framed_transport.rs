// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite, BufReader, BufWriter};
use tracing::{debug, instrument};

use crate::{ButtonAck, ButtonRequest, FlowError, HostResponder, InteractionTransport,
            WireMessage, ok, try_read_frame, try_write_frame};

/// Device side [`InteractionTransport`] over any pair of byte stream halves, eg: the
/// two halves of a TCP stream or of a [`tokio::io::duplex`] pipe.
#[derive(Debug)]
pub struct FramedTransport<R, W> {
    reader: BufReader<R>,
    writer: BufWriter<W>,
    pending: Option<ButtonRequest>,
    dismiss_count: usize,
}

impl<R, W> FramedTransport<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(read_half: R, write_half: W) -> Self {
        Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
            pending: None,
            dismiss_count: 0,
        }
    }

    /// How many times other interactions were dismissed. One per request sent.
    pub fn dismiss_count(&self) -> usize { self.dismiss_count }
}

#[async_trait]
impl<R, W> InteractionTransport for FramedTransport<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    fn dismiss_other_interactions(&mut self) { self.dismiss_count += 1; }

    async fn send_request(&mut self, request: ButtonRequest) -> miette::Result<()> {
        if let Some(pending) = self.pending {
            return Err(FlowError::PipelinedRequest {
                pending: pending.to_string(),
                request: request.to_string(),
            }
            .into());
        }
        try_write_frame(&mut self.writer, &WireMessage::from(request)).await?;
        self.pending = Some(request);
        ok!()
    }

    async fn await_ack(&mut self) -> miette::Result<ButtonAck> {
        match try_read_frame::<_, WireMessage>(&mut self.reader).await? {
            Some(WireMessage::ButtonAck) => {
                self.pending = None;
                ok!(ButtonAck)
            }
            Some(other) => Err(FlowError::UnexpectedWireMessage {
                actual: format!("{other:?}"),
            }
            .into()),
            None => Err(FlowError::SessionClosed.into()),
        }
    }
}

/// Host side loop: read each [`WireMessage::ButtonRequest`] from the device, hand it to
/// `host`, and write back a [`WireMessage::ButtonAck`] once the input flow lets go of
/// it. Returns the number of requests served when the device closes the stream.
///
/// # Errors
///
/// - [`FlowError::Transport`] if reading or writing a frame fails.
/// - [`FlowError::UnexpectedWireMessage`] if the device sends anything but a request.
/// - The first error of [`HostResponder::on_button_request`].
#[instrument(skip_all)]
pub async fn serve_framed_host<R, W>(
    read_half: R,
    write_half: W,
    host: &mut HostResponder,
) -> Result<usize, FlowError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(read_half);
    let mut writer = BufWriter::new(write_half);
    let mut served = 0;

    while let Some(message) = try_read_frame::<_, WireMessage>(&mut reader)
        .await
        .map_err(FlowError::Transport)?
    {
        let request = ButtonRequest::try_from(message)?;
        host.on_button_request(request).await?;
        try_write_frame(&mut writer, &WireMessage::ButtonAck)
            .await
            .map_err(FlowError::Transport)?;
        served += 1;
    }

    debug!(message = "device closed the stream", served);
    ok!(served)
}

#[cfg(test)]
mod tests_framed_transport {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ButtonRequestCode, PageCount, button_request,
                test_fixtures::{MockSocket, get_mock_socket_halves}};

    #[tokio::test]
    async fn test_ack_clears_pending_request() {
        let MockSocket {
            client_read,
            client_write,
            mut server_read,
            mut server_write,
        } = get_mock_socket_halves();
        let mut transport = FramedTransport::new(client_read, client_write);

        let host = async {
            let mut reader = BufReader::new(&mut server_read);
            let mut writer = BufWriter::new(&mut server_write);
            let message: Option<WireMessage> = try_read_frame(&mut reader).await.unwrap();
            try_write_frame(&mut writer, &WireMessage::ButtonAck).await.unwrap();
            message
        };

        let device = button_request(
            &mut transport,
            "word_count",
            ButtonRequestCode::MnemonicWordCount,
            PageCount::Single,
        );

        let (received, ack) = tokio::join!(host, device);
        assert_eq!(
            received,
            Some(WireMessage::ButtonRequest {
                code: 12,
                pages: None
            })
        );
        assert_eq!(ack.unwrap(), ButtonAck);
        assert_eq!(transport.dismiss_count(), 1);
        assert!(transport.pending.is_none());
    }

    #[tokio::test]
    async fn test_second_send_before_ack_is_rejected() {
        let MockSocket {
            client_read,
            client_write,
            server_read: _server_read,
            server_write: _server_write,
        } = get_mock_socket_halves();
        let mut transport = FramedTransport::new(client_read, client_write);

        transport
            .send_request(ButtonRequest::new(ButtonRequestCode::ProtectCall))
            .await
            .unwrap();
        let report = transport
            .send_request(ButtonRequest::new(ButtonRequestCode::Success))
            .await
            .unwrap_err();

        assert!(matches!(
            report.downcast_ref::<FlowError>(),
            Some(FlowError::PipelinedRequest { .. })
        ));
    }
}
