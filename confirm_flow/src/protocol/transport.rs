// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use async_trait::async_trait;
use tracing::debug;

use crate::{ButtonAck, ButtonRequest, ButtonRequestCode, PageCount};

/// The device side of the request / acknowledge round trip.
///
/// Implementations must not pipeline: [`send_request`](Self::send_request) is only
/// called again after [`await_ack`](Self::await_ack) has returned. Implementations are
/// expected to return [`crate::FlowError::PipelinedRequest`] when that rule is broken.
///
/// There is no timeout here. Dropping the future cancels the wait.
#[async_trait]
pub trait InteractionTransport: Send {
    /// Tell the host environment to dismiss any other pending interaction, so that at
    /// most one interaction surface is active. Fire and forget.
    fn dismiss_other_interactions(&mut self);

    /// # Errors
    ///
    /// Returns an error if the request can't be delivered, or if a previous request is
    /// still waiting for its acknowledge.
    async fn send_request(&mut self, request: ButtonRequest) -> miette::Result<()>;

    /// # Errors
    ///
    /// Returns an error if the acknowledge can't be received.
    async fn await_ack(&mut self) -> miette::Result<ButtonAck>;
}

/// Send one [`ButtonRequest`] and wait for its [`ButtonAck`]. `br_type` names the
/// interaction in the logs only, it never goes on the wire.
///
/// # Errors
///
/// Returns an error if the transport fails to send the request or to receive the
/// acknowledge.
pub async fn button_request<T: InteractionTransport + ?Sized>(
    transport: &mut T,
    br_type: &str,
    code: ButtonRequestCode,
    pages: PageCount,
) -> miette::Result<ButtonAck> {
    debug!("ButtonRequest.type={br_type}");
    transport.dismiss_other_interactions();
    transport
        .send_request(ButtonRequest::with_pages(code, pages))
        .await?;
    transport.await_ack().await
}
