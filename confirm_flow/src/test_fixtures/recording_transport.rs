// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use async_trait::async_trait;

use crate::{ButtonAck, ButtonRequest, FlowError, InteractionTransport, ok};

/// An [`InteractionTransport`] with no host behind it. It records what is sent and
/// acknowledges right away.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    sent: Vec<ButtonRequest>,
    pending: Option<ButtonRequest>,
    dismiss_count: usize,
}

impl RecordingTransport {
    #[must_use]
    pub fn sent_requests(&self) -> Vec<ButtonRequest> { self.sent.clone() }

    #[must_use]
    pub fn dismiss_count(&self) -> usize { self.dismiss_count }
}

#[async_trait]
impl InteractionTransport for RecordingTransport {
    fn dismiss_other_interactions(&mut self) { self.dismiss_count += 1; }

    async fn send_request(&mut self, request: ButtonRequest) -> miette::Result<()> {
        if let Some(pending) = self.pending {
            return Err(FlowError::PipelinedRequest {
                pending: pending.to_string(),
                request: request.to_string(),
            }
            .into());
        }
        self.sent.push(request);
        self.pending = Some(request);
        ok!()
    }

    async fn await_ack(&mut self) -> miette::Result<ButtonAck> {
        if self.pending.take().is_none() {
            miette::bail!("No ButtonRequest is waiting for a ButtonAck")
        }
        ok!(ButtonAck)
    }
}
