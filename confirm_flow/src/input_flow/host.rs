// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::{ButtonAck, ButtonRequest, ButtonRequestCode, FlowError, InteractionTransport,
            ok};

/// Only one request is ever in flight between host and input flow.
pub const INPUT_FLOW_CHANNEL_CAPACITY: usize = 1;

/// One request handed from the host to the input flow. Dropping `round_done` (or
/// sending on it) tells the host that the input flow has finished acting on `request`,
/// so the acknowledge can go out.
#[derive(Debug)]
pub struct InteractionRound {
    pub request: ButtonRequest,
    pub round_done: oneshot::Sender<()>,
}

/// Create the two halves of an input flow session. The [`HostResponder`] receives
/// requests from the device, the receiver goes to [`crate::FlowDriver::new`].
#[must_use]
pub fn input_flow_channel() -> (HostResponder, mpsc::Receiver<InteractionRound>) {
    let (sender, receiver) = mpsc::channel(INPUT_FLOW_CHANNEL_CAPACITY);
    (HostResponder::new(sender), receiver)
}

/// The host side of a session. For each [`ButtonRequest`]:
///
/// 1. Check it against the expected responses, if any were set.
/// 2. Hand it to the input flow.
/// 3. Wait until the input flow suspends again (or terminates).
/// 4. Return the [`ButtonAck`].
///
/// Once the input flow has terminated, any further request is
/// [`FlowError::InputFlowEndedPrematurely`]. A request that fails the expected responses
/// check closes the session, so a suspended input flow resumes with
/// [`FlowError::SessionClosed`] instead of waiting forever.
///
/// It also implements [`InteractionTransport`], so device side code running in the same
/// process can talk to it directly.
#[derive(Debug)]
pub struct HostResponder {
    /// `None` once the session was closed by a failed check.
    sender: Option<mpsc::Sender<InteractionRound>>,
    expected: Option<VecDeque<ButtonRequestCode>>,
    requests_seen: usize,
    pending: Option<ButtonRequest>,
    dismiss_count: usize,
}

impl HostResponder {
    fn new(sender: mpsc::Sender<InteractionRound>) -> Self {
        Self {
            sender: Some(sender),
            expected: None,
            requests_seen: 0,
            pending: None,
            dismiss_count: 0,
        }
    }

    /// Every request from now on must match the next code in `codes`, in order.
    pub fn set_expected_responses(
        &mut self,
        codes: impl IntoIterator<Item = ButtonRequestCode>,
    ) {
        self.expected = Some(codes.into_iter().collect());
    }

    #[must_use]
    pub fn requests_seen(&self) -> usize { self.requests_seen }

    #[must_use]
    pub fn dismiss_count(&self) -> usize { self.dismiss_count }

    /// # Errors
    ///
    /// - [`FlowError::ProtocolSequence`] or [`FlowError::UnexpectedRequest`] if the
    ///   request doesn't match the expected responses.
    /// - [`FlowError::InputFlowEndedPrematurely`] if the input flow has terminated.
    pub async fn on_button_request(
        &mut self,
        request: ButtonRequest,
    ) -> Result<ButtonAck, FlowError> {
        self.requests_seen += 1;
        let position = self.requests_seen;
        debug!(message = "host received", %request, position);

        let ended_prematurely = || {
            warn!(message = "input flow ended prematurely", %request);
            FlowError::InputFlowEndedPrematurely {
                actual: request.to_string(),
            }
        };
        if self.sender.is_none() {
            return Err(ended_prematurely());
        }

        if let Err(error) = self.check_expected(position, &request) {
            warn!(message = "closing input flow session", %error);
            self.sender = None;
            return Err(error);
        }

        let Some(sender) = self.sender.as_ref() else {
            return Err(ended_prematurely());
        };

        let (round_done, round_done_receiver) = oneshot::channel();
        sender
            .send(InteractionRound {
                request,
                round_done,
            })
            .await
            .map_err(|_| ended_prematurely())?;

        // Resolves with an error if the input flow terminated while handling this
        // request. The request was still consumed, so it is acknowledged.
        let _ = round_done_receiver.await;

        ok!(ButtonAck)
    }

    fn check_expected(
        &mut self,
        position: usize,
        request: &ButtonRequest,
    ) -> Result<(), FlowError> {
        let Some(expected) = self.expected.as_mut() else {
            return ok!();
        };
        match expected.pop_front() {
            Some(code) if code == request.code => ok!(),
            Some(code) => Err(FlowError::ProtocolSequence {
                position,
                expected: code.to_string(),
                actual: request.to_string(),
            }),
            None => Err(FlowError::UnexpectedRequest {
                position,
                actual: request.to_string(),
            }),
        }
    }

    /// Close the session and report expected responses that never arrived.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::MissingRequests`] if expected responses remain.
    pub fn finish(&self) -> Result<usize, FlowError> {
        let next = self.expected.as_ref().and_then(|it| it.front().map(|code| (it.len(), code)));
        match next {
            Some((remaining, next)) => Err(FlowError::MissingRequests {
                remaining,
                next: next.to_string(),
            }),
            None => ok!(self.requests_seen),
        }
    }
}

#[async_trait]
impl InteractionTransport for HostResponder {
    fn dismiss_other_interactions(&mut self) { self.dismiss_count += 1; }

    async fn send_request(&mut self, request: ButtonRequest) -> miette::Result<()> {
        if let Some(pending) = self.pending {
            return Err(FlowError::PipelinedRequest {
                pending: pending.to_string(),
                request: request.to_string(),
            }
            .into());
        }
        self.pending = Some(request);
        ok!()
    }

    async fn await_ack(&mut self) -> miette::Result<ButtonAck> {
        let Some(request) = self.pending.take() else {
            miette::bail!("No ButtonRequest is waiting for a ButtonAck")
        };
        Ok(self.on_button_request(request).await?)
    }
}
