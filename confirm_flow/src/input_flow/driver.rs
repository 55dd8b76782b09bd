// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::{ButtonRequest, ButtonRequestCode, DebugAction, DeviceSession, Expectation,
            FlowError, FlowScript, InteractionRound, LayoutLines, ok};

/// Where a [`FlowDriver`] is in its request / action loop.
///
/// ```text
/// AwaitingRequest ──► Validating ──► Acting ──┐
///        ▲                 │                  │
///        └─────────────────┼──────────────────┘
///                          ▼
///               Completed  or  Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum DriverState {
    /// Suspended until the next request arrives.
    AwaitingRequest,
    /// Holding a request that is being checked against the script.
    Validating,
    /// Performing actions on the device for the current request.
    Acting,
    Completed,
    Failed,
}

impl DriverState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, DriverState::Completed | DriverState::Failed)
    }
}

/// The input flow state machine. It owns the [`DeviceSession`] and the receiving end of
/// the channel created by [`crate::input_flow_channel`].
///
/// Each call to [`next_request`](Self::next_request) (or the `expect*` methods built on
/// it) is the only suspension point: it first releases the previous request (so the host
/// can acknowledge it) and then waits for exactly one new request. Two interactions are
/// never advanced per suspension, and no request is ever skipped.
///
/// Terminating the driver (with [`complete`](Self::complete), [`abandon`](Self::abandon),
/// or any error) closes the channel, so the host reports any further request as
/// [`FlowError::InputFlowEndedPrematurely`].
#[derive(Debug)]
pub struct FlowDriver<D> {
    device: D,
    requests: mpsc::Receiver<InteractionRound>,
    pending_round: Option<oneshot::Sender<()>>,
    state: DriverState,
    requests_consumed: usize,
}

impl<D: DeviceSession> FlowDriver<D> {
    pub fn new(device: D, requests: mpsc::Receiver<InteractionRound>) -> Self {
        Self {
            device,
            requests,
            pending_round: None,
            state: DriverState::AwaitingRequest,
            requests_consumed: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> DriverState { self.state }

    /// Number of requests this driver has suspended on so far.
    #[must_use]
    pub fn requests_consumed(&self) -> usize { self.requests_consumed }

    #[must_use]
    pub fn device(&self) -> &D { &self.device }

    /// Suspend until the next request arrives. No validation.
    ///
    /// # Errors
    ///
    /// - [`FlowError::DriverTerminated`] if the driver already terminated.
    /// - [`FlowError::SessionClosed`] if the host went away.
    pub async fn next_request(&mut self) -> Result<ButtonRequest, FlowError> {
        self.ensure_live()?;
        self.release_round();
        self.state = DriverState::AwaitingRequest;

        let Some(InteractionRound {
            request,
            round_done,
        }) = self.requests.recv().await
        else {
            return Err(self.fail(FlowError::SessionClosed));
        };

        self.requests_consumed += 1;
        self.pending_round = Some(round_done);
        self.state = DriverState::Validating;
        debug!(message = "input flow resumed", %request, position = self.requests_consumed);

        ok!(request)
    }

    /// Suspend until the next request arrives, and check it against `expectation`.
    ///
    /// # Errors
    ///
    /// [`FlowError::ProtocolSequence`] on mismatch, plus the errors of
    /// [`next_request`](Self::next_request).
    pub async fn expect(
        &mut self,
        expectation: Expectation,
    ) -> Result<ButtonRequest, FlowError> {
        let request = self.next_request().await?;
        if !expectation.matches(&request) {
            return Err(self.fail(FlowError::ProtocolSequence {
                position: self.requests_consumed,
                expected: expectation.to_string(),
                actual: request.to_string(),
            }));
        }
        self.state = DriverState::Acting;
        ok!(request)
    }

    /// # Errors
    ///
    /// See [`expect`](Self::expect).
    pub async fn expect_code(
        &mut self,
        code: ButtonRequestCode,
    ) -> Result<ButtonRequest, FlowError> {
        self.expect(Expectation::Code(code)).await
    }

    /// # Errors
    ///
    /// See [`expect`](Self::expect).
    pub async fn expect_any(&mut self) -> Result<ButtonRequest, FlowError> {
        self.expect(Expectation::Any).await
    }

    /// Perform one action on the device.
    ///
    /// # Errors
    ///
    /// - [`FlowError::DriverTerminated`] if the driver already terminated.
    /// - [`FlowError::Device`] if the device session fails.
    pub async fn act(&mut self, action: &DebugAction) -> Result<(), FlowError> {
        self.ensure_live()?;
        self.state = DriverState::Acting;
        debug!(message = "input flow action", ?action);
        let result = self.device.perform(action).await;
        match result {
            Ok(()) => ok!(),
            Err(report) => Err(self.fail(FlowError::Device(report))),
        }
    }

    /// # Errors
    ///
    /// See [`act`](Self::act).
    pub async fn press_yes(&mut self) -> Result<(), FlowError> {
        self.act(&DebugAction::PressYes).await
    }

    /// # Errors
    ///
    /// See [`act`](Self::act).
    pub async fn press_info(&mut self) -> Result<(), FlowError> {
        self.act(&DebugAction::PressInfo).await
    }

    /// # Errors
    ///
    /// See [`act`](Self::act).
    pub async fn swipe_up(&mut self) -> Result<(), FlowError> {
        self.act(&DebugAction::SWIPE_UP).await
    }

    /// # Errors
    ///
    /// See [`act`](Self::act).
    pub async fn press_right(&mut self) -> Result<(), FlowError> {
        self.act(&DebugAction::PRESS_RIGHT).await
    }

    /// # Errors
    ///
    /// See [`act`](Self::act).
    pub async fn input(&mut self, value: &str) -> Result<(), FlowError> {
        self.act(&DebugAction::input(value)).await
    }

    /// Read the screen. Does not change state.
    ///
    /// # Errors
    ///
    /// - [`FlowError::DriverTerminated`] if the driver already terminated.
    /// - [`FlowError::Device`] if the device session fails.
    pub async fn read_layout(&mut self) -> Result<LayoutLines, FlowError> {
        self.ensure_live()?;
        let result = self.device.read_layout().await;
        match result {
            Ok(layout) => ok!(layout),
            Err(report) => Err(self.fail(FlowError::Device(report))),
        }
    }

    /// Run every step of `script`: suspend, validate, act.
    ///
    /// # Errors
    ///
    /// The first error of [`expect`](Self::expect) or [`act`](Self::act).
    pub async fn run_script(&mut self, script: FlowScript) -> Result<(), FlowError> {
        debug!(message = "run script", steps = script.len());
        for step in script.into_steps() {
            self.expect(step.expectation).await?;
            for action in &step.actions {
                self.act(action).await?;
            }
        }
        ok!()
    }

    /// The script ran to the end. Releases the last request and closes the session.
    /// Returns the number of requests consumed.
    ///
    /// # Errors
    ///
    /// [`FlowError::DriverTerminated`] if the driver already terminated.
    pub fn complete(&mut self) -> Result<usize, FlowError> {
        self.ensure_live()?;
        self.terminate(DriverState::Completed);
        debug!(message = "input flow completed", requests = self.requests_consumed);
        ok!(self.requests_consumed)
    }

    /// Stop on purpose, eg: after typing a wrong word in a negative test. Ends in
    /// [`DriverState::Failed`] without an error.
    pub fn abandon(&mut self) {
        debug!(message = "input flow abandoned", requests = self.requests_consumed);
        self.terminate(DriverState::Failed);
    }

    /// Move to [`DriverState::Failed`] and hand `error` back for propagation.
    #[must_use]
    pub fn fail(&mut self, error: FlowError) -> FlowError {
        warn!(message = "input flow failed", %error);
        self.terminate(DriverState::Failed);
        error
    }

    fn ensure_live(&self) -> Result<(), FlowError> {
        if self.state.is_terminal() {
            return Err(FlowError::DriverTerminated { state: self.state });
        }
        ok!()
    }

    /// Close the channel before releasing the last round, so that the host can't slip
    /// another request in between.
    fn terminate(&mut self, state: DriverState) {
        self.state = state;
        self.requests.close();
        self.release_round();
    }

    fn release_round(&mut self) {
        if let Some(round_done) = self.pending_round.take() {
            // The host may have given up on this round already.
            let _ = round_done.send(());
        }
    }
}
