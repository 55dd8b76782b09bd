// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Errors raised while negotiating, transporting, and driving interaction requests.
//! See [`FlowError`] for details.

use crate::DriverState;

/// Every failure mode of an input flow.
///
/// Any sequence mismatch is fatal: the [`crate::FlowDriver`] moves to
/// [`DriverState::Failed`] and the error is propagated to the caller. Nothing in this
/// crate swallows a mismatch.
///
/// Choosing a wrong word on purpose (see [`crate::SpotCheckOptions::choose_wrong`]) is
/// *not* an error. That branch returns `Ok(None)`.
///
/// | Variant                       | Raised by                                            |
/// | :---------------------------- | :--------------------------------------------------- |
/// | [`ProtocolSequence`]          | driver or host, request does not match expectation   |
/// | [`NavigationExhausted`]       | [`crate::CyclicSearch`] never lands on the word      |
/// | [`MissingPageCount`]          | mnemonic reveal request without a known page count   |
/// | [`InputFlowEndedPrematurely`] | host receives a request after the flow terminated    |
///
/// [`ProtocolSequence`]: Self::ProtocolSequence
/// [`NavigationExhausted`]: Self::NavigationExhausted
/// [`MissingPageCount`]: Self::MissingPageCount
/// [`InputFlowEndedPrematurely`]: Self::InputFlowEndedPrematurely
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum FlowError {
    #[error("Unexpected request #{position}: expected {expected}, got {actual}")]
    #[diagnostic(
        code(r3bl_confirm_flow::protocol_sequence),
        help("The device asked for a different confirmation than the script expected.")
    )]
    ProtocolSequence {
        /// 1-based position of the offending request in the session.
        position: usize,
        expected: String,
        actual: String,
    },

    #[error("Word `{target}` not found after {attempts} screen refreshes")]
    #[diagnostic(
        code(r3bl_confirm_flow::navigation_exhausted),
        help("Increase `search_bound` in FlowConfig if the device shows more choices.")
    )]
    NavigationExhausted { target: String, attempts: usize },

    #[error("Expected a request with a known page count, got {actual}")]
    #[diagnostic(code(r3bl_confirm_flow::missing_page_count))]
    MissingPageCount { actual: String },

    #[error("Word index {index} is out of range for a {word_count} word mnemonic")]
    #[diagnostic(code(r3bl_confirm_flow::word_index_out_of_range))]
    WordIndexOutOfRange { index: usize, word_count: usize },

    #[error("Can't parse display line `{line}`: {reason}")]
    #[diagnostic(code(r3bl_confirm_flow::screen_parse))]
    ScreenParse { line: String, reason: &'static str },

    #[error("Invalid share set: {reason}")]
    #[diagnostic(
        code(r3bl_confirm_flow::invalid_share_set),
        help("All shares of one recovery attempt must have the same word count.")
    )]
    InvalidShareSet { reason: String },

    #[error("Input flow ended prematurely, then received {actual}")]
    #[diagnostic(
        code(r3bl_confirm_flow::input_flow_ended_prematurely),
        help("The device sent more requests than the input flow handles.")
    )]
    InputFlowEndedPrematurely { actual: String },

    #[error("Unexpected request #{position}: no more responses expected, got {actual}")]
    #[diagnostic(code(r3bl_confirm_flow::unexpected_request))]
    UnexpectedRequest { position: usize, actual: String },

    #[error("{remaining} expected request(s) never arrived, next one is {next}")]
    #[diagnostic(code(r3bl_confirm_flow::missing_requests))]
    MissingRequests { remaining: usize, next: String },

    #[error("Can't send {request} while {pending} is still waiting for its ButtonAck")]
    #[diagnostic(
        code(r3bl_confirm_flow::pipelined_request),
        help("Await the ButtonAck before sending the next ButtonRequest.")
    )]
    PipelinedRequest { pending: String, request: String },

    #[error("Unexpected wire message: {actual}")]
    #[diagnostic(code(r3bl_confirm_flow::unexpected_wire_message))]
    UnexpectedWireMessage { actual: String },

    #[error("Interaction session closed while waiting for the next request")]
    #[diagnostic(code(r3bl_confirm_flow::session_closed))]
    SessionClosed,

    #[error("Input flow already terminated in state {state}")]
    #[diagnostic(code(r3bl_confirm_flow::driver_terminated))]
    DriverTerminated { state: DriverState },

    /// The device session collaborator failed. The inner [`miette::Report`] preserves
    /// the full error chain.
    #[error("Device session failed: {0}")]
    #[diagnostic(code(r3bl_confirm_flow::device))]
    Device(miette::Report),

    /// The transport collaborator failed.
    #[error("Transport failed: {0}")]
    #[diagnostic(code(r3bl_confirm_flow::transport))]
    Transport(miette::Report),
}

impl FlowError {
    /// `true` for the errors that describe a request arriving out of order.
    #[must_use]
    pub fn is_sequence_error(&self) -> bool {
        matches!(
            self,
            FlowError::ProtocolSequence { .. }
                | FlowError::UnexpectedRequest { .. }
                | FlowError::MissingRequests { .. }
                | FlowError::InputFlowEndedPrematurely { .. }
        )
    }
}
