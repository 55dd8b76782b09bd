// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # `r3bl_confirm_flow`
//!
//! Models the human interaction protocol between a constrained secure device and the
//! host that controls it, and ships a deterministic driver that exercises that protocol
//! end to end.
//!
//! Every user facing decision point on the device (confirmations, warnings, paginated
//! text, mnemonic entry and verification) is surfaced as a [`ButtonRequest`]. The host
//! answers each one with a [`ButtonAck`]. For automated verification, the host also hands
//! every request to an input flow that performs the synthetic button presses a human
//! would have made.
//!
//! ## Layers
//!
//! 1. [`split_share_into_pages`] turns mnemonic words into fixed size pages of text.
//! 2. [`negotiate`] and [`interact`] decide how many pages each piece of content is
//!    announced with, and send exactly one request for it.
//! 3. [`button_request`] and [`InteractionTransport`] are the two message round trip.
//!    [`FramedTransport`] carries it over any byte stream.
//! 4. [`FlowDriver`] is the input flow state machine. It suspends once per request,
//!    validates the request against an [`Expectation`], then performs [`DebugAction`]s
//!    on a [`DeviceSession`].
//! 5. [`ConfirmationStrategy`] knows how to read and re-confirm a mnemonic on a touch
//!    screen device ([`DirectSelection`]) or on a two button device ([`CyclicSearch`]).
//! 6. [`read_and_confirm_mnemonic`], [`recovery_enter_shares`] and friends compose the
//!    above into complete backup and recovery flows.
//!
//! ## Wiring a flow
//!
//! [`input_flow_channel`] returns a [`HostResponder`] (the host side, which receives
//! requests from the device) and the receiving end that a [`FlowDriver`] consumes. The
//! two halves hand each request across a single slot channel, so requests and actions
//! strictly alternate.
//!
//! ```no_run
//! use r3bl_confirm_flow::{FlowConfig, FlowDriver, SpotCheckOptions, ConfirmationStrategy,
//!                         input_flow_channel, run_reset_flow, test_fixtures::MockDevice};
//!
//! # async fn demo() -> miette::Result<()> {
//! let config = FlowConfig::default();
//! let (mut host, requests) = input_flow_channel();
//! host.set_expected_responses(r3bl_confirm_flow::reset_expected_responses(&config));
//! let mut driver = FlowDriver::new(MockDevice::default(), requests);
//! let strategy = ConfirmationStrategy::from_config(&config);
//! let mnemonic = run_reset_flow(&mut driver, &strategy, SpotCheckOptions::default()).await?;
//! # let _ = mnemonic;
//! # Ok(())
//! # }
//! ```

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod config;
pub mod decl_macros;
pub mod error;
pub mod flows;
pub mod input_flow;
pub mod layout;
pub mod protocol;
pub mod strategy;
pub mod test_fixtures;
pub mod tracing_logging;

// Re-export.
pub use config::*;
pub use decl_macros::*;
pub use error::*;
pub use flows::*;
pub use input_flow::*;
pub use layout::*;
pub use protocol::*;
pub use strategy::*;
pub use tracing_logging::*;
