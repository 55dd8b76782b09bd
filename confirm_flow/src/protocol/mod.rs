// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod button_request;
pub mod framed_transport;
pub mod transport;
pub mod wire_codec;

// Re-export.
pub use button_request::*;
pub use framed_transport::*;
pub use transport::*;
pub use wire_codec::*;
