// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod mnemonic_fixtures;
pub mod mock_device;
pub mod mock_layout;
pub mod mock_socket;
pub mod recording_transport;
pub mod request_stream;

// Re-export.
pub use mnemonic_fixtures::*;
pub use mock_device::*;
pub use mock_layout::*;
pub use mock_socket::*;
pub use recording_transport::*;
pub use request_stream::*;
