// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod action;
pub mod device_session;
pub mod driver;
pub mod host;
pub mod script;

// Re-export.
pub use action::*;
pub use device_session::*;
pub use driver::*;
pub use host::*;
pub use script::*;
