// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod backup;
pub mod click_through;
pub mod recovery;

// Re-export.
pub use backup::*;
pub use click_through::*;
pub use recovery::*;
