// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod content;
pub mod device_prompts;
pub mod display_line;
pub mod interact;
pub mod paginate;

// Re-export.
pub use content::*;
pub use device_prompts::*;
pub use display_line::*;
pub use interact::*;
pub use paginate::*;
