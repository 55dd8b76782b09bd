// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod confirmation_strategy;
pub mod cyclic_search;
pub mod direct_selection;

// Re-export.
pub use confirmation_strategy::*;
pub use cyclic_search::*;
pub use direct_selection::*;
