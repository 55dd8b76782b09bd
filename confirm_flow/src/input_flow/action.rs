// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// One synthetic user action, performed on the device between two requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebugAction {
    PressYes,
    PressNo,
    PressInfo,
    /// Swipe on a touch screen, or press the matching button on a two button device.
    Navigate(SwipeDirection),
    /// Type a literal value, eg: a word count or a mnemonic word.
    Input(String),
}

impl DebugAction {
    pub const SWIPE_UP: DebugAction = DebugAction::Navigate(SwipeDirection::Up);
    pub const PRESS_RIGHT: DebugAction = DebugAction::Navigate(SwipeDirection::Right);

    pub fn input(value: impl Into<String>) -> Self { DebugAction::Input(value.into()) }
}
