// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use async_trait::async_trait;

use crate::{DebugAction, LayoutLines, SwipeDirection};

/// The debug channel into the device under test. The [`crate::FlowDriver`] owns one and
/// mutates it strictly in sequence, one action at a time.
#[async_trait]
pub trait DeviceSession: Send {
    /// # Errors
    ///
    /// Returns an error if the device can't be reached.
    async fn press_yes(&mut self) -> miette::Result<()>;

    /// # Errors
    ///
    /// Returns an error if the device can't be reached.
    async fn press_no(&mut self) -> miette::Result<()>;

    /// # Errors
    ///
    /// Returns an error if the device can't be reached.
    async fn press_info(&mut self) -> miette::Result<()>;

    /// # Errors
    ///
    /// Returns an error if the device can't be reached.
    async fn navigate(&mut self, direction: SwipeDirection) -> miette::Result<()>;

    /// # Errors
    ///
    /// Returns an error if the device can't be reached.
    async fn input(&mut self, value: &str) -> miette::Result<()>;

    /// The screen as currently rendered.
    ///
    /// # Errors
    ///
    /// Returns an error if the device can't be reached.
    async fn read_layout(&mut self) -> miette::Result<LayoutLines>;

    /// # Errors
    ///
    /// Returns an error if the device can't be reached.
    async fn perform(&mut self, action: &DebugAction) -> miette::Result<()> {
        match action {
            DebugAction::PressYes => self.press_yes().await,
            DebugAction::PressNo => self.press_no().await,
            DebugAction::PressInfo => self.press_info().await,
            DebugAction::Navigate(direction) => self.navigate(*direction).await,
            DebugAction::Input(value) => self.input(value).await,
        }
    }
}
