// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ButtonRequestCode, DeviceSession, Expectation, FlowDriver, FlowError, ok};

/// Accept `screens` dialogs in a row. When `code` is given, each request must carry it.
///
/// # Errors
///
/// Returns the first error of [`FlowDriver::expect`] or [`FlowDriver::press_yes`].
pub async fn click_through<D: DeviceSession>(
    driver: &mut FlowDriver<D>,
    screens: usize,
    code: Option<ButtonRequestCode>,
) -> Result<(), FlowError> {
    let expectation = code.map_or(Expectation::Any, Expectation::Code);
    for _ in 0..screens {
        driver.expect(expectation).await?;
        driver.press_yes().await?;
    }
    ok!()
}
