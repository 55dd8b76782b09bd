// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use async_trait::async_trait;
use tracing::debug;

use crate::{DeviceSession, FlowDriver, FlowError, SecretConfirmation, ok};

/// Touch screen devices. Swipe up through the pages, confirm on the last one, then type
/// the requested words. The spot checks don't send requests of their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectSelection;

#[async_trait]
impl SecretConfirmation for DirectSelection {
    async fn read_pages<D: DeviceSession>(
        &self,
        driver: &mut FlowDriver<D>,
        pages: u32,
    ) -> Result<Vec<String>, FlowError> {
        let mut words = Vec::new();

        for _ in 0..pages.saturating_sub(1) {
            words.extend(driver.read_layout().await?.mnemonic_words());
            driver.swipe_up().await?;
        }

        // The last page is the confirmation page.
        words.extend(driver.read_layout().await?.mnemonic_words());
        driver.press_yes().await?;

        debug!(message = "read mnemonic", pages, words = words.len());
        ok!(words)
    }

    async fn await_spot_check<D: DeviceSession>(
        &self,
        driver: &mut FlowDriver<D>,
    ) -> Result<usize, FlowError> {
        let layout = driver.read_layout().await?;
        layout.word_index().map_err(|error| driver.fail(error))
    }

    async fn submit_word<D: DeviceSession>(
        &self,
        driver: &mut FlowDriver<D>,
        word: &str,
    ) -> Result<(), FlowError> {
        driver.input(word).await
    }
}

#[cfg(test)]
mod tests_direct_selection {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ButtonRequest, ButtonRequestCode, DebugAction, DriverState, LayoutLines,
                PageCount, input_flow_channel,
                test_fixtures::{MNEMONIC12, MockDevice, share_word_screens}};

    #[tokio::test]
    async fn test_read_pages_swipes_between_pages_and_confirms_last() {
        let words: Vec<&str> = MNEMONIC12.split(' ').collect();
        let device = MockDevice::new(share_word_screens(&words, 4));
        let (mut host, requests) = input_flow_channel();
        let mut driver = FlowDriver::new(device.clone(), requests);

        let flow = async {
            driver.expect_any().await.unwrap();
            let read = DirectSelection.read_pages(&mut driver, 3).await;
            driver.complete().unwrap();
            read
        };
        let firmware = host.on_button_request(ButtonRequest::with_pages(
            ButtonRequestCode::ResetDevice,
            PageCount::Known(3),
        ));

        let (read, ack) = tokio::join!(flow, firmware);

        assert!(ack.is_ok());
        assert_eq!(read.unwrap(), words);
        assert_eq!(
            device.actions(),
            vec![
                DebugAction::SWIPE_UP,
                DebugAction::SWIPE_UP,
                DebugAction::PressYes
            ]
        );
    }

    #[tokio::test]
    async fn test_await_spot_check_parses_prompt() {
        let device = MockDevice::new([LayoutLines::from_lines([
            "Select word 7/12",
            "CHECK SEED",
        ])]);
        let (_host, requests) = input_flow_channel();
        let mut driver = FlowDriver::new(device, requests);

        assert_eq!(DirectSelection.await_spot_check(&mut driver).await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_await_spot_check_bad_prompt_fails_driver() {
        let device = MockDevice::new([LayoutLines::from_lines(["CHECK SEED"])]);
        let (_host, requests) = input_flow_channel();
        let mut driver = FlowDriver::new(device, requests);

        assert!(DirectSelection.await_spot_check(&mut driver).await.is_err());
        assert_eq!(driver.state(), DriverState::Failed);
    }
}
