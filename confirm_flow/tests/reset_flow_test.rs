// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use pretty_assertions::assert_eq;
use r3bl_confirm_flow::{ButtonRequest, ButtonRequestCode, ConfirmationStrategy, DebugAction,
                        DeviceModel, DriverState, FlowConfig, FlowDriver, FlowError,
                        LayoutLines, PageCount, SpotCheckOptions, input_flow_channel,
                        reset_expected_responses, run_reset_flow,
                        test_fixtures::{MNEMONIC12, MockDevice, feed_requests,
                                        gen_request_stream, select_word_screen,
                                        share_word_screens}};

const DIALOG_SCREENS: usize = 3;

fn mnemonic_words() -> Vec<&'static str> { MNEMONIC12.split(' ').collect() }

fn dialog_screen() -> LayoutLines { LayoutLines::from_lines(["RESET DEVICE", "CONTINUE"]) }

/// The requests a device sends while resetting. Two button devices send one more per
/// spot check round.
fn reset_requests(model: DeviceModel, pages: u32, rounds: usize) -> Vec<ButtonRequest> {
    let mut requests = vec![ButtonRequest::new(ButtonRequestCode::ResetDevice); DIALOG_SCREENS];
    requests.push(ButtonRequest::with_pages(
        ButtonRequestCode::ResetDevice,
        PageCount::Known(pages),
    ));
    if model == DeviceModel::TwoButton {
        requests.extend(vec![
            ButtonRequest::new(ButtonRequestCode::ResetDevice);
            rounds
        ]);
    }
    requests.extend(vec![ButtonRequest::new(ButtonRequestCode::Success); 2]);
    requests
}

/// Dialogs, mnemonic pages, then one prompt per checked word.
fn touch_screens(checked: &[usize]) -> Vec<LayoutLines> {
    let words = mnemonic_words();
    let mut screens = vec![dialog_screen(); DIALOG_SCREENS];
    screens.extend(share_word_screens(&words, 4));
    for index in checked {
        screens.push(LayoutLines::from_lines([
            format!("Select word {}/{}", index + 1, words.len()),
            "CHECK SEED".to_string(),
        ]));
    }
    screens.push(LayoutLines::from_lines(["SUCCESS"]));
    screens
}

#[tokio::test]
async fn test_touch_reset_returns_mnemonic() {
    let config = FlowConfig::new(DeviceModel::Touch);
    let device = MockDevice::new(touch_screens(&[2, 9, 0]));
    let (mut host, requests) = input_flow_channel();
    host.set_expected_responses(reset_expected_responses(&config));
    let mut driver = FlowDriver::new(device.clone(), requests);
    let strategy = ConfirmationStrategy::from_config(&config);

    let flow = run_reset_flow(&mut driver, &strategy, SpotCheckOptions::default());
    let firmware = feed_requests(
        &mut host,
        gen_request_stream(reset_requests(DeviceModel::Touch, 3, 3)),
    );

    let (mnemonic, acked) = tokio::join!(flow, firmware);

    assert_eq!(mnemonic.unwrap().as_deref(), Some(MNEMONIC12));
    assert_eq!(acked.unwrap(), 6);
    assert_eq!(host.finish().unwrap(), 6);
    assert_eq!(driver.state(), DriverState::Completed);
    assert_eq!(device.typed_values(), vec!["abuse", "trade", "alcohol"]);
    assert_eq!(
        &device.actions()[DIALOG_SCREENS..DIALOG_SCREENS + 3],
        &[
            DebugAction::SWIPE_UP,
            DebugAction::SWIPE_UP,
            DebugAction::PressYes
        ]
    );
}

#[tokio::test]
async fn test_two_button_reset_searches_for_each_word() {
    let config = FlowConfig::new(DeviceModel::TwoButton);
    let words = mnemonic_words();

    let mut screens = vec![dialog_screen(); DIALOG_SCREENS];
    screens.extend(share_word_screens(&words, 4));
    // Word 4 is highlighted right away, word 8 after two presses, word 12 after one.
    screens.push(select_word_screen("CHECK SEED", 3, 12, "must"));
    screens.push(select_word_screen("CHECK SEED", 7, 12, "trade"));
    screens.push(select_word_screen("CHECK SEED", 7, 12, "mixed"));
    screens.push(select_word_screen("CHECK SEED", 7, 12, "actual"));
    screens.push(select_word_screen("CHECK SEED", 11, 12, "trade"));
    screens.push(select_word_screen("CHECK SEED", 11, 12, "aisle"));
    screens.push(LayoutLines::from_lines(["SUCCESS"]));
    let device = MockDevice::new(screens);

    let (mut host, requests) = input_flow_channel();
    host.set_expected_responses(reset_expected_responses(&config));
    let mut driver = FlowDriver::new(device.clone(), requests);
    let strategy = ConfirmationStrategy::from_config(&config);

    let flow = run_reset_flow(&mut driver, &strategy, SpotCheckOptions::from_config(&config));
    let firmware = feed_requests(
        &mut host,
        gen_request_stream(reset_requests(DeviceModel::TwoButton, 3, 3)),
    );

    let (mnemonic, acked) = tokio::join!(flow, firmware);

    assert_eq!(mnemonic.unwrap().as_deref(), Some(MNEMONIC12));
    assert_eq!(acked.unwrap(), 9);
    assert_eq!(host.finish().unwrap(), 9);
    assert_eq!(device.typed_values(), vec!["must", "actual", "aisle"]);
    let press_right_count = device
        .actions()
        .iter()
        .filter(|it| **it == DebugAction::PRESS_RIGHT)
        .count();
    // One per page, then the search presses.
    assert_eq!(press_right_count, 3 + 2 + 1);
}

#[tokio::test]
async fn test_reset_accepts_caller_supplied_dialog_count() {
    let config = FlowConfig {
        preliminary_screens: 1,
        ..FlowConfig::new(DeviceModel::Touch)
    };
    let device = MockDevice::new(touch_screens(&[2, 9, 0])[DIALOG_SCREENS - 1..].to_vec());
    let (mut host, requests) = input_flow_channel();
    host.set_expected_responses(reset_expected_responses(&config));
    let mut driver = FlowDriver::new(device.clone(), requests);
    let strategy = ConfirmationStrategy::from_config(&config);

    let mut device_requests = reset_requests(DeviceModel::Touch, 3, 3);
    device_requests.drain(..DIALOG_SCREENS - 1);

    let flow = run_reset_flow(&mut driver, &strategy, SpotCheckOptions::from_config(&config));
    let firmware = feed_requests(&mut host, gen_request_stream(device_requests));

    let (mnemonic, acked) = tokio::join!(flow, firmware);

    assert_eq!(mnemonic.unwrap().as_deref(), Some(MNEMONIC12));
    assert_eq!(acked.unwrap(), 4);
    assert_eq!(host.finish().unwrap(), 4);
    assert_eq!(device.typed_values(), vec!["abuse", "trade", "alcohol"]);
}

#[tokio::test]
async fn test_choose_wrong_word_stops_after_first_round() {
    let config = FlowConfig::new(DeviceModel::Touch);
    let device = MockDevice::new(touch_screens(&[4, 5, 6]));
    let (mut host, requests) = input_flow_channel();
    let mut driver = FlowDriver::new(device.clone(), requests);
    let strategy = ConfirmationStrategy::from_config(&config);

    let flow = run_reset_flow(
        &mut driver,
        &strategy,
        SpotCheckOptions::default().choose_wrong(),
    );
    let firmware = feed_requests(
        &mut host,
        gen_request_stream(reset_requests(DeviceModel::Touch, 3, 3)),
    );

    let (mnemonic, acked) = tokio::join!(flow, firmware);

    assert_eq!(mnemonic.unwrap(), None);
    // Word 5 was asked for, word 6 was typed.
    assert_eq!(device.typed_values(), vec!["monitor"]);
    assert_eq!(driver.state(), DriverState::Failed);
    assert!(matches!(
        acked,
        Err(FlowError::InputFlowEndedPrematurely { .. })
    ));
}

#[tokio::test]
async fn test_two_button_choose_wrong_word_stops_after_first_round() {
    let config = FlowConfig::new(DeviceModel::TwoButton);
    let words = mnemonic_words();

    let mut screens = vec![dialog_screen(); DIALOG_SCREENS];
    screens.extend(share_word_screens(&words, 4));
    screens.push(select_word_screen("CHECK SEED", 4, 12, "during"));
    screens.push(LayoutLines::from_lines(["SUCCESS"]));
    let device = MockDevice::new(screens);

    let (mut host, requests) = input_flow_channel();
    let mut driver = FlowDriver::new(device.clone(), requests);
    let strategy = ConfirmationStrategy::from_config(&config);

    let flow = run_reset_flow(
        &mut driver,
        &strategy,
        SpotCheckOptions::from_config(&config).choose_wrong(),
    );
    let firmware = feed_requests(
        &mut host,
        gen_request_stream(reset_requests(DeviceModel::TwoButton, 3, 3)),
    );

    let (mnemonic, acked) = tokio::join!(flow, firmware);

    assert_eq!(mnemonic.unwrap(), None);
    // Word 5 was asked for, word 6 was typed without searching for it.
    assert_eq!(device.typed_values(), vec!["monitor"]);
    let press_right_count = device
        .actions()
        .iter()
        .filter(|it| **it == DebugAction::PRESS_RIGHT)
        .count();
    assert_eq!(press_right_count, 3);
    assert_eq!(driver.state(), DriverState::Failed);
    // Dialogs, the mnemonic, and the first spot check were consumed.
    assert_eq!(driver.requests_consumed(), DIALOG_SCREENS + 2);
    assert!(matches!(
        acked,
        Err(FlowError::InputFlowEndedPrematurely { .. })
    ));
}

#[tokio::test]
async fn test_reset_without_page_count_fails() {
    let config = FlowConfig::new(DeviceModel::Touch);
    let device = MockDevice::new(touch_screens(&[0, 1, 2]));
    let (mut host, requests) = input_flow_channel();
    let mut driver = FlowDriver::new(device, requests);
    let strategy = ConfirmationStrategy::from_config(&config);

    let flow = run_reset_flow(&mut driver, &strategy, SpotCheckOptions::default());
    let firmware = feed_requests(
        &mut host,
        gen_request_stream(vec![
            ButtonRequest::new(ButtonRequestCode::ResetDevice);
            DIALOG_SCREENS + 1
        ]),
    );

    let (mnemonic, _acked) = tokio::join!(flow, firmware);

    assert!(matches!(mnemonic, Err(FlowError::MissingPageCount { .. })));
    assert_eq!(driver.state(), DriverState::Failed);
}

#[tokio::test]
async fn test_spot_check_beyond_mnemonic_is_out_of_range() {
    let config = FlowConfig::new(DeviceModel::Touch);
    let device = MockDevice::new(touch_screens(&[12]));
    let (mut host, requests) = input_flow_channel();
    let mut driver = FlowDriver::new(device, requests);
    let strategy = ConfirmationStrategy::from_config(&config);

    let flow = run_reset_flow(&mut driver, &strategy, SpotCheckOptions::default());
    let firmware = feed_requests(
        &mut host,
        gen_request_stream(reset_requests(DeviceModel::Touch, 3, 3)),
    );

    let (mnemonic, _acked) = tokio::join!(flow, firmware);

    match mnemonic {
        Err(FlowError::WordIndexOutOfRange { index, word_count }) => {
            assert_eq!(index, 12);
            assert_eq!(word_count, 12);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
