// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Reveal a freshly generated mnemonic, read it off the screen, and answer the spot
//! check questions that follow.

use tracing::{debug, info, instrument};

use crate::{ButtonRequestCode, DEFAULT_SPOT_CHECK_ROUNDS, DeviceModel, DeviceSession,
            FlowConfig, FlowDriver, FlowError, SecretConfirmation, click_through, ok};

/// Dialogs before the mnemonic is shown: confirm reset, back up your seed, and the
/// never-make-a-digital-copy warning.
pub const RESET_PRELIMINARY_SCREENS: usize = 3;

/// Success dialogs after the spot check: seed check passed, then device ready.
pub const RESET_SUCCESS_SCREENS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotCheckOptions {
    /// Dialogs [`run_reset_flow`] accepts before the mnemonic is revealed.
    pub preliminary_screens: usize,
    pub rounds: usize,
    /// Answer the first spot check with the word right after the requested one (modulo
    /// the word count), then stop. Simulates operator error.
    pub choose_wrong: bool,
}

impl Default for SpotCheckOptions {
    fn default() -> Self {
        Self {
            preliminary_screens: RESET_PRELIMINARY_SCREENS,
            rounds: DEFAULT_SPOT_CHECK_ROUNDS,
            choose_wrong: false,
        }
    }
}

impl SpotCheckOptions {
    #[must_use]
    pub fn from_config(config: &FlowConfig) -> Self {
        Self {
            preliminary_screens: config.preliminary_screens,
            rounds: config.spot_check_rounds,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn choose_wrong(mut self) -> Self {
        self.choose_wrong = true;
        self
    }
}

/// Read the mnemonic off the paginated screen and pass the spot check.
///
/// The first request must announce a known page count. Returns the mnemonic as one
/// space separated string, or `None` when [`SpotCheckOptions::choose_wrong`] is set. In
/// that case the driver is abandoned right after the wrong word is typed, without
/// finishing the remaining rounds.
///
/// # Errors
///
/// - [`FlowError::MissingPageCount`] if the first request has no known page count.
/// - [`FlowError::WordIndexOutOfRange`] if a spot check asks for a word that wasn't
///   shown.
/// - Any error of the strategy or driver.
#[instrument(skip_all, fields(rounds = options.rounds, choose_wrong = options.choose_wrong))]
pub async fn read_and_confirm_mnemonic<D, S>(
    driver: &mut FlowDriver<D>,
    strategy: &S,
    options: SpotCheckOptions,
) -> Result<Option<String>, FlowError>
where
    D: DeviceSession,
    S: SecretConfirmation,
{
    let request = driver.expect_any().await?;
    let Some(pages) = request.pages.known() else {
        return Err(driver.fail(FlowError::MissingPageCount {
            actual: request.to_string(),
        }));
    };

    let mnemonic = strategy.read_pages(driver, pages).await?;

    for round in 0..options.rounds {
        let index = strategy.await_spot_check(driver).await?;
        let Some(word) = mnemonic.get(index) else {
            return Err(driver.fail(FlowError::WordIndexOutOfRange {
                index,
                word_count: mnemonic.len(),
            }));
        };
        debug!(message = "spot check", round, index);

        if options.choose_wrong {
            let wrong_word = &mnemonic[(index + 1) % mnemonic.len()];
            driver.input(wrong_word).await?;
            driver.abandon();
            return ok!(None);
        }

        strategy.submit_word(driver, word).await?;
    }

    ok!(Some(mnemonic.join(" ")))
}

/// The whole device reset: [`SpotCheckOptions::preliminary_screens`] dialogs, mnemonic
/// backup with spot check, then the success dialogs. Completes the driver and returns
/// the mnemonic, or `None` when choosing a wrong word on purpose.
///
/// # Errors
///
/// The first error of any step.
#[instrument(skip_all)]
pub async fn run_reset_flow<D, S>(
    driver: &mut FlowDriver<D>,
    strategy: &S,
    options: SpotCheckOptions,
) -> Result<Option<String>, FlowError>
where
    D: DeviceSession,
    S: SecretConfirmation,
{
    click_through(
        driver,
        options.preliminary_screens,
        Some(ButtonRequestCode::ResetDevice),
    )
    .await?;

    let Some(mnemonic) = read_and_confirm_mnemonic(driver, strategy, options).await? else {
        return ok!(None);
    };

    click_through(driver, RESET_SUCCESS_SCREENS, Some(ButtonRequestCode::Success)).await?;

    let consumed = driver.complete()?;
    info!(message = "reset flow completed", consumed);
    ok!(Some(mnemonic))
}

/// The requests the host sees during [`run_reset_flow`] on the given device model.
/// Two button devices send one extra request per spot check round.
#[must_use]
pub fn reset_expected_responses(config: &FlowConfig) -> Vec<ButtonRequestCode> {
    let spot_check_requests = match config.model {
        DeviceModel::Touch => 0,
        DeviceModel::TwoButton => config.spot_check_rounds,
    };
    let reset_device_count = config.preliminary_screens + 1 + spot_check_requests;

    std::iter::repeat_n(ButtonRequestCode::ResetDevice, reset_device_count)
        .chain(std::iter::repeat_n(
            ButtonRequestCode::Success,
            RESET_SUCCESS_SCREENS,
        ))
        .collect()
}

#[cfg(test)]
mod tests_backup {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case(DeviceModel::Touch, 4)]
    #[test_case(DeviceModel::TwoButton, 7)]
    fn test_reset_expected_responses(model: DeviceModel, reset_device_count: usize) {
        let codes = reset_expected_responses(&FlowConfig::new(model));

        assert_eq!(codes.len(), reset_device_count + 2);
        assert!(
            codes[..reset_device_count]
                .iter()
                .all(|it| *it == ButtonRequestCode::ResetDevice)
        );
        assert_eq!(
            &codes[reset_device_count..],
            &[ButtonRequestCode::Success, ButtonRequestCode::Success]
        );
    }

    #[test]
    fn test_spot_check_options() {
        let config = FlowConfig {
            spot_check_rounds: 5,
            preliminary_screens: 1,
            ..FlowConfig::default()
        };
        let options = SpotCheckOptions::from_config(&config).choose_wrong();
        assert_eq!(
            options,
            SpotCheckOptions {
                preliminary_screens: 1,
                rounds: 5,
                choose_wrong: true
            }
        );
    }

    #[test]
    fn test_reset_expected_responses_follow_preliminary_screens() {
        let config = FlowConfig {
            preliminary_screens: 1,
            ..FlowConfig::new(DeviceModel::Touch)
        };
        assert_eq!(
            reset_expected_responses(&config),
            vec![
                ButtonRequestCode::ResetDevice,
                ButtonRequestCode::ResetDevice,
                ButtonRequestCode::Success,
                ButtonRequestCode::Success,
            ]
        );
    }
}
