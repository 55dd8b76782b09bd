// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::IntoDiagnostic;
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_WORDS_PER_PAGE, RESET_PRELIMINARY_SCREENS, split_share_into_pages};

/// Number of words the device asks the user to re-confirm after a backup.
pub const DEFAULT_SPOT_CHECK_ROUNDS: usize = 3;

/// Screen refreshes a two button device is given to land on the requested word.
pub const DEFAULT_SEARCH_BOUND: usize = 3;

/// Input affordance of the device under test. Selects the
/// [`crate::ConfirmationStrategy`] used to read and re-confirm a mnemonic.
///
/// Parses from both the long name and the single letter model name, so `"T"` and
/// `"Touch"` are equivalent.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum DeviceModel {
    /// Touch screen, swipes between pages and types words directly.
    #[default]
    #[serde(alias = "T")]
    #[strum(to_string = "Touch", serialize = "T")]
    Touch,
    /// Two buttons, cycles through pages and choices with the right button.
    #[serde(alias = "R")]
    #[strum(to_string = "TwoButton", serialize = "R")]
    TwoButton,
}

/// Knobs for a whole interaction session. Every field has a default, so a partial JSON
/// document is enough:
///
/// ```
/// use r3bl_confirm_flow::{DeviceModel, FlowConfig};
///
/// let config = FlowConfig::try_from_json_str(r#"{ "model": "R" }"#).unwrap();
/// assert_eq!(config.model, DeviceModel::TwoButton);
/// assert_eq!(config.spot_check_rounds, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub model: DeviceModel,
    pub words_per_page: usize,
    pub spot_check_rounds: usize,
    pub search_bound: usize,
    /// Dialogs accepted before a reset reveals the mnemonic.
    pub preliminary_screens: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            model: DeviceModel::default(),
            words_per_page: DEFAULT_WORDS_PER_PAGE,
            spot_check_rounds: DEFAULT_SPOT_CHECK_ROUNDS,
            search_bound: DEFAULT_SEARCH_BOUND,
            preliminary_screens: RESET_PRELIMINARY_SCREENS,
        }
    }
}

impl FlowConfig {
    #[must_use]
    pub fn new(model: DeviceModel) -> Self {
        Self {
            model,
            ..Default::default()
        }
    }

    /// Pages of the mnemonic backup screen, [`FlowConfig::words_per_page`] words each.
    #[must_use]
    pub fn split_into_pages<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        split_share_into_pages(words, self.words_per_page)
    }

    /// # Errors
    ///
    /// Returns an error if `json` is not a valid [`FlowConfig`] document.
    pub fn try_from_json_str(json: &str) -> miette::Result<Self> {
        serde_json::from_str(json).into_diagnostic()
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn try_to_json_string(&self) -> miette::Result<String> {
        serde_json::to_string_pretty(self).into_diagnostic()
    }
}

#[cfg(test)]
mod tests_config {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("T", DeviceModel::Touch)]
    #[test_case("Touch", DeviceModel::Touch)]
    #[test_case("R", DeviceModel::TwoButton)]
    #[test_case("TwoButton", DeviceModel::TwoButton)]
    fn test_device_model_from_str(input: &str, expected: DeviceModel) {
        assert_eq!(DeviceModel::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_device_model_display_uses_long_name() {
        assert_eq!(DeviceModel::TwoButton.to_string(), "TwoButton");
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config =
            FlowConfig::try_from_json_str(r#"{ "model": "R", "search_bound": 5 }"#)
                .unwrap();
        assert_eq!(
            config,
            FlowConfig {
                model: DeviceModel::TwoButton,
                words_per_page: 4,
                spot_check_rounds: 3,
                search_bound: 5,
                preliminary_screens: 3,
            }
        );
    }

    #[test]
    fn test_json_keeps_settings() {
        let config = FlowConfig::new(DeviceModel::TwoButton);
        let json = config.try_to_json_string().unwrap();
        assert_eq!(FlowConfig::try_from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_split_into_pages_uses_words_per_page() {
        let config = FlowConfig {
            words_per_page: 6,
            ..FlowConfig::default()
        };
        let words = crate::test_fixtures::MNEMONIC12.split(' ').collect::<Vec<_>>();
        assert_eq!(config.split_into_pages(&words).len(), 2);
        assert_eq!(FlowConfig::default().split_into_pages(&words).len(), 3);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(FlowConfig::try_from_json_str(r#"{ "model": "X" }"#).is_err());
    }
}
