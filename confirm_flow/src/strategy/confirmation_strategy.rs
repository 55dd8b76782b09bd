// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use async_trait::async_trait;

use crate::{CyclicSearch, DeviceModel, DeviceSession, DirectSelection, FlowConfig,
            FlowDriver, FlowError};

/// How a device model shows a freshly generated mnemonic and asks for words back.
///
/// [`crate::read_and_confirm_mnemonic`] calls these in order: [`read_pages`] once, then
/// [`await_spot_check`] and [`submit_word`] once per spot check round.
///
/// [`read_pages`]: Self::read_pages
/// [`await_spot_check`]: Self::await_spot_check
/// [`submit_word`]: Self::submit_word
#[async_trait]
pub trait SecretConfirmation: Send + Sync {
    /// Read every word off the `pages` pages of the mnemonic screen, and leave the
    /// device on the first spot check.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver or device fails.
    async fn read_pages<D: DeviceSession>(
        &self,
        driver: &mut FlowDriver<D>,
        pages: u32,
    ) -> Result<Vec<String>, FlowError>;

    /// Wait for the next spot check (if the model sends a request for it) and return the
    /// 0-based index of the word it asks for.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt can't be parsed, or if the driver or device fails.
    async fn await_spot_check<D: DeviceSession>(
        &self,
        driver: &mut FlowDriver<D>,
    ) -> Result<usize, FlowError>;

    /// Answer the current spot check with `word`.
    ///
    /// # Errors
    ///
    /// Returns an error if the word can't be selected, or if the driver or device fails.
    async fn submit_word<D: DeviceSession>(
        &self,
        driver: &mut FlowDriver<D>,
        word: &str,
    ) -> Result<(), FlowError>;
}

/// Picked once per session from [`FlowConfig::model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationStrategy {
    Direct(DirectSelection),
    Cyclic(CyclicSearch),
}

impl ConfirmationStrategy {
    #[must_use]
    pub fn from_config(config: &FlowConfig) -> Self {
        match config.model {
            DeviceModel::Touch => ConfirmationStrategy::Direct(DirectSelection),
            DeviceModel::TwoButton => {
                ConfirmationStrategy::Cyclic(CyclicSearch::new(config.search_bound))
            }
        }
    }

    #[must_use]
    pub fn model(&self) -> DeviceModel {
        match self {
            ConfirmationStrategy::Direct(_) => DeviceModel::Touch,
            ConfirmationStrategy::Cyclic(_) => DeviceModel::TwoButton,
        }
    }
}

#[async_trait]
impl SecretConfirmation for ConfirmationStrategy {
    async fn read_pages<D: DeviceSession>(
        &self,
        driver: &mut FlowDriver<D>,
        pages: u32,
    ) -> Result<Vec<String>, FlowError> {
        match self {
            ConfirmationStrategy::Direct(it) => it.read_pages(driver, pages).await,
            ConfirmationStrategy::Cyclic(it) => it.read_pages(driver, pages).await,
        }
    }

    async fn await_spot_check<D: DeviceSession>(
        &self,
        driver: &mut FlowDriver<D>,
    ) -> Result<usize, FlowError> {
        match self {
            ConfirmationStrategy::Direct(it) => it.await_spot_check(driver).await,
            ConfirmationStrategy::Cyclic(it) => it.await_spot_check(driver).await,
        }
    }

    async fn submit_word<D: DeviceSession>(
        &self,
        driver: &mut FlowDriver<D>,
        word: &str,
    ) -> Result<(), FlowError> {
        match self {
            ConfirmationStrategy::Direct(it) => it.submit_word(driver, word).await,
            ConfirmationStrategy::Cyclic(it) => it.submit_word(driver, word).await,
        }
    }
}
