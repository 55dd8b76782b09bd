// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use async_trait::async_trait;
use tracing::debug;

use crate::{DEFAULT_SEARCH_BOUND, DeviceSession, FlowDriver, FlowError, SecretConfirmation,
            ok};

/// Two button devices. Press right through every page (there is no separate
/// confirmation page), then for each spot check wait for its request and cycle through
/// the offered words until the requested one is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclicSearch {
    /// How many highlighted words are inspected before giving up. Zero is treated as
    /// one, so the current word is always looked at.
    pub search_bound: usize,
}

impl Default for CyclicSearch {
    fn default() -> Self { Self::new(DEFAULT_SEARCH_BOUND) }
}

impl CyclicSearch {
    #[must_use]
    pub fn new(search_bound: usize) -> Self { Self { search_bound } }
}

#[async_trait]
impl SecretConfirmation for CyclicSearch {
    async fn read_pages<D: DeviceSession>(
        &self,
        driver: &mut FlowDriver<D>,
        pages: u32,
    ) -> Result<Vec<String>, FlowError> {
        let mut words = Vec::new();

        for _ in 0..pages {
            words.extend(driver.read_layout().await?.mnemonic_words());
            driver.press_right().await?;
        }

        debug!(message = "read mnemonic", pages, words = words.len());
        ok!(words)
    }

    async fn await_spot_check<D: DeviceSession>(
        &self,
        driver: &mut FlowDriver<D>,
    ) -> Result<usize, FlowError> {
        driver.expect_any().await?;
        let layout = driver.read_layout().await?;
        layout.word_index().map_err(|error| driver.fail(error))
    }

    async fn submit_word<D: DeviceSession>(
        &self,
        driver: &mut FlowDriver<D>,
        word: &str,
    ) -> Result<(), FlowError> {
        let search_bound = self.search_bound.max(1);
        for attempt in 0..search_bound {
            let layout = driver.read_layout().await?;
            let highlighted = match layout.current_word() {
                Ok(it) => it,
                Err(error) => return Err(driver.fail(error)),
            };

            if highlighted == word {
                debug!(message = "found word", word, attempt);
                return driver.input(word).await;
            }

            driver.press_right().await?;
        }

        Err(driver.fail(FlowError::NavigationExhausted {
            target: word.to_string(),
            attempts: search_bound,
        }))
    }
}
