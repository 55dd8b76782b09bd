// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Scripts that type a secret back into a device: threshold share recovery and single
//! mnemonic recovery.

use std::fmt::{Display, Formatter, Result as FmtResult};

use tracing::{info, instrument};

use crate::{ButtonRequestCode, DebugAction, DeviceModel, DeviceSession, Expectation,
            FlowDriver, FlowError, FlowScript, ok};

/// One share (or one plain mnemonic): its words in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretShare {
    words: Vec<String>,
}

impl SecretShare {
    pub fn new(words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Split on whitespace.
    #[must_use]
    pub fn parse(text: &str) -> Self { Self::new(text.split_whitespace()) }

    #[must_use]
    pub fn words(&self) -> &[String] { &self.words }

    #[must_use]
    pub fn word_count(&self) -> usize { self.words.len() }
}

impl Display for SecretShare {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult { write!(f, "{}", self.words.join(" ")) }
}

/// The shares typed in one recovery attempt. Never empty, and every share has the same
/// word count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareSet {
    shares: Vec<SecretShare>,
}

impl ShareSet {
    /// # Errors
    ///
    /// [`FlowError::InvalidShareSet`] if there are no shares, if a share is empty, or if
    /// the word counts differ.
    pub fn try_new(shares: Vec<SecretShare>) -> Result<Self, FlowError> {
        let Some(first) = shares.first() else {
            return Err(FlowError::InvalidShareSet {
                reason: "no shares given".to_string(),
            });
        };

        let word_count = first.word_count();
        if word_count == 0 {
            return Err(FlowError::InvalidShareSet {
                reason: "share 1 has no words".to_string(),
            });
        }

        if let Some((position, share)) = shares
            .iter()
            .enumerate()
            .find(|(_, share)| share.word_count() != word_count)
        {
            return Err(FlowError::InvalidShareSet {
                reason: format!(
                    "share {} has {} words, share 1 has {word_count}",
                    position + 1,
                    share.word_count()
                ),
            });
        }

        ok!(Self { shares })
    }

    /// # Errors
    ///
    /// See [`try_new`](Self::try_new).
    pub fn try_from_strs<S: AsRef<str>>(shares: &[S]) -> Result<Self, FlowError> {
        Self::try_new(
            shares
                .iter()
                .map(|it| SecretShare::parse(it.as_ref()))
                .collect(),
        )
    }

    #[must_use]
    pub fn shares(&self) -> &[SecretShare] { &self.shares }

    #[must_use]
    pub fn word_count(&self) -> usize { self.shares[0].word_count() }

    #[must_use]
    pub fn len(&self) -> usize { self.shares.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.shares.is_empty() }
}

/// When to take the detour through the info panel after a share is entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InfoDetour {
    #[default]
    Never,
    FirstShareOnly,
    EveryShare,
}

impl InfoDetour {
    #[must_use]
    pub fn applies_to(self, share_index: usize) -> bool {
        match self {
            InfoDetour::Never => false,
            InfoDetour::FirstShareOnly => share_index == 0,
            InfoDetour::EveryShare => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RecoveryOptions {
    /// Shares belong to groups, so the device confirms each entered share.
    pub groups: bool,
    pub info: InfoDetour,
}

/// The script that enters every share of `shares`, starting on the recovery homescreen.
///
/// Request sequence:
/// 1. homescreen, press yes.
/// 2. word count, type it.
/// 3. homescreen, press yes.
/// 4. per share: the share entry request (type each word), a group confirmation when
///    [`RecoveryOptions::groups`] is set, and the continue (or success) homescreen. With
///    an info detour the homescreen opens the info panel, which takes one more request
///    to scroll, close, and continue.
///
/// The group confirmation and the homescreens after a share only differ by their
/// position, so they accept any request.
#[must_use]
pub fn recovery_enter_shares(shares: &ShareSet, options: RecoveryOptions) -> FlowScript {
    let mut script = FlowScript::new()
        .step(
            Expectation::Code(ButtonRequestCode::RecoveryHomepage),
            [DebugAction::PressYes],
        )
        .step(
            Expectation::Code(ButtonRequestCode::MnemonicWordCount),
            [DebugAction::input(shares.word_count().to_string())],
        )
        .step(
            Expectation::Code(ButtonRequestCode::RecoveryHomepage),
            [DebugAction::PressYes],
        );

    for (share_index, share) in shares.shares().iter().enumerate() {
        script.push(
            Expectation::Code(ButtonRequestCode::MnemonicInput),
            share.words().iter().map(DebugAction::input),
        );

        if options.groups {
            script.push(Expectation::Any, [DebugAction::PressYes]);
        }

        if options.info.applies_to(share_index) {
            script.push(Expectation::Any, [DebugAction::PressInfo]);
            script.push(
                Expectation::Any,
                [
                    DebugAction::SWIPE_UP,
                    DebugAction::PressYes,
                    DebugAction::PressYes,
                ],
            );
        } else {
            script.push(Expectation::Any, [DebugAction::PressYes]);
        }
    }

    script
}

/// Run [`recovery_enter_shares`] to the end and complete the driver. Returns the number
/// of requests consumed.
///
/// # Errors
///
/// The first error of [`FlowDriver::run_script`].
#[instrument(skip_all, fields(shares = shares.len(), groups = options.groups))]
pub async fn run_share_recovery<D: DeviceSession>(
    driver: &mut FlowDriver<D>,
    shares: &ShareSet,
    options: RecoveryOptions,
) -> Result<usize, FlowError> {
    driver
        .run_script(recovery_enter_shares(shares, options))
        .await?;
    let consumed = driver.complete()?;
    info!(message = "share recovery completed", consumed);
    ok!(consumed)
}

/// The script that recovers a single mnemonic, starting at the recovery confirmation.
///
/// Touch devices take the whole word list in one entry request. Two button devices
/// send the word count request twice and one entry request per word, after an opening
/// entry request.
#[must_use]
pub fn recover_mnemonic_script(model: DeviceModel, mnemonic: &SecretShare) -> FlowScript {
    let word_count = mnemonic.word_count().to_string();
    let mut script = FlowScript::new()
        .step(
            Expectation::Code(ButtonRequestCode::ProtectCall),
            [DebugAction::PressYes],
        )
        .step(
            Expectation::Code(ButtonRequestCode::RecoveryHomepage),
            [DebugAction::PressYes],
        );

    match model {
        DeviceModel::Touch => {
            script.push(
                Expectation::Code(ButtonRequestCode::MnemonicWordCount),
                [DebugAction::input(word_count)],
            );
            script.push(
                Expectation::Code(ButtonRequestCode::RecoveryHomepage),
                [DebugAction::PressYes],
            );
            script.push(
                Expectation::Code(ButtonRequestCode::MnemonicInput),
                mnemonic.words().iter().map(DebugAction::input),
            );
        }
        DeviceModel::TwoButton => {
            script.push(Expectation::Code(ButtonRequestCode::MnemonicWordCount), []);
            script.push(
                Expectation::Code(ButtonRequestCode::MnemonicWordCount),
                [DebugAction::input(word_count)],
            );
            script.push(
                Expectation::Code(ButtonRequestCode::RecoveryHomepage),
                [DebugAction::PressYes],
            );
            script.push(Expectation::Code(ButtonRequestCode::MnemonicInput), []);
            for word in mnemonic.words() {
                script.push(
                    Expectation::Code(ButtonRequestCode::MnemonicInput),
                    [DebugAction::input(word)],
                );
            }
        }
    }

    script.step(
        Expectation::Code(ButtonRequestCode::Success),
        [DebugAction::PressYes],
    )
}

/// Type `mnemonic` back into a wiped device and complete the driver. Returns the number
/// of requests consumed.
///
/// # Errors
///
/// - [`FlowError::InvalidShareSet`] if `mnemonic` has no words.
/// - The first error of [`FlowDriver::run_script`].
#[instrument(skip_all, fields(model = %model))]
pub async fn recover_mnemonic<D: DeviceSession>(
    driver: &mut FlowDriver<D>,
    model: DeviceModel,
    mnemonic: &str,
) -> Result<usize, FlowError> {
    let shares = ShareSet::try_from_strs(&[mnemonic])?;
    let Some(mnemonic) = shares.shares().first() else {
        return Err(FlowError::InvalidShareSet {
            reason: "no shares given".to_string(),
        });
    };

    driver
        .run_script(recover_mnemonic_script(model, mnemonic))
        .await?;
    let consumed = driver.complete()?;
    info!(message = "mnemonic recovery completed", consumed);
    ok!(consumed)
}

/// The requests the host sees during [`recover_mnemonic`].
#[must_use]
pub fn recover_expected_responses(
    model: DeviceModel,
    word_count: usize,
) -> Vec<ButtonRequestCode> {
    let (word_count_requests, input_requests) = match model {
        DeviceModel::Touch => (1, 1),
        DeviceModel::TwoButton => (2, word_count + 1),
    };

    let mut codes = vec![
        ButtonRequestCode::ProtectCall,
        ButtonRequestCode::RecoveryHomepage,
    ];
    codes.extend(std::iter::repeat_n(
        ButtonRequestCode::MnemonicWordCount,
        word_count_requests,
    ));
    codes.push(ButtonRequestCode::RecoveryHomepage);
    codes.extend(std::iter::repeat_n(
        ButtonRequestCode::MnemonicInput,
        input_requests,
    ));
    codes.push(ButtonRequestCode::Success);
    codes
}
