// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Why the device is asking for a confirmation. The discriminants are the wire values.
///
/// Value `14` (the old passphrase type prompt) is retired and never sent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[repr(u32)]
pub enum ButtonRequestCode {
    Other = 1,
    FeeOverThreshold = 2,
    ConfirmOutput = 3,
    ResetDevice = 4,
    ConfirmWord = 5,
    WipeDevice = 6,
    ProtectCall = 7,
    SignTx = 8,
    FirmwareCheck = 9,
    Address = 10,
    PublicKey = 11,
    MnemonicWordCount = 12,
    MnemonicInput = 13,
    UnknownDerivationPath = 15,
    RecoveryHomepage = 16,
    Success = 17,
    Warning = 18,
    PassphraseEntry = 19,
    PinEntry = 20,
}

impl ButtonRequestCode {
    #[must_use]
    pub fn wire_value(self) -> u32 { self as u32 }

    /// Returns `None` for values that don't name a code, including the retired `14`.
    #[must_use]
    pub fn from_wire_value(value: u32) -> Option<Self> {
        use ButtonRequestCode::{Address, ConfirmOutput, ConfirmWord, FeeOverThreshold,
                                FirmwareCheck, MnemonicInput, MnemonicWordCount, Other,
                                PassphraseEntry, PinEntry, ProtectCall, PublicKey,
                                RecoveryHomepage, ResetDevice, SignTx, Success,
                                UnknownDerivationPath, Warning, WipeDevice};
        Some(match value {
            1 => Other,
            2 => FeeOverThreshold,
            3 => ConfirmOutput,
            4 => ResetDevice,
            5 => ConfirmWord,
            6 => WipeDevice,
            7 => ProtectCall,
            8 => SignTx,
            9 => FirmwareCheck,
            10 => Address,
            11 => PublicKey,
            12 => MnemonicWordCount,
            13 => MnemonicInput,
            15 => UnknownDerivationPath,
            16 => RecoveryHomepage,
            17 => Success,
            18 => Warning,
            19 => PassphraseEntry,
            20 => PinEntry,
            _ => return None,
        })
    }
}

/// How many pages a request announces. On the wire this is an optional integer where
/// absence and `0` mean different things:
///
/// | Wire      | [`PageCount`]         | Meaning                                      |
/// | :-------- | :-------------------- | :------------------------------------------- |
/// | absent    | [`PageCount::Single`]  | one page, one acknowledge                    |
/// | `0`       | [`PageCount::Unknown`] | paginate until told otherwise                |
/// | `n`       | [`PageCount::Known`]   | exactly `n` pages, pre-committed             |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageCount {
    #[default]
    Single,
    Unknown,
    Known(u32),
}

impl PageCount {
    #[must_use]
    pub fn from_wire(pages: Option<u32>) -> Self {
        match pages {
            None => PageCount::Single,
            Some(0) => PageCount::Unknown,
            Some(count) => PageCount::Known(count),
        }
    }

    #[must_use]
    pub fn to_wire(self) -> Option<u32> {
        match self {
            PageCount::Single => None,
            PageCount::Unknown => Some(0),
            PageCount::Known(count) => Some(count),
        }
    }

    /// The committed page count, if there is one.
    #[must_use]
    pub fn known(self) -> Option<u32> {
        match self {
            PageCount::Known(count) => Some(count),
            PageCount::Single | PageCount::Unknown => None,
        }
    }
}

impl Display for PageCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PageCount::Single => write!(f, "single"),
            PageCount::Unknown => write!(f, "unknown"),
            PageCount::Known(count) => write!(f, "{count}"),
        }
    }
}

/// The device asks the host to acknowledge one interaction. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonRequest {
    pub code: ButtonRequestCode,
    pub pages: PageCount,
}

impl ButtonRequest {
    #[must_use]
    pub fn new(code: ButtonRequestCode) -> Self {
        Self {
            code,
            pages: PageCount::Single,
        }
    }

    #[must_use]
    pub fn with_pages(code: ButtonRequestCode, pages: PageCount) -> Self {
        Self { code, pages }
    }
}

impl Display for ButtonRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "ButtonRequest(code={}, pages={})", self.code, self.pages)
    }
}

/// Permission for the device to move on to the next interaction. Carries nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ButtonAck;
