// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result as FmtResult};

use smallvec::SmallVec;

use crate::{ButtonRequest, ButtonRequestCode, DebugAction, PageCount};

/// What the next request must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expectation {
    /// Any request. Used where the device shows one of several screens that are told
    /// apart only by their position in the flow.
    Any,
    Code(ButtonRequestCode),
    CodeAndPages(ButtonRequestCode, PageCount),
}

impl Expectation {
    #[must_use]
    pub fn matches(self, request: &ButtonRequest) -> bool {
        match self {
            Expectation::Any => true,
            Expectation::Code(code) => request.code == code,
            Expectation::CodeAndPages(code, pages) => {
                request.code == code && request.pages == pages
            }
        }
    }
}

impl Display for Expectation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Expectation::Any => write!(f, "any request"),
            Expectation::Code(code) => write!(f, "{code}"),
            Expectation::CodeAndPages(code, pages) => write!(f, "{code} with pages={pages}"),
        }
    }
}

/// Actions of one step. Most steps press one or two buttons.
pub type StepActions = SmallVec<[DebugAction; 2]>;

/// One suspension and the actions performed once it resumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    pub expectation: Expectation,
    pub actions: StepActions,
}

/// An ordered list of [`ScriptStep`]s, consumed by [`crate::FlowDriver::run_script`].
/// There is no cursor in here: a script is replayed only by building it again.
///
/// ```
/// use r3bl_confirm_flow::{ButtonRequestCode, DebugAction, Expectation, FlowScript};
///
/// let script = FlowScript::new()
///     .step(Expectation::Any, [DebugAction::PressYes])
///     .step(
///         Expectation::Code(ButtonRequestCode::MnemonicWordCount),
///         [DebugAction::input("12")],
///     );
/// assert_eq!(script.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowScript {
    steps: Vec<ScriptStep>,
}

impl FlowScript {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn step(
        mut self,
        expectation: Expectation,
        actions: impl IntoIterator<Item = DebugAction>,
    ) -> Self {
        self.push(expectation, actions);
        self
    }

    pub fn push(
        &mut self,
        expectation: Expectation,
        actions: impl IntoIterator<Item = DebugAction>,
    ) {
        self.steps.push(ScriptStep {
            expectation,
            actions: actions.into_iter().collect(),
        });
    }

    /// Append the actions to the last step, eg: a button pressed after typing.
    pub fn extend_last(&mut self, actions: impl IntoIterator<Item = DebugAction>) {
        if let Some(last) = self.steps.last_mut() {
            last.actions.extend(actions);
        }
    }

    #[must_use]
    pub fn then(mut self, other: FlowScript) -> Self {
        self.steps.extend(other.steps);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize { self.steps.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.steps.is_empty() }

    #[must_use]
    pub fn steps(&self) -> &[ScriptStep] { &self.steps }

    #[must_use]
    pub fn into_steps(self) -> Vec<ScriptStep> { self.steps }
}
