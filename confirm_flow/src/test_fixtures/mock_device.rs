// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque,
          sync::{Arc, PoisonError}};

use async_trait::async_trait;

use crate::{DebugAction, DeviceSession, LayoutLines, StdMutex, SwipeDirection, ok};

#[derive(Debug, Default)]
struct MockDeviceInner {
    screens: VecDeque<LayoutLines>,
    actions: Vec<DebugAction>,
}

/// A [`DeviceSession`] that records every action and serves a queue of screens.
///
/// The first queued screen is the current one. Every action moves to the next queued
/// screen, if there is one, so the last screen stays up. Reading with no screen queued
/// is an error.
///
/// Clones share the same state, so a test can hand one clone to the
/// [`crate::FlowDriver`] and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MockDevice {
    inner: Arc<StdMutex<MockDeviceInner>>,
}

impl MockDevice {
    pub fn new(screens: impl IntoIterator<Item = LayoutLines>) -> Self {
        Self {
            inner: Arc::new(StdMutex::new(MockDeviceInner {
                screens: screens.into_iter().collect(),
                actions: Vec::new(),
            })),
        }
    }

    /// Every action performed so far, in order.
    #[must_use]
    pub fn actions(&self) -> Vec<DebugAction> { self.with_inner(|it| it.actions.clone()) }

    /// Only the values passed to [`DeviceSession::input`].
    #[must_use]
    pub fn typed_values(&self) -> Vec<String> {
        self.with_inner(|it| {
            it.actions
                .iter()
                .filter_map(|action| match action {
                    DebugAction::Input(value) => Some(value.clone()),
                    _ => None,
                })
                .collect()
        })
    }

    /// Screens not yet shown, the current one included.
    #[must_use]
    pub fn screens_left(&self) -> usize { self.with_inner(|it| it.screens.len()) }

    fn with_inner<T>(&self, f: impl FnOnce(&mut MockDeviceInner) -> T) -> T {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut inner)
    }

    fn record(&self, action: DebugAction) {
        self.with_inner(|it| {
            it.actions.push(action);
            if it.screens.len() > 1 {
                it.screens.pop_front();
            }
        });
    }
}

#[async_trait]
impl DeviceSession for MockDevice {
    async fn press_yes(&mut self) -> miette::Result<()> {
        self.record(DebugAction::PressYes);
        ok!()
    }

    async fn press_no(&mut self) -> miette::Result<()> {
        self.record(DebugAction::PressNo);
        ok!()
    }

    async fn press_info(&mut self) -> miette::Result<()> {
        self.record(DebugAction::PressInfo);
        ok!()
    }

    async fn navigate(&mut self, direction: SwipeDirection) -> miette::Result<()> {
        self.record(DebugAction::Navigate(direction));
        ok!()
    }

    async fn input(&mut self, value: &str) -> miette::Result<()> {
        self.record(DebugAction::input(value));
        ok!()
    }

    async fn read_layout(&mut self) -> miette::Result<LayoutLines> {
        self.with_inner(|it| it.screens.front().cloned())
            .ok_or_else(|| miette::miette!("No screen is being shown"))
    }
}
