// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use async_trait::async_trait;

use crate::{ContentKind, Layout, LayoutResult, ok};

/// A [`Layout`] that reports a fixed [`ContentKind`] and resolves every wait with the
/// same [`LayoutResult`].
#[derive(Debug, Clone)]
pub struct MockLayout {
    kind: ContentKind,
    result: LayoutResult,
    wait_count: usize,
}

impl MockLayout {
    #[must_use]
    pub fn new(kind: ContentKind, result: LayoutResult) -> Self {
        Self {
            kind,
            result,
            wait_count: 0,
        }
    }

    #[must_use]
    pub fn wait_count(&self) -> usize { self.wait_count }
}

#[async_trait]
impl Layout for MockLayout {
    fn content_kind(&self) -> ContentKind { self.kind }

    async fn wait(&mut self) -> miette::Result<LayoutResult> {
        self.wait_count += 1;
        ok!(self.result.clone())
    }
}
