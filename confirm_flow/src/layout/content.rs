// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use async_trait::async_trait;

/// What the rendering collaborator knows about the pagination of a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Fits on one page.
    Simple,
    /// Reports a fixed page count.
    KnownPages(u32),
    /// Mid way through a flow whose page count is only discovered while paging.
    UnknownFlow,
}

impl ContentKind {
    #[must_use]
    pub fn has_known_page_count(self) -> bool { matches!(self, ContentKind::KnownPages(_)) }

    /// `1` for anything that doesn't report a page count.
    #[must_use]
    pub fn page_count(self) -> u32 {
        match self {
            ContentKind::KnownPages(count) => count,
            ContentKind::Simple | ContentKind::UnknownFlow => 1,
        }
    }

    #[must_use]
    pub fn is_in_unknown_flow(self) -> bool { matches!(self, ContentKind::UnknownFlow) }
}

/// How the user left a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutResult {
    Confirmed,
    Cancelled,
    Info,
    /// Text entered on the layout, eg: a word count or a mnemonic word.
    Value(String),
}

impl LayoutResult {
    #[must_use]
    pub fn is_confirmed(&self) -> bool { matches!(self, LayoutResult::Confirmed) }
}

/// A rendered interaction surface, owned by the rendering collaborator. This crate only
/// reads its [`ContentKind`] and waits for it to finish.
#[async_trait]
pub trait Layout: Send {
    fn content_kind(&self) -> ContentKind;

    /// Resolves once the user has left the layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is torn down before the user answers.
    async fn wait(&mut self) -> miette::Result<LayoutResult>;
}
