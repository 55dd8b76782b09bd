// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ButtonRequest, ButtonRequestCode, ContentKind, InteractionTransport, Layout,
            LayoutResult, PageCount, button_request};

/// Decide how many pages `kind` is announced with. First match wins:
///
/// 1. In an unknown flow: [`PageCount::Unknown`] (`0` on the wire).
/// 2. Known page count greater than one: [`PageCount::Known`].
/// 3. Anything else, including a known count of exactly one: [`PageCount::Single`].
#[must_use]
pub fn negotiate(kind: ContentKind, code: ButtonRequestCode) -> ButtonRequest {
    let pages = if kind.is_in_unknown_flow() {
        PageCount::Unknown
    } else if kind.has_known_page_count() && kind.page_count() > 1 {
        PageCount::Known(kind.page_count())
    } else {
        PageCount::Single
    };
    ButtonRequest::with_pages(code, pages)
}

/// Announce `layout` with exactly one negotiated [`ButtonRequest`], then wait for the
/// user to leave it. For an unknown flow the wait lasts until the terminal acknowledge,
/// however many pages that takes.
///
/// # Errors
///
/// Returns an error if the round trip fails, or if the layout fails while waiting.
pub async fn interact<T, L>(
    transport: &mut T,
    layout: &mut L,
    br_type: &str,
    code: ButtonRequestCode,
) -> miette::Result<LayoutResult>
where
    T: InteractionTransport + ?Sized,
    L: Layout + ?Sized,
{
    let request = negotiate(layout.content_kind(), code);
    button_request(transport, br_type, request.code, request.pages).await?;
    layout.wait().await
}
