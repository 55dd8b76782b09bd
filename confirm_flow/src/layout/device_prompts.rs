// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Device side prompts of the backup and recovery workflows. Each one announces its
//! layout through [`interact`], so the host sees exactly the requests that a flow script
//! in [`crate::flows`] expects.

use tracing::debug;

use crate::{ButtonRequestCode, InteractionTransport, Layout, LayoutResult, PageCount,
            button_request, interact};

/// Show the mnemonic (or one share of it). The layout reports the page count.
///
/// # Errors
///
/// Returns an error if the interaction fails.
pub async fn show_share_words<T, L>(transport: &mut T, layout: &mut L) -> miette::Result<()>
where
    T: InteractionTransport + ?Sized,
    L: Layout + ?Sized,
{
    interact(transport, layout, "backup_words", ButtonRequestCode::ResetDevice).await?;
    Ok(())
}

/// Generic yes / no confirmation. Returns `true` if the user confirmed.
///
/// # Errors
///
/// Returns an error if the interaction fails.
pub async fn confirm_action<T, L>(
    transport: &mut T,
    layout: &mut L,
    br_type: &str,
    code: ButtonRequestCode,
) -> miette::Result<bool>
where
    T: InteractionTransport + ?Sized,
    L: Layout + ?Sized,
{
    let result = interact(transport, layout, br_type, code).await?;
    Ok(result.is_confirmed())
}

/// Never-make-a-digital-copy warning shown before the mnemonic.
///
/// # Errors
///
/// Returns an error if the interaction fails.
pub async fn show_warning_backup<T, L>(
    transport: &mut T,
    layout: &mut L,
) -> miette::Result<bool>
where
    T: InteractionTransport + ?Sized,
    L: Layout + ?Sized,
{
    confirm_action(transport, layout, "backup_warning", ButtonRequestCode::ResetDevice)
        .await
}

/// Body text for [`show_warning_backup`].
#[must_use]
pub fn backup_warning_text(slip39: bool) -> &'static str {
    if slip39 {
        "Never make a digital copy of your shares and never upload them online."
    } else {
        "Never make a digital copy of your seed and never upload it online."
    }
}

/// Title of the word selection screen during the spot check. `share_index` and
/// `group_index` are 0-based.
///
/// ```
/// use r3bl_confirm_flow::select_word_title;
///
/// assert_eq!(select_word_title(None, None), "CHECK SEED");
/// assert_eq!(select_word_title(Some(1), None), "CHECK SHARE #2");
/// assert_eq!(select_word_title(Some(0), Some(2)), "CHECK G3 - SHARE 1");
/// ```
#[must_use]
pub fn select_word_title(share_index: Option<usize>, group_index: Option<usize>) -> String {
    match (share_index, group_index) {
        (None, _) => "CHECK SEED".to_string(),
        (Some(share), None) => format!("CHECK SHARE #{}", share + 1),
        (Some(share), Some(group)) => format!("CHECK G{} - SHARE {}", group + 1, share + 1),
    }
}

/// The `"Select word {k}/{n}"` prompt for the 0-based `checked_index`.
/// [`crate::LayoutLines::word_index`] parses it back.
#[must_use]
pub fn select_word_description(checked_index: usize, count: usize) -> String {
    format!("Select word {}/{}", checked_index + 1, count)
}

/// Ask for the number of words. The device announces the prompt with a bare request
/// first, then interacts with the entry layout, so the host sees two
/// [`ButtonRequestCode::MnemonicWordCount`] requests.
///
/// # Errors
///
/// Returns an error if either interaction fails, or if the layout doesn't return a
/// number.
pub async fn request_word_count<T, L>(transport: &mut T, layout: &mut L) -> miette::Result<usize>
where
    T: InteractionTransport + ?Sized,
    L: Layout + ?Sized,
{
    button_request(
        transport,
        "word_count",
        ButtonRequestCode::MnemonicWordCount,
        PageCount::Single,
    )
    .await?;
    let result = interact(
        transport,
        layout,
        "request_word_count",
        ButtonRequestCode::MnemonicWordCount,
    )
    .await?;

    match result {
        LayoutResult::Value(text) => match text.trim().parse() {
            Ok(count) => {
                debug!(message = "word count", count);
                Ok(count)
            }
            Err(_) => miette::bail!("Word count `{text}` is not a number"),
        },
        other => miette::bail!("Expected a word count, got {other:?}"),
    }
}

/// Ask for one mnemonic word. `word_index` is 0-based.
///
/// # Errors
///
/// Returns an error if the interaction fails, or if the layout doesn't return a word.
pub async fn request_word<T, L>(
    transport: &mut T,
    layout: &mut L,
    word_index: usize,
    word_count: usize,
) -> miette::Result<String>
where
    T: InteractionTransport + ?Sized,
    L: Layout + ?Sized,
{
    debug!("WORD {} OF {}", word_index + 1, word_count);
    match interact(transport, layout, "request_word", ButtonRequestCode::MnemonicInput).await? {
        LayoutResult::Value(word) => Ok(word),
        other => miette::bail!("Expected a mnemonic word, got {other:?}"),
    }
}

/// Recovery homescreen. Returns `true` if the user chose to continue.
///
/// # Errors
///
/// Returns an error if the interaction fails.
pub async fn continue_recovery<T, L>(transport: &mut T, layout: &mut L) -> miette::Result<bool>
where
    T: InteractionTransport + ?Sized,
    L: Layout + ?Sized,
{
    confirm_action(transport, layout, "recovery", ButtonRequestCode::RecoveryHomepage).await
}

/// # Errors
///
/// Returns an error if the interaction fails.
pub async fn show_success<T, L>(transport: &mut T, layout: &mut L) -> miette::Result<bool>
where
    T: InteractionTransport + ?Sized,
    L: Layout + ?Sized,
{
    confirm_action(transport, layout, "success", ButtonRequestCode::Success).await
}

#[cfg(test)]
mod tests_device_prompts {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ButtonRequest, ContentKind,
                test_fixtures::{MockLayout, RecordingTransport}};

    #[tokio::test]
    async fn test_request_word_count_sends_two_requests() {
        let mut transport = RecordingTransport::default();
        let mut layout =
            MockLayout::new(ContentKind::Simple, LayoutResult::Value("20".into()));

        let count = request_word_count(&mut transport, &mut layout).await.unwrap();

        assert_eq!(count, 20);
        assert_eq!(
            transport.sent_requests(),
            vec![
                ButtonRequest::new(ButtonRequestCode::MnemonicWordCount),
                ButtonRequest::new(ButtonRequestCode::MnemonicWordCount),
            ]
        );
    }

    #[tokio::test]
    async fn test_request_word_count_rejects_text() {
        let mut transport = RecordingTransport::default();
        let mut layout =
            MockLayout::new(ContentKind::Simple, LayoutResult::Value("twelve".into()));
        assert!(request_word_count(&mut transport, &mut layout).await.is_err());
    }

    #[tokio::test]
    async fn test_show_share_words_announces_pages() {
        let mut transport = RecordingTransport::default();
        let mut layout = MockLayout::new(ContentKind::KnownPages(5), LayoutResult::Confirmed);

        show_share_words(&mut transport, &mut layout).await.unwrap();

        assert_eq!(
            transport.sent_requests(),
            vec![ButtonRequest::with_pages(
                ButtonRequestCode::ResetDevice,
                PageCount::Known(5)
            )]
        );
    }

    #[tokio::test]
    async fn test_continue_recovery_reports_choice() {
        let mut transport = RecordingTransport::default();
        let mut confirmed = MockLayout::new(ContentKind::Simple, LayoutResult::Confirmed);
        let mut cancelled = MockLayout::new(ContentKind::Simple, LayoutResult::Cancelled);

        assert!(continue_recovery(&mut transport, &mut confirmed).await.unwrap());
        assert!(!continue_recovery(&mut transport, &mut cancelled).await.unwrap());
        assert_eq!(transport.dismiss_count(), 2);
    }

    #[test]
    fn test_select_word_description_round_trips_through_parser() {
        let screen = crate::LayoutLines::from_lines([select_word_description(4, 12)]);
        assert_eq!(screen.word_index().unwrap(), 4);
    }

    #[test]
    fn test_backup_warning_text() {
        assert!(backup_warning_text(true).contains("shares"));
        assert!(backup_warning_text(false).contains("seed"));
    }
}
