// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Words shown on one page of a mnemonic backup.
pub const DEFAULT_WORDS_PER_PAGE: usize = 4;

/// Split mnemonic words into pages of `per_page` words. Each word is rendered as
/// `"{n}. {word}"` where `n` is its 1-based position in the whole mnemonic, and the
/// words of a page are joined by newlines. The last page may be shorter.
///
/// A `per_page` of `0` is treated as `1`. Empty input yields no pages.
///
/// ```
/// use r3bl_confirm_flow::split_share_into_pages;
///
/// let pages = split_share_into_pages(&["a", "b", "c", "d", "e"], 4);
/// assert_eq!(pages, vec!["1. a\n2. b\n3. c\n4. d", "5. e"]);
/// ```
pub fn split_share_into_pages<S: AsRef<str>>(words: &[S], per_page: usize) -> Vec<String> {
    let per_page = per_page.max(1);
    words
        .chunks(per_page)
        .enumerate()
        .map(|(page_index, page_words)| {
            page_words
                .iter()
                .enumerate()
                .map(|(offset, word)| {
                    format!("{}. {}", page_index * per_page + offset + 1, word.as_ref())
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect()
}
