// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{LayoutLines, split_share_into_pages};

pub const MNEMONIC12: &str =
    "alcohol woman abuse must during monitor noble actual mixed trade anger aisle";

/// Three of the six shares of a 20 word, 3 of 6 threshold backup.
pub const MNEMONIC_SLIP39_BASIC_20_3OF6: [&str; 3] = [
    "extra extend academic bishop cricket bundle tofu goat apart victim enlarge program behavior permit course armed jerky faint language modern",
    "extra extend academic acne away best indicate impact square oasis prospect painting voting guest either argue username racism enemy eclipse",
    "extra extend academic arcade born dive legal hush gross briefing talent drug much home firefly toxic analysis idea umbrella slice",
];

/// Shares from two groups of a 20 word advanced backup.
pub const MNEMONIC_SLIP39_ADVANCED_20: [&str; 4] = [
    "eraser senior beard romp adorn nuclear spill corner cradle style ancient family general leader ambition exchange unusual garlic promise voice",
    "eraser senior ceramic snake clay various huge numb argue hesitate auction category timber browser greatest hanger petition script leaf pickup",
    "eraser senior ceramic shaft dynamic become junior wrist silver peasant force math alto coal amazing segment yelp velvet image paces",
    "eraser senior ceramic round column hawk trust auction smug shame alive greatest sheriff living perfect corner chest sled fumes adequate",
];

pub const RECOVERY_SEED_TITLE: &str = "RECOVERY SEED";

/// The pages of the mnemonic backup screen, each under a title line.
pub fn share_word_screens<S: AsRef<str>>(words: &[S], per_page: usize) -> Vec<LayoutLines> {
    split_share_into_pages(words, per_page)
        .iter()
        .map(|page| {
            let mut screen = LayoutLines::from_text(page);
            screen.lines.insert(0, RECOVERY_SEED_TITLE.into());
            screen
        })
        .collect()
}

/// A spot check screen of a two button device with `highlighted` on the select button.
/// `index` is 0-based.
#[must_use]
pub fn select_word_screen(
    title: &str,
    index: usize,
    count: usize,
    highlighted: &str,
) -> LayoutLines {
    LayoutLines::from_lines([
        format!("Select word {}/{count}", index + 1),
        title.to_string(),
        format!("SELECT [Select({highlighted})]"),
    ])
}
