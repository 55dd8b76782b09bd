// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result as FmtResult};

use smallvec::SmallVec;

use crate::FlowError;

/// Most screens fit in this many lines without spilling to the heap.
pub const INLINE_LINE_COUNT: usize = 8;

/// One rendered row of a screen, as reported by the device session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayLine(pub String);

impl DisplayLine {
    pub fn new(text: impl Into<String>) -> Self { Self(text.into()) }

    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }

    /// The word of a `"{n}. {word}"` line. Returns `None` unless the part before the
    /// first `.` is a non empty run of ASCII digits. The run is not parsed, so its length
    /// is never a reason to drop the word.
    #[must_use]
    pub fn numbered_word(&self) -> Option<&str> {
        let (number, word) = self.0.split_once('.')?;
        let number = number.trim();
        if number.is_empty() || !number.bytes().all(|it| it.is_ascii_digit()) {
            return None;
        }
        Some(word.trim())
    }
}

impl Display for DisplayLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult { write!(f, "{}", self.0) }
}

impl From<&str> for DisplayLine {
    fn from(text: &str) -> Self { Self::new(text) }
}

/// A whole screen. Recomputed for every read, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutLines {
    pub lines: SmallVec<[DisplayLine; INLINE_LINE_COUNT]>,
}

impl LayoutLines {
    /// One [`DisplayLine`] per `\n` separated line of `text`.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(DisplayLine::from).collect(),
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(DisplayLine::new).collect(),
        }
    }

    /// Words of every `"{n}. {word}"` line, in screen order. Other lines are skipped.
    ///
    /// ```
    /// use r3bl_confirm_flow::LayoutLines;
    ///
    /// let screen = LayoutLines::from_lines(["RECOVERY SEED", "3. abuse", "4. must", "CONTINUE"]);
    /// assert_eq!(screen.mnemonic_words(), vec!["abuse", "must"]);
    /// ```
    #[must_use]
    pub fn mnemonic_words(&self) -> Vec<String> {
        self.lines
            .iter()
            .filter_map(DisplayLine::numbered_word)
            .map(str::to_string)
            .collect()
    }

    /// The 0-based word index asked for by a `"Select word {k}/{n}"` prompt on the first
    /// line.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::ScreenParse`] if the first line is missing or isn't such a
    /// prompt.
    pub fn word_index(&self) -> Result<usize, FlowError> {
        let line = self.first_line()?;
        let parse_error = |reason| FlowError::ScreenParse {
            line: line.to_string(),
            reason,
        };

        let fraction = line
            .as_str()
            .split(' ')
            .next_back()
            .ok_or_else(|| parse_error("missing word position"))?;
        let (human_index, _count) = fraction
            .split_once('/')
            .ok_or_else(|| parse_error("expected `{k}/{n}`"))?;
        let human_index: usize = human_index
            .parse()
            .map_err(|_| parse_error("word position is not a number"))?;

        human_index
            .checked_sub(1)
            .ok_or_else(|| parse_error("word positions start at 1"))
    }

    /// The word currently highlighted in a `"[Select({word})]"` button line, which is
    /// always the last line.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::ScreenParse`] if the last line has no such button.
    pub fn current_word(&self) -> Result<&str, FlowError> {
        let line = self.last_line()?;
        line.as_str()
            .split_once("[Select(")
            .and_then(|(_, rest)| rest.split_once(")]"))
            .map(|(word, _)| word)
            .ok_or_else(|| FlowError::ScreenParse {
                line: line.to_string(),
                reason: "expected `[Select(word)]`",
            })
    }

    fn first_line(&self) -> Result<&DisplayLine, FlowError> {
        self.lines.first().ok_or(FlowError::ScreenParse {
            line: String::new(),
            reason: "empty screen",
        })
    }

    fn last_line(&self) -> Result<&DisplayLine, FlowError> {
        self.lines.last().ok_or(FlowError::ScreenParse {
            line: String::new(),
            reason: "empty screen",
        })
    }
}

#[cfg(test)]
mod tests_display_line {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("3. abuse", Some("abuse"))]
    #[test_case("12. aisle ", Some("aisle"))]
    #[test_case("99999999999999999999999. noble", Some("noble"))]
    #[test_case("Mr. Smith", None)]
    #[test_case(". orphan", None)]
    #[test_case("1a. nope", None)]
    #[test_case("no dot here", None)]
    fn test_numbered_word(line: &str, expected: Option<&str>) {
        assert_eq!(DisplayLine::from(line).numbered_word(), expected);
    }

    #[test]
    fn test_mnemonic_words_skip_other_lines() {
        let screen = LayoutLines::from_text(
            "STANDARD BACKUP\n3. abuse\n4. must\n5. during\nv1.2 firmware\n6. monitor\n7. noble ",
        );
        assert_eq!(
            screen.mnemonic_words(),
            vec!["abuse", "must", "during", "monitor", "noble"]
        );
    }

    #[test]
    fn test_mnemonic_words_keep_word_with_oversized_number() {
        let screen = LayoutLines::from_text("1. abuse\n184467440737095516160. must");
        assert_eq!(screen.mnemonic_words(), vec!["abuse", "must"]);
    }

    #[test_case("Select word 3/12", 2)]
    #[test_case("Select word 1/20", 0)]
    #[test_case("Select word 33/33", 32)]
    fn test_word_index(prompt: &str, expected: usize) {
        let screen = LayoutLines::from_lines([prompt, "SELECT [Select(monitor)]"]);
        assert_eq!(screen.word_index().unwrap(), expected);
    }

    #[test_case("Select word 0/12")]
    #[test_case("Select word x/12")]
    #[test_case("Select word")]
    fn test_word_index_rejects_bad_prompt(prompt: &str) {
        let screen = LayoutLines::from_lines([prompt]);
        assert!(matches!(
            screen.word_index(),
            Err(FlowError::ScreenParse { .. })
        ));
    }

    #[test]
    fn test_current_word() {
        let screen = LayoutLines::from_lines([
            "Select word 3/12",
            "CHECK SEED",
            "SELECT [Select(monitor)]",
        ]);
        assert_eq!(screen.current_word().unwrap(), "monitor");
    }

    #[test]
    fn test_current_word_missing_button() {
        let screen = LayoutLines::from_lines(["Select word 3/12", "CONTINUE"]);
        assert!(screen.current_word().is_err());
        assert!(LayoutLines::default().current_word().is_err());
    }
}
