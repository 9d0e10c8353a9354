//! Offline corpus filter for the generator's training text.
//!
//! Drops lines that are mostly Dutch (by stop-word ratio) or look like
//! gibberish, and writes the survivors one per line.

use regex::Regex;
use std::{
    collections::HashSet,
    io::{BufRead, Write},
    sync::LazyLock,
};

use crate::error::AppError;

const DUTCH_THRESHOLD: f64 = 0.5;
const MIN_ASCII_LETTERS: usize = 3;
const MIN_LETTER_RATIO: f64 = 0.5;
const MIN_REPEAT_RUN: usize = 4;

/// # Panics
/// - On first use if the constant pattern fails to compile.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("word pattern is valid"));

static DUTCH_STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["de", "het", "en", "een", "van", "ik", "je", "niet", "dat", "die"]
        .into_iter()
        .collect()
});

static ENGLISH_STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["the", "and", "is", "in", "you", "not", "that", "it", "on", "for"]
        .into_iter()
        .collect()
});

/// Counts of a filter run. Blank input lines count as neither.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FilterStats {
    pub kept: usize,
    pub dropped: usize,
}

/// True when more than half of the stop-words in `text` are Dutch.
///
/// Text without any known stop-word is never considered Dutch.
pub fn is_mostly_dutch(text: &str) -> bool {
    let lower = text.to_lowercase();
    let (mut dutch, mut english) = (0usize, 0usize);

    for token in WORD.find_iter(&lower).map(|m| m.as_str()) {
        if DUTCH_STOPWORDS.contains(token) {
            dutch += 1;
        } else if ENGLISH_STOPWORDS.contains(token) {
            english += 1;
        }
    }

    let total = dutch + english;
    if total == 0 {
        return false;
    }

    dutch as f64 / total as f64 > DUTCH_THRESHOLD
}

/// True for lines with too few letters or a single repeated character.
pub fn is_gibberish(text: &str) -> bool {
    let ascii_letters = text.chars().filter(char::is_ascii_alphabetic).count();
    if ascii_letters < MIN_ASCII_LETTERS {
        return true;
    }

    let length = text.chars().count().max(1);
    let letters = text.chars().filter(|c| c.is_alphabetic()).count();
    if (letters as f64) / (length as f64) < MIN_LETTER_RATIO {
        return true;
    }

    let mut chars = text.chars();
    match chars.next() {
        Some(first) => length >= MIN_REPEAT_RUN && chars.all(|c| c == first),
        None => false,
    }
}

/// Copies the lines of `input` worth keeping to `output`.
///
/// Lines are trimmed; blank lines are skipped silently.
pub fn filter_lines<R, W>(input: R, mut output: W) -> Result<FilterStats, AppError>
where
    R: BufRead,
    W: Write,
{
    let mut stats = FilterStats::default();

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if is_mostly_dutch(line) || is_gibberish(line) {
            stats.dropped += 1;
            continue;
        }

        writeln!(output, "{}", line)?;
        stats.kept += 1;
    }

    output.flush()?;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_dutch_by_stopword_ratio() {
        assert!(is_mostly_dutch("ik weet niet wat je bedoelt met dat"));
        assert!(!is_mostly_dutch("I do not know what you mean by that"));
        // One Dutch and one English stop-word is not a majority.
        assert!(!is_mostly_dutch("de the"));
        assert!(!is_mostly_dutch("rod rod rod"));
    }

    #[test]
    fn detects_gibberish() {
        assert!(is_gibberish("ok"));
        assert!(is_gibberish("12345 !!! ab"));
        assert!(is_gibberish("aaaa"));
        assert!(is_gibberish(":) :) :) abc 1234567"));
        assert!(!is_gibberish("aaa"));
        assert!(!is_gibberish("rod is real"));
    }

    #[test]
    fn filters_a_corpus() {
        let input = "\
rod is the best bot
ik ben het niet eens met de bot

hahahaha
aaaaaaa
!!!
you and me in the moon
";
        let mut output = Vec::new();

        let stats = filter_lines(input.as_bytes(), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "rod is the best bot\nhahahaha\nyou and me in the moon\n"
        );
        assert_eq!(stats, FilterStats { kept: 3, dropped: 3 });
    }
}
