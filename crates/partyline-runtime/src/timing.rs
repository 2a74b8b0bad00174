//! Speech-duration estimates and utterance splitting.
//!
//! All positions are counted in `char`s, never bytes, so a split can never
//! land inside a multi-byte character.

use std::ops::RangeInclusive;

/// Shortest time into the primary's line at which an interruption lands.
pub const MIN_INTERRUPTION_MS: u64 = 220;

/// Longest time into the primary's line at which an interruption lands.
pub const MAX_INTERRUPTION_MS: u64 = 900;

/// How far either side of the target index to look for whitespace.
pub const SPLIT_WINDOW: usize = 12;

/// Characters kept on each side of a split when the line is long enough.
pub const MIN_SPLIT_SIDE: usize = 12;

/// Estimated spoken duration of `text` at `pace_wpm`, in milliseconds.
///
/// Words are whitespace-separated tokens; an empty line counts as one word.
/// The result is rounded half up.
pub fn estimate_speak_ms(text: &str, pace_wpm: u32) -> u64 {
    let words = u64::try_from(text.split_whitespace().count())
        .unwrap_or(u64::MAX)
        .max(1);
    let pace = u64::from(pace_wpm.max(1));
    words
        .saturating_mul(60_000)
        .saturating_add(pace / 2)
        .checked_div(pace)
        .unwrap_or(0)
}

/// Time into the primary's line at which the interruption lands: half the
/// estimated duration, clamped to `[220, 900]` ms.
pub fn interruption_time(duration_ms: u64) -> u64 {
    duration_ms
        .saturating_add(1)
        .checked_div(2)
        .unwrap_or(0)
        .clamp(MIN_INTERRUPTION_MS, MAX_INTERRUPTION_MS)
}

/// Index proportional to `at_ms / duration_ms` of a line of `len` chars.
pub fn proportional_index(len: usize, at_ms: u64, duration_ms: u64) -> usize {
    let len_u64 = u64::try_from(len).unwrap_or(u64::MAX);
    let index = len_u64
        .saturating_mul(at_ms)
        .checked_div(duration_ms)
        .unwrap_or(len_u64)
        .min(len_u64);
    usize::try_from(index).unwrap_or(len)
}

/// Nearest whitespace to `target` within `window` chars.
///
/// At each offset the left candidate is checked before the right one.
/// Returns `None` when the window holds no whitespace.
pub fn find_whitespace_near(chars: &[char], target: usize, window: usize) -> Option<usize> {
    find_whitespace_between(chars, target, window, 0..=chars.len())
}

/// Like [`find_whitespace_near`], but only accepts indices in `bounds`.
pub fn find_whitespace_between(
    chars: &[char],
    target: usize,
    window: usize,
    bounds: RangeInclusive<usize>,
) -> Option<usize> {
    let target = target.min(chars.len());
    let usable =
        |i: &usize| bounds.contains(i) && chars.get(*i).is_some_and(|c| c.is_whitespace());
    (0..=window).find_map(|offset| {
        let left = target.checked_sub(offset).filter(&usable);
        let right = target.checked_add(offset).filter(&usable);
        left.or(right)
    })
}

/// Split index for a line of `chars` interrupted at `target`.
///
/// When the line is long enough, the split keeps at least
/// [`MIN_SPLIT_SIDE`] chars on each side. Within that range the nearest
/// whitespace to the target wins; with none in the window the target itself
/// is used, clamped into the range.
pub fn find_split_index(chars: &[char], target: usize) -> usize {
    let len = chars.len();
    let (floor, ceiling) = match len.checked_sub(MIN_SPLIT_SIDE) {
        Some(ceiling) if ceiling >= MIN_SPLIT_SIDE => (MIN_SPLIT_SIDE, ceiling),
        _ => (0, len),
    };
    let target = target.min(len);
    find_whitespace_between(chars, target, SPLIT_WINDOW, floor..=ceiling)
        .unwrap_or_else(|| target.clamp(floor, ceiling))
}

/// The two halves of an interrupted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLine {
    /// Spoken before the interruption, ending in an ellipsis.
    pub prefix: String,
    /// Spoken after the interruption; may be empty.
    pub suffix: String,
}

/// Split `text` for an interruption landing `at_ms` into a line lasting
/// `duration_ms`.
pub fn split_line(text: &str, at_ms: u64, duration_ms: u64) -> SplitLine {
    let chars: Vec<char> = text.chars().collect();
    let target = proportional_index(chars.len(), at_ms, duration_ms);
    let index = find_split_index(&chars, target);
    let (head, tail) = chars.split_at(index.min(chars.len()));

    let head: String = head.iter().collect();
    let tail: String = tail.iter().collect();
    SplitLine {
        prefix: format!("{}...", head.trim_end()),
        suffix: tail.trim_start().to_owned(),
    }
}

/// Truncate `text` to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
