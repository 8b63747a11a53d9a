// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use calclient_core::{parse_date, parse_time_string};
use jiff::civil::Date;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Parses a date typed by the user, `YYYY-MM-DD` with or without zero padding.
pub fn parse_date_input(s: &str) -> Result<Date, String> {
    parse_date(s).ok_or_else(|| format!("Invalid date: {s:?}. Expected format: YYYY-MM-DD"))
}

/// Parses a time typed by the user as `HH:MM`.
pub fn parse_time_input(s: &str) -> Result<(u32, u32), String> {
    let s = s.trim();
    match parse_time_string(s) {
        Some(hm) if s.len() == 5 && s.as_bytes()[2] == b':' => Ok(hm),
        _ => Err(format!("Invalid time: {s:?}. Expected format: HH:MM")),
    }
}

/// Display width of the first `first_n_graphemes` grapheme clusters of `s`.
pub fn unicode_width_of_slice(s: &str, first_n_graphemes: usize) -> usize {
    s[..byte_index_of_grapheme(s, first_n_graphemes)].width()
}

/// Number of grapheme clusters in `s`.
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Byte offset where the grapheme cluster at `g_idx` starts, or `s.len()` past the end.
pub fn byte_index_of_grapheme(s: &str, g_idx: usize) -> usize {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map_or(s.len(), |(start, _)| start)
}

/// Return the byte range of the grapheme cluster at index `g_idx` in `s`.
/// If out of bounds, returns None.
pub fn byte_range_of_grapheme_at(s: &str, g_idx: usize) -> Option<std::ops::Range<usize>> {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map(|(start, g)| start..start + g.len())
}
