//! Text measurement
//!
//! Reflow needs the height a text needs at a given box width. Real glyph
//! metrics belong to the host; [`HeuristicMeasurer`] approximates them with a
//! fixed advance per grapheme and UAX #14 line breaking, wrapping the way a
//! `pre-wrap` + `break-word` box does.

use render_model::ResolvedTextStyle;
use unicode_linebreak::{linebreaks, BreakOpportunity as UnicodeBreak};
use unicode_segmentation::UnicodeSegmentation;

/// Unicode line break opportunity types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakOpportunity {
    /// Break allowed (after space, punctuation, etc.)
    Allowed,
    /// Break required (after hard line break)
    Mandatory,
}

/// Measures rendered text
pub trait TextMeasurer {
    /// Number of lines `text` occupies when wrapped to `max_width_px`
    fn line_count(&self, text: &str, font_size_px: f64, max_width_px: f64) -> usize;

    /// Height needed to show `text` without clipping
    fn intrinsic_height(&self, text: &str, style: &ResolvedTextStyle, width_px: f64) -> f64 {
        self.line_count(text, style.font_size_px, width_px) as f64 * style.line_height_px()
    }
}

/// A break-delimited piece of text
struct Segment<'a> {
    text: &'a str,
    break_after: BreakOpportunity,
    at_end: bool,
}

/// Split text into segments at UAX #14 break opportunities
fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    for (offset, opportunity) in linebreaks(text) {
        let break_after = match opportunity {
            UnicodeBreak::Mandatory => BreakOpportunity::Mandatory,
            UnicodeBreak::Allowed => BreakOpportunity::Allowed,
        };
        out.push(Segment { text: &text[start..offset], break_after, at_end: offset == text.len() });
        start = offset;
    }
    out
}

/// Fixed-advance measurer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicMeasurer {
    /// Advance of one grapheme in em
    pub advance_em: f64,
}

impl Default for HeuristicMeasurer {
    fn default() -> Self {
        Self { advance_em: 0.6 }
    }
}

impl HeuristicMeasurer {
    pub fn new(advance_em: f64) -> Self {
        Self { advance_em }
    }

    /// (visible graphemes, trailing whitespace graphemes) of a segment
    fn split_trailing(segment: &str) -> (usize, usize) {
        let graphemes: Vec<&str> = segment.graphemes(true).collect();
        let trailing = graphemes.iter().rev().take_while(|g| g.chars().all(char::is_whitespace)).count();
        (graphemes.len() - trailing, trailing)
    }
}

impl TextMeasurer for HeuristicMeasurer {
    fn line_count(&self, text: &str, font_size_px: f64, max_width_px: f64) -> usize {
        if text.is_empty() {
            return 0;
        }

        let advance = (self.advance_em * font_size_px).max(f64::MIN_POSITIVE);
        let per_line = if max_width_px > 0.0 { ((max_width_px / advance).floor() as usize).max(1) } else { 1 };

        let mut lines = 1;
        // graphemes on the current line
        let mut used = 0usize;
        for segment in segments(text) {
            let (visible, trailing) = Self::split_trailing(segment.text);

            if used > 0 && used + visible > per_line {
                lines += 1;
                used = 0;
            }
            if visible > per_line {
                // break-word: the word alone overflows, split it across lines
                let rows = visible.div_ceil(per_line);
                lines += rows - 1;
                used = visible - (rows - 1) * per_line;
            } else {
                used += visible;
            }
            // trailing spaces hang past the edge in pre-wrap
            used += trailing;

            if segment.break_after == BreakOpportunity::Mandatory && !segment.at_end {
                lines += 1;
                used = 0;
            }
        }
        lines
    }
}
