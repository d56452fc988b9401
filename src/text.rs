//! Attributed text, word wrapping and the text measurement primitive
//! cells use to size their labels.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::{Font, Rgba};

/// A styled span of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: Font,
    pub color: Rgba,
    /// Underline color, if the run is underlined
    pub underline: Option<Rgba>,
}

/// Text made of styled runs. The runs live on the text itself so a label
/// carries its own styling wherever it goes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributedText {
    pub runs: Vec<TextRun>,
}

impl AttributedText {
    pub fn plain(text: &str, font: &Font, color: Rgba) -> Self {
        Self::default().with_run(text, font, color)
    }

    pub fn with_run(mut self, text: &str, font: &Font, color: Rgba) -> Self {
        self.runs.push(TextRun {
            text: text.to_string(),
            font: font.clone(),
            color,
            underline: None,
        });
        self
    }

    pub fn with_underlined_run(mut self, text: &str, font: &Font, color: Rgba, line: Rgba) -> Self {
        self.runs.push(TextRun {
            text: text.to_string(),
            font: font.clone(),
            color,
            underline: Some(line),
        });
        self
    }

    /// Concatenated text of all runs
    pub fn as_plain(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// The largest font among the runs; drives line height.
    pub fn primary_font(&self) -> Option<&Font> {
        self.runs
            .iter()
            .map(|run| &run.font)
            .max_by(|a, b| a.size.total_cmp(&b.size))
    }
}

/// A piece of a wrapped line that shares one run's style
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub run: usize,
}

/// One wrapped line
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLine {
    pub fragments: Vec<Fragment>,
    /// Width in display columns
    pub columns: usize,
}

impl TextLine {
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    fn push(&mut self, text: &str, run: usize) {
        self.columns += text.width();
        match self.fragments.last_mut() {
            Some(last) if last.run == run => last.text.push_str(text),
            _ => self.fragments.push(Fragment {
                text: text.to_string(),
                run,
            }),
        }
    }
}

/// Greedy word wrap of attributed text into lines of at most `max_columns`
/// display columns. Wide characters count two columns, combining marks none.
///
/// Hard line breaks are kept (blank lines included), whitespace runs
/// collapse to a single space, and words wider than the line are split.
/// A `max_columns` of 0 disables wrapping. Always returns at least one line.
pub fn layout_lines(text: &AttributedText, max_columns: usize) -> Vec<TextLine> {
    let mut lines = vec![TextLine::default()];
    let mut space_pending = false;

    for (run_index, run) in text.runs.iter().enumerate() {
        for (segment_index, segment) in run.text.split('\n').enumerate() {
            if segment_index > 0 {
                lines.push(TextLine::default());
                space_pending = false;
            }

            let mut rest = segment;
            loop {
                let trimmed = rest.trim_start();
                if trimmed.len() != rest.len() {
                    space_pending = true;
                }
                if trimmed.is_empty() {
                    break;
                }
                let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
                place_word(&mut lines, &trimmed[..end], run_index, space_pending, max_columns);
                space_pending = false;
                rest = &trimmed[end..];
            }
        }
    }

    lines
}

fn place_word(
    lines: &mut Vec<TextLine>,
    word: &str,
    run: usize,
    space_before: bool,
    max_columns: usize,
) {
    let word_len = word.width();
    let Some(current) = lines.last_mut() else {
        return;
    };
    let separator = if space_before && current.columns > 0 { 1 } else { 0 };

    if max_columns == 0 || current.columns + separator + word_len <= max_columns {
        if separator == 1 {
            current.push(" ", run);
        }
        current.push(word, run);
        return;
    }

    if current.columns > 0 {
        lines.push(TextLine::default());
    }

    // Split words that cannot fit on an empty line
    let mut pieces = split_columns(word, max_columns).into_iter().peekable();
    while let Some(piece) = pieces.next() {
        if let Some(line) = lines.last_mut() {
            line.push(piece, run);
        }
        if pieces.peek().is_some() {
            lines.push(TextLine::default());
        }
    }
}

/// Cut `word` into pieces at most `max_columns` wide. A character wider than
/// the limit gets a piece of its own.
fn split_columns(word: &str, max_columns: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut columns = 0;
    for (index, ch) in word.char_indices() {
        let width = ch.width().unwrap_or(0);
        if columns > 0 && columns + width > max_columns {
            pieces.push(&word[start..index]);
            start = index;
            columns = 0;
        }
        columns += width;
    }
    pieces.push(&word[start..]);
    pieces
}

/// Given a width (or height) limit, report the other dimension a piece of
/// text needs.
pub trait TextMeasure {
    fn height_for_width(&self, text: &AttributedText, max_width: f32) -> f32;
    fn width_for_height(&self, text: &AttributedText, max_height: f32) -> f32;
}

/// Fixed-advance measurement.
///
/// `cells()` counts one point per display column and per line, which is
/// what a terminal renders. `proportional()` scales both with the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub advance: f32,
    pub line_height: f32,
    /// When set, `advance` and `line_height` are multiples of the font size
    pub scale_with_font: bool,
}

impl MonospaceMeasure {
    pub fn cells() -> Self {
        Self {
            advance: 1.0,
            line_height: 1.0,
            scale_with_font: false,
        }
    }

    pub fn proportional() -> Self {
        Self {
            advance: 0.55,
            line_height: 1.25,
            scale_with_font: true,
        }
    }

    fn metrics(&self, text: &AttributedText) -> (f32, f32) {
        if !self.scale_with_font {
            return (self.advance, self.line_height);
        }
        let size = text.primary_font().map(|font| font.size).unwrap_or(0.0);
        (self.advance * size, self.line_height * size)
    }
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self::cells()
    }
}

impl TextMeasure for MonospaceMeasure {
    fn height_for_width(&self, text: &AttributedText, max_width: f32) -> f32 {
        let (advance, line_height) = self.metrics(text);
        if advance <= 0.0 {
            return 0.0;
        }
        // At least one column so an over-narrow label still wraps
        let columns = ((max_width / advance).floor() as usize).max(1);
        layout_lines(text, columns).len() as f32 * line_height
    }

    fn width_for_height(&self, text: &AttributedText, _max_height: f32) -> f32 {
        let (advance, _) = self.metrics(text);
        let widest = layout_lines(text, 0)
            .iter()
            .map(|line| line.columns)
            .max()
            .unwrap_or(0);
        widest as f32 * advance
    }
}
