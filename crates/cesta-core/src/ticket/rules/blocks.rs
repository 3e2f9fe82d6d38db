//! Splitting the merged text into candidate ticket blocks.

use super::patterns::EQUALS_RUN;

/// Default minimum length of a separator run.
pub const DEFAULT_SEPARATOR_MIN_LEN: usize = 10;

/// Default glyph that labels the source document of a block.
pub const DEFAULT_DOCUMENT_MARKER: &str = "📄";

/// Partitions text on runs of `=` characters.
#[derive(Debug, Clone, Copy)]
pub struct BlockSplitter {
    min_len: usize,
}

impl BlockSplitter {
    /// Splitter for runs of at least `min_len` `=` characters.
    pub fn new(min_len: usize) -> Self {
        Self {
            min_len: min_len.max(1),
        }
    }

    /// Trimmed, non-empty blocks in source order.
    pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut pieces = Vec::new();
        let mut start = 0;
        for run in EQUALS_RUN.find_iter(text).filter(|run| run.len() >= self.min_len) {
            pieces.push(&text[start..run.start()]);
            start = run.end();
        }
        pieces.push(&text[start..]);

        pieces
            .into_iter()
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .collect()
    }
}

impl Default for BlockSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR_MIN_LEN)
    }
}

/// A candidate block with document marker lines set aside.
#[derive(Debug, Clone)]
pub struct Block<'t> {
    text: &'t str,
    lines: Vec<&'t str>,
}

impl<'t> Block<'t> {
    /// Wrap a raw block. Lines starting with `marker` are dropped from
    /// [`Block::lines`] wherever they appear.
    pub fn new(text: &'t str, marker: &str) -> Self {
        let lines = text
            .lines()
            .filter(|line| marker.is_empty() || !line.trim_start().starts_with(marker))
            .collect();
        Self { text, lines }
    }

    /// Whole block text.
    pub fn text(&self) -> &'t str {
        self.text
    }

    /// Content lines in order, marker lines excluded.
    pub fn lines(&self) -> &[&'t str] {
        &self.lines
    }

    /// True when the block holds nothing but marker lines and blanks.
    pub fn is_marker_only(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }
}
