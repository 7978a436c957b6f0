//! Line renderer and output sinks.
//!
//! The renderer knows nothing about the display technology. It drives an
//! [`OutputSink`], which only has to open lines, append text, clear and
//! scroll. Animated lines are typed out one character per cadence tick and
//! the future completes only after the last character is on screen.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use folio_content::Block;
use folio_types::{Style, StyledLine};

/// Where rendered output goes.
pub trait OutputSink {
    /// Open a new, empty line with the given presentation class.
    fn begin_line(&mut self, style: Style);

    /// Append text to the most recently opened line.
    fn push_str(&mut self, text: &str);

    /// Remove everything rendered so far.
    fn clear(&mut self);

    /// Bring the newest content into view.
    fn scroll_to_end(&mut self) {}
}

// ---------------------------------------------------------------------------
// BufferSink
// ---------------------------------------------------------------------------

/// In-memory output surface with optional scrollback limit.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    lines: Vec<StyledLine>,
    max_lines: Option<usize>,
    scrolls: usize,
    revision: u64,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `max_lines`, dropping the oldest first.
    pub fn with_scrollback(max_lines: usize) -> Self {
        Self {
            max_lines: Some(max_lines.max(1)),
            ..Self::default()
        }
    }

    pub fn lines(&self) -> &[StyledLine] {
        &self.lines
    }

    /// Line texts only.
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of scroll requests received.
    pub fn scrolls(&self) -> usize {
        self.scrolls
    }

    /// Bumped on every change; front ends redraw when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn trim(&mut self) {
        if let Some(max) = self.max_lines
            && self.lines.len() > max
        {
            let excess = self.lines.len() - max;
            self.lines.drain(..excess);
        }
    }
}

impl OutputSink for BufferSink {
    fn begin_line(&mut self, style: Style) {
        self.lines.push(StyledLine::new(String::new(), style));
        self.trim();
        self.revision += 1;
    }

    fn push_str(&mut self, text: &str) {
        match self.lines.last_mut() {
            Some(line) => line.text.push_str(text),
            None => self.lines.push(StyledLine::plain(text)),
        }
        self.revision += 1;
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.revision += 1;
    }

    fn scroll_to_end(&mut self) {
        self.scrolls += 1;
    }
}

// ---------------------------------------------------------------------------
// SharedSink
// ---------------------------------------------------------------------------

/// A sink shared between the interpreter task and a front end that reads
/// it back (for redraws or assertions).
#[derive(Debug, Default)]
pub struct SharedSink<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> SharedSink<S> {
    pub fn new(sink: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sink)),
        }
    }

    /// Run `f` with the sink locked.
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn with_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl<S> Clone for SharedSink<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: OutputSink> OutputSink for SharedSink<S> {
    fn begin_line(&mut self, style: Style) {
        self.with_mut(|s| s.begin_line(style));
    }

    fn push_str(&mut self, text: &str) {
        self.with_mut(|s| s.push_str(text));
    }

    fn clear(&mut self) {
        self.with_mut(|s| s.clear());
    }

    fn scroll_to_end(&mut self) {
        self.with_mut(|s| s.scroll_to_end());
    }
}

// ---------------------------------------------------------------------------
// LineRenderer
// ---------------------------------------------------------------------------

/// Renders styled lines into a sink, instantly or typed out.
#[derive(Debug)]
pub struct LineRenderer<S> {
    sink: S,
    cadence: Duration,
}

impl<S: OutputSink> LineRenderer<S> {
    /// `cadence` is the per-character delay of animated lines.
    pub fn new(sink: S, cadence: Duration) -> Self {
        Self { sink, cadence }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Append a whole line immediately.
    pub fn line(&mut self, line: &StyledLine) {
        self.sink.begin_line(line.style);
        self.sink.push_str(&line.text);
        self.sink.scroll_to_end();
    }

    /// Append every line of a content block immediately.
    pub fn block(&mut self, block: &Block) {
        for line in block.lines() {
            self.line(line);
        }
    }

    /// Type a line out one character at a time. Completes after the last
    /// character has been appended and its cadence tick has elapsed.
    pub async fn animate(&mut self, line: &StyledLine) {
        self.sink.begin_line(line.style);
        self.sink.scroll_to_end();
        let mut buf = [0u8; 4];
        for ch in line.text.chars() {
            self.sink.push_str(ch.encode_utf8(&mut buf));
            self.sink.scroll_to_end();
            tokio::time::sleep(self.cadence).await;
        }
    }

    /// Render one line, animated or not.
    pub async fn render(&mut self, line: &StyledLine, animated: bool) {
        if animated {
            self.animate(line).await;
        } else {
            self.line(line);
        }
    }

    pub fn clear(&mut self) {
        self.sink.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn renderer() -> LineRenderer<BufferSink> {
        LineRenderer::new(BufferSink::new(), Duration::from_millis(10))
    }

    #[tokio::test(start_paused = true)]
    async fn plain_render_is_immediate() {
        let mut r = renderer();
        let start = Instant::now();
        r.render(&StyledLine::plain("hello"), false).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(r.sink().texts(), vec!["hello"]);
    }

    #[tokio::test(start_paused = true)]
    async fn animated_render_waits_per_char() {
        let mut r = renderer();
        let start = Instant::now();
        r.render(&StyledLine::new("AUTH", Style::Notice), true).await;
        assert_eq!(start.elapsed(), Duration::from_millis(40));
        assert_eq!(r.sink().lines(), &[StyledLine::new("AUTH", Style::Notice)]);
    }

    #[tokio::test(start_paused = true)]
    async fn animation_is_partial_midway() {
        let sink = SharedSink::new(BufferSink::new());
        let mut r = LineRenderer::new(sink.clone(), Duration::from_millis(10));
        let task = tokio::spawn(async move {
            r.animate(&StyledLine::plain("abcdef")).await;
        });
        tokio::time::sleep(Duration::from_millis(25)).await;
        let partial = sink.with(|s| s.texts()[0].to_string());
        assert!(partial.len() < 6, "got {partial:?}");
        assert!("abcdef".starts_with(&partial));
        task.await.unwrap();
        assert_eq!(sink.with(|s| s.texts()[0].to_string()), "abcdef");
    }

    #[test]
    fn every_line_scrolls() {
        let mut r = renderer();
        let mut block = Block::new();
        block.push_text("a\nb\nc", Style::Plain);
        r.block(&block);
        assert_eq!(r.sink().scrolls(), 3);
    }

    #[test]
    fn clear_twice_same_as_once() {
        let mut r = renderer();
        r.line(&StyledLine::plain("x"));
        r.clear();
        let once = r.sink().lines().to_vec();
        r.clear();
        assert_eq!(r.sink().lines(), once.as_slice());
        assert!(r.sink().is_empty());
    }

    #[test]
    fn scrollback_drops_oldest() {
        let mut sink = BufferSink::with_scrollback(2);
        for text in ["1", "2", "3"] {
            sink.begin_line(Style::Plain);
            sink.push_str(text);
        }
        assert_eq!(sink.texts(), vec!["2", "3"]);
    }

    #[test]
    fn multibyte_chars_survive_animation_chunks() {
        let mut sink = BufferSink::new();
        sink.begin_line(Style::Plain);
        let mut buf = [0u8; 4];
        for ch in "認証中".chars() {
            sink.push_str(ch.encode_utf8(&mut buf));
        }
        assert_eq!(sink.texts(), vec!["認証中"]);
    }
}
