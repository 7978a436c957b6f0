//! Full-screen redraw of the output buffer plus the input prompt.

use std::io::{self, Stdout, Write};

use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use folio_types::{Style, StyledLine};

/// Raw-mode alternate screen. Restores the terminal on drop.
pub struct Screen {
    out: Stdout,
}

impl Screen {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { out })
    }

    /// Redraw everything: the newest output rows, then the prompt row
    /// (omitted while booting).
    pub fn draw(&mut self, lines: &[StyledLine], prompt: Option<&str>) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let body_rows = usize::from(rows.saturating_sub(1));
        queue!(self.out, Clear(ClearType::All))?;
        for (y, (style, text)) in visual_rows(lines, usize::from(cols), body_rows)
            .into_iter()
            .enumerate()
        {
            let y = u16::try_from(y).unwrap_or(u16::MAX);
            queue!(self.out, cursor::MoveTo(0, y))?;
            if style == Style::Heading {
                queue!(self.out, SetAttribute(Attribute::Bold))?;
            }
            queue!(
                self.out,
                SetForegroundColor(color_for(style)),
                Print(text),
                ResetColor,
                SetAttribute(Attribute::Reset)
            )?;
        }
        if let Some(prompt) = prompt {
            let row = truncate_to_width(prompt, usize::from(cols));
            queue!(
                self.out,
                cursor::MoveTo(0, rows.saturating_sub(1)),
                SetForegroundColor(Color::Green),
                Print(row),
                ResetColor
            )?;
        }
        self.out.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.out, LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

fn color_for(style: Style) -> Color {
    match style {
        Style::Plain => Color::Grey,
        Style::Heading => Color::White,
        Style::Prompt => Color::Green,
        Style::Error => Color::Red,
        Style::Link => Color::Cyan,
        Style::Notice => Color::Yellow,
    }
}

/// Wrap lines to `width` columns and keep the last `height` rows.
pub fn visual_rows(lines: &[StyledLine], width: usize, height: usize) -> Vec<(Style, String)> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in lines {
        let chars: Vec<char> = line.text.chars().collect();
        if chars.is_empty() {
            rows.push((line.style, String::new()));
            continue;
        }
        for chunk in chars.chunks(width) {
            rows.push((line.style, chunk.iter().collect()));
        }
    }
    let skip = rows.len().saturating_sub(height);
    rows.split_off(skip)
}

/// Keep the tail of `text` so the cursor end stays visible.
fn truncate_to_width(text: &str, width: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(width)).collect()
}
