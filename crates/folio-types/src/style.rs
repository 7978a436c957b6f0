//! Styled output lines.
//!
//! A `Style` is the terminal analogue of a CSS class on a rendered line;
//! front ends decide what each one looks like.

/// Presentation class of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    #[default]
    Plain,
    /// Section headings (`COMMS LINK:`, project titles).
    Heading,
    /// The echoed prompt line.
    Prompt,
    /// Redactions, denials and failures.
    Error,
    /// Addresses and URLs.
    Link,
    /// Status notices (`ACCESS GRANTED.`).
    Notice,
}

impl Style {
    /// Class name, matching the stylesheet names of the web front end.
    pub fn class_name(self) -> &'static str {
        match self {
            Style::Plain => "",
            Style::Heading => "uppercase",
            Style::Prompt => "prompt",
            Style::Error => "error",
            Style::Link => "link",
            Style::Notice => "notice",
        }
    }
}

/// One line of text with its presentation class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub text: String,
    pub style: Style,
}

impl StyledLine {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::Plain)
    }
}
