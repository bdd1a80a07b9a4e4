//! Console output.
//!
//! Messages go to stderr; command results meant for piping go to stdout.

use std::fmt::Display;

use console::{Style, Term};

/// How a console message is styled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tone {
    Plain,
    Good,
    Warn,
    Bad,
    Heading,
    Muted,
}

impl Tone {
    fn style(self) -> Option<Style> {
        let style = Style::new();
        match self {
            Self::Plain => None,
            Self::Good => Some(style.green()),
            Self::Warn => Some(style.yellow()),
            Self::Bad => Some(style.red()),
            Self::Heading => Some(style.cyan().bold()),
            Self::Muted => Some(style.dim()),
        }
    }
}

/// Console and result streams of the CLI.
pub(crate) struct Output {
    console: Term,
    results: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            console: Term::stderr(),
            results: Term::stdout(),
        }
    }

    /// Print a console message in the given tone.
    pub(crate) fn say(&self, tone: Tone, msg: impl Display) {
        let line = match tone.style() {
            Some(style) => style.apply_to(msg).to_string(),
            None => msg.to_string(),
        };
        let _ = self.console.write_line(&line);
    }

    pub(crate) fn info(&self, msg: impl Display) {
        self.say(Tone::Plain, msg);
    }

    pub(crate) fn warning(&self, msg: impl Display) {
        self.say(Tone::Warn, msg);
    }

    pub(crate) fn error(&self, msg: impl Display) {
        self.say(Tone::Bad, msg);
    }

    /// Write a command result to stdout, unstyled.
    pub(crate) fn data(&self, result: &str) {
        let _ = self.results.write_line(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_tone_is_unstyled() {
        assert!(Tone::Plain.style().is_none());
        assert!(Tone::Heading.style().is_some());
    }
}
