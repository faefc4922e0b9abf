use anyhow::{Context, Result};
use std::io::Write;

/// Receives the raw text of a prompt the user wants to copy.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// Writes copied text to a writer untouched, e.g. stdout piped into
/// `pbcopy`, `xclip` or `wl-copy`.
pub struct WriterClipboard<W: Write> {
    writer: W,
}

impl<W: Write> WriterClipboard<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterClipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Clipboard for WriterClipboard<W> {
    fn copy(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .context("Failed to write copied text")?;
        self.writer.flush().context("Failed to flush copied text")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_text_without_decoration() {
        let mut clipboard = WriterClipboard::new(Vec::new());
        clipboard.copy("Line one\nLine two").unwrap();
        assert_eq!(clipboard.into_inner(), b"Line one\nLine two");
    }
}
