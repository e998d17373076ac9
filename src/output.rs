use std::io::{self, Write};

/// Writes blocks of text wrapped to a fixed width, each preceded by a blank
/// line.
#[derive(Debug)]
pub struct WrappedWriter<W> {
    out: W,
    width: usize,
}

impl<W: Write> WrappedWriter<W> {
    pub fn new(out: W, width: usize) -> Self {
        Self {
            out,
            width: width.max(1),
        }
    }

    /// Wrap to one column short of the terminal width (80 when stdout is
    /// not a terminal).
    pub fn for_terminal(out: W) -> Self {
        Self::new(out, textwrap::termwidth().saturating_sub(1))
    }

    pub fn print_wrapped(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", textwrap::fill(text, self.width))?;
        self.out.flush()
    }

    pub fn print_padding(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
