use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Line-based prompt over any reader/writer pair.
pub struct Console<'a> {
    input: Box<dyn BufRead + 'a>,
    output: Box<dyn Write + 'a>,
}

impl<'a> Console<'a> {
    pub fn new(input: impl BufRead + 'a, output: impl Write + 'a) -> Self {
        Self {
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    pub fn stdio() -> Console<'static> {
        Console::new(io::stdin().lock(), io::stdout())
    }

    /// Print `label` and read one line without its line ending.
    /// `None` means the input is exhausted.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    pub fn say(&mut self, msg: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", msg)
    }

    /// Write without a trailing newline.
    pub fn show(&mut self, msg: impl Display) -> io::Result<()> {
        write!(self.output, "{}", msg)
    }

    /// Wait for Enter. End of input counts as Enter.
    pub fn pause(&mut self, label: &str) -> io::Result<()> {
        self.prompt(label).map(|_| ())
    }
}
