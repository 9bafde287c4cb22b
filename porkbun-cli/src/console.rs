//! Line-oriented terminal I/O
//!
//! Commands write through a [`Console`] instead of `stdout` directly so the
//! interactive menu and the tests can drive them with scripted input.

use std::io::{self, BufRead, Write};

use anyhow::Result;

/// Input and output streams of a command.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one trimmed line. `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`ask`](Self::ask), but an empty answer yields `default`.
    pub fn ask_or(&mut self, prompt: &str, default: &str) -> Result<Option<String>> {
        Ok(self
            .ask(&format!("{prompt} [{default}]: "))?
            .map(|answer| {
                if answer.is_empty() {
                    default.to_string()
                } else {
                    answer
                }
            }))
    }

    /// Ask for an answer that must not be empty; `None` when the user gives none.
    pub fn ask_required(&mut self, prompt: &str) -> Result<Option<String>> {
        Ok(self.ask(prompt)?.filter(|answer| !answer.is_empty()))
    }

    /// `true` only when the user types `word` exactly.
    pub fn confirm_word(&mut self, prompt: &str, word: &str) -> Result<bool> {
        Ok(self.ask(prompt)?.is_some_and(|answer| answer == word))
    }

    /// Yes/no question, `false` unless the answer starts with `y`.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(self
            .ask(&format!("{prompt} [y/N]: "))?
            .is_some_and(|answer| answer.to_ascii_lowercase().starts_with('y')))
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }
}

impl<R, W: Write> Write for Console<R, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{printed, scripted};

    #[test]
    fn ask_trims_and_echoes_prompt() {
        let mut console = scripted("  hello  \n");
        assert_eq!(console.ask("Name: ").unwrap().as_deref(), Some("hello"));
        assert_eq!(printed(&console), "Name: ");
    }

    #[test]
    fn ask_returns_none_at_eof() {
        let mut console = scripted("");
        assert_eq!(console.ask("Name: ").unwrap(), None);
    }

    #[test]
    fn ask_or_falls_back_to_default() {
        let mut console = scripted("\n600\n");
        assert_eq!(console.ask_or("TTL", "300").unwrap().as_deref(), Some("300"));
        assert_eq!(console.ask_or("TTL", "300").unwrap().as_deref(), Some("600"));
    }

    #[test]
    fn confirm_word_is_exact() {
        let mut console = scripted("yes\nYES\n");
        assert!(!console.confirm_word("Sure? ", "YES").unwrap());
        assert!(console.confirm_word("Sure? ", "YES").unwrap());
    }

    #[test]
    fn confirm_defaults_to_no() {
        let mut console = scripted("\ny\n");
        assert!(!console.confirm("Delete?").unwrap());
        assert!(console.confirm("Delete?").unwrap());
    }
}
