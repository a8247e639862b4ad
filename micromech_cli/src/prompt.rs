//! Line-oriented prompting over any `BufRead` / `Write` pair.

use std::io::{self, BufRead, Write};

use micromech_core::MechResult;

/// Question/answer channel for the interactive session.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print one line.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Ask a question and return the trimmed answer.
    ///
    /// Closed input is reported as [`io::ErrorKind::UnexpectedEof`].
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Ask until `parse` accepts the answer, printing each rejection.
    pub fn ask_until<T>(
        &mut self,
        question: &str,
        mut parse: impl FnMut(&str) -> MechResult<T>,
    ) -> io::Result<T> {
        loop {
            let answer = self.ask(question)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    tracing::debug!(error = %err, code = err.error_code(), "input rejected");
                    writeln!(self.output, "  {}", err)?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use micromech_core::validation::validate_positive_decimal;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_trims_answer() {
        let mut p = prompter("  Epoxy \n");
        assert_eq!(p.ask("Name: ").unwrap(), "Epoxy");
        assert_eq!(String::from_utf8(p.into_output()).unwrap(), "Name: ");
    }

    #[test]
    fn test_ask_until_reprompts() {
        let mut p = prompter("-2\n\n1,000\n2.8\n");
        let value = p
            .ask_until("E (GPa): ", |s| validate_positive_decimal(s))
            .unwrap();
        assert_eq!(value, dec!(2.8));

        let transcript = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(transcript.matches("E (GPa): ").count(), 4);
        assert_eq!(transcript.matches("Invalid value").count(), 3);
    }

    #[test]
    fn test_closed_input_is_eof() {
        let mut p = prompter("");
        let err = p.ask("Name: ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
