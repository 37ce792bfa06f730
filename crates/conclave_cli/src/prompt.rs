//! Line-oriented typed prompts.
//!
//! # Invariants
//! - Malformed numbers, dates and non-UTF-8 lines re-prompt instead of failing.
//! - End of input surfaces as `PromptError::Eof` from every prompt.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub type PromptResult<T> = Result<T, PromptError>;

#[derive(Debug)]
pub enum PromptError {
    /// Input stream closed.
    Eof,
    Io(io::Error),
}

impl Display for PromptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eof => write!(f, "end of input"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PromptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Eof => None,
        }
    }
}

impl From<io::Error> for PromptError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Reads answers from `input`, writing labels and hints to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Raw line without its terminator; re-prompts on bytes that are not UTF-8.
    pub fn text(&mut self, label: &str) -> PromptResult<String> {
        loop {
            write!(self.output, "{label}")?;
            self.output.flush()?;

            let mut bytes = Vec::new();
            if self.input.read_until(b'\n', &mut bytes)? == 0 {
                return Err(PromptError::Eof);
            }
            while matches!(bytes.last(), Some(b'\n' | b'\r')) {
                bytes.pop();
            }
            match String::from_utf8(bytes) {
                Ok(line) => return Ok(line),
                Err(_) => writeln!(self.output, "Invalid input. Please enter plain text")?,
            }
        }
    }

    /// `None` for a blank answer.
    pub fn optional_text(&mut self, label: &str) -> PromptResult<Option<String>> {
        let line = self.text(label)?;
        let trimmed = line.trim();
        Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
    }

    pub fn integer<T: FromStr>(&mut self, label: &str) -> PromptResult<T> {
        loop {
            let line = self.text(label)?;
            match line.trim().parse() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "Invalid input. Please enter a valid integer")?,
            }
        }
    }

    /// Blank or `0` means "no id".
    pub fn optional_id(&mut self, label: &str) -> PromptResult<Option<i64>> {
        loop {
            let line = self.text(label)?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            match trimmed.parse::<i64>() {
                Ok(0) => return Ok(None),
                Ok(id) => return Ok(Some(id)),
                Err(_) => writeln!(self.output, "Invalid input. Please enter a valid integer")?,
            }
        }
    }

    pub fn date(&mut self, label: &str) -> PromptResult<NaiveDate> {
        loop {
            let line = self.text(label)?;
            match NaiveDate::parse_from_str(line.trim(), DATE_FORMAT) {
                Ok(date) => return Ok(date),
                Err(_) => writeln!(
                    self.output,
                    "Invalid input. Please enter a date as YYYY-MM-DD"
                )?,
            }
        }
    }

    /// True only for `y` (case-insensitive).
    pub fn confirm(&mut self, label: &str) -> PromptResult<bool> {
        let line = self.text(label)?;
        Ok(line.trim().eq_ignore_ascii_case("y"))
    }

    pub fn pause(&mut self) -> PromptResult<()> {
        self.text("\nPress Enter to continue...").map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::{PromptError, Prompter};
    use chrono::NaiveDate;

    fn run<T>(
        input: &str,
        ask: impl FnOnce(&mut Prompter<&[u8], &mut Vec<u8>>) -> T,
    ) -> (T, String) {
        let mut output = Vec::new();
        let value = {
            let mut prompter = Prompter::new(input.as_bytes(), &mut output);
            ask(&mut prompter)
        };
        (value, String::from_utf8(output).unwrap())
    }

    #[test]
    fn text_strips_line_terminators_only() {
        let (value, output) = run("  Grand Master \r\n", |p| p.text("Title: ").unwrap());
        assert_eq!(value, "  Grand Master ");
        assert_eq!(output, "Title: ");
    }

    #[test]
    fn integer_reprompts_until_parsable() {
        let (value, output) = run("abc\n 12 \n", |p| p.integer::<i64>("Id: ").unwrap());
        assert_eq!(value, 12);
        assert_eq!(
            output,
            "Id: Invalid input. Please enter a valid integer\nId: "
        );
    }

    #[test]
    fn optional_id_treats_blank_and_zero_as_none() {
        let (blank, _) = run("\n", |p| p.optional_id("Leader: ").unwrap());
        let (zero, _) = run("0\n", |p| p.optional_id("Leader: ").unwrap());
        let (some, output) = run("x\n101\n", |p| p.optional_id("Leader: ").unwrap());
        assert_eq!(blank, None);
        assert_eq!(zero, None);
        assert_eq!(some, Some(101));
        assert!(output.contains("Invalid input"));
    }

    #[test]
    fn optional_text_drops_blank_answers() {
        let (blank, _) = run("   \n", |p| p.optional_text("Middle: ").unwrap());
        let (value, _) = run(" Maud \n", |p| p.optional_text("Middle: ").unwrap());
        assert_eq!(blank, None);
        assert_eq!(value.as_deref(), Some("Maud"));
    }

    #[test]
    fn date_reprompts_on_invalid_calendar_day() {
        let (value, output) = run("1990-02-30\n1990-02-28\n", |p| p.date("Dob: ").unwrap());
        assert_eq!(value, NaiveDate::from_ymd_opt(1990, 2, 28).unwrap());
        assert!(output.contains("YYYY-MM-DD"));
    }

    #[test]
    fn confirm_accepts_only_y() {
        let (yes, _) = run("Y\n", |p| p.confirm("Sure? ").unwrap());
        let (yes_word, _) = run("yes\n", |p| p.confirm("Sure? ").unwrap());
        assert!(yes);
        assert!(!yes_word);
    }

    #[test]
    fn non_utf8_line_reprompts() {
        let mut output = Vec::new();
        let value = Prompter::new(&b"\xff\xfe\nOracle\n"[..], &mut output)
            .text("Title: ")
            .unwrap();
        let output = String::from_utf8(output).unwrap();

        assert_eq!(value, "Oracle");
        assert_eq!(
            output,
            "Title: Invalid input. Please enter plain text\nTitle: "
        );
    }

    #[test]
    fn exhausted_input_is_eof() {
        let (result, _) = run("", |p| p.integer::<i64>("Id: "));
        assert!(matches!(result, Err(PromptError::Eof)));
    }
}
