//! Interactive prompts for `init` and save confirmations

use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

/// States of a yes/no question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Confirm {
    AwaitResponse,
    Yes,
    No,
}

/// Reads answers from `input`, writes questions to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Stdout> {
    /// Prompter on the terminal
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for a string; empty input returns `default`
    pub fn ask(&mut self, question: &str, default: &str) -> io::Result<String> {
        if default.is_empty() {
            write!(self.output, "{question}: ")?;
        } else {
            write!(self.output, "{question} [{default}]: ")?;
        }
        self.output.flush()?;

        let answer = self.read_answer()?;
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer
        })
    }

    /// Ask a yes/no question, re-asking until the answer is recognized
    pub fn confirm(&mut self, question: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        let mut state = Confirm::AwaitResponse;

        loop {
            match state {
                Confirm::Yes => return Ok(true),
                Confirm::No => return Ok(false),
                Confirm::AwaitResponse => {
                    write!(self.output, "{question} {hint} ")?;
                    self.output.flush()?;

                    let answer = self.read_answer()?;
                    state = match parse_yes_no(&answer, default) {
                        Some(true) => Confirm::Yes,
                        Some(false) => Confirm::No,
                        None => {
                            writeln!(self.output, "Please answer y or n.")?;
                            Confirm::AwaitResponse
                        }
                    };
                }
            }
        }
    }

    /// Read one trimmed line; end of input reads as an empty answer
    fn read_answer(&mut self) -> io::Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            writeln!(self.output)?;
        }
        Ok(line.trim().to_string())
    }
}

/// Interpret a yes/no answer; `None` means unrecognized
fn parse_yes_no(answer: &str, default: bool) -> Option<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
