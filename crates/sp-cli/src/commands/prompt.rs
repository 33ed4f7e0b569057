//! Line-based input for the interactive modes

use std::io::{self, BufRead, Write};

/// Control words recognized on a line of their own (case-insensitive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    /// Finish the current query
    End,
    Skip,
    Solution,
    Hint,
    Schema,
    Quit,
}

impl Keyword {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_uppercase().as_str() {
            "END" => Some(Keyword::End),
            "SKIP" => Some(Keyword::Skip),
            "SOLUTION" => Some(Keyword::Solution),
            "HINT" => Some(Keyword::Hint),
            "SCHEMA" => Some(Keyword::Schema),
            "QUIT" | "EXIT" | "BACK" => Some(Keyword::Quit),
            _ => None,
        }
    }
}

/// What the user entered
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Input {
    /// Query text collected up to `END` (may be empty)
    Query(String),
    /// A control word other than `END`
    Command(Keyword),
    /// Input closed
    Eof,
}

/// Collect lines until `END`, one of `accepted`, or end of input.
///
/// Control words outside `accepted` are treated as query text. Input that
/// ends without `END` still yields the lines read so far.
pub(crate) fn read_block<R: BufRead>(reader: &mut R, accepted: &[Keyword]) -> io::Result<Input> {
    let mut lines: Vec<String> = Vec::new();
    let mut buf = String::new();

    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            return Ok(if lines.iter().all(|l| l.trim().is_empty()) {
                Input::Eof
            } else {
                Input::Query(lines.join("\n").trim().to_string())
            });
        }

        let line = buf.trim_end_matches(['\r', '\n']);
        match Keyword::parse(line) {
            Some(Keyword::End) => return Ok(Input::Query(lines.join("\n").trim().to_string())),
            Some(k) if accepted.contains(&k) => return Ok(Input::Command(k)),
            _ => lines.push(line.to_string()),
        }
    }
}

/// Ask a yes/no question; anything but `y`/`yes` is no
pub(crate) fn confirm<R: BufRead>(reader: &mut R, prompt: &str) -> io::Result<bool> {
    print!("{} (y/n): ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    reader.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
