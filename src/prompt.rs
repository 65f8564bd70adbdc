//! Ask for a file name when it was not given on the command line.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Return `arg`, or ask `question` on stdout and read the answer from stdin.
pub fn path_or_prompt(arg: Option<PathBuf>, question: &str) -> io::Result<PathBuf> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    path_or_prompt_with(arg, question, &mut stdin.lock(), &mut stdout.lock())
}

pub fn path_or_prompt_with(
    arg: Option<PathBuf>,
    question: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<PathBuf> {
    if let Some(path) = arg {
        return Ok(path);
    }
    write!(output, "{}: ", question)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    if answer.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no file name given",
        ));
    }
    Ok(PathBuf::from(answer))
}
