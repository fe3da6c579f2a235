//! Terminal prompt for the output location.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Ask for the output path on `output`, reading the answer from `input`.
///
/// An empty answer accepts `suggested`; end of input declines. Answers
/// without an extension get `.pdf`.
pub fn ask_output_location(
    input: &mut impl BufRead,
    output: &mut impl Write,
    suggested: &Path,
) -> io::Result<Option<PathBuf>> {
    write!(output, "Save merged PDF as [{}]: ", suggested.display())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }
    let answer = line.trim();
    if answer.is_empty() {
        return Ok(Some(suggested.to_path_buf()));
    }
    let mut path = PathBuf::from(answer);
    if path.extension().is_none() {
        path.set_extension("pdf");
    }
    Ok(Some(path))
}

/// [`ask_output_location`] on the process's stdin and stderr.
pub fn ask_on_terminal(suggested: &Path) -> io::Result<Option<PathBuf>> {
    ask_output_location(&mut io::stdin().lock(), &mut io::stderr(), suggested)
}
