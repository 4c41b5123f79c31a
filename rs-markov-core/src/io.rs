use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;

/// Reads a whole text file into a single `String`.
pub fn read_text<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Joins the lines of a text with single spaces.
///
/// - Splits on `\n` / `\r\n`
/// - Spaces inside a line are kept as is
///
/// Example:
/// `"the cat\nsat\r\n"` → `"the cat sat"`
pub fn normalize_text(raw: &str) -> String {
	raw.lines().collect::<Vec<_>>().join(" ")
}
