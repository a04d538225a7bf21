//! Command line tokenizer
//!
//! Tokens are maximal runs of non-space bytes. Only `' '` delimits; runs of
//! spaces collapse into one delimiter. The first token is the command name,
//! parameters are numbered from 1.

const SPACE: u8 = b' ';

/// Locate the `index`-th parameter after the command name.
///
/// Returns `(offset, len)` into `line`, or `None` if `index` is 0 or fewer
/// parameters exist.
pub fn get_parameter(line: &str, index: usize) -> Option<(usize, usize)> {
    if index == 0 {
        return None;
    }

    let bytes = line.as_bytes();
    let mut pos = 0;
    let mut found = 0;

    while found < index {
        // Skip the current word, then the delimiter run after it
        pos += bytes[pos..].iter().take_while(|&&b| b != SPACE).count();
        pos += bytes[pos..].iter().take_while(|&&b| b == SPACE).count();

        if pos >= bytes.len() {
            return None;
        }
        found += 1;
    }

    let len = bytes[pos..].iter().take_while(|&&b| b != SPACE).count();
    Some((pos, len))
}

/// Slice of the `index`-th parameter, see [`get_parameter`].
pub fn parameter(line: &str, index: usize) -> Option<&str> {
    get_parameter(line, index).map(|(offset, len)| &line[offset..offset + len])
}

/// Number of parameters following the command name.
///
/// Trailing spaces do not count as an extra empty parameter.
pub fn parameter_count(line: &str) -> usize {
    // Every delimiter run that is followed by a word starts a parameter
    line.as_bytes()
        .windows(2)
        .filter(|pair| pair[0] == SPACE && pair[1] != SPACE)
        .count()
}

/// Iterator over every parameter after the command name.
pub fn parameters(line: &str) -> Parameters<'_> {
    Parameters { line, next: 1 }
}

/// Iterator returned by [`parameters`]
#[derive(Debug, Clone)]
pub struct Parameters<'a> {
    line: &'a str,
    next: usize,
}

impl<'a> Iterator for Parameters<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let (offset, len) = get_parameter(self.line, self.next)?;
        self.next += 1;
        Some(&self.line[offset..offset + len])
    }
}
