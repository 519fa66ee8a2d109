//! Line splitting primitives
//!
//! A [`LineSplitter`] turns one line of text into its ordered fields. The
//! line parser treats it as opaque, so any closure with the right shape
//! works too:
//!
//! ```
//! use delimline::LineSplitter;
//!
//! let pipes = |line: &str| line.split('|').map(str::to_string).collect::<Vec<_>>();
//! assert_eq!(pipes.split("a|b"), vec!["a", "b"]);
//! ```

/// Splits a single line into ordered fields
pub trait LineSplitter {
    fn split(&self, line: &str) -> Vec<String>;
}

impl<F> LineSplitter for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn split(&self, line: &str) -> Vec<String> {
        self(line)
    }
}

/// Quote-aware splitter with RFC 4180-like behavior
///
/// Inside a quoted section the delimiter is literal and a doubled quote
/// stands for one quote character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvSplitter {
    delimiter: u8,
    quote_char: Option<u8>,
}

impl CsvSplitter {
    /// Create a splitter with custom delimiter and quote character
    pub fn new(delimiter: u8, quote_char: u8) -> Self {
        Self {
            delimiter,
            quote_char: Some(quote_char),
        }
    }

    /// Comma delimited, double-quote quoting
    pub fn csv() -> Self {
        Self::new(b',', b'"')
    }

    /// Tab delimited, no quoting
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            quote_char: None,
        }
    }

    /// Set custom delimiter (builder pattern)
    pub fn delimiter(mut self, delim: u8) -> Self {
        self.delimiter = delim;
        self
    }

    /// Set custom quote character (builder pattern)
    pub fn quote_char(mut self, quote: u8) -> Self {
        self.quote_char = Some(quote);
        self
    }

    /// Treat quote characters as ordinary field content
    pub fn without_quoting(mut self) -> Self {
        self.quote_char = None;
        self
    }

    fn split_unquoted(&self, line: &str) -> Vec<String> {
        line.split(self.delimiter as char)
            .map(str::to_string)
            .collect()
    }
}

impl Default for CsvSplitter {
    fn default() -> Self {
        Self::csv()
    }
}

impl LineSplitter for CsvSplitter {
    fn split(&self, line: &str) -> Vec<String> {
        let quote = match self.quote_char {
            Some(q) => q as char,
            None => return self.split_unquoted(line),
        };
        let delimiter = self.delimiter as char;

        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch == quote {
                if in_quotes {
                    // "" inside quotes is an escaped quote
                    if chars.peek() == Some(&quote) {
                        current.push(quote);
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            } else if ch == delimiter && !in_quotes {
                fields.push(std::mem::take(&mut current));
            } else {
                current.push(ch);
            }
        }

        fields.push(current);
        fields
    }
}
