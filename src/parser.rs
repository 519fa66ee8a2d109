//! Header-aware delimited line parsing
//!
//! [`DelimitedLineParser`] turns one line at a time into a [`Row`] keyed by
//! column name. The header comes from one of three places:
//!
//! - an explicit header line given at construction
//! - generated names (`column_1`, `column_2`, ...) sized to the first data line
//! - the first non-skipped line of the stream
//!
//! Leading lines can be skipped, e.g. repeated headers when several files are
//! concatenated. Skipping only starts once the caller has declared it is
//! reading from the first line with
//! [`restart_from_beginning`](DelimitedLineParser::restart_from_beginning).

use crate::config::ParserConfig;
use crate::error::{ParseError, Result};
use crate::split::{CsvSplitter, LineSplitter};
use crate::types::{Header, HeaderRestart, ParserState, Row};
use indexmap::IndexSet;
use log::{debug, trace};

/// How a header is derived when none is given explicitly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderMode {
    Generate,
    Discover,
}

#[derive(Debug, Clone)]
enum HeaderSlot {
    Explicit(Header),
    Pending(HeaderMode),
    Derived(HeaderMode, Header),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipProgress {
    AwaitingStart,
    Skipping(usize),
    Done,
}

/// Streaming parser that maps delimited lines onto named columns
///
/// Not safe to share between callers without external locking; use one
/// parser per input stream.
///
/// # Examples
///
/// ```
/// use delimline::{CsvSplitter, DelimitedLineParser};
///
/// let mut parser = DelimitedLineParser::with_header(CsvSplitter::csv(), "time,value")?;
/// let row = parser.parse("2024-01-01,42")?.unwrap();
/// assert_eq!(row["value"], "42");
/// # Ok::<(), delimline::ParseError>(())
/// ```
///
/// # Skipping leading rows
///
/// ```
/// use delimline::{CsvSplitter, DelimitedLineParser};
///
/// let mut parser = DelimitedLineParser::new(CsvSplitter::csv(), true, 1);
/// parser.restart_from_beginning();
///
/// assert_eq!(parser.parse("# exported by tool v2")?, None);
/// assert_eq!(parser.parse("id,name")?, None);
/// let row = parser.parse("1,Alice")?.unwrap();
/// assert_eq!(row["name"], "Alice");
/// # Ok::<(), delimline::ParseError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DelimitedLineParser<S = CsvSplitter> {
    splitter: S,
    header: HeaderSlot,
    skip: SkipProgress,

    // Configuration
    skip_header_rows: usize,
    permissible_columns: Option<IndexSet<String>>,
    header_restart: HeaderRestart,
}

impl<S: LineSplitter> DelimitedLineParser<S> {
    /// Create a parser without an explicit header
    ///
    /// With `has_header_row` the first non-skipped line becomes the header,
    /// otherwise columns are named `column_1 ... column_n` after the first
    /// data line.
    pub fn new(splitter: S, has_header_row: bool, skip_header_rows: usize) -> Self {
        let mode = if has_header_row {
            HeaderMode::Discover
        } else {
            HeaderMode::Generate
        };
        Self::build(splitter, HeaderSlot::Pending(mode), skip_header_rows, None, HeaderRestart::Keep)
    }

    /// Create a parser from an explicit header line
    ///
    /// Fails with [`ParseError::DuplicateColumn`] if a column name repeats.
    pub fn with_header(splitter: S, header: &str) -> Result<Self> {
        let header = Header::new(splitter.split(header))?;
        Ok(Self::build(splitter, HeaderSlot::Explicit(header), 0, None, HeaderRestart::Keep))
    }

    /// Create a parser from a full configuration
    ///
    /// An explicit header is split and validated here, so a bad header
    /// prevents the parser from being created.
    pub fn from_config(splitter: S, config: &ParserConfig) -> Result<Self> {
        let slot = match &config.header {
            Some(line) => {
                let header = Header::new(splitter.split(line))?;
                if let Some(permitted) = &config.permissible_columns {
                    header.check_permitted(permitted)?;
                }
                HeaderSlot::Explicit(header)
            }
            None if config.has_header_row => HeaderSlot::Pending(HeaderMode::Discover),
            None => HeaderSlot::Pending(HeaderMode::Generate),
        };

        Ok(Self::build(
            splitter,
            slot,
            config.skip_header_rows,
            config.permissible_columns.clone(),
            config.header_restart,
        ))
    }

    fn build(
        splitter: S,
        header: HeaderSlot,
        skip_header_rows: usize,
        permissible_columns: Option<IndexSet<String>>,
        header_restart: HeaderRestart,
    ) -> Self {
        let skip = if skip_header_rows > 0 {
            SkipProgress::AwaitingStart
        } else {
            SkipProgress::Done
        };

        DelimitedLineParser {
            splitter,
            header,
            skip,
            skip_header_rows,
            permissible_columns,
            header_restart,
        }
    }

    /// Parse one line
    ///
    /// Returns `Ok(None)` for a line consumed as a skip row or as the header,
    /// `Ok(Some(row))` for data. A row with fewer fields than the header
    /// omits the trailing columns; extra fields are dropped.
    ///
    /// A failed call leaves the parser state unchanged.
    ///
    /// # Errors
    ///
    /// - [`ParseError::IllegalState`] if skip rows are configured and
    ///   [`restart_from_beginning`](Self::restart_from_beginning) was never called
    /// - [`ParseError::DuplicateColumn`] if a discovered header repeats a name
    /// - [`ParseError::InvalidColumn`] if a resolved column is not permitted
    pub fn parse(&mut self, line: &str) -> Result<Option<Row>> {
        match self.skip {
            SkipProgress::AwaitingStart => {
                return Err(ParseError::IllegalState(format!(
                    "{} header row(s) must be skipped but the stream start was never \
                     acknowledged; call restart_from_beginning() before parsing",
                    self.skip_header_rows
                )));
            }
            SkipProgress::Skipping(remaining) => {
                trace!("Skipping header row ({} remaining): {}", remaining - 1, line);
                self.skip = if remaining > 1 {
                    SkipProgress::Skipping(remaining - 1)
                } else {
                    SkipProgress::Done
                };
                return Ok(None);
            }
            SkipProgress::Done => {}
        }

        let values = self.splitter.split(line);

        let mode = match &self.header {
            HeaderSlot::Explicit(header) | HeaderSlot::Derived(_, header) => {
                return Ok(Some(header.zip_partial(values)));
            }
            HeaderSlot::Pending(mode) => *mode,
        };

        match mode {
            HeaderMode::Discover => {
                let header = self.permit(Header::new(values)?)?;
                debug!("Discovered header from stream: {}", header);
                self.header = HeaderSlot::Derived(mode, header);
                Ok(None)
            }
            HeaderMode::Generate => {
                let header = self.permit(Header::generated(values.len()))?;
                debug!("Generated {} column names", header.len());
                let row = header.zip_partial(values);
                self.header = HeaderSlot::Derived(mode, header);
                Ok(Some(row))
            }
        }
    }

    /// Declare that the next line is the first line of the stream
    ///
    /// Resets the skip counter to its configured value. Idempotent, and must
    /// be called before the first [`parse`](Self::parse) whenever skip rows
    /// are configured. Calling it again later reprocesses a stream from the
    /// start.
    ///
    /// Explicit headers are kept. A generated or discovered header is kept
    /// under [`HeaderRestart::Keep`] and cleared under
    /// [`HeaderRestart::Rediscover`].
    pub fn restart_from_beginning(&mut self) {
        self.skip = if self.skip_header_rows > 0 {
            SkipProgress::Skipping(self.skip_header_rows)
        } else {
            SkipProgress::Done
        };

        if self.header_restart == HeaderRestart::Rediscover {
            if let HeaderSlot::Derived(mode, _) = self.header {
                debug!("Clearing derived header for rediscovery");
                self.header = HeaderSlot::Pending(mode);
            }
        }
    }

    /// Replace the header with explicit column names
    ///
    /// On error the current header is left in place.
    pub fn set_field_names<I, T>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let header = self.permit(Header::new(names)?)?;
        debug!("Header set explicitly: {}", header);
        self.header = HeaderSlot::Explicit(header);
        Ok(())
    }

    /// Split a header line and use it as explicit column names
    pub fn set_field_names_from_line(&mut self, line: &str) -> Result<()> {
        let names = self.splitter.split(line);
        self.set_field_names(names)
    }

    /// Resolved column names, if any
    pub fn field_names(&self) -> Option<&[String]> {
        match &self.header {
            HeaderSlot::Explicit(header) | HeaderSlot::Derived(_, header) => Some(header.columns()),
            HeaderSlot::Pending(_) => None,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ParserState {
        match (self.skip, &self.header) {
            (SkipProgress::AwaitingStart, _) => ParserState::AwaitingStart,
            (SkipProgress::Skipping(_), _) => ParserState::Skipping,
            (SkipProgress::Done, HeaderSlot::Pending(_)) => ParserState::HeaderPending,
            (SkipProgress::Done, _) => ParserState::Ready,
        }
    }

    /// Number of leading rows skipped after each restart
    pub fn skip_header_rows(&self) -> usize {
        self.skip_header_rows
    }

    pub fn splitter(&self) -> &S {
        &self.splitter
    }

    /// Parse every line from an iterator, yielding data rows only
    ///
    /// # Examples
    ///
    /// ```
    /// use delimline::{CsvSplitter, DelimitedLineParser};
    ///
    /// let mut parser = DelimitedLineParser::new(CsvSplitter::csv(), true, 0);
    /// let rows = parser
    ///     .rows(["id,name", "1,Alice", "2,Bob"])
    ///     .collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(rows.len(), 2);
    /// assert_eq!(rows[1]["name"], "Bob");
    /// # Ok::<(), delimline::ParseError>(())
    /// ```
    pub fn rows<I>(&mut self, lines: I) -> ParsedRows<'_, S, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        ParsedRows {
            parser: self,
            lines: lines.into_iter(),
        }
    }

    fn permit(&self, header: Header) -> Result<Header> {
        if let Some(permitted) = &self.permissible_columns {
            header.check_permitted(permitted)?;
        }
        Ok(header)
    }
}

/// Iterator over parsed data rows
///
/// Skipped and header lines are consumed silently; errors are yielded and
/// iteration may continue afterwards.
pub struct ParsedRows<'a, S, I> {
    parser: &'a mut DelimitedLineParser<S>,
    lines: I,
}

impl<'a, S, I> Iterator for ParsedRows<'a, S, I>
where
    S: LineSplitter,
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            match self.parser.parse(line.as_ref()) {
                Ok(Some(row)) => return Some(Ok(row)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
