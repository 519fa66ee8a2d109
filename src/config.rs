//! Parser configuration

use crate::types::HeaderRestart;
use indexmap::IndexSet;

/// Options recognized by [`DelimitedLineParser::from_config`]
///
/// `header` takes precedence over `has_header_row`: an explicit header is
/// never discovered from the stream.
///
/// # Examples
///
/// ```
/// use delimline::ParserConfig;
///
/// let config = ParserConfig::new()
///     .has_header_row(true)
///     .skip_header_rows(2)
///     .permissible_columns(["time", "value"]);
/// assert_eq!(config.skip_header_rows, 2);
/// ```
///
/// [`DelimitedLineParser::from_config`]: crate::DelimitedLineParser::from_config
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ParserConfig {
    /// Explicit header line, split with the parser's splitter
    pub header: Option<String>,
    /// Read the header from the first non-skipped line
    pub has_header_row: bool,
    /// Leading lines to discard before header or data processing
    pub skip_header_rows: usize,
    /// Whitelist for resolved column names
    pub permissible_columns: Option<IndexSet<String>>,
    pub header_restart: HeaderRestart,
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit header line (builder pattern)
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Discover the header from the stream (builder pattern)
    pub fn has_header_row(mut self, has: bool) -> Self {
        self.has_header_row = has;
        self
    }

    /// Set the number of leading lines to skip (builder pattern)
    pub fn skip_header_rows(mut self, rows: usize) -> Self {
        self.skip_header_rows = rows;
        self
    }

    /// Restrict resolved columns to this set (builder pattern)
    pub fn permissible_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissible_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Choose what a restart does to a derived header (builder pattern)
    pub fn header_restart(mut self, policy: HeaderRestart) -> Self {
        self.header_restart = policy;
        self
    }
}
