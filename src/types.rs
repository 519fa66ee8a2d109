//! Type definitions for headers and parsed rows

use crate::error::{ParseError, Result};
use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::ops::Deref;

/// One parsed data row, iterated in header order
pub type Row = IndexMap<String, String>;

/// Prefix for generated column names (`column_1`, `column_2`, ...)
pub const GENERATED_COLUMN_PREFIX: &str = "column_";

/// Ordered, duplicate-free list of column names
///
/// A `Header` can only be built through validation, so holding one means the
/// names are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    /// Validate column names and build a header
    ///
    /// # Examples
    ///
    /// ```
    /// use delimline::Header;
    ///
    /// assert!(Header::new(["time", "value1", "value2"]).is_ok());
    /// assert!(Header::new(["time", "value1", "value1"]).is_err());
    /// ```
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        let mut seen = IndexSet::with_capacity(columns.len());
        let mut duplicates = IndexSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                duplicates.insert(column.clone());
            }
        }

        if !duplicates.is_empty() {
            return Err(ParseError::DuplicateColumn {
                header: columns,
                duplicates: duplicates.into_iter().collect(),
            });
        }

        Ok(Header { columns })
    }

    /// Generate `column_1 ... column_n`
    pub fn generated(n: usize) -> Self {
        Header {
            columns: (1..=n)
                .map(|i| format!("{}{}", GENERATED_COLUMN_PREFIX, i))
                .collect(),
        }
    }

    /// Check every column against a whitelist
    pub fn check_permitted(&self, permitted: &IndexSet<String>) -> Result<()> {
        match self.columns.iter().find(|c| !permitted.contains(*c)) {
            Some(column) => Err(ParseError::InvalidColumn {
                column: column.clone(),
                permitted: permitted.iter().cloned().collect(),
            }),
            None => Ok(()),
        }
    }

    /// Zip field values against the columns
    ///
    /// Missing trailing fields leave their columns out, extra fields are dropped.
    pub fn zip_partial<I>(&self, values: I) -> Row
    where
        I: IntoIterator<Item = String>,
    {
        self.columns.iter().cloned().zip(values).collect()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<String> {
        self.columns
    }
}

impl Deref for Header {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.columns
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.columns.join(","))
    }
}

/// Observable position of a parser in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserState {
    /// Skip rows configured but stream start not yet acknowledged
    AwaitingStart,
    /// Discarding leading rows
    Skipping,
    /// Next line resolves the header
    HeaderPending,
    /// Header resolved, every line is data
    Ready,
}

/// What a restart does to a header derived from the stream
///
/// Explicit headers are never touched by a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HeaderRestart {
    /// Keep the generated or discovered header
    #[default]
    Keep,
    /// Drop it and resolve again from the next non-skipped line
    Rediscover,
}
