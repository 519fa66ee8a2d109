//! # delimline
//!
//! Streaming, header-aware parsing of delimited text lines.
//!
//! Each call to [`DelimitedLineParser::parse`] takes one line and returns
//! either a [`Row`] (column name to raw string value, in header order) or
//! `None` when the line was consumed as a skip row or as the header.
//! Reading lines from files, and turning the raw strings into typed values,
//! is left to the caller.
//!
//! ## Header sources
//!
//! - explicit: [`DelimitedLineParser::with_header`]
//! - generated `column_1 ... column_n`: `DelimitedLineParser::new(splitter, false, skip)`
//! - discovered from the stream: `DelimitedLineParser::new(splitter, true, skip)`
//!
//! ## Example
//!
//! ```
//! use delimline::{CsvSplitter, DelimitedLineParser, ParserConfig};
//!
//! // Two files concatenated, each with a header line
//! let lines = ["id,name", "1,Alice", "id,name", "2,Bob"];
//!
//! let config = ParserConfig::new().has_header_row(true);
//! let mut parser = DelimitedLineParser::from_config(CsvSplitter::csv(), &config)?;
//!
//! let first = parser.rows(&lines[..2]).collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(first[0]["name"], "Alice");
//!
//! // Second file: skip its header line
//! let mut second = DelimitedLineParser::from_config(
//!     CsvSplitter::csv(),
//!     &config.clone().has_header_row(false).header("id,name").skip_header_rows(1),
//! )?;
//! second.restart_from_beginning();
//! let rows = second.rows(&lines[2..]).collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(rows[0]["id"], "2");
//! # Ok::<(), delimline::ParseError>(())
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod split;
pub mod types;

// Re-export main types for convenience
pub use config::ParserConfig;
pub use error::{ParseError, Result};
pub use parser::{DelimitedLineParser, ParsedRows};
pub use split::{CsvSplitter, LineSplitter};
pub use types::{Header, HeaderRestart, ParserState, Row};
