//! babynames: extract ranked names from baby name popularity reports
//!
//! Each report is an HTML page with a `Popularity in YYYY` heading and a
//! table of rows holding a rank and two names. Extraction is a single pass
//! over the lines that produces the year followed by every name with its
//! best (lowest) rank, sorted by name.
//!
//! # Architecture
//!
//! - **Extractor**: pure line fold, no I/O ([`extractor`])
//! - **Input**: opens files and expands glob arguments ([`input`])
//! - **Writer**: console rendering and `.summary` files ([`writer`])
//! - **Batch**: independent per-file runs, optionally in parallel ([`batch`])
//!
//! # Example Usage
//!
//! ```
//! let report = r#"<h3 align="center">Popularity in 1990</h3>
//! <tr align="right"><td>1</td><td>Michael</td><td>Jessica</td>
//! <tr align="right"><td>2</td><td>Christopher</td><td>Ashley</td>"#;
//!
//! let summary = babynames::extract_text(report);
//! assert_eq!(
//!     summary.entries(),
//!     vec!["1990", "Ashley2", "Christopher2", "Jessica1", "Michael1"]
//! );
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod extractor;
pub mod input;
pub mod models;
pub mod output;
pub mod writer;

// Re-export commonly used types
pub use config::Config;
pub use extractor::{Extractor, extract, extract_text};
pub use input::{Expanded, expand_patterns, extract_file, extract_reader};
pub use models::{FileReport, NameRank, Rank, Summary};
pub use writer::{OutputFormat, summary_path, write_summary_file};
