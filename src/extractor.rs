//! Single-pass extraction of year and name/rank rows from report text
//!
//! The extractor is a fold over lines. Each line is tested independently
//! against two patterns:
//!
//! - **Year**: `Popularity in NNNN` anywhere in the line. Every match
//!   overwrites the stored year, so the last heading in a document wins.
//! - **Row**: a table row anchored at line start of the shape
//!   `<tr align="right"><td>RANK</td><td>NAME1</td><td>NAME2</td>`.
//!   Both names are recorded with the shared rank.
//!
//! Lines matching neither pattern are skipped. Nothing here touches the
//! filesystem; see [`crate::input`] for reading files.

use regex::Regex;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::models::{NameRank, Rank, Summary};

static YEAR_REGEX: OnceLock<Regex> = OnceLock::new();
static ROW_REGEX: OnceLock<Regex> = OnceLock::new();

fn year_regex() -> &'static Regex {
    YEAR_REGEX.get_or_init(|| {
        Regex::new(r"Popularity in ([0-9]{4})").expect("year pattern is valid")
    })
}

fn row_regex() -> &'static Regex {
    ROW_REGEX.get_or_init(|| {
        Regex::new(r#"^<tr\s\w+="\w+"><td>([0-9]+)</td><td>(\w+)</td><td>(\w+)</td>"#)
            .expect("row pattern is valid")
    })
}

/// Incremental extraction state for one document
///
/// Feed lines in order with [`Extractor::feed`], then call
/// [`Extractor::finish`] to get the sorted [`Summary`].
#[derive(Debug, Default)]
pub struct Extractor {
    year: Option<String>,
    best: BTreeMap<String, Rank>,
    rows_matched: usize,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one line, updating the year and best-rank map
    pub fn feed(&mut self, line: &str) {
        if let Some(year) = parse_year(line) {
            if let Some(previous) = self.year.as_deref() {
                if previous != year {
                    log::debug!("Year heading changed from {} to {}", previous, year);
                }
            }
            self.year = Some(year.to_string());
        }

        if let Some((rank, first, second)) = parse_row(line) {
            self.rows_matched += 1;
            self.record(first, &rank);
            self.record(second, &rank);
        }
    }

    /// Insert a name, or lower its stored rank if this one is numerically smaller
    fn record(&mut self, name: &str, rank: &Rank) {
        match self.best.get_mut(name) {
            Some(stored) => {
                if rank.numeric_cmp(stored) == Ordering::Less {
                    *stored = rank.clone();
                }
            }
            None => {
                self.best.insert(name.to_string(), rank.clone());
            }
        }
    }

    pub fn finish(self) -> Summary {
        log::debug!(
            "Extracted {} rows, {} unique names, year {:?}",
            self.rows_matched,
            self.best.len(),
            self.year
        );

        // BTreeMap iteration is already ascending by name
        let names = self
            .best
            .into_iter()
            .map(|(name, rank)| NameRank { name, rank })
            .collect();

        Summary {
            year: self.year,
            names,
        }
    }
}

/// Extract a summary from an in-memory sequence of lines
///
/// # Example
/// ```
/// let lines = [
///     r#"<h3 align="center">Popularity in 1990</h3>"#,
///     r#"<tr align="right"><td>1</td><td>Michael</td><td>Jessica</td>"#,
/// ];
/// let summary = babynames::extract(lines);
/// assert_eq!(summary.entries(), vec!["1990", "Jessica1", "Michael1"]);
/// ```
pub fn extract<I, S>(lines: I) -> Summary
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut extractor = Extractor::new();
    for line in lines {
        extractor.feed(line.as_ref());
    }
    extractor.finish()
}

/// Extract from a whole document held in one string
pub fn extract_text(text: &str) -> Summary {
    extract(text.lines())
}

fn parse_year(line: &str) -> Option<&str> {
    year_regex()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Returns `(rank, name1, name2)` for a matching row
fn parse_row(line: &str) -> Option<(Rank, &str, &str)> {
    let caps = row_regex().captures(line)?;
    let rank = Rank::parse(caps.get(1)?.as_str())?;
    Some((rank, caps.get(2)?.as_str(), caps.get(3)?.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADING: &str = r#"<h3 align="center">Popularity in 1990</h3>"#;

    fn row(rank: u32, first: &str, second: &str) -> String {
        format!(
            r#"<tr align="right"><td>{}</td><td>{}</td><td>{}</td>"#,
            rank, first, second
        )
    }

    #[test]
    fn test_scenario_from_report() {
        let lines = vec![
            HEADING.to_string(),
            row(1, "Michael", "Jessica"),
            row(2, "Christopher", "Ashley"),
        ];
        let summary = extract(&lines);
        assert_eq!(
            summary.entries(),
            vec!["1990", "Ashley2", "Christopher2", "Jessica1", "Michael1"]
        );
    }

    #[test]
    fn test_year_only() {
        let summary = extract([HEADING]);
        assert_eq!(summary.year.as_deref(), Some("1990"));
        assert!(summary.names.is_empty());
        assert_eq!(summary.entries(), vec!["1990"]);
    }

    #[test]
    fn test_no_year() {
        let summary = extract([row(1, "Michael", "Jessica"), row(2, "Christopher", "Ashley")]);
        assert_eq!(summary.year, None);
        assert_eq!(
            summary.entries(),
            vec!["", "Ashley2", "Christopher2", "Jessica1", "Michael1"]
        );
    }

    #[test]
    fn test_empty_input() {
        let summary = extract(Vec::<String>::new());
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.entries(), vec![""]);
    }

    #[test]
    fn test_better_rank_later_wins() {
        let summary = extract([row(5, "Michael", "Jessica"), row(1, "Michael", "Emily")]);
        assert_eq!(summary.rank_of("Michael"), Some("1"));
        let michaels: Vec<_> = summary
            .entries()
            .into_iter()
            .filter(|e| e.starts_with("Michael"))
            .collect();
        assert_eq!(michaels, vec!["Michael1"]);
    }

    #[test]
    fn test_worse_rank_later_ignored() {
        let summary = extract([row(3, "Taylor", "Jordan"), row(40, "Jordan", "Taylor")]);
        assert_eq!(summary.rank_of("Taylor"), Some("3"));
        assert_eq!(summary.rank_of("Jordan"), Some("3"));
    }

    #[test]
    fn test_rank_comparison_is_numeric() {
        // "10" < "9" as strings, but 9 < 10 as ranks
        let summary = extract([row(10, "Casey", "Riley"), row(9, "Casey", "Avery")]);
        assert_eq!(summary.rank_of("Casey"), Some("9"));

        let summary = extract([row(9, "Casey", "Riley"), row(10, "Casey", "Avery")]);
        assert_eq!(summary.rank_of("Casey"), Some("9"));
    }

    #[test]
    fn test_same_name_in_both_columns() {
        let summary = extract([row(7, "Jessie", "Jessie")]);
        assert_eq!(summary.names, vec![NameRank::new("Jessie", 7)]);
    }

    #[test]
    fn test_names_sorted_lexicographically_not_by_rank() {
        let summary = extract([
            row(1, "Zachary", "Yolanda"),
            row(2, "Aaron", "Abigail"),
            row(3, "Ann", "Anna"),
        ]);
        let names: Vec<&str> = summary.names.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Aaron", "Abigail", "Ann", "Anna", "Yolanda", "Zachary"]
        );
    }

    #[test]
    fn test_sort_is_case_sensitive() {
        let summary = extract([row(1, "alice", "Bob")]);
        let names: Vec<&str> = summary.names.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "alice"]);
    }

    #[test]
    fn test_last_year_heading_wins() {
        let summary = extract([
            "<h3>Popularity in 1990</h3>",
            "<h3>Popularity in 1992</h3>",
        ]);
        assert_eq!(summary.year.as_deref(), Some("1992"));
    }

    #[test]
    fn test_year_requires_four_digits() {
        assert_eq!(extract(["Popularity in 199"]).year, None);
        assert_eq!(extract(["Popularity in 19905"]).year.as_deref(), Some("1990"));
        assert_eq!(extract(["popularity in 1990"]).year, None);
    }

    #[test]
    fn test_row_must_start_at_line_start() {
        let indented = format!("  {}", row(1, "Michael", "Jessica"));
        let prefixed = format!("<table>{}", row(1, "Michael", "Jessica"));
        let summary = extract([indented, prefixed]);
        assert!(summary.names.is_empty());
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let summary = extract([
            r#"<tr align="right"><td>x</td><td>Michael</td><td>Jessica</td>"#,
            r#"<tr align="right"><td>1</td><td>Michael</td></tr>"#,
            r#"<tr align="right"><td>1</td><td>Mary Ann</td><td>Jessica</td>"#,
            r#"<tr><td>1</td><td>Michael</td><td>Jessica</td>"#,
            "",
            "plain text",
        ]);
        assert!(summary.names.is_empty());
        assert_eq!(summary.year, None);
    }

    #[test]
    fn test_rank_beyond_u32_is_kept() {
        let summary = extract([
            r#"<tr align="right"><td>4294967296</td><td>Dana</td><td>Lee</td>"#,
        ]);
        assert_eq!(summary.entries(), vec!["", "Dana4294967296", "Lee4294967296"]);
    }

    #[test]
    fn test_huge_ranks_compare_numerically() {
        let summary = extract([
            r#"<tr align="right"><td>100000000000000000000</td><td>Dana</td><td>Lee</td>"#,
            r#"<tr align="right"><td>99999999999999999999</td><td>Dana</td><td>Kim</td>"#,
            r#"<tr align="right"><td>4</td><td>Lee</td><td>Robin</td>"#,
        ]);
        assert_eq!(summary.rank_of("Dana"), Some("99999999999999999999"));
        assert_eq!(summary.rank_of("Lee"), Some("4"));
    }

    #[test]
    fn test_zero_padded_rank_kept_as_written() {
        let summary = extract([
            r#"<tr align="right"><td>007</td><td>Bond</td><td>Moneypenny</td>"#,
            r#"<tr align="right"><td>10</td><td>Bond</td><td>Q</td>"#,
        ]);
        assert_eq!(summary.rank_of("Bond"), Some("007"));
        assert_eq!(
            summary.entries(),
            vec!["", "Bond007", "Moneypenny007", "Q10"]
        );
    }

    #[test]
    fn test_equal_rank_keeps_first_spelling() {
        let summary = extract([
            r#"<tr align="right"><td>07</td><td>Bond</td><td>Moneypenny</td>"#,
            r#"<tr align="right"><td>7</td><td>Bond</td><td>Q</td>"#,
        ]);
        assert_eq!(summary.rank_of("Bond"), Some("07"));
    }

    #[test]
    fn test_trailing_content_and_crlf() {
        let line = format!("{}</tr>\r", row(12, "Sam", "Alex"));
        let summary = extract([line, format!("{}\r", HEADING)]);
        assert_eq!(summary.rank_of("Sam"), Some("12"));
        assert_eq!(summary.year.as_deref(), Some("1990"));
    }

    #[test]
    fn test_line_matching_both_patterns() {
        let line = format!("{} Popularity in 2006", row(3, "Matthew", "Brittany"));
        let summary = extract([line]);
        assert_eq!(summary.year.as_deref(), Some("2006"));
        assert_eq!(summary.rank_of("Matthew"), Some("3"));
        assert_eq!(summary.rank_of("Brittany"), Some("3"));
    }

    #[test]
    fn test_unicode_word_names() {
        let summary = extract([row(8, "José", "Zoë")]);
        assert_eq!(summary.rank_of("José"), Some("8"));
        assert_eq!(summary.rank_of("Zoë"), Some("8"));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let lines = vec![
            row(3, "Matthew", "Brittany"),
            HEADING.to_string(),
            row(1, "Michael", "Jessica"),
            row(2, "Jessica", "Ashley"),
        ];
        assert_eq!(extract(&lines), extract(&lines));
    }

    #[test]
    fn test_extract_text_matches_fed_lines() {
        let text = format!("{}\n{}\n{}\n", HEADING, row(1, "Michael", "Jessica"), "<p>footer</p>");
        assert_eq!(extract_text(&text).entries(), vec!["1990", "Jessica1", "Michael1"]);

        let mut extractor = Extractor::new();
        for line in text.lines() {
            extractor.feed(line);
        }
        assert_eq!(extractor.finish(), extract_text(&text));
    }
}
