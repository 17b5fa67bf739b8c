//! Text dataset ingestion.
//!
//! Both formats hold one record per line with two comma-separated integer fields:
//!
//! - points: `"<x>,<y>"`, signed integers that fit in `i64`
//! - operand pairs: `"<num1>,<num2>"`, non-negative decimal literals of any length
//!
//! Each line is split on its first comma and both fields are trimmed. Blank lines are
//! skipped. A malformed line is reported as a [`ParseError`] and parsing carries on
//! with the next line.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::bigint::BigInteger;
use crate::error::{Error, ParseError, ParseErrorKind};
use crate::geometry::Point;

/// Parsed records plus one error per rejected line.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset<T> {
    pub records: Vec<T>,
    pub errors: Vec<ParseError>,
}

impl<T> Dataset<T> {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fails with the first rejected line, if any.
    pub fn into_strict(self) -> Result<Vec<T>, Error> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err.into()),
            None => Ok(self.records),
        }
    }

    fn map_records<U>(self, f: impl FnMut(T) -> U) -> Dataset<U> {
        Dataset {
            records: self.records.into_iter().map(f).collect(),
            errors: self.errors,
        }
    }
}

pub type OperandPair = (BigInteger, BigInteger);

pub fn parse_points(text: &str) -> Dataset<Point> {
    parse_records(text, |field, text| {
        text.parse::<i64>()
            .map_err(|_| invalid_number(field, text))
    })
    .map_records(Point::from)
}

pub fn parse_integer_pairs(text: &str) -> Dataset<OperandPair> {
    parse_records(text, |field, text| {
        text.parse::<BigInteger>()
            .map_err(|_| invalid_number(field, text))
    })
}

pub fn load_points(path: impl AsRef<Path>) -> Result<Dataset<Point>, Error> {
    read(path.as_ref()).map(|text| parse_points(&text))
}

pub fn load_integer_pairs(path: impl AsRef<Path>) -> Result<Dataset<OperandPair>, Error> {
    read(path.as_ref()).map(|text| parse_integer_pairs(&text))
}

fn read(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid_number(field: usize, text: &str) -> ParseErrorKind {
    ParseErrorKind::InvalidNumber {
        field,
        text: text.to_string(),
    }
}

fn parse_records<F, V>(text: &str, parse_field: F) -> Dataset<(V, V)>
where
    F: Fn(usize, &str) -> Result<V, ParseErrorKind>,
{
    let mut records = Vec::new();
    let mut errors = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parsed = match line.split_once(',') {
            Some((first, second)) => parse_field(1, first.trim())
                .and_then(|a| parse_field(2, second.trim()).map(|b| (a, b))),
            None => Err(ParseErrorKind::MissingComma),
        };

        match parsed {
            Ok(record) => records.push(record),
            Err(kind) => {
                let err = ParseError {
                    line: idx + 1,
                    kind,
                };
                warn!("skipping dataset record: {err}");
                errors.push(err);
            }
        }
    }

    debug!(
        "parsed {} records, rejected {} lines",
        records.len(),
        errors.len()
    );
    Dataset { records, errors }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points() {
        let data = parse_points("1,2\n\n  -3 , 40 \r\n100,100\n");
        assert!(data.is_clean());
        assert_eq!(
            data.records,
            vec![
                Point::new(1.0, 2.0),
                Point::new(-3.0, 40.0),
                Point::new(100.0, 100.0)
            ]
        );
    }

    #[test]
    fn bad_lines_do_not_stop_parsing() {
        let data = parse_points("1,2\nfoo\n3,x\n4,5,6\n,7\n8,9\n");
        assert_eq!(data.records, vec![Point::new(1.0, 2.0), Point::new(8.0, 9.0)]);
        assert_eq!(
            data.errors,
            vec![
                ParseError {
                    line: 2,
                    kind: ParseErrorKind::MissingComma,
                },
                ParseError {
                    line: 3,
                    kind: invalid_number(2, "x"),
                },
                ParseError {
                    line: 4,
                    kind: invalid_number(2, "5,6"),
                },
                ParseError {
                    line: 5,
                    kind: invalid_number(1, ""),
                },
            ]
        );
    }

    #[test]
    fn parses_long_integer_pairs() {
        let a = "1".repeat(120);
        let text = format!("1234,5678\n{a},0\n");
        let data = parse_integer_pairs(&text);
        assert!(data.is_clean());
        assert_eq!(data.records.len(), 2);
        assert_eq!(data.records[0].0.to_string(), "1234");
        assert_eq!(data.records[0].1.to_string(), "5678");
        assert_eq!(data.records[1].0.to_string(), a);
        assert!(data.records[1].1.is_zero());
    }

    #[test]
    fn integer_pairs_reject_signs_and_fractions() {
        let data = parse_integer_pairs("-1,2\n3,4.5\n6,7\n");
        assert_eq!(data.records.len(), 1);
        assert_eq!(data.errors.len(), 2);
        assert_eq!(data.errors[0].line, 1);
        assert_eq!(data.errors[1].kind, invalid_number(2, "4.5"));
    }

    #[test]
    fn into_strict_reports_first_error() {
        let err = parse_points("1,2\nbad\nworse\n").into_strict().unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError { line: 2, .. })));
        assert_eq!(parse_points("1,2\n").into_strict().unwrap().len(), 1);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load_points("/nonexistent/points_dataset.txt").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "dnc_algorithms_points_{}.txt",
            std::process::id()
        ));
        fs::write(&path, "0,0\n3,4\n").unwrap();
        let data = load_points(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(data.records, vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
    }
}
