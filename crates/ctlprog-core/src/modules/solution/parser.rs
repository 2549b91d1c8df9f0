use crate::domain::SolutionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SolutionLine<'a> {
    Scalar {
        key: &'a str,
        value: &'a str,
    },
    Grouped {
        key: &'a str,
        subkey: &'a str,
        value: &'a str,
    },
    Skipped,
}

/// Classifies one line by its whitespace token count. Tokens past the third
/// are dropped.
pub(super) fn classify_line(line: &str) -> SolutionLine<'_> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(key), Some(subkey), Some(value)) => SolutionLine::Grouped { key, subkey, value },
        (Some(key), Some(value), None) => SolutionLine::Scalar { key, value },
        _ => SolutionLine::Skipped,
    }
}

pub fn parse_solution(source: &str) -> SolutionRecord {
    let mut record = SolutionRecord::new();
    for line in source.lines() {
        match classify_line(line) {
            SolutionLine::Scalar { key, value } => record.insert_scalar(key, value),
            SolutionLine::Grouped { key, subkey, value } => {
                record.insert_grouped(key, subkey, value)
            }
            SolutionLine::Skipped => {}
        }
    }
    record
}
