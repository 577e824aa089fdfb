use crate::error::RecordErr;
use crate::HEADER_SENTINEL;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// The two ownership strategies compared by the benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
    /// Shared `Arc<String>`, input code "A".
    Arc,
    /// Owned `String` cloned on every use, any other input code.
    Clone,
}

impl Variant {
    /// Display order of the series in the charts.
    pub const ALL: [Variant; 2] = [Variant::Arc, Variant::Clone];

    /// Only the exact code "A" is the Arc variant.
    pub fn from_code(code: &str) -> Variant {
        if code == "A" {
            Variant::Arc
        } else {
            Variant::Clone
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Variant::Arc => "A",
            Variant::Clone => "C",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Variant::Arc => "Arc",
            Variant::Clone => "Clone",
        }
    }
}

/// One benchmark result line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub variant: Variant,
    pub set_size: usize,
    pub item_length: usize,
    pub thread_count: NonZeroUsize,
    pub operation_count: u64,
    pub elapsed_seconds: f64,
    pub throughput: f64,
}

/// Same layout the benchmark prints and `parse_record` reads.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {:.3} {:.1}",
            self.variant.code(),
            self.set_size,
            self.item_length,
            self.thread_count,
            self.operation_count,
            self.elapsed_seconds,
            self.throughput
        )
    }
}

fn parse_field<T: FromStr>(token: &str, field: &'static str) -> Result<T, RecordErr> {
    token.parse::<T>().map_err(|_| RecordErr::InvalidField {
        field,
        value: token.to_owned(),
    })
}

/// Parse one whitespace-delimited line.
///
/// The header line gives `Ok(None)`, it is checked before anything else.
/// Tokens after the seventh are ignored.
pub fn parse_record(line: &str) -> Result<Option<Record>, RecordErr> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.first() == Some(&HEADER_SENTINEL) {
        return Ok(None);
    }
    if tokens.len() < 7 {
        return Err(RecordErr::TooFewFields {
            found: tokens.len(),
        });
    }
    let record = Record {
        variant: Variant::from_code(tokens[0]),
        set_size: parse_field(tokens[1], "num_strings")?,
        item_length: parse_field(tokens[2], "string_len")?,
        thread_count: parse_field(tokens[3], "threads")?,
        operation_count: parse_field(tokens[4], "operations")?,
        elapsed_seconds: parse_field(tokens[5], "seconds")?,
        throughput: parse_field(tokens[6], "ops_per_sec")?,
    };
    Ok(Some(record))
}
