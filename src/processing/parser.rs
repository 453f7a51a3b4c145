use csv::StringRecord;
use std::fmt;
use std::io::Read;

use crate::core::{GeoPoint, SampleRecord};
use crate::validation::{TrilatError, TrilatResult};

/// Number of columns in one input row
pub const SAMPLE_COLUMNS: usize = 10;

/// Column names in input order, used in error messages
const COLUMN_NAMES: [&str; SAMPLE_COLUMNS] = [
    "name", "dist_a", "dist_b", "dist_c", "lon_a", "lat_a", "lon_b", "lat_b", "lon_c", "lat_c",
];

/// Errors that can occur while parsing one input row
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    ColumnCount { expected: usize, found: usize },
    InvalidNumber { column: usize, field: &'static str, value: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::ColumnCount { expected, found } => {
                write!(f, "expected {} columns, found {}", expected, found)
            }
            ParseError::InvalidNumber { column, field, value } => {
                write!(f, "column {} ({}) is not a number: '{}'", column, field, value)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse one row:
/// `name, dist_a, dist_b, dist_c, lon_a, lat_a, lon_b, lat_b, lon_c, lat_c`
/// with distances in meters and coordinates in decimal degrees.
pub fn parse_record(record: &StringRecord) -> Result<SampleRecord, ParseError> {
    if record.len() != SAMPLE_COLUMNS {
        return Err(ParseError::ColumnCount {
            expected: SAMPLE_COLUMNS,
            found: record.len(),
        });
    }

    let number = |column: usize| -> Result<f64, ParseError> {
        let value = &record[column];
        value.trim().parse::<f64>().map_err(|_| ParseError::InvalidNumber {
            column,
            field: COLUMN_NAMES[column],
            value: value.to_string(),
        })
    };

    let distances_m = [number(1)?, number(2)?, number(3)?];
    let references = [
        GeoPoint::new(number(4)?, number(5)?),
        GeoPoint::new(number(6)?, number(7)?),
        GeoPoint::new(number(8)?, number(9)?),
    ];

    Ok(SampleRecord {
        name: record[0].to_string(),
        distances_m,
        references,
    })
}

/// Iterates sample records of a headerless comma-separated input in file order
pub struct SampleReader<R: Read> {
    reader: csv::Reader<R>,
    record: StringRecord,
}

impl<R: Read> SampleReader<R> {
    pub fn new(input: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);

        Self {
            reader,
            record: StringRecord::new(),
        }
    }
}

impl<R: Read> Iterator for SampleReader<R> {
    type Item = TrilatResult<SampleRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let line = self.record.position().map_or(0, |p| p.line());
                Some(parse_record(&self.record).map_err(|source| TrilatError::Parse { line, source }))
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}
