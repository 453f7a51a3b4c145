//! Batch driver: input rows in, one output row per input row, in file order

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

use super::parser::SampleReader;
use super::writer::ResultWriter;
use crate::algorithms::{EarthModel, Trilaterator};
use crate::validation::{TrilatError, TrilatResult};

/// Counts collected over one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Data rows read and written (header excluded)
    pub rows: usize,
    /// Rows with a finite position
    pub solved: usize,
    /// Rows written with NaN coordinates
    pub degraded: usize,
}

/// Trilaterate every row of `input` and write the results to `output`.
///
/// A malformed row aborts the run; rows already written stay in `output`.
pub fn run_batch<R, W, E>(input: R, output: W, trilaterator: &Trilaterator<E>) -> TrilatResult<BatchSummary>
where
    R: Read,
    W: Write,
    E: EarthModel,
{
    let mut writer = ResultWriter::new(output)?;
    let mut summary = BatchSummary::default();

    for sample in SampleReader::new(input) {
        let sample = sample?;
        let result = trilaterator.solve(&sample);

        if result.status.is_solved() {
            summary.solved += 1;
            debug!(
                name = %result.name,
                lon = result.position.lon,
                lat = result.position.lat,
                "sample trilaterated"
            );
        } else {
            summary.degraded += 1;
            warn!(name = %result.name, status = ?result.status, "no finite position for sample");
        }

        writer.write_result(&result)?;
        summary.rows += 1;
    }

    writer.flush()?;
    Ok(summary)
}

/// File-backed [`run_batch`]
pub fn run_files<E: EarthModel>(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    trilaterator: &Trilaterator<E>,
) -> TrilatResult<BatchSummary> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();

    let input = File::open(input_path).map_err(|e| TrilatError::io(input_path.display().to_string(), e))?;
    let output = File::create(output_path).map_err(|e| TrilatError::io(output_path.display().to_string(), e))?;

    info!(input = %input_path.display(), output = %output_path.display(), "starting batch");

    let summary = run_batch(BufReader::new(input), BufWriter::new(output), trilaterator)?;

    info!(
        rows = summary.rows,
        solved = summary.solved,
        degraded = summary.degraded,
        "batch complete"
    );

    Ok(summary)
}
