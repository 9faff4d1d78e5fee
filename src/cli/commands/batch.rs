use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::parser::{RedeemScriptParser, RedeemScriptParserFactory};
use crate::script::tokenize_bounded;
use crate::types::{BatchInputRow, BatchResultRow, BatchSummary, ClassificationReport};
use clap::Args;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::classify::decode_script_hex;

/// Classify every script in a CSV file with `id,script_hex` columns
#[derive(Args)]
pub struct BatchCommand {
    /// Input CSV file (header row required)
    #[arg(long)]
    pub input: PathBuf,

    /// Output CSV file (defaults to stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl BatchCommand {
    pub fn run(&self, config: &AppConfig) -> AppResult<BatchSummary> {
        info!("Reading scripts from {}", self.input.display());
        let reader = BufReader::new(File::open(&self.input)?);
        let factory = RedeemScriptParserFactory::new(&config.classifier);

        let summary = match &self.output {
            Some(path) => {
                let writer = BufWriter::new(File::create(path)?);
                classify_records(reader, writer, &factory)?
            }
            None => classify_records(reader, io::stdout().lock(), &factory)?,
        };

        info!(
            "Classified {} scripts: {} recognized, {} unrecognized ({} malformed)",
            summary.total, summary.recognized, summary.unrecognized, summary.malformed
        );
        if let Some(path) = &self.output {
            eprintln!(
                "Wrote {} rows to {} ({} recognized)",
                summary.total,
                path.display(),
                summary.recognized
            );
        }

        Ok(summary)
    }
}

/// Classify each CSV record from `reader` and write one result row per record
///
/// A row whose script cannot be decoded is reported as unrecognised and
/// counted as malformed; a row that is not a valid record aborts the run.
pub fn classify_records<R, W>(
    reader: R,
    writer: W,
    factory: &RedeemScriptParserFactory,
) -> AppResult<BatchSummary>
where
    R: io::Read,
    W: io::Write,
{
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut summary = BatchSummary::default();

    for (index, record) in csv_reader.deserialize::<BatchInputRow>().enumerate() {
        // Header occupies line 1
        let line = index + 2;
        let row = record.map_err(|e| AppError::InvalidRecord {
            line,
            reason: e.to_string(),
        })?;

        let report = match classify_row(&row, factory) {
            Ok(report) => report,
            Err(e) => {
                warn!("Row {} ({}): {}", line, row.id, e);
                summary.malformed += 1;
                ClassificationReport::from(&RedeemScriptParser::no_match())
            }
        };
        debug!("Row {} ({}): {}", line, row.id, report.multisig_type);

        summary.record(&report);
        csv_writer.serialize(BatchResultRow::from_report(row.id, &report))?;
    }

    csv_writer.flush()?;
    Ok(summary)
}

fn classify_row(
    row: &BatchInputRow,
    factory: &RedeemScriptParserFactory,
) -> AppResult<ClassificationReport> {
    let bytes = decode_script_hex(&row.script_hex)?;
    let chunks = tokenize_bounded(&bytes, factory.max_script_size())?;
    Ok(ClassificationReport::from(&factory.get(&chunks)))
}
