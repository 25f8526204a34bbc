//! Synthesize command implementation
//!
//! Reads a CSV file, generates a synthetic table with the same correlation
//! structure and writes it as CSV.

use std::io::Write;
use std::path::Path;

use adapter_store::csv_codec::{read_table_path, write_table, write_table_path, ReadOptions};
use synth_sampler::sampler::{FidelityReport, SyntheticSampler};
use tracing::info;

use super::{require_file, SamplerArgs};
use crate::config::CliConfig;
use crate::Result;

/// Run the synthesize command
///
/// The table goes to `output`, or to stdout when absent. The fidelity
/// report is printed to stderr so that stdout stays valid CSV.
pub fn run(
    config: &CliConfig,
    input: &Path,
    index_col: Option<&str>,
    sampler: &SamplerArgs,
    output: Option<&Path>,
    json: bool,
) -> Result<FidelityReport> {
    require_file(input)?;
    let sampler_config = sampler.resolve(config)?;

    info!(input = %input.display(), "Reading input table");
    let options = ReadOptions {
        index_column: index_col.map(str::to_string),
    };
    let table = read_table_path(input, &options)?;

    let (synthetic, report) = SyntheticSampler::new(sampler_config).synthesize(&table)?;

    match output {
        Some(path) => {
            write_table_path(path, &synthetic)?;
            info!(output = %path.display(), rows = synthetic.n_rows(), "Wrote synthetic table");
        }
        None => write_table(std::io::stdout().lock(), &synthetic)?,
    }

    let mut stderr = std::io::stderr().lock();
    if json {
        writeln!(stderr, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(stderr, "{}", report)?;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapter_store::csv_codec::INDEX_HEADER;
    use synth_core::types::ColumnType;

    #[test]
    fn test_synthesize_file_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.csv");
        let output = dir.path().join("out/synthetic.csv");

        let mut doc = String::from("day,a,b,c\n");
        for i in 0..30 {
            let x = i as f64;
            doc.push_str(&format!(
                "d{},{},{},{}\n",
                i,
                x * 0.5 + (x * 0.9).sin(),
                (x * 1.7).cos(),
                (i * 7) % 13
            ));
        }
        std::fs::write(&input, doc).unwrap();

        let args = SamplerArgs {
            samples: Some(30),
            seed: Some(5),
            ..Default::default()
        };
        let report = run(
            &CliConfig::default(),
            &input,
            Some("day"),
            &args,
            Some(&output),
            false,
        )
        .unwrap();
        assert_eq!(report.seed, 5);
        assert!(report.max_abs_deviation.is_finite());

        let written = read_table_path(&output, &ReadOptions::with_index_column(INDEX_HEADER)).unwrap();
        assert_eq!(written.shape(), (30, 3));
        assert_eq!(written.index().label(0).as_deref(), Some("d0"));
        assert_eq!(written.column_types()[2], ColumnType::Integer);
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            &CliConfig::default(),
            &dir.path().join("absent.csv"),
            None,
            &SamplerArgs::default(),
            None,
            false,
        );
        assert!(matches!(result, Err(crate::CliError::FileNotFound(_))));
    }
}
