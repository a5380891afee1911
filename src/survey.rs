use log::{debug, info, warn};

use questionnaire_restructure::*;
use snafu::{prelude::*, Snafu};

use std::collections::HashSet;
use std::error::Error as StdError;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value as JSValue;
use text_diff::print_diff;

mod config_reader;
mod io_common;
mod io_csv;

pub use crate::survey::config_reader::{read_config, ConversionConfig};
use crate::survey::config_reader::read_reference;
use crate::survey::io_common::{
    check_extension, combined_file_name, questionnaire_file_name, simplify_file_name,
    unique_file_name,
};
use crate::survey::io_csv::read_csv_rows;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SurveyError {
    #[snafu(display("Cannot convert {path}: unsupported file extension '{extension}', only 'csv' files are accepted"))]
    UnsupportedExtension { path: String, extension: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: u64,
    },
    #[snafu(display("Error converting {path}"))]
    Restructure {
        source: RestructureError,
        path: String,
    },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the questionnaires of {path}"))]
    WritingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("No input file: pass worksheets on the command line or in the configuration"))]
    NoInput {},
    #[snafu(display("A reference can only be checked against a single input, {count} inputs given"))]
    ReferenceNeedsSingleInput { count: usize },
    #[snafu(display("Difference detected between the converted questionnaires and the reference {path}"))]
    ReferenceMismatch { path: String },
    #[snafu(display("{count} of {total} input files could not be converted"))]
    FilesFailed { count: usize, total: usize },
}

pub type SurveyResult<T> = Result<T, SurveyError>;

/// Where the JSON documents go.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum OutputTarget {
    Directory(PathBuf),
    Stdout,
}

impl OutputTarget {
    pub fn parse(s: &str) -> OutputTarget {
        match s {
            "stdout" => OutputTarget::Stdout,
            d => OutputTarget::Directory(PathBuf::from(d)),
        }
    }
}

/// Everything needed to run a conversion, after merging the configuration
/// file and the command line.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ConversionSettings {
    pub inputs: Vec<String>,
    pub output: OutputTarget,
    pub write_combined: bool,
    pub write_per_questionnaire: bool,
    pub reference: Option<String>,
}

impl ConversionSettings {
    pub fn new(inputs: Vec<String>, output: OutputTarget) -> ConversionSettings {
        ConversionSettings {
            inputs,
            output,
            write_combined: true,
            write_per_questionnaire: true,
            reference: None,
        }
    }

    /// Merges a configuration file with the options of the command line.
    /// The command line wins when both are given.
    pub fn from_config(
        config: Option<(ConversionConfig, PathBuf)>,
        inputs: Vec<String>,
        out: Option<String>,
        combined_only: bool,
        reference: Option<String>,
    ) -> ConversionSettings {
        let (config, root) = config.unwrap_or_default();
        let inputs = if inputs.is_empty() {
            config.input_paths(&root)
        } else {
            inputs
        };
        let output = match out.or_else(|| config.output_directory(&root)) {
            Some(o) => OutputTarget::parse(&o),
            None => OutputTarget::Directory(PathBuf::from(".")),
        };
        let os = &config.output_settings;
        ConversionSettings {
            write_combined: combined_only || os.write_combined.unwrap_or(true),
            write_per_questionnaire: !combined_only
                && os.write_per_questionnaire.unwrap_or(true),
            reference,
            ..ConversionSettings::new(inputs, output)
        }
    }
}

/// Reads a worksheet and restructures its rows.
pub fn convert_file(path: &str) -> SurveyResult<Vec<Questionnaire>> {
    check_extension(path)?;
    info!("Attempting to read worksheet {:?}", path);
    let rows = read_csv_rows(path)?;
    let questionnaires = restructure(&rows).context(RestructureSnafu { path })?;
    info!(
        "{}: {} rows, {} questionnaires",
        simplify_file_name(path),
        rows.len(),
        questionnaires.len()
    );
    Ok(questionnaires)
}

/// Indented JSON, as expected by the backend.
pub fn to_pretty_json<T: serde::Serialize>(value: &T, path: &str) -> SurveyResult<String> {
    serde_json::to_string_pretty(value).context(WritingJsonSnafu { path })
}

fn write_file(dir: &Path, name: &str, content: &str) -> SurveyResult<PathBuf> {
    let p = dir.join(name);
    let path = p.display().to_string();
    fs::write(&p, content).context(WritingOutputSnafu { path: path.clone() })?;
    debug!("write_file: wrote {}", path);
    Ok(p)
}

/// Writes the documents of one worksheet. Returns the files written, if any.
///
/// `used` holds the file names already written during the run: a name is
/// never written twice, clashing names get a numbered suffix.
pub fn write_outputs(
    source_path: &str,
    questionnaires: &[Questionnaire],
    settings: &ConversionSettings,
    used: &mut HashSet<String>,
) -> SurveyResult<Vec<PathBuf>> {
    let mut written: Vec<PathBuf> = Vec::new();
    match &settings.output {
        OutputTarget::Stdout => {
            println!("{}", to_pretty_json(&questionnaires, source_path)?);
        }
        OutputTarget::Directory(dir) => {
            fs::create_dir_all(dir).context(WritingOutputSnafu {
                path: dir.display().to_string(),
            })?;
            if settings.write_per_questionnaire {
                for q in questionnaires.iter() {
                    let js = to_pretty_json(q, source_path)?;
                    let name = unique_file_name(questionnaire_file_name(&q.title), used);
                    written.push(write_file(dir, &name, &js)?);
                }
            }
            if settings.write_combined {
                let js = to_pretty_json(&questionnaires, source_path)?;
                let name = unique_file_name(combined_file_name(source_path), used);
                written.push(write_file(dir, &name, &js)?);
            }
        }
    }
    Ok(written)
}

/// Compares the questionnaires with a reference file and prints the
/// differences.
pub fn check_reference(questionnaires: &[Questionnaire], reference_path: &str) -> SurveyResult<()> {
    let reference = read_reference(reference_path)?;
    let computed: JSValue =
        serde_json::to_value(questionnaires).context(WritingJsonSnafu {
            path: reference_path,
        })?;
    let pretty_reference = to_pretty_json(&reference, reference_path)?;
    let pretty_computed = to_pretty_json(&computed, reference_path)?;
    if pretty_reference != pretty_computed {
        warn!("Found differences with the reference {}", reference_path);
        print_diff(pretty_reference.as_str(), pretty_computed.as_str(), "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("Output matches the reference {}", reference_path);
    Ok(())
}

/// Converts all the worksheets.
///
/// Each worksheet is converted on its own: a failure is reported and the
/// next worksheet is processed. The run fails if any worksheet failed.
pub fn run_conversion(settings: &ConversionSettings) -> SurveyResult<()> {
    debug!("run_conversion: {:?}", settings);
    ensure!(!settings.inputs.is_empty(), NoInputSnafu {});
    if settings.reference.is_some() {
        ensure!(
            settings.inputs.len() == 1,
            ReferenceNeedsSingleInputSnafu {
                count: settings.inputs.len()
            }
        );
    }

    let mut failed: usize = 0;
    let mut used: HashSet<String> = HashSet::new();
    for path in settings.inputs.iter() {
        let res = convert_file(path).and_then(|questionnaires| {
            if let Some(reference_path) = &settings.reference {
                check_reference(&questionnaires, reference_path)?;
            }
            write_outputs(path, &questionnaires, settings, &mut used)
        });
        match res {
            Ok(written) => {
                for p in written.iter() {
                    info!("Wrote {}", p.display());
                }
            }
            Err(e) => {
                eprintln!("{}", error_report(&e));
                failed += 1;
            }
        }
    }
    ensure!(
        failed == 0,
        FilesFailedSnafu {
            count: failed,
            total: settings.inputs.len()
        }
    );
    Ok(())
}

/// The error and all its causes, one per line.
pub fn error_report(e: &dyn StdError) -> String {
    let mut res = e.to_string();
    let mut source = e.source();
    while let Some(s) = source {
        res.push_str(&format!("\n  caused by: {}", s));
        source = s.source();
    }
    res
}

#[cfg(test)]
fn run_conversion_test(test_name: &str, csv_lpath: &str, expected_lpath: &str) {
    let test_dir = option_env!("QUESTIONNAIRE_TEST_DIR")
        .unwrap_or(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata"));
    info!("Running test {}", test_name);
    let csv_path = format!("{}/{}/{}", test_dir, test_name, csv_lpath);
    let expected_path = format!("{}/{}/{}", test_dir, test_name, expected_lpath);
    let res = convert_file(&csv_path).and_then(|qs| check_reference(&qs, &expected_path));
    if let Err(e) = res {
        panic!("test {} failed: {}", test_name, error_report(&e));
    }
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) {
    run_conversion_test(
        test_name,
        format!("{}.csv", test_name).as_str(),
        format!("{}_expected.json", test_name).as_str(),
    )
}
