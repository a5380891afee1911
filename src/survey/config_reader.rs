use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use snafu::prelude::*;

use crate::survey::*;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "writeCombined")]
    pub write_combined: Option<bool>,
    #[serde(rename = "writePerQuestionnaire")]
    pub write_per_questionnaire: Option<bool>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct InputFile {
    #[serde(rename = "filePath")]
    pub file_path: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionConfig {
    #[serde(rename = "inputFiles", default)]
    pub input_files: Vec<InputFile>,
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
}

impl ConversionConfig {
    /// The input files, relative to the given directory.
    pub fn input_paths(&self, root: &Path) -> Vec<String> {
        self.input_files
            .iter()
            .map(|f| resolve(root, &f.file_path))
            .collect()
    }

    /// The output directory, relative to the given directory.
    pub fn output_directory(&self, root: &Path) -> Option<String> {
        self.output_settings
            .output_directory
            .as_ref()
            .map(|d| resolve(root, d))
    }
}

fn resolve(root: &Path, p: &str) -> String {
    let p: PathBuf = [root, Path::new(p)].iter().collect();
    p.display().to_string()
}

/// Reads a configuration file.
///
/// Returns the configuration together with the directory it was read from.
pub fn read_config(path: &str) -> SurveyResult<(ConversionConfig, PathBuf)> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: ConversionConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {}: {:?}", path, config);
    let root = Path::new(path)
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_default();
    Ok((config, root))
}

/// Reads a reference file with the expected output of a conversion.
pub fn read_reference(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}
