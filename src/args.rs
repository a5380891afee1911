use clap::Parser;

/// Converts survey-definition worksheets (CSV) into questionnaire documents (JSON).
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file paths) The CSV worksheets to convert. Only files with the `csv` extension are accepted.
    #[clap(value_parser)]
    pub files: Vec<String>,

    /// (file path, repeatable) Same as the positional arguments.
    #[clap(short, long, value_parser)]
    pub input: Vec<String>,

    /// (file path, optional) A JSON file describing the conversion. The inputs given on the command line
    /// replace the inputs of the configuration. See the manual for the format of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory path, 'stdout' or empty) Where to write the JSON documents. With 'stdout', the documents
    /// of each worksheet are printed as a single JSON array. Setting this option overrides the output
    /// directory of the configuration.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, optional) A reference JSON file with the expected questionnaires. The converted output
    /// is compared to it and the differences are printed. Requires a single input.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, only the file holding all the questionnaires of a worksheet is written.
    #[clap(long, takes_value = false)]
    pub combined_only: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

impl Args {
    /// All the inputs, positional first.
    pub fn inputs(&self) -> Vec<String> {
        let mut res = self.files.clone();
        res.extend(self.input.iter().cloned());
        res
    }
}
