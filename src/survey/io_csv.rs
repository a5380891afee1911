// Primitives for reading CSV worksheets.

use std::io::Read;

use csv::{StringRecord, Trim};
use log::debug;
use snafu::prelude::*;

use questionnaire_restructure::Row;

use crate::survey::*;

/// Reads all the rows of a worksheet file.
///
/// The first line holds the column names. Empty lines are skipped.
pub fn read_csv_rows(path: &str) -> SurveyResult<Vec<Row>> {
    let rdr = reader_builder()
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    read_rows(rdr, path)
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).trim(Trim::Headers);
    builder
}

fn read_rows<R: Read>(mut rdr: csv::Reader<R>, path: &str) -> SurveyResult<Vec<Row>> {
    let headers = rdr
        .headers()
        .context(CsvLineParseSnafu { path, lineno: 1_u64 })?
        .clone();
    debug!("read_rows: {}: headers: {:?}", path, headers);

    let mut res: Vec<Row> = Vec::new();
    let mut record = StringRecord::new();
    loop {
        // The line is only known once the record has been read.
        let lineno = rdr.position().line();
        let has_record = rdr
            .read_record(&mut record)
            .context(CsvLineParseSnafu { path, lineno })?;
        if !has_record {
            break;
        }
        let lineno = record.position().map(|p| p.line()).unwrap_or(lineno);
        let row: Row = record
            .deserialize(Some(&headers))
            .context(CsvLineParseSnafu { path, lineno })?;
        debug!("read_rows: {}: line {}: {:?}", path, lineno, row);
        res.push(row);
    }
    debug!("read_rows: {}: {} rows", path, res.len());
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_csv_rows_from<R: Read>(input: R, name: &str) -> SurveyResult<Vec<Row>> {
        read_rows(reader_builder().from_reader(input), name)
    }

    const HEADER: &str = "Questionnaire Name,Questionnaire Abbreviation,Question Group Instruction,Question,Question Abbreviation,Response Type,Response Options\n";

    #[test]
    fn reads_rows_and_skips_empty_lines() {
        let content = format!(
            "{}PHQ9,PHQ9,,Little interest,phq9_1,Single Choice,\"0=Not at all\n1=Several days\"\n\nPHQ9,PHQ9,Intro,Comments,phq9_c,Text Entry,\n",
            HEADER
        );
        let rows = read_csv_rows_from(content.as_bytes(), "mem.csv").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].questionnaire_name, "PHQ9");
        assert_eq!(rows[0].response_options, "0=Not at all\n1=Several days");
        assert_eq!(rows[1].question_group_instruction, "Intro");
        assert_eq!(rows[1].response_type, "Text Entry");
        assert_eq!(rows[1].response_options, "");
    }

    #[test]
    fn optional_columns_may_be_missing() {
        let content = "Questionnaire Name,Questionnaire Abbreviation,Question,Question Abbreviation,Response Type\nGAD7,GAD7,Worrying,gad_1,Text Entry\n";
        let rows = read_csv_rows_from(content.as_bytes(), "mem.csv").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].question_group_instruction, "");
        assert_eq!(rows[0].response_options, "");
    }

    #[test]
    fn columns_in_any_order() {
        let content = "Response Type,Question,Question Abbreviation,Questionnaire Abbreviation,Questionnaire Name\nText Entry,Worrying,gad_1,GAD7,Generalized Anxiety\n";
        let rows = read_csv_rows_from(content.as_bytes(), "mem.csv").unwrap();
        assert_eq!(rows[0].questionnaire_abbreviation, "GAD7");
        assert_eq!(rows[0].questionnaire_name, "Generalized Anxiety");
    }

    #[test]
    fn missing_required_column() {
        let content = "Questionnaire Name,Question\nGAD7,Worrying\n";
        let err = read_csv_rows_from(content.as_bytes(), "mem.csv").unwrap_err();
        match err {
            SurveyError::CsvLineParse { lineno, path, .. } => {
                assert_eq!(lineno, 2);
                assert_eq!(path, "mem.csv");
            }
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn missing_file() {
        let err = read_csv_rows("/this/file/does/not/exist.csv").unwrap_err();
        assert!(matches!(err, SurveyError::CsvOpen { .. }));
    }
}
