use log::debug;
use snafu::OptionExt;

use crate::config::*;

/// Parses the content of a `Response Options` cell.
///
/// Options are separated by new lines, or by commas when the cell holds a
/// single line. Each option is written `value=text`; only the first `=`
/// separates the two parts.
///
/// Arguments:
/// * `raw` the content of the cell
/// * `row` the position of the row in the worksheet, for error reporting
/// * `variable_name` the question the cell belongs to, for error reporting
pub fn parse_response_options(
    raw: &str,
    row: usize,
    variable_name: &str,
) -> Result<Vec<ResponseOption>, RestructureError> {
    let mut segments: Vec<&str> = raw.split('\n').collect();
    if segments.len() < 2 {
        segments = raw.split(',').collect();
    }

    let mut res: Vec<ResponseOption> = Vec::new();
    for segment in segments.iter().map(|s| s.trim()) {
        if segment.is_empty() {
            continue;
        }
        let (value, text) = segment.split_once('=').context(MalformedOptionSnafu {
            row,
            variable_name,
            segment,
        })?;
        res.push(ResponseOption {
            text: text.trim().to_string(),
            value: value.trim().to_string(),
        });
    }
    debug!(
        "parse_response_options: row {}: {} options",
        row,
        res.len()
    );
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(value: &str, text: &str) -> ResponseOption {
        ResponseOption {
            text: text.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn newline_separated() {
        let res = parse_response_options("0=Not at all\n1=Several days", 1, "phq1").unwrap();
        assert_eq!(res, vec![opt("0", "Not at all"), opt("1", "Several days")]);
    }

    #[test]
    fn comma_fallback() {
        let res = parse_response_options("1=Yes, 2=No", 1, "q").unwrap();
        assert_eq!(res, vec![opt("1", "Yes"), opt("2", "No")]);
    }

    #[test]
    fn commas_kept_in_multiline_text() {
        let res = parse_response_options("1=Yes, always\n2=No, never", 1, "q").unwrap();
        assert_eq!(res, vec![opt("1", "Yes, always"), opt("2", "No, never")]);
    }

    #[test]
    fn only_first_equal_sign_splits() {
        let res = parse_response_options("a = b = c", 1, "q").unwrap();
        assert_eq!(res, vec![opt("a", "b = c")]);
    }

    #[test]
    fn blank_segments_are_skipped() {
        let res = parse_response_options("1=Yes\r\n\r\n2=No\r\n", 1, "q").unwrap();
        assert_eq!(res, vec![opt("1", "Yes"), opt("2", "No")]);
        let res = parse_response_options("1=Yes,,", 1, "q").unwrap();
        assert_eq!(res, vec![opt("1", "Yes")]);
    }

    #[test]
    fn blank_cell() {
        assert!(parse_response_options("", 1, "q").unwrap().is_empty());
        assert!(parse_response_options("   ", 1, "q").unwrap().is_empty());
    }

    #[test]
    fn empty_value_or_text_is_accepted() {
        let res = parse_response_options("=Nothing\n3=", 1, "q").unwrap();
        assert_eq!(res, vec![opt("", "Nothing"), opt("3", "")]);
    }

    #[test]
    fn missing_equal_sign() {
        let err = parse_response_options("1-Yes", 4, "mood").unwrap_err();
        match &err {
            RestructureError::MalformedOption {
                row,
                variable_name,
                segment,
            } => {
                assert_eq!(*row, 4);
                assert_eq!(variable_name, "mood");
                assert_eq!(segment, "1-Yes");
            }
        }
        let msg = err.to_string();
        assert!(msg.contains("1-Yes"), "{}", msg);
        assert!(msg.contains("row 4"), "{}", msg);
    }

    #[test]
    fn missing_equal_sign_after_valid_options() {
        let err = parse_response_options("1=Yes\n2 No", 2, "q").unwrap_err();
        assert!(err.to_string().contains("\"2 No\""));
    }
}
