/*!

Restructures the rows of a survey-definition worksheet into questionnaires.

A worksheet describes one question per row. Rows are grouped into
questionnaires by their title, and the `Response Options` cell of each row is
parsed into a list of options:

```
use questionnaire_restructure::{restructure, Row};
# use questionnaire_restructure::RestructureError;

let rows = vec![
    Row {
        questionnaire_name: "Patient Health Questionnaire".to_string(),
        questionnaire_abbreviation: "PHQ9".to_string(),
        question: "Feeling tired or having little energy".to_string(),
        question_abbreviation: "phq9_4".to_string(),
        response_type: "Single Choice".to_string(),
        response_options: "0=Not at all\n1=Several days".to_string(),
        ..Default::default()
    },
];
let questionnaires = restructure(&rows)?;
assert_eq!(questionnaires[0].title, "PHQ9 (Patient Health Questionnaire)");

# Ok::<(), RestructureError>(())
```

See the [manual] for the format of the worksheet.
*/

pub mod builder;
mod config;
pub mod manual;
mod options;

use log::info;

use crate::builder::Builder;
pub use crate::builder::{build_question, question_title, questionnaire_title};
pub use crate::config::*;
pub use crate::options::parse_response_options;

/// Restructures all the rows of a worksheet.
///
/// This stops at the first row with malformed response options: either the
/// whole worksheet is converted or nothing is.
pub fn restructure(rows: &[Row]) -> Result<Vec<Questionnaire>, RestructureError> {
    info!("restructure: processing {} rows", rows.len());
    let mut builder = Builder::new();
    for row in rows.iter() {
        builder.add_row(row)?;
    }
    let num_rows = builder.num_rows();
    let res = builder.build();
    info!(
        "restructure: {} rows grouped into {} questionnaires",
        num_rows,
        res.len()
    );
    Ok(res)
}
