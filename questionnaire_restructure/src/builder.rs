use log::debug;
use std::collections::HashMap;

pub use crate::config::*;
use crate::options::parse_response_options;

/// Incrementally restructures worksheet rows into questionnaires.
///
/// Rows are grouped by their computed questionnaire title. Questionnaires
/// come out in the order in which their title was first seen, and questions
/// keep the order of their rows.
///
/// ```
/// use questionnaire_restructure::builder::Builder;
/// use questionnaire_restructure::Row;
/// # use questionnaire_restructure::RestructureError;
///
/// let mut builder = Builder::new();
/// builder.add_row(&Row {
///     questionnaire_name: "PHQ9".to_string(),
///     questionnaire_abbreviation: "PHQ9".to_string(),
///     question: "Little interest or pleasure in doing things".to_string(),
///     question_abbreviation: "phq9_1".to_string(),
///     response_type: "Single Choice".to_string(),
///     response_options: "0=Not at all\n1=Several days".to_string(),
///     ..Default::default()
/// })?;
/// let questionnaires = builder.build();
/// assert_eq!(questionnaires[0].questions[0].rows.as_ref().map(|r| r.len()), Some(2));
///
/// # Ok::<(), RestructureError>(())
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    questionnaires: Vec<Questionnaire>,
    // Position of each questionnaire in the output, by title.
    index_by_title: HashMap<String, usize>,
    num_rows: usize,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Adds one row, creating its questionnaire if needed.
    ///
    /// Fails if the response options of the row cannot be parsed. The
    /// builder should not be used after an error.
    pub fn add_row(&mut self, row: &Row) -> Result<(), RestructureError> {
        self.num_rows += 1;
        let row_number = self.num_rows;

        let title = questionnaire_title(row);
        let response_type = ResponseType::from_label(&row.response_type);

        let options = if response_type == Some(ResponseType::TextEntry) {
            Vec::new()
        } else {
            parse_response_options(
                &row.response_options,
                row_number,
                &row.question_abbreviation,
            )?
        };
        if response_type.is_none() {
            debug!(
                "add_row: row {}: unknown response type {:?}",
                row_number, row.response_type
            );
        }

        let has_options = !options.is_empty();
        let q = build_question(
            question_title(row),
            response_type.map(|rt| rt.code()),
            row.question_abbreviation.clone(),
            has_options,
            options,
        );

        let idx = match self.index_by_title.get(&title) {
            Some(idx) => *idx,
            None => {
                debug!("add_row: row {}: new questionnaire {:?}", row_number, title);
                self.questionnaires.push(Questionnaire::new(&title));
                let idx = self.questionnaires.len() - 1;
                self.index_by_title.insert(title, idx);
                idx
            }
        };
        self.questionnaires[idx].questions.push(q);
        Ok(())
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn build(self) -> Vec<Questionnaire> {
        self.questionnaires
    }
}

/// Builds a question. The options are only attached when `has_options` is
/// set.
pub fn build_question(
    title: String,
    type_code: Option<&str>,
    variable_name: String,
    has_options: bool,
    options: Vec<ResponseOption>,
) -> Question {
    Question {
        title,
        type_code: type_code.map(|s| s.to_string()),
        variable_name,
        rows: if has_options { Some(options) } else { None },
    }
}

/// The title of the questionnaire a row belongs to.
///
/// It is the name alone when the abbreviation is the same as the name,
/// `"<abbreviation> (<name>)"` otherwise.
pub fn questionnaire_title(row: &Row) -> String {
    if row.questionnaire_name == row.questionnaire_abbreviation {
        row.questionnaire_name.clone()
    } else {
        format!(
            "{} ({})",
            row.questionnaire_abbreviation, row.questionnaire_name
        )
    }
}

/// The title of the question, prefixed by the group instruction if any.
pub fn question_title(row: &Row) -> String {
    let instruction = row.question_group_instruction.trim();
    let question = row.question.trim();
    if instruction.is_empty() {
        question.to_string()
    } else {
        format!("{}: {}", instruction, question)
    }
}
