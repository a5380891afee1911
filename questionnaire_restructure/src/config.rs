// ********* Input data structures ***********

use serde::{Deserialize, Serialize};
use snafu::Snafu;

/// One line of a survey-definition worksheet.
///
/// The field names follow the column headers of the worksheet exactly, so a
/// row can be read directly from a CSV file with a header line.
/// `Question Group Instruction` and `Response Options` may be missing or
/// empty.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "Questionnaire Name")]
    pub questionnaire_name: String,
    #[serde(rename = "Questionnaire Abbreviation")]
    pub questionnaire_abbreviation: String,
    #[serde(rename = "Question Group Instruction", default)]
    pub question_group_instruction: String,
    #[serde(rename = "Question")]
    pub question: String,
    #[serde(rename = "Question Abbreviation")]
    pub question_abbreviation: String,
    #[serde(rename = "Response Type")]
    pub response_type: String,
    #[serde(rename = "Response Options", default)]
    pub response_options: String,
}

// ******** Output data structures *********

pub const ACTIVITY_TYPE: &str = "survey";
pub const MODE: &str = "basic";
pub const FREQUENCY: &str = "1";

/// One selectable answer of a question.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ResponseOption {
    pub text: String,
    pub value: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub title: String,
    /// The backend type code. Missing when the response type of the row
    /// is not known.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_code: Option<String>,
    pub variable_name: String,
    /// Only present when at least one option was parsed for a question
    /// that is not a text entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<ResponseOption>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Questionnaire {
    pub activity_type: String,
    pub mode: String,
    pub frequency: String,
    pub title: String,
    pub questions: Vec<Question>,
}

impl Questionnaire {
    /// An empty questionnaire with the fixed activity settings.
    pub fn new(title: &str) -> Questionnaire {
        Questionnaire {
            activity_type: ACTIVITY_TYPE.to_string(),
            mode: MODE.to_string(),
            frequency: FREQUENCY.to_string(),
            title: title.to_string(),
            questions: Vec::new(),
        }
    }
}

/// Errors that prevent a worksheet from being restructured.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RestructureError {
    #[snafu(display(
        "row {row} (question {variable_name:?}): response option {segment:?} has no '=' between value and text"
    ))]
    MalformedOption {
        row: usize,
        variable_name: String,
        segment: String,
    },
}

// ********* Response types **********

/// The response types understood by the backend.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ResponseType {
    SingleChoice,
    Image,
    MultipleChoice,
    TextEntry,
}

const RESPONSE_TYPES: [(&str, ResponseType); 4] = [
    ("Single Choice", ResponseType::SingleChoice),
    ("Image", ResponseType::Image),
    ("Multiple Choice", ResponseType::MultipleChoice),
    ("Text Entry", ResponseType::TextEntry),
];

impl ResponseType {
    /// Looks up the label used in the worksheet. The match is exact.
    pub fn from_label(label: &str) -> Option<ResponseType> {
        RESPONSE_TYPES
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, rt)| *rt)
    }

    /// The code expected by the backend.
    pub fn code(&self) -> &'static str {
        match self {
            ResponseType::SingleChoice => "single_sel",
            ResponseType::Image => "image_sel",
            ResponseType::MultipleChoice => "multi_sel",
            ResponseType::TextEntry => "text",
        }
    }
}

/// Translates a worksheet response type into a backend type code.
///
/// Unknown labels are not an error: they simply have no code.
pub fn type_code(label: &str) -> Option<&'static str> {
    ResponseType::from_label(label).map(|rt| rt.code())
}
