use log::warn;
use snafu::prelude::*;
use std::collections::HashSet;
use std::path::Path;

use crate::survey::*;

/// The name of the file, without its directory.
pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Only worksheets with the exact `csv` extension are accepted.
pub fn check_extension(path: &str) -> SurveyResult<()> {
    let extension = Path::new(path)
        .extension()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    ensure!(
        extension == "csv",
        UnsupportedExtensionSnafu {
            path,
            extension
        }
    );
    Ok(())
}

/// Replaces the characters that do not belong in a file name.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect()
}

/// The file holding a single questionnaire.
pub fn questionnaire_file_name(title: &str) -> String {
    format!("{}.json", sanitize(title))
}

/// The file holding all the questionnaires of a worksheet.
pub fn combined_file_name(source_path: &str) -> String {
    let stem = Path::new(source_path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| simplify_file_name(source_path));
    format!("{}_questionnaires.json", sanitize(&stem))
}

/// Makes sure that no two outputs of a run share the same file name.
///
/// A name already taken gets a numbered suffix before the extension:
/// `PHQ9.json`, then `PHQ9_2.json`, `PHQ9_3.json` and so on.
pub fn unique_file_name(name: String, used: &mut HashSet<String>) -> String {
    if used.insert(name.clone()) {
        return name;
    }
    let (stem, extension) = match name.rsplit_once('.') {
        Some((stem, extension)) => (stem.to_string(), format!(".{}", extension)),
        None => (name.clone(), String::new()),
    };
    let mut idx: usize = 2;
    loop {
        let candidate = format!("{}_{}{}", stem, idx, extension);
        if used.insert(candidate.clone()) {
            warn!("{} is already written by this run, using {}", name, candidate);
            return candidate;
        }
        idx += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_csv() {
        assert!(check_extension("data/my worksheet.csv").is_ok());
        assert!(check_extension("/tmp/a.b.csv").is_ok());
    }

    #[test]
    fn rejects_other_extensions() {
        for (path, ext) in [
            ("survey.xlsx", "xlsx"),
            ("survey.CSV", "CSV"),
            ("survey.csv.bak", "bak"),
            ("survey", ""),
        ] {
            let err = check_extension(path).unwrap_err();
            match &err {
                SurveyError::UnsupportedExtension { extension, .. } => {
                    assert_eq!(extension, ext)
                }
                e => panic!("unexpected error {:?}", e),
            }
            assert!(err.to_string().contains(&format!("'{}'", ext)));
        }
    }

    #[test]
    fn file_names() {
        assert_eq!(questionnaire_file_name("PHQ9"), "PHQ9.json");
        assert_eq!(
            questionnaire_file_name("PHQ9 (Patient Health Questionnaire)"),
            "PHQ9_(Patient_Health_Questionnaire).json"
        );
        assert_eq!(questionnaire_file_name("Mood/Anxiety"), "Mood_Anxiety.json");
        assert_eq!(
            combined_file_name("/data/intake forms.csv"),
            "intake_forms_questionnaires.json"
        );
        assert_eq!(simplify_file_name("/data/intake forms.csv"), "intake forms.csv");
    }

    #[test]
    fn numbered_suffix_on_clash() {
        let mut used = HashSet::new();
        let first = unique_file_name(questionnaire_file_name("Mood/Anxiety"), &mut used);
        let second = unique_file_name(questionnaire_file_name("Mood Anxiety"), &mut used);
        let third = unique_file_name("Mood_Anxiety.json".to_string(), &mut used);
        assert_eq!(first, "Mood_Anxiety.json");
        assert_eq!(second, "Mood_Anxiety_2.json");
        assert_eq!(third, "Mood_Anxiety_3.json");
        // A generated name is taken too.
        assert_eq!(
            unique_file_name("Mood_Anxiety_2.json".to_string(), &mut used),
            "Mood_Anxiety_2_2.json"
        );
        assert_eq!(unique_file_name("PHQ9.json".to_string(), &mut used), "PHQ9.json");
    }
}
