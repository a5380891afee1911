/*!

This is the long-form manual for `questionnaire_restructure` and `csv2questionnaire`.

## The worksheet

A worksheet is a CSV file with one header line followed by one line per question.
The header must contain the following columns (in any order):

| Column                       | Required | Content                                               |
|------------------------------|----------|-------------------------------------------------------|
| `Questionnaire Name`         | yes      | full name of the questionnaire                        |
| `Questionnaire Abbreviation` | yes      | short name of the questionnaire                       |
| `Question Group Instruction` | no       | text shown in front of the question                   |
| `Question`                   | yes      | the question itself                                   |
| `Question Abbreviation`      | yes      | the variable name of the answer                       |
| `Response Type`              | yes      | `Single Choice`, `Multiple Choice`, `Image` or `Text Entry` |
| `Response Options`           | no       | the possible answers, see below                       |

Empty lines are skipped.

### Questionnaires

The title of a questionnaire is computed from each line: it is the name when the name
and the abbreviation are the same, and `ABBREVIATION (Name)` otherwise:
`PHQ9 (Patient Health Questionnaire)`. All the lines with the same computed title are put
in the same questionnaire, in the order of the worksheet, even when their name and
abbreviation differ: a line with name and abbreviation `PHQ9 (Patient)` joins the lines
named `Patient` with the abbreviation `PHQ9`.

### Questions

The title of a question is the content of the `Question` column, prefixed by the
group instruction if there is one: `Over the last 2 weeks: Feeling tired`.

The response type is translated for the backend:

| Response type     | Code         |
|-------------------|--------------|
| `Single Choice`   | `single_sel` |
| `Image`           | `image_sel`  |
| `Multiple Choice` | `multi_sel`  |
| `Text Entry`      | `text`       |

Any other response type is copied without a code: the `type` field is left out of the
question.

### Response options

Each option is written `value=text`. Options are put on separate lines of the cell:

```text
0=Not at all
1=Several days
2=More than half the days
```

or, if the cell has a single line, separated by commas: `1=Yes, 2=No`. An option
without `=` is an error and stops the conversion of the whole file.

Options are ignored for `Text Entry` questions. A question without any option has no
`rows` field.

## Output

```json
[
  {
    "activity_type": "survey",
    "mode": "basic",
    "frequency": "1",
    "title": "PHQ9",
    "questions": [
      {
        "title": "Little interest or pleasure in doing things",
        "type": "single_sel",
        "variable_name": "phq9_1",
        "rows": [
          { "text": "Not at all", "value": "0" },
          { "text": "Several days", "value": "1" }
        ]
      }
    ]
  }
]
```

`csv2questionnaire` writes one file per questionnaire (`PHQ9.json`) and one file with
all the questionnaires of a worksheet (`my_worksheet_questionnaires.json`). Spaces and
slashes in file names are replaced by underscores. A file name is never written twice in
the same run: when two questionnaires end up with the same name (`Mood/Anxiety` and
`Mood Anxiety`, or `PHQ9` in two worksheets), the second one is written to
`Mood_Anxiety_2.json`.

*/
