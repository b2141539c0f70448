use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Column names of the question table, in their canonical order.
pub const COLUMNS: [&str; 10] = [
    "nr",
    "question",
    "subject",
    "use",
    "responseA",
    "responseB",
    "responseC",
    "responseD",
    "correct",
    "remark",
];

/// Marker stored in `correct` when no response is correct.
pub const NO_CORRECT_ANSWER: &str = "None";

const OPTION_LETTERS: [&str; 4] = ["A", "B", "C", "D"];

/// One row of the question table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Stable 1-based identifier, `0` while unassigned
    #[serde(default, deserialize_with = "nr_or_unassigned")]
    pub nr: u32,
    pub question: Option<String>,
    pub subject: Option<String>,
    #[serde(rename = "use")]
    pub test_type: Option<String>,
    pub response_a: Option<String>,
    pub response_b: Option<String>,
    pub response_c: Option<String>,
    pub response_d: Option<String>,
    pub correct: Option<String>,
    pub remark: Option<String>,
}

impl Question {
    /// Text value of a column, `None` for null cells and unknown columns.
    /// `nr` is rendered as its decimal form.
    pub fn field(&self, column: &str) -> Option<String> {
        let text = match column {
            "nr" => return Some(self.nr.to_string()),
            "question" => &self.question,
            "subject" => &self.subject,
            "use" => &self.test_type,
            "responseA" => &self.response_a,
            "responseB" => &self.response_b,
            "responseC" => &self.response_c,
            "responseD" => &self.response_d,
            "correct" => &self.correct,
            "remark" => &self.remark,
            _ => return None,
        };
        text.clone()
    }

    /// Mutable slot for a text column.
    pub fn text_slot(&mut self, column: &str) -> Option<&mut Option<String>> {
        match column {
            "question" => Some(&mut self.question),
            "subject" => Some(&mut self.subject),
            "use" => Some(&mut self.test_type),
            "responseA" => Some(&mut self.response_a),
            "responseB" => Some(&mut self.response_b),
            "responseC" => Some(&mut self.response_c),
            "responseD" => Some(&mut self.response_d),
            "correct" => Some(&mut self.correct),
            "remark" => Some(&mut self.remark),
            _ => None,
        }
    }
}

fn nr_or_unassigned<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

fn is_filled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Options an admin may tick as correct for the given responses A to D:
/// always `"None"`, then every letter whose response has content.
pub fn valid_options(responses: [Option<&str>; 4]) -> Vec<&'static str> {
    let mut options = vec![NO_CORRECT_ANSWER];
    for (letter, response) in OPTION_LETTERS.iter().zip(responses) {
        if is_filled(response) {
            options.push(*letter);
        }
    }
    options
}

/// Builds the `correct` cell from a multi-selection.
pub fn join_correct<S: AsRef<str>>(selected: &[S]) -> String {
    let letters: Vec<&str> = selected
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| *s != NO_CORRECT_ANSWER)
        .collect();

    if letters.is_empty() {
        NO_CORRECT_ANSWER.to_string()
    } else {
        letters.join(", ")
    }
}

/// A question as submitted by an admin, before it joins the table
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct QuestionDraft {
    pub question: Question,
}

impl QuestionDraft {
    pub fn from_record(record: &Map<String, Value>) -> serde_json::Result<Self> {
        serde_json::from_value(Value::Object(record.clone()))
    }

    /// Rewrites `correct` the way the selection widget builds it, so a
    /// missing value or a stray `"None"` next to letters is cleaned up.
    pub fn normalize_correct(&mut self) -> &str {
        let selected: Vec<&str> = self
            .question
            .correct
            .as_deref()
            .map(|c| c.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        let correct = join_correct(&selected);
        self.question.correct.insert(correct)
    }

    /// Checks the upload requirements. On failure returns a human readable
    /// reason naming every offending field.
    pub fn validate(&self) -> Result<(), String> {
        let q = &self.question;
        let required = [
            ("question", q.question.as_deref()),
            ("subject", q.subject.as_deref()),
            ("use", q.test_type.as_deref()),
            ("responseA", q.response_a.as_deref()),
            ("responseB", q.response_b.as_deref()),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| !is_filled(*value))
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(format!("Missing required fields: {}", missing.join(", ")));
        }

        let allowed = valid_options([
            q.response_a.as_deref(),
            q.response_b.as_deref(),
            q.response_c.as_deref(),
            q.response_d.as_deref(),
        ]);
        let correct = q.correct.as_deref().unwrap_or(NO_CORRECT_ANSWER);
        if correct == NO_CORRECT_ANSWER {
            return Ok(());
        }
        for letter in correct.split(", ") {
            if letter == NO_CORRECT_ANSWER || !allowed.iter().any(|option| *option == letter) {
                return Err(format!("Invalid correct option: {letter}"));
            }
        }
        Ok(())
    }
}

/// Response body carrying a list of questions
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
}

/// Body of `POST /add_question` and `POST /preview_question`
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddQuestionRequest {
    #[schema(value_type = Option<Object>)]
    pub new_question: Option<Map<String, Value>>,
}

/// Outcome payload of the admin write path
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub question: Option<Map<String, Value>>,
}

impl StatusResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            question: None,
        }
    }

    pub fn success(question: Map<String, Value>) -> Self {
        Self {
            status: "success".to_string(),
            message: "Question received successfully".to_string(),
            question: Some(question),
        }
    }
}
