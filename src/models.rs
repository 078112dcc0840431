use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use std::fmt;

/// Server-assigned reminder identifier. The backend may send it as a number
/// or a string; the client only ever echoes it back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct ReminderId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

impl From<RawId> for ReminderId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(value) => Self(value.to_string()),
            RawId::Text(value) => Self(value),
        }
    }
}

impl From<ReminderId> for String {
    fn from(id: ReminderId) -> Self {
        id.0
    }
}

impl ReminderId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewReminder<'a> {
    pub name: &'a str,
    pub time: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NewNote<'a> {
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SummarizeRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeLocalRequest<'a> {
    pub path: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct RemindersResponse {
    #[serde(default, deserialize_with = "skip_malformed")]
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NotesResponse {
    #[serde(default, deserialize_with = "skip_malformed")]
    pub notes: Vec<Note>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreatedResponse {
    #[serde(default)]
    pub ok: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct WaterResponse {
    #[serde(default)]
    pub count: u64,
    /// The day the backend applied the change to, when it says so.
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub reply: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImageAnalysisResponse {
    #[serde(default)]
    pub local_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub medical_assistance: Option<String>,
    #[serde(default)]
    pub gemini_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageAnalysis {
    pub description: String,
    pub gemini_description: Option<String>,
}

impl From<ImageAnalysisResponse> for ImageAnalysis {
    fn from(response: ImageAnalysisResponse) -> Self {
        let description = response
            .local_description
            .or(response.description)
            .or(response.medical_assistance)
            .unwrap_or_default();
        Self {
            description,
            gemini_description: response.gemini_description,
        }
    }
}

// Entries are decoded one by one; a malformed record is dropped, not the list.
fn skip_malformed<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

/// Decodes a response body, falling back to the default value when the
/// body does not have the expected shape.
pub fn decode_or_default<T>(body: &serde_json::Value) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_value(body.clone()).unwrap_or_default()
}
