use crate::models::{ImageAnalysis, Note, Reminder};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemindersView {
    pub items: Vec<Reminder>,
    pub error: Option<String>,
}

impl RemindersView {
    /// Whether the "clear completed" control is enabled for the current list.
    pub fn can_delete_completed(&self) -> bool {
        self.items.iter().any(|reminder| reminder.completed)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotesView {
    pub items: Vec<Note>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaterView {
    pub date: Option<String>,
    pub count: u64,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssistantView {
    pub chat_reply: Option<String>,
    pub summary: Option<String>,
    pub daily_summary: Option<String>,
    pub image: Option<ImageAnalysis>,
    pub error: Option<String>,
}
