use crate::app::COMMANDS;
use crate::state::{AssistantView, NotesView, RemindersView, WaterView};
use std::fmt::Write;

pub fn render_help() -> String {
    let mut out = String::from("Commands:\n");
    for command in COMMANDS {
        let _ = writeln!(out, "  {}", command.usage);
    }
    out
}

pub fn render_reminders(view: &RemindersView) -> String {
    let mut out = String::from("Reminders\n");
    if view.items.is_empty() {
        out.push_str("  (no reminders)\n");
    }
    for reminder in &view.items {
        let mark = if reminder.completed { 'x' } else { ' ' };
        let _ = writeln!(
            out,
            "  [{mark}] #{} {} at {}",
            reminder.id, reminder.name, reminder.time
        );
    }
    let state = if view.can_delete_completed() {
        "enabled"
    } else {
        "disabled"
    };
    let _ = writeln!(out, "  clear-completed: {state}");
    push_error(&mut out, view.error.as_deref());
    out
}

pub fn render_notes(view: &NotesView) -> String {
    let mut out = String::from("Notes\n");
    if view.items.is_empty() {
        out.push_str("  (no notes)\n");
    }
    for note in &view.items {
        match &note.created_at {
            Some(created_at) => {
                let _ = writeln!(out, "  - {} ({created_at})", note.content);
            }
            None => {
                let _ = writeln!(out, "  - {}", note.content);
            }
        }
    }
    push_error(&mut out, view.error.as_deref());
    out
}

pub fn render_water(view: &WaterView) -> String {
    let mut out = String::new();
    let date = view.date.as_deref().unwrap_or("today");
    let glasses = if view.count == 1 { "glass" } else { "glasses" };
    let _ = writeln!(out, "Water {date}: {} {glasses}", view.count);
    push_error(&mut out, view.error.as_deref());
    out
}

pub fn render_assistant(view: &AssistantView) -> String {
    let mut out = String::new();
    if let Some(reply) = &view.chat_reply {
        let _ = writeln!(out, "Assistant: {reply}");
    }
    if let Some(summary) = &view.summary {
        let _ = writeln!(out, "Summary:\n{summary}");
    }
    if let Some(summary) = &view.daily_summary {
        let _ = writeln!(out, "Daily summary:\n{summary}");
    }
    if let Some(image) = &view.image {
        let _ = writeln!(out, "Image analysis:\n{}", image.description);
        if let Some(remote) = &image.gemini_description {
            let _ = writeln!(out, "AI description:\n{remote}");
        }
    }
    push_error(&mut out, view.error.as_deref());
    out
}

fn push_error(out: &mut String, error: Option<&str>) {
    if let Some(error) = error {
        let _ = writeln!(out, "  ! {error}");
    }
}
