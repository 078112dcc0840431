use crate::errors::ClientError;
use crate::models::ReminderId;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Help,
    ListReminders,
    AddReminder { time: String, name: String },
    CompleteReminder(ReminderId),
    DeleteCompleted,
    ListNotes,
    AddNote(String),
    ReadWater(Option<String>),
    AddWater,
    Chat(String),
    Summarize(String),
    DailySummary,
    UploadImage(PathBuf),
    AnalyzeLocal(String),
    Quit,
}

pub struct Command {
    pub name: &'static str,
    pub usage: &'static str,
    parse: fn(&str) -> Result<Action, ClientError>,
}

pub const COMMANDS: &[Command] = &[
    Command { name: "help", usage: "help", parse: |_| Ok(Action::Help) },
    Command { name: "reminders", usage: "reminders", parse: |_| Ok(Action::ListReminders) },
    Command { name: "remind", usage: "remind <HH:MM> <name>", parse: parse_remind },
    Command { name: "done", usage: "done <id>", parse: parse_done },
    Command {
        name: "clear-completed",
        usage: "clear-completed",
        parse: |_| Ok(Action::DeleteCompleted),
    },
    Command { name: "notes", usage: "notes", parse: |_| Ok(Action::ListNotes) },
    Command { name: "note", usage: "note <text>", parse: |rest| Ok(Action::AddNote(rest.to_string())) },
    Command { name: "water", usage: "water [YYYY-MM-DD]", parse: parse_water },
    Command { name: "drink", usage: "drink", parse: |_| Ok(Action::AddWater) },
    Command { name: "chat", usage: "chat <message>", parse: |rest| Ok(Action::Chat(rest.to_string())) },
    Command {
        name: "summarize",
        usage: "summarize <text>",
        parse: |rest| Ok(Action::Summarize(rest.to_string())),
    },
    Command { name: "daily-summary", usage: "daily-summary", parse: |_| Ok(Action::DailySummary) },
    Command { name: "upload", usage: "upload <file>", parse: parse_upload },
    Command {
        name: "analyze",
        usage: "analyze <path>",
        parse: |rest| Ok(Action::AnalyzeLocal(rest.to_string())),
    },
    Command { name: "quit", usage: "quit", parse: |_| Ok(Action::Quit) },
];

/// Looks the first word of `line` up in [`COMMANDS`]. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Action>, ClientError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = COMMANDS
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ClientError::validation(format!("unknown command '{name}', try 'help'")))?;
    (command.parse)(rest).map(Some)
}

fn parse_remind(rest: &str) -> Result<Action, ClientError> {
    let (time, name) = match rest.split_once(char::is_whitespace) {
        Some((time, name)) => (time, name.trim()),
        None => (rest, ""),
    };
    Ok(Action::AddReminder {
        time: time.to_string(),
        name: name.to_string(),
    })
}

fn parse_done(rest: &str) -> Result<Action, ClientError> {
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return Err(ClientError::validation("usage: done <id>"));
    }
    Ok(Action::CompleteReminder(ReminderId::new(rest)))
}

fn parse_water(rest: &str) -> Result<Action, ClientError> {
    if rest.is_empty() {
        return Ok(Action::ReadWater(None));
    }
    chrono::NaiveDate::parse_from_str(rest, "%Y-%m-%d")
        .map_err(|_| ClientError::validation("date must be YYYY-MM-DD"))?;
    Ok(Action::ReadWater(Some(rest.to_string())))
}

fn parse_upload(rest: &str) -> Result<Action, ClientError> {
    if rest.is_empty() {
        return Err(ClientError::validation("usage: upload <file>"));
    }
    Ok(Action::UploadImage(PathBuf::from(rest)))
}
