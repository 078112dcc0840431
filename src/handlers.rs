use crate::app::Action;
use crate::client::SyncClient;
use crate::errors::ClientError;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Help,
    Reminders,
    Notes,
    Water,
    Assistant,
    Quit,
}

/// Runs one user action and reports which panel now needs redrawing.
pub async fn dispatch<T: Transport>(
    client: &SyncClient<T>,
    action: Action,
) -> (Panel, Result<(), ClientError>) {
    match action {
        Action::Help => (Panel::Help, Ok(())),
        Action::Quit => (Panel::Quit, Ok(())),
        Action::ListReminders => (Panel::Reminders, client.list_reminders().await),
        Action::AddReminder { time, name } => {
            (Panel::Reminders, client.add_reminder(&name, &time).await)
        }
        Action::CompleteReminder(id) => (Panel::Reminders, client.complete_reminder(&id).await),
        Action::DeleteCompleted => (Panel::Reminders, delete_completed(client).await),
        Action::ListNotes => (Panel::Notes, client.list_notes().await),
        Action::AddNote(content) => (Panel::Notes, client.add_note(&content).await),
        Action::ReadWater(date) => {
            let result = match date {
                Some(date) => client.read_water_count(&date).await,
                None => client.read_today_water().await,
            };
            (Panel::Water, result.map(drop))
        }
        Action::AddWater => (Panel::Water, client.increment_water().await.map(drop)),
        Action::Chat(message) => (Panel::Assistant, client.chat(&message).await.map(drop)),
        Action::Summarize(text) => (Panel::Assistant, client.summarize(&text).await.map(drop)),
        Action::DailySummary => (Panel::Assistant, client.daily_summary().await.map(drop)),
        Action::UploadImage(path) => {
            (Panel::Assistant, client.upload_image(&path).await.map(drop))
        }
        Action::AnalyzeLocal(path) => {
            (Panel::Assistant, client.analyze_local(&path).await.map(drop))
        }
    }
}

// The control is disabled unless the visible list has a completed entry.
async fn delete_completed<T: Transport>(client: &SyncClient<T>) -> Result<(), ClientError> {
    let mut view = client.reminders.lock().await;
    if !view.can_delete_completed() {
        let err = ClientError::validation("no completed reminders to clear");
        view.error = Some(err.to_string());
        return Err(err);
    }
    drop(view);
    client.delete_completed_reminders().await
}
