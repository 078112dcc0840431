use crate::errors::ClientError;
use crate::models::{
    CreatedResponse, NewNote, NewReminder, NotesResponse, ReminderId, RemindersResponse,
    WaterResponse, decode_or_default,
};
use crate::state::{AssistantView, NotesView, RemindersView, WaterView};
use crate::transport::{ApiRequest, ApiResponse, Transport};
use chrono::Local;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tokio::sync::Mutex;
use tracing::{info, warn};

// Everything outside the RFC 3986 unreserved set, so an id is always one segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Keeps one view model per collection in step with the backend.
///
/// Mutations never patch a view locally: they send the request and then
/// re-fetch the whole collection. A failed fetch keeps the previous items
/// and only sets the view's error string.
pub struct SyncClient<T> {
    transport: T,
    pub(crate) reminders: Mutex<RemindersView>,
    pub(crate) notes: Mutex<NotesView>,
    pub(crate) water: Mutex<WaterView>,
    pub(crate) assistant: Mutex<AssistantView>,
}

impl<T: Transport> SyncClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            reminders: Mutex::new(RemindersView::default()),
            notes: Mutex::new(NotesView::default()),
            water: Mutex::new(WaterView::default()),
            assistant: Mutex::new(AssistantView::default()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn reminders(&self) -> RemindersView {
        self.reminders.lock().await.clone()
    }

    pub async fn notes(&self) -> NotesView {
        self.notes.lock().await.clone()
    }

    pub async fn water(&self) -> WaterView {
        self.water.lock().await.clone()
    }

    pub async fn assistant(&self) -> AssistantView {
        self.assistant.lock().await.clone()
    }

    pub(crate) async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.transport.send(request).await
    }

    pub async fn add_reminder(&self, name: &str, time: &str) -> Result<(), ClientError> {
        let (name, time) = (name.trim(), time.trim());
        if name.is_empty() || time.is_empty() {
            let err = ClientError::validation("reminder name and time are required");
            self.reminders.lock().await.error = Some(err.to_string());
            return Err(err);
        }

        let request = ApiRequest::post("/api/reminder").json(&NewReminder { name, time })?;
        match self.send(request).await {
            Ok(response) => {
                let created: CreatedResponse = decode_or_default(&response.body);
                info!(ok = created.ok, "created reminder {name} at {time}");
            }
            Err(err) => warn!("failed to create reminder: {err}"),
        }

        self.list_reminders().await
    }

    pub async fn complete_reminder(&self, id: &ReminderId) -> Result<(), ClientError> {
        let segment = utf8_percent_encode(id.as_str(), PATH_SEGMENT);
        let request = ApiRequest::post(format!("/api/reminder/{segment}/complete"));
        if let Err(err) = self.send(request).await {
            warn!(%id, "failed to complete reminder: {err}");
        }

        self.list_reminders().await
    }

    pub async fn delete_completed_reminders(&self) -> Result<(), ClientError> {
        if let Err(err) = self.send(ApiRequest::delete("/api/reminders/completed")).await {
            warn!("failed to delete completed reminders: {err}");
        }

        self.list_reminders().await
    }

    pub async fn list_reminders(&self) -> Result<(), ClientError> {
        match self.send(ApiRequest::get("/api/reminders")).await {
            Ok(response) => {
                let parsed: RemindersResponse = decode_or_default(&response.body);
                *self.reminders.lock().await = RemindersView {
                    items: parsed.reminders,
                    error: None,
                };
                Ok(())
            }
            Err(err) => {
                warn!("failed to load reminders: {err}");
                self.reminders.lock().await.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn add_note(&self, content: &str) -> Result<(), ClientError> {
        let content = content.trim();
        if content.is_empty() {
            let err = ClientError::validation("note content is required");
            self.notes.lock().await.error = Some(err.to_string());
            return Err(err);
        }

        let request = ApiRequest::post("/api/notes").json(&NewNote { content })?;
        if let Err(err) = self.send(request).await {
            warn!("failed to create note: {err}");
        }

        self.list_notes().await
    }

    pub async fn list_notes(&self) -> Result<(), ClientError> {
        match self.send(ApiRequest::get("/api/notes")).await {
            Ok(response) => {
                let parsed: NotesResponse = decode_or_default(&response.body);
                *self.notes.lock().await = NotesView {
                    items: parsed.notes,
                    error: None,
                };
                Ok(())
            }
            Err(err) => {
                warn!("failed to load notes: {err}");
                self.notes.lock().await.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn read_water_count(&self, date: &str) -> Result<u64, ClientError> {
        let request = ApiRequest::get("/api/water").query("date", date);
        self.apply_water(date, self.send(request).await).await
    }

    pub async fn read_today_water(&self) -> Result<u64, ClientError> {
        self.read_water_count(&today_string()).await
    }

    /// Asks the backend to add one glass for today and shows the count it
    /// returns. The client never computes the new total itself. The view is
    /// labelled with the date the backend reports, falling back to the local
    /// date when the response has none.
    pub async fn increment_water(&self) -> Result<u64, ClientError> {
        let date = today_string();
        let response = self.send(ApiRequest::post("/api/water")).await;
        self.apply_water(&date, response).await
    }

    async fn apply_water(
        &self,
        date: &str,
        response: Result<ApiResponse, ClientError>,
    ) -> Result<u64, ClientError> {
        match response {
            Ok(response) => {
                let parsed: WaterResponse = decode_or_default(&response.body);
                *self.water.lock().await = WaterView {
                    date: Some(parsed.date.unwrap_or_else(|| date.to_string())),
                    count: parsed.count,
                    error: None,
                };
                Ok(parsed.count)
            }
            Err(err) => {
                warn!(date, "failed to update water count: {err}");
                self.water.lock().await.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

pub fn today_string() -> String {
    Local::now().date_naive().to_string()
}
