use crate::client::SyncClient;
use crate::errors::ClientError;
use crate::models::{
    AnalyzeLocalRequest, ChatRequest, ChatResponse, ImageAnalysis, ImageAnalysisResponse,
    SummarizeRequest, SummaryResponse, decode_or_default,
};
use crate::state::AssistantView;
use crate::transport::{ApiRequest, ApiResponse, Transport};
use std::path::Path;
use tokio::fs;
use tracing::warn;

// The assistant endpoints are opaque: whatever text the backend produces is
// shown as-is, and a failure keeps the previous output on screen.
impl<T: Transport> SyncClient<T> {
    pub async fn chat(&self, message: &str) -> Result<String, ClientError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(self.reject("message is required").await);
        }

        let request = ApiRequest::post("/api/chat").json(&ChatRequest { message })?;
        let response = self.send(request).await;
        self.record(response, |view, body| {
            let parsed: ChatResponse = decode_or_default(body);
            view.chat_reply = Some(parsed.reply.clone());
            parsed.reply
        })
        .await
    }

    pub async fn summarize(&self, text: &str) -> Result<String, ClientError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(self.reject("text to summarize is required").await);
        }

        let request = ApiRequest::post("/api/summarize").json(&SummarizeRequest { text })?;
        let response = self.send(request).await;
        self.record(response, |view, body| {
            let parsed: SummaryResponse = decode_or_default(body);
            view.summary = Some(parsed.summary.clone());
            parsed.summary
        })
        .await
    }

    pub async fn daily_summary(&self) -> Result<String, ClientError> {
        let response = self.send(ApiRequest::get("/api/daily_summary")).await;
        self.record(response, |view, body| {
            let parsed: SummaryResponse = decode_or_default(body);
            view.daily_summary = Some(parsed.summary.clone());
            parsed.summary
        })
        .await
    }

    pub async fn upload_image(&self, path: &Path) -> Result<ImageAnalysis, ClientError> {
        let file_name = match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => name.to_string(),
            None => return Err(self.reject("choose an image file").await),
        };
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                let err = ClientError::from(err);
                self.assistant.lock().await.error = Some(err.to_string());
                return Err(err);
            }
        };

        let request = ApiRequest::post("/api/upload_image").multipart("image", file_name, bytes);
        let response = self.send(request).await;
        self.record(response, store_analysis).await
    }

    pub async fn analyze_local(&self, path: &str) -> Result<ImageAnalysis, ClientError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(self.reject("image path is required").await);
        }

        let request = ApiRequest::post("/api/analyze_local").json(&AnalyzeLocalRequest { path })?;
        let response = self.send(request).await;
        self.record(response, store_analysis).await
    }

    async fn reject(&self, message: &str) -> ClientError {
        let err = ClientError::validation(message);
        self.assistant.lock().await.error = Some(err.to_string());
        err
    }

    async fn record<R>(
        &self,
        response: Result<ApiResponse, ClientError>,
        apply: impl FnOnce(&mut AssistantView, &serde_json::Value) -> R,
    ) -> Result<R, ClientError> {
        let mut view = self.assistant.lock().await;
        match response {
            Ok(response) => {
                view.error = None;
                Ok(apply(&mut *view, &response.body))
            }
            Err(err) => {
                warn!("assistant request failed: {err}");
                view.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

fn store_analysis(view: &mut AssistantView, body: &serde_json::Value) -> ImageAnalysis {
    let parsed: ImageAnalysisResponse = decode_or_default(body);
    let analysis = ImageAnalysis::from(parsed);
    view.image = Some(analysis.clone());
    analysis
}
