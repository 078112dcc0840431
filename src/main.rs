use medibot_client::app::parse_line;
use medibot_client::handlers::{Panel, dispatch};
use medibot_client::ui::{render_assistant, render_help, render_notes, render_reminders, render_water};
use medibot_client::{
    CacheFile, ClientConfig, HttpTransport, OfflineWorker, ResponseCache, SyncClient, Transport,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    let cache_file = CacheFile::new(config.cache_path.clone());
    let cache = ResponseCache::new(cache_file.load().await);
    info!(path = %cache_file.path().display(), entries = cache.len().await, "response cache loaded");

    let network = HttpTransport::new(config.api_url.clone())?.with_cache(cache.clone());
    let worker = OfflineWorker::new(network, cache.clone());
    if config.offline_fallback {
        worker.install().await;
    }
    let worker_state = worker.state().await;
    let client = SyncClient::new(worker);
    info!(api_url = %config.api_url, worker = ?worker_state, "medibot client ready");

    // Failures here are already recorded on the views.
    let _ = client.list_reminders().await;
    let _ = client.list_notes().await;
    let _ = client.read_today_water().await;
    for panel in [Panel::Help, Panel::Reminders, Panel::Notes, Panel::Water] {
        print!("{}", render_panel(panel, &client).await);
    }
    save_cache(&cache_file, &cache).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        let action = match parse_line(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(err) => {
                println!("! {err}");
                continue;
            }
        };

        let (panel, _) = dispatch(&client, action).await;
        if panel == Panel::Quit {
            break;
        }
        print!("{}", render_panel(panel, &client).await);
        save_cache(&cache_file, &cache).await;
    }

    client.transport().terminate().await;
    save_cache(&cache_file, &cache).await;
    info!("medibot client stopped");

    Ok(())
}

async fn render_panel<T: Transport>(panel: Panel, client: &SyncClient<T>) -> String {
    match panel {
        Panel::Help => render_help(),
        Panel::Reminders => render_reminders(&client.reminders().await),
        Panel::Notes => render_notes(&client.notes().await),
        Panel::Water => render_water(&client.water().await),
        Panel::Assistant => render_assistant(&client.assistant().await),
        Panel::Quit => String::new(),
    }
}

async fn save_cache(file: &CacheFile, cache: &ResponseCache) {
    if let Err(err) = file.save(&cache.snapshot().await).await {
        error!("failed to persist cache: {err}");
    }
}
