//! Per-key action instances and the host event dispatcher.
//!
//! The host serialises callbacks per key instance, so a single dispatcher
//! task consuming events in order is the whole concurrency model. The
//! only work taken off that path is the refresh (one network round trip
//! plus an icon fetch), which runs as a fire-and-forget task and applies
//! its result when it completes.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use recentdeck_artwork::KeyImage;
use recentdeck_protocol::{ContextEvent, Inbound, Outbound};
use recentdeck_steam::{ClampPolicy, FetchError, LaunchError, RecentGames};

use crate::settings::PluginSettings;

/// How often a visible key re-pushes its cached image.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Abstract source of the recently played list.
///
/// The plugin runs against [`recentdeck_steam::Client`]; tests run
/// against canned doubles.
pub trait GameListFetcher: Send + Sync {
    fn fetch(
        &self,
        steam_id: &str,
        api_token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<RecentGames, FetchError>> + Send + '_>>;
}

impl GameListFetcher for recentdeck_steam::Client {
    fn fetch(
        &self,
        steam_id: &str,
        api_token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<RecentGames, FetchError>> + Send + '_>> {
        let steam_id = steam_id.to_owned();
        let api_token = api_token.to_owned();
        Box::pin(async move { self.get_recently_played(&steam_id, &api_token).await })
    }
}

/// Abstract icon source. Failure is already absorbed to `None` here.
pub trait IconResolver: Send + Sync {
    fn resolve(
        &self,
        app_id: &str,
        icon_hash: &str,
    ) -> Pin<Box<dyn Future<Output = Option<KeyImage>> + Send + '_>>;
}

impl IconResolver for recentdeck_artwork::IconClient {
    fn resolve(
        &self,
        app_id: &str,
        icon_hash: &str,
    ) -> Pin<Box<dyn Future<Output = Option<KeyImage>> + Send + '_>> {
        let app_id = app_id.to_owned();
        let icon_hash = icon_hash.to_owned();
        Box::pin(async move { self.fetch(&app_id, &icon_hash).await })
    }
}

/// Abstract launcher, so key presses are testable without opening Steam.
pub trait GameLauncher: Send + Sync {
    fn launch(
        &self,
        app_id: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), LaunchError>> + Send + '_>>;
}

/// Launches through the OS default URI handler.
pub struct SteamLauncher;

impl GameLauncher for SteamLauncher {
    fn launch(
        &self,
        app_id: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), LaunchError>> + Send + '_>> {
        let app_id = app_id.to_owned();
        Box::pin(async move { recentdeck_steam::launch(&app_id).await })
    }
}

/// What the key currently shows.
///
/// Replaced wholesale after a successful refresh; a failed refresh leaves
/// the previous state untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub title: String,
    pub app_id: String,
    pub image: Option<KeyImage>,
}

/// One visible key running this action.
struct ActionInstance {
    context: String,
    settings: PluginSettings,
    display: Arc<Mutex<Option<DisplayState>>>,
    out_tx: mpsc::Sender<Outbound>,
    tick: CancellationToken,
}

impl ActionInstance {
    fn new(context: String, settings: PluginSettings, out_tx: mpsc::Sender<Outbound>) -> Self {
        let instance = Self {
            context,
            settings,
            display: Arc::new(Mutex::new(None)),
            out_tx,
            tick: CancellationToken::new(),
        };
        instance.start_tick();
        instance
    }

    /// Periodic re-push of the cached image. Never re-fetches.
    fn start_tick(&self) {
        let display = self.display.clone();
        let out_tx = self.out_tx.clone();
        let context = self.context.clone();
        let cancel = self.tick.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_PERIOD);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        let image_uri = display
                            .lock()
                            .await
                            .as_ref()
                            .and_then(|d| d.image.as_ref().map(KeyImage::data_uri));
                        if let Some(uri) = image_uri
                            && out_tx
                                .send(Outbound::set_image(context.as_str(), Some(uri)))
                                .await
                                .is_err()
                        {
                            break;
                        }
                    }
                }
            }
        });
    }

    /// Starts a background refresh with the instance's current settings.
    ///
    /// Fire-and-forget: results apply whenever they arrive. Overlapping
    /// refreshes (rapid settings edits) may complete out of order; the
    /// brief stale overwrite is accepted.
    fn spawn_refresh(&self, fetcher: Arc<dyn GameListFetcher>, icons: Arc<dyn IconResolver>) {
        let settings = self.settings.clone();
        let display = self.display.clone();
        let out_tx = self.out_tx.clone();
        let context = self.context.clone();

        tokio::spawn(async move {
            match run_refresh(fetcher.as_ref(), icons.as_ref(), &settings).await {
                Ok(state) => {
                    let title = state.title.clone();
                    let image_uri = state.image.as_ref().map(KeyImage::data_uri);
                    *display.lock().await = Some(state);

                    let _ = out_tx
                        .send(Outbound::set_title(context.as_str(), Some(title)))
                        .await;
                    if image_uri.is_some() {
                        let _ = out_tx
                            .send(Outbound::set_image(context.as_str(), image_uri))
                            .await;
                    }
                }
                Err(e) => {
                    // The previous title/image stay on the key.
                    warn!(context = %context, "refresh failed: {e}");
                    let _ = out_tx
                        .send(Outbound::log_message(format!("refresh failed: {e}")))
                        .await;
                }
            }
        });
    }
}

impl Drop for ActionInstance {
    fn drop(&mut self) {
        self.tick.cancel();
    }
}

/// Fetch, select, resolve icon: one refresh pass.
///
/// Icon resolution can only widen the result with an image; its failure
/// never turns a successful selection into an error.
async fn run_refresh(
    fetcher: &dyn GameListFetcher,
    icons: &dyn IconResolver,
    settings: &PluginSettings,
) -> anyhow::Result<DisplayState> {
    let list = fetcher.fetch(&settings.steam_id, &settings.api_token).await?;
    let selection = recentdeck_steam::select(&list, &settings.index, ClampPolicy::default())?;
    debug!(
        title = %selection.game.name,
        effective = selection.effective,
        "selected game"
    );

    let recentdeck_steam::GameEntry {
        name,
        app_id,
        icon_hash,
    } = selection.game;
    let image = icons.resolve(&app_id, &icon_hash).await;

    Ok(DisplayState {
        title: name,
        app_id,
        image,
    })
}

/// Routes host events to action instances.
pub struct Dispatcher {
    fetcher: Arc<dyn GameListFetcher>,
    icons: Arc<dyn IconResolver>,
    launcher: Arc<dyn GameLauncher>,
    out_tx: mpsc::Sender<Outbound>,
    actions: HashMap<String, ActionInstance>,
}

impl Dispatcher {
    pub fn new(
        out_tx: mpsc::Sender<Outbound>,
        fetcher: Arc<dyn GameListFetcher>,
        icons: Arc<dyn IconResolver>,
        launcher: Arc<dyn GameLauncher>,
    ) -> Self {
        Self {
            fetcher,
            icons,
            launcher,
            out_tx,
            actions: HashMap::new(),
        }
    }

    pub async fn handle(&mut self, event: Inbound) {
        match event {
            Inbound::WillAppear(e) => self.will_appear(e).await,
            Inbound::DidReceiveSettings(e) => self.settings_changed(e).await,
            Inbound::KeyDown(e) => self.key_down(e).await,
            // Key release is deliberately a no-op.
            Inbound::KeyUp(_) => {}
            Inbound::WillDisappear(e) => {
                debug!(context = %e.context, "key disappeared");
                self.actions.remove(&e.context);
            }
        }
    }

    async fn will_appear(&mut self, event: ContextEvent) {
        let settings = PluginSettings::from_payload(&event.payload.settings);

        // First activation: persist defaults so the property inspector
        // starts from a saved settings object.
        let never_saved = event
            .payload
            .settings
            .as_object()
            .is_none_or(|o| o.is_empty());
        if never_saved {
            let _ = self
                .out_tx
                .send(Outbound::set_settings(
                    event.context.as_str(),
                    settings.to_value(),
                ))
                .await;
        }

        let instance = ActionInstance::new(event.context.clone(), settings, self.out_tx.clone());
        instance.spawn_refresh(self.fetcher.clone(), self.icons.clone());
        self.actions.insert(event.context, instance);
    }

    async fn settings_changed(&mut self, event: ContextEvent) {
        let Some(instance) = self.actions.get_mut(&event.context) else {
            debug!(context = %event.context, "settings for unknown context");
            return;
        };

        instance.settings = PluginSettings::from_payload(&event.payload.settings);
        instance.spawn_refresh(self.fetcher.clone(), self.icons.clone());
    }

    async fn key_down(&mut self, event: ContextEvent) {
        let app_id = match self.actions.get(&event.context) {
            Some(instance) => instance
                .display
                .lock()
                .await
                .as_ref()
                .map(|d| d.app_id.clone())
                .unwrap_or_default(),
            None => String::new(),
        };

        // No validation of the id; a bad or empty one becomes a
        // URI-handling failure the OS reports.
        let launcher = self.launcher.clone();
        tokio::spawn(async move {
            if let Err(e) = launcher.launch(&app_id).await {
                warn!("launch failed: {e}");
            }
        });
    }
}
