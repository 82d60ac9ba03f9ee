//! VeloStream: AI-assisted video metadata lookup with a simulated download

// Application configuration
mod config;
// Analyze/download view state
mod controller;
// Gemini-backed metadata source
mod gemini;
// Persisted recent activity
mod history;
// Tracing setup
mod logging;
// Data models for metadata, status and history records
mod model;
// Cosmetic progress counter
mod progress;
// Thumbnail fetching module
mod thumbnail;
// Presentation components
mod ui;

use config::AppConfig;
use controller::ViewController;
use gemini::GeminiClient;
use history::HistoryStore;
use model::DownloadStatus;
use ui::Action;

// eframe/egui for GUI application framework
use eframe::{App, Frame, egui};
use egui::{ColorImage, TextureOptions, Visuals};
// OnceCell for single-time runtime initialization
use once_cell::sync::OnceCell;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use tokio::runtime::Runtime;
use tracing::{error, info, warn};

// Global Tokio runtime stored in a OnceCell for lazy init
static RUNTIME: OnceCell<Arc<Runtime>> = OnceCell::new();

/// Program entry point: initializes logging, config and runtime, then launches the GUI
fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_tracing();

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "using default configuration");
        AppConfig::default()
    });
    if config.api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set; every analysis will fail");
    }

    let rt = RUNTIME.get_or_try_init(|| Runtime::new().map(Arc::new))?;
    let handle = rt.handle().clone();
    info!(model = %config.model, history = %config.history_path.display(), "starting");

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "VeloStream AI",
        options,
        Box::new(move |cc| {
            // Use dark theme visuals
            cc.egui_ctx.set_visuals(Visuals::dark());
            Box::new(VeloApp::new(&config, handle))
        }),
    )?;
    Ok(())
}

/// Application state for the GUI
struct VeloApp {
    /// Input field for the video URL
    url_input: String,
    /// Analyze/download flow
    controller: ViewController,
    /// Recent activity, persisted on every change
    history: HistoryStore,
    /// Drives the simulated progress increments and record ids
    rng: StdRng,
    tick_interval: Duration,
    last_tick: Instant,
    /// Runtime used for thumbnail fetches
    runtime: tokio::runtime::Handle,
    /// Cached textures keyed by thumbnail URL
    thumbnails: HashMap<String, egui::TextureHandle>,
    /// Incoming thumbnail fetch results (url, image)
    thumbnail_results: Arc<Mutex<Vec<(String, ColorImage)>>>,
    /// Thumbnail URL already handed to the fetcher
    requested_thumbnail: Option<String>,
}

impl VeloApp {
    fn new(config: &AppConfig, runtime: tokio::runtime::Handle) -> Self {
        let source = Arc::new(GeminiClient::new(config));
        Self {
            url_input: String::new(),
            controller: ViewController::new(source, runtime.clone()),
            history: HistoryStore::open(&config.history_path),
            rng: StdRng::from_entropy(),
            tick_interval: Duration::from_millis(config.tick_interval_ms),
            last_tick: Instant::now(),
            runtime,
            thumbnails: HashMap::new(),
            thumbnail_results: Arc::new(Mutex::new(Vec::new())),
            requested_thumbnail: None,
        }
    }

    fn handle(&mut self, action: Action) {
        match action {
            Action::Submit => {
                if self.controller.submit_url(&self.url_input) {
                    self.requested_thumbnail = None;
                }
            }
            Action::SelectQuality(label) => {
                self.controller.select_quality(&label);
                self.last_tick = Instant::now();
            }
            Action::Reset => {
                self.url_input.clear();
                self.controller.reset();
            }
            Action::ClearHistory => {
                if let Err(e) = self.history.clear() {
                    error!(error = %e, "failed to clear history");
                }
            }
        }
    }

    /// Spawns a blocking fetch for the current thumbnail if not yet requested
    fn request_thumbnail(&mut self, ctx: &egui::Context) {
        let Some(src) = self.controller.metadata().map(|m| m.thumbnail_source()) else {
            return;
        };
        if self.requested_thumbnail.as_deref() == Some(src.as_str()) || self.thumbnails.contains_key(&src) {
            return;
        }
        self.requested_thumbnail = Some(src.clone());

        let results = Arc::clone(&self.thumbnail_results);
        let ctx_c = ctx.clone();
        self.runtime.spawn_blocking(move || {
            if let Some(img) = thumbnail::fetch_thumbnail(&src) {
                if let Ok(mut pending) = results.lock() {
                    pending.push((src, img));
                }
                ctx_c.request_repaint();
            }
        });
    }
}

/// GUI update loop: called each frame to redraw and handle interactions
impl App for VeloApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 1️⃣ Pick up a finished analysis
        self.controller.poll();

        // 2️⃣ Advance the simulated download on its fixed interval
        if self.controller.status() == DownloadStatus::Downloading && self.last_tick.elapsed() >= self.tick_interval {
            self.last_tick = Instant::now();
            if let Some(record) = self.controller.tick(&mut self.rng) {
                if let Err(e) = self.history.append(record) {
                    error!(error = %e, "failed to save history");
                }
            }
        }

        // 3️⃣ Handle completed thumbnail fetches
        if let Ok(mut pending) = self.thumbnail_results.lock() {
            for (src, img) in pending.drain(..) {
                // Load image into egui texture and cache it
                let tex = ctx.load_texture(&src, img, TextureOptions::default());
                self.thumbnails.insert(src, tex);
            }
        }
        self.request_thumbnail(ctx);

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("navbar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui::navbar(ui);
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.add_space(6.0);
            ui::footer(ui);
            ui.add_space(6.0);
        });

        // 4️⃣ Main panel: downloader, platforms, features, history
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
                let status = self.controller.status();
                actions.extend(ui::hero(ui, &mut self.url_input, status));

                if let Some(message) = self.controller.error() {
                    ui.add_space(12.0);
                    ui::error_banner(ui, message);
                }

                if let Some(meta) = self.controller.metadata() {
                    ui.add_space(12.0);
                    let tex = self.thumbnails.get(&meta.thumbnail_source());
                    actions.extend(ui::metadata_card(
                        ui,
                        meta,
                        status,
                        self.controller.progress_percent(),
                        self.controller.selected_quality(),
                        tex,
                    ));
                }

                ui.add_space(32.0);
                ui::platform_strip(ui);
                ui.add_space(32.0);
                ui::features(ui);
                ui.add_space(32.0);
                actions.extend(ui::history_list(ui, self.history.entries()));
            });
        });

        for action in actions {
            self.handle(action);
        }

        // Request periodic repaint for progress updates
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
