//! Declarative view pieces. Each returns the user's intent instead of
//! mutating app state directly.

use chrono::TimeZone;
use eframe::egui::{self, Color32, RichText, TextureHandle, Ui};

use crate::model::{DownloadStatus, RecentDownload, VideoMetadata};

const ACCENT: Color32 = Color32::from_rgb(129, 140, 248);
const MUTED: Color32 = Color32::from_rgb(148, 163, 184);
const DANGER: Color32 = Color32::from_rgb(248, 113, 113);
const SUCCESS: Color32 = Color32::from_rgb(74, 222, 128);

/// Something the user asked for this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Submit,
    SelectQuality(String),
    Reset,
    ClearHistory,
}

const PLATFORMS: [&str; 6] = ["YOUTUBE", "VIMEO", "FACEBOOK", "INSTAGRAM", "TIKTOK", "TWITTER"];

const FEATURES: [(&str, &str, &str); 6] = [
    ("⚡", "Turbo Speed", "Accelerated processing for ultra-fast downloads."),
    ("🛡", "Safe & Secure", "No trackers, no malware, just pure content."),
    ("🌐", "1000+ Sites", "YouTube, Twitter, TikTok, Vimeo, and many more."),
    ("🖥", "Up to 8K", "Support for ultra high definition video quality."),
    ("☁", "Direct to Cloud", "Save files directly to Drive or Dropbox."),
    ("📱", "Mobile Optimized", "Responsive interface for all your devices."),
];

fn brand(ui: &mut Ui) {
    ui.label(RichText::new("VeloStream").strong().size(20.0).color(Color32::WHITE));
    ui.label(RichText::new("AI").strong().size(20.0).color(ACCENT));
}

pub fn navbar(ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("⬇").size(20.0).color(ACCENT));
        brand(ui);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            // decorative, like the links
            let _ = ui.button("Get Pro");
            let _ = ui.button("Login");
            ui.add_space(16.0);
            for link in ["Github", "API", "Supported Sites", "Pricing"] {
                let _ = ui.link(link);
            }
        });
    });
}

/// Heading, URL field and submit button
pub fn hero(ui: &mut Ui, url_input: &mut String, status: DownloadStatus) -> Option<Action> {
    let mut action = None;
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(RichText::new("Universal").size(36.0).strong().color(Color32::WHITE));
        ui.label(RichText::new("AI Video Downloader").size(36.0).strong().color(ACCENT));
        ui.label(
            RichText::new(
                "Download high-quality videos from over 1000+ sites. \
                 Powered by Gemini for instant metadata extraction.",
            )
            .color(MUTED),
        );
        ui.add_space(16.0);
    });

    let busy = status.is_busy();
    ui.horizontal(|ui| {
        let width = ui.available_width() - 160.0;
        let field = ui.add_enabled(
            !busy,
            egui::TextEdit::singleline(url_input)
                .hint_text("Paste your video URL here...")
                .desired_width(width),
        );
        let entered = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let label = if status == DownloadStatus::Analyzing {
            "Analyzing AI..."
        } else {
            "Fetch Video"
        };
        let clicked = ui
            .add_enabled(!busy && !url_input.is_empty(), egui::Button::new(label))
            .clicked();
        if status == DownloadStatus::Analyzing {
            ui.spinner();
        }
        if (clicked || entered) && !busy {
            action = Some(Action::Submit);
        }
    });
    action
}

pub fn error_banner(ui: &mut Ui, message: &str) {
    egui::Frame::group(ui.style())
        .fill(Color32::from_rgba_unmultiplied(239, 68, 68, 24))
        .stroke(egui::Stroke::new(1.0, DANGER))
        .rounding(8.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("⚠").color(DANGER));
                ui.label(RichText::new(message).color(DANGER));
            });
        });
}

/// Metadata card with quality buttons and the progress / completion footer
pub fn metadata_card(
    ui: &mut Ui,
    metadata: &VideoMetadata,
    status: DownloadStatus,
    progress: f32,
    quality: Option<&str>,
    thumbnail: Option<&TextureHandle>,
) -> Option<Action> {
    let mut action = None;
    egui::Frame::group(ui.style())
        .rounding(12.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.horizontal_top(|ui| {
                ui.vertical(|ui| {
                    match thumbnail {
                        Some(tex) => {
                            ui.add(egui::Image::new(tex).max_width(240.0).rounding(8.0));
                        }
                        None => {
                            ui.add_sized([240.0, 135.0], egui::Label::new("▶"));
                        }
                    }
                    ui.label(RichText::new(&metadata.duration).monospace().color(MUTED));
                });

                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(metadata.platform.to_uppercase())
                            .small()
                            .strong()
                            .color(ACCENT),
                    );
                    ui.label(RichText::new(&metadata.title).size(22.0).strong().color(Color32::WHITE));
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("by").color(MUTED));
                        ui.label(RichText::new(&metadata.author).strong());
                    });
                    ui.add_space(8.0);

                    egui::Grid::new("metadata_tiles").num_columns(2).spacing([24.0, 4.0]).show(ui, |ui| {
                        ui.label(RichText::new("DURATION").small().color(MUTED));
                        ui.label(RichText::new("EST. SIZE").small().color(MUTED));
                        ui.end_row();
                        ui.label(&metadata.duration);
                        ui.label(metadata.estimated_size());
                        ui.end_row();
                    });
                    ui.add_space(8.0);

                    ui.label(RichText::new("Select Quality").strong().color(MUTED));
                    ui.horizontal_wrapped(|ui| {
                        let enabled = status != DownloadStatus::Downloading;
                        for q in &metadata.available_qualities {
                            let text = format!("{}\n{} • {}", q.label, q.size, q.format);
                            if ui.add_enabled(enabled, egui::Button::new(text)).clicked() {
                                action = Some(Action::SelectQuality(q.label.clone()));
                            }
                        }
                    });
                });
            });

            match status {
                DownloadStatus::Downloading => {
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Processing video segments...");
                        if let Some(q) = quality {
                            ui.label(RichText::new(q).small().color(MUTED));
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(RichText::new(format!("{}%", progress.round())).monospace().color(ACCENT));
                        });
                    });
                    ui.add(egui::ProgressBar::new(progress / 100.0).fill(ACCENT));
                    ui.label(RichText::new("Simulated transfer: no file is written.").small().color(MUTED));
                }
                DownloadStatus::Completed => {
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("✔ Download Simulation Complete!").strong().color(SUCCESS));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let _ = ui
                                .add_enabled(false, egui::Button::new("Open File"))
                                .on_disabled_hover_text("Simulation only: nothing was saved");
                            if ui.button("Start New").clicked() {
                                action = Some(Action::Reset);
                            }
                        });
                    });
                }
                _ => {}
            }
        });
    action
}

pub fn platform_strip(ui: &mut Ui) {
    ui.horizontal_wrapped(|ui| {
        for name in PLATFORMS {
            ui.label(RichText::new(name).italics().strong().size(18.0).color(MUTED));
            ui.add_space(24.0);
        }
    });
}

pub fn features(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.heading("Why Choose VeloStream?");
        ui.label(RichText::new("The most advanced AI-assisted downloader on the web.").color(MUTED));
    });
    ui.add_space(12.0);
    egui::Grid::new("features").num_columns(3).spacing([24.0, 16.0]).show(ui, |ui| {
        for (i, (icon, title, desc)) in FEATURES.iter().enumerate() {
            ui.vertical(|ui| {
                ui.label(RichText::new(*icon).size(22.0).color(ACCENT));
                ui.label(RichText::new(*title).strong().color(Color32::WHITE));
                ui.label(RichText::new(*desc).small().color(MUTED));
            });
            if i % 3 == 2 {
                ui.end_row();
            }
        }
    });
}

/// Recent activity list; renders nothing when empty
pub fn history_list(ui: &mut Ui, downloads: &[RecentDownload]) -> Option<Action> {
    if downloads.is_empty() {
        return None;
    }
    let mut action = None;
    ui.horizontal(|ui| {
        ui.heading("Recent Activity");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button(RichText::new("🗑 Clear All").color(MUTED)).clicked() {
                action = Some(Action::ClearHistory);
            }
        });
    });

    for item in downloads {
        egui::Frame::group(ui.style()).rounding(8.0).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("🎞").color(ACCENT));
                ui.vertical(|ui| {
                    ui.label(RichText::new(&item.title).strong());
                    ui.label(RichText::new(&item.url).small().color(MUTED));
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(clock_time(item.timestamp)).monospace().small().color(MUTED));
                });
            });
        });
    }
    action
}

pub fn footer(ui: &mut Ui) {
    ui.horizontal(|ui| {
        brand(ui);
        ui.label(RichText::new("© 2024. All rights reserved.").small().color(MUTED));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            for link in ["Contact", "Terms", "Privacy"] {
                let _ = ui.link(link);
            }
        });
    });
}

/// Local `HH:MM` for a millisecond timestamp
pub fn clock_time(timestamp_ms: i64) -> String {
    chrono::Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_is_hours_and_minutes() {
        let s = clock_time(1_700_000_000_000);
        assert_eq!(s.len(), 5);
        assert_eq!(&s[2..3], ":");
    }

    #[test]
    fn out_of_range_timestamp() {
        assert_eq!(clock_time(i64::MAX), "--:--");
    }

    #[test]
    fn feature_grid_has_full_rows() {
        assert_eq!(FEATURES.len() % 3, 0);
    }
}
