//! App module - contains the main application state and logic

mod pages;

use crate::selection::SelectionModel;
use crate::settings::Settings;
use crate::theme;
use crate::types::{Artwork, PageFetch};
use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    // Current page of the catalog
    pub(crate) artworks: Vec<Artwork>,
    pub(crate) current_page: u32,
    pub(crate) total_records: u64,
    pub(crate) total_pages: u32,
    pub(crate) loading: bool,
    pub(crate) initial_fetch_done: bool,
    // Selection
    pub(crate) selection: SelectionModel,
    // Bulk-select popover
    pub(crate) show_bulk_panel: bool,
    pub(crate) bulk_count_input: String,
    // Fetch plumbing
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) client: reqwest::Client,
    pub(crate) fetch_slot: Arc<Mutex<Option<PageFetch>>>,
    pub(crate) fetch_token: u64,
    pub(crate) cancel_token: Option<CancellationToken>,
    // Window bookkeeping
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, data_dir: PathBuf) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Phosphor icons on top of the default fonts
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        Self {
            artworks: Vec::new(),
            current_page: 1,
            total_records: 0,
            total_pages: 0,
            loading: false,
            initial_fetch_done: false,
            selection: SelectionModel::new(),
            show_bulk_panel: false,
            bulk_count_input: String::new(),
            runtime: tokio::runtime::Runtime::new().expect("failed to start tokio runtime"),
            client: reqwest::Client::new(),
            fetch_slot: Arc::new(Mutex::new(None)),
            fetch_token: 0,
            cancel_token: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
        };
        settings.save(&self.data_dir);
    }

    /// Ordered ids of the currently displayed page.
    pub(crate) fn page_ids(&self) -> Vec<i64> {
        self.artworks.iter().map(|a| a.id).collect()
    }

    pub(crate) fn toggle_row(&mut self, id: i64) {
        let now_selected = !self.selection.is_selected(id);
        self.selection.set_selected(id, now_selected);
    }

    pub(crate) fn toggle_all_on_page(&mut self) {
        let ids = self.page_ids();
        self.selection.toggle_all_on_page(&ids);
    }

    pub(crate) fn clear_selections(&mut self) {
        self.selection.clear();
    }

    /// The bulk input parsed as a usable row count, if it is one.
    pub(crate) fn parsed_bulk_count(&self) -> Option<usize> {
        self.bulk_count_input
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|&n| n > 0)
    }

    /// Submit the bulk popover. Malformed input never reaches here; the
    /// Select button is disabled unless `parsed_bulk_count` is Some.
    pub(crate) fn submit_bulk_select(&mut self) {
        if let Some(count) = self.parsed_bulk_count() {
            let ids = self.page_ids();
            self.selection.start_bulk_select(count, &ids);
            tracing::info!(
                requested = count,
                pending = self.selection.bulk().remaining_to_select,
                "Bulk selection started"
            );
        }
        self.bulk_count_input.clear();
        self.show_bulk_panel = false;
    }

    /// Header status line: total selected, plus either the pending bulk
    /// quota or the split between this page and the rest.
    pub(crate) fn status_text(&self) -> String {
        let total = self.selection.count();
        let on_page = self.selection.count_on_page(&self.page_ids());
        let bulk = self.selection.bulk();
        if bulk.is_active {
            format!("{} selected ({} more pending)", total, bulk.remaining_to_select)
        } else if total == on_page {
            format!("{} selected on this page", total)
        } else {
            format!("{} selected total ({} this page)", total, on_page)
        }
    }
}
