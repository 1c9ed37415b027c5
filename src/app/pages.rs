//! Page fetch logic
//!
//! One logical page request is current at a time. Each request carries a
//! monotonically increasing token; `poll_page_results` discards any response
//! whose token is no longer current, and starting a new request cancels the
//! previous in-flight one. Rapid page flipping therefore can never apply an
//! out-of-order response.

use super::App;
use crate::constants::{ARTWORKS_URL, PAGE_SIZE};
use crate::types::{ArtworksPage, PageFetch};
use eframe::egui;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

impl App {
    pub fn request_page(&mut self, ctx: &egui::Context, page: u32) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        self.fetch_token += 1;
        let token = self.fetch_token;
        self.current_page = page;
        self.loading = true;

        let cancel = CancellationToken::new();
        self.cancel_token = Some(cancel.clone());

        let client = self.client.clone();
        let slot = self.fetch_slot.clone();
        let ctx = ctx.clone();
        let url = format!("{}?page={}&limit={}", ARTWORKS_URL, page, PAGE_SIZE);

        debug!(url = %url, token, "Requesting artwork page");

        self.runtime.spawn(async move {
            let fetch = async {
                client
                    .get(&url)
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<ArtworksPage>()
                    .await
            };

            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(token, page, "Page request superseded, dropping");
                }
                result = fetch => {
                    let result = result.map_err(|e| e.to_string());
                    *slot.lock().unwrap() = Some(PageFetch { token, page, result });
                    ctx.request_repaint();
                }
            }
        });
    }

    /// Drain the fetch slot on the UI thread. Applies the page and any
    /// pending bulk quota on success; on failure logs and leaves the
    /// previously displayed page in place with the spinner stopped.
    pub fn poll_page_results(&mut self) {
        let Some(fetch) = self.fetch_slot.lock().unwrap().take() else {
            return;
        };
        if fetch.token != self.fetch_token {
            debug!(token = fetch.token, current = self.fetch_token, "Discarding stale page response");
            return;
        }
        self.loading = false;

        match fetch.result {
            Ok(response) => {
                info!(
                    page = fetch.page,
                    count = response.data.len(),
                    total = response.pagination.total,
                    "Page loaded"
                );
                self.total_records = response.pagination.total;
                self.total_pages = response.pagination.total_pages;
                self.artworks = response.data;

                let ids = self.page_ids();
                self.selection.apply_to_page(&ids);
            }
            Err(e) => {
                // Logged and swallowed: no user-facing error surface, the
                // prior page (or empty table) stays on screen.
                error!(error = %e, page = fetch.page, "Failed to fetch artworks");
            }
        }
    }
}
