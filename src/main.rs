#![windows_subsystem = "windows"]
//! Artic Browser - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod constants;
mod selection;
mod settings;
mod theme;
mod types;
mod ui;

use app::App;
use constants::APP_VERSION;
use eframe::egui;
use std::path::PathBuf;
use tracing::info;
use ui::components::{self, CheckState};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "artic-browser.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,artic_browser=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Artic Browser");

    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Artic Browser starting");

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1100.0, 720.0)))
        .with_min_inner_size([860.0, 560.0])
        .with_title("Artic Browser");

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Artic Browser",
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Drain background fetch results before rendering anything
        self.poll_page_results();

        // Kick off the first page on the first frame
        if !self.initial_fetch_done {
            self.initial_fetch_done = true;
            self.request_page(ctx, 1);
        }

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Bottom pagination bar (must be added BEFORE CentralPanel)
        self.render_pagination_bar(ctx);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                self.render_header(ui);
                ui.add_space(theme::SPACING_MD);
                let bulk_anchor = self.render_toolbar(ui);
                ui.add_space(theme::SPACING_MD);

                if self.loading {
                    ui.vertical_centered(|ui| {
                        ui.add_space(64.0);
                        ui.add(egui::Spinner::new().size(28.0).color(theme::ACCENT));
                        ui.add_space(theme::SPACING_MD);
                        ui.label(
                            egui::RichText::new("Loading artworks...")
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_MUTED),
                        );
                    });
                } else if self.artworks.is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(64.0);
                        ui.label(
                            egui::RichText::new("No artworks found.")
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_DIM),
                        );
                    });
                } else {
                    self.render_table(ui);
                }

                // Popover drawn last so it floats over the table
                if self.show_bulk_panel {
                    self.render_bulk_panel(ctx, bulk_anchor);
                }
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_settings();
        info!("Artic Browser exiting");
    }
}

// ============================================================================
// VIEW RENDERING
// ============================================================================

impl App {
    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.add(
            egui::Label::new(
                egui::RichText::new("Artwork Collection")
                    .size(theme::FONT_TITLE)
                    .strong()
                    .color(theme::TEXT_PRIMARY),
            )
            .selectable(false),
        );
        ui.add(
            egui::Label::new(
                egui::RichText::new("Highlights from the Art Institute of Chicago collection")
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_MUTED),
            )
            .selectable(false),
        );
    }

    /// Toolbar row: page checkbox, bulk popover button, status line, clear
    /// button. Returns the rect to anchor the bulk popover under.
    fn render_toolbar(&mut self, ui: &mut egui::Ui) -> egui::Rect {
        let mut anchor = egui::Rect::NOTHING;

        ui.horizontal(|ui| {
            let page_ids = self.page_ids();
            let on_page = self.selection.count_on_page(&page_ids);
            let state = if self.selection.all_selected_on_page(&page_ids) {
                CheckState::Checked
            } else if on_page > 0 {
                CheckState::Indeterminate
            } else {
                CheckState::Unchecked
            };

            if components::styled_checkbox(ui, state, theme::CHECKBOX_SIZE).clicked() {
                self.toggle_all_on_page();
            }

            let bulk_btn = ui.add(
                theme::button(egui_phosphor::regular::CARET_DOWN.to_string())
                    .min_size(egui::vec2(28.0, 28.0)),
            );
            if bulk_btn.clicked() {
                self.show_bulk_panel = !self.show_bulk_panel;
            }
            anchor = bulk_btn.rect;

            ui.add(
                egui::Label::new(
                    egui::RichText::new(self.status_text())
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_MUTED),
                )
                .selectable(false),
            );

            if self.selection.count() > 0 && ui.add(theme::button_danger("Clear All")).clicked() {
                self.clear_selections();
            }
        });

        anchor
    }

    fn render_table(&mut self, ui: &mut egui::Ui) {
        use egui_extras::{Column, TableBuilder};

        let row_height = theme::ROW_HEIGHT;
        let available_width = ui.available_width() - 40.0; // minus checkbox column

        // Proportional column widths: Title / Artist / Origin / Inscriptions / Date
        let parts: [f32; 5] = [2.6, 2.6, 1.4, 1.8, 1.0];
        let total_parts: f32 = parts.iter().sum();
        let part = available_width / total_parts;

        let headers = ["TITLE", "ARTIST", "ORIGIN", "INSCRIPTIONS", "DATE"];

        let mut table = TableBuilder::new(ui)
            .striped(false)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .sense(egui::Sense::click())
            .min_scrolled_height(0.0)
            .column(Column::exact(40.0));
        for &p in &parts {
            table = table.column(Column::exact(part * p).clip(true));
        }

        let artworks = self.artworks.clone();
        let mut clicked_id: Option<i64> = None;

        table
            .header(theme::HEADER_ROW_HEIGHT, |mut header| {
                // Checkbox column header (empty; page toggle lives in the toolbar)
                header.col(|_ui| {});
                for title in headers {
                    header.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(title)
                                    .size(theme::FONT_LABEL)
                                    .strong()
                                    .color(theme::TEXT_SECONDARY),
                            )
                            .selectable(false),
                        );
                    });
                }
            })
            .body(|mut body| {
                body.ui_mut().visuals_mut().selection.bg_fill = theme::TABLE_ROW_SELECTED;

                body.rows(row_height, artworks.len(), |mut row| {
                    let art = &artworks[row.index()];
                    let is_selected = self.selection.is_selected(art.id);
                    row.set_selected(is_selected);

                    // Checkbox column - visual only, the whole row is clickable
                    row.col(|ui| {
                        ui.centered_and_justified(|ui| {
                            let cb = theme::CHECKBOX_SIZE;
                            let (rect, _) = ui
                                .allocate_exact_size(egui::vec2(cb, cb), egui::Sense::hover());
                            if is_selected {
                                ui.painter().rect_stroke(
                                    rect,
                                    3.0,
                                    egui::Stroke::new(theme::STROKE_MEDIUM, theme::ACCENT),
                                    egui::StrokeKind::Inside,
                                );
                                ui.painter()
                                    .rect_filled(rect.shrink(3.0), theme::RADIUS_SMALL, theme::ACCENT);
                            } else {
                                ui.painter().rect_stroke(
                                    rect,
                                    3.0,
                                    egui::Stroke::new(theme::STROKE_MEDIUM, theme::BORDER_DEFAULT),
                                    egui::StrokeKind::Inside,
                                );
                            }
                        });
                    });

                    let title = components::display_or(&art.title, "Untitled");
                    row.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(title).strong().size(theme::FONT_BODY),
                            )
                            .truncate()
                            .selectable(false),
                        )
                        .on_hover_text(title);
                    });

                    let artist = components::display_or(&art.artist_display, "Unknown artist");
                    row.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(artist)
                                    .size(theme::FONT_BODY)
                                    .color(theme::TEXT_SECONDARY),
                            )
                            .truncate()
                            .selectable(false),
                        )
                        .on_hover_text(artist);
                    });

                    let origin = components::display_or(&art.place_of_origin, "Unknown");
                    row.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(origin)
                                    .size(theme::FONT_BODY)
                                    .color(theme::TEXT_MUTED),
                            )
                            .truncate()
                            .selectable(false),
                        );
                    });

                    let inscriptions = components::display_or(&art.inscriptions, "None");
                    row.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(inscriptions)
                                    .size(theme::FONT_BODY)
                                    .color(theme::TEXT_MUTED),
                            )
                            .truncate()
                            .selectable(false),
                        )
                        .on_hover_text(inscriptions);
                    });

                    row.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(components::format_date_range(art))
                                    .size(theme::FONT_BODY)
                                    .color(theme::TEXT_MUTED),
                            )
                            .selectable(false),
                        );
                    });

                    if row.response().clicked() {
                        clicked_id = Some(art.id);
                    }
                });
            });

        if let Some(id) = clicked_id {
            self.toggle_row(id);
        }
    }

    fn render_pagination_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("pagination_bar")
            .exact_height(theme::PAGER_BAR_HEIGHT)
            .show_separator_line(false)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED)
                    .inner_margin(egui::Margin::symmetric(16, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let page = self.current_page;
                    let last = self.total_pages;
                    let at_first = page <= 1;
                    let at_last = last == 0 || page >= last;

                    let mut goto: Option<u32> = None;

                    if ui
                        .add_enabled(
                            !at_first,
                            theme::button(egui_phosphor::regular::CARET_DOUBLE_LEFT.to_string()),
                        )
                        .clicked()
                    {
                        goto = Some(1);
                    }
                    if ui
                        .add_enabled(
                            !at_first,
                            theme::button(egui_phosphor::regular::CARET_LEFT.to_string()),
                        )
                        .clicked()
                    {
                        goto = Some(page.saturating_sub(1).max(1));
                    }

                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(format!("Page {} of {}", page, last))
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_SECONDARY),
                        )
                        .selectable(false),
                    );

                    if ui
                        .add_enabled(
                            !at_last,
                            theme::button(egui_phosphor::regular::CARET_RIGHT.to_string()),
                        )
                        .clicked()
                    {
                        goto = Some((page + 1).min(last));
                    }
                    if ui
                        .add_enabled(
                            !at_last,
                            theme::button(egui_phosphor::regular::CARET_DOUBLE_RIGHT.to_string()),
                        )
                        .clicked()
                    {
                        goto = Some(last);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(format!("{} artworks", self.total_records))
                                    .size(theme::FONT_SMALL)
                                    .color(theme::TEXT_DIM),
                            )
                            .selectable(false),
                        );
                    });

                    if let Some(target) = goto {
                        self.request_page(ui.ctx(), target);
                    }
                });
            });
    }

    fn render_bulk_panel(&mut self, ctx: &egui::Context, anchor: egui::Rect) {
        let area = egui::Area::new(egui::Id::new("bulk_panel"))
            .fixed_pos(anchor.left_bottom() + egui::vec2(0.0, 6.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                theme::popover_frame().show(ui, |ui| {
                    ui.set_width(theme::BULK_PANEL_WIDTH);

                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("Bulk Selection")
                                .size(theme::FONT_BODY)
                                .strong(),
                        )
                        .selectable(false),
                    );
                    ui.add_space(theme::SPACING_MD);

                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("Number of rows to select:")
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_SECONDARY),
                        )
                        .selectable(false),
                    );
                    let input = ui.add(
                        egui::TextEdit::singleline(&mut self.bulk_count_input)
                            .hint_text("Enter number of rows")
                            .desired_width(f32::INFINITY),
                    );
                    if input.changed() {
                        // Digits only; anything else never parses anyway
                        self.bulk_count_input.retain(|c| c.is_ascii_digit());
                    }

                    ui.add_space(theme::SPACING_SM);
                    for line in [
                        format!("Page has {} artworks.", self.artworks.len()),
                        "Remaining rows are selected automatically as you move through pages."
                            .to_string(),
                        "Manual deselections are retained.".to_string(),
                    ] {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(line)
                                    .size(theme::FONT_SMALL)
                                    .color(theme::TEXT_DIM),
                            )
                            .wrap()
                            .selectable(false),
                        );
                    }

                    ui.add_space(theme::SPACING_MD);
                    ui.horizontal(|ui| {
                        let valid = self.parsed_bulk_count().is_some();
                        let submit = ui.add_enabled(valid, theme::button_accent("Select")).clicked()
                            || (valid && input.lost_focus()
                                && ui.input(|i| i.key_pressed(egui::Key::Enter)));
                        if submit {
                            self.submit_bulk_select();
                        }
                        if ui.add(theme::button("Cancel")).clicked() {
                            self.bulk_count_input.clear();
                            self.show_bulk_panel = false;
                        }
                    });
                });
            });

        // Click-away closes the popover
        if self.show_bulk_panel {
            let panel_rect = area.response.rect;
            let pressed_at = ctx.input(|i| {
                if i.pointer.any_pressed() {
                    i.pointer.interact_pos()
                } else {
                    None
                }
            });
            if let Some(pos) = pressed_at {
                if !panel_rect.contains(pos) && !anchor.contains(pos) {
                    self.show_bulk_panel = false;
                }
            }
        }
    }
}
