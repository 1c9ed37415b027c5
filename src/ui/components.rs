//! Reusable UI components and cell formatting helpers

use crate::theme;
use crate::types::Artwork;
use eframe::egui;

/// Visual state of the page-level header checkbox.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Unchecked,
    Indeterminate,
    Checked,
}

/// Custom checkbox widget with consistent styling. Supports the
/// indeterminate state used by the page header checkbox.
pub fn styled_checkbox(ui: &mut egui::Ui, state: CheckState, size: f32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let rounding = 3.0;

        match state {
            CheckState::Checked => {
                painter.rect_filled(rect, rounding, theme::ACCENT);
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    egui_phosphor::regular::CHECK,
                    egui::FontId::proportional(size * 0.7),
                    theme::BG_BASE,
                );
            }
            CheckState::Indeterminate => {
                painter.rect_stroke(
                    rect,
                    rounding,
                    egui::Stroke::new(1.5, theme::ACCENT),
                    egui::StrokeKind::Inside,
                );
                let bar = egui::Rect::from_center_size(
                    rect.center(),
                    egui::vec2(size * 0.5, 2.0),
                );
                painter.rect_filled(bar, 1.0, theme::ACCENT);
            }
            CheckState::Unchecked => {
                painter.rect_stroke(
                    rect,
                    rounding,
                    egui::Stroke::new(1.5, theme::BORDER_DEFAULT),
                    egui::StrokeKind::Inside,
                );
            }
        }
    }

    response
}

/// Non-empty text, or a fallback for absent/blank API fields.
pub fn display_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    match value.as_deref() {
        Some(s) if !s.trim().is_empty() => s,
        _ => fallback,
    }
}

/// Format an artwork's date range: single year, "start - end", or "N/A".
pub fn format_date_range(art: &Artwork) -> String {
    match (art.date_start, art.date_end) {
        (Some(start), Some(end)) if start == end => start.to_string(),
        (Some(start), Some(end)) => format!("{} - {}", start, end),
        (Some(year), None) | (None, Some(year)) => year.to_string(),
        (None, None) => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn art(start: Option<i32>, end: Option<i32>) -> Artwork {
        Artwork {
            id: 1,
            title: None,
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: start,
            date_end: end,
        }
    }

    #[test]
    fn test_date_range_formatting() {
        assert_eq!(format_date_range(&art(Some(1889), Some(1889))), "1889");
        assert_eq!(format_date_range(&art(Some(1880), Some(1885))), "1880 - 1885");
        assert_eq!(format_date_range(&art(Some(1750), None)), "1750");
        assert_eq!(format_date_range(&art(None, None)), "N/A");
    }

    #[test]
    fn test_display_fallbacks() {
        assert_eq!(display_or(&None, "Untitled"), "Untitled");
        assert_eq!(display_or(&Some("  ".into()), "Untitled"), "Untitled");
        assert_eq!(display_or(&Some("Water Lilies".into()), "Untitled"), "Water Lilies");
    }
}
