//! Search body view.
//!
//! Draws the blocks of a render plan: loading indicator, error line,
//! request id, count line with the variants table, or the empty message.

use eframe::egui::{self, Color32, RichText};
use egui_extras::{Column, TableBuilder};

use crate::api::protocol::VariantRecord;
use crate::search::view::{count_line, table_rows, ViewBlock, COLUMNS, LOADING_TEXT, NO_RESULTS_TEXT};

/// Height of a table row in points.
const ROW_HEIGHT: f32 = 20.0;

/// Something the user asked for while interacting with the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyAction {
    /// "Check status" was clicked for this request id.
    CheckStatus(String),
}

/// View for the area below the search bar.
pub struct ResultsView;

impl ResultsView {
    /// Display the blocks of a render plan in order.
    ///
    /// `status_line` is the lookup result for the displayed request id, if
    /// one has been requested.
    pub fn show(
        ui: &mut egui::Ui,
        plan: &[ViewBlock<'_>],
        status_line: Option<&str>,
    ) -> Option<BodyAction> {
        let mut action = None;

        for block in plan {
            match *block {
                ViewBlock::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(LOADING_TEXT);
                    });
                }
                ViewBlock::Error(message) => {
                    ui.colored_label(Color32::RED, message);
                }
                ViewBlock::RequestId(request_id) => {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!("Request ID: {}", request_id))
                                .small()
                                .color(Color32::from_gray(0x55)),
                        );
                        if ui.small_button("Check status").clicked() {
                            action = Some(BodyAction::CheckStatus(request_id.to_string()));
                        }
                        if let Some(line) = status_line {
                            ui.weak(line);
                        }
                    });
                }
                ViewBlock::Results(records) => {
                    ui.add_space(4.0);
                    ui.label(RichText::new(count_line(records.len())).strong());
                    ui.add_space(4.0);
                    Self::show_table(ui, records);
                }
                ViewBlock::NoResults => {
                    ui.label(NO_RESULTS_TEXT);
                }
            }
        }

        action
    }

    /// Variants table with one row per record, rows drawn lazily.
    fn show_table(ui: &mut egui::Ui, records: &[VariantRecord]) {
        let rows = table_rows(records);

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(60.0))
            .column(Column::auto().at_least(120.0))
            .column(Column::auto().at_least(50.0))
            .column(Column::remainder())
            .header(ROW_HEIGHT, |mut header| {
                for title in COLUMNS {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let index = row.index();
                    if let Some(cells) = rows.get(index) {
                        for cell in cells {
                            row.col(|ui| {
                                ui.label(cell.as_str());
                            });
                        }
                    }
                });
            });
    }
}
