use eframe::egui::{Align, Layout, ScrollArea, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::{CellValue, Table};

const ROW_HEIGHT: f32 = 18.0;
const MAX_TABLE_HEIGHT: f32 = 260.0;

/// Render the parsed table with a leading row-index column.
pub fn data_table(ui: &mut Ui, table: &Table) {
    ScrollArea::horizontal()
        .id_salt("raw_data_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(MAX_TABLE_HEIGHT)
                .cell_layout(Layout::left_to_right(Align::Center))
                .column(TableColumn::auto().at_least(40.0))
                .columns(
                    TableColumn::auto().at_least(80.0).clip(true),
                    table.column_count(),
                )
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("#");
                    });
                    for column in table.columns() {
                        header.col(|ui| {
                            ui.strong(&column.name)
                                .on_hover_text(column.dtype.to_string());
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, table.len(), |mut row| {
                        let index = row.index();
                        row.col(|ui| {
                            ui.label(index.to_string());
                        });
                        for column in table.columns() {
                            row.col(|ui| {
                                cell_label(ui, &column.cells[index]);
                            });
                        }
                    });
                });
        });
}

fn cell_label(ui: &mut Ui, cell: &CellValue) {
    match cell {
        CellValue::Missing => {
            ui.weak(cell.to_string());
        }
        _ => {
            ui.label(cell.to_string());
        }
    }
}
