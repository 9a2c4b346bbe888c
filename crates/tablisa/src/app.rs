use std::time::Duration;

use crossbeam_channel::{Receiver, TryRecvError, bounded};
use egui::{Align2, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use tablisa_core::{Cell, LoadError, Sheet, TableEvent, ViewState};
use tracing::{error, info};

/// The spreadsheet ships inside the binary, resolved at build time.
const SHEET_BYTES: &[u8] = include_bytes!("../assets/tablisa.xlsx");

const LOADING_TEXT: &str = "Loading…";
const LOAD_ERROR_TEXT: &str = "Could not load the bundled spreadsheet.";
const EMPTY_SHEET_TEXT: &str = "The spreadsheet contains no data.";

/// The single load of the session. The UI polls the channel each frame and
/// stays in the loading state until decode finishes; there is no retry.
enum LoadPhase {
    Loading(Receiver<Result<Sheet, LoadError>>),
    Ready(TableView),
    Failed(&'static str),
}

pub struct TablisaApp {
    phase: LoadPhase,
}

impl TablisaApp {
    pub fn new() -> Self {
        let (tx, rx) = bounded(1);
        std::thread::spawn(move || {
            let _ = tx.send(Sheet::from_bytes(SHEET_BYTES));
        });
        TablisaApp {
            phase: LoadPhase::Loading(rx),
        }
    }

    fn poll_load(&mut self) {
        let LoadPhase::Loading(rx) = &self.phase else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(sheet)) => {
                info!(
                    rows = sheet.row_count(),
                    columns = sheet.column_count(),
                    "spreadsheet loaded"
                );
                self.phase = LoadPhase::Ready(TableView::new(sheet));
            }
            Ok(Err(e)) => {
                error!(error = %e, "spreadsheet load failed");
                self.phase = LoadPhase::Failed(LOAD_ERROR_TEXT);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                error!("loader thread dropped its channel");
                self.phase = LoadPhase::Failed(LOAD_ERROR_TEXT);
            }
        }
    }
}

impl eframe::App for TablisaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_load();

        egui::CentralPanel::default().show(ctx, |ui| match &mut self.phase {
            LoadPhase::Loading(_) => {
                ui.centered_and_justified(|ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(LOADING_TEXT);
                    });
                });
                ctx.request_repaint_after(Duration::from_millis(50));
            }
            LoadPhase::Failed(msg) => {
                ui.centered_and_justified(|ui| {
                    ui.colored_label(Color32::RED, *msg);
                });
            }
            LoadPhase::Ready(view) => view.show(ui),
        });
    }
}

struct FilterModal {
    column: usize,
    options: Vec<Cell>,
}

/// The loaded table plus its transient UI state: search box contents and
/// the (at most one) open filter modal.
struct TableView {
    state: ViewState,
    search_input: String,
    modal: Option<FilterModal>,
}

impl TableView {
    fn new(sheet: Sheet) -> Self {
        TableView {
            state: ViewState::new(sheet),
            search_input: String::new(),
            modal: None,
        }
    }

    fn show(&mut self, ui: &mut Ui) {
        self.show_search_bar(ui);
        ui.separator();

        if self.state.headers().is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(EMPTY_SHEET_TEXT);
            });
            return;
        }

        self.show_table(ui);
        ui.separator();
        ui.label(format!("Items found: {}", self.state.total_items()));
        self.show_page_selector(ui);
        self.show_filter_modal(ui);
    }

    fn show_search_bar(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Search:");
            let response = ui.text_edit_singleline(&mut self.search_input);
            // Recompute on every keystroke; no debouncing.
            if response.changed() {
                self.state
                    .apply(TableEvent::SearchChanged(self.search_input.clone()));
            }
        });
    }

    fn show_table(&mut self, ui: &mut Ui) {
        let mut open_filter: Option<usize> = None;
        let headers = self.state.headers().to_vec();
        let rows = self.state.page_rows();

        let table = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center));
        let table = headers.iter().fold(table, |acc, _| acc.column(Column::auto()));

        table
            .header(20.0, |mut header| {
                for (idx, title) in headers.iter().enumerate() {
                    header.col(|ui| {
                        // Each header doubles as the filter trigger for its
                        // column.
                        if ui.button(RichText::new(title).strong()).clicked() {
                            open_filter = Some(idx);
                        }
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, rows.len(), |mut row| {
                    let cells = rows[row.index()];
                    for cell in cells {
                        row.col(|ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            });

        if let Some(column) = open_filter {
            self.modal = Some(FilterModal {
                column,
                options: self.state.distinct_values(column),
            });
        }
    }

    fn show_page_selector(&mut self, ui: &mut Ui) {
        let total_pages = self.state.total_pages();
        if total_pages <= 1 {
            return;
        }

        let current = self.state.current_page();
        let mut requested: Option<usize> = None;
        ui.horizontal_wrapped(|ui| {
            for page in 1..=total_pages {
                if ui
                    .selectable_label(page == current, page.to_string())
                    .clicked()
                {
                    requested = Some(page);
                }
            }
        });
        if let Some(page) = requested {
            self.state.apply(TableEvent::PageRequested(page));
        }
    }

    fn show_filter_modal(&mut self, ui: &mut Ui) {
        let Some(modal) = &self.modal else {
            return;
        };
        let title = self
            .state
            .headers()
            .get(modal.column)
            .cloned()
            .unwrap_or_default();
        let column = modal.column;

        let mut chosen: Option<Cell> = None;
        let mut close = false;
        egui::Window::new("Choose a filter")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ui.ctx(), |ui| {
                ui.label(format!("Filter by: {title}"));
                ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                    for value in &modal.options {
                        let label = if value.is_empty() {
                            "(empty)".to_owned()
                        } else {
                            value.to_string()
                        };
                        if ui.button(label).clicked() {
                            chosen = Some(value.clone());
                        }
                    }
                });
                ui.separator();
                if ui.button("Close").clicked() {
                    close = true;
                }
            });

        if let Some(value) = chosen {
            self.state.apply(TableEvent::FilterApplied { column, value });
            self.modal = None;
        } else if close {
            // Dismissed without picking a value: no state change.
            self.modal = None;
        }
    }
}
