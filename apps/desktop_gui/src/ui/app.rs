use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use search_core::{FilterEditorView, SearchCommand, SearchView};
use shared::domain::{LocationCategory, Order};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiErrorContext, UiEvent},
    orchestration::dispatch_backend_command,
};

const EMPTY_RESULTS_TEXT: &str = "No orders found. Try adjusting your search or filters.";
const SKELETON_CARDS: usize = 3;

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view: Option<SearchView>,
    keyword_input: String,
    filter_search_input: String,
    filter_search_category: Option<LocationCategory>,
    status: String,
    status_banner: Option<UiError>,
}

impl DesktopGuiApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            view: None,
            keyword_input: String::new(),
            filter_search_input: String::new(),
            filter_search_category: None,
            status: "Starting...".to_string(),
            status_banner: None,
        }
    }

    fn send(&mut self, command: SearchCommand) {
        dispatch_backend_command(&self.cmd_tx, command, &mut self.status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::ViewUpdated(view) => {
                    self.status_banner = view
                        .error
                        .as_deref()
                        .map(|message| UiError::from_message(UiErrorContext::Search, message));
                    if view.filter_editor.is_none() {
                        self.filter_search_category = None;
                    }
                    self.view = Some(view);
                }
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), "ui error: {}", err.message());
                    self.status = err.message().to_string();
                    self.status_banner = Some(err);
                }
            }
        }
    }

    fn show_search_bar(&mut self, ui: &mut egui::Ui) {
        let filter_count = self
            .view
            .as_ref()
            .map(SearchView::active_filter_count)
            .unwrap_or(0);
        let editor_open = self
            .view
            .as_ref()
            .is_some_and(|view| view.filter_editor.is_some());

        ui.horizontal(|ui| {
            let field_width = (ui.available_width() - 140.0).max(160.0);
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.keyword_input)
                    .hint_text("Search orders")
                    .desired_width(field_width),
            );
            if response.changed() {
                let keyword = self.keyword_input.clone();
                self.send(SearchCommand::SetKeyword(keyword));
            }

            if !self.keyword_input.is_empty() && ui.small_button("✕").clicked() {
                self.keyword_input.clear();
                self.send(SearchCommand::ClearKeyword);
            }

            let label = if filter_count > 0 {
                format!("Filter ({filter_count})")
            } else {
                "Filter".to_string()
            };
            if ui.selectable_label(editor_open, label).clicked() {
                if editor_open {
                    self.send(SearchCommand::CloseFilters);
                } else {
                    self.send(SearchCommand::OpenFilters);
                }
            }
        });
    }

    fn show_filter_window(&mut self, ctx: &egui::Context, editor: &FilterEditorView) {
        if self.filter_search_category != Some(editor.active) {
            self.filter_search_category = Some(editor.active);
            self.filter_search_input = editor.search_text.clone();
        }

        let mut open = true;
        let mut commands = Vec::new();
        egui::Window::new("Filter")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for category in LocationCategory::ALL {
                        let selected = match category {
                            LocationCategory::Origin => editor.origin_selected,
                            LocationCategory::Destination => editor.destination_selected,
                        };
                        let label = category_tab_label(category, selected);
                        if ui
                            .selectable_label(editor.active == category, label)
                            .clicked()
                            && editor.active != category
                        {
                            commands.push(SearchCommand::SelectFilterCategory(category));
                        }
                    }
                });
                ui.separator();

                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.filter_search_input)
                        .hint_text(format!("Search {}", editor.active.label().to_lowercase())),
                );
                if response.changed() {
                    commands.push(SearchCommand::SetFilterSearch {
                        category: editor.active,
                        text: self.filter_search_input.clone(),
                    });
                }

                egui::ScrollArea::vertical()
                    .max_height(220.0)
                    .show(ui, |ui| {
                        if editor.options.is_empty() {
                            ui.weak("No matching locations");
                        }
                        for option in &editor.options {
                            let mut checked = option.selected;
                            if ui.checkbox(&mut checked, option.name).changed() {
                                commands.push(SearchCommand::ToggleFilter {
                                    category: editor.active,
                                    code: option.code.to_string(),
                                });
                            }
                        }
                    });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(editor.can_reset, egui::Button::new("Reset"))
                        .clicked()
                    {
                        commands.push(SearchCommand::ResetFilters);
                    }
                    if ui
                        .add_enabled(editor.can_apply, egui::Button::new("Terapkan"))
                        .clicked()
                    {
                        commands.push(SearchCommand::ApplyFilters);
                    }
                });
            });

        if !open {
            commands.push(SearchCommand::CloseFilters);
        }
        for command in commands {
            self.send(command);
        }
    }

    fn show_results(&mut self, ui: &mut egui::Ui) {
        let Some(view) = self.view.clone() else {
            ui.spinner();
            return;
        };

        if view.loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.weak("Searching orders...");
            });
            for _ in 0..SKELETON_CARDS {
                show_skeleton_card(ui);
            }
            return;
        }

        if let Some(error) = &view.error {
            ui.colored_label(ui.visuals().error_fg_color, error);
            if let Some(hint) = self.status_banner.as_ref().and_then(UiError::hint) {
                ui.weak(hint);
            }
            return;
        }

        if view.orders.is_empty() {
            ui.weak(EMPTY_RESULTS_TEXT);
            return;
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .max_height((ui.available_height() - 40.0).max(120.0))
            .show(ui, |ui| {
                for order in &view.orders {
                    show_order_card(ui, order);
                }
            });

        if view.pagination_visible() {
            ui.add_space(8.0);
            self.show_pager(ui, &view);
        }
    }

    fn show_pager(&mut self, ui: &mut egui::Ui, view: &SearchView) {
        let mut command = None;
        ui.horizontal(|ui| {
            if ui
                .add_enabled(view.has_previous, egui::Button::new("‹ Prev"))
                .clicked()
            {
                command = Some(SearchCommand::PreviousPage);
            }
            for page in 1..=view.total_pages {
                if ui
                    .selectable_label(page == view.current_page, page.to_string())
                    .clicked()
                    && page != view.current_page
                {
                    command = Some(SearchCommand::ChangePage(page));
                }
            }
            if ui
                .add_enabled(view.has_next, egui::Button::new("Next ›"))
                .clicked()
            {
                command = Some(SearchCommand::NextPage);
            }
            ui.weak(format!("{} orders", view.total_orders));
        });
        if let Some(command) = command {
            self.send(command);
        }
    }
}

fn category_tab_label(category: LocationCategory, selected: usize) -> String {
    if selected > 0 {
        format!("{} ({selected})", category.label())
    } else {
        category.label().to_string()
    }
}

fn show_order_card(ui: &mut egui::Ui, order: &Order) {
    egui::Frame::group(ui.style())
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&order.id.0).monospace().strong());
                ui.label(&order.goods_name);
            });
            ui.weak(format!(
                "{} → {}",
                order.origin_name, order.destination_name
            ));
        });
    ui.add_space(4.0);
}

fn show_skeleton_card(ui: &mut egui::Ui) {
    egui::Frame::group(ui.style())
        .inner_margin(10.0)
        .show(ui, |ui| {
            let width = ui.available_width();
            let fill = ui.visuals().faint_bg_color;
            for fraction in [0.35, 0.6] {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(width * fraction, 12.0), egui::Sense::hover());
                ui.painter().rect_filled(rect, 4.0, fill);
            }
        });
    ui.add_space(4.0);
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("search_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            self.show_search_bar(ui);
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.weak(&self.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(err) = self
                .status_banner
                .as_ref()
                .filter(|err| err.context() == UiErrorContext::BackendStartup)
            {
                ui.colored_label(ui.visuals().error_fg_color, err.message());
                if let Some(hint) = err.hint() {
                    ui.weak(hint);
                }
                return;
            }
            self.show_results(ui);
        });

        if let Some(editor) = self
            .view
            .as_ref()
            .and_then(|view| view.filter_editor.clone())
        {
            self.show_filter_window(ctx, &editor);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

impl Drop for DesktopGuiApp {
    fn drop(&mut self) {
        let _ = self.cmd_tx.try_send(BackendCommand::Shutdown);
    }
}
