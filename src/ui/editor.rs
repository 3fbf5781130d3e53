use std::path::PathBuf;

use eframe::egui;
use rfd::FileDialog;

use crate::config::config::LANG_DIR;
use crate::core::document::{Document, Repository, ServerEntry, UrlEntry};
use crate::core::store::ConfigStore;
use crate::i18n::{Language, Translations};
use crate::ui::forms::{self, FieldKind, FieldSpec, FieldValue, FormModel, FormState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Repositories,
    Urls,
    Servers,
    Paths,
}

enum Dialog {
    Repository(FormState),
    Url(FormState),
    Server(FormState),
}

enum ListAction {
    Add,
    Edit,
    Delete,
}

struct Notice {
    title_key: &'static str,
    body: String,
}

pub struct ConfigEditorApp {
    store: ConfigStore,
    translations: Translations,
    tab: Tab,
    selected_repo: Option<usize>,
    selected_url: Option<usize>,
    selected_server: Option<usize>,
    path_input: String,
    dialog: Option<Dialog>,
    notices: Vec<Notice>,
}

impl ConfigEditorApp {
    pub fn new(base_dir: PathBuf) -> Self {
        let mut store = ConfigStore::new(&base_dir);
        let mut notices = Vec::new();

        if let Err(err) = store.load() {
            // Aún no hay tabla de idioma cargada; literal como en el original.
            notices.push(Notice {
                title_key: "error",
                body: format!("Error loading configuration:\n{err}"),
            });
        }

        let mut translations = Translations::new(base_dir.join(LANG_DIR));
        let language = Language::from_code(&store.document().language);
        if let Err(err) = translations.load(language) {
            notices.push(Notice {
                title_key: "error",
                body: format!("Language file not found ({}):\n{err}", language.code()),
            });
        }

        let path_input = store.document().posix_path_extension.clone();

        Self {
            store,
            translations,
            tab: Tab::Repositories,
            selected_repo: None,
            selected_url: None,
            selected_server: None,
            path_input,
            dialog: None,
            notices,
        }
    }

    pub fn init(&mut self, ctx: &egui::Context) {
        self.apply_window_title(ctx);
    }

    fn apply_window_title(&self, ctx: &egui::Context) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(
            self.translations.tr("app_title").to_string(),
        ));
    }

    fn notify(&mut self, title_key: &'static str, body: String) {
        self.notices.push(Notice { title_key, body });
    }

    /// Guarda el documento completo; los fallos se muestran como aviso y el
    /// estado en memoria se conserva.
    fn persist(&mut self) {
        if let Err(err) = self.store.save() {
            let body = format!("{}\n{}", self.translations.tr("error_saving_config"), err);
            self.notify("error", body);
        }
    }

    fn change_language(&mut self, ctx: &egui::Context, language: Language) {
        self.store.document_mut().language = language.code().to_string();
        self.persist();

        match self.translations.load(language) {
            Ok(()) => self.apply_window_title(ctx),
            Err(err) => {
                let body = format!(
                    "{}\nlang_{}.json\n{}",
                    self.translations.tr("language_file_not_found"),
                    language.code(),
                    err
                );
                self.notify("error", body);
            }
        }
    }

    /// La identidad de una fila es su posición actual en la lista; al quedar
    /// fuera de rango la selección se descarta.
    fn prune_selection(&mut self) {
        let document = self.store.document();
        if matches!(self.selected_repo, Some(i) if i >= document.repos.len()) {
            self.selected_repo = None;
        }
        if matches!(self.selected_url, Some(i) if i >= document.urls.len()) {
            self.selected_url = None;
        }
        if matches!(self.selected_server, Some(i) if i >= document.servers.len()) {
            self.selected_server = None;
        }
    }

    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        let mut switch = None;
        egui::TopBottomPanel::top("menubar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button(self.translations.tr("language"), |ui| {
                    for language in Language::all() {
                        if ui.button(language.display_name()).clicked() {
                            switch = Some(*language);
                            ui.close_menu();
                        }
                    }
                });
            });
        });
        if let Some(language) = switch {
            self.change_language(ctx, language);
        }
    }

    fn show_tab_bar(&mut self, ctx: &egui::Context) {
        let mut tab = self.tab;
        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut tab, Tab::Repositories, self.translations.tr("repositories"));
                ui.selectable_value(&mut tab, Tab::Urls, self.translations.tr("urls"));
                ui.selectable_value(&mut tab, Tab::Servers, self.translations.tr("servers"));
                ui.selectable_value(&mut tab, Tab::Paths, self.translations.tr("paths"));
            });
        });
        self.tab = tab;
    }

    fn show_active_tab(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Repositories => self.show_repos_tab(ui),
            Tab::Urls => self.show_urls_tab(ui),
            Tab::Servers => self.show_servers_tab(ui),
            Tab::Paths => self.show_paths_tab(ui),
        });
    }

    fn show_list_controls(
        &self,
        ui: &mut egui::Ui,
        has_selection: bool,
        with_delete: bool,
    ) -> Option<ListAction> {
        let mut action = None;
        ui.horizontal(|ui| {
            if ui.button(self.translations.tr("add")).clicked() {
                action = Some(ListAction::Add);
            }
            if ui
                .add_enabled(has_selection, egui::Button::new(self.translations.tr("edit")))
                .clicked()
            {
                action = Some(ListAction::Edit);
            }
            if with_delete
                && ui
                    .add_enabled(has_selection, egui::Button::new(self.translations.tr("delete")))
                    .clicked()
            {
                action = Some(ListAction::Delete);
            }
        });
        action
    }

    fn show_repos_tab(&mut self, ui: &mut egui::Ui) {
        let action = self.show_list_controls(ui, self.selected_repo.is_some(), true);
        ui.separator();

        let mut clicked_row = None;
        egui::Grid::new("repo_list")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.strong(self.translations.tr("name"));
                ui.strong(self.translations.tr("url"));
                ui.end_row();
                for (index, repo) in self.store.document().repos.iter().enumerate() {
                    let selected = self.selected_repo == Some(index);
                    if ui.selectable_label(selected, repo.repo_name.as_str()).clicked() {
                        clicked_row = Some(index);
                    }
                    ui.label(repo.url.as_str());
                    ui.end_row();
                }
            });
        if let Some(index) = clicked_row {
            self.selected_repo = Some(index);
        }

        match action {
            Some(ListAction::Add) => {
                self.dialog = Some(Dialog::Repository(FormState::add::<Repository>()));
            }
            Some(ListAction::Edit) => {
                if let Some(index) = self.selected_repo {
                    if let Some(repo) = self.store.document().repos.get(index) {
                        self.dialog = Some(Dialog::Repository(FormState::edit(index, repo)));
                    }
                }
            }
            Some(ListAction::Delete) => {
                if let Some(index) = self.selected_repo {
                    if index < self.store.document().repos.len() {
                        self.store.document_mut().repos.remove(index);
                        self.persist();
                        self.selected_repo = None;
                    }
                }
            }
            None => {}
        }
    }

    fn show_urls_tab(&mut self, ui: &mut egui::Ui) {
        // La pestaña de URLs no ofrece borrado, igual que el original.
        let action = self.show_list_controls(ui, self.selected_url.is_some(), false);
        ui.separator();

        let mut clicked_row = None;
        egui::Grid::new("url_list")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.strong(self.translations.tr("type"));
                ui.strong(self.translations.tr("url"));
                ui.end_row();
                for (index, entry) in self.store.document().urls.iter().enumerate() {
                    let selected = self.selected_url == Some(index);
                    if ui.selectable_label(selected, entry.kind.code()).clicked() {
                        clicked_row = Some(index);
                    }
                    ui.label(entry.url.as_str());
                    ui.end_row();
                }
            });
        if let Some(index) = clicked_row {
            self.selected_url = Some(index);
        }

        match action {
            Some(ListAction::Add) => {
                self.dialog = Some(Dialog::Url(FormState::add::<UrlEntry>()));
            }
            Some(ListAction::Edit) => {
                if let Some(index) = self.selected_url {
                    if let Some(entry) = self.store.document().urls.get(index) {
                        self.dialog = Some(Dialog::Url(FormState::edit(index, entry)));
                    }
                }
            }
            Some(ListAction::Delete) | None => {}
        }
    }

    fn show_servers_tab(&mut self, ui: &mut egui::Ui) {
        let action = self.show_list_controls(ui, self.selected_server.is_some(), true);
        ui.separator();

        let mut clicked_row = None;
        egui::Grid::new("server_list")
            .num_columns(3)
            .striped(true)
            .show(ui, |ui| {
                ui.strong(self.translations.tr("name"));
                ui.strong(self.translations.tr("address"));
                ui.strong(self.translations.tr("port"));
                ui.end_row();
                for (index, server) in self.store.document().servers.iter().enumerate() {
                    let selected = self.selected_server == Some(index);
                    if ui.selectable_label(selected, server.name.as_str()).clicked() {
                        clicked_row = Some(index);
                    }
                    ui.label(server.address.as_str());
                    ui.label(server.duelport.to_string());
                    ui.end_row();
                }
            });
        if let Some(index) = clicked_row {
            self.selected_server = Some(index);
        }

        match action {
            Some(ListAction::Add) => {
                self.dialog = Some(Dialog::Server(FormState::add::<ServerEntry>()));
            }
            Some(ListAction::Edit) => {
                if let Some(index) = self.selected_server {
                    if let Some(server) = self.store.document().servers.get(index) {
                        self.dialog = Some(Dialog::Server(FormState::edit(index, server)));
                    }
                }
            }
            Some(ListAction::Delete) => {
                if let Some(index) = self.selected_server {
                    if index < self.store.document().servers.len() {
                        self.store.document_mut().servers.remove(index);
                        self.persist();
                        self.selected_server = None;
                    }
                }
            }
            None => {}
        }
    }

    fn show_paths_tab(&mut self, ui: &mut egui::Ui) {
        ui.label(format!("{}:", self.translations.tr("path")));
        ui.add(egui::TextEdit::singleline(&mut self.path_input).desired_width(600.0));
        if ui.button(self.translations.tr("save")).clicked() {
            self.store.document_mut().posix_path_extension = self.path_input.clone();
            self.persist();
        }
    }

    fn show_dialog(&mut self, ctx: &egui::Context) {
        let Some(mut dialog) = self.dialog.take() else {
            return;
        };
        let open = match &mut dialog {
            Dialog::Repository(state) => {
                self.run_form::<Repository>(ctx, state, |document| &mut document.repos)
            }
            Dialog::Url(state) => self.run_form::<UrlEntry>(ctx, state, |document| &mut document.urls),
            Dialog::Server(state) => {
                self.run_form::<ServerEntry>(ctx, state, |document| &mut document.servers)
            }
        };
        if open {
            self.dialog = Some(dialog);
        }
    }

    /// Renders one editor form from its field descriptors. Returns whether
    /// the form stays open for the next frame.
    fn run_form<R: FormModel>(
        &mut self,
        ctx: &egui::Context,
        state: &mut FormState,
        list: fn(&mut Document) -> &mut Vec<R>,
    ) -> bool {
        let title_key = if state.is_edit() {
            R::EDIT_TITLE_KEY
        } else {
            R::ADD_TITLE_KEY
        };
        let title = self.translations.tr(title_key).to_string();
        let mut save_clicked = false;
        let mut cancel_clicked = false;

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("record_form").num_columns(2).show(ui, |ui| {
                    for (spec, value) in R::fields().iter().zip(state.values.iter_mut()) {
                        ui.label(format!("{}:", self.translations.tr(spec.label_key)));
                        Self::show_field(ui, spec, value);
                        ui.end_row();
                    }
                });

                if let Some(error) = &state.error {
                    ui.colored_label(
                        egui::Color32::RED,
                        self.translations.tr(error.message_key),
                    );
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button(self.translations.tr("save")).clicked() {
                        save_clicked = true;
                    }
                    if ui.button(self.translations.tr("cancel")).clicked() {
                        cancel_clicked = true;
                    }
                });
            });

        if save_clicked {
            return match forms::commit::<R>(state) {
                Ok(record) => {
                    let slot = list(self.store.document_mut());
                    match state.index {
                        Some(index) if index < slot.len() => slot[index] = record,
                        _ => slot.push(record),
                    }
                    self.persist();
                    false
                }
                Err(error) => {
                    state.error = Some(error);
                    true
                }
            };
        }
        !cancel_clicked
    }

    fn show_field(ui: &mut egui::Ui, spec: &FieldSpec, value: &mut FieldValue) {
        match (spec.kind, value) {
            (FieldKind::Text, FieldValue::Text(text)) => {
                ui.add(egui::TextEdit::singleline(text).desired_width(300.0));
            }
            (FieldKind::Path, FieldValue::Text(text)) => {
                ui.horizontal(|ui| {
                    ui.add(egui::TextEdit::singleline(text).desired_width(260.0));
                    if ui.button("📂").clicked() {
                        if let Some(folder) = FileDialog::new().pick_folder() {
                            *text = folder.display().to_string();
                        }
                    }
                });
            }
            (FieldKind::Flag, FieldValue::Flag(flag)) => {
                ui.checkbox(flag, "");
            }
            (FieldKind::Choice(options), FieldValue::Choice(selected)) => {
                egui::ComboBox::from_id_salt(spec.key)
                    .selected_text(options.get(*selected).copied().unwrap_or(""))
                    .show_ui(ui, |ui| {
                        for (index, option) in options.iter().enumerate() {
                            ui.selectable_value(selected, index, *option);
                        }
                    });
            }
            _ => {}
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.notices.first() else {
            return;
        };
        let title = self.translations.tr(notice.title_key).to_string();
        let body = notice.body.clone();
        let close_label = self.translations.tr("close").to_string();

        let modal = egui::Modal::new(egui::Id::new("notice")).show(ctx, |ui| {
            ui.set_width(340.0);
            ui.heading(title);
            ui.separator();
            ui.label(body);
            ui.add_space(8.0);
            ui.button(close_label).clicked()
        });

        if modal.inner || modal.should_close() {
            self.notices.remove(0);
        }
    }
}

impl eframe::App for ConfigEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.prune_selection();
        self.show_menu_bar(ctx);
        self.show_tab_bar(ctx);
        self.show_active_tab(ctx);
        self.show_dialog(ctx);
        self.show_notice(ctx);
    }
}
