use super::EguiController;
use super::jobs::ClassesLoadResult;
use crate::egui_app::ui::style::StatusTone;
use crate::school::ClassId;

impl EguiController {
    /// Start (or restart) fetching the class list.
    pub fn begin_classes_load(&mut self) {
        if self.jobs.classes_load_in_progress {
            return;
        }
        self.ui.classes.loading = true;
        self.set_status("Loading classes…", StatusTone::Busy);
        self.jobs.begin_classes_load(self.school.clone());
    }

    pub(super) fn apply_classes_loaded(&mut self, message: ClassesLoadResult) {
        self.jobs.clear_classes_load();
        self.ui.classes.loading = false;
        match message.result {
            Ok(classes) => {
                self.classes = classes;
                self.refresh_classes_ui();
                let restore = self
                    .config
                    .last_selected_class
                    .clone()
                    .filter(|id| self.classes.iter().any(|class| &class.id == id));
                match restore {
                    Some(id) => self.select_class(Some(id)),
                    None => {
                        if self.selected_class.is_some() {
                            self.select_class(None);
                        }
                        self.set_status(
                            format!("Loaded {} classes", self.classes.len()),
                            StatusTone::Info,
                        );
                    }
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "class list load failed");
                self.set_status(format!("Failed to load classes: {err}"), StatusTone::Error);
            }
        }
    }

    /// Change the selected class, persist the choice, and reload subjects.
    pub fn select_class(&mut self, id: Option<ClassId>) {
        self.selected_class = id.clone();
        self.selected_subject = None;
        self.subjects.clear();
        self.items.clear();
        self.jobs.clear_items_load();
        self.ui.items.loading = false;
        self.refresh_classes_ui();
        self.refresh_subjects_ui();
        self.refresh_items_ui();
        self.config.last_selected_class = id.clone();
        self.persist_config("Failed to save class selection");
        match id {
            Some(class_id) => {
                self.ui.subjects.loading = true;
                self.set_status("Loading subjects…", StatusTone::Busy);
                self.jobs.begin_subjects_load(self.school.clone(), class_id);
            }
            None => {
                self.jobs.clear_subjects_load();
                self.ui.subjects.loading = false;
            }
        }
    }
}
