//! Helpers to convert domain data into egui-facing view structs.

use crate::egui_app::state::{ClassRowView, ItemRowView, SubjectRowView, SuggestionRowView};
use crate::school::{DskpDraft, DskpItem, SchoolClass, Subject, SubjectId};

/// Build dropdown rows for the class picker.
pub fn class_rows(classes: &[SchoolClass]) -> Vec<ClassRowView> {
    classes
        .iter()
        .map(|class| ClassRowView {
            id: class.id.clone(),
            label: class_label(class),
        })
        .collect()
}

/// Produce the user-facing label for a class.
pub fn class_label(class: &SchoolClass) -> String {
    format!("{} (Year {})", class.name, class.year)
}

/// Build display rows for the subject sidebar.
pub fn subject_rows(subjects: &[Subject], selected: Option<&SubjectId>) -> Vec<SubjectRowView> {
    subjects
        .iter()
        .map(|subject| SubjectRowView {
            id: subject.id.clone(),
            name: subject.name.clone(),
            selected: selected.is_some_and(|id| id == &subject.id),
        })
        .collect()
}

/// Build display rows for the curriculum item list.
pub fn item_rows(items: &[DskpItem]) -> Vec<ItemRowView> {
    items
        .iter()
        .map(|item| ItemRowView {
            id: item.id.clone(),
            sk: item.sk.clone(),
            sp: item.sp.clone(),
        })
        .collect()
}

/// Build checkbox rows for freshly fetched suggestions. Every row starts
/// selected; the user deselects what they do not want.
pub fn suggestion_rows(drafts: &[DskpDraft]) -> Vec<SuggestionRowView> {
    drafts
        .iter()
        .map(|draft| SuggestionRowView {
            sk: draft.sk.clone(),
            sp: draft.sp.clone(),
            selected: true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::school::{ClassId, ItemId};

    #[test]
    fn class_label_includes_year() {
        let class = SchoolClass {
            id: ClassId::from("c-1"),
            name: "4 Amanah".to_string(),
            year: "4".to_string(),
        };
        assert_eq!(class_label(&class), "4 Amanah (Year 4)");
    }

    #[test]
    fn subject_rows_flag_only_the_selected_subject() {
        let subjects = vec![
            Subject {
                id: SubjectId::from("s-1"),
                class_id: ClassId::from("c-1"),
                name: "BM".to_string(),
            },
            Subject {
                id: SubjectId::from("s-2"),
                class_id: ClassId::from("c-1"),
                name: "Sains".to_string(),
            },
        ];
        let selected = SubjectId::from("s-2");
        let rows = subject_rows(&subjects, Some(&selected));
        assert!(!rows[0].selected);
        assert!(rows[1].selected);
    }

    #[test]
    fn suggestion_rows_start_selected() {
        let drafts = vec![
            DskpDraft {
                sk: "1.1 Kemahiran mendengar".to_string(),
                sp: "1.1.1 Mendengar dan memberikan respons".to_string(),
            },
            DskpDraft {
                sk: "2.1 Kemahiran membaca".to_string(),
                sp: "2.1.1 Membaca dan memahami".to_string(),
            },
        ];
        let rows = suggestion_rows(&drafts);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.selected));
    }

    #[test]
    fn item_rows_preserve_order() {
        let items = vec![
            DskpItem {
                id: ItemId::from("i-1"),
                subject_id: SubjectId::from("s-1"),
                sk: "1.1".to_string(),
                sp: "1.1.1".to_string(),
            },
            DskpItem {
                id: ItemId::from("i-2"),
                subject_id: SubjectId::from("s-1"),
                sk: "1.2".to_string(),
                sp: "1.2.2".to_string(),
            },
        ];
        let rows = item_rows(&items);
        assert_eq!(rows[0].id, ItemId::from("i-1"));
        assert_eq!(rows[1].sp, "1.2.2");
    }
}
