//! Integration tests for the appendix registry.

use std::collections::BTreeSet;
use std::path::Path;

use appendix_model::{
    AppendixRegistry, MoveDirection, PageCounter, PageSelection, RegistryError, SourceError,
    default_label,
};
use proptest::prelude::*;

fn assert_labels_follow_positions(registry: &AppendixRegistry) {
    for (position, entry) in registry.iter().enumerate() {
        assert_eq!(entry.default_label(), default_label(position));
    }
}

#[test]
fn relabels_after_remove_but_keeps_titles() {
    let mut registry = AppendixRegistry::new();
    registry.add("intro.pdf", 2);
    registry.add("survey.pdf", 9);
    registry.add("photos.pdf", 4);
    registry.rename(2, "Site Photos").unwrap();

    let selection: BTreeSet<usize> = [0].into_iter().collect();
    assert_eq!(registry.remove_at(&selection).unwrap(), 1);

    let entries = registry.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].default_label(), "Appendix A");
    assert_eq!(entries[0].custom_title(), "Appendix B");
    assert_eq!(entries[1].default_label(), "Appendix B");
    assert_eq!(entries[1].custom_title(), "Site Photos");
}

#[test]
fn multi_select_remove_is_atomic() {
    let mut registry = AppendixRegistry::new();
    for name in ["a.pdf", "b.pdf", "c.pdf", "d.pdf", "e.pdf"] {
        registry.add(name, 1);
    }
    let selection: BTreeSet<usize> = [1, 3, 4].into_iter().collect();
    assert_eq!(registry.remove_at(&selection).unwrap(), 3);
    let names: Vec<String> = registry.iter().map(|e| e.file_name()).collect();
    assert_eq!(names, vec!["a.pdf", "c.pdf"]);
    assert_labels_follow_positions(&registry);
}

#[test]
fn empty_selection_is_noop() {
    let mut registry = AppendixRegistry::new();
    registry.add("a.pdf", 1);
    assert_eq!(registry.remove_at(&BTreeSet::new()).unwrap(), 0);
    assert_eq!(registry.len(), 1);
}

#[test]
fn move_swaps_neighbours() {
    let mut registry = AppendixRegistry::new();
    registry.add("a.pdf", 1);
    registry.add("b.pdf", 1);
    registry.add("c.pdf", 1);

    assert_eq!(registry.move_one(0, MoveDirection::Down).unwrap(), 1);
    let names: Vec<String> = registry.iter().map(|e| e.file_name()).collect();
    assert_eq!(names, vec!["b.pdf", "a.pdf", "c.pdf"]);
    assert_eq!(registry.entries()[1].custom_title(), "Appendix A");
    assert_eq!(registry.entries()[1].default_label(), "Appendix B");
}

#[test]
fn rename_rejects_blank_titles() {
    let mut registry = AppendixRegistry::new();
    registry.add("a.pdf", 1);
    registry.rename(0, "Budget").unwrap();

    assert_eq!(registry.rename(0, "").unwrap_err(), RegistryError::EmptyTitle);
    assert_eq!(registry.rename(0, "  \t").unwrap_err(), RegistryError::EmptyTitle);
    assert_eq!(registry.entries()[0].custom_title(), "Budget");

    registry.rename(0, "Budget").unwrap();
    assert_eq!(registry.entries()[0].custom_title(), "Budget");
}

#[test]
fn invalid_range_leaves_entry_unchanged() {
    let mut registry = AppendixRegistry::new();
    registry.add("a.pdf", 5);
    registry.set_page_range(0, Some("2-3")).unwrap();

    let err = registry.set_page_range(0, Some("4-9")).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidPageRange { .. }));
    assert_eq!(registry.entries()[0].page_range_spec(), Some("2-3"));
    assert_eq!(
        registry.entries()[0].selected_pages().unwrap(),
        PageSelection::Pages(vec![1, 2])
    );
}

#[test]
fn range_is_stored_raw() {
    let mut registry = AppendixRegistry::new();
    registry.add("a.pdf", 10);
    registry.set_page_range(0, Some(" 5, 1-2 ,")).unwrap();
    assert_eq!(registry.entries()[0].page_range_spec(), Some("5, 1-2 ,"));
}

#[test]
fn display_lines() {
    let mut registry = AppendixRegistry::new();
    registry.add("/reports/survey.pdf", 12);
    registry.add("/reports/photos.pdf", 3);
    registry.rename(0, "Survey Results").unwrap();
    registry.set_page_range(1, Some("1, 3")).unwrap();

    insta::assert_snapshot!(registry.display_lines().join("\n"), @r"
    Survey Results  |  12 pages  (survey.pdf)
    Appendix B  |  Pages: 1, 3  (photos.pdf)
    ");
}

/// Accepts `.pdf` paths as four-page documents and rejects everything else.
struct ExtensionCounter;

impl PageCounter for ExtensionCounter {
    fn count_pages(&self, path: &Path) -> Result<usize, SourceError> {
        if path.extension().is_some_and(|ext| ext == "pdf") {
            Ok(4)
        } else {
            Err(SourceError::unreadable(path, "not a PDF"))
        }
    }
}

#[test]
fn add_sources_skips_unreadable() {
    let mut registry = AppendixRegistry::new();
    let report = registry.add_sources(["a.pdf", "notes.txt", "b.pdf"], &ExtensionCounter);

    assert_eq!(report.added, vec![0, 1]);
    assert_eq!(report.failed.len(), 1);
    assert!(!report.is_complete());
    assert_eq!(registry.entries()[1].file_name(), "b.pdf");
    assert_labels_follow_positions(&registry);
}

#[derive(Debug, Clone)]
enum Edit {
    Add(usize),
    Remove(Vec<usize>),
    Move(usize, bool),
    Rename(usize),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (1usize..20).prop_map(Edit::Add),
        proptest::collection::vec(0usize..12, 0..4).prop_map(Edit::Remove),
        (0usize..12, any::<bool>()).prop_map(|(i, up)| Edit::Move(i, up)),
        (0usize..12).prop_map(Edit::Rename),
    ]
}

proptest! {
    #[test]
    fn labels_always_follow_positions(edits in proptest::collection::vec(edit(), 1..40)) {
        let mut registry = AppendixRegistry::new();
        for edit in edits {
            match edit {
                Edit::Add(pages) => {
                    registry.add("x.pdf", pages);
                }
                Edit::Remove(indices) => {
                    let len = registry.len();
                    let selection: BTreeSet<usize> =
                        indices.into_iter().filter(|&i| i < len).collect();
                    registry.remove_at(&selection).unwrap();
                }
                Edit::Move(index, up) if index < registry.len() => {
                    let direction = if up { MoveDirection::Up } else { MoveDirection::Down };
                    registry.move_one(index, direction).unwrap();
                }
                Edit::Move(..) => {}
                Edit::Rename(index) if index < registry.len() => {
                    registry.rename(index, &format!("Title {index}")).unwrap();
                }
                Edit::Rename(_) => {}
            }
            for (position, entry) in registry.iter().enumerate() {
                prop_assert_eq!(entry.default_label(), default_label(position));
                prop_assert!(!entry.custom_title().trim().is_empty());
            }
        }
    }
}
