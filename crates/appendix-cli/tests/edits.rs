//! Command-line registry edits.

use std::path::Path;

use appendix_assembly::Session;
use appendix_cli::edits::{Assignment, Edit, EditError, apply, resolve_label};
use appendix_model::{AppendixRegistry, MoveDirection, PageCounter, SourceError};

/// Every source has the same page count.
struct FixedPages(usize);

impl PageCounter for FixedPages {
    fn count_pages(&self, _path: &Path) -> Result<usize, SourceError> {
        Ok(self.0)
    }
}

fn assignment(label: &str, value: &str) -> Assignment {
    Assignment {
        label: label.to_string(),
        value: value.to_string(),
    }
}

#[test]
fn resolves_letters_labels_and_positions() {
    let mut registry = AppendixRegistry::new();
    for index in 0..30 {
        registry.add(format!("{index}.pdf"), 10);
    }
    assert_eq!(resolve_label(&registry, "A").unwrap(), 0);
    assert_eq!(resolve_label(&registry, "c").unwrap(), 2);
    assert_eq!(resolve_label(&registry, "Appendix D").unwrap(), 3);
    assert_eq!(resolve_label(&registry, "AB").unwrap(), 27);
    assert_eq!(resolve_label(&registry, "2").unwrap(), 1);

    for bad in ["", "0", "31", "AF", "Appendix", "A1"] {
        assert!(
            matches!(
                resolve_label(&registry, bad),
                Err(EditError::UnknownLabel { .. })
            ),
            "{bad:?} should not resolve"
        );
    }
}

#[test]
fn edits_apply_in_order_against_current_labels() {
    let mut session = Session::new();
    session
        .add_sources(["a.pdf", "b.pdf", "c.pdf"], &FixedPages(10))
        .unwrap();

    let edits = [
        Edit::Remove("A".to_string()),
        Edit::Title(assignment("A", "Budget")),
        Edit::Move("A".to_string(), MoveDirection::Down),
        Edit::Pages(assignment("B", "1-3, 9")),
    ];
    for edit in &edits {
        apply(&mut session, edit).unwrap();
    }

    insta::assert_snapshot!(session.registry().display_lines().join("\n"), @r"
    Appendix C  |  10 pages  (c.pdf)
    Budget  |  Pages: 1-3, 9  (b.pdf)
    ");
}

#[test]
fn invalid_range_is_reported() {
    let mut session = Session::new();
    session.add_sources(["a.pdf"], &FixedPages(2)).unwrap();

    let edit = Edit::Pages(assignment("A", "3"));
    let error = apply(&mut session, &edit).unwrap_err();
    assert!(matches!(error, EditError::Session(_)));
    assert_eq!(edit.to_string(), "--pages A=3");
}
