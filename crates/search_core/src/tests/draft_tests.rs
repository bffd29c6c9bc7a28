use super::*;

fn committed() -> Filters {
    Filters::empty()
        .with(LocationCategory::Origin, "JKT")
        .with(LocationCategory::Destination, "MDN")
}

#[test]
fn freshly_opened_draft_is_clean() {
    let draft = FilterDraft::open(&committed());
    assert!(!draft.is_dirty());
    assert!(!draft.can_apply());
    assert_eq!(draft.draft(), &committed());
    assert_eq!(draft.active_category(), LocationCategory::Origin);
    assert_eq!(draft.search_text(LocationCategory::Origin), "");
}

#[test]
fn toggle_twice_returns_to_clean() {
    let mut draft = FilterDraft::open(&committed());
    draft.toggle(LocationCategory::Origin, "SBY");
    assert!(draft.is_dirty());
    draft.toggle(LocationCategory::Origin, "SBY");
    assert!(!draft.is_dirty());

    draft.toggle(LocationCategory::Destination, "MDN");
    assert!(draft.is_dirty());
    assert!(!draft.is_selected(LocationCategory::Destination, "MDN"));
}

#[test]
fn edits_never_touch_the_committed_value() {
    let committed = committed();
    let mut draft = FilterDraft::open(&committed);
    draft.toggle(LocationCategory::Origin, "BDG");
    draft.toggle(LocationCategory::Origin, "JKT");
    assert!(committed.contains(LocationCategory::Origin, "JKT"));
    assert!(!committed.contains(LocationCategory::Origin, "BDG"));
}

#[test]
fn unknown_category_name_is_ignored() {
    let mut draft = FilterDraft::open(&committed());
    draft.toggle_named("warehouse", "JKT");
    assert!(!draft.is_dirty());
    draft.toggle_named("origin", "DPS");
    assert!(draft.is_selected(LocationCategory::Origin, "DPS"));
}

#[test]
fn reset_returns_empty_without_committing() {
    let draft = FilterDraft::open(&committed());
    assert!(draft.can_reset());
    assert_eq!(draft.reset(), Filters::empty());
    assert_eq!(draft.draft(), &committed());
}

#[test]
fn reset_is_unavailable_for_empty_draft() {
    let mut draft = FilterDraft::open(&Filters::empty());
    assert!(!draft.can_reset());
    draft.toggle(LocationCategory::Destination, "PKU");
    assert!(draft.can_reset());
}

#[test]
fn confirm_yields_current_draft() {
    let mut draft = FilterDraft::open(&Filters::empty());
    draft.toggle(LocationCategory::Origin, "MLG");
    draft.toggle(LocationCategory::Destination, "PLB");
    let applied = draft.confirm();
    assert_eq!(
        applied,
        Filters::empty()
            .with(LocationCategory::Origin, "MLG")
            .with(LocationCategory::Destination, "PLB")
    );
}

#[test]
fn visible_options_follow_search_text_and_selection() {
    let mut draft = FilterDraft::open(&committed());
    draft.set_search_text(LocationCategory::Origin, "ja");
    let options = draft.visible_options(LocationCategory::Origin);
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].code, "JKT");
    assert!(options[0].selected);

    assert_eq!(draft.visible_options(LocationCategory::Destination).len(), 5);
    assert_eq!(draft.selected_count(LocationCategory::Destination), 1);
}
