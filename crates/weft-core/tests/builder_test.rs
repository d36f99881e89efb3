use weft_core::{Action, UpdateError, UpdateSet};

#[test]
fn empty_set_is_valid_starting_value() {
    let updates = UpdateSet::new();
    assert!(updates.is_empty());
    assert_eq!(updates.len(), 0);
}

#[test]
fn with_records_identifier_verbatim() {
    let updates = UpdateSet::new().replace("load").with("index :: load").unwrap();

    let op = updates.iter().next().unwrap();
    assert_eq!(op.action(), Action::Replace);
    assert_eq!(op.target(), "load");
    assert_eq!(op.fragment(), "index :: load");
}

#[test]
fn within_template_reuses_target_as_region() {
    let updates = UpdateSet::new().append("pings").within_template("index").unwrap();

    let op = updates.iter().next().unwrap();
    assert_eq!(op.fragment(), "index :: pings");
}

#[test]
fn within_template_rejects_empty_template() {
    let result = UpdateSet::new().append("pings").within_template("  ");
    assert_eq!(result.unwrap_err(), UpdateError::EmptyTemplate);
}

#[test]
fn with_fragment_requires_separator() {
    let result = UpdateSet::new().append("list").with_fragment("no-separator");
    assert_eq!(
        result.unwrap_err(),
        UpdateError::InvalidFragment("no-separator".to_string())
    );

    assert!(UpdateSet::new()
        .append("list")
        .with_fragment("tpl :: region")
        .is_ok());
}

#[test]
fn empty_target_fails_before_recording_anything() {
    assert_eq!(
        UpdateSet::new().replace("").with("index").unwrap_err(),
        UpdateError::EmptyTarget
    );
    assert_eq!(
        UpdateSet::new().remove(" ").unwrap_err(),
        UpdateError::EmptyTarget
    );
}

#[test]
fn empty_fragment_is_rejected() {
    assert_eq!(
        UpdateSet::new().update("load").with("").unwrap_err(),
        UpdateError::EmptyFragment
    );
    assert_eq!(
        UpdateSet::new().update("load").with_fragment(" ").unwrap_err(),
        UpdateError::EmptyFragment
    );
}

#[test]
fn remove_seals_immediately() {
    let updates = UpdateSet::new().remove("todo-42").unwrap();

    assert_eq!(updates.len(), 1);
    let op = updates.iter().next().unwrap();
    assert_eq!(op.action(), Action::Remove);
    assert!(op.is_remove());
    assert_eq!(op.target(), "todo-42");
}

#[test]
fn insertion_order_is_preserved() {
    let updates = UpdateSet::new()
        .append("a").with("x")
        .unwrap()
        .replace("b").with("y")
        .unwrap();

    let targets: Vec<_> = updates.iter().map(|op| op.target()).collect();
    assert_eq!(targets, vec!["a", "b"]);
}

#[test]
fn builder_steps_never_mutate_prior_sets() {
    let base = UpdateSet::new().append("a").with("x").unwrap();

    let left = base.replace("b").with("y").unwrap();
    let right = base.remove("c").unwrap();

    assert_eq!(base.len(), 1);
    assert_eq!(left.len(), 2);
    assert_eq!(right.len(), 2);
    assert_eq!(right.iter().nth(1).unwrap().target(), "c");
}
