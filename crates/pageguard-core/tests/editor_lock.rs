//! Editor-lock guard behavior through the page controller.

use pageguard_core::{Handler, PageController};
use pageguard_model::{EventOutcome, GuardSettings, Locale, NodeId, PageDom};
use proptest::prelude::*;

const NOTICE_RU: &str = "Невозможно открыть более одного окна редактирования одновременно";

struct Page {
    dom: PageDom,
    edits: Vec<NodeId>,
    cancel: NodeId,
    form: NodeId,
}

fn page() -> Page {
    let mut dom = PageDom::new();
    let body = dom.body();
    let edits = (1..=3)
        .map(|i| {
            let href = format!("/products/edit/{i}");
            dom.append_text(body, "a", &[("href", href.as_str())], "Редактировать")
        })
        .collect();
    dom.append_text(body, "a", &[("href", "/products/3")], "Открыть");
    let cancel = dom.append_text(
        body,
        "button",
        &[("id", "cancel"), ("class", "btn btn-secondary")],
        "Отмена",
    );
    let form = dom.append(body, "form", &[("id", "edit"), ("action", "/products/edit/1")]);
    dom.append(form, "input", &[("id", "name"), ("required", ""), ("value", "Chair")]);
    Page {
        dom,
        edits,
        cancel,
        form,
    }
}

#[test]
fn only_the_first_edit_link_navigates() {
    let mut page = page();
    let mut controller = PageController::wire(&page.dom, GuardSettings::default());

    let first = controller.click(&mut page.dom, &page.edits[0]);
    assert!(first.proceeds());
    assert!(controller.is_edit_lock_held());
    assert!(page.dom.take_alert_messages().is_empty());

    for link in &page.edits {
        let again = controller.click(&mut page.dom, link);
        assert!(!again.proceeds());
        assert_eq!(again.ran, vec![(Handler::EditLink, EventOutcome::PreventDefault)]);
        assert_eq!(page.dom.take_alert_messages(), vec![NOTICE_RU.to_string()]);
    }
}

#[test]
fn cancel_releases_the_lock_for_the_next_edit() {
    let mut page = page();
    let mut controller = PageController::wire(&page.dom, GuardSettings::default());

    assert!(controller.click(&mut page.dom, &page.edits[0]).proceeds());
    let cancel = controller.click(&mut page.dom, &page.cancel);
    assert!(cancel.proceeds());
    assert!(!controller.is_edit_lock_held());

    assert!(controller.click(&mut page.dom, &page.edits[1]).proceeds());
    assert!(!controller.click(&mut page.dom, &page.edits[2]).proceeds());
}

#[test]
fn cancel_while_unlocked_is_harmless() {
    let mut page = page();
    let mut controller = PageController::wire(&page.dom, GuardSettings::default());
    assert!(controller.click(&mut page.dom, &page.cancel).proceeds());
    assert!(controller.click(&mut page.dom, &page.edits[0]).proceeds());
}

#[test]
fn successful_edit_submission_keeps_the_lock() {
    let mut page = page();
    let mut controller = PageController::wire(&page.dom, GuardSettings::default());

    assert!(controller.click(&mut page.dom, &page.edits[0]).proceeds());
    assert!(controller.submit(&mut page.dom, &page.form).proceeds());

    // Known gap: nothing but a cancel control frees the lock.
    assert!(controller.is_edit_lock_held());
    assert!(!controller.click(&mut page.dom, &page.edits[1]).proceeds());
}

#[test]
fn non_edit_links_are_not_guarded() {
    let page = page();
    let controller = PageController::wire(&page.dom, GuardSettings::default());
    assert_eq!(controller.summary().edit_links, 3);
}

#[test]
fn marker_attribute_recognizes_cancel_in_any_language() {
    let mut dom = PageDom::new();
    let body = dom.body();
    let edit = dom.append(body, "a", &[("href", "/orders/edit/9")]);
    let close = dom.append_text(body, "button", &[("data-editor-cancel", "")], "Close");
    let stray = dom.append_text(body, "button", &[("class", "btn-secondary")], "Back");

    let mut controller = PageController::wire(&dom, GuardSettings::default());
    assert_eq!(controller.summary().cancel_controls, 1);

    controller.click(&mut dom, &edit);
    controller.click(&mut dom, &stray);
    assert!(controller.is_edit_lock_held());
    controller.click(&mut dom, &close);
    assert!(!controller.is_edit_lock_held());
}

#[test]
fn legacy_label_matching_can_be_turned_off() {
    let mut settings = GuardSettings::default();
    settings.markers.legacy_cancel_label = false;
    let page = page();
    let controller = PageController::wire(&page.dom, settings);
    assert_eq!(controller.summary().cancel_controls, 0);
}

#[test]
fn english_locale_matches_english_cancel_label() {
    let mut dom = PageDom::new();
    let body = dom.body();
    dom.append_text(body, "button", &[("class", "btn-secondary")], "Cancel editing");
    dom.append_text(body, "button", &[("class", "btn-secondary")], "Отмена");
    dom.append_text(body, "button", &[("class", "btn-primary")], "Cancel");

    let mut settings = GuardSettings::default();
    settings.messages.locale = Locale::En;
    let controller = PageController::wire(&dom, settings);
    assert_eq!(controller.summary().cancel_controls, 1);
}

#[test]
fn cancel_label_is_read_at_wiring_time() {
    let mut dom = PageDom::new();
    let body = dom.body();
    let edit = dom.append(body, "a", &[("href", "/edit/1")]);
    let button = dom.append_text(body, "button", &[("class", "btn-secondary")], "Назад");

    let mut controller = PageController::wire(&dom, GuardSettings::default());
    controller.click(&mut dom, &edit);
    // Becoming a cancel control later does not wire it.
    dom.set_attribute(button, "data-editor-cancel", "");
    controller.click(&mut dom, &button);
    assert!(controller.is_edit_lock_held());
}

#[derive(Debug, Clone)]
enum Step {
    Edit(usize),
    Cancel,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (0usize..3).prop_map(Step::Edit),
        1 => Just(Step::Cancel),
    ]
}

proptest! {
    #[test]
    fn lock_allows_one_edit_per_cancel(steps in proptest::collection::vec(step(), 0..40)) {
        let mut page = page();
        let mut controller = PageController::wire(&page.dom, GuardSettings::default());
        let mut open = false;

        for step in steps {
            match step {
                Step::Edit(i) => {
                    let dispatch = controller.click(&mut page.dom, &page.edits[i]);
                    prop_assert_eq!(dispatch.proceeds(), !open);
                    let alerts = page.dom.take_alert_messages();
                    prop_assert_eq!(alerts.len(), usize::from(open));
                    open = true;
                }
                Step::Cancel => {
                    prop_assert!(controller.click(&mut page.dom, &page.cancel).proceeds());
                    open = false;
                }
            }
            prop_assert_eq!(controller.is_edit_lock_held(), open);
        }
    }
}
