//! Table output for the wire and replay commands.

use std::io::Write;

use comfy_table::{ContentArrangement, Table};

use pageguard_cli::render::{gesture_label, replay_table, stats_table, wiring_table};
use pageguard_core::{PageController, replay};
use pageguard_model::{Gesture, GuardSettings, PageFixture};

const PAGE: &str = r#"
[[links]]
id = "edit-1"
href = "/products/edit/1"

[[buttons]]
id = "cancel"
class = "btn-secondary"
text = "Отмена"

[[forms]]
id = "delete-1"
action = "/products/delete/1"

[[gestures]]
action = "click"
target = "edit-1"

[[gestures]]
action = "click"
target = "edit-1"

[[gestures]]
action = "submit"
target = "delete-1"
confirm = false
"#;

fn plain(mut table: Table) -> String {
    table
        .force_no_tty()
        .set_content_arrangement(ContentArrangement::Disabled);
    table.to_string()
}

#[test]
fn wiring_table_lists_listeners_in_order() {
    let fixture = PageFixture::from_toml_str(PAGE).unwrap();
    let page = fixture.build_page();
    let controller = PageController::wire(&page, GuardSettings::default());

    let rendered = plain(wiring_table(&page, controller.listeners()));
    let rows: Vec<&str> = ["#edit-1", "#cancel", "destructive confirm", "form validation"]
        .into_iter()
        .filter(|needle| rendered.contains(needle))
        .collect();
    assert_eq!(rows.len(), 4, "{rendered}");
    let confirm_at = rendered.find("destructive confirm").unwrap();
    let validate_at = rendered.find("form validation").unwrap();
    assert!(confirm_at < validate_at);
}

#[test]
fn replay_table_shows_suppressed_steps_and_messages() {
    let fixture = PageFixture::from_toml_str(PAGE).unwrap();
    let log = replay(&fixture, GuardSettings::default()).unwrap();

    let rendered = plain(replay_table(&log));
    assert!(rendered.contains("navigate /products/edit/1"), "{rendered}");
    assert!(rendered.contains("suppressed"), "{rendered}");
    assert!(rendered.contains("submit (decline)"), "{rendered}");
    assert!(rendered.contains("destructive confirm: halt"), "{rendered}");
    assert!(rendered.contains("held"), "{rendered}");
}

#[test]
fn stats_table_counts_session_events() {
    let fixture = PageFixture::from_toml_str(PAGE).unwrap();
    let log = replay(&fixture, GuardSettings::default()).unwrap();
    let rendered = plain(stats_table(&log.stats));
    assert!(rendered.contains("edits blocked"));
    assert!(rendered.contains("destructive actions declined"));
}

#[test]
fn gesture_labels() {
    let submit = Gesture::Submit {
        target: "f".to_string(),
        confirm: Some(true),
    };
    let typed = Gesture::SetValue {
        target: "qty".to_string(),
        value: "7".to_string(),
    };
    insta::assert_snapshot!(
        format!("{}\n{}", gesture_label(&submit), gesture_label(&typed)),
        @r#"
    submit (accept)
    set value "7"
    "#
    );
}

#[test]
fn wiring_summary_serializes_counts() {
    let fixture = PageFixture::from_toml_str(PAGE).unwrap();
    let log = replay(&fixture, GuardSettings::default()).unwrap();
    insta::assert_json_snapshot!(log.wiring, @r#"
    {
      "edit_links": 1,
      "cancel_controls": 1,
      "forms": 1,
      "destructive_forms": 1
    }
    "#);
}

#[test]
fn fixture_loads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PAGE.as_bytes()).unwrap();
    let fixture = PageFixture::load(file.path()).unwrap();
    assert_eq!(fixture.gestures.len(), 3);
}

#[test]
fn bundled_products_page_replays() {
    let fixture =
        PageFixture::from_toml_str(include_str!("../pages/products.toml")).unwrap();
    let log = replay(&fixture, GuardSettings::default()).unwrap();
    assert_eq!(log.navigations(), vec!["/products/edit/1"]);
    assert_eq!(log.submissions(), vec!["/products/edit/1"]);
    assert_eq!(
        log.steps[2].alerts,
        vec!["Поле \"Цена\" должно быть в диапазоне от 1 до 100000".to_string()]
    );
    assert!(!log.steps.last().unwrap().edit_lock_held);

    let rendered = plain(replay_table(&log));
    assert!(rendered.contains("below-minimum #price"), "{rendered}");
}
