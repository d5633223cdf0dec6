use pageguard_core::{Effect, replay};
use pageguard_model::{GuardError, GuardSettings, PageFixture};

const PRODUCTS_PAGE: &str = r#"
[[links]]
id = "edit-1"
href = "/products/edit/1"
text = "Редактировать"

[[links]]
id = "edit-2"
href = "/products/edit/2"
text = "Редактировать"

[[buttons]]
id = "cancel"
class = "btn btn-secondary"
text = "Отмена"

[[forms]]
id = "product"
action = "/products/edit/1"

[[forms.fields]]
id = "name"
label = "Наименование"
required = true

[[forms.fields]]
id = "price"
label = "Цена"
type = "number"
min = "0"
value = "-5"

[[forms]]
id = "delete-2"
action = "/products/delete/2"

[[gestures]]
action = "click"
target = "edit-1"

[[gestures]]
action = "click"
target = "edit-2"

[[gestures]]
action = "submit"
target = "product"

[[gestures]]
action = "set_value"
target = "name"
value = "Стул"

[[gestures]]
action = "set_value"
target = "price"
value = "1500"

[[gestures]]
action = "submit"
target = "product"

[[gestures]]
action = "click"
target = "cancel"

[[gestures]]
action = "click"
target = "edit-2"

[[gestures]]
action = "submit"
target = "delete-2"
confirm = false

[[gestures]]
action = "submit"
target = "delete-2"
confirm = true
"#;

#[test]
fn replays_a_full_editing_session() {
    let fixture = PageFixture::from_toml_str(PRODUCTS_PAGE).unwrap();
    let log = replay(&fixture, GuardSettings::default()).unwrap();

    assert_eq!(log.wiring.edit_links, 2);
    assert_eq!(log.wiring.cancel_controls, 1);
    assert_eq!(log.wiring.forms, 2);
    assert_eq!(log.wiring.destructive_forms, 1);

    let effects: Vec<&Effect> = log.steps.iter().map(|step| &step.effect).collect();
    assert_eq!(
        effects,
        vec![
            &Effect::Navigated("/products/edit/1".to_string()),
            &Effect::Suppressed,
            &Effect::Suppressed,
            &Effect::ValueChanged,
            &Effect::ValueChanged,
            &Effect::Submitted("/products/edit/1".to_string()),
            &Effect::Activated("#cancel".to_string()),
            &Effect::Navigated("/products/edit/2".to_string()),
            &Effect::Suppressed,
            &Effect::Submitted("/products/delete/2".to_string()),
        ]
    );

    assert_eq!(log.steps[1].alerts.len(), 1);
    assert_eq!(
        log.steps[2].alerts,
        vec!["Поле \"Цена\" должно быть в диапазоне от 0 до бесконечности".to_string()]
    );
    // Submitting the edit form keeps the lock until cancel is clicked.
    assert!(log.steps[5].edit_lock_held);
    assert!(!log.steps[6].edit_lock_held);
    assert_eq!(log.steps[8].prompts.len(), 1);

    assert_eq!(log.navigations(), vec!["/products/edit/1", "/products/edit/2"]);
    assert_eq!(
        log.submissions(),
        vec!["/products/edit/1", "/products/delete/2"]
    );
    assert_eq!(
        log.borders,
        vec![
            ("#name".to_string(), "#ddd".to_string()),
            ("#price".to_string(), "#ddd".to_string()),
        ]
    );

    let stats = log.stats;
    assert_eq!(stats.edits_opened, 2);
    assert_eq!(stats.edits_blocked, 1);
    assert_eq!(stats.submissions_suppressed, 1);
    assert_eq!(stats.destructive_declined, 1);
}

#[test]
fn unknown_gesture_target_is_an_error() {
    let fixture = PageFixture::from_toml_str(
        r#"
        [[gestures]]
        action = "click"
        target = "nowhere"
        "#,
    )
    .unwrap();
    let err = replay(&fixture, GuardSettings::default()).unwrap_err();
    assert!(matches!(err, GuardError::UnknownElement(id) if id == "nowhere"));
}

#[test]
fn replay_log_serializes_effects() {
    let fixture = PageFixture::from_toml_str(PRODUCTS_PAGE).unwrap();
    let log = replay(&fixture, GuardSettings::default()).unwrap();
    let json = serde_json::to_value(&log).unwrap();
    assert_eq!(json["steps"][0]["effect"]["kind"], "navigated");
    assert_eq!(json["steps"][0]["effect"]["target"], "/products/edit/1");
    assert_eq!(json["steps"][1]["effect"]["kind"], "suppressed");
    assert_eq!(json["steps"][0]["gesture"]["action"], "click");
}

#[test]
fn replay_log_carries_validation_findings() {
    let fixture = PageFixture::from_toml_str(PRODUCTS_PAGE).unwrap();
    let log = replay(&fixture, GuardSettings::default()).unwrap();
    let json = serde_json::to_value(&log).unwrap();

    // Clicks and declined deletes never reach the validator.
    assert!(json["steps"][0]["dispatch"]["validation"].is_null());
    assert!(json["steps"][8]["dispatch"]["validation"].is_null());

    let rejected = &json["steps"][2]["dispatch"]["validation"];
    assert_eq!(rejected["valid"], false);
    assert_eq!(rejected["issues"][0]["RequiredEmpty"]["field"], "#name");
    assert_eq!(rejected["issues"][1]["OutOfRange"]["label"], "Цена");
    assert_eq!(rejected["issues"][1]["OutOfRange"]["violation"], "BelowMinimum");
    assert_eq!(
        rejected["markers"],
        serde_json::json!([["#name", "error"], ["#price", "error"]])
    );

    assert!(log.steps[6].validation().is_none());
    let accepted = &json["steps"][5]["dispatch"]["validation"];
    assert_eq!(accepted["valid"], true);
    assert_eq!(accepted["issues"], serde_json::json!([]));
}
