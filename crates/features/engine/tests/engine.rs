mod fixtures;

use fixtures::{builtin, configurator, ping_pong};
use vanity_catalog::vanity;
use vanity_domain::config::EngineConfig;
use vanity_domain::{ChoiceValue, SlotType};
use vanity_engine::{Configurator, EngineError};
use vanity_session::SessionDocument;

#[test]
fn shallower_body_retargets_the_finish() {
    let mut cfg = configurator();

    let resolution = cfg.request_change(SlotType::Breadth, 40).unwrap();

    assert_eq!(cfg.choices().get(SlotType::Color), Some(&vanity::color_value(40, 60, "WHITE")));
    assert_eq!(cfg.choices().number(SlotType::Width), Some(60));
    assert_eq!(resolution.touched, vec![SlotType::Breadth, SlotType::Color]);
}

#[test]
fn narrow_countertop_falls_back_to_an_insert_basin() {
    let mut cfg = configurator();
    cfg.request_change(SlotType::Breadth, 40).unwrap();
    cfg.request_change(SlotType::Top, vanity::COUNTER_TOP).unwrap();
    assert_eq!(cfg.choices().get(SlotType::Worktop), Some(&vanity::worktop_value(60, "OAK")));
    assert_eq!(cfg.choices().text(SlotType::Basin), Some("BSN-OVAL-S"));
    assert!(!cfg.choices().contains(SlotType::Insert));

    cfg.request_change(SlotType::Width, 80).unwrap();

    let choices = cfg.choices();
    assert_eq!(choices.text(SlotType::Top), Some(vanity::INSERT_BASIN));
    assert_eq!(choices.get(SlotType::Color), Some(&vanity::color_value(40, 80, "WHITE")));
    assert_eq!(choices.get(SlotType::Insert), Some(&vanity::insert_value(80, "CERAMIC")));
    assert!(!choices.contains(SlotType::Worktop));
    assert!(!choices.contains(SlotType::Basin));
}

#[test]
fn wide_basin_follows_the_width() {
    let mut cfg = configurator();
    cfg.request_change(SlotType::Top, vanity::COUNTER_TOP).unwrap();
    cfg.request_change(SlotType::Basin, "BSN-SQUARE-S").unwrap();

    cfg.request_change(SlotType::Width, 120).unwrap();

    assert_eq!(cfg.choices().text(SlotType::Basin), Some("BSN-SQUARE-L"));
    assert_eq!(cfg.choices().get(SlotType::Worktop), Some(&vanity::worktop_value(120, "OAK")));
    assert_eq!(cfg.choices().get(SlotType::Color), Some(&vanity::color_value(46, 120, "WHITE")));
}

#[test]
fn shallower_wide_body_keeps_finish_and_materials() {
    let mut cfg = configurator();
    cfg.request_change(SlotType::Width, 120).unwrap();
    cfg.request_change(SlotType::Color, vanity::color_value(46, 120, "OAK")).unwrap();
    cfg.request_change(SlotType::Insert, vanity::insert_value(120, "GLASS-SATIN")).unwrap();

    cfg.request_change(SlotType::Breadth, 40).unwrap();

    let choices = cfg.choices();
    assert_eq!(choices.number(SlotType::Width), Some(100));
    assert_eq!(choices.get(SlotType::Color), Some(&vanity::color_value(40, 100, "OAK")));
    assert_eq!(choices.get(SlotType::Insert), Some(&vanity::insert_value(100, "GLASS-SATIN")));
    assert_eq!(choices.get(SlotType::Stand), Some(&ChoiceValue::None));
}

#[test]
fn shallower_wide_countertop_keeps_the_slab_material() {
    let mut cfg = configurator();
    cfg.request_change(SlotType::Top, vanity::COUNTER_TOP).unwrap();
    cfg.request_change(SlotType::Width, 120).unwrap();
    cfg.request_change(SlotType::Worktop, vanity::worktop_value(120, "MARBLE")).unwrap();
    cfg.request_change(SlotType::Basin, "BSN-SQUARE-L").unwrap();

    cfg.request_change(SlotType::Breadth, 40).unwrap();

    let choices = cfg.choices();
    assert_eq!(choices.text(SlotType::Top), Some(vanity::COUNTER_TOP));
    assert_eq!(choices.get(SlotType::Worktop), Some(&vanity::worktop_value(100, "MARBLE")));
    assert_eq!(choices.text(SlotType::Basin), Some("BSN-SQUARE-L"));
    assert_eq!(choices.get(SlotType::Color), Some(&vanity::color_value(40, 100, "WHITE")));
}

#[test]
fn tall_tap_needs_a_countertop() {
    let mut cfg = configurator();
    let err = cfg.request_change(SlotType::Tap, "TAP-8202-BLACK").unwrap_err();
    assert!(matches!(err, EngineError::NotSelectable { slot: SlotType::Tap, .. }));

    cfg.request_change(SlotType::Top, vanity::COUNTER_TOP).unwrap();
    cfg.request_change(SlotType::Tap, "TAP-8202-BLACK").unwrap();
    assert_eq!(cfg.choices().text(SlotType::Tap), Some("TAP-8202-BLACK"));

    cfg.request_change(SlotType::Top, vanity::INSERT_BASIN).unwrap();
    assert_eq!(cfg.choices().text(SlotType::Tap), Some("TAP-8201-BLACK"));
    assert_eq!(cfg.choices().get(SlotType::Insert), Some(&vanity::insert_value(60, "CERAMIC")));
}

#[test]
fn glass_insert_keeps_the_stand_explicitly_empty() {
    let mut cfg = configurator();

    cfg.request_change(SlotType::Insert, vanity::insert_value(60, "GLASS-SATIN")).unwrap();
    assert_eq!(cfg.choices().get(SlotType::Stand), Some(&ChoiceValue::None));

    // The explicit unselection survives once the floor stands are offered again.
    cfg.request_change(SlotType::Insert, vanity::insert_value(60, "CERAMIC")).unwrap();
    assert_eq!(cfg.choices().get(SlotType::Stand), Some(&ChoiceValue::None));
}

#[test]
fn unknown_slot_is_rejected() {
    let mut cfg = Configurator::new(ping_pong(), EngineConfig::default()).unwrap();
    let err = cfg.request_change(SlotType::Tap, "TAP-8201-CHROME").unwrap_err();
    assert!(matches!(err, EngineError::UnknownSlot { slot: SlotType::Tap, .. }));
}

#[test]
fn none_is_only_accepted_where_offered() {
    let mut cfg = configurator();
    let err = cfg.request_change(SlotType::Tap, ChoiceValue::None).unwrap_err();
    assert_eq!(err.kind(), "UnknownValue");

    cfg.request_change(SlotType::Handle, ChoiceValue::None).unwrap();
    assert_eq!(cfg.choices().get(SlotType::Handle), Some(&ChoiceValue::None));
}

#[test]
fn cycles_abort_and_roll_back() {
    let config = EngineConfig { max_iterations: 16, ..EngineConfig::default() };
    let mut cfg = Configurator::new(ping_pong(), config).unwrap();
    assert_eq!(cfg.choices().text(SlotType::Handle), Some("A"));
    assert_eq!(cfg.choices().text(SlotType::Stand), Some("X"));
    let before = cfg.snapshot();

    let err = cfg.request_change(SlotType::Stand, "Y").unwrap_err();

    let EngineError::CycleDetected { iterations, trail, .. } = err else {
        panic!("expected a cycle, got {err}");
    };
    assert_eq!(iterations, 16);
    assert!(trail.contains(&SlotType::Handle) && trail.contains(&SlotType::Stand));
    assert_eq!(cfg.choices(), &before);
}

#[test]
fn rehydrate_restores_and_sanitizes_a_stored_selection() {
    let stored = [
        (SlotType::Breadth, ChoiceValue::Number(40)),
        (SlotType::Width, ChoiceValue::Number(80)),
        (SlotType::Tap, ChoiceValue::text("TAP-9999-GOLD")),
    ]
    .into_iter()
    .collect();
    let json = SessionDocument::new("cfg_saved", "vanity", stored).to_json().unwrap();

    let restored = Configurator::rehydrate(builtin(), EngineConfig::default(), json.as_bytes()).unwrap();

    assert!(restored.fallback.is_none());
    assert_eq!(restored.document.map(|d| d.id), Some("cfg_saved".to_owned()));
    let choices = restored.configurator.choices();
    assert_eq!(choices.number(SlotType::Breadth), Some(40));
    assert_eq!(choices.text(SlotType::Tap), Some("TAP-8201-CHROME"));
    assert_eq!(choices.get(SlotType::Color), Some(&vanity::color_value(40, 80, "WHITE")));
}

#[test]
fn rehydrate_falls_back_to_defaults_for_unreadable_sessions() {
    let restored = Configurator::rehydrate(builtin(), EngineConfig::default(), b"\xff\x00garbage").unwrap();

    assert!(restored.document.is_none());
    assert_eq!(restored.fallback.map(|e| e.kind()), Some("Session"));
    assert_eq!(restored.configurator.choices(), configurator().choices());
}

#[test]
fn binary_sessions_rehydrate_like_json() {
    let mut cfg = configurator();
    cfg.request_change(SlotType::Handle, "HDL-KNOB-OAK").unwrap();
    let bytes = SessionDocument::new("cfg_bin", "vanity", cfg.snapshot()).encode_bin().unwrap();

    let restored = Configurator::rehydrate(builtin(), EngineConfig::default(), &bytes).unwrap();
    assert_eq!(restored.configurator.choices(), cfg.choices());
}

#[test]
fn structured_metadata_does_not_reset_a_session() {
    let stored = [(SlotType::Breadth, ChoiceValue::Number(40))].into_iter().collect();
    let document = SessionDocument::new("cfg_meta", "vanity", stored)
        .with_metadata("leadId", 42)
        .with_metadata("rooms", vec!["guest", "main"]);

    for bytes in [document.to_json().unwrap().into_bytes(), document.encode_bin().unwrap()] {
        let restored = Configurator::rehydrate(builtin(), EngineConfig::default(), &bytes).unwrap();

        assert!(restored.fallback.is_none());
        assert_eq!(restored.configurator.choices().number(SlotType::Breadth), Some(40));
        let metadata = restored.document.map(|d| d.metadata).unwrap_or_default();
        assert_eq!(metadata["leadId"], 42);
        assert_eq!(metadata["rooms"][1], "main");
    }
}
