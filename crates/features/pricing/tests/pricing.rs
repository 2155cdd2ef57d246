use proptest::prelude::*;
use std::sync::Arc;
use vanity_catalog::vanity;
use vanity_domain::config::EngineConfig;
use vanity_domain::{Amount, Category, ChoiceValue, SlotType};
use vanity_engine::Configurator;
use vanity_pricing::{LineItem, line_items, price};

fn configurator() -> Configurator {
    Configurator::new(Arc::new(vanity::catalog().unwrap()), EngineConfig::default()).unwrap()
}

#[test]
fn default_selection_is_priced_per_line() {
    let cfg = configurator();
    let items = line_items(cfg.choices());

    assert_eq!(
        items,
        vec![
            LineItem { category: Category::CABINET, amount: Amount::from_major(309) },
            LineItem { category: Category::TOP, amount: Amount::from_major(89) },
            LineItem { category: Category::TAP, amount: Amount::from_major(99) },
            LineItem { category: Category::HANDLE, amount: Amount::from_major(24) },
            LineItem { category: Category::STAND, amount: Amount::from_major(79) },
        ]
    );
    assert_eq!(price(cfg.choices(), Category::TOTAL), Amount::from_major(309 + 89 + 99 + 24 + 79));
}

#[test]
fn shallower_body_only_changes_the_cabinet_line() {
    let mut cfg = configurator();
    let fittings = Category::TOP | Category::BASIN | Category::TAP | Category::HANDLE | Category::STAND;
    let before = price(cfg.choices(), fittings);

    cfg.request_change(SlotType::Breadth, 40).unwrap();

    assert_eq!(price(cfg.choices(), Category::CABINET), Amount::from_major(289));
    assert_eq!(price(cfg.choices(), fittings), before);
    assert_eq!(price(cfg.choices(), Category::TOTAL), Amount::from_major(289) + before);
}

#[test]
fn large_tap_on_a_countertop() {
    let mut cfg = configurator();
    cfg.request_change(SlotType::Top, vanity::COUNTER_TOP).unwrap();
    cfg.request_change(SlotType::Tap, "TAP-8202-BLACK").unwrap();

    assert_eq!(price(cfg.choices(), Category::TAP), Amount::from_major(149));
    // 46x60 counter top: oak slab plus the compact oval basin.
    assert_eq!(price(cfg.choices(), Category::TOP), Amount::from_major(119));
    assert_eq!(price(cfg.choices(), Category::BASIN), Amount::from_major(149));
}

#[test]
fn marble_slab_costs_more_than_oak() {
    let mut cfg = configurator();
    cfg.request_change(SlotType::Top, vanity::COUNTER_TOP).unwrap();
    let oak = price(cfg.choices(), Category::TOP);

    cfg.request_change(SlotType::Worktop, vanity::worktop_value(60, "MARBLE")).unwrap();

    assert_eq!(oak, Amount::from_major(119));
    assert_eq!(price(cfg.choices(), Category::TOP), Amount::from_major(189));
}

#[test]
fn wall_hung_cabinets_pay_no_stand() {
    let mut cfg = configurator();
    cfg.request_change(SlotType::Stand, ChoiceValue::None).unwrap();
    assert_eq!(price(cfg.choices(), Category::STAND), Amount::ZERO);
    assert!(line_items(cfg.choices()).iter().all(|item| item.category != Category::STAND));
}

fn request() -> impl Strategy<Value = (SlotType, ChoiceValue)> {
    let catalog = vanity::catalog().unwrap();
    let offered: Vec<_> = catalog
        .sections()
        .iter()
        .flat_map(|section| section.all_choices().map(move |c| (section.slot, c.value.clone())))
        .collect();
    prop::sample::select(offered)
}

proptest! {
    #[test]
    fn total_is_the_sum_of_disjoint_lines(requests in prop::collection::vec(request(), 0..16)) {
        let mut cfg = configurator();
        for (slot, value) in requests {
            let _ = cfg.request_change(slot, value);
        }

        let total = price(cfg.choices(), Category::TOTAL);
        let by_line: Amount = Category::LINES.iter().map(|line| price(cfg.choices(), *line)).sum();
        let by_items: Amount = line_items(cfg.choices()).iter().map(|item| item.amount).sum();

        prop_assert_eq!(total, by_line);
        prop_assert_eq!(total, by_items);
    }
}

#[test]
fn line_items_serialize_as_category_bits_and_cents() {
    let cfg = configurator();
    let json = serde_json::to_value(line_items(cfg.choices())).unwrap();

    assert_eq!(json[0], serde_json::json!({ "category": 1, "amount": 30_900 }));
    assert_eq!(json[4]["category"], Category::STAND.bits());
}
