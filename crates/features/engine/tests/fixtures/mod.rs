#![allow(dead_code)]

use std::sync::Arc;
use vanity_catalog::{Catalog, Choice, Section, TransitionRule, ValueMatch, vanity};
use vanity_domain::config::EngineConfig;
use vanity_domain::{ChoiceMap, SlotType};
use vanity_engine::Configurator;

pub fn builtin() -> Arc<Catalog> {
    Arc::new(vanity::catalog().unwrap())
}

pub fn configurator() -> Configurator {
    Configurator::new(builtin(), EngineConfig::default()).unwrap()
}

/// Two sections whose choice rules chase each other: stand `Y` flips handle to `B`, which
/// flips stand to `X`, which flips handle back to `A`, and so on.
pub fn ping_pong() -> Arc<Catalog> {
    let handle = Section::new(SlotType::Handle, "Handle").choices([
        Choice::new("A").rule(TransitionRule::on(SlotType::Stand).when(ValueMatch::exact("Y")).set("B")),
        Choice::new("B").rule(TransitionRule::on(SlotType::Stand).when(ValueMatch::exact("X")).set("A")),
    ]);
    let stand = Section::new(SlotType::Stand, "Stand").choices([
        Choice::new("X").rule(TransitionRule::on(SlotType::Handle).when(ValueMatch::exact("A")).set("Y")),
        Choice::new("Y").rule(TransitionRule::on(SlotType::Handle).when(ValueMatch::exact("B")).set("X")),
    ]);
    Arc::new(Catalog::new(vec![handle, stand], ChoiceMap::new()).unwrap())
}
