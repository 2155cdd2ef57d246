//! The built-in vanity cabinet catalog.
//!
//! Section order is the resolution order: size first, then the body finish that depends on it,
//! then the top and everything mounted on it.

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::predicate::{Predicate, ValueMatch};
use crate::rule::TransitionRule;
use crate::section::{Choice, ChoiceGroup, Section};
use vanity_domain::{ChoiceMap, ChoiceValue, SlotType};

/// Cabinet depths in centimetres.
pub const BREADTHS: [i64; 2] = [40, 46];
/// Cabinet widths in centimetres.
pub const WIDTHS: [i64; 4] = [60, 80, 100, 120];
/// Body finishes, in picker order.
pub const FINISHES: [&str; 3] = ["WHITE", "OAK", "ANTHRACITE"];
/// Insert basin materials, in picker order.
pub const INSERT_MATERIALS: [&str; 3] = ["CERAMIC", "GLASS-CLEAR", "GLASS-SATIN"];
/// Counter top slab materials.
pub const WORKTOP_MATERIALS: [&str; 2] = ["OAK", "MARBLE"];

pub const INSERT_BASIN: &str = "insert-basin";
pub const COUNTER_TOP: &str = "counter-top";

/// Whether the cabinet body is produced in this size.
#[must_use]
pub const fn offered(breadth: i64, width: i64) -> bool {
    !(breadth == 40 && width == 120)
}

/// Width a body falls back to when `width` is not produced at `breadth`: the widest
/// narrower size that is.
#[must_use]
pub fn fallback_width(breadth: i64, width: i64) -> Option<i64> {
    if offered(breadth, width) {
        return Some(width);
    }
    WIDTHS.iter().rev().copied().find(|&w| w < width && offered(breadth, w))
}

#[must_use]
pub fn color_value(breadth: i64, width: i64, finish: &str) -> ChoiceValue {
    ChoiceValue::Text(format!("VC-{breadth}-{width}-{finish}"))
}

#[must_use]
pub fn insert_value(width: i64, material: &str) -> ChoiceValue {
    ChoiceValue::Text(format!("INS-{width}-{material}"))
}

#[must_use]
pub fn worktop_value(width: i64, material: &str) -> ChoiceValue {
    ChoiceValue::Text(format!("WT-{width}-{material}"))
}

/// Starting selection of a new session.
#[must_use]
pub fn defaults() -> ChoiceMap {
    [
        (SlotType::Breadth, ChoiceValue::Number(46)),
        (SlotType::Width, ChoiceValue::Number(60)),
        (SlotType::Top, ChoiceValue::text(INSERT_BASIN)),
    ]
    .into_iter()
    .collect()
}

/// Builds and validates the built-in catalog.
///
/// # Errors
/// Returns [`CatalogError::InvalidCatalog`] only if the tables above are edited inconsistently.
pub fn catalog() -> Result<Catalog, CatalogError> {
    Catalog::new(
        vec![breadth(), width(), color(), top(), insert(), worktop(), basin(), tap(), handle(), stand()],
        defaults(),
    )
}

fn on_top(kind: &str) -> Predicate {
    Predicate::equals(SlotType::Top, kind)
}

fn glass_insert() -> Predicate {
    Predicate::matches(SlotType::Insert, ValueMatch::family("GLASS"))
}

/// Rules moving a width-sized choice to the same product in every other width.
fn follow_width(current: i64, sized: impl Fn(i64) -> ChoiceValue) -> Vec<TransitionRule> {
    WIDTHS
        .iter()
        .filter(|&&w| w != current)
        .map(|&w| TransitionRule::on(SlotType::Width).when(ValueMatch::exact(w)).set(sized(w)))
        .collect()
}

fn breadth() -> Section {
    Section::new(SlotType::Breadth, "Depth")
        .choices(BREADTHS.map(|b| Choice::new(b).label(format!("{b} cm"))))
}

fn width() -> Section {
    Section::new(SlotType::Width, "Width").choices(WIDTHS.map(|w| {
        let choice = Choice::new(w).label(format!("{w} cm"));
        if offered(40, w) {
            return choice;
        }
        // Shrinking the depth moves an unavailable width to the nearest produced one.
        let fallbacks = BREADTHS.iter().filter(|&&b| !offered(b, w)).filter_map(|&b| {
            fallback_width(b, w)
                .map(|to| TransitionRule::on(SlotType::Breadth).when(ValueMatch::exact(b)).set(to))
        });
        choice.visible_when(Predicate::equals(SlotType::Breadth, 46)).rules(fallbacks)
    }))
}

fn color() -> Section {
    let mut groups = Vec::new();
    for b in BREADTHS {
        for w in WIDTHS.into_iter().filter(|&w| offered(b, w)) {
            let choices = FINISHES.map(|finish| {
                // Each rule only applies while the other dimension still matches this body, so
                // a width fallback caused by a depth change cannot retarget the finish twice.
                let across_breadths =
                    BREADTHS.iter().filter(|&&other| other != b).filter_map(|&other| {
                        fallback_width(other, w).map(|to| {
                            TransitionRule::on(SlotType::Breadth)
                                .when(ValueMatch::exact(other))
                                .only_if(Predicate::equals(SlotType::Width, w))
                                .set(color_value(other, to, finish))
                        })
                    });
                let across_widths = WIDTHS
                    .iter()
                    .filter(|&&other| other != w && offered(b, other))
                    .map(|&other| {
                        TransitionRule::on(SlotType::Width)
                            .when(ValueMatch::exact(other))
                            .only_if(Predicate::equals(SlotType::Breadth, b))
                            .set(color_value(b, other, finish))
                    });
                Choice::new(color_value(b, w, finish))
                    .label(finish.to_lowercase())
                    .rules(across_breadths.chain(across_widths))
            });
            let visible = Predicate::all([
                Predicate::equals(SlotType::Breadth, b),
                Predicate::equals(SlotType::Width, w),
            ]);
            groups.push(ChoiceGroup::new(format!("{b}x{w}"), visible).choices(choices));
        }
    }
    Section::new(SlotType::Color, "Finish").groups(groups)
}

fn top() -> Section {
    let countertop_hidden = Predicate::all([
        Predicate::equals(SlotType::Breadth, 40),
        Predicate::equals(SlotType::Width, 80),
    ]);
    Section::new(SlotType::Top, "Top").choices([
        Choice::new(INSERT_BASIN).label("Insert basin"),
        Choice::new(COUNTER_TOP).label("Countertop").visible_when(Predicate::negate(countertop_hidden)),
    ])
}

fn insert() -> Section {
    let groups = WIDTHS.map(|w| {
        ChoiceGroup::new(format!("{w}"), Predicate::equals(SlotType::Width, w)).choices(
            INSERT_MATERIALS.map(|material| {
                Choice::new(insert_value(w, material))
                    .rules(follow_width(w, |other| insert_value(other, material)))
            }),
        )
    });
    Section::new(SlotType::Insert, "Insert basin").visible_when(on_top(INSERT_BASIN)).groups(groups)
}

fn worktop() -> Section {
    let groups = WIDTHS.map(|w| {
        ChoiceGroup::new(format!("{w}"), Predicate::equals(SlotType::Width, w)).choices(
            WORKTOP_MATERIALS.map(|material| {
                Choice::new(worktop_value(w, material))
                    .rules(follow_width(w, |other| worktop_value(other, material)))
            }),
        )
    });
    Section::new(SlotType::Worktop, "Countertop").visible_when(on_top(COUNTER_TOP)).groups(groups)
}

fn basin() -> Section {
    let sized = |model: &str, compact: bool| {
        let (own, other, other_widths) =
            if compact { ("S", "L", [100_i64, 120]) } else { ("L", "S", [60_i64, 80]) };
        Choice::new(format!("BSN-{model}-{own}")).rules(other_widths.map(|w| {
            TransitionRule::on(SlotType::Width)
                .when(ValueMatch::exact(w))
                .set(format!("BSN-{model}-{other}"))
        }))
    };
    Section::new(SlotType::Basin, "Basin").visible_when(on_top(COUNTER_TOP)).groups([
        ChoiceGroup::new("compact", Predicate::one_of(SlotType::Width, [60_i64, 80]))
            .choices([sized("OVAL", true), sized("SQUARE", true)]),
        ChoiceGroup::new("wide", Predicate::one_of(SlotType::Width, [100_i64, 120]))
            .choices([sized("OVAL", false), sized("SQUARE", false)]),
    ])
}

fn tap() -> Section {
    // 8202 is the tall mixer for sit-on basins; it drops back to 8201 in the same finish.
    let tall = |finish: &str| {
        Choice::new(format!("TAP-8202-{finish}"))
            .visible_when(on_top(COUNTER_TOP))
            .rule(
                TransitionRule::on(SlotType::Top)
                    .when(ValueMatch::exact(INSERT_BASIN))
                    .set(format!("TAP-8201-{finish}")),
            )
    };
    Section::new(SlotType::Tap, "Tap").choices([
        Choice::new("TAP-8201-CHROME"),
        Choice::new("TAP-8201-BLACK"),
        Choice::new("TAP-8203-CHROME"),
        tall("CHROME"),
        tall("BLACK"),
    ])
}

fn handle() -> Section {
    Section::new(SlotType::Handle, "Handle").choices([
        Choice::new("HDL-BAR-CHROME"),
        Choice::new("HDL-BAR-BLACK"),
        Choice::new("HDL-KNOB-OAK"),
        Choice::new(ChoiceValue::None).label("No handle"),
    ])
}

fn stand() -> Section {
    // Glass inserts are wall-hung only.
    let no_glass = Predicate::negate(glass_insert());
    Section::new(SlotType::Stand, "Stand")
        .rule(
            TransitionRule::on(SlotType::Insert).when(ValueMatch::family("GLASS")).preserve_if_null(),
        )
        .choices([
            Choice::new("STAND-FLOOR-CHROME").visible_when(no_glass.clone()),
            Choice::new("STAND-FLOOR-BLACK").visible_when(no_glass),
            Choice::new(ChoiceValue::None).label("Wall-hung"),
        ])
}
