use fxhash::FxHashMap;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;
use vanity_domain::{Amount, Category, ChoiceMap, SlotType};

const COUNTER_TOP: &str = "counter-top";

static VANITY: LazyLock<PriceList> = LazyLock::new(PriceList::vanity);

type Lookup = fn(&PriceList, &ChoiceMap) -> Option<Amount>;

const LOOKUPS: [(Category, Lookup); 6] = [
    (Category::CABINET, PriceList::cabinet),
    (Category::TOP, PriceList::top),
    (Category::BASIN, PriceList::basin),
    (Category::TAP, PriceList::tap),
    (Category::HANDLE, PriceList::handle),
    (Category::STAND, PriceList::stand),
];

/// One priced category of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub category: Category,
    pub amount: Amount,
}

/// Lookup tables for every priced category.
///
/// Lookups that miss contribute [`Amount::ZERO`]; pricing never fails.
#[derive(Debug, Clone, Default)]
pub struct PriceList {
    /// Cabinet body by `(breadth, width)`.
    cabinets: FxHashMap<(i64, i64), Amount>,
    /// Insert basin by material suffix.
    inserts: FxHashMap<String, Amount>,
    /// Counter top slab by `(width, material)`.
    worktops: FxHashMap<(i64, String), Amount>,
    /// Sit-on basin surcharge by model; only charged on counter tops.
    basins: FxHashMap<String, Amount>,
    /// Tap tiers as `(model family, price)`; the first family contained in the value wins.
    taps: Vec<(String, Amount)>,
    /// Handle by family prefix.
    handles: Vec<(String, Amount)>,
    stand: Amount,
}

impl PriceList {
    /// The vanity price tables, in major currency units.
    #[must_use]
    pub fn vanity() -> Self {
        let cabinets = [
            ((40, 60), 289),
            ((40, 80), 329),
            ((40, 100), 379),
            ((46, 60), 309),
            ((46, 80), 349),
            ((46, 100), 399),
            ((46, 120), 459),
        ];
        let inserts = [("CERAMIC", 89), ("GLASS-CLEAR", 129), ("GLASS-SATIN", 139)];
        let worktops = [
            ((60, "OAK"), 119),
            ((80, "OAK"), 149),
            ((100, "OAK"), 179),
            ((120, "OAK"), 209),
            ((60, "MARBLE"), 189),
            ((80, "MARBLE"), 229),
            ((100, "MARBLE"), 269),
            ((120, "MARBLE"), 309),
        ];
        let basins = [("BSN-OVAL-S", 149), ("BSN-SQUARE-S", 159), ("BSN-OVAL-L", 179), ("BSN-SQUARE-L", 189)];

        Self {
            cabinets: cabinets.into_iter().map(|(size, p)| (size, Amount::from_major(p))).collect(),
            inserts: named(inserts).collect(),
            worktops: worktops
                .into_iter()
                .map(|((w, material), p)| ((w, material.to_owned()), Amount::from_major(p)))
                .collect(),
            basins: named(basins).collect(),
            // 8202 is the large tier regardless of finish.
            taps: named([("8202", 149), ("8203", 189), ("8201", 99)]).collect(),
            handles: named([("HDL-BAR", 24), ("HDL-KNOB", 18)]).collect(),
            stand: Amount::from_major(79),
        }
    }

    /// Price of `choices` restricted to `mask`; [`Category::TOTAL`] prices everything.
    #[must_use]
    pub fn price(&self, choices: &ChoiceMap, mask: Category) -> Amount {
        Category::LINES
            .into_iter()
            .filter(|line| mask.includes(*line))
            .map(|line| self.line(choices, line))
            .sum()
    }

    /// Nonzero categories in line-item order; their amounts sum to the total.
    #[must_use]
    pub fn line_items(&self, choices: &ChoiceMap) -> Vec<LineItem> {
        Category::LINES
            .into_iter()
            .map(|category| LineItem { category, amount: self.line(choices, category) })
            .filter(|item| item.amount != Amount::ZERO)
            .collect()
    }

    fn line(&self, choices: &ChoiceMap, category: Category) -> Amount {
        let amount = LOOKUPS
            .iter()
            .find(|(line, _)| *line == category)
            .and_then(|(_, lookup)| lookup(self, choices));
        amount.unwrap_or_else(|| {
            debug!(category = category.label(), "No price for the current selection");
            Amount::ZERO
        })
    }

    fn cabinet(&self, choices: &ChoiceMap) -> Option<Amount> {
        let breadth = choices.number(SlotType::Breadth)?;
        let width = choices.number(SlotType::Width)?;
        self.cabinets.get(&(breadth, width)).copied()
    }

    fn top(&self, choices: &ChoiceMap) -> Option<Amount> {
        let insert = choices
            .text(SlotType::Insert)
            .and_then(sized)
            .and_then(|(_, material)| self.inserts.get(material).copied());
        let worktop = choices
            .text(SlotType::Worktop)
            .and_then(sized)
            .and_then(|(width, material)| self.worktops.get(&(width, material.to_owned())).copied());

        match (insert, worktop) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or_default() + b.unwrap_or_default()),
        }
    }

    fn basin(&self, choices: &ChoiceMap) -> Option<Amount> {
        if choices.text(SlotType::Top) != Some(COUNTER_TOP) {
            return None;
        }
        choices.text(SlotType::Basin).and_then(|basin| self.basins.get(basin).copied())
    }

    fn tap(&self, choices: &ChoiceMap) -> Option<Amount> {
        let tap = choices.text(SlotType::Tap)?;
        self.taps.iter().find(|(family, _)| tap.contains(family.as_str())).map(|(_, amount)| *amount)
    }

    fn handle(&self, choices: &ChoiceMap) -> Option<Amount> {
        let handle = choices.text(SlotType::Handle)?;
        self.handles.iter().find(|(prefix, _)| handle.starts_with(prefix.as_str())).map(|(_, amount)| *amount)
    }

    fn stand(&self, choices: &ChoiceMap) -> Option<Amount> {
        choices.selected(SlotType::Stand).map(|_| self.stand)
    }
}

/// Prices `choices` against the built-in vanity tables.
#[must_use]
pub fn price(choices: &ChoiceMap, mask: Category) -> Amount {
    VANITY.price(choices, mask)
}

/// Line items of `choices` against the built-in vanity tables.
#[must_use]
pub fn line_items(choices: &ChoiceMap) -> Vec<LineItem> {
    VANITY.line_items(choices)
}

/// Splits `PREFIX-<width>-<material>`; the material may itself contain dashes.
fn sized(value: &str) -> Option<(i64, &str)> {
    let mut parts = value.splitn(3, '-');
    let width = parts.nth(1)?.parse().ok()?;
    Some((width, parts.next()?))
}

fn named<const N: usize>(rows: [(&str, u64); N]) -> impl Iterator<Item = (String, Amount)> {
    rows.into_iter().map(|(name, p)| (name.to_owned(), Amount::from_major(p)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vanity_domain::ChoiceValue;

    fn map(pairs: &[(SlotType, ChoiceValue)]) -> ChoiceMap {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn cabinet_is_keyed_by_size() {
        let choices = map(&[(SlotType::Breadth, 40.into()), (SlotType::Width, 60.into())]);
        assert_eq!(price(&choices, Category::CABINET), Amount::from_major(289));

        let unknown = map(&[(SlotType::Breadth, 40.into()), (SlotType::Width, 120.into())]);
        assert_eq!(price(&unknown, Category::CABINET), Amount::ZERO);
    }

    #[test]
    fn tap_tier_ignores_the_finish() {
        let chrome = map(&[(SlotType::Tap, "TAP-8202-CHROME".into())]);
        let black = map(&[(SlotType::Tap, "TAP-8202-BLACK".into())]);
        assert_eq!(price(&chrome, Category::TAP), Amount::from_major(149));
        assert_eq!(price(&chrome, Category::TAP), price(&black, Category::TAP));
        assert_eq!(price(&map(&[(SlotType::Tap, "TAP-8201-BLACK".into())]), Category::TAP), Amount::from_major(99));
    }

    #[test]
    fn basin_surcharge_needs_a_counter_top() {
        let mut choices = map(&[(SlotType::Basin, "BSN-OVAL-S".into())]);
        assert_eq!(price(&choices, Category::BASIN), Amount::ZERO);

        choices.set(SlotType::Top, COUNTER_TOP.into());
        assert_eq!(price(&choices, Category::BASIN), Amount::from_major(149));
    }

    #[test]
    fn explicit_none_costs_nothing() {
        let choices = map(&[(SlotType::Stand, ChoiceValue::None), (SlotType::Handle, ChoiceValue::None)]);
        assert_eq!(price(&choices, Category::TOTAL), Amount::ZERO);
        assert!(line_items(&choices).is_empty());
    }

    #[test]
    fn insert_material_may_contain_dashes() {
        let choices = map(&[(SlotType::Insert, "INS-80-GLASS-SATIN".into())]);
        assert_eq!(price(&choices, Category::TOP), Amount::from_major(139));
    }

    #[test]
    fn worktop_is_keyed_by_width_and_material() {
        let oak = map(&[(SlotType::Worktop, "WT-120-OAK".into())]);
        let marble = map(&[(SlotType::Worktop, "WT-120-MARBLE".into())]);
        assert_eq!(price(&oak, Category::TOP), Amount::from_major(209));
        assert_eq!(price(&marble, Category::TOP), Amount::from_major(309));

        let unknown = map(&[(SlotType::Worktop, "WT-120-GRANITE".into())]);
        assert_eq!(price(&unknown, Category::TOP), Amount::ZERO);
        assert_eq!(sized("WT-abc-OAK"), None);
    }

    #[test]
    fn combined_masks_add_their_lines() {
        let choices = map(&[(SlotType::Handle, "HDL-KNOB-OAK".into()), (SlotType::Stand, "STAND-FLOOR-BLACK".into())]);
        assert_eq!(price(&choices, Category::HANDLE | Category::STAND), Amount::from_major(18 + 79));
    }
}
