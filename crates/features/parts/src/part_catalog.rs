use fxhash::FxHashMap;
use std::collections::BTreeMap;
use tracing::debug;
use vanity_catalog::vanity;
use vanity_domain::{ChoiceMap, ChoiceValue, PartRecord, SlotType};

/// Slots that contribute geometry, in scene order.
pub const RENDERABLE: [SlotType; 7] = [
    SlotType::Color,
    SlotType::Insert,
    SlotType::Worktop,
    SlotType::Basin,
    SlotType::Tap,
    SlotType::Handle,
    SlotType::Stand,
];

/// Static lookup table from choice value to part.
#[derive(Debug, Clone, Default)]
pub struct PartCatalog {
    records: FxHashMap<ChoiceValue, PartRecord>,
}

impl PartCatalog {
    #[must_use]
    pub fn new(records: impl IntoIterator<Item = (ChoiceValue, PartRecord)>) -> Self {
        Self { records: records.into_iter().collect() }
    }

    /// Parts for every value the built-in vanity catalog can render.
    #[must_use]
    pub fn vanity() -> Self {
        let mut records = Vec::new();

        for breadth in vanity::BREADTHS {
            for width in vanity::WIDTHS.into_iter().filter(|&w| vanity::offered(breadth, w)) {
                for finish in vanity::FINISHES {
                    let finish_tex = format!("textures/finish/{}.ktx2", finish.to_lowercase());
                    records.push((
                        vanity::color_value(breadth, width, finish),
                        PartRecord::new(format!("cabinet/body-{breadth}x{width}.glb"))
                            .texture(finish_tex)
                            .param("roughness", if finish == "OAK" { 0.7 } else { 0.35 }),
                    ));
                }
            }
        }

        for width in vanity::WIDTHS {
            for material in vanity::INSERT_MATERIALS {
                let glass = material.starts_with("GLASS");
                records.push((
                    vanity::insert_value(width, material),
                    PartRecord::new(format!("top/insert-{width}.glb"))
                        .texture(format!("textures/insert/{}.ktx2", material.to_lowercase()))
                        .param("transmission", if glass { 0.9 } else { 0.0 }),
                ));
            }
            for material in vanity::WORKTOP_MATERIALS {
                records.push((
                    vanity::worktop_value(width, material),
                    PartRecord::new(format!("top/worktop-{width}.glb"))
                        .texture(format!("textures/worktop/{}.ktx2", material.to_lowercase())),
                ));
            }
        }

        for model in ["OVAL", "SQUARE"] {
            for size in ["S", "L"] {
                let lower = model.to_lowercase();
                records.push((
                    ChoiceValue::Text(format!("BSN-{model}-{size}")),
                    PartRecord::new(format!("basin/{lower}-{}.glb", size.to_lowercase())),
                ));
            }
        }

        let taps = [("8201", "CHROME"), ("8201", "BLACK"), ("8202", "CHROME"), ("8202", "BLACK"), ("8203", "CHROME")];
        for (model, finish) in taps {
            let metallic = if finish == "CHROME" { 1.0 } else { 0.2 };
            records.push((
                ChoiceValue::Text(format!("TAP-{model}-{finish}")),
                PartRecord::new(format!("tap/{model}.glb")).param("metallic", metallic),
            ));
        }

        for (value, asset) in [
            ("HDL-BAR-CHROME", "handle/bar.glb"),
            ("HDL-BAR-BLACK", "handle/bar.glb"),
            ("HDL-KNOB-OAK", "handle/knob.glb"),
            ("STAND-FLOOR-CHROME", "stand/floor.glb"),
            ("STAND-FLOOR-BLACK", "stand/floor.glb"),
        ] {
            let finish = value.rsplit('-').next().unwrap_or_default().to_lowercase();
            records.push((
                ChoiceValue::text(value),
                PartRecord::new(asset).texture(format!("textures/metal/{finish}.ktx2")),
            ));
        }

        Self::new(records)
    }

    #[must_use]
    pub fn get(&self, value: &ChoiceValue) -> Option<&PartRecord> {
        self.records.get(value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Parts for the current value of every renderable slot.
    ///
    /// Slots that are empty, `none`, or have no record are absent from the result.
    #[must_use]
    pub fn resolve(&self, choices: &ChoiceMap) -> BTreeMap<SlotType, &PartRecord> {
        RENDERABLE
            .into_iter()
            .filter_map(|slot| {
                let value = choices.selected(slot)?;
                let record = self.records.get(value);
                if record.is_none() {
                    debug!(slot = %slot, value = %value, "No part record");
                }
                record.map(|record| (slot, record))
            })
            .collect()
    }
}
