use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Free-form session annotations: any JSON value per key.
pub type Metadata = BTreeMap<String, serde_json::Value>;

// Postcard cannot decode self-describing values, so compact encodings carry the map as
// JSON text.

pub(crate) fn serialize<S>(metadata: &Metadata, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if serializer.is_human_readable() {
        return metadata.serialize(serializer);
    }
    let text = serde_json::to_string(metadata).map_err(S::Error::custom)?;
    serializer.serialize_str(&text)
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Metadata, D::Error>
where
    D: Deserializer<'de>,
{
    if deserializer.is_human_readable() {
        return Metadata::deserialize(deserializer);
    }
    let text = String::deserialize(deserializer)?;
    serde_json::from_str(&text).map_err(D::Error::custom)
}
