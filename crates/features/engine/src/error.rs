use std::borrow::Cow;
use vanity_catalog::CatalogError;
use vanity_domain::{ChoiceValue, SlotType};
use vanity_session::SessionError;

/// Error types specific to resolving a selection.
///
/// Every variant leaves the selection exactly as it was before the failed request.
#[vanity_derive::vanity_error]
pub enum EngineError {
    #[error("No section for slot '{slot}'{}", format_context(.context))]
    UnknownSlot { slot: SlotType, context: Option<Cow<'static, str>> },

    /// The catalog does not offer this value for the slot.
    #[error("Value '{value}' is not offered for '{slot}'{}", format_context(.context))]
    UnknownValue { slot: SlotType, value: ChoiceValue, context: Option<Cow<'static, str>> },

    /// The value exists but its section or choice is currently hidden.
    #[error("Value '{value}' for '{slot}' is not selectable right now{}", format_context(.context))]
    NotSelectable { slot: SlotType, value: ChoiceValue, context: Option<Cow<'static, str>> },

    /// A rule cascade exceeded the iteration cap; `trail` holds the last slots written.
    #[error(
        "Cycle detected after {iterations} changes, last slots {trail:?}{}",
        format_context(.context)
    )]
    CycleDetected { iterations: usize, trail: Vec<SlotType>, context: Option<Cow<'static, str>> },

    #[error("Session error{}: {source}", format_context(.context))]
    Session { source: SessionError, context: Option<Cow<'static, str>> },

    #[error("Catalog error{}: {source}", format_context(.context))]
    Catalog { source: CatalogError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal engine error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
