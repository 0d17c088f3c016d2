//! Elemental affinity categories for spawned creatures

use serde::{Deserialize, Serialize};

/// Elemental affinity assignable to a creature
///
/// `None` marks a creature that has not been through elemental
/// assignment yet. Resolution never produces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    None,
    Fire,
    Frost,
    Nature,
    Thunder,
}

/// The four real elements, in the order every weighted walk uses
pub const REAL_ELEMENTS: [Element; 4] = [
    Element::Fire,
    Element::Frost,
    Element::Nature,
    Element::Thunder,
];

impl Element {
    /// Parse a configuration selector into a real element
    ///
    /// Matching is case-insensitive. The sentinel is not addressable
    /// from configuration, so `"none"` returns `None` like any other
    /// unknown selector.
    pub fn from_key(key: &str) -> Option<Element> {
        REAL_ELEMENTS
            .iter()
            .find(|e| key.eq_ignore_ascii_case(e.key()))
            .copied()
    }

    /// Configuration key for this element
    pub fn key(&self) -> &'static str {
        match self {
            Element::None => "none",
            Element::Fire => "fire",
            Element::Frost => "frost",
            Element::Nature => "nature",
            Element::Thunder => "thunder",
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Element::None => "Unaligned",
            Element::Fire => "Fire",
            Element::Frost => "Frost",
            Element::Nature => "Nature",
            Element::Thunder => "Thunder",
        }
    }
}
