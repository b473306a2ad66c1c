//! Data models for herbs, recipes and elixirs

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

/// Highest herb grade in the game
pub const MAX_GRADE: u8 = 6;

/// How many herbs of the grade below replace one herb of the given grade
///
/// T6 herbs can be replaced by 6 T5, T5 by 5 T4 and so on. Grade 2 herbs
/// go to 3 T1, not 2.
pub fn substitution_ratio(grade: u8) -> Option<u32> {
    match grade {
        6 => Some(6),
        5 => Some(5),
        4 => Some(4),
        3 => Some(3),
        2 => Some(3),
        _ => None,
    }
}

/// Market price of a single herb of the given grade
///
/// Grades outside 1 to 6 have no price; the catalog refuses recipes that use
/// such a herb.
pub fn unit_price(grade: u8) -> Option<u64> {
    match grade {
        1 => Some(3),
        2 => Some(12),
        3 => Some(135),
        4 => Some(1440),
        5 => Some(13500),
        6 => Some(81000),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ingredient {
    pub name: String,
    pub grade: u8,
    pub primary: String,
    pub secondary: String,
    pub temperature: String,
}

impl Ingredient {
    /// The categorical property that governs substitution in `slot`
    pub fn property_for(&self, slot: Slot) -> &str {
        match slot.base() {
            Slot::Temperature => &self.temperature,
            Slot::Secondary | Slot::Secondary2 => &self.secondary,
            Slot::Primary | Slot::Primary2 => &self.primary,
        }
    }

    /// Whether any of the three properties equals `property`
    pub fn has_property(&self, property: &str) -> bool {
        self.primary == property || self.secondary == property || self.temperature == property
    }
}

/// Position of an ingredient in a recipe
///
/// The declaration order is the canonical slot order used for iteration and
/// for the recipe key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Primary,
    Primary2,
    Secondary,
    Secondary2,
    Temperature,
}

impl Slot {
    pub const ALL: [Slot; 5] = [
        Slot::Primary,
        Slot::Primary2,
        Slot::Secondary,
        Slot::Secondary2,
        Slot::Temperature,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Slot::Primary => "Primary",
            Slot::Primary2 => "Primary 2",
            Slot::Secondary => "Secondary",
            Slot::Secondary2 => "Secondary 2",
            Slot::Temperature => "Temperature",
        }
    }

    /// The slot a split half belongs to (`Primary 2` -> `Primary`)
    pub fn base(self) -> Slot {
        match self {
            Slot::Primary2 => Slot::Primary,
            Slot::Secondary2 => Slot::Secondary,
            other => other,
        }
    }

    /// The second half created when this slot is split
    pub fn split_half(self) -> Option<Slot> {
        match self {
            Slot::Primary => Some(Slot::Primary2),
            Slot::Secondary => Some(Slot::Secondary2),
            _ => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slot::ALL
            .into_iter()
            .find(|slot| slot.label() == s.trim())
            .ok_or_else(|| format!("unknown slot '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotEntry {
    pub ingredient: Arc<Ingredient>,
    pub quantity: u32,
}

impl SlotEntry {
    pub fn new(ingredient: Arc<Ingredient>, quantity: u32) -> Self {
        Self {
            ingredient,
            quantity,
        }
    }
}

/// Canonical, hashable form of a recipe: sorted `(slot, herb, quantity)` tuples
pub type RecipeKey = Vec<(Slot, String, u32)>;

/// A named assignment of slots to herbs
///
/// Equality and hashing only look at the slot assignments, never the name or
/// the order slots were added in.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub name: String,
    slots: BTreeMap<Slot, SlotEntry>,
}

impl Recipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: BTreeMap::new(),
        }
    }

    /// Builder form of [`Recipe::with`]
    pub fn slot(mut self, slot: Slot, ingredient: Arc<Ingredient>, quantity: u32) -> Self {
        self.slots.insert(slot, SlotEntry::new(ingredient, quantity));
        self
    }

    /// A copy of this recipe with `slot` bound to `entry`
    pub fn with(&self, slot: Slot, entry: SlotEntry) -> Self {
        let mut recipe = self.clone();
        recipe.slots.insert(slot, entry);
        recipe
    }

    /// A copy of this recipe without `slot`
    pub fn without(&self, slot: Slot) -> Self {
        let mut recipe = self.clone();
        recipe.slots.remove(&slot);
        recipe
    }

    pub fn get(&self, slot: Slot) -> Option<&SlotEntry> {
        self.slots.get(&slot)
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.slots.keys().copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = (Slot, &SlotEntry)> {
        self.slots.iter().map(|(slot, entry)| (*slot, entry))
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Total number of herbs the recipe consumes, saturating at `u32::MAX`
    pub fn total_quantity(&self) -> u32 {
        self.slots
            .values()
            .fold(0u32, |total, e| total.saturating_add(e.quantity))
    }

    pub fn distinct_ingredients(&self) -> usize {
        self.slots
            .values()
            .map(|e| e.ingredient.name.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn key(&self) -> RecipeKey {
        self.slots
            .iter()
            .map(|(slot, entry)| (*slot, entry.ingredient.name.clone(), entry.quantity))
            .collect()
    }
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl Eq for Recipe {}

impl Hash for Recipe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slots.hash(state);
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries()
            .map(|(slot, entry)| {
                if slot == Slot::Temperature {
                    format!(
                        "{}: {}x T{} {}",
                        slot, entry.quantity, entry.ingredient.grade, entry.ingredient.temperature
                    )
                } else {
                    format!("{}: {}x {}", slot, entry.quantity, entry.ingredient.name)
                }
            })
            .collect();
        f.write_str(&parts.join("\t"))
    }
}

/// Market data for a finished elixir
#[derive(Debug, Clone, PartialEq)]
pub struct ElixirInfo {
    pub name: String,
    pub grade: u8,
    pub value: u64,
    pub effect: String,
}

/// One row of a stored recipe, before herb names are resolved
#[derive(Debug, Clone)]
pub struct RecipeSlotRow {
    pub recipe_name: String,
    pub slot: String,
    pub quantity: u32,
    pub ingredient_name: String,
}
