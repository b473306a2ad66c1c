//! Bounded search for alternative recipes
//!
//! Every traversal walks the slots of a recipe, applies one substitution
//! rule per slot and keeps the candidates nobody has seen yet. Only the
//! candidates picked by the [`SeedPolicy`] are expanded further. With the
//! default [`FirstCandidate`] policy, combinations that need a non-first
//! choice on two slots at once are only found if some other path happens
//! to reach them, so the result is "everything this traversal reaches", not
//! the full closure.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::catalog::Catalog;
use crate::config::SearchConfig;
use crate::error::CatalogError;
use crate::models::{Recipe, RecipeKey, Slot};
use crate::operators::{Operators, Tier};

/// Picks which freshly accepted candidates of a slot seed deeper recursion
pub trait SeedPolicy {
    fn seeds<'r>(&self, accepted: &'r [Recipe]) -> &'r [Recipe];
}

/// Recurse into the first accepted candidate of each slot only
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl SeedPolicy for FirstCandidate {
    fn seeds<'r>(&self, accepted: &'r [Recipe]) -> &'r [Recipe] {
        &accepted[..accepted.len().min(1)]
    }
}

/// Recurse into every accepted candidate
#[derive(Debug, Clone, Copy, Default)]
pub struct EveryCandidate;

impl SeedPolicy for EveryCandidate {
    fn seeds<'r>(&self, accepted: &'r [Recipe]) -> &'r [Recipe] {
        accepted
    }
}

struct Frame {
    recipe: Recipe,
    slots: Vec<Slot>,
    next_slot: usize,
    seeds: std::vec::IntoIter<Recipe>,
}

impl Frame {
    fn new(recipe: Recipe) -> Self {
        Self {
            slots: recipe.slots().collect(),
            recipe,
            next_slot: 0,
            seeds: Vec::new().into_iter(),
        }
    }
}

pub struct Explorer<'c> {
    operators: Operators<'c>,
    policy: Box<dyn SeedPolicy>,
    memo: HashMap<(String, u32), Vec<Recipe>>,
}

impl<'c> Explorer<'c> {
    pub fn new(catalog: &'c Catalog, rules: SearchConfig) -> Self {
        Self::with_policy(catalog, rules, Box::new(FirstCandidate))
    }

    pub fn with_policy(
        catalog: &'c Catalog,
        rules: SearchConfig,
        policy: Box<dyn SeedPolicy>,
    ) -> Self {
        Self {
            operators: Operators::new(catalog, rules),
            policy,
            memo: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.operators.catalog()
    }

    /// Same-grade variants reachable from `recipe`
    pub fn sidetier(
        &self,
        recipe: &Recipe,
        capacity: u32,
        visited: &mut HashSet<RecipeKey>,
    ) -> Vec<Recipe> {
        self.search(Tier::Side, recipe, capacity, visited)
    }

    /// Cheaper variants reachable from `recipe` that fit in `capacity`
    pub fn downtier(
        &self,
        recipe: &Recipe,
        capacity: u32,
        visited: &mut HashSet<RecipeKey>,
    ) -> Vec<Recipe> {
        self.search(Tier::Down, recipe, capacity, visited)
    }

    /// Higher-grade variants reachable from `recipe`
    pub fn uptier(
        &self,
        recipe: &Recipe,
        capacity: u32,
        visited: &mut HashSet<RecipeKey>,
    ) -> Vec<Recipe> {
        self.search(Tier::Up, recipe, capacity, visited)
    }

    fn search(
        &self,
        tier: Tier,
        recipe: &Recipe,
        capacity: u32,
        visited: &mut HashSet<RecipeKey>,
    ) -> Vec<Recipe> {
        visited.insert(recipe.key());
        let mut found = Vec::new();
        self.traverse(tier, recipe, capacity, visited, &mut found);
        found
    }

    /// Depth-first walk with an explicit frame stack
    ///
    /// Each frame holds a recipe, the next slot to expand and the seeds of
    /// the last expanded slot that still have to be walked. Seeds are walked
    /// before the next slot is expanded.
    fn traverse(
        &self,
        tier: Tier,
        recipe: &Recipe,
        capacity: u32,
        visited: &mut HashSet<RecipeKey>,
        found: &mut Vec<Recipe>,
    ) {
        let mut stack = vec![Frame::new(recipe.clone())];
        while let Some(frame) = stack.last_mut() {
            if let Some(seed) = frame.seeds.next() {
                stack.push(Frame::new(seed));
                continue;
            }
            let next = frame.slots.get(frame.next_slot).copied();
            let Some(slot) = next else {
                stack.pop();
                continue;
            };
            frame.next_slot += 1;

            let accepted: Vec<Recipe> = self
                .operators
                .apply(tier, slot, &frame.recipe, capacity)
                .into_iter()
                .filter(|candidate| tier != Tier::Down || candidate.total_quantity() <= capacity)
                .filter(|candidate| visited.insert(candidate.key()))
                .collect();

            found.extend(accepted.iter().cloned());
            frame.seeds = self.policy.seeds(&accepted).to_vec().into_iter();
        }
    }

    /// Forget every memoized `generate_all` result
    pub fn clear_memo(&mut self) {
        self.memo.clear();
    }

    /// Every variant of the named recipe reachable within `capacity`
    ///
    /// Uptier and sidetier widen the base recipe first; each widened recipe
    /// is then fanned out by downtier. The base recipe is always first.
    pub fn generate_all(
        &mut self,
        name: &str,
        capacity: u32,
    ) -> Result<Vec<Recipe>, CatalogError> {
        let key = (name.to_string(), capacity);
        if let Some(cached) = self.memo.get(&key) {
            debug!("Using memoized variants for {} @ {}", name, capacity);
            return Ok(cached.clone());
        }

        let base = self.catalog().base_recipe(name)?;

        let mut widened = self.uptier(&base, capacity, &mut HashSet::new());
        widened.extend(self.sidetier(&base, capacity, &mut HashSet::new()));

        let mut seen: HashSet<RecipeKey> = HashSet::from([base.key()]);
        let mut found = vec![base];
        for recipe in widened {
            if !seen.insert(recipe.key()) {
                continue;
            }
            let lower = self.downtier(&recipe, capacity, &mut HashSet::new());
            found.push(recipe);
            for candidate in lower {
                if seen.insert(candidate.key()) {
                    found.push(candidate);
                }
            }
        }

        debug!(
            "Generated {} variants for {} @ capacity {}",
            found.len(),
            name,
            capacity
        );
        self.memo.insert(key, found.clone());
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minimality;
    use crate::sample;
    use crate::testutil::{self, fixture_catalog};
    use rusqlite::Connection;

    fn has_duplicates(recipes: &[Recipe]) -> bool {
        let unique: HashSet<&Recipe> = recipes.iter().collect();
        unique.len() != recipes.len()
    }

    fn sample_catalog() -> Catalog {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_schema(&conn).unwrap();
        sample::load_sample_data(&conn).unwrap();
        Catalog::load(&conn, &Default::default()).unwrap()
    }

    #[test]
    fn test_sidetier_of_base_recipe() {
        let catalog = fixture_catalog();
        let explorer = Explorer::new(&catalog, SearchConfig::default());
        let base = catalog.base_recipe("Tonic").unwrap();

        let variants = explorer.sidetier(&base, 14, &mut HashSet::new());
        assert_eq!(variants.len(), 2);
        assert!(!variants.contains(&base));
    }

    #[test]
    fn test_downtier_fans_out_and_respects_capacity() {
        let catalog = fixture_catalog();
        let explorer = Explorer::new(&catalog, SearchConfig::default());
        let start = testutil::recipe(&catalog, ("Bloodvine", 1), ("Frostleaf", 1), ("Ashbloom", 1));

        let variants = explorer.downtier(&start, 14, &mut HashSet::new());
        assert_eq!(variants.len(), 4);
        assert!(variants.iter().all(|r| r.total_quantity() <= 14));

        // Emberseed x3 plus Dewcap x3 plus the temperature herb needs 7
        let tight = explorer.downtier(&start, 6, &mut HashSet::new());
        assert_eq!(tight.len(), 3);
        assert!(tight.iter().all(|r| r.total_quantity() <= 6));
    }

    #[test]
    fn test_uptier_walks_back_up() {
        let catalog = fixture_catalog();
        let explorer = Explorer::new(&catalog, SearchConfig::default());
        let start = testutil::recipe(&catalog, ("Emberseed", 3), ("Dewcap", 3), ("Mistmoss", 1));
        let base = catalog.base_recipe("Tonic").unwrap();

        let variants = explorer.uptier(&start, 14, &mut HashSet::new());
        assert_eq!(variants.len(), 7);
        assert!(variants.contains(&base));
        assert!(!has_duplicates(&variants));
        assert!(explorer.uptier(&base, 14, &mut HashSet::new()).is_empty());
    }

    #[test]
    fn test_sidetier_splits_primary_at_full_capacity() {
        let catalog = fixture_catalog();
        let explorer = Explorer::new(&catalog, SearchConfig::default());
        let start = testutil::recipe(&catalog, ("Sunroot", 2), ("Frostleaf", 1), ("Mistmoss", 1));

        // Bloodvine x2 under two heat herbs, plus 1+1 splits of Bloodvine and
        // Sunroot each under two temperature herbs
        let variants = explorer.sidetier(&start, 14, &mut HashSet::new());
        assert_eq!(variants.len(), 6);
        let split = variants.iter().filter(|r| r.contains(Slot::Primary2)).count();
        assert_eq!(split, 4);
        assert!(!variants.contains(&start));
        assert!(!has_duplicates(&variants));

        let unsplit = explorer.sidetier(&start, 13, &mut HashSet::new());
        assert_eq!(unsplit.len(), 2);
        assert!(unsplit.iter().all(|r| !r.contains(Slot::Primary2)));
    }

    #[test]
    fn test_visited_set_is_owned_by_the_caller() {
        let catalog = fixture_catalog();
        let explorer = Explorer::new(&catalog, SearchConfig::default());
        let base = catalog.base_recipe("Tonic").unwrap();

        let mut visited = HashSet::new();
        let first = explorer.sidetier(&base, 14, &mut visited);
        assert_eq!(first.len(), 2);
        assert!(explorer.sidetier(&base, 14, &mut visited).is_empty());
        assert_eq!(explorer.sidetier(&base, 14, &mut HashSet::new()), first);
    }

    #[test]
    fn test_generate_all_for_fixture() {
        let catalog = fixture_catalog();
        let mut explorer = Explorer::new(&catalog, SearchConfig::default());
        let base = catalog.base_recipe("Tonic").unwrap();

        let variants = explorer.generate_all("Tonic", 14).unwrap();
        assert_eq!(variants.len(), 7);
        assert_eq!(variants[0], base);
        assert!(variants.iter().all(|r| r.total_quantity() <= 14));
        assert!(!has_duplicates(&variants));
    }

    #[test]
    fn test_generate_all_is_idempotent() {
        let catalog = fixture_catalog();
        let mut explorer = Explorer::new(&catalog, SearchConfig::default());

        let first = explorer.generate_all("Tonic", 14).unwrap();
        let second = explorer.generate_all("Tonic", 14).unwrap();
        let third = Explorer::new(&catalog, SearchConfig::default())
            .generate_all("Tonic", 14)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn test_generate_all_after_clearing_the_memo() {
        let catalog = fixture_catalog();
        let mut explorer = Explorer::new(&catalog, SearchConfig::default());

        let first = explorer.generate_all("Tonic", 14).unwrap();
        explorer.clear_memo();
        assert!(explorer.memo.is_empty());
        let second = explorer.generate_all("Tonic", 14).unwrap();
        assert_eq!(first, second);
        assert_eq!(explorer.memo.len(), 1);
    }

    #[test]
    fn test_downtier_ignores_quantities_that_would_overflow() {
        let catalog = fixture_catalog();
        let explorer = Explorer::new(&catalog, SearchConfig::default());
        let huge = ("Sunroot", 2_000_000_000);
        let recipe = testutil::recipe(&catalog, huge, ("Frostleaf", 1), ("Mistmoss", 1));

        assert!(explorer.downtier(&recipe, 14, &mut HashSet::new()).is_empty());
    }

    #[test]
    fn test_generate_all_unknown_recipe() {
        let catalog = fixture_catalog();
        let mut explorer = Explorer::new(&catalog, SearchConfig::default());
        assert_eq!(
            explorer.generate_all("Panacea", 14),
            Err(CatalogError::NotFound("Panacea".to_string()))
        );
    }

    #[test]
    fn test_every_candidate_policy_finds_at_least_as_much() {
        let catalog = sample_catalog();
        let mut first = Explorer::new(&catalog, SearchConfig::default());
        let mut every =
            Explorer::with_policy(&catalog, SearchConfig::default(), Box::new(EveryCandidate));

        let bounded: HashSet<Recipe> = first
            .generate_all("Expert Healing Elixir", 14)
            .unwrap()
            .into_iter()
            .collect();
        let exhaustive: HashSet<Recipe> = every
            .generate_all("Expert Healing Elixir", 14)
            .unwrap()
            .into_iter()
            .collect();
        assert!(bounded.is_subset(&exhaustive));
    }

    #[test]
    fn test_sample_recipes_stay_within_capacity_without_duplicates() {
        let catalog = sample_catalog();
        let mut explorer = Explorer::new(&catalog, SearchConfig::default());

        for name in ["Greater Healing Elixir", "Bright Heart Elixir", "Azure Heart Elixir"] {
            let variants = explorer.generate_all(name, 14).unwrap();
            assert!(variants.len() > 1, "{} has no variants", name);
            assert!(variants.iter().all(|r| r.total_quantity() <= 14));
            assert!(!has_duplicates(&variants));
        }
    }

    #[test]
    fn test_generate_all_counts_for_sample_recipes() {
        let catalog = sample_catalog();
        let mut explorer = Explorer::new(&catalog, SearchConfig::default());

        let greater = explorer.generate_all("Greater Healing Elixir", 14).unwrap();
        assert_eq!(greater.len(), 1304);
        assert_eq!(minimality::only_minimal(greater).len(), 893);
        assert_eq!(explorer.generate_all("Azure Heart Elixir", 14).unwrap().len(), 180);
        assert_eq!(explorer.generate_all("Expert Healing Elixir", 14).unwrap().len(), 154);
    }

    #[test]
    fn test_sample_downtier_and_sidetier_have_no_duplicates() {
        let catalog = sample_catalog();
        let explorer = Explorer::new(&catalog, SearchConfig::default());
        let recipe = catalog.base_recipe("Greater Healing Elixir").unwrap();

        let lower = explorer.downtier(&recipe, 14, &mut HashSet::new());
        let side = explorer.sidetier(&recipe, 14, &mut HashSet::new());
        assert!(lower.len() > 1);
        assert!(!has_duplicates(&lower));
        assert!(!has_duplicates(&side));
    }
}
