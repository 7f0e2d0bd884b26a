//! # Encounter Generation
//!
//! Floor-gated monster selection.
//!
//! Each archetype unlocks at its `min_floor`. Among the unlocked archetypes the
//! n-th one (in catalog order) gets weight n, so every newly unlocked, tougher
//! monster immediately becomes the most likely pick.

use crate::{MonsterArchetype, RandomSource, MONSTER_CATALOG};

/// Archetypes that may spawn on `floor`, in catalog order.
pub fn available_archetypes(floor: u32) -> Vec<&'static MonsterArchetype> {
    MONSTER_CATALOG
        .iter()
        .filter(|archetype| archetype.min_floor <= floor)
        .collect()
}

/// Picks a monster archetype for `floor` by rank-weighted random draw.
///
/// Falls back to the weakest archetype when nothing is unlocked yet (e.g.
/// floor 0).
///
/// # Examples
///
/// ```
/// use descent::{select_archetype, MonsterKind, ScriptedRandom};
///
/// // Only slimes live on the first floor.
/// let mut rng = ScriptedRandom::constant(0.9);
/// assert_eq!(select_archetype(1, &mut rng).kind, MonsterKind::Slime);
/// ```
pub fn select_archetype<R: RandomSource + ?Sized>(
    floor: u32,
    rng: &mut R,
) -> &'static MonsterArchetype {
    let candidates = available_archetypes(floor);
    let Some(last) = candidates.last().copied() else {
        return &MONSTER_CATALOG[0];
    };

    let weights: Vec<f64> = (1..=candidates.len()).map(|rank| rank as f64).collect();
    let total: f64 = weights.iter().sum();
    let mut remaining = rng.next_float() * total;

    for (archetype, weight) in candidates.iter().zip(&weights) {
        remaining -= weight;
        if remaining <= 0.0 {
            return *archetype;
        }
    }

    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_rng, MonsterKind, ScriptedRandom};
    use std::collections::HashMap;

    #[test]
    fn test_available_archetypes_by_floor() {
        assert!(available_archetypes(0).is_empty());
        assert_eq!(available_archetypes(1).len(), 1);
        assert_eq!(available_archetypes(3).len(), 2);
        assert_eq!(available_archetypes(4).len(), 3);
        assert_eq!(available_archetypes(50).len(), 4);
    }

    #[test]
    fn test_floor_zero_falls_back_to_weakest() {
        let mut rng = ScriptedRandom::constant(0.99);
        assert_eq!(select_archetype(0, &mut rng).kind, MonsterKind::Slime);
    }

    #[test]
    fn test_cumulative_weight_boundaries() {
        // Floor 2: slime weight 1, goblin weight 2, total 3.
        let mut low = ScriptedRandom::constant(0.3); // 0.9 -> slime
        let mut high = ScriptedRandom::constant(0.34); // 1.02 -> goblin
        assert_eq!(select_archetype(2, &mut low).kind, MonsterKind::Slime);
        assert_eq!(select_archetype(2, &mut high).kind, MonsterKind::Goblin);

        // Floor 7: weights 1,2,3,4, total 10; 9.5 lands on the dragon.
        let mut top = ScriptedRandom::constant(0.95);
        assert_eq!(select_archetype(7, &mut top).kind, MonsterKind::Dragon);
    }

    #[test]
    fn test_never_selects_locked_archetype() {
        let mut rng = create_rng(17);
        for floor in 1..10 {
            for _ in 0..200 {
                let archetype = select_archetype(floor, &mut rng);
                assert!(archetype.min_floor <= floor);
            }
        }
    }

    #[test]
    fn test_tougher_archetypes_are_more_likely() {
        let mut rng = create_rng(2024);
        let mut counts: HashMap<MonsterKind, u32> = HashMap::new();
        for _ in 0..4000 {
            *counts.entry(select_archetype(7, &mut rng).kind).or_default() += 1;
        }
        // Expected shares 10%, 20%, 30%, 40%.
        assert!(counts[&MonsterKind::Dragon] > counts[&MonsterKind::Orc]);
        assert!(counts[&MonsterKind::Orc] > counts[&MonsterKind::Goblin]);
        assert!(counts[&MonsterKind::Goblin] > counts[&MonsterKind::Slime]);
    }
}
