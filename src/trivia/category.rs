use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use itertools::Itertools;
use rand::seq::IteratorRandom;
use rand::Rng;
use serde::Deserialize;

/// Menu entry standing in for "pick one for me".
pub const RANDOM_CATEGORY_ID: u32 = 8;
pub const RANDOM_CATEGORY_NAME: &str = "Random";

/// Category ids the trivia service actually serves.
pub const CATEGORY_IDS: RangeInclusive<u32> = 9..=32;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

impl Category {
    pub fn random() -> Self {
        Self {
            id: RANDOM_CATEGORY_ID,
            name: RANDOM_CATEGORY_NAME.to_string(),
        }
    }

    pub fn is_random(&self) -> bool {
        self.id == RANDOM_CATEGORY_ID
    }
}

/// Categories offered for the next round: the fetched ones plus "Random",
/// without anything already played, sorted by name.
pub fn category_menu(fetched: &[Category], crossed: &BTreeSet<u32>) -> Vec<Category> {
    fetched
        .iter()
        .filter(|c| !c.is_random())
        .cloned()
        .chain(std::iter::once(Category::random()))
        .filter(|c| !crossed.contains(&c.id))
        .sorted_by_key(|c| c.name.to_lowercase())
        .collect()
}

/// Pick a playable category id that has not been used yet.
pub fn resolve_random<R: Rng + ?Sized>(crossed: &BTreeSet<u32>, rng: &mut R) -> Option<u32> {
    CATEGORY_IDS
        .filter(|id| !crossed.contains(id))
        .choose(rng)
}

/// The concrete category id to play for a menu choice.
pub fn resolve_choice<R: Rng + ?Sized>(
    choice: &Category,
    crossed: &BTreeSet<u32>,
    rng: &mut R,
) -> Option<u32> {
    if choice.is_random() {
        resolve_random(crossed, rng)
    } else if crossed.contains(&choice.id) {
        None
    } else {
        Some(choice.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fetched() -> Vec<Category> {
        vec![
            Category {
                id: 21,
                name: "Sports".to_string(),
            },
            Category {
                id: 9,
                name: "General Knowledge".to_string(),
            },
            Category {
                id: 23,
                name: "History".to_string(),
            },
        ]
    }

    #[test]
    fn test_menu_adds_random_and_sorts() {
        let menu = category_menu(&fetched(), &BTreeSet::new());
        let names: Vec<&str> = menu.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["General Knowledge", "History", "Random", "Sports"]);
    }

    #[test]
    fn test_menu_hides_crossed() {
        let crossed = BTreeSet::from([21, 9]);
        let menu = category_menu(&fetched(), &crossed);
        let ids: Vec<u32> = menu.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![23, RANDOM_CATEGORY_ID]);
    }

    #[test]
    fn test_random_never_returns_crossed_or_sentinel() {
        let mut rng = StdRng::seed_from_u64(42);
        let crossed: BTreeSet<u32> = (9..=30).collect();
        for _ in 0..50 {
            let id = resolve_random(&crossed, &mut rng).unwrap();
            assert!(id == 31 || id == 32);
        }
    }

    #[test]
    fn test_random_exhausted() {
        let mut rng = StdRng::seed_from_u64(1);
        let crossed: BTreeSet<u32> = CATEGORY_IDS.collect();
        assert_eq!(resolve_random(&crossed, &mut rng), None);
    }

    #[test]
    fn test_resolve_choice() {
        let mut rng = StdRng::seed_from_u64(3);
        let crossed = BTreeSet::from([21]);
        let sports = fetched().remove(0);
        let history = fetched().remove(2);

        assert_eq!(resolve_choice(&sports, &crossed, &mut rng), None);
        assert_eq!(resolve_choice(&history, &crossed, &mut rng), Some(23));

        let id = resolve_choice(&Category::random(), &crossed, &mut rng).unwrap();
        assert!(CATEGORY_IDS.contains(&id));
        assert_ne!(id, 21);
    }
}
