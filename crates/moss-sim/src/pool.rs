//! Three-tier message selection.
//!
//! A category resolves against the generated runtime pool first, then
//! the personality's static pool, then the generic static pool. The
//! first tier with a non-empty list wins and a line is drawn uniformly
//! from it. A category absent from all three tiers yields nothing: the
//! creature deliberately says nothing.

use moss_types::{Category, MessagePool, PetState, Personality};
use rand::Rng;

use crate::fallback;

/// Which tier a category resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Generated pool.
    Runtime,
    /// Personality-specific static pool.
    Personality,
    /// Generic static pool.
    Generic,
}

/// Borrowed view over the three pools consulted for one lookup.
#[derive(Debug, Clone, Copy)]
pub struct PoolSelector<'a> {
    runtime: Option<&'a MessagePool>,
    personality: &'a MessagePool,
    generic: &'a MessagePool,
}

impl<'a> PoolSelector<'a> {
    /// Build a selector over explicit pools.
    pub const fn new(
        runtime: Option<&'a MessagePool>,
        personality: &'a MessagePool,
        generic: &'a MessagePool,
    ) -> Self {
        Self {
            runtime,
            personality,
            generic,
        }
    }

    /// Selector for a personality over the built-in static pools.
    pub fn for_personality(runtime: Option<&'a MessagePool>, personality: Personality) -> Self {
        Self::new(
            runtime,
            fallback::personality_pool(personality),
            fallback::generic_pool(),
        )
    }

    /// Selector for a creature's runtime pool and cached personality.
    pub fn for_state(state: &'a PetState) -> Self {
        Self::for_personality(state.runtime_pool.as_ref(), state.personality)
    }

    /// The list a category resolves to, and the tier it came from.
    pub fn resolve(&self, category: Category) -> Option<(Tier, &'a [String])> {
        if let Some(lines) = self.runtime.and_then(|pool| pool.get(category)) {
            return Some((Tier::Runtime, lines));
        }
        if let Some(lines) = self.personality.get(category) {
            return Some((Tier::Personality, lines));
        }
        self.generic
            .get(category)
            .map(|lines| (Tier::Generic, lines))
    }

    /// Draw one line for a category, uniformly from the resolved list.
    pub fn pick<R: Rng + ?Sized>(&self, category: Category, rng: &mut R) -> Option<&'a str> {
        let (_, lines) = self.resolve(category)?;
        let index = rng.random_range(0..lines.len());
        lines.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn pool(entries: Vec<(Category, Vec<&str>)>) -> MessagePool {
        entries
            .into_iter()
            .map(|(category, lines)| (category, lines.into_iter().map(str::to_owned).collect()))
            .collect()
    }

    #[test]
    fn runtime_tier_wins() {
        let runtime = pool(vec![(Category::FeedSuccess, vec!["generated"])]);
        let personality = pool(vec![(Category::FeedSuccess, vec!["static"])]);
        let generic = pool(vec![(Category::FeedSuccess, vec!["generic"])]);
        let selector = PoolSelector::new(Some(&runtime), &personality, &generic);
        let mut rng = SmallRng::seed_from_u64(42);
        assert_eq!(selector.pick(Category::FeedSuccess, &mut rng), Some("generated"));
    }

    #[test]
    fn empty_runtime_list_falls_through() {
        let runtime = pool(vec![(Category::FeedSuccess, vec![])]);
        let personality = pool(vec![(Category::PlayTun, vec!["static"])]);
        let generic = pool(vec![(Category::FeedSuccess, vec!["generic"])]);
        let selector = PoolSelector::new(Some(&runtime), &personality, &generic);
        assert_eq!(
            selector.resolve(Category::FeedSuccess).map(|(tier, _)| tier),
            Some(Tier::Generic)
        );
        assert_eq!(
            selector.resolve(Category::PlayTun).map(|(tier, _)| tier),
            Some(Tier::Personality)
        );
    }

    #[test]
    fn missing_everywhere_says_nothing() {
        let empty = MessagePool::new();
        let selector = PoolSelector::new(None, &empty, &empty);
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(selector.pick(Category::IdleHappy, &mut rng), None);
    }

    #[test]
    fn picks_are_uniform_over_the_list() {
        let lines = pool(vec![(Category::PetSuccess, vec!["a", "b", "c"])]);
        let empty = MessagePool::new();
        let selector = PoolSelector::new(Some(&lines), &empty, &empty);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..200 {
            if let Some(line) = selector.pick(Category::PetSuccess, &mut rng) {
                seen.insert(line);
            }
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn built_in_pools_answer_every_category() {
        let mut rng = SmallRng::seed_from_u64(3);
        for personality in Personality::ALL {
            let selector = PoolSelector::for_personality(None, personality);
            for category in Category::ALL {
                let line = selector.pick(category, &mut rng);
                assert!(line.is_some_and(|l| !l.is_empty()), "{personality}/{category}");
            }
        }
    }
}
