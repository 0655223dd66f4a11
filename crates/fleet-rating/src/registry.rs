//! Criterion → factory registry.

use std::collections::BTreeMap;

use crate::{AmountDeliveredRaterFactory, InTimeRaterFactory, Rater, RaterFactory, RatingCriterion};

/// At most one [`RaterFactory`] per [`RatingCriterion`].
///
/// `Default` registers both built-in raters with their default parameters;
/// [`new`](Self::new) starts empty.
pub struct RaterRegistry {
    factories: BTreeMap<RatingCriterion, Box<dyn RaterFactory>>,
}

impl RaterRegistry {
    pub fn new() -> Self {
        Self { factories: BTreeMap::new() }
    }

    /// Register `factory` under its criterion, replacing any earlier one.
    pub fn with(mut self, factory: impl RaterFactory + 'static) -> Self {
        self.register(factory);
        self
    }

    pub fn register(&mut self, factory: impl RaterFactory + 'static) {
        self.factories.insert(factory.criterion(), Box::new(factory));
    }

    pub fn get(&self, criterion: RatingCriterion) -> Option<&dyn RaterFactory> {
        self.factories.get(&criterion).map(|f| f.as_ref())
    }

    /// Registered criteria in ascending order.
    pub fn criteria(&self) -> impl Iterator<Item = RatingCriterion> + '_ {
        self.factories.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// One fresh rater per registered criterion, in criterion order.
    pub fn create_all(&self) -> Vec<Box<dyn Rater>> {
        self.factories.values().map(|f| f.create()).collect()
    }
}

impl Default for RaterRegistry {
    fn default() -> Self {
        Self::new()
            .with(InTimeRaterFactory::default())
            .with(AmountDeliveredRaterFactory)
    }
}
