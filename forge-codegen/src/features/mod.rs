//! Feature composers and the registry that maps feature ids to them.

mod notifications;

use std::collections::BTreeMap;

use botforge_fragments::FragmentStore;
use botforge_request::{FeatureId, GenerationRequest};
pub use notifications::NotificationsComposer;

use crate::{Diagnostic, Result};

/// Code a composer adds to the bot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contribution {
    /// Appended to the `__init__` body.
    pub init: String,
    /// Appended after the class skeleton (extra methods).
    pub body: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Produces the code for one feature.
pub trait FeatureComposer {
    /// The feature this composer implements.
    fn feature(&self) -> FeatureId;

    /// Build the feature's contribution for `request`.
    fn compose(
        &self,
        request: &GenerationRequest,
        store: &dyn FragmentStore,
    ) -> Result<Contribution>;
}

/// Composers keyed by feature id, iterated in ascending id order.
pub struct ComposerRegistry {
    composers: BTreeMap<FeatureId, Box<dyn FeatureComposer>>,
}

impl ComposerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            composers: BTreeMap::new(),
        }
    }

    /// A registry with every composer botforge ships.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NotificationsComposer);
        registry
    }

    /// Register a composer, replacing any previous one for the same feature.
    pub fn register(&mut self, composer: impl FeatureComposer + 'static) -> &mut Self {
        self.composers.insert(composer.feature(), Box::new(composer));
        self
    }

    pub fn get(&self, feature: FeatureId) -> Option<&dyn FeatureComposer> {
        self.composers.get(&feature).map(|c| &**c)
    }

    pub fn contains(&self, feature: FeatureId) -> bool {
        self.composers.contains_key(&feature)
    }

    /// Registered feature ids in ascending order.
    pub fn features(&self) -> impl Iterator<Item = FeatureId> + '_ {
        self.composers.keys().copied()
    }
}

impl Default for ComposerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
