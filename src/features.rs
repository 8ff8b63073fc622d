//! Feature availability probing.
//!
//! The embedding application decides which optional subsystems exist. The
//! log summary widget asks for the `dblog` feature before touching the log
//! store.

use std::collections::BTreeSet;

/// Feature name gating the database log store.
pub const DBLOG_FEATURE: &str = "dblog";

/// Module/feature availability check supplied by the embedding application.
pub trait FeatureProbe {
    fn exists(&self, feature: &str) -> bool;
}

/// Fixed feature set, typically read from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticFeatureSet {
    features: BTreeSet<String>,
}

impl StaticFeatureSet {
    pub fn new<I, S>(features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            features: features.into_iter().map(Into::into).collect(),
        }
    }

    pub fn enable(&mut self, feature: &str) {
        self.features.insert(feature.to_string());
    }
}

impl FeatureProbe for StaticFeatureSet {
    fn exists(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_feature_set() {
        let mut features = StaticFeatureSet::new(["dblog"]);
        assert!(features.exists(DBLOG_FEATURE));
        assert!(!features.exists("search"));

        features.enable("search");
        assert!(features.exists("search"));
    }

    #[test]
    fn test_empty_set_has_nothing() {
        let features = StaticFeatureSet::default();
        assert!(!features.exists(DBLOG_FEATURE));
    }
}
