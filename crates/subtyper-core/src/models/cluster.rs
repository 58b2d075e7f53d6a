use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Diabetes subtype assigned by the classifier.
///
/// Variant order is the classifier's class-index order and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Cluster {
    /// Severe autoimmune diabetes.
    Said,
    /// Severe insulin-deficient diabetes.
    Sidd,
    /// Severe insulin-resistant diabetes.
    Sird,
    /// Mild obesity-related diabetes.
    Mod,
    /// Mild age-related diabetes.
    Mard,
}

impl Cluster {
    /// All clusters, indexed by class index.
    pub const ALL: [Cluster; 5] = [
        Cluster::Said,
        Cluster::Sidd,
        Cluster::Sird,
        Cluster::Mod,
        Cluster::Mard,
    ];

    pub fn from_index(index: usize) -> Result<Self, CoreError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(CoreError::UnknownClassIndex { index })
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Cluster::Said => "SAID",
            Cluster::Sidd => "SIDD",
            Cluster::Sird => "SIRD",
            Cluster::Mod => "MOD",
            Cluster::Mard => "MARD",
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Cluster {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| CoreError::UnknownCluster(s.to_string()))
    }
}
