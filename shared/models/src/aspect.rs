//! Aspect selection for Bill of Material reads.
//!
//! An aspect is one independently fetchable record category. Callers pick the
//! aspects they want through a list of selector names; the list is expanded
//! once, at entry time, into a deduplicated sequence of [`Aspect`] values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Selector name that stands for every aspect.
pub const ALL_SELECTOR: &str = "All";

/// One independently fetchable Bill of Material record category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aspect {
    Header,
    Item,
    ProductDescription,
    Component,
    ComponentDescription,
}

/// Returned when a selector name does not match any aspect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown aspect selector: {0}")]
pub struct UnknownAspect(pub String);

impl Aspect {
    /// Every aspect, in dispatch order.
    pub const ALL: [Aspect; 5] = [
        Aspect::Header,
        Aspect::Item,
        Aspect::ProductDescription,
        Aspect::Component,
        Aspect::ComponentDescription,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Aspect::Header => "Header",
            Aspect::Item => "Item",
            Aspect::ProductDescription => "ProductDescription",
            Aspect::Component => "Component",
            Aspect::ComponentDescription => "ComponentDescription",
        }
    }

    /// OData entity set queried for this aspect.
    pub fn entity_set(&self) -> &'static str {
        match self {
            Aspect::Header | Aspect::ProductDescription => "MaterialBOM",
            Aspect::Item | Aspect::Component | Aspect::ComponentDescription => "MaterialBOMItem",
        }
    }

    /// Whether the aspect decodes into header records (and item records otherwise).
    pub fn returns_headers(&self) -> bool {
        matches!(self, Aspect::Header | Aspect::ProductDescription)
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aspect {
    type Err = UnknownAspect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Aspect::ALL
            .iter()
            .copied()
            .find(|aspect| aspect.as_str() == s)
            .ok_or_else(|| UnknownAspect(s.to_string()))
    }
}

/// Result of expanding a selector list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AspectSelection {
    pub aspects: Vec<Aspect>,
    /// Selector names that matched no aspect. They are dropped from dispatch.
    pub ignored: Vec<String>,
}

impl AspectSelection {
    /// Expands selector names into aspects.
    ///
    /// An empty list, or one that contains [`ALL_SELECTOR`], selects every
    /// aspect. Unknown names are collected in `ignored`; repeated names are
    /// dispatched once, in first-seen order.
    pub fn expand<S: AsRef<str>>(selectors: &[S]) -> Self {
        if selectors.is_empty() || selectors.iter().any(|s| s.as_ref() == ALL_SELECTOR) {
            return Self {
                aspects: Aspect::ALL.to_vec(),
                ignored: Vec::new(),
            };
        }

        let mut selection = Self::default();
        for selector in selectors {
            match selector.as_ref().parse::<Aspect>() {
                Ok(aspect) => {
                    if !selection.aspects.contains(&aspect) {
                        selection.aspects.push(aspect);
                    }
                }
                Err(UnknownAspect(name)) => selection.ignored.push(name),
            }
        }
        selection
    }
}
