//! Ordered container-selection strategies.
//!
//! Retailers ship several page layouts at once. A chain tries each strategy
//! in order and stops at the first one that finds at least one container.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

type Finder = dyn for<'a> Fn(&'a Html) -> Option<Vec<ElementRef<'a>>> + Send + Sync;

/// A named way of locating product containers in a document.
pub struct ContainerStrategy {
    name: &'static str,
    find: Box<Finder>,
}

impl ContainerStrategy {
    /// Creates a strategy from an arbitrary finder.
    pub fn new<F>(name: &'static str, find: F) -> Self
    where
        F: for<'a> Fn(&'a Html) -> Option<Vec<ElementRef<'a>>> + Send + Sync + 'static,
    {
        Self { name, find: Box::new(find) }
    }

    /// Strategy that matches every element for a CSS selector.
    pub fn css(name: &'static str, selector: &'static LazyLock<Selector>) -> Self {
        Self::new(name, move |document| {
            let found: Vec<_> = document.select(selector).collect();
            (!found.is_empty()).then_some(found)
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Debug for ContainerStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerStrategy").field("name", &self.name).finish()
    }
}

/// Strategies evaluated in priority order.
#[derive(Debug, Default)]
pub struct SelectorChain {
    strategies: Vec<ContainerStrategy>,
}

impl SelectorChain {
    pub fn new(strategies: Vec<ContainerStrategy>) -> Self {
        Self { strategies }
    }

    /// Returns the containers from the first strategy that finds any, with its name.
    ///
    /// Later strategies are not evaluated once one succeeds.
    pub fn first_match<'a>(&self, document: &'a Html) -> Option<(&'static str, Vec<ElementRef<'a>>)> {
        self.strategies.iter().find_map(|strategy| {
            let found = (strategy.find)(document)?;
            (!found.is_empty()).then_some((strategy.name, found))
        })
    }

    /// Strategy names in evaluation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(ContainerStrategy::name).collect()
    }
}
