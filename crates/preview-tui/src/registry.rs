//! Explicit component registry: tag → constructor.
//!
//! Nothing registers itself; `default_registry` lists every built-in
//! component and the App creates what it needs by tag.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::component::Component;
use crate::components::{address_bar, link_preview_card};

pub type Factory = fn() -> Box<dyn Component>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("component tag {0:?} is already registered")]
    Duplicate(String),
    #[error("no component registered under {0:?}")]
    Unknown(String),
}

#[derive(Default)]
pub struct ComponentRegistry {
    factories: BTreeMap<&'static str, Factory>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `tag`.  A tag can only be registered once.
    pub fn register(&mut self, tag: &'static str, factory: Factory) -> Result<(), RegistryError> {
        if self.factories.contains_key(tag) {
            return Err(RegistryError::Duplicate(tag.to_string()));
        }
        self.factories.insert(tag, factory);
        Ok(())
    }

    pub fn create(&self, tag: &str) -> Result<Box<dyn Component>, RegistryError> {
        self.factories
            .get(tag)
            .map(|factory| factory())
            .ok_or_else(|| RegistryError::Unknown(tag.to_string()))
    }

    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }
}

pub fn default_registry() -> Result<ComponentRegistry, RegistryError> {
    let mut registry = ComponentRegistry::new();
    registry.register(link_preview_card::TAG, link_preview_card::create)?;
    registry.register(address_bar::TAG, address_bar::create)?;
    Ok(registry)
}
