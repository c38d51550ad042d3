//! The closed allow-list of names an expression may refer to.

mod exponential;
mod rounding;
mod trigonometry;

use crate::error::{EvalError, Result};
use std::collections::HashMap;
use std::sync::LazyLock;

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::build);

/// A pure single-argument function guarded by a domain predicate.
#[derive(Debug, Clone, Copy)]
pub struct UnaryFunction {
    pub domain: fn(f64) -> bool,
    pub apply: fn(f64) -> f64,
}

impl UnaryFunction {
    /// Checks `argument` against the domain, applies the function, and
    /// rejects any non-finite result. `name` is only used for the error.
    pub fn call(&self, name: &str, argument: f64) -> Result<f64> {
        if !(self.domain)(argument) {
            return Err(EvalError::domain(name, argument));
        }

        let result = (self.apply)(argument);
        if result.is_finite() {
            Ok(result)
        } else {
            Err(EvalError::domain(name, argument))
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Entry {
    Constant(f64),
    Function(UnaryFunction),
}

/// Name table built once per process and never modified afterwards.
#[derive(Debug)]
pub struct Registry {
    entries: HashMap<&'static str, Entry>,
}

impl Registry {
    pub fn global() -> &'static Registry {
        &REGISTRY
    }

    fn build() -> Self {
        let mut registry = Self {
            entries: HashMap::new(),
        };

        registry.insert_constant("pi", std::f64::consts::PI);
        registry.insert_constant("e", std::f64::consts::E);
        trigonometry::register(&mut registry);
        exponential::register(&mut registry);
        rounding::register(&mut registry);

        registry
    }

    fn insert_constant(&mut self, name: &'static str, value: f64) {
        self.entries.insert(name, Entry::Constant(value));
    }

    fn insert_function(
        &mut self,
        name: &'static str,
        domain: fn(f64) -> bool,
        apply: fn(f64) -> f64,
    ) {
        self.entries
            .insert(name, Entry::Function(UnaryFunction { domain, apply }));
    }

    pub fn lookup(&self, name: &str) -> Option<Entry> {
        self.entries.get(name).copied()
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

pub fn lookup(name: &str) -> Option<Entry> {
    Registry::global().lookup(name)
}

fn unrestricted(_: f64) -> bool {
    true
}
