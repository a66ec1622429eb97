use crate::error::GenesisError;
use crate::functions::{
    primitives::{And, AndNot, Not, NotAnd, Or, Parity, Xor2},
    traits::Primitive,
};
use rand::Rng;
use std::sync::Arc;

/// Named pool of primitive functions gates draw from.
///
/// Insertion order is preserved so that a seeded RNG picks the same
/// primitive on every run.
#[derive(Clone)]
pub struct FunctionRegistry {
    primitives: Vec<Arc<dyn Primitive>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            primitives: Vec::new(),
        };
        registry.register_primitives();
        registry
    }

    /// Registry over a caller-chosen set of primitives.
    pub fn with_primitives(primitives: Vec<Arc<dyn Primitive>>) -> Result<Self, GenesisError> {
        if primitives.is_empty() {
            return Err(GenesisError::Configuration(
                "Function registry needs at least one primitive".to_string(),
            ));
        }
        Ok(Self { primitives })
    }

    /// Subset of the standard registry, in the order given.
    pub fn restricted(aliases: &[&str]) -> Result<Self, GenesisError> {
        let standard = Self::new();
        let primitives = aliases
            .iter()
            .map(|alias| {
                standard
                    .get(alias)
                    .ok_or_else(|| GenesisError::UnknownPrimitive(alias.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::with_primitives(primitives)
    }

    pub fn get(&self, alias: &str) -> Option<Arc<dyn Primitive>> {
        self.primitives
            .iter()
            .find(|p| p.alias() == alias)
            .cloned()
    }

    /// Uniformly random primitive.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Arc<dyn Primitive> {
        let idx = rng.gen_range(0..self.primitives.len());
        Arc::clone(&self.primitives[idx])
    }

    pub fn aliases(&self) -> Vec<&'static str> {
        self.primitives.iter().map(|p| p.alias()).collect()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    fn register_primitives(&mut self) {
        let primitives: Vec<Arc<dyn Primitive>> = vec![
            Arc::new(Or),
            Arc::new(And),
            Arc::new(Not),
            Arc::new(Parity),
            Arc::new(Xor2),
            Arc::new(AndNot),
            Arc::new(NotAnd),
        ];
        self.primitives.extend(primitives);
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("primitives", &self.aliases())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_registry_primitive_retrieval() {
        let registry = FunctionRegistry::new();
        let parity = registry.get("parity");
        assert!(parity.is_some());
        assert_eq!(parity.unwrap().alias(), "parity");
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn test_primitive_not_found() {
        let registry = FunctionRegistry::new();
        assert!(registry.get("nand").is_none());
    }

    #[test]
    fn test_restricted_registry_is_fixed() {
        let registry = FunctionRegistry::restricted(&["xor2"]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(registry.random(&mut rng).alias(), "xor2");
        }
    }

    #[test]
    fn test_restricted_rejects_unknown_alias() {
        let result = FunctionRegistry::restricted(&["or", "nand"]);
        assert!(matches!(result, Err(GenesisError::UnknownPrimitive(name)) if name == "nand"));
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert!(FunctionRegistry::with_primitives(Vec::new()).is_err());
    }
}
