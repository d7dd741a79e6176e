use super::AttributeStore;
use crate::error::Result;
use crate::model::{AttributeMap, Scope};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    maps: HashMap<Scope, AttributeMap>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttributeStore for InMemoryStore {
    fn load(&self, scope: Scope) -> Result<AttributeMap> {
        Ok(self.maps.get(&scope).cloned().unwrap_or_default())
    }

    fn save(&mut self, scope: Scope, map: &AttributeMap) -> Result<()> {
        self.maps.insert(scope, map.clone());
        Ok(())
    }

    fn document_path(&self, scope: Scope) -> Result<PathBuf> {
        Ok(PathBuf::from(format!("memory://{:?}", scope).to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::AttributePair;

    #[test]
    fn scopes_are_isolated() {
        let mut store = InMemoryStore::new();
        let mut map = AttributeMap::new();
        map.set_in("mode", "options", vec![AttributePair::id_label("a", "A")]);

        store.save(Scope::Project, &map).unwrap();

        assert_eq!(store.load(Scope::Project).unwrap(), map);
        assert!(store.load(Scope::Global).unwrap().is_empty());
    }
}
