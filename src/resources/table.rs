/*!
 * Resource Table
 * Fixed set of resource pools created at initialization
 */

use super::types::{ResourceControlBlock, ResourceId};
use crate::core::limits::RESOURCE_POOL;
use crate::core::types::Units;

/// Resource table indexed by [`ResourceId`]
#[derive(Debug, Clone)]
pub struct ResourceTable {
    resources: Vec<ResourceControlBlock>,
}

impl ResourceTable {
    /// Build a table from `(name, max)` pairs
    pub fn from_pool(pool: &[(&'static str, Units)]) -> Self {
        let resources = pool
            .iter()
            .enumerate()
            .map(|(i, &(name, max))| ResourceControlBlock::new(ResourceId(i as u8), name, max))
            .collect();
        Self { resources }
    }

    /// Case-insensitive lookup by resource name
    pub fn lookup(&self, name: &str) -> Option<ResourceId> {
        self.resources
            .iter()
            .find(|r| r.name().eq_ignore_ascii_case(name))
            .map(|r| r.id())
    }

    pub fn get(&self, id: ResourceId) -> &ResourceControlBlock {
        &self.resources[id.index()]
    }

    pub fn get_mut(&mut self, id: ResourceId) -> &mut ResourceControlBlock {
        &mut self.resources[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceControlBlock> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl Default for ResourceTable {
    fn default() -> Self {
        Self::from_pool(&RESOURCE_POOL)
    }
}
