use crate::utils::error::{MinebaseError, Result};
use crate::utils::validation::{validate_each, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const COORD_MIN: f64 = -0.25;
const COORD_MAX: f64 = 1.5;

/// An axis aligned bounding box, stored in the data as
/// `[minX, minY, minZ, maxX, maxY, maxZ]`.
///
/// Some Bedrock versions ship boxes with min above max; those are kept as is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 6]", into = "[f64; 6]")]
pub struct CollisionBoxData {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

impl From<[f64; 6]> for CollisionBoxData {
    fn from(v: [f64; 6]) -> Self {
        CollisionBoxData {
            min_x: v[0],
            min_y: v[1],
            min_z: v[2],
            max_x: v[3],
            max_y: v[4],
            max_z: v[5],
        }
    }
}

impl From<CollisionBoxData> for [f64; 6] {
    fn from(b: CollisionBoxData) -> Self {
        b.as_aabb()
    }
}

impl CollisionBoxData {
    pub fn as_aabb(&self) -> [f64; 6] {
        [
            self.min_x, self.min_y, self.min_z, self.max_x, self.max_y, self.max_z,
        ]
    }

    pub fn is_inverted(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y || self.min_z > self.max_z
    }
}

impl Validate for CollisionBoxData {
    fn validate(&self) -> Result<()> {
        const NAMES: [&str; 6] = ["minX", "minY", "minZ", "maxX", "maxY", "maxZ"];
        for (name, value) in NAMES.iter().zip(self.as_aabb()) {
            validate_range(name, value, COORD_MIN, COORD_MAX)?;
        }
        Ok(())
    }
}

/// Shape id(s) of a block: one shared by every state, or one per state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeRef {
    Shared(u32),
    PerState(Vec<u32>),
}

impl ShapeRef {
    pub fn ids(&self) -> &[u32] {
        match self {
            ShapeRef::Shared(id) => std::slice::from_ref(id),
            ShapeRef::PerState(ids) => ids,
        }
    }
}

/// Resolved boxes for a block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockShape<'a> {
    Shared(&'a [CollisionBoxData]),
    PerState(Vec<&'a [CollisionBoxData]>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockCollisionShapes {
    /// Block name to shape id(s).
    pub blocks: BTreeMap<String, ShapeRef>,
    /// Shape id to the boxes composing it.
    pub shapes: BTreeMap<u32, Vec<CollisionBoxData>>,
}

impl BlockCollisionShapes {
    /// Looks up the boxes of a block without going through the shape ids.
    pub fn shape_for(&self, block_name: &str) -> Option<BlockShape<'_>> {
        match self.blocks.get(block_name)? {
            ShapeRef::Shared(id) => self.shapes.get(id).map(|b| BlockShape::Shared(b)),
            ShapeRef::PerState(ids) => ids
                .iter()
                .map(|id| self.shapes.get(id).map(Vec::as_slice))
                .collect::<Option<Vec<_>>>()
                .map(BlockShape::PerState),
        }
    }
}

impl Validate for BlockCollisionShapes {
    fn validate(&self) -> Result<()> {
        for (block_name, shape_ref) in &self.blocks {
            for shape_id in shape_ref.ids() {
                if !self.shapes.contains_key(shape_id) {
                    return Err(MinebaseError::validation(
                        format!("blocks.{block_name}"),
                        format!("collision shape id {shape_id} has no corresponding shape data"),
                    ));
                }
            }
        }
        for (shape_id, boxes) in &self.shapes {
            validate_each(&format!("shapes.{shape_id}"), boxes)?;
        }
        Ok(())
    }
}
