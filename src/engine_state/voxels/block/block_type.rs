//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification, integer conversion,
//! and the material each type renders with.

use std::fmt;

use num_derive::FromPrimitive;

use super::{
    material::{self, MaterialDescriptor},
    BlockTypeSize,
};

/// Enumerates all possible block types in the voxel world.
///
/// Each variant represents a distinct type of block with its own material.
/// There is no air variant: an empty cell is simply a coordinate that is absent
/// from the block store. The `FromPrimitive` derive allows conversion from
/// integers, which is how the render collaborator decodes instance data.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive)]
pub enum BlockType {
    /// Semi-transparent water, placed in every cell below sea level.
    WATER,

    /// Sand, the surface layer of desert columns.
    SAND,

    /// A grass block with different materials on top, sides and bottom.
    /// The top is green, sides have grass on dirt, and bottom is plain dirt.
    GRASS,

    /// A basic dirt block, found just beneath the surface.
    DIRT,

    /// Stone, the bulk of every column below the dirt layer.
    STONE,

    /// Snow, the surface block of snow biome columns.
    SNOW,

    /// Tree trunk.
    WOOD,

    /// Tree canopy, rendered with an alpha cutout.
    LEAVES,
}

impl BlockType {
    /// Every block type, in discriminant order.
    pub const ALL: [BlockType; 8] = [
        BlockType::WATER,
        BlockType::SAND,
        BlockType::GRASS,
        BlockType::DIRT,
        BlockType::STONE,
        BlockType::SNOW,
        BlockType::WOOD,
        BlockType::LEAVES,
    ];

    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// This is typically used when decoding instance data handed to the
    /// renderer back into the rich enum type.
    ///
    /// # Arguments
    /// * `btype` - The block type as a `BlockTypeSize`
    ///
    /// # Returns
    /// The corresponding `BlockType`, or `None` if the value is not a known type
    pub fn from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// Returns the compact integer tag of this type.
    pub fn as_int(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Returns the material the renderer should draw this block type with.
    pub fn material(self) -> &'static MaterialDescriptor {
        material::descriptor_for(self)
    }

    /// Whether light passes through this block type.
    pub fn is_transparent(self) -> bool {
        matches!(self, BlockType::WATER | BlockType::LEAVES)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockType::WATER => "water",
            BlockType::SAND => "sand",
            BlockType::GRASS => "grass",
            BlockType::DIRT => "dirt",
            BlockType::STONE => "stone",
            BlockType::SNOW => "snow",
            BlockType::WOOD => "wood",
            BlockType::LEAVES => "leaves",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_tags_decode_back_to_the_same_type() {
        for block_type in BlockType::ALL {
            assert_eq!(BlockType::from_int(block_type.as_int()), Some(block_type));
        }
    }

    #[test]
    fn unknown_int_tag_is_rejected() {
        assert_eq!(BlockType::from_int(8), None);
        assert_eq!(BlockType::from_int(255), None);
    }

    #[test]
    fn only_water_and_leaves_are_transparent() {
        let transparent: Vec<_> = BlockType::ALL
            .into_iter()
            .filter(|b| b.is_transparent())
            .collect();
        assert_eq!(transparent, vec![BlockType::WATER, BlockType::LEAVES]);
    }
}
