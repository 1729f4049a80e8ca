//! # Material Module
//!
//! Render materials for each block type. The render collaborator owns textures
//! and shaders; this module only describes what each block should look like.
//!
//! Most blocks use a single material on every face. Grass is the exception and
//! carries one material per face, indexed by [`BlockSide`].

use super::{block_side::BlockSide, block_type::BlockType};

/// A flat-shaded surface description.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    /// Short identifier, stable across runs, usable as a texture key.
    pub name: &'static str,
    /// Base colour as 0xRRGGBB.
    pub color: u32,
    /// Opacity in [0, 1]; only honoured when `transparent` is set.
    pub opacity: f32,
    /// Whether the material must be drawn in the transparent pass.
    pub transparent: bool,
    /// Fragments with alpha below this threshold are discarded (cutout).
    pub alpha_test: f32,
}

impl Material {
    const fn opaque(name: &'static str, color: u32) -> Self {
        Material {
            name,
            color,
            opacity: 1.0,
            transparent: false,
            alpha_test: 0.0,
        }
    }
}

/// The materials a block is drawn with.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MaterialDescriptor {
    /// The same material on all six faces.
    Uniform(Material),
    /// One material per face, in [`BlockSide`] order.
    SixFace([Material; 6]),
}

impl MaterialDescriptor {
    /// The material drawn on a given face.
    pub fn face(&self, side: BlockSide) -> &Material {
        match self {
            MaterialDescriptor::Uniform(material) => material,
            MaterialDescriptor::SixFace(faces) => &faces[side as usize],
        }
    }

    /// Whether any face needs the transparent pass.
    pub fn is_transparent(&self) -> bool {
        BlockSide::all()
            .into_iter()
            .any(|side| self.face(side).transparent)
    }
}

const GRASS_TOP: Material = Material::opaque("grass_top", 0x567d46);
const GRASS_SIDE: Material = Material::opaque("grass_side", 0x6b8f4e);
const DIRT: Material = Material::opaque("dirt", 0x8b4513);

static WATER_MATERIAL: MaterialDescriptor = MaterialDescriptor::Uniform(Material {
    name: "water",
    color: 0x3366ff,
    opacity: 0.6,
    transparent: true,
    alpha_test: 0.0,
});
static SAND_MATERIAL: MaterialDescriptor =
    MaterialDescriptor::Uniform(Material::opaque("sand", 0xc2b280));
// [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
static GRASS_MATERIAL: MaterialDescriptor = MaterialDescriptor::SixFace([
    GRASS_SIDE, GRASS_SIDE, DIRT, GRASS_TOP, GRASS_SIDE, GRASS_SIDE,
]);
static DIRT_MATERIAL: MaterialDescriptor = MaterialDescriptor::Uniform(DIRT);
static STONE_MATERIAL: MaterialDescriptor =
    MaterialDescriptor::Uniform(Material::opaque("stone", 0x808080));
static SNOW_MATERIAL: MaterialDescriptor =
    MaterialDescriptor::Uniform(Material::opaque("snow", 0xfffafa));
static WOOD_MATERIAL: MaterialDescriptor =
    MaterialDescriptor::Uniform(Material::opaque("wood", 0x6f4e37));
static LEAVES_MATERIAL: MaterialDescriptor = MaterialDescriptor::Uniform(Material {
    name: "leaves",
    color: 0x2e8b57,
    opacity: 1.0,
    transparent: true,
    alpha_test: 0.5,
});

/// Looks up the material descriptor for a block type.
pub fn descriptor_for(block_type: BlockType) -> &'static MaterialDescriptor {
    match block_type {
        BlockType::WATER => &WATER_MATERIAL,
        BlockType::SAND => &SAND_MATERIAL,
        BlockType::GRASS => &GRASS_MATERIAL,
        BlockType::DIRT => &DIRT_MATERIAL,
        BlockType::STONE => &STONE_MATERIAL,
        BlockType::SNOW => &SNOW_MATERIAL,
        BlockType::WOOD => &WOOD_MATERIAL,
        BlockType::LEAVES => &LEAVES_MATERIAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grass_has_distinct_top_and_dirt_bottom() {
        let grass = descriptor_for(BlockType::GRASS);
        assert!(matches!(grass, MaterialDescriptor::SixFace(_)));
        assert_eq!(grass.face(BlockSide::TOP).name, "grass_top");
        assert_eq!(grass.face(BlockSide::BOTTOM).name, "dirt");
        for side in [BlockSide::FRONT, BlockSide::BACK, BlockSide::LEFT, BlockSide::RIGHT] {
            assert_eq!(grass.face(side).name, "grass_side");
        }
    }

    #[test]
    fn every_other_type_is_uniform() {
        for block_type in BlockType::ALL {
            if block_type == BlockType::GRASS {
                continue;
            }
            assert!(
                matches!(descriptor_for(block_type), MaterialDescriptor::Uniform(_)),
                "{} should be uniform",
                block_type
            );
        }
    }

    #[test]
    fn leaves_use_a_cutout_and_water_is_see_through() {
        let leaves = descriptor_for(BlockType::LEAVES).face(BlockSide::TOP);
        assert!(leaves.transparent);
        assert!(leaves.alpha_test > 0.0);

        let water = descriptor_for(BlockType::WATER).face(BlockSide::TOP);
        assert!(water.transparent);
        assert!(water.opacity < 1.0);
    }

    #[test]
    fn transparency_matches_block_type() {
        for block_type in BlockType::ALL {
            assert_eq!(
                descriptor_for(block_type).is_transparent(),
                block_type.is_transparent()
            );
        }
    }
}
