//! Movement simulation collaborators.
//!
//! The movement simulation itself lives elsewhere. The producer only needs to
//! ask it a few questions about the character and to map world directions
//! into the frame of whatever the character stands on.

use serde::{Deserialize, Serialize};

use crate::math::{Rotator, Vec3};

/// Opaque id of a movement base (platform, vehicle, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseId(pub u64);

/// Bone of a movement base. Empty means the base's root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoneName(pub String);

impl BoneName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }
}

/// Reference to the base a character is standing on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementBase {
    pub id: BaseId,
    /// World orientation of the base root.
    pub orientation: Rotator,
}

/// Read-only view of the movement simulation for one character.
pub trait MovementQuery {
    fn is_on_ground(&self) -> bool;
    fn is_falling(&self) -> bool;
    fn up_direction(&self) -> Vec3;
    fn movement_base(&self) -> Option<MovementBase>;
    fn movement_base_bone_name(&self) -> BoneName;
}

/// World-to-based direction transform. Must be stateless and pure.
pub trait BasedSpace {
    fn transform_world_direction_to_based(
        &self,
        base: &MovementBase,
        bone: &BoneName,
        world: Vec3,
    ) -> Vec3;
}

/// Query for a character with no simulation data (not grounded, no base).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMovement;

impl MovementQuery for NullMovement {
    fn is_on_ground(&self) -> bool {
        false
    }

    fn is_falling(&self) -> bool {
        false
    }

    fn up_direction(&self) -> Vec3 {
        Vec3::UP
    }

    fn movement_base(&self) -> Option<MovementBase> {
        None
    }

    fn movement_base_bone_name(&self) -> BoneName {
        BoneName::default()
    }
}

/// Character standing on flat ground, optionally on a static base.
#[derive(Debug, Default, Clone)]
pub struct FlatGround {
    pub base: Option<MovementBase>,
    pub bone: BoneName,
}

impl FlatGround {
    pub fn on_base(base: MovementBase) -> Self {
        Self {
            base: Some(base),
            bone: BoneName::default(),
        }
    }
}

impl MovementQuery for FlatGround {
    fn is_on_ground(&self) -> bool {
        true
    }

    fn is_falling(&self) -> bool {
        false
    }

    fn up_direction(&self) -> Vec3 {
        Vec3::UP
    }

    fn movement_base(&self) -> Option<MovementBase> {
        self.base
    }

    fn movement_base_bone_name(&self) -> BoneName {
        self.bone.clone()
    }
}

/// Based space for rigid bases: undoes the base root orientation. Bones are
/// not tracked, so every bone resolves to the root.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticBasedSpace;

impl BasedSpace for StaticBasedSpace {
    fn transform_world_direction_to_based(
        &self,
        base: &MovementBase,
        _bone: &BoneName,
        world: Vec3,
    ) -> Vec3 {
        base.orientation.unrotate_vector(world)
    }
}
