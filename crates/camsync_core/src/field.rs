//! Camera offset fields
//!
//! The six settings synchronized with the engine, their remote names and
//! their default values.

use bitflags::bitflags;
use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of one camera offset setting
///
/// The set is closed: the engine exposes exactly these six keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    /// Camera position offset along X
    CamPosX,
    /// Camera position offset along Y
    CamPosY,
    /// Camera position offset along Z
    CamPosZ,
    /// Camera rotation offset around X
    CamRotX,
    /// Camera rotation offset around Y
    CamRotY,
    /// Camera rotation offset around Z
    CamRotZ,
}

impl FieldKey {
    /// All keys, in the order reset writes them
    pub const ALL: [FieldKey; 6] = [
        FieldKey::CamPosX,
        FieldKey::CamPosY,
        FieldKey::CamPosZ,
        FieldKey::CamRotX,
        FieldKey::CamRotY,
        FieldKey::CamRotZ,
    ];

    /// Name of the setting in the remote store
    pub fn name(self) -> &'static str {
        match self {
            FieldKey::CamPosX => "camPosX",
            FieldKey::CamPosY => "camPosY",
            FieldKey::CamPosZ => "camPosZ",
            FieldKey::CamRotX => "camRotX",
            FieldKey::CamRotY => "camRotY",
            FieldKey::CamRotZ => "camRotZ",
        }
    }

    /// Position of this key in [`FieldKey::ALL`]
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Single-bit mask for this key
    #[inline]
    pub fn mask(self) -> FieldMask {
        FieldMask::from_bits_truncate(1 << self.index())
    }

    /// Value written by reset
    pub fn default_value(self) -> f64 {
        CameraOffsets::DEFAULT.get(self)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldKey {
    type Err = FieldKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| FieldKeyError::Unknown(s.to_string()))
    }
}

/// Error parsing a remote setting name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKeyError {
    /// The name is not one of the six camera offset keys
    Unknown(String),
}

impl fmt::Display for FieldKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKeyError::Unknown(name) => write!(f, "Unknown camera setting: {}", name),
        }
    }
}

impl std::error::Error for FieldKeyError {}

bitflags! {
    /// Set of fields, used to track which fields need change detection
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct FieldMask: u8 {
        const NONE = 0;
        const CAM_POS_X = 1 << 0;
        const CAM_POS_Y = 1 << 1;
        const CAM_POS_Z = 1 << 2;
        const CAM_ROT_X = 1 << 3;
        const CAM_ROT_Y = 1 << 4;
        const CAM_ROT_Z = 1 << 5;
        const ALL = Self::CAM_POS_X.bits()
            | Self::CAM_POS_Y.bits()
            | Self::CAM_POS_Z.bits()
            | Self::CAM_ROT_X.bits()
            | Self::CAM_ROT_Y.bits()
            | Self::CAM_ROT_Z.bits();
    }
}

impl FieldMask {
    /// Iterate the keys in this mask in [`FieldKey::ALL`] order
    pub fn keys(self) -> impl Iterator<Item = FieldKey> {
        FieldKey::ALL.into_iter().filter(move |key| self.contains(key.mask()))
    }
}

/// The six camera offsets as plain numbers
///
/// Fields missing when deserializing take their default value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraOffsets {
    pub cam_pos_x: f64,
    pub cam_pos_y: f64,
    pub cam_pos_z: f64,
    pub cam_rot_x: f64,
    pub cam_rot_y: f64,
    pub cam_rot_z: f64,
}

impl Default for CameraOffsets {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CameraOffsets {
    /// Values restored by reset
    pub const DEFAULT: CameraOffsets = CameraOffsets {
        cam_pos_x: 0.0,
        cam_pos_y: 0.0,
        cam_pos_z: 0.0,
        cam_rot_x: 7.5,
        cam_rot_y: 1.0,
        cam_rot_z: 0.0,
    };

    /// Read one field
    pub fn get(&self, key: FieldKey) -> f64 {
        match key {
            FieldKey::CamPosX => self.cam_pos_x,
            FieldKey::CamPosY => self.cam_pos_y,
            FieldKey::CamPosZ => self.cam_pos_z,
            FieldKey::CamRotX => self.cam_rot_x,
            FieldKey::CamRotY => self.cam_rot_y,
            FieldKey::CamRotZ => self.cam_rot_z,
        }
    }

    /// Write one field
    pub fn set(&mut self, key: FieldKey, value: f64) {
        let slot = match key {
            FieldKey::CamPosX => &mut self.cam_pos_x,
            FieldKey::CamPosY => &mut self.cam_pos_y,
            FieldKey::CamPosZ => &mut self.cam_pos_z,
            FieldKey::CamRotX => &mut self.cam_rot_x,
            FieldKey::CamRotY => &mut self.cam_rot_y,
            FieldKey::CamRotZ => &mut self.cam_rot_z,
        };
        *slot = value;
    }

    /// Builder-style field override
    pub fn with(mut self, key: FieldKey, value: f64) -> Self {
        self.set(key, value);
        self
    }

    /// Iterate `(key, value)` pairs in [`FieldKey::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, f64)> + '_ {
        FieldKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}
