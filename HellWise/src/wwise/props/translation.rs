//! Version translation between semantic properties and on-disk codes
//!
//! Each supported SoundBank version range has a fixed table mapping the
//! [`Property`] enum to the one-byte property code used on disk. Asking
//! for a translation outside the supported version window is fatal: the
//! semantic contract cannot be honored silently for a table we do not
//! have. Versions 150 (inclusive) to 154 (exclusive) are a deliberate
//! gap - the authoring tool renumbered its codes in that window and no
//! shipped bank in that range has been mapped yet.

use crate::error::{Error, Result};

/// Stable semantic property names, independent of bank version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Property {
    Volume,
    Pitch,
    LowPassFilter,
    HighPassFilter,
    BusVolume,
    MakeUpGain,
    Priority,
    PriorityDistanceOffset,
    MuteRatio,
    PanLR,
    PanFB,
    CenterPct,
    DelayTime,
    TransitionTime,
    Probability,
    UserAuxSendVolume0,
    UserAuxSendVolume1,
    UserAuxSendVolume2,
    UserAuxSendVolume3,
    GameAuxSendVolume,
    OutputBusVolume,
    OutputBusHighPassFilter,
    OutputBusLowPassFilter,
    InitialDelay,
    AttachedPluginFxId,
}

/// How a property's raw 4-byte value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// IEEE 754 single-precision float.
    Float,
    /// Unsigned 32-bit integer.
    Uint,
}

impl Property {
    /// Name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Volume => "Volume",
            Self::Pitch => "Pitch",
            Self::LowPassFilter => "LowPassFilter",
            Self::HighPassFilter => "HighPassFilter",
            Self::BusVolume => "BusVolume",
            Self::MakeUpGain => "MakeUpGain",
            Self::Priority => "Priority",
            Self::PriorityDistanceOffset => "PriorityDistanceOffset",
            Self::MuteRatio => "MuteRatio",
            Self::PanLR => "PanLR",
            Self::PanFB => "PanFB",
            Self::CenterPct => "CenterPct",
            Self::DelayTime => "DelayTime",
            Self::TransitionTime => "TransitionTime",
            Self::Probability => "Probability",
            Self::UserAuxSendVolume0 => "UserAuxSendVolume0",
            Self::UserAuxSendVolume1 => "UserAuxSendVolume1",
            Self::UserAuxSendVolume2 => "UserAuxSendVolume2",
            Self::UserAuxSendVolume3 => "UserAuxSendVolume3",
            Self::GameAuxSendVolume => "GameAuxSendVolume",
            Self::OutputBusVolume => "OutputBusVolume",
            Self::OutputBusHighPassFilter => "OutputBusHighPassFilter",
            Self::OutputBusLowPassFilter => "OutputBusLowPassFilter",
            Self::InitialDelay => "InitialDelay",
            Self::AttachedPluginFxId => "AttachedPluginFxId",
        }
    }

    /// Value interpretation for this property.
    #[must_use]
    pub fn kind(self) -> PropertyKind {
        match self {
            Self::AttachedPluginFxId => PropertyKind::Uint,
            _ => PropertyKind::Float,
        }
    }

    /// The "base" property set with dedicated bundle helpers.
    pub const BASE: &'static [Property] = &[
        Property::Volume,
        Property::Pitch,
        Property::LowPassFilter,
        Property::HighPassFilter,
        Property::MakeUpGain,
        Property::GameAuxSendVolume,
        Property::InitialDelay,
    ];

    /// The four user aux-send slots, indexed 0..4.
    pub const USER_AUX_SEND: &'static [Property] = &[
        Property::UserAuxSendVolume0,
        Property::UserAuxSendVolume1,
        Property::UserAuxSendVolume2,
        Property::UserAuxSendVolume3,
    ];
}

/// Lowest bank version with a translation table.
pub const MIN_VERSION: u32 = 112;

/// First version of the unmapped renumbering window.
pub const GAP_START: u32 = 150;

/// First version after the unmapped window.
pub const GAP_END: u32 = 154;

/// Table for bank versions 112 ..< 150.
const TABLE_V112: &[(Property, u8)] = &[
    (Property::Volume, 0x00),
    (Property::Pitch, 0x02),
    (Property::LowPassFilter, 0x03),
    (Property::HighPassFilter, 0x04),
    (Property::BusVolume, 0x05),
    (Property::MakeUpGain, 0x06),
    (Property::Priority, 0x07),
    (Property::PriorityDistanceOffset, 0x08),
    (Property::MuteRatio, 0x09),
    (Property::PanLR, 0x0B),
    (Property::PanFB, 0x0C),
    (Property::CenterPct, 0x0D),
    (Property::DelayTime, 0x0E),
    (Property::TransitionTime, 0x0F),
    (Property::Probability, 0x10),
    (Property::UserAuxSendVolume0, 0x13),
    (Property::UserAuxSendVolume1, 0x14),
    (Property::UserAuxSendVolume2, 0x15),
    (Property::UserAuxSendVolume3, 0x16),
    (Property::GameAuxSendVolume, 0x17),
    (Property::OutputBusVolume, 0x18),
    (Property::OutputBusHighPassFilter, 0x19),
    (Property::OutputBusLowPassFilter, 0x1A),
    (Property::InitialDelay, 0x3B),
    (Property::AttachedPluginFxId, 0x3D),
];

/// Table for bank versions 154 and newer (codes were renumbered).
const TABLE_V154: &[(Property, u8)] = &[
    (Property::Volume, 0x00),
    (Property::Pitch, 0x01),
    (Property::LowPassFilter, 0x02),
    (Property::HighPassFilter, 0x03),
    (Property::BusVolume, 0x04),
    (Property::MakeUpGain, 0x05),
    (Property::Priority, 0x06),
    (Property::PriorityDistanceOffset, 0x07),
    (Property::MuteRatio, 0x08),
    (Property::PanLR, 0x0A),
    (Property::PanFB, 0x0B),
    (Property::CenterPct, 0x0C),
    (Property::DelayTime, 0x0D),
    (Property::TransitionTime, 0x0E),
    (Property::Probability, 0x0F),
    (Property::UserAuxSendVolume0, 0x12),
    (Property::UserAuxSendVolume1, 0x13),
    (Property::UserAuxSendVolume2, 0x14),
    (Property::UserAuxSendVolume3, 0x15),
    (Property::GameAuxSendVolume, 0x16),
    (Property::OutputBusVolume, 0x17),
    (Property::OutputBusHighPassFilter, 0x18),
    (Property::OutputBusLowPassFilter, 0x19),
    (Property::InitialDelay, 0x3A),
    (Property::AttachedPluginFxId, 0x3C),
];

/// Select the translation table for a bank version.
///
/// # Errors
/// Returns [`Error::UnsupportedBankVersion`] for versions below
/// [`MIN_VERSION`] or inside the `150..154` gap.
pub fn table(version: u32) -> Result<&'static [(Property, u8)]> {
    if (MIN_VERSION..GAP_START).contains(&version) {
        Ok(TABLE_V112)
    } else if version >= GAP_END {
        Ok(TABLE_V154)
    } else {
        Err(Error::UnsupportedBankVersion { version })
    }
}

/// Translate a semantic property to its on-disk code for `version`.
///
/// # Errors
/// Returns [`Error::UnsupportedBankVersion`] for an unmapped version and
/// [`Error::UnknownProperty`] when the property is absent from the
/// version's table.
pub fn to_code(version: u32, property: Property) -> Result<u8> {
    table(version)?
        .iter()
        .find(|(p, _)| *p == property)
        .map(|&(_, code)| code)
        .ok_or(Error::UnknownProperty {
            property: property.name(),
            version,
        })
}

/// Translate an on-disk property code back to its semantic property.
///
/// # Errors
/// Returns [`Error::UnsupportedBankVersion`] for an unmapped version and
/// [`Error::UnknownPropertyCode`] when the code is absent from the
/// version's table.
pub fn from_code(version: u32, code: u8) -> Result<Property> {
    table(version)?
        .iter()
        .find(|(_, c)| *c == code)
        .map(|&(p, _)| p)
        .ok_or(Error::UnknownPropertyCode { code, version })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_within_a_table() {
        for version in [112, 141, 149, 154, 160] {
            for &(property, code) in table(version).unwrap() {
                assert_eq!(to_code(version, property).unwrap(), code);
                assert_eq!(from_code(version, code).unwrap(), property);
            }
        }
    }

    #[test]
    fn tables_diverge_across_the_gap() {
        assert_eq!(to_code(141, Property::Pitch).unwrap(), 0x02);
        assert_eq!(to_code(154, Property::Pitch).unwrap(), 0x01);
        assert_eq!(to_code(141, Property::InitialDelay).unwrap(), 0x3B);
        assert_eq!(to_code(154, Property::InitialDelay).unwrap(), 0x3A);
    }

    #[test]
    fn gap_and_ancient_versions_are_fatal() {
        for version in [0, 56, 111, 150, 151, 153] {
            assert!(matches!(
                table(version),
                Err(Error::UnsupportedBankVersion { version: v }) if v == version
            ));
        }
    }

    #[test]
    fn unknown_code_is_fatal() {
        assert!(matches!(
            from_code(141, 0xFE),
            Err(Error::UnknownPropertyCode { code: 0xFE, version: 141 })
        ));
    }
}
