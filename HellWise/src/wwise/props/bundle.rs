//! Sorted property-id association lists
//!
//! Wire layout for both bundle flavors is a one-byte count, then the
//! property-id bytes in ascending order, then the fixed-width value
//! blocks in the same order. Ids stay strictly ascending with no
//! duplicates through every mutation; lookup is binary search.

use crate::error::{Error, Result};
use crate::io::{BoundedWriter, ByteReader};

use super::translation::{self, Property};

/// Raw 4-byte property value.
pub type RawValue = [u8; 4];

/// Min/max pair of raw values for a ranged property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeValue {
    pub min: RawValue,
    pub max: RawValue,
}

/// Sorted (property-id, value) association list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropBundle {
    entries: Vec<(u8, RawValue)>,
}

impl PropBundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bundle: count, ids, 4-byte values.
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let count = reader.read_u8()? as usize;
        let ids = reader.read_bytes(count)?;
        let mut entries = Vec::with_capacity(count);
        for &id in ids {
            let value = reader.read_bytes(4)?;
            entries.push((id, [value[0], value[1], value[2], value[3]]));
        }
        // Shipped banks are already sorted; re-sort defensively is not
        // needed, but the invariant must hold for later binary search.
        entries.sort_by_key(|&(id, _)| id);
        Ok(Self { entries })
    }

    /// Encoded byte length.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.entries.len() * 5
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u8(self.entries.len() as u8)?;
        for &(id, _) in &self.entries {
            writer.write_u8(id)?;
        }
        for &(_, value) in &self.entries {
            writer.write_bytes(&value)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids currently present, ascending.
    #[must_use]
    pub fn ids(&self) -> Vec<u8> {
        self.entries.iter().map(|&(id, _)| id).collect()
    }

    fn find(&self, id: u8) -> std::result::Result<usize, usize> {
        self.entries.binary_search_by_key(&id, |&(id, _)| id)
    }

    /// Raw value for an on-disk property id.
    #[must_use]
    pub fn get_raw(&self, id: u8) -> Option<RawValue> {
        self.find(id).ok().map(|i| self.entries[i].1)
    }

    /// Insert or replace a raw value, keeping ids sorted.
    pub fn set_raw(&mut self, id: u8, value: RawValue) {
        match self.find(id) {
            Ok(i) => self.entries[i].1 = value,
            Err(i) => self.entries.insert(i, (id, value)),
        }
    }

    /// Remove a property, returning its former value.
    pub fn remove_raw(&mut self, id: u8) -> Option<RawValue> {
        self.find(id).ok().map(|i| self.entries.remove(i).1)
    }

    #[must_use]
    pub fn get_f32(&self, id: u8) -> Option<f32> {
        self.get_raw(id).map(f32::from_le_bytes)
    }

    pub fn set_f32(&mut self, id: u8, value: f32) {
        self.set_raw(id, value.to_le_bytes());
    }

    #[must_use]
    pub fn get_u32(&self, id: u8) -> Option<u32> {
        self.get_raw(id).map(u32::from_le_bytes)
    }

    pub fn set_u32(&mut self, id: u8, value: u32) {
        self.set_raw(id, value.to_le_bytes());
    }

    /// Set one of the base properties (volume, pitch, LPF, HPF, make-up
    /// gain, game-aux-send volume, initial delay), translated through the
    /// owning bank's version table.
    pub fn set_base(&mut self, version: u32, property: Property, value: f32) -> Result<()> {
        if !Property::BASE.contains(&property) {
            return Err(Error::PropertyNotAllowed {
                property: property.name(),
                role: "base",
            });
        }
        let code = translation::to_code(version, property)?;
        self.set_f32(code, value);
        Ok(())
    }

    /// Remove a base property, returning its former value.
    pub fn remove_base(&mut self, version: u32, property: Property) -> Result<Option<f32>> {
        if !Property::BASE.contains(&property) {
            return Err(Error::PropertyNotAllowed {
                property: property.name(),
                role: "base",
            });
        }
        let code = translation::to_code(version, property)?;
        Ok(self.remove_raw(code).map(f32::from_le_bytes))
    }

    /// Read a base property.
    pub fn get_base(&self, version: u32, property: Property) -> Result<Option<f32>> {
        if !Property::BASE.contains(&property) {
            return Err(Error::PropertyNotAllowed {
                property: property.name(),
                role: "base",
            });
        }
        let code = translation::to_code(version, property)?;
        Ok(self.get_f32(code))
    }

    /// Set one of the four user aux-send volume slots.
    pub fn set_user_aux_send(&mut self, version: u32, property: Property, value: f32) -> Result<()> {
        if !Property::USER_AUX_SEND.contains(&property) {
            return Err(Error::PropertyNotAllowed {
                property: property.name(),
                role: "user aux send",
            });
        }
        let code = translation::to_code(version, property)?;
        self.set_f32(code, value);
        Ok(())
    }

    /// Remove a user aux-send volume slot.
    pub fn remove_user_aux_send(&mut self, version: u32, property: Property) -> Result<Option<f32>> {
        if !Property::USER_AUX_SEND.contains(&property) {
            return Err(Error::PropertyNotAllowed {
                property: property.name(),
                role: "user aux send",
            });
        }
        let code = translation::to_code(version, property)?;
        Ok(self.remove_raw(code).map(f32::from_le_bytes))
    }
}

/// Sorted (property-id, min/max) association list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangePropBundle {
    entries: Vec<(u8, RangeValue)>,
}

impl RangePropBundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a ranged bundle: count, ids, 8-byte min/max blocks.
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let count = reader.read_u8()? as usize;
        let ids = reader.read_bytes(count)?;
        let mut entries = Vec::with_capacity(count);
        for &id in ids {
            let block = reader.read_bytes(8)?;
            entries.push((
                id,
                RangeValue {
                    min: [block[0], block[1], block[2], block[3]],
                    max: [block[4], block[5], block[6], block[7]],
                },
            ));
        }
        entries.sort_by_key(|&(id, _)| id);
        Ok(Self { entries })
    }

    /// Encoded byte length.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.entries.len() * 9
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u8(self.entries.len() as u8)?;
        for &(id, _) in &self.entries {
            writer.write_u8(id)?;
        }
        for &(_, range) in &self.entries {
            writer.write_bytes(&range.min)?;
            writer.write_bytes(&range.max)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<u8> {
        self.entries.iter().map(|&(id, _)| id).collect()
    }

    fn find(&self, id: u8) -> std::result::Result<usize, usize> {
        self.entries.binary_search_by_key(&id, |&(id, _)| id)
    }

    #[must_use]
    pub fn get(&self, id: u8) -> Option<RangeValue> {
        self.find(id).ok().map(|i| self.entries[i].1)
    }

    pub fn set(&mut self, id: u8, range: RangeValue) {
        match self.find(id) {
            Ok(i) => self.entries[i].1 = range,
            Err(i) => self.entries.insert(i, (id, range)),
        }
    }

    pub fn remove(&mut self, id: u8) -> Option<RangeValue> {
        self.find(id).ok().map(|i| self.entries.remove(i).1)
    }

    #[must_use]
    pub fn get_f32(&self, id: u8) -> Option<(f32, f32)> {
        self.get(id)
            .map(|r| (f32::from_le_bytes(r.min), f32::from_le_bytes(r.max)))
    }

    pub fn set_f32(&mut self, id: u8, min: f32, max: f32) {
        self.set(
            id,
            RangeValue {
                min: min.to_le_bytes(),
                max: max.to_le_bytes(),
            },
        );
    }
}
