//! Sub-structures shared by several hierarchy object kinds
//!
//! Effect chains, RTPC curves, state bindings and source descriptors show
//! up in most object payloads. Each type follows the same three-function
//! discipline as the objects themselves: `parse`, `size`, `encode`, with
//! `size` computed before encoding and cross-checked by the bounded
//! writer.

use crate::error::Result;
use crate::io::{BoundedWriter, ByteReader};

/// One effect slot in an object's effect chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FxSlot {
    pub index: u8,
    pub fx_id: u32,
    pub is_share_set: u8,
    pub is_rendered: u8,
}

/// An object's effect chain: override flag, bypass bits and slot list.
///
/// The bypass byte is only present on disk when the chain has slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FxChain {
    pub override_parent: u8,
    pub bypass_bits: u8,
    pub slots: Vec<FxSlot>,
}

impl FxChain {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let override_parent = reader.read_u8()?;
        let count = reader.read_u8()? as usize;
        let mut bypass_bits = 0;
        let mut slots = Vec::with_capacity(count);
        if count > 0 {
            bypass_bits = reader.read_u8()?;
            for _ in 0..count {
                slots.push(FxSlot {
                    index: reader.read_u8()?,
                    fx_id: reader.read_u32_le()?,
                    is_share_set: reader.read_u8()?,
                    is_rendered: reader.read_u8()?,
                });
            }
        }
        Ok(Self {
            override_parent,
            bypass_bits,
            slots,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        if self.slots.is_empty() {
            2
        } else {
            3 + self.slots.len() * 7
        }
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u8(self.override_parent)?;
        writer.write_u8(self.slots.len() as u8)?;
        if !self.slots.is_empty() {
            writer.write_u8(self.bypass_bits)?;
            for slot in &self.slots {
                writer.write_u8(slot.index)?;
                writer.write_u32_le(slot.fx_id)?;
                writer.write_u8(slot.is_share_set)?;
                writer.write_u8(slot.is_rendered)?;
            }
        }
        Ok(())
    }
}

/// One point on a conversion or crossfade curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub x: f32,
    pub y: f32,
    pub interp: u32,
}

impl CurvePoint {
    pub const SIZE: usize = 12;

    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            x: reader.read_f32_le()?,
            y: reader.read_f32_le()?,
            interp: reader.read_u32_le()?,
        })
    }

    pub fn encode(self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_f32_le(self.x)?;
        writer.write_f32_le(self.y)?;
        writer.write_u32_le(self.interp)
    }
}

/// A scaled curve: scaling mode plus a u16-counted point list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve {
    pub scaling: u8,
    pub points: Vec<CurvePoint>,
}

impl Curve {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let scaling = reader.read_u8()?;
        let count = reader.read_u16_le()? as usize;
        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            points.push(CurvePoint::parse(reader)?);
        }
        Ok(Self { scaling, points })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        3 + self.points.len() * CurvePoint::SIZE
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u8(self.scaling)?;
        writer.write_u16_le(self.points.len() as u16)?;
        for point in &self.points {
            point.encode(writer)?;
        }
        Ok(())
    }
}

/// One RTPC (game parameter) binding with its mapping curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Rtpc {
    pub rtpc_id: u32,
    pub is_midi: u8,
    pub is_general: u8,
    pub param_id: u8,
    pub curve_id: u32,
    pub scaling: u8,
    pub points: Vec<CurvePoint>,
}

impl Rtpc {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let rtpc_id = reader.read_u32_le()?;
        let is_midi = reader.read_u8()?;
        let is_general = reader.read_u8()?;
        let param_id = reader.read_u8()?;
        let curve_id = reader.read_u32_le()?;
        let scaling = reader.read_u8()?;
        let count = reader.read_u16_le()? as usize;
        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            points.push(CurvePoint::parse(reader)?);
        }
        Ok(Self {
            rtpc_id,
            is_midi,
            is_general,
            param_id,
            curve_id,
            scaling,
            points,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        14 + self.points.len() * CurvePoint::SIZE
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.rtpc_id)?;
        writer.write_u8(self.is_midi)?;
        writer.write_u8(self.is_general)?;
        writer.write_u8(self.param_id)?;
        writer.write_u32_le(self.curve_id)?;
        writer.write_u8(self.scaling)?;
        writer.write_u16_le(self.points.len() as u16)?;
        for point in &self.points {
            point.encode(writer)?;
        }
        Ok(())
    }
}

/// A u16-counted list of RTPC bindings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RtpcSet {
    pub rtpcs: Vec<Rtpc>,
}

impl RtpcSet {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let count = reader.read_u16_le()? as usize;
        let mut rtpcs = Vec::with_capacity(count);
        for _ in 0..count {
            rtpcs.push(Rtpc::parse(reader)?);
        }
        Ok(Self { rtpcs })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        2 + self.rtpcs.iter().map(Rtpc::size).sum::<usize>()
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u16_le(self.rtpcs.len() as u16)?;
        for rtpc in &self.rtpcs {
            rtpc.encode(writer)?;
        }
        Ok(())
    }
}

/// A state-sensitive property declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateProp {
    pub id: u8,
    pub accum: u8,
    pub in_db: u8,
}

/// One (state id, target instance) pair inside a state group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTarget {
    pub state_id: u32,
    pub instance_id: u32,
}

/// A state group binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateGroup {
    pub group_id: u32,
    pub sync_type: u8,
    pub targets: Vec<StateTarget>,
}

impl StateGroup {
    fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let group_id = reader.read_u32_le()?;
        let sync_type = reader.read_u8()?;
        let count = reader.read_u8()? as usize;
        let mut targets = Vec::with_capacity(count);
        for _ in 0..count {
            targets.push(StateTarget {
                state_id: reader.read_u32_le()?,
                instance_id: reader.read_u32_le()?,
            });
        }
        Ok(Self {
            group_id,
            sync_type,
            targets,
        })
    }

    fn size(&self) -> usize {
        6 + self.targets.len() * 8
    }

    fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.group_id)?;
        writer.write_u8(self.sync_type)?;
        writer.write_u8(self.targets.len() as u8)?;
        for target in &self.targets {
            writer.write_u32_le(target.state_id)?;
            writer.write_u32_le(target.instance_id)?;
        }
        Ok(())
    }
}

/// State-sensitive property list plus state group bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateChunk {
    pub props: Vec<StateProp>,
    pub groups: Vec<StateGroup>,
}

impl StateChunk {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let prop_count = reader.read_u8()? as usize;
        let mut props = Vec::with_capacity(prop_count);
        for _ in 0..prop_count {
            props.push(StateProp {
                id: reader.read_u8()?,
                accum: reader.read_u8()?,
                in_db: reader.read_u8()?,
            });
        }
        let group_count = reader.read_u8()? as usize;
        let mut groups = Vec::with_capacity(group_count);
        for _ in 0..group_count {
            groups.push(StateGroup::parse(reader)?);
        }
        Ok(Self { props, groups })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        2 + self.props.len() * 3 + self.groups.iter().map(StateGroup::size).sum::<usize>()
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u8(self.props.len() as u8)?;
        for prop in &self.props {
            writer.write_u8(prop.id)?;
            writer.write_u8(prop.accum)?;
            writer.write_u8(prop.in_db)?;
        }
        writer.write_u8(self.groups.len() as u8)?;
        for group in &self.groups {
            group.encode(writer)?;
        }
        Ok(())
    }
}

/// An audio source reference: which codec plugin, how it streams, and
/// where the media lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub plugin_id: u32,
    pub stream_type: u8,
    pub source_id: u32,
    pub in_memory_media_size: u32,
    pub source_bits: u8,
}

impl SourceDescriptor {
    pub const SIZE: usize = 14;

    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            plugin_id: reader.read_u32_le()?,
            stream_type: reader.read_u8()?,
            source_id: reader.read_u32_le()?,
            in_memory_media_size: reader.read_u32_le()?,
            source_bits: reader.read_u8()?,
        })
    }

    pub fn encode(self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.plugin_id)?;
        writer.write_u8(self.stream_type)?;
        writer.write_u32_le(self.source_id)?;
        writer.write_u32_le(self.in_memory_media_size)?;
        writer.write_u8(self.source_bits)
    }
}

/// Read a u32-counted list of child object ids.
pub fn parse_child_ids(reader: &mut ByteReader<'_>) -> Result<Vec<u32>> {
    let count = reader.read_u32_le()? as usize;
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        ids.push(reader.read_u32_le()?);
    }
    Ok(ids)
}

/// Encoded length of a u32-counted child id list.
#[must_use]
pub fn child_ids_size(ids: &[u32]) -> usize {
    4 + ids.len() * 4
}

/// Write a u32-counted list of child object ids.
pub fn encode_child_ids(ids: &[u32], writer: &mut BoundedWriter) -> Result<()> {
    writer.write_u32_le(ids.len() as u32)?;
    for &id in ids {
        writer.write_u32_le(id)?;
    }
    Ok(())
}
