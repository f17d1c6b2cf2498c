//! The shared parameter block embedded in most hierarchy object kinds

use crate::error::Result;
use crate::io::{BoundedWriter, ByteReader};
use crate::wwise::props::{PropBundle, RangePropBundle};

use super::common::{FxChain, RtpcSet, StateChunk};

/// Positioning bit on the outer flag byte: a 3D block follows.
pub const POS_HAS_3D: u8 = 0x08;

/// Bit on the 3D flag byte: a path automation block follows.
pub const POS_3D_HAS_AUTOMATION: u8 = 0x20;

/// Aux-params bit: four user aux-send ids follow.
pub const AUX_HAS_USER_SENDS: u8 = 0x08;

/// One vertex on a 3D automation path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub duration: i32,
}

/// A window into the shared vertex list, one per path playlist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathListItem {
    pub vertices_offset: u32,
    pub vertices_count: u32,
}

/// 3D position path automation.
///
/// The random range triple list is not separately counted on disk; it
/// always has one entry per playlist item.
#[derive(Debug, Clone, PartialEq)]
pub struct PathAutomation {
    pub path_mode: u8,
    pub transition_time: i32,
    pub vertices: Vec<PathVertex>,
    pub items: Vec<PathListItem>,
    pub ranges: Vec<[f32; 3]>,
}

impl PathAutomation {
    fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let path_mode = reader.read_u8()?;
        let transition_time = reader.read_i32_le()?;
        let vertex_count = reader.read_u32_le()? as usize;
        let mut vertices = Vec::with_capacity(vertex_count);
        for _ in 0..vertex_count {
            vertices.push(PathVertex {
                x: reader.read_f32_le()?,
                y: reader.read_f32_le()?,
                z: reader.read_f32_le()?,
                duration: reader.read_i32_le()?,
            });
        }
        let item_count = reader.read_u32_le()? as usize;
        let mut items = Vec::with_capacity(item_count);
        for _ in 0..item_count {
            items.push(PathListItem {
                vertices_offset: reader.read_u32_le()?,
                vertices_count: reader.read_u32_le()?,
            });
        }
        let mut ranges = Vec::with_capacity(item_count);
        for _ in 0..item_count {
            ranges.push([
                reader.read_f32_le()?,
                reader.read_f32_le()?,
                reader.read_f32_le()?,
            ]);
        }
        Ok(Self {
            path_mode,
            transition_time,
            vertices,
            items,
            ranges,
        })
    }

    fn size(&self) -> usize {
        5 + 4 + self.vertices.len() * 16 + 4 + self.items.len() * 8 + self.ranges.len() * 12
    }

    fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u8(self.path_mode)?;
        writer.write_i32_le(self.transition_time)?;
        writer.write_u32_le(self.vertices.len() as u32)?;
        for v in &self.vertices {
            writer.write_f32_le(v.x)?;
            writer.write_f32_le(v.y)?;
            writer.write_f32_le(v.z)?;
            writer.write_i32_le(v.duration)?;
        }
        writer.write_u32_le(self.items.len() as u32)?;
        for item in &self.items {
            writer.write_u32_le(item.vertices_offset)?;
            writer.write_u32_le(item.vertices_count)?;
        }
        for range in &self.ranges {
            writer.write_f32_le(range[0])?;
            writer.write_f32_le(range[1])?;
            writer.write_f32_le(range[2])?;
        }
        Ok(())
    }
}

/// Positioning flags with the optional 3D and automation blocks.
///
/// Presence of the nested blocks is driven by the flag bits at parse
/// time, so a round-tripped value always has flags and options in
/// agreement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositioningParams {
    pub bits: u8,
    pub bits_3d: Option<u8>,
    pub automation: Option<PathAutomation>,
}

impl PositioningParams {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let bits = reader.read_u8()?;
        let mut bits_3d = None;
        let mut automation = None;
        if bits & POS_HAS_3D != 0 {
            let b3d = reader.read_u8()?;
            bits_3d = Some(b3d);
            if b3d & POS_3D_HAS_AUTOMATION != 0 {
                automation = Some(PathAutomation::parse(reader)?);
            }
        }
        Ok(Self {
            bits,
            bits_3d,
            automation,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.bits_3d.map_or(0, |_| 1)
            + self.automation.as_ref().map_or(0, PathAutomation::size)
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u8(self.bits)?;
        if let Some(b3d) = self.bits_3d {
            writer.write_u8(b3d)?;
        }
        if let Some(automation) = &self.automation {
            automation.encode(writer)?;
        }
        Ok(())
    }
}

/// Aux-send routing: flags, optional user sends, reflections bus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuxParams {
    pub bits: u8,
    pub user_sends: Option<[u32; 4]>,
    pub reflections_bus: u32,
}

impl AuxParams {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let bits = reader.read_u8()?;
        let user_sends = if bits & AUX_HAS_USER_SENDS != 0 {
            Some([
                reader.read_u32_le()?,
                reader.read_u32_le()?,
                reader.read_u32_le()?,
                reader.read_u32_le()?,
            ])
        } else {
            None
        };
        let reflections_bus = reader.read_u32_le()?;
        Ok(Self {
            bits,
            user_sends,
            reflections_bus,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        5 + self.user_sends.map_or(0, |_| 16)
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u8(self.bits)?;
        if let Some(sends) = self.user_sends {
            for id in sends {
                writer.write_u32_le(id)?;
            }
        }
        writer.write_u32_le(self.reflections_bus)
    }
}

/// Advanced playback settings. Fixed 6-byte block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvSettings {
    pub bits: u8,
    pub virtual_queue_behavior: u8,
    pub max_instances: u16,
    pub below_threshold_behavior: u8,
    pub bits2: u8,
}

impl AdvSettings {
    pub const SIZE: usize = 6;

    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            bits: reader.read_u8()?,
            virtual_queue_behavior: reader.read_u8()?,
            max_instances: reader.read_u16_le()?,
            below_threshold_behavior: reader.read_u8()?,
            bits2: reader.read_u8()?,
        })
    }

    pub fn encode(self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u8(self.bits)?;
        writer.write_u8(self.virtual_queue_behavior)?;
        writer.write_u16_le(self.max_instances)?;
        writer.write_u8(self.below_threshold_behavior)?;
        writer.write_u8(self.bits2)
    }
}

/// The shared parameter block: effect chain, bus routing, the parent
/// back-reference, property bundles, positioning, aux sends, advanced
/// settings, state bindings and RTPCs.
///
/// `direct_parent_id` is a weak back-reference to the containing
/// object's id; `0` means unparented.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseParameter {
    pub fx: FxChain,
    pub override_bus_id: u32,
    pub direct_parent_id: u32,
    pub behavior_bits: u8,
    pub props: PropBundle,
    pub ranged_props: RangePropBundle,
    pub positioning: PositioningParams,
    pub aux: AuxParams,
    pub adv: AdvSettings,
    pub states: StateChunk,
    pub rtpc: RtpcSet,
}

impl BaseParameter {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            fx: FxChain::parse(reader)?,
            override_bus_id: reader.read_u32_le()?,
            direct_parent_id: reader.read_u32_le()?,
            behavior_bits: reader.read_u8()?,
            props: PropBundle::parse(reader)?,
            ranged_props: RangePropBundle::parse(reader)?,
            positioning: PositioningParams::parse(reader)?,
            aux: AuxParams::parse(reader)?,
            adv: AdvSettings::parse(reader)?,
            states: StateChunk::parse(reader)?,
            rtpc: RtpcSet::parse(reader)?,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.fx.size()
            + 9
            + self.props.size()
            + self.ranged_props.size()
            + self.positioning.size()
            + self.aux.size()
            + AdvSettings::SIZE
            + self.states.size()
            + self.rtpc.size()
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        self.fx.encode(writer)?;
        writer.write_u32_le(self.override_bus_id)?;
        writer.write_u32_le(self.direct_parent_id)?;
        writer.write_u8(self.behavior_bits)?;
        self.props.encode(writer)?;
        self.ranged_props.encode(writer)?;
        self.positioning.encode(writer)?;
        self.aux.encode(writer)?;
        self.adv.encode(writer)?;
        self.states.encode(writer)?;
        self.rtpc.encode(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wwise::hierarchy::common::{CurvePoint, Rtpc};

    fn sample() -> BaseParameter {
        let mut props = PropBundle::new();
        props.set_f32(0x00, -4.0);
        props.set_f32(0x17, 1.5);
        let mut ranged = RangePropBundle::new();
        ranged.set_f32(0x02, -100.0, 100.0);
        BaseParameter {
            override_bus_id: 0xAABBCCDD,
            direct_parent_id: 1234,
            behavior_bits: 0x02,
            props,
            ranged_props: ranged,
            positioning: PositioningParams {
                bits: POS_HAS_3D,
                bits_3d: Some(0x01),
                automation: None,
            },
            aux: AuxParams {
                bits: AUX_HAS_USER_SENDS,
                user_sends: Some([1, 2, 3, 4]),
                reflections_bus: 9,
            },
            adv: AdvSettings {
                max_instances: 8,
                ..AdvSettings::default()
            },
            rtpc: RtpcSet {
                rtpcs: vec![Rtpc {
                    rtpc_id: 31,
                    is_midi: 0,
                    is_general: 1,
                    param_id: 0,
                    curve_id: 7,
                    scaling: 2,
                    points: vec![CurvePoint { x: 0.0, y: 0.0, interp: 4 }],
                }],
            },
            ..BaseParameter::default()
        }
    }

    #[test]
    fn round_trip_matches_size() {
        let base = sample();
        let mut w = BoundedWriter::new(base.size(), "BaseParameter");
        base.encode(&mut w).unwrap();
        let bytes = w.finish().unwrap();

        let mut r = ByteReader::new(&bytes);
        let parsed = BaseParameter::parse(&mut r).unwrap();
        assert!(r.is_empty());
        assert_eq!(parsed, base);
    }

    #[test]
    fn automation_block_round_trips() {
        let positioning = PositioningParams {
            bits: POS_HAS_3D,
            bits_3d: Some(POS_3D_HAS_AUTOMATION),
            automation: Some(PathAutomation {
                path_mode: 1,
                transition_time: 500,
                vertices: vec![PathVertex { x: 0.0, y: 1.0, z: 2.0, duration: 100 }],
                items: vec![PathListItem { vertices_offset: 0, vertices_count: 1 }],
                ranges: vec![[0.5, 0.5, 0.0]],
            }),
        };
        let mut w = BoundedWriter::new(positioning.size(), "PositioningParams");
        positioning.encode(&mut w).unwrap();
        let bytes = w.finish().unwrap();
        let mut r = ByteReader::new(&bytes);
        assert_eq!(PositioningParams::parse(&mut r).unwrap(), positioning);
        assert!(r.is_empty());
    }
}
