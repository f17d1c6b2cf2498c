//! Container object kinds: actor mixers, random/sequence, switch and
//! layer containers
//!
//! Containment is by weak reference: containers own an ordered list of
//! child object ids, never the objects themselves. Leaf mutation for
//! `ActorMixer` and `RanSeqCntr` is driven from the owning collection
//! (see [`super::HircCollection`]); `SwitchCntr` and `LayerCntr` only
//! round-trip their child lists for now.

use crate::error::{Error, Result};
use crate::io::{BoundedWriter, ByteReader};

use super::base_params::BaseParameter;
use super::common::{child_ids_size, encode_child_ids, parse_child_ids, CurvePoint, RtpcSet};

/// One weighted playlist entry of a [`RanSeqCntr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayListItem {
    pub id: u32,
    pub weight: i32,
}

/// Default playlist weight for newly added items.
pub const DEFAULT_PLAYLIST_WEIGHT: i32 = 50000;

/// Random/sequence container.
#[derive(Debug, Clone, PartialEq)]
pub struct RanSeqCntr {
    pub id: u32,
    pub base: BaseParameter,
    pub loop_count: u16,
    pub loop_mod_min: u16,
    pub loop_mod_max: u16,
    pub transition_time: f32,
    pub transition_time_mod_min: f32,
    pub transition_time_mod_max: f32,
    pub avoid_repeat_count: u16,
    pub transition_mode: u8,
    pub random_mode: u8,
    /// 0 = random, 1 = sequence.
    pub mode: u8,
    pub flags: u8,
    pub children: Vec<u32>,
    pub playlist: Vec<PlayListItem>,
}

impl RanSeqCntr {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let id = reader.read_u32_le()?;
        let base = BaseParameter::parse(reader)?;
        let loop_count = reader.read_u16_le()?;
        let loop_mod_min = reader.read_u16_le()?;
        let loop_mod_max = reader.read_u16_le()?;
        let transition_time = reader.read_f32_le()?;
        let transition_time_mod_min = reader.read_f32_le()?;
        let transition_time_mod_max = reader.read_f32_le()?;
        let avoid_repeat_count = reader.read_u16_le()?;
        let transition_mode = reader.read_u8()?;
        let random_mode = reader.read_u8()?;
        let mode = reader.read_u8()?;
        let flags = reader.read_u8()?;
        let children = parse_child_ids(reader)?;
        let playlist_count = reader.read_u16_le()? as usize;
        let mut playlist = Vec::with_capacity(playlist_count);
        for _ in 0..playlist_count {
            playlist.push(PlayListItem {
                id: reader.read_u32_le()?,
                weight: reader.read_i32_le()?,
            });
        }
        Ok(Self {
            id,
            base,
            loop_count,
            loop_mod_min,
            loop_mod_max,
            transition_time,
            transition_time_mod_min,
            transition_time_mod_max,
            avoid_repeat_count,
            transition_mode,
            random_mode,
            mode,
            flags,
            children,
            playlist,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        4 + self.base.size()
            + 24
            + child_ids_size(&self.children)
            + 2
            + self.playlist.len() * 8
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.id)?;
        self.base.encode(writer)?;
        writer.write_u16_le(self.loop_count)?;
        writer.write_u16_le(self.loop_mod_min)?;
        writer.write_u16_le(self.loop_mod_max)?;
        writer.write_f32_le(self.transition_time)?;
        writer.write_f32_le(self.transition_time_mod_min)?;
        writer.write_f32_le(self.transition_time_mod_max)?;
        writer.write_u16_le(self.avoid_repeat_count)?;
        writer.write_u8(self.transition_mode)?;
        writer.write_u8(self.random_mode)?;
        writer.write_u8(self.mode)?;
        writer.write_u8(self.flags)?;
        encode_child_ids(&self.children, writer)?;
        writer.write_u16_le(self.playlist.len() as u16)?;
        for item in &self.playlist {
            writer.write_u32_le(item.id)?;
            writer.write_i32_le(item.weight)?;
        }
        Ok(())
    }

    /// Add a weighted playlist entry for a child.
    ///
    /// The child must already be listed in this container's children
    /// (playlist membership is a subset of containment) and must not
    /// already have a playlist entry.
    pub fn add_playlist_item(&mut self, child_id: u32, weight: i32) -> Result<()> {
        if !self.children.contains(&child_id) {
            return Err(Error::NotAChild {
                child: child_id,
                container: self.id,
            });
        }
        if self.playlist.iter().any(|item| item.id == child_id) {
            return Err(Error::PlaylistItemExists {
                child: child_id,
                container: self.id,
            });
        }
        self.playlist.push(PlayListItem {
            id: child_id,
            weight,
        });
        Ok(())
    }

    /// Remove the playlist entry for a child.
    pub fn remove_playlist_item(&mut self, child_id: u32) -> Result<PlayListItem> {
        let pos = self
            .playlist
            .iter()
            .position(|item| item.id == child_id)
            .ok_or(Error::PlaylistItemNotFound {
                child: child_id,
                container: self.id,
            })?;
        Ok(self.playlist.remove(pos))
    }

    /// Drop every playlist entry referencing a child. Used when the
    /// child leaves the container, to keep the subset invariant.
    pub fn purge_playlist(&mut self, child_id: u32) {
        self.playlist.retain(|item| item.id != child_id);
    }
}

/// Actor mixer: groups children for shared parameters, no playback
/// behavior of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorMixer {
    pub id: u32,
    pub base: BaseParameter,
    pub children: Vec<u32>,
}

impl ActorMixer {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            id: reader.read_u32_le()?,
            base: BaseParameter::parse(reader)?,
            children: parse_child_ids(reader)?,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        4 + self.base.size() + child_ids_size(&self.children)
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.id)?;
        self.base.encode(writer)?;
        encode_child_ids(&self.children, writer)
    }
}

/// One switch/state binding: which children play for a switch value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchPackage {
    pub switch_id: u32,
    pub node_ids: Vec<u32>,
}

/// Per-child playback parameters of a switch container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchNodeParams {
    pub node_id: u32,
    pub playback_bits: u8,
    pub mode_bits: u8,
    pub fade_out: i32,
    pub fade_in: i32,
}

/// Switch container.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCntr {
    pub id: u32,
    pub base: BaseParameter,
    pub group_type: u8,
    pub group_id: u32,
    pub default_switch: u32,
    pub is_continuous_validation: u8,
    pub children: Vec<u32>,
    pub packages: Vec<SwitchPackage>,
    pub node_params: Vec<SwitchNodeParams>,
}

impl SwitchCntr {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let id = reader.read_u32_le()?;
        let base = BaseParameter::parse(reader)?;
        let group_type = reader.read_u8()?;
        let group_id = reader.read_u32_le()?;
        let default_switch = reader.read_u32_le()?;
        let is_continuous_validation = reader.read_u8()?;
        let children = parse_child_ids(reader)?;
        let package_count = reader.read_u32_le()? as usize;
        let mut packages = Vec::with_capacity(package_count);
        for _ in 0..package_count {
            let switch_id = reader.read_u32_le()?;
            packages.push(SwitchPackage {
                switch_id,
                node_ids: parse_child_ids(reader)?,
            });
        }
        let param_count = reader.read_u32_le()? as usize;
        let mut node_params = Vec::with_capacity(param_count);
        for _ in 0..param_count {
            node_params.push(SwitchNodeParams {
                node_id: reader.read_u32_le()?,
                playback_bits: reader.read_u8()?,
                mode_bits: reader.read_u8()?,
                fade_out: reader.read_i32_le()?,
                fade_in: reader.read_i32_le()?,
            });
        }
        Ok(Self {
            id,
            base,
            group_type,
            group_id,
            default_switch,
            is_continuous_validation,
            children,
            packages,
            node_params,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        4 + self.base.size()
            + 10
            + child_ids_size(&self.children)
            + 4
            + self
                .packages
                .iter()
                .map(|p| 4 + child_ids_size(&p.node_ids))
                .sum::<usize>()
            + 4
            + self.node_params.len() * 14
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.id)?;
        self.base.encode(writer)?;
        writer.write_u8(self.group_type)?;
        writer.write_u32_le(self.group_id)?;
        writer.write_u32_le(self.default_switch)?;
        writer.write_u8(self.is_continuous_validation)?;
        encode_child_ids(&self.children, writer)?;
        writer.write_u32_le(self.packages.len() as u32)?;
        for package in &self.packages {
            writer.write_u32_le(package.switch_id)?;
            encode_child_ids(&package.node_ids, writer)?;
        }
        writer.write_u32_le(self.node_params.len() as u32)?;
        for params in &self.node_params {
            writer.write_u32_le(params.node_id)?;
            writer.write_u8(params.playback_bits)?;
            writer.write_u8(params.mode_bits)?;
            writer.write_i32_le(params.fade_out)?;
            writer.write_i32_le(params.fade_in)?;
        }
        Ok(())
    }
}

/// Crossfade curve of one child within a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerChildCurve {
    pub child_id: u32,
    pub points: Vec<CurvePoint>,
}

/// One layer of a [`LayerCntr`]: an RTPC binding plus per-child curves.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub layer_id: u32,
    pub rtpc: RtpcSet,
    pub rtpc_id: u32,
    pub rtpc_type: u8,
    pub curves: Vec<LayerChildCurve>,
}

impl Layer {
    fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let layer_id = reader.read_u32_le()?;
        let rtpc = RtpcSet::parse(reader)?;
        let rtpc_id = reader.read_u32_le()?;
        let rtpc_type = reader.read_u8()?;
        let curve_count = reader.read_u32_le()? as usize;
        let mut curves = Vec::with_capacity(curve_count);
        for _ in 0..curve_count {
            let child_id = reader.read_u32_le()?;
            let point_count = reader.read_u32_le()? as usize;
            let mut points = Vec::with_capacity(point_count);
            for _ in 0..point_count {
                points.push(CurvePoint::parse(reader)?);
            }
            curves.push(LayerChildCurve { child_id, points });
        }
        Ok(Self {
            layer_id,
            rtpc,
            rtpc_id,
            rtpc_type,
            curves,
        })
    }

    fn size(&self) -> usize {
        4 + self.rtpc.size()
            + 5
            + 4
            + self
                .curves
                .iter()
                .map(|c| 8 + c.points.len() * CurvePoint::SIZE)
                .sum::<usize>()
    }

    fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.layer_id)?;
        self.rtpc.encode(writer)?;
        writer.write_u32_le(self.rtpc_id)?;
        writer.write_u8(self.rtpc_type)?;
        writer.write_u32_le(self.curves.len() as u32)?;
        for curve in &self.curves {
            writer.write_u32_le(curve.child_id)?;
            writer.write_u32_le(curve.points.len() as u32)?;
            for point in &curve.points {
                point.encode(writer)?;
            }
        }
        Ok(())
    }
}

/// Layer container: plays all children, crossfading between layers.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerCntr {
    pub id: u32,
    pub base: BaseParameter,
    pub children: Vec<u32>,
    pub layers: Vec<Layer>,
    pub is_continuous_validation: u8,
}

impl LayerCntr {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let id = reader.read_u32_le()?;
        let base = BaseParameter::parse(reader)?;
        let children = parse_child_ids(reader)?;
        let layer_count = reader.read_u32_le()? as usize;
        let mut layers = Vec::with_capacity(layer_count);
        for _ in 0..layer_count {
            layers.push(Layer::parse(reader)?);
        }
        let is_continuous_validation = reader.read_u8()?;
        Ok(Self {
            id,
            base,
            children,
            layers,
            is_continuous_validation,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        4 + self.base.size()
            + child_ids_size(&self.children)
            + 4
            + self.layers.iter().map(Layer::size).sum::<usize>()
            + 1
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.id)?;
        self.base.encode(writer)?;
        encode_child_ids(&self.children, writer)?;
        writer.write_u32_le(self.layers.len() as u32)?;
        for layer in &self.layers {
            layer.encode(writer)?;
        }
        writer.write_u8(self.is_continuous_validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ran_seq(id: u32) -> RanSeqCntr {
        RanSeqCntr {
            id,
            base: BaseParameter::default(),
            loop_count: 1,
            loop_mod_min: 0,
            loop_mod_max: 0,
            transition_time: 0.0,
            transition_time_mod_min: 0.0,
            transition_time_mod_max: 0.0,
            avoid_repeat_count: 2,
            transition_mode: 0,
            random_mode: 0,
            mode: 0,
            flags: 0x12,
            children: vec![10, 20],
            playlist: vec![
                PlayListItem { id: 10, weight: 50000 },
                PlayListItem { id: 20, weight: 25000 },
            ],
        }
    }

    #[test]
    fn ran_seq_round_trip() {
        let cntr = ran_seq(777);
        let mut w = BoundedWriter::new(cntr.size(), "RanSeqCntr");
        cntr.encode(&mut w).unwrap();
        let bytes = w.finish().unwrap();
        let mut r = ByteReader::new(&bytes);
        assert_eq!(RanSeqCntr::parse(&mut r).unwrap(), cntr);
        assert!(r.is_empty());
    }

    #[test]
    fn playlist_requires_containment() {
        let mut cntr = ran_seq(777);
        assert!(matches!(
            cntr.add_playlist_item(99, 1000),
            Err(Error::NotAChild { child: 99, container: 777 })
        ));
        assert!(matches!(
            cntr.add_playlist_item(10, 1000),
            Err(Error::PlaylistItemExists { child: 10, .. })
        ));
        cntr.children.push(30);
        cntr.add_playlist_item(30, 1000).unwrap();
        assert_eq!(cntr.playlist.len(), 3);
        cntr.remove_playlist_item(30).unwrap();
        assert!(matches!(
            cntr.remove_playlist_item(30),
            Err(Error::PlaylistItemNotFound { child: 30, .. })
        ));
    }

    #[test]
    fn switch_cntr_round_trip() {
        let cntr = SwitchCntr {
            id: 31337,
            base: BaseParameter::default(),
            group_type: 0,
            group_id: 555,
            default_switch: 666,
            is_continuous_validation: 1,
            children: vec![1, 2, 3],
            packages: vec![SwitchPackage {
                switch_id: 666,
                node_ids: vec![1, 3],
            }],
            node_params: vec![SwitchNodeParams {
                node_id: 1,
                playback_bits: 0,
                mode_bits: 1,
                fade_out: 200,
                fade_in: 100,
            }],
        };
        let mut w = BoundedWriter::new(cntr.size(), "SwitchCntr");
        cntr.encode(&mut w).unwrap();
        let bytes = w.finish().unwrap();
        let mut r = ByteReader::new(&bytes);
        assert_eq!(SwitchCntr::parse(&mut r).unwrap(), cntr);
        assert!(r.is_empty());
    }

    #[test]
    fn layer_cntr_round_trip() {
        let cntr = LayerCntr {
            id: 808,
            base: BaseParameter::default(),
            children: vec![5, 6],
            layers: vec![Layer {
                layer_id: 1,
                rtpc: RtpcSet::default(),
                rtpc_id: 900,
                rtpc_type: 0,
                curves: vec![LayerChildCurve {
                    child_id: 5,
                    points: vec![CurvePoint { x: 0.0, y: 1.0, interp: 4 }],
                }],
            }],
            is_continuous_validation: 0,
        };
        let mut w = BoundedWriter::new(cntr.size(), "LayerCntr");
        cntr.encode(&mut w).unwrap();
        let bytes = w.finish().unwrap();
        let mut r = ByteReader::new(&bytes);
        assert_eq!(LayerCntr::parse(&mut r).unwrap(), cntr);
        assert!(r.is_empty());
    }
}
