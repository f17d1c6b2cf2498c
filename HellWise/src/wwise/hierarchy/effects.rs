//! Effect and modulation object kinds: attenuations, effect modules and
//! envelope modulators

use crate::error::Result;
use crate::io::{BoundedWriter, ByteReader};
use crate::wwise::props::{PropBundle, RangePropBundle};

use super::common::{Curve, RtpcSet};

/// Cone attenuation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeParams {
    pub inside_angle: f32,
    pub outside_angle: f32,
    pub outside_volume: f32,
    pub lo_pass: f32,
    pub hi_pass: f32,
}

/// Number of curve-usage slots in an attenuation.
pub const CURVE_USAGE_SLOTS: usize = 7;

/// A distance-based falloff curve set.
#[derive(Debug, Clone, PartialEq)]
pub struct Attenuation {
    pub id: u32,
    pub cone: Option<ConeParams>,
    /// Index into `curves` for each usage slot, -1 when unused.
    pub curve_to_use: [i8; CURVE_USAGE_SLOTS],
    pub curves: Vec<Curve>,
    pub rtpc: RtpcSet,
}

impl Attenuation {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let id = reader.read_u32_le()?;
        let cone = if reader.read_u8()? != 0 {
            Some(ConeParams {
                inside_angle: reader.read_f32_le()?,
                outside_angle: reader.read_f32_le()?,
                outside_volume: reader.read_f32_le()?,
                lo_pass: reader.read_f32_le()?,
                hi_pass: reader.read_f32_le()?,
            })
        } else {
            None
        };
        let mut curve_to_use = [0i8; CURVE_USAGE_SLOTS];
        for slot in &mut curve_to_use {
            *slot = reader.read_i8()?;
        }
        let curve_count = reader.read_u8()? as usize;
        let mut curves = Vec::with_capacity(curve_count);
        for _ in 0..curve_count {
            curves.push(Curve::parse(reader)?);
        }
        let rtpc = RtpcSet::parse(reader)?;
        Ok(Self {
            id,
            cone,
            curve_to_use,
            curves,
            rtpc,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        4 + 1
            + self.cone.map_or(0, |_| 20)
            + CURVE_USAGE_SLOTS
            + 1
            + self.curves.iter().map(Curve::size).sum::<usize>()
            + self.rtpc.size()
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.id)?;
        writer.write_u8(u8::from(self.cone.is_some()))?;
        if let Some(cone) = self.cone {
            writer.write_f32_le(cone.inside_angle)?;
            writer.write_f32_le(cone.outside_angle)?;
            writer.write_f32_le(cone.outside_volume)?;
            writer.write_f32_le(cone.lo_pass)?;
            writer.write_f32_le(cone.hi_pass)?;
        }
        for &slot in &self.curve_to_use {
            writer.write_i8(slot)?;
        }
        writer.write_u8(self.curves.len() as u8)?;
        for curve in &self.curves {
            curve.encode(writer)?;
        }
        self.rtpc.encode(writer)
    }
}

/// An in-bank media reference of an effect plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FxMediaSlot {
    pub index: u8,
    pub source_id: u32,
}

/// An effect instance: share set or custom, same payload layout.
///
/// The plugin parameter blob is codec-specific and opaque; the tail
/// holds property initialization this crate does not edit.
#[derive(Debug, Clone, PartialEq)]
pub struct FxModule {
    pub id: u32,
    pub plugin_id: u32,
    pub plugin_params: Vec<u8>,
    pub media: Vec<FxMediaSlot>,
    pub rtpc: RtpcSet,
    pub tail: Vec<u8>,
}

impl FxModule {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let id = reader.read_u32_le()?;
        let plugin_id = reader.read_u32_le()?;
        let param_size = reader.read_u32_le()? as usize;
        let plugin_params = reader.read_bytes(param_size)?.to_vec();
        let media_count = reader.read_u8()? as usize;
        let mut media = Vec::with_capacity(media_count);
        for _ in 0..media_count {
            media.push(FxMediaSlot {
                index: reader.read_u8()?,
                source_id: reader.read_u32_le()?,
            });
        }
        let rtpc = RtpcSet::parse(reader)?;
        let tail = reader.read_rest().to_vec();
        Ok(Self {
            id,
            plugin_id,
            plugin_params,
            media,
            rtpc,
            tail,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        12 + self.plugin_params.len() + 1 + self.media.len() * 5 + self.rtpc.size() + self.tail.len()
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.id)?;
        writer.write_u32_le(self.plugin_id)?;
        writer.write_u32_le(self.plugin_params.len() as u32)?;
        writer.write_bytes(&self.plugin_params)?;
        writer.write_u8(self.media.len() as u8)?;
        for slot in &self.media {
            writer.write_u8(slot.index)?;
            writer.write_u32_le(slot.source_id)?;
        }
        self.rtpc.encode(writer)?;
        writer.write_bytes(&self.tail)
    }
}

/// An envelope modulator.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeModulator {
    pub id: u32,
    pub props: PropBundle,
    pub ranged_props: RangePropBundle,
    pub rtpc: RtpcSet,
}

impl EnvelopeModulator {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            id: reader.read_u32_le()?,
            props: PropBundle::parse(reader)?,
            ranged_props: RangePropBundle::parse(reader)?,
            rtpc: RtpcSet::parse(reader)?,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        4 + self.props.size() + self.ranged_props.size() + self.rtpc.size()
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.id)?;
        self.props.encode(writer)?;
        self.ranged_props.encode(writer)?;
        self.rtpc.encode(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wwise::hierarchy::common::CurvePoint;

    #[test]
    fn attenuation_round_trip() {
        let attenuation = Attenuation {
            id: 5151,
            cone: Some(ConeParams {
                inside_angle: 45.0,
                outside_angle: 120.0,
                outside_volume: -12.0,
                lo_pass: 0.5,
                hi_pass: 0.0,
            }),
            curve_to_use: [0, -1, -1, 1, -1, -1, -1],
            curves: vec![
                Curve {
                    scaling: 2,
                    points: vec![
                        CurvePoint { x: 0.0, y: 0.0, interp: 4 },
                        CurvePoint { x: 100.0, y: -96.0, interp: 4 },
                    ],
                },
                Curve { scaling: 0, points: vec![] },
            ],
            rtpc: RtpcSet::default(),
        };
        let mut w = BoundedWriter::new(attenuation.size(), "Attenuation");
        attenuation.encode(&mut w).unwrap();
        let bytes = w.finish().unwrap();
        let mut r = ByteReader::new(&bytes);
        assert_eq!(Attenuation::parse(&mut r).unwrap(), attenuation);
        assert!(r.is_empty());
    }

    #[test]
    fn fx_module_round_trip() {
        let fx = FxModule {
            id: 626,
            plugin_id: 0x00640002,
            plugin_params: vec![0u8; 24],
            media: vec![FxMediaSlot { index: 0, source_id: 909 }],
            rtpc: RtpcSet::default(),
            tail: vec![1, 2],
        };
        let mut w = BoundedWriter::new(fx.size(), "FxModule");
        fx.encode(&mut w).unwrap();
        let bytes = w.finish().unwrap();
        let mut r = ByteReader::new(&bytes);
        assert_eq!(FxModule::parse(&mut r).unwrap(), fx);
    }
}
