//! Bus object kinds
//!
//! Buses chain through `override_bus_id` rather than the ordinary
//! parent back-reference; a bus with override id 0 is a master bus and
//! carries an audio-device share-set reference instead. Everything past
//! the property bundle is ducking, channel and HDR configuration this
//! crate does not edit, so it is preserved as an opaque tail.

use crate::error::Result;
use crate::io::{BoundedWriter, ByteReader};
use crate::wwise::props::PropBundle;

/// A mixing bus. Used for both the `Bus` and `AuxBus` kinds, which
/// share a payload layout and differ only in kind tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bus {
    pub id: u32,
    pub override_bus_id: u32,
    /// Audio-device share-set, present only on master buses
    /// (`override_bus_id == 0`).
    pub device_share_set: Option<u32>,
    pub props: PropBundle,
    pub positioning_bits: u8,
    pub tail: Vec<u8>,
}

impl Bus {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let id = reader.read_u32_le()?;
        let override_bus_id = reader.read_u32_le()?;
        let device_share_set = if override_bus_id == 0 {
            Some(reader.read_u32_le()?)
        } else {
            None
        };
        let props = PropBundle::parse(reader)?;
        let positioning_bits = reader.read_u8()?;
        let tail = reader.read_rest().to_vec();
        Ok(Self {
            id,
            override_bus_id,
            device_share_set,
            props,
            positioning_bits,
            tail,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        8 + self.device_share_set.map_or(0, |_| 4)
            + self.props.size()
            + 1
            + self.tail.len()
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.id)?;
        writer.write_u32_le(self.override_bus_id)?;
        if let Some(share_set) = self.device_share_set {
            writer.write_u32_le(share_set)?;
        }
        self.props.encode(writer)?;
        writer.write_u8(self.positioning_bits)?;
        writer.write_bytes(&self.tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_bus_carries_device_share_set() {
        let mut props = PropBundle::new();
        props.set_f32(0x05, -1.0);
        let bus = Bus {
            id: 0x1111,
            override_bus_id: 0,
            device_share_set: Some(0x2222),
            props,
            positioning_bits: 0x03,
            tail: vec![0xAA, 0xBB],
        };
        let mut w = BoundedWriter::new(bus.size(), "Bus");
        bus.encode(&mut w).unwrap();
        let bytes = w.finish().unwrap();
        let mut r = ByteReader::new(&bytes);
        assert_eq!(Bus::parse(&mut r).unwrap(), bus);
        assert!(r.is_empty());
    }

    #[test]
    fn child_bus_has_no_device_share_set() {
        let bus = Bus {
            id: 0x3333,
            override_bus_id: 0x1111,
            device_share_set: None,
            props: PropBundle::new(),
            positioning_bits: 0,
            tail: Vec::new(),
        };
        let mut w = BoundedWriter::new(bus.size(), "Bus");
        bus.encode(&mut w).unwrap();
        let bytes = w.finish().unwrap();
        let mut r = ByteReader::new(&bytes);
        assert_eq!(Bus::parse(&mut r).unwrap(), bus);
    }
}
