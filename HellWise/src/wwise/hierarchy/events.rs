//! Event, Action and State object kinds

use crate::error::Result;
use crate::io::{BoundedWriter, ByteReader};
use crate::wwise::props::{PropBundle, RangePropBundle};

/// A game-facing event: a u8-counted list of action ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: u32,
    pub action_ids: Vec<u32>,
}

impl Event {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let id = reader.read_u32_le()?;
        let count = reader.read_u8()? as usize;
        let mut action_ids = Vec::with_capacity(count);
        for _ in 0..count {
            action_ids.push(reader.read_u32_le()?);
        }
        Ok(Self { id, action_ids })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        5 + self.action_ids.len() * 4
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.id)?;
        writer.write_u8(self.action_ids.len() as u8)?;
        for &action_id in &self.action_ids {
            writer.write_u32_le(action_id)?;
        }
        Ok(())
    }
}

/// An event action. Type-specific parameters (by action type) are an
/// opaque tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub id: u32,
    pub action_type: u16,
    pub target_id: u32,
    pub is_bus: u8,
    pub props: PropBundle,
    pub ranged_props: RangePropBundle,
    pub tail: Vec<u8>,
}

impl Action {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            id: reader.read_u32_le()?,
            action_type: reader.read_u16_le()?,
            target_id: reader.read_u32_le()?,
            is_bus: reader.read_u8()?,
            props: PropBundle::parse(reader)?,
            ranged_props: RangePropBundle::parse(reader)?,
            tail: reader.read_rest().to_vec(),
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        11 + self.props.size() + self.ranged_props.size() + self.tail.len()
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.id)?;
        writer.write_u16_le(self.action_type)?;
        writer.write_u32_le(self.target_id)?;
        writer.write_u8(self.is_bus)?;
        self.props.encode(writer)?;
        self.ranged_props.encode(writer)?;
        writer.write_bytes(&self.tail)
    }
}

/// One property override of a game state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateValue {
    pub prop_id: u16,
    pub value: f32,
}

/// A game state's property overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub id: u32,
    pub values: Vec<StateValue>,
}

impl State {
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let id = reader.read_u32_le()?;
        let count = reader.read_u16_le()? as usize;
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(StateValue {
                prop_id: reader.read_u16_le()?,
                value: reader.read_f32_le()?,
            });
        }
        Ok(Self { id, values })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        6 + self.values.len() * 6
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.id)?;
        writer.write_u16_le(self.values.len() as u16)?;
        for value in &self.values {
            writer.write_u16_le(value.prop_id)?;
            writer.write_f32_le(value.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_round_trip() {
        let event = Event {
            id: 100,
            action_ids: vec![200, 300],
        };
        let mut w = BoundedWriter::new(event.size(), "Event");
        event.encode(&mut w).unwrap();
        let bytes = w.finish().unwrap();
        let mut r = ByteReader::new(&bytes);
        assert_eq!(Event::parse(&mut r).unwrap(), event);
        assert!(r.is_empty());
    }

    #[test]
    fn action_round_trip() {
        let action = Action {
            id: 200,
            action_type: 0x0403, // play
            target_id: 777,
            is_bus: 0,
            props: PropBundle::new(),
            ranged_props: RangePropBundle::new(),
            tail: vec![0x04, 0x00],
        };
        let mut w = BoundedWriter::new(action.size(), "Action");
        action.encode(&mut w).unwrap();
        let bytes = w.finish().unwrap();
        let mut r = ByteReader::new(&bytes);
        assert_eq!(Action::parse(&mut r).unwrap(), action);
    }

    #[test]
    fn state_round_trip() {
        let state = State {
            id: 55,
            values: vec![StateValue { prop_id: 0, value: -6.0 }],
        };
        let mut w = BoundedWriter::new(state.size(), "State");
        state.encode(&mut w).unwrap();
        let bytes = w.finish().unwrap();
        let mut r = ByteReader::new(&bytes);
        assert_eq!(State::parse(&mut r).unwrap(), state);
    }
}
