//! The polymorphic hierarchy object and its owning collection
//!
//! Every object in the HIRC chunk is one [`HircObject`] variant. Decode
//! dispatches on the one-byte kind tag; kinds this crate does not model
//! are preserved verbatim as [`UnknownHirc`] so the bank still
//! round-trips byte-for-byte. Encode is two-pass: `size()` computes the
//! exact payload length, then the bounded writer proves the encoder
//! agrees.

use crate::error::{Error, Result};
use crate::io::{BoundedWriter, ByteReader};

use super::base_params::BaseParameter;
use super::bus::Bus;
use super::containers::{ActorMixer, LayerCntr, RanSeqCntr, SwitchCntr, DEFAULT_PLAYLIST_WEIGHT};
use super::effects::{Attenuation, EnvelopeModulator, FxModule};
use super::events::{Action, Event, State};
use super::music::{MusicNode, MusicTrack};
use super::sound::Sound;

/// Hierarchy object kind, mirroring the on-disk kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HircKind {
    State,
    Sound,
    Action,
    Event,
    RanSeqCntr,
    SwitchCntr,
    ActorMixer,
    Bus,
    LayerCntr,
    MusicSegment,
    MusicTrack,
    MusicSwitchCntr,
    MusicRanSeqCntr,
    Attenuation,
    FxShareSet,
    FxCustom,
    AuxBus,
    EnvelopeModulator,
    /// A kind this crate does not model.
    Unknown,
}

impl HircKind {
    /// Map an on-disk kind tag, `None` for unmodeled kinds.
    #[must_use]
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(Self::State),
            0x02 => Some(Self::Sound),
            0x03 => Some(Self::Action),
            0x04 => Some(Self::Event),
            0x05 => Some(Self::RanSeqCntr),
            0x06 => Some(Self::SwitchCntr),
            0x07 => Some(Self::ActorMixer),
            0x08 => Some(Self::Bus),
            0x09 => Some(Self::LayerCntr),
            0x0A => Some(Self::MusicSegment),
            0x0B => Some(Self::MusicTrack),
            0x0C => Some(Self::MusicSwitchCntr),
            0x0D => Some(Self::MusicRanSeqCntr),
            0x0E => Some(Self::Attenuation),
            0x10 => Some(Self::FxShareSet),
            0x11 => Some(Self::FxCustom),
            0x12 => Some(Self::AuxBus),
            0x14 => Some(Self::EnvelopeModulator),
            _ => None,
        }
    }

    /// Human-readable kind name for error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::State => "State",
            Self::Sound => "Sound",
            Self::Action => "Action",
            Self::Event => "Event",
            Self::RanSeqCntr => "RanSeqCntr",
            Self::SwitchCntr => "SwitchCntr",
            Self::ActorMixer => "ActorMixer",
            Self::Bus => "Bus",
            Self::LayerCntr => "LayerCntr",
            Self::MusicSegment => "MusicSegment",
            Self::MusicTrack => "MusicTrack",
            Self::MusicSwitchCntr => "MusicSwitchCntr",
            Self::MusicRanSeqCntr => "MusicRanSeqCntr",
            Self::Attenuation => "Attenuation",
            Self::FxShareSet => "FxShareSet",
            Self::FxCustom => "FxCustom",
            Self::AuxBus => "AuxBus",
            Self::EnvelopeModulator => "EnvelopeModulator",
            Self::Unknown => "Unknown",
        }
    }
}

/// Verbatim payload of an unmodeled hierarchy object kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHirc {
    /// The raw on-disk kind tag.
    pub tag: u8,
    /// The complete declared-size payload, untouched.
    pub data: Vec<u8>,
}

/// One node of the hierarchy object graph.
#[derive(Debug, Clone, PartialEq)]
pub enum HircObject {
    State(State),
    Sound(Sound),
    Action(Action),
    Event(Event),
    RanSeqCntr(RanSeqCntr),
    SwitchCntr(SwitchCntr),
    ActorMixer(ActorMixer),
    Bus(Bus),
    LayerCntr(LayerCntr),
    MusicSegment(MusicNode),
    MusicTrack(MusicTrack),
    MusicSwitchCntr(MusicNode),
    MusicRanSeqCntr(MusicNode),
    Attenuation(Attenuation),
    FxShareSet(FxModule),
    FxCustom(FxModule),
    AuxBus(Bus),
    EnvelopeModulator(EnvelopeModulator),
    Unknown(UnknownHirc),
}

/// Fail when a fully-modeled kind left bytes unconsumed: the model and
/// the bank disagree, and re-encoding would be lossy.
fn expect_consumed(reader: &ByteReader<'_>, id: u32, kind: HircKind) -> Result<()> {
    if reader.is_empty() {
        Ok(())
    } else {
        Err(Error::MalformedObject {
            id,
            kind: kind.name(),
            message: format!("{} bytes left after payload", reader.remaining()),
        })
    }
}

impl HircObject {
    /// Parse one object record: kind tag, declared size, payload.
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let tag = reader.read_u8()?;
        let declared = reader.read_u32_le()? as usize;
        let payload = reader.read_bytes(declared)?;
        let mut r = ByteReader::new(payload);

        let object = match HircKind::from_tag(tag) {
            None => {
                return Ok(Self::Unknown(UnknownHirc {
                    tag,
                    data: payload.to_vec(),
                }))
            }
            Some(kind) => {
                let object = match kind {
                    HircKind::State => Self::State(State::parse(&mut r)?),
                    HircKind::Sound => Self::Sound(Sound::parse(&mut r)?),
                    HircKind::Action => Self::Action(Action::parse(&mut r)?),
                    HircKind::Event => Self::Event(Event::parse(&mut r)?),
                    HircKind::RanSeqCntr => Self::RanSeqCntr(RanSeqCntr::parse(&mut r)?),
                    HircKind::SwitchCntr => Self::SwitchCntr(SwitchCntr::parse(&mut r)?),
                    HircKind::ActorMixer => Self::ActorMixer(ActorMixer::parse(&mut r)?),
                    HircKind::Bus => Self::Bus(Bus::parse(&mut r)?),
                    HircKind::LayerCntr => Self::LayerCntr(LayerCntr::parse(&mut r)?),
                    HircKind::MusicSegment => Self::MusicSegment(MusicNode::parse(&mut r)?),
                    HircKind::MusicTrack => Self::MusicTrack(MusicTrack::parse(&mut r)?),
                    HircKind::MusicSwitchCntr => Self::MusicSwitchCntr(MusicNode::parse(&mut r)?),
                    HircKind::MusicRanSeqCntr => Self::MusicRanSeqCntr(MusicNode::parse(&mut r)?),
                    HircKind::Attenuation => Self::Attenuation(Attenuation::parse(&mut r)?),
                    HircKind::FxShareSet => Self::FxShareSet(FxModule::parse(&mut r)?),
                    HircKind::FxCustom => Self::FxCustom(FxModule::parse(&mut r)?),
                    HircKind::AuxBus => Self::AuxBus(Bus::parse(&mut r)?),
                    HircKind::EnvelopeModulator => {
                        Self::EnvelopeModulator(EnvelopeModulator::parse(&mut r)?)
                    }
                    HircKind::Unknown => unreachable!("from_tag never returns Unknown"),
                };
                expect_consumed(&r, object.id()?, kind)?;
                object
            }
        };
        Ok(object)
    }

    /// This object's kind.
    #[must_use]
    pub fn kind(&self) -> HircKind {
        match self {
            Self::State(_) => HircKind::State,
            Self::Sound(_) => HircKind::Sound,
            Self::Action(_) => HircKind::Action,
            Self::Event(_) => HircKind::Event,
            Self::RanSeqCntr(_) => HircKind::RanSeqCntr,
            Self::SwitchCntr(_) => HircKind::SwitchCntr,
            Self::ActorMixer(_) => HircKind::ActorMixer,
            Self::Bus(_) => HircKind::Bus,
            Self::LayerCntr(_) => HircKind::LayerCntr,
            Self::MusicSegment(_) => HircKind::MusicSegment,
            Self::MusicTrack(_) => HircKind::MusicTrack,
            Self::MusicSwitchCntr(_) => HircKind::MusicSwitchCntr,
            Self::MusicRanSeqCntr(_) => HircKind::MusicRanSeqCntr,
            Self::Attenuation(_) => HircKind::Attenuation,
            Self::FxShareSet(_) => HircKind::FxShareSet,
            Self::FxCustom(_) => HircKind::FxCustom,
            Self::AuxBus(_) => HircKind::AuxBus,
            Self::EnvelopeModulator(_) => HircKind::EnvelopeModulator,
            Self::Unknown(_) => HircKind::Unknown,
        }
    }

    /// The on-disk kind tag.
    #[must_use]
    pub fn tag(&self) -> u8 {
        match self {
            Self::State(_) => 0x01,
            Self::Sound(_) => 0x02,
            Self::Action(_) => 0x03,
            Self::Event(_) => 0x04,
            Self::RanSeqCntr(_) => 0x05,
            Self::SwitchCntr(_) => 0x06,
            Self::ActorMixer(_) => 0x07,
            Self::Bus(_) => 0x08,
            Self::LayerCntr(_) => 0x09,
            Self::MusicSegment(_) => 0x0A,
            Self::MusicTrack(_) => 0x0B,
            Self::MusicSwitchCntr(_) => 0x0C,
            Self::MusicRanSeqCntr(_) => 0x0D,
            Self::Attenuation(_) => 0x0E,
            Self::FxShareSet(_) => 0x10,
            Self::FxCustom(_) => 0x11,
            Self::AuxBus(_) => 0x12,
            Self::EnvelopeModulator(_) => 0x14,
            Self::Unknown(unknown) => unknown.tag,
        }
    }

    /// The object's id, or an error for an unknown payload too short to
    /// carry one.
    pub fn id(&self) -> Result<u32> {
        match self {
            Self::State(o) => Ok(o.id),
            Self::Sound(o) => Ok(o.id),
            Self::Action(o) => Ok(o.id),
            Self::Event(o) => Ok(o.id),
            Self::RanSeqCntr(o) => Ok(o.id),
            Self::SwitchCntr(o) => Ok(o.id),
            Self::ActorMixer(o) => Ok(o.id),
            Self::Bus(o) | Self::AuxBus(o) => Ok(o.id),
            Self::LayerCntr(o) => Ok(o.id),
            Self::MusicSegment(o) | Self::MusicSwitchCntr(o) | Self::MusicRanSeqCntr(o) => Ok(o.id),
            Self::MusicTrack(o) => Ok(o.id),
            Self::Attenuation(o) => Ok(o.id),
            Self::FxShareSet(o) | Self::FxCustom(o) => Ok(o.id),
            Self::EnvelopeModulator(o) => Ok(o.id),
            Self::Unknown(unknown) => {
                // The first 4 payload bytes are the id for every known
                // kind, and for nearly every unmodeled one.
                if unknown.data.len() >= 4 {
                    Ok(u32::from_le_bytes([
                        unknown.data[0],
                        unknown.data[1],
                        unknown.data[2],
                        unknown.data[3],
                    ]))
                } else {
                    Err(Error::ObjectWithoutId { tag: unknown.tag })
                }
            }
        }
    }

    /// The exact encoded payload length (excluding tag and length
    /// prefix).
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::State(o) => o.size(),
            Self::Sound(o) => o.size(),
            Self::Action(o) => o.size(),
            Self::Event(o) => o.size(),
            Self::RanSeqCntr(o) => o.size(),
            Self::SwitchCntr(o) => o.size(),
            Self::ActorMixer(o) => o.size(),
            Self::Bus(o) | Self::AuxBus(o) => o.size(),
            Self::LayerCntr(o) => o.size(),
            Self::MusicSegment(o) | Self::MusicSwitchCntr(o) | Self::MusicRanSeqCntr(o) => o.size(),
            Self::MusicTrack(o) => o.size(),
            Self::Attenuation(o) => o.size(),
            Self::FxShareSet(o) | Self::FxCustom(o) => o.size(),
            Self::EnvelopeModulator(o) => o.size(),
            Self::Unknown(unknown) => unknown.data.len(),
        }
    }

    fn encode_payload(&self, writer: &mut BoundedWriter) -> Result<()> {
        match self {
            Self::State(o) => o.encode(writer),
            Self::Sound(o) => o.encode(writer),
            Self::Action(o) => o.encode(writer),
            Self::Event(o) => o.encode(writer),
            Self::RanSeqCntr(o) => o.encode(writer),
            Self::SwitchCntr(o) => o.encode(writer),
            Self::ActorMixer(o) => o.encode(writer),
            Self::Bus(o) | Self::AuxBus(o) => o.encode(writer),
            Self::LayerCntr(o) => o.encode(writer),
            Self::MusicSegment(o) | Self::MusicSwitchCntr(o) | Self::MusicRanSeqCntr(o) => {
                o.encode(writer)
            }
            Self::MusicTrack(o) => o.encode(writer),
            Self::Attenuation(o) => o.encode(writer),
            Self::FxShareSet(o) | Self::FxCustom(o) => o.encode(writer),
            Self::EnvelopeModulator(o) => o.encode(writer),
            Self::Unknown(unknown) => writer.write_bytes(&unknown.data),
        }
    }

    /// Full encoded record length: tag, length prefix, payload.
    #[must_use]
    pub fn record_size(&self) -> usize {
        5 + self.size()
    }

    /// Encode the full record (tag, declared size, payload) into the
    /// writer. The declared size always equals the payload bytes
    /// written, enforced by sizing the payload first.
    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        let size = self.size();
        writer.write_u8(self.tag())?;
        writer.write_u32_le(size as u32)?;
        let before = writer.pos();
        self.encode_payload(writer)?;
        let written = writer.pos() - before;
        if written != size {
            return Err(Error::SizeMismatch {
                what: "hierarchy object payload",
                expected: size,
                actual: written,
            });
        }
        Ok(())
    }

    /// Borrow the shared parameter block, for kinds that embed one.
    #[must_use]
    pub fn base_params(&self) -> Option<&BaseParameter> {
        match self {
            Self::Sound(o) => Some(&o.base),
            Self::RanSeqCntr(o) => Some(&o.base),
            Self::SwitchCntr(o) => Some(&o.base),
            Self::ActorMixer(o) => Some(&o.base),
            Self::LayerCntr(o) => Some(&o.base),
            Self::MusicSegment(o) | Self::MusicSwitchCntr(o) | Self::MusicRanSeqCntr(o) => {
                Some(&o.base)
            }
            _ => None,
        }
    }

    /// Mutably borrow the shared parameter block.
    #[must_use]
    pub fn base_params_mut(&mut self) -> Option<&mut BaseParameter> {
        match self {
            Self::Sound(o) => Some(&mut o.base),
            Self::RanSeqCntr(o) => Some(&mut o.base),
            Self::SwitchCntr(o) => Some(&mut o.base),
            Self::ActorMixer(o) => Some(&mut o.base),
            Self::LayerCntr(o) => Some(&mut o.base),
            Self::MusicSegment(o) | Self::MusicSwitchCntr(o) | Self::MusicRanSeqCntr(o) => {
                Some(&mut o.base)
            }
            _ => None,
        }
    }

    /// This object's parent back-reference, when it has one. `Some(0)`
    /// means the object is an unparented root.
    #[must_use]
    pub fn parent_id(&self) -> Option<u32> {
        self.base_params().map(|base| base.direct_parent_id)
    }

    /// True for kinds that own a child id list.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::RanSeqCntr(_)
                | Self::SwitchCntr(_)
                | Self::ActorMixer(_)
                | Self::LayerCntr(_)
                | Self::MusicSegment(_)
                | Self::MusicSwitchCntr(_)
                | Self::MusicRanSeqCntr(_)
        )
    }

    /// The child id list, empty for non-containers.
    #[must_use]
    pub fn child_ids(&self) -> &[u32] {
        match self {
            Self::RanSeqCntr(o) => &o.children,
            Self::SwitchCntr(o) => &o.children,
            Self::ActorMixer(o) => &o.children,
            Self::LayerCntr(o) => &o.children,
            Self::MusicSegment(o) | Self::MusicSwitchCntr(o) | Self::MusicRanSeqCntr(o) => {
                &o.children
            }
            _ => &[],
        }
    }

    /// Number of direct children.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.child_ids().len()
    }
}

/// The flat, owning list of hierarchy objects of one bank.
///
/// This is the sole owner: containment and parenting are weak
/// references by object id. There is no persistent index; lookups walk
/// the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HircCollection {
    pub objects: Vec<HircObject>,
}

impl HircCollection {
    /// Parse a HIRC chunk payload: u32 object count, then records.
    pub fn parse(reader: &mut ByteReader<'_>) -> Result<Self> {
        let count = reader.read_u32_le()? as usize;
        let mut objects = Vec::with_capacity(count);
        for _ in 0..count {
            objects.push(HircObject::parse(reader)?);
        }
        Ok(Self { objects })
    }

    /// Encoded HIRC payload length.
    #[must_use]
    pub fn size(&self) -> usize {
        4 + self.objects.iter().map(HircObject::record_size).sum::<usize>()
    }

    pub fn encode(&self, writer: &mut BoundedWriter) -> Result<()> {
        writer.write_u32_le(self.objects.len() as u32)?;
        for object in &self.objects {
            object.encode(writer)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn index_of(&self, id: u32) -> Option<usize> {
        self.objects
            .iter()
            .position(|object| object.id().map(|oid| oid == id).unwrap_or(false))
    }

    /// Borrow an object by id.
    pub fn get(&self, id: u32) -> Result<&HircObject> {
        self.index_of(id)
            .map(|i| &self.objects[i])
            .ok_or(Error::ObjectNotFound { id })
    }

    /// Mutably borrow an object by id.
    pub fn get_mut(&mut self, id: u32) -> Result<&mut HircObject> {
        let index = self.index_of(id).ok_or(Error::ObjectNotFound { id })?;
        Ok(&mut self.objects[index])
    }

    /// Append a new object to the collection.
    pub fn push(&mut self, object: HircObject) {
        self.objects.push(object);
    }

    /// Can this kind be leaf-mutated through [`Self::add_leaf`] and
    /// [`Self::remove_leaf`]?
    fn check_mutable_container(object: &HircObject, id: u32) -> Result<()> {
        match object {
            HircObject::ActorMixer(_) | HircObject::RanSeqCntr(_) => Ok(()),
            other if other.is_container() => Err(Error::LeafMutationUnsupported {
                kind: other.kind().name(),
            }),
            other => Err(Error::NotAContainer {
                id,
                kind: other.kind().name(),
            }),
        }
    }

    /// Attach `child_id` to `container_id`.
    ///
    /// Fails when the child is already parented or already listed;
    /// otherwise both the container's child list and the child's
    /// `DirectParentId` are updated - atomically, since every
    /// precondition is validated before the first write.
    pub fn add_leaf(&mut self, container_id: u32, child_id: u32) -> Result<()> {
        if container_id == child_id {
            return Err(Error::DuplicateChild {
                child: child_id,
                container: container_id,
            });
        }
        let container = self.get(container_id)?;
        Self::check_mutable_container(container, container_id)?;
        if container.child_ids().contains(&child_id) {
            return Err(Error::DuplicateChild {
                child: child_id,
                container: container_id,
            });
        }

        let child = self.get(child_id)?;
        let parent = child
            .base_params()
            .map(|base| base.direct_parent_id)
            .ok_or(Error::NoBaseParameters {
                id: child_id,
                kind: child.kind().name(),
            })?;
        if parent != 0 {
            return Err(Error::AlreadyParented {
                child: child_id,
                parent,
            });
        }

        // All preconditions hold; neither write below can fail.
        match self.get_mut(container_id)? {
            HircObject::ActorMixer(mixer) => mixer.children.push(child_id),
            HircObject::RanSeqCntr(cntr) => cntr.children.push(child_id),
            _ => unreachable!("validated as mutable container"),
        }
        if let Some(base) = self.get_mut(child_id)?.base_params_mut() {
            base.direct_parent_id = container_id;
        }
        Ok(())
    }

    /// Detach `child_id` from `container_id`.
    ///
    /// Removes the child from the container's list, purges any
    /// `RanSeqCntr` playlist items referencing it, and zeroes the
    /// child's `DirectParentId`.
    pub fn remove_leaf(&mut self, container_id: u32, child_id: u32) -> Result<()> {
        let container = self.get(container_id)?;
        Self::check_mutable_container(container, container_id)?;
        if !container.child_ids().contains(&child_id) {
            return Err(Error::NotAChild {
                child: child_id,
                container: container_id,
            });
        }
        // The child may legitimately be absent from the collection (a
        // dangling reference in a shipped bank); only clear its parent
        // when it exists.

        match self.get_mut(container_id)? {
            HircObject::ActorMixer(mixer) => mixer.children.retain(|&id| id != child_id),
            HircObject::RanSeqCntr(cntr) => {
                cntr.children.retain(|&id| id != child_id);
                cntr.purge_playlist(child_id);
            }
            _ => unreachable!("validated as mutable container"),
        }
        if let Ok(child) = self.get_mut(child_id) {
            if let Some(base) = child.base_params_mut() {
                base.direct_parent_id = 0;
            }
        }
        Ok(())
    }

    /// Move `child_id` under `new_container_id`, detaching it from its
    /// current parent first. Every precondition of both halves is
    /// validated before any state changes, so the operation either
    /// completes or leaves the hierarchy untouched.
    pub fn reparent(&mut self, child_id: u32, new_container_id: u32) -> Result<()> {
        // Validate the add half up front.
        if new_container_id == child_id {
            return Err(Error::DuplicateChild {
                child: child_id,
                container: new_container_id,
            });
        }
        let new_container = self.get(new_container_id)?;
        Self::check_mutable_container(new_container, new_container_id)?;
        if new_container.child_ids().contains(&child_id) {
            return Err(Error::DuplicateChild {
                child: child_id,
                container: new_container_id,
            });
        }

        let child = self.get(child_id)?;
        let current_parent = child
            .base_params()
            .map(|base| base.direct_parent_id)
            .ok_or(Error::NoBaseParameters {
                id: child_id,
                kind: child.kind().name(),
            })?;

        if current_parent != 0 {
            // The remove half must also be valid before we touch
            // anything.
            let old_container = self.get(current_parent)?;
            Self::check_mutable_container(old_container, current_parent)?;
            if !old_container.child_ids().contains(&child_id) {
                return Err(Error::NotAChild {
                    child: child_id,
                    container: current_parent,
                });
            }
            self.remove_leaf(current_parent, child_id)?;
        }
        self.add_leaf(new_container_id, child_id)
    }

    /// Add a playlist entry with the default weight.
    pub fn add_playlist_item(&mut self, container_id: u32, child_id: u32) -> Result<()> {
        self.add_playlist_item_weighted(container_id, child_id, DEFAULT_PLAYLIST_WEIGHT)
    }

    /// Add a weighted playlist entry on a `RanSeqCntr`.
    pub fn add_playlist_item_weighted(
        &mut self,
        container_id: u32,
        child_id: u32,
        weight: i32,
    ) -> Result<()> {
        match self.get_mut(container_id)? {
            HircObject::RanSeqCntr(cntr) => cntr.add_playlist_item(child_id, weight),
            other => Err(Error::LeafMutationUnsupported {
                kind: other.kind().name(),
            }),
        }
    }

    /// Remove a playlist entry on a `RanSeqCntr`.
    pub fn remove_playlist_item(&mut self, container_id: u32, child_id: u32) -> Result<()> {
        match self.get_mut(container_id)? {
            HircObject::RanSeqCntr(cntr) => cntr.remove_playlist_item(child_id).map(|_| ()),
            other => Err(Error::LeafMutationUnsupported {
                kind: other.kind().name(),
            }),
        }
    }

    /// Point a `Sound` object at different in-bank media.
    pub fn set_sound_source(&mut self, sound_id: u32, source_id: u32, media_size: u32) -> Result<()> {
        match self.get_mut(sound_id)? {
            HircObject::Sound(sound) => {
                sound.set_source(source_id, media_size);
                Ok(())
            }
            other => Err(Error::MalformedObject {
                id: sound_id,
                kind: other.kind().name(),
                message: "expected a Sound object".to_string(),
            }),
        }
    }
}
