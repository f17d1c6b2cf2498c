//! The HIRC object graph: object kinds, the owning collection, and
//! derived tree views
//!
//! Objects are owned by a single flat [`HircCollection`]; containment
//! and parenting are weak references by object id. Structural edits go
//! through the collection so both sides of every edge stay consistent.

pub mod base_params;
pub mod bus;
pub mod common;
pub mod containers;
pub mod effects;
pub mod events;
pub mod music;
pub mod object;
pub mod sound;
pub mod tree;

pub use base_params::{
    AdvSettings, AuxParams, BaseParameter, PathAutomation, PathListItem, PathVertex,
    PositioningParams,
};
pub use bus::Bus;
pub use common::{
    Curve, CurvePoint, FxChain, FxSlot, Rtpc, RtpcSet, SourceDescriptor, StateChunk, StateGroup,
    StateProp, StateTarget,
};
pub use containers::{
    ActorMixer, Layer, LayerChildCurve, LayerCntr, PlayListItem, RanSeqCntr, SwitchCntr,
    SwitchNodeParams, SwitchPackage, DEFAULT_PLAYLIST_WEIGHT,
};
pub use effects::{Attenuation, ConeParams, EnvelopeModulator, FxMediaSlot, FxModule};
pub use events::{Action, Event, State, StateValue};
pub use music::{MusicNode, MusicTrack};
pub use object::{HircCollection, HircKind, HircObject, UnknownHirc};
pub use sound::Sound;
pub use tree::{HierarchyTree, TreeNode};
