//! Wwise SoundBank model: chunks, the hierarchy object graph, and
//! property bundles

pub mod bank;
pub mod hierarchy;
pub mod props;

pub use bank::SoundBank;
pub use hierarchy::{HircCollection, HircObject};
pub use props::{PropBundle, Property, RangePropBundle};
