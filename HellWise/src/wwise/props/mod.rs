//! Property bundles and version translation
//!
//! Hierarchy objects carry their tunable parameters as sorted
//! (property-id, raw value) association lists. The one-byte on-disk
//! property codes are version-dependent; [`Property`] is the stable
//! semantic enum and [`translation`] maps it to and from the codes of
//! the owning bank's format version.

mod bundle;
pub mod translation;

pub use bundle::{PropBundle, RangePropBundle, RangeValue};
pub use translation::{Property, PropertyKind};
