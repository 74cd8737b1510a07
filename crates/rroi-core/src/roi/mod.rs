//! ROI shapes and collections.

pub mod collection;
pub mod plain;
pub mod shape;

pub use collection::{ImageRoi, RoiItemSpec, SignalRoi};
pub use plain::{PlainEntry, PlainRoi};
pub use shape::{roi_title, RoiShape};
