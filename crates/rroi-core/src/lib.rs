//! Core ROI data model for signal/image analysis.
//!
//! This crate provides the geometry primitives, coordinate frames, ROI
//! shapes and collections, and the data-object model they attach to.
//! Mask rasterization lives in `rroi-mask`; interactive editing in
//! `rroi-session`.

pub mod error;
pub mod frame;
pub mod geometry;
pub mod object;
pub mod roi;

pub use error::{Result, RoiError};
pub use frame::{ImageFrame, SignalFrame};
pub use geometry::{GeometryShape, ShapeKind};
pub use object::{ImageObj, SignalObj};
pub use roi::{roi_title, ImageRoi, PlainEntry, PlainRoi, RoiItemSpec, RoiShape, SignalRoi};
