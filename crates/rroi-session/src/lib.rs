//! Interactive ROI editing decoupled from any plotting toolkit.
//!
//! A GUI wraps its plot items in [`RoiProxyItem`] handles and drives a
//! [`SignalEditSession`] or [`ImageEditSession`]; the session owns the
//! edit lifecycle (seeding, title renumbering, OK gating) and writes the
//! result back to the data object only on commit.

pub mod proxy;
pub mod session;

pub use proxy::{roi_shape_from_item, ProxyKind, RoiProxyItem};
pub use session::{ImageEditSession, SessionState, SignalEditSession};
