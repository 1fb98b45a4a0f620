//! Collaborator traits defined in `content-core` and implemented at the
//! edges of the system (snapshot transport, persistence, table widget).

pub mod render;
pub mod sink;
pub mod snapshot;

pub use render::RenderSurface;
pub use sink::ChangeSink;
pub use snapshot::SnapshotSource;
