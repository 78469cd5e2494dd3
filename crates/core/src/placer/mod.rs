//! Placer module for moving downloaded files to their durable location.
//!
//! Placement is exclusive: an existing target is never replaced. When the
//! target name is already taken, the new file is deleted and the collision is
//! reported to the caller.
//!
//! # Features
//!
//! - Atomic moves when source and destination are on the same filesystem
//! - Automatic fallback to an exclusive copy when the rename crosses devices
//! - Automatic parent directory creation
//!
//! # Example
//!
//! ```ignore
//! use ticketdl_core::placer::{FsPlacer, Placement, Placer};
//!
//! let placer = FsPlacer::with_defaults();
//! match placer.place_exclusive(&downloaded, &source_dir.join("T-1-01.zip")).await? {
//!     Placement::Placed { destination, .. } => println!("placed {}", destination.display()),
//!     Placement::Collision { target } => println!("{} already existed", target.display()),
//! }
//! ```

mod config;
mod error;
mod fs_placer;
mod traits;
mod types;

pub use config::PlacerConfig;
pub use error::PlacerError;
pub use fs_placer::FsPlacer;
pub use traits::Placer;
pub use types::Placement;
