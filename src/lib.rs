#![warn(missing_docs)]
//! reelgen - prompt-to-video generation via Google's Veo API.
//!
//! Submits a generation job for a text prompt (plus an optional seed
//! image), polls the long-running operation until it finishes, downloads
//! the result and hands it back as an in-memory [`VideoHandle`].
//!
//! # Quick Start
//!
//! ```no_run
//! use reelgen::{Orchestrator, VideoRequest};
//!
//! #[tokio::main]
//! async fn main() -> reelgen::Result<()> {
//!     let orchestrator = Orchestrator::builder().build()?;
//!     let request = VideoRequest::new("A cat skateboarding through a neon city");
//!     let video = orchestrator.generate(&request).await?;
//!     video.save("cat.mp4")?;
//!     Ok(())
//! }
//! ```
//!
//! # Progress and cancellation
//!
//! ```no_run
//! use reelgen::{CancellationToken, Orchestrator, ProgressSender, VideoRequest};
//!
//! #[tokio::main]
//! async fn main() -> reelgen::Result<()> {
//!     let orchestrator = Orchestrator::builder().build()?;
//!     let request = VideoRequest::new("Ocean waves at sunset");
//!
//!     let (progress, mut events) = ProgressSender::channel(16);
//!     tokio::spawn(async move {
//!         while let Some(event) = events.recv().await {
//!             eprintln!("{event}");
//!         }
//!     });
//!
//!     let cancel = CancellationToken::new();
//!     let video = orchestrator.generate_with(&request, &progress, &cancel).await?;
//!     println!("{} bytes", video.size());
//!     Ok(())
//! }
//! ```

mod error;
mod media;
mod orchestrator;
mod progress;
mod types;

pub use error::{ReelGenError, Result};
pub use media::{VideoHandle, VideoMetadata};
pub use orchestrator::{Orchestrator, OrchestratorBuilder};
pub use progress::{Progress, ProgressSender};
pub use types::{ImageFormat, ImageInput, VideoModel, VideoRequest};

// Re-exported so callers don't need a direct tokio-util dependency.
pub use tokio_util::sync::CancellationToken;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{ReelGenError, Result};
    pub use crate::media::VideoHandle;
    pub use crate::orchestrator::Orchestrator;
    pub use crate::progress::{Progress, ProgressSender};
    pub use crate::types::{ImageInput, VideoRequest};
    pub use tokio_util::sync::CancellationToken;
}
