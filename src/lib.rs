//! Kinect Fitting Room - try clothes on with your hands.
//!
//! Hand cursor samples from a depth sensor are routed to on-screen clothing
//! buttons. Holding the hand over a button dwell-clicks it, which puts the
//! bound garment on.

pub mod config;
pub mod error;
pub mod gesture;
pub mod input;
pub mod session;
pub mod wardrobe;

pub use config::{ButtonLayout, FittingRoomConfig};
pub use error::{FittingRoomError, Result};
pub use session::{FittingRoomSession, SessionEvent, SessionSummary};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitting_room=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Kinect Fitting Room v{}", env!("CARGO_PKG_VERSION"));
}
