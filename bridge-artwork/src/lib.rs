//! Artwork resolution for zonebridge
//!
//! The controller references artwork by opaque, session-scoped image keys;
//! the bytes themselves are fetched out-of-band through an image
//! collaborator supplied by the pairing layer. This crate provides:
//!
//! - [`ImageSource`]: the capability trait the pairing layer implements
//! - [`ArtworkFetcher`]: one fetch per call, raced against a fixed
//!   deadline, memoized through a capacity- and TTL-bounded cache
//!
//! Resolved artwork is returned as a `data:<mime>;base64,...` URL ready to
//! be attached to an outgoing now-playing message. Every failure mode
//! (no source installed, collaborator error, deadline elapsed) resolves to
//! "no artwork" rather than an error - a missing thumbnail must never
//! block a now-playing update.

pub mod fetcher;
pub mod source;

pub use fetcher::{ArtworkFetcher, CACHE_CAPACITY, CACHE_TTL, FETCH_TIMEOUT};
pub use source::{ImageKey, ImageRequest, ImageResponse, ImageScale, ImageSource, ImageSourceError};
