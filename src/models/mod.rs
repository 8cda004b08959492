//! Data models for releases and encode jobs.

mod release;

pub use release::{Release, Track, TrackJob};
