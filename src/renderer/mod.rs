//! GPU-facing render data
//!
//! The scene itself is drawn elsewhere; this module only defines the vertex
//! layout for the particle buffer and packs live particles into it.

pub mod vertex;

pub use vertex::{ParticleBatch, ParticleVertex};
