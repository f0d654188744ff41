#![deny(missing_docs)]

//! Puts 3D models in your hands. 👋
//!
//! `handoverlay` takes the hand landmarks a gesture recogniser produces for each video frame and
//! uses them to position, orient and scale 3D models overlaid on that video. Each model is bound
//! to one hand, left or right, and is only shown while that hand is in view.
//!
//! # Getting started
//! Describe your models in a [`config::SessionConfig`], start a [`Session`] with it and call
//! [`Session::tick`] with each new [`session::Frame`] of detections. A render pass can then query
//! the registry's world for visible models:
//!
//! ```ignore
//! let mut session = Session::new(&SessionConfig::load("session.json")?)?;
//! session.tick(&frame);
//! for (_, (model, transform)) in session
//!     .registry()
//!     .world()
//!     .query::<With<(&HandModel, &GlobalTransform), &Visible>>()
//!     .iter()
//! {
//!     draw(&model.asset, transform);
//! }
//! ```
//!
//! Rendering and landmark inference are left to other crates: this one only does the mapping.

pub use handoverlay_error::HandOverlayError;
pub use hecs;
pub use pose_mapper::PoseMapper;
pub use session::Session;

/// Components are data attached to bound models, and the detections that drive them
pub mod components;
/// The configuration a session is started from
pub mod config;
/// Contexts hold state shared between systems
pub mod contexts;
mod handoverlay_error;
/// Mapping from hand landmarks to model transforms
pub mod pose_mapper;
/// The frame loop
pub mod session;
/// Systems are functions called each frame to update bound models
pub mod systems;

/// Hand overlay result type
pub type HandOverlayResult<T> = std::result::Result<T, HandOverlayError>;
