#![allow(missing_docs)]
pub mod hand_models;
pub mod update_global_transform;

pub use hand_models::{hand_models_system, HandModelsUpdate};
pub use update_global_transform::update_global_transform_system;
