#![allow(missing_docs)]
pub mod model_registry;

pub use model_registry::{BindingState, ModelRegistry};
