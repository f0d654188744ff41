/// The Visibility component determines whether a bound model is shown or hidden.
///
/// During each tick, `hand_models_system` inserts it for models whose hand was detected and
/// removes it for the rest.
///
/// Basic usage:
/// ```ignore
/// world.insert_one(entity, Visible {})
/// world.remove_one::<Visible>(entity)
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Visible {}
