/// Component that adds some information about the entity
/// Useful for debugging - added by default by `ModelRegistry::add`
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct Info {
    /// A helpful name
    pub name: String,
    /// Position of the model in the configuration it was loaded from
    pub config_index: usize,
}
