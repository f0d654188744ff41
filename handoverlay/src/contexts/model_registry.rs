use hecs::{Entity, World};
use log::debug;

use crate::{
    components::{GlobalTransform, HandModel, Handedness, Info, LocalTransform, Visible},
    config::ModelConfig,
    HandOverlayError, HandOverlayResult,
};

/// The state of one binding, as a render pass or a test would want to see it
#[derive(Debug, Clone, PartialEq)]
pub struct BindingState {
    /// The hand driving the model
    pub handedness: Handedness,
    /// The model's asset
    pub asset: String,
    /// Is the model currently shown?
    pub visible: bool,
    /// The last transform applied to the model
    pub transform: LocalTransform,
}

/// The models known to the scene, each bound to one hand.
///
/// Each binding is an entity in the registry's [`World`] carrying a [`HandModel`], a
/// [`LocalTransform`], a [`GlobalTransform`] and, while it is shown, [`Visible`]. The registry
/// also remembers the order bindings were added in, which is the order they are reconciled and
/// reported in.
///
/// There is at most one binding per [`Handedness`].
#[derive(Default)]
pub struct ModelRegistry {
    world: World,
    bindings: Vec<(Handedness, Entity)>,
}

impl ModelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Default::default()
    }

    /// Create a registry with a binding for each model, in order
    pub fn from_config(models: &[ModelConfig]) -> HandOverlayResult<Self> {
        let mut registry = Self::new();
        for model in models {
            registry.add(model)?;
        }
        Ok(registry)
    }

    /// Bind a model to a hand. The model starts hidden, at its base transform.
    pub fn add(&mut self, config: &ModelConfig) -> HandOverlayResult<Entity> {
        if self.find(config.handedness).is_some() {
            return Err(HandOverlayError::DuplicateHandedness(config.handedness));
        }

        let hand_model = config.hand_model();
        let base_transform = hand_model.base_transform;
        let entity = self.world.spawn((
            Info {
                name: format!("{} Hand Model", config.handedness),
                config_index: self.bindings.len(),
            },
            hand_model,
            base_transform,
            GlobalTransform::from(base_transform),
        ));
        self.bindings.push((config.handedness, entity));
        debug!(
            "Bound {} to the {} hand as {entity:?}",
            config.asset, config.handedness
        );

        Ok(entity)
    }

    /// Unbind the model driven by `handedness`
    pub fn remove(&mut self, handedness: Handedness) -> HandOverlayResult<HandModel> {
        let position = self
            .bindings
            .iter()
            .position(|(h, _)| *h == handedness)
            .ok_or(HandOverlayError::BindingNotFound(handedness))?;
        let (_, entity) = self.bindings.remove(position);
        let hand_model = self
            .world
            .remove_one::<HandModel>(entity)
            .map_err(|_| HandOverlayError::BindingNotFound(handedness))?;
        self.world
            .despawn(entity)
            .map_err(|_| HandOverlayError::BindingNotFound(handedness))?;
        Ok(hand_model)
    }

    /// Find the entity of the model driven by `handedness`
    pub fn find(&self, handedness: Handedness) -> Option<Entity> {
        self.bindings
            .iter()
            .find(|(h, _)| *h == handedness)
            .map(|(_, e)| *e)
    }

    /// Iterate through the bindings in the order they were added
    pub fn iter(&self) -> impl Iterator<Item = (Handedness, Entity)> + '_ {
        self.bindings.iter().copied()
    }

    /// How many models are bound?
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Are there no models bound?
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Is the model driven by `handedness` currently shown?
    pub fn is_visible(&self, handedness: Handedness) -> HandOverlayResult<bool> {
        let entity = self.entity(handedness)?;
        let entity_ref = self
            .world
            .entity(entity)
            .map_err(|_| HandOverlayError::BindingNotFound(handedness))?;
        Ok(entity_ref.has::<Visible>())
    }

    /// Show or hide the model driven by `handedness`
    pub fn set_visible(&mut self, handedness: Handedness, visible: bool) -> HandOverlayResult<()> {
        let entity = self.entity(handedness)?;
        let currently_visible = self.is_visible(handedness)?;
        if visible && !currently_visible {
            self.world
                .insert_one(entity, Visible {})
                .map_err(|_| HandOverlayError::BindingNotFound(handedness))?;
        } else if !visible && currently_visible {
            self.world
                .remove_one::<Visible>(entity)
                .map_err(|_| HandOverlayError::BindingNotFound(handedness))?;
        }
        Ok(())
    }

    /// The last transform applied to the model driven by `handedness`
    pub fn local_transform(&self, handedness: Handedness) -> HandOverlayResult<LocalTransform> {
        let entity = self.entity(handedness)?;
        let local_transform = self
            .world
            .get::<&LocalTransform>(entity)
            .map_err(|_| HandOverlayError::BindingNotFound(handedness))?;
        Ok(*local_transform)
    }

    /// Apply a transform to the model driven by `handedness`
    pub fn set_local_transform(
        &mut self,
        handedness: Handedness,
        transform: LocalTransform,
    ) -> HandOverlayResult<()> {
        let entity = self.entity(handedness)?;
        let mut local_transform = self
            .world
            .get::<&mut LocalTransform>(entity)
            .map_err(|_| HandOverlayError::BindingNotFound(handedness))?;
        local_transform.set_position(transform.translation);
        local_transform.set_rotation(transform.rotation);
        local_transform.set_scale(transform.scale);
        Ok(())
    }

    /// Hide the model driven by `handedness` and move it back to its base transform
    pub fn reset(&mut self, handedness: Handedness) -> HandOverlayResult<()> {
        let entity = self.entity(handedness)?;
        let base_transform = self
            .world
            .get::<&HandModel>(entity)
            .map_err(|_| HandOverlayError::BindingNotFound(handedness))?
            .base_transform;
        self.set_visible(handedness, false)?;
        self.set_local_transform(handedness, base_transform)?;
        let mut global_transform = self
            .world
            .get::<&mut GlobalTransform>(entity)
            .map_err(|_| HandOverlayError::BindingNotFound(handedness))?;
        *global_transform = base_transform.into();
        Ok(())
    }

    /// The state of every binding, in the order they were added
    pub fn snapshot(&self) -> HandOverlayResult<Vec<BindingState>> {
        self.bindings
            .iter()
            .map(|&(handedness, entity)| {
                let asset = self
                    .world
                    .get::<&HandModel>(entity)
                    .map_err(|_| HandOverlayError::BindingNotFound(handedness))?
                    .asset
                    .clone();
                Ok(BindingState {
                    handedness,
                    asset,
                    visible: self.is_visible(handedness)?,
                    transform: self.local_transform(handedness)?,
                })
            })
            .collect()
    }

    /// The world holding the bindings, for a render pass to query
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world holding the bindings
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn entity(&self, handedness: Handedness) -> HandOverlayResult<Entity> {
        self.find(handedness)
            .ok_or(HandOverlayError::BindingNotFound(handedness))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn registry() -> ModelRegistry {
        let mut left = ModelConfig::new("left.glb", Handedness::Left);
        left.base_position = Vec3::new(0.0, 1.0, 0.0);
        let right = ModelConfig::new("right.glb", Handedness::Right);
        ModelRegistry::from_config(&[right, left]).unwrap()
    }

    #[test]
    fn test_bindings_start_hidden_at_base_transform() {
        let registry = registry();
        assert_eq!(registry.len(), 2);

        // Registration order is preserved.
        let order: Vec<_> = registry.iter().map(|(h, _)| h).collect();
        assert_eq!(order, vec![Handedness::Right, Handedness::Left]);

        for handedness in Handedness::ALL {
            assert!(!registry.is_visible(handedness).unwrap());
        }
        assert_eq!(
            registry.local_transform(Handedness::Left).unwrap().translation,
            Vec3::new(0.0, 1.0, 0.0)
        );

        let entity = registry.find(Handedness::Left).unwrap();
        let info = registry.world().get::<&Info>(entity).unwrap();
        assert_eq!(info.name, "Left Hand Model");
        assert_eq!(info.config_index, 1);
    }

    #[test]
    fn test_duplicate_binding_is_rejected() {
        let mut registry = registry();
        let result = registry.add(&ModelConfig::new("another.glb", Handedness::Left));
        assert!(matches!(
            result,
            Err(HandOverlayError::DuplicateHandedness(Handedness::Left))
        ));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_set_visible() {
        let mut registry = registry();
        registry.set_visible(Handedness::Right, true).unwrap();
        // Showing twice is fine.
        registry.set_visible(Handedness::Right, true).unwrap();
        assert!(registry.is_visible(Handedness::Right).unwrap());
        assert!(!registry.is_visible(Handedness::Left).unwrap());

        registry.set_visible(Handedness::Right, false).unwrap();
        registry.set_visible(Handedness::Right, false).unwrap();
        assert!(!registry.is_visible(Handedness::Right).unwrap());
    }

    #[test]
    fn test_reset_restores_base_transform() {
        let mut registry = registry();
        let base = registry.local_transform(Handedness::Left).unwrap();

        let moved = LocalTransform::new(Vec3::X, Vec3::Z, Vec3::splat(0.5));
        registry.set_local_transform(Handedness::Left, moved).unwrap();
        registry.set_visible(Handedness::Left, true).unwrap();

        registry.reset(Handedness::Left).unwrap();
        assert!(!registry.is_visible(Handedness::Left).unwrap());
        assert_eq!(registry.local_transform(Handedness::Left).unwrap(), base);
        assert_eq!(base.translation, Vec3::new(0.0, 1.0, 0.0));

        let entity = registry.find(Handedness::Left).unwrap();
        let global_transform = registry.world().get::<&GlobalTransform>(entity).unwrap();
        assert_eq!(*global_transform, GlobalTransform::from(base));
    }

    #[test]
    fn test_remove() {
        let mut registry = registry();
        let removed = registry.remove(Handedness::Right).unwrap();
        assert_eq!(removed.asset, "right.glb");
        assert!(registry.find(Handedness::Right).is_none());
        assert_eq!(registry.world().len(), 1);
        assert!(matches!(
            registry.is_visible(Handedness::Right),
            Err(HandOverlayError::BindingNotFound(Handedness::Right))
        ));
        assert!(registry.remove(Handedness::Right).is_err());

        // The slot is free again.
        registry
            .add(&ModelConfig::new("new.glb", Handedness::Right))
            .unwrap();
        let snapshot = registry.snapshot().unwrap();
        assert_eq!(snapshot[1].asset, "new.glb");
    }
}
