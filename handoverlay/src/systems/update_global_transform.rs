use crate::components::{GlobalTransform, LocalTransform};
use hecs::{PreparedQuery, World};

/// Update global transform system
/// Walks through each LocalTransform and composes it into the matrix used by the render pass
pub fn update_global_transform_system(
    query: &mut PreparedQuery<(&LocalTransform, &mut GlobalTransform)>,
    world: &mut World,
) {
    for (_, (local_transform, global_transform)) in query.query_mut(world) {
        *global_transform = (*local_transform).into();
    }
}
