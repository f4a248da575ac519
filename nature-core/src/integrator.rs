use crate::entity::Entity;
use crate::vector::Vector;

/// Recompute acceleration from the entity's force sources.
///
/// Forces are per-frame: the sum replaces the previous acceleration
/// instead of adding to it. Entities without a force mapping keep
/// whatever acceleration they were given. A missing mass counts as 1.
pub fn accumulate_forces(entity: &mut Entity) {
    if let Some(forces) = &entity.forces {
        let inv_mass = 1.0 / entity.mass.unwrap_or(1.0);
        entity.acceleration = forces
            .values()
            .fold(Vector::ZERO, |acc, force| acc.plus(force.times(inv_mass)));
    }
}

/// Advance one frame using semi-implicit Euler integration
/// (v += a, then x += v * speed with the new velocity)
pub fn step(entity: &mut Entity) {
    accumulate_forces(entity);
    entity.velocity = entity.velocity.plus(entity.acceleration);
    entity.position = entity.position.plus(entity.velocity.times(entity.speed));
}
