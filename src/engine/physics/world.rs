use glam::Vec2;
use log::debug;
use rapier2d::prelude::*;
use std::collections::HashMap;
use std::num::NonZeroUsize;

use super::collision::{ContactEvent, ContactEventQueue};

/// Physics world that owns every body and collider
///
/// The level that creates the world is the only one allowed to step it.
/// Actors keep handles into it and go through its accessors.
pub struct PhysicsWorld {
    /// Gravity vector (m/s²)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Contact events of the last step
    contact_events: ContactEventQueue,

    /// Mapping from body handles to the actor ids that own them
    body_to_entity: HashMap<RigidBodyHandle, u64>,
}

impl PhysicsWorld {
    /// Create a world without gravity, as space has none
    pub fn new() -> Self {
        Self::with_gravity(Vec2::ZERO)
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vec2) -> Self {
        Self {
            gravity: vector![gravity.x, gravity.y],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            contact_events: ContactEventQueue::new(),
            body_to_entity: HashMap::new(),
        }
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// `velocity_iterations` drives the constraint solver, `position_iterations`
    /// the extra stabilization passes. A zero velocity count is raised to one.
    /// Forces added since the previous step are cleared afterwards.
    pub fn step(&mut self, dt: f32, velocity_iterations: usize, position_iterations: usize) {
        self.contact_events.clear();

        self.integration_parameters.dt = dt;
        self.integration_parameters.num_solver_iterations =
            NonZeroUsize::new(velocity_iterations).unwrap_or(NonZeroUsize::MIN);
        self.integration_parameters.num_internal_pgs_iterations = position_iterations;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &self.contact_events,
        );

        // Forces apply for a single step
        for (_, body) in self.rigid_body_set.iter_mut() {
            body.reset_forces(false);
        }
    }

    /// Insert a body and, if given, its collider
    pub fn create_body(
        &mut self,
        body: RigidBody,
        collider: Option<Collider>,
    ) -> (RigidBodyHandle, Option<ColliderHandle>) {
        let body_handle = self.rigid_body_set.insert(body);
        let collider_handle = collider.map(|collider| {
            self.collider_set
                .insert_with_parent(collider, body_handle, &mut self.rigid_body_set)
        });

        debug!("Created rigid body {:?}", body_handle);
        (body_handle, collider_handle)
    }

    /// Attach another collider to an existing body
    pub fn attach_collider(&mut self, body: RigidBodyHandle, collider: Collider) -> ColliderHandle {
        let handle = self
            .collider_set
            .insert_with_parent(collider, body, &mut self.rigid_body_set);
        debug!("Attached collider {:?} to {:?}", handle, body);
        handle
    }

    /// Remove a rigid body and all its attached colliders
    ///
    /// Returns `false` if the body was already gone.
    pub fn destroy_body(&mut self, handle: RigidBodyHandle) -> bool {
        let removed = self
            .rigid_body_set
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true,
            )
            .is_some();
        self.body_to_entity.remove(&handle);

        if removed {
            debug!("Destroyed rigid body {:?}", handle);
        }
        removed
    }

    /// Get a reference to a rigid body
    pub fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Get a reference to a collider
    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Number of live bodies
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Associate an actor id with a rigid body
    pub fn set_entity_mapping(&mut self, body_handle: RigidBodyHandle, entity_id: u64) {
        self.body_to_entity.insert(body_handle, entity_id);
    }

    /// Get the actor id associated with a rigid body
    pub fn entity_id(&self, body_handle: RigidBodyHandle) -> Option<u64> {
        self.body_to_entity.get(&body_handle).copied()
    }

    /// Actor id owning the body a collider is attached to
    pub fn entity_of_collider(&self, handle: ColliderHandle) -> Option<u64> {
        let body = self.collider_set.get(handle)?.parent()?;
        self.entity_id(body)
    }

    /// Contact events recorded by the last step
    pub fn contact_events(&self) -> Vec<ContactEvent> {
        self.contact_events.events()
    }

    /// Pairs of actor ids whose bodies started touching in the last step
    pub fn began_contacts(&self) -> Vec<(u64, u64)> {
        self.contact_events()
            .into_iter()
            .filter(ContactEvent::is_began)
            .filter_map(|event| {
                let (c1, c2) = event.colliders();
                Some((self.entity_of_collider(c1)?, self.entity_of_collider(c2)?))
            })
            .collect()
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity.x, self.gravity.y)
    }

    /// Timestep used by the last step
    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
