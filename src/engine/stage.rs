// Stage: owns the actors of a level, tagged by kind

use log::{debug, warn};
use std::fmt::Debug;

use crate::engine::actor::{Actor, ActorError, ActorId};
use crate::engine::config::WorldBounds;
use crate::engine::physics::PhysicsWorld;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StageError {
    #[error("No actor with id {0:?} on the stage")]
    UnknownActor(ActorId),

    #[error(transparent)]
    Actor(#[from] ActorError),
}

#[derive(Debug)]
struct Entry<K> {
    id: ActorId,
    kind: K,
    actor: Actor,
}

/// Every live actor of a level, in insertion order
///
/// `K` is the game's own tag type; lookups by kind replace searching the
/// scene for instances of a type.
#[derive(Debug)]
pub struct Stage<K> {
    entries: Vec<Entry<K>>,
    next_id: u64,
}

impl<K> Default for Stage<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<K: Copy + Eq + Debug> Stage<K> {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an actor; rigid-body actors should use [`Stage::add_with_body`]
    pub fn add(&mut self, kind: K, actor: Actor) -> ActorId {
        let id = self.allocate_id();
        debug!("Spawned {:?} as {:?}", kind, id);
        self.entries.push(Entry { id, kind, actor });
        id
    }

    /// Create the actor's body in `world`, tag it with the new id and add the actor
    pub fn add_with_body(
        &mut self,
        kind: K,
        mut actor: Actor,
        world: &mut PhysicsWorld,
    ) -> Result<ActorId, StageError> {
        let handle = actor.initialize_physics(world)?;
        let id = self.add(kind, actor);
        world.set_entity_mapping(handle, id.as_u64());
        Ok(id)
    }

    fn index_of(&self, id: ActorId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Take an actor off the stage; its body, if any, is left in the world
    pub fn remove(&mut self, id: ActorId) -> Option<Actor> {
        let index = self.index_of(id)?;
        let entry = self.entries.remove(index);
        if entry.actor.body_handle().is_some() {
            warn!(
                "{:?} ({:?}) removed while its rigid body is still alive",
                entry.id, entry.kind
            );
        }
        Some(entry.actor)
    }

    /// Take an actor off the stage and destroy its body
    pub fn despawn(&mut self, id: ActorId, world: &mut PhysicsWorld) -> Result<Actor, StageError> {
        let index = self.index_of(id).ok_or(StageError::UnknownActor(id))?;
        let mut entry = self.entries.remove(index);
        entry.actor.destroy_body(world);
        debug!("Despawned {:?} ({:?})", entry.id, entry.kind);
        Ok(entry.actor)
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.actor)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.actor)
    }

    /// One actor to change and another to read, e.g. to push one out of the other
    pub fn pair_mut(&mut self, target: ActorId, other: ActorId) -> Option<(&mut Actor, &Actor)> {
        let target_index = self.index_of(target)?;
        let other_index = self.index_of(other)?;
        if target_index == other_index {
            return None;
        }

        if target_index < other_index {
            let (head, tail) = self.entries.split_at_mut(other_index);
            Some((&mut head[target_index].actor, &tail[0].actor))
        } else {
            let (head, tail) = self.entries.split_at_mut(target_index);
            Some((&mut tail[0].actor, &head[other_index].actor))
        }
    }

    pub fn kind_of(&self, id: ActorId) -> Option<K> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.kind)
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.index_of(id).is_some()
    }

    /// Ids of every actor of `kind`, in insertion order
    pub fn ids_of(&self, kind: K) -> Vec<ActorId> {
        self.entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.id)
            .collect()
    }

    pub fn count(&self, kind: K) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActorId, K, &Actor)> {
        self.entries
            .iter()
            .map(|entry| (entry.id, entry.kind, &entry.actor))
    }

    /// Advance every actor one frame, then drop the ones that are done
    ///
    /// Returns the ids that were removed. Their bodies are destroyed when
    /// `physics` is given.
    pub fn act(
        &mut self,
        dt: f32,
        bounds: &WorldBounds,
        mut physics: Option<&mut PhysicsWorld>,
    ) -> Vec<ActorId> {
        for entry in &mut self.entries {
            entry.actor.act(dt, bounds, physics.as_deref_mut());
        }

        let done: Vec<ActorId> = self
            .entries
            .iter()
            .filter(|entry| entry.actor.is_done())
            .map(|entry| entry.id)
            .collect();

        for id in &done {
            match physics.as_deref_mut() {
                Some(world) => {
                    if let Err(err) = self.despawn(*id, world) {
                        warn!("Failed to despawn finished actor {:?}: {}", id, err);
                    }
                }
                None => {
                    self.remove(*id);
                }
            }
        }
        done
    }

    /// Pairs `(a, b)` of a `kind_a` actor and a `kind_b` actor whose bodies
    /// started touching during the last physics step
    pub fn contacts_between(
        &self,
        kind_a: K,
        kind_b: K,
        world: &PhysicsWorld,
    ) -> Vec<(ActorId, ActorId)> {
        world
            .began_contacts()
            .into_iter()
            .filter_map(|(first, second)| {
                let first = ActorId(first);
                let second = ActorId(second);
                let kinds = (self.kind_of(first)?, self.kind_of(second)?);
                if kinds == (kind_a, kind_b) {
                    Some((first, second))
                } else if kinds == (kind_b, kind_a) {
                    Some((second, first))
                } else {
                    None
                }
            })
            .collect()
    }
}
