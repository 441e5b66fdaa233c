//! # Registry Property Tests
//!
//! Checks the registry's density and uniqueness invariants, swap-removal
//! and destruction behavior, and the stale-handle hazard, through the
//! public API only.
//!
//! Run with: cargo test --package strata_core --test registry_properties

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strata_core::{Component, EntityId, Registry, RegistryError};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Position {
    x: i32,
    y: i32,
}
impl Component for Position {}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Velocity {
    dx: i32,
    dy: i32,
}
impl Component for Velocity {}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sprite(char);
impl Component for Sprite {}

/// A component that refers to other entities by handle.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Collision {
    a: EntityId,
    b: EntityId,
}
impl Component for Collision {}

fn pos(x: i32, y: i32) -> Position {
    Position { x, y }
}

fn as_set(ids: Vec<EntityId>) -> HashSet<EntityId> {
    ids.into_iter().collect()
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn remove_from_middle_keeps_neighbours() {
    let mut registry = Registry::new();
    let a = registry.create();
    let b = registry.create();
    let c = registry.create();
    registry.add(a, pos(0, 0));
    registry.add(b, pos(1, 1));
    registry.add(c, pos(2, 2));

    registry.remove::<Position>(b);

    assert_eq!(as_set(registry.filter::<Position>()), as_set(vec![a, c]));
    assert_eq!(registry.get::<Position>(a), &pos(0, 0));
    assert_eq!(registry.get::<Position>(c), &pos(2, 2));
    assert!(!registry.has::<Position>(b));
    registry.validate().unwrap();
}

#[test]
fn destroy_empties_every_collection() {
    let mut registry = Registry::new();
    let a = registry.create();
    registry.add(a, pos(5, 5));
    registry.add(a, Velocity { dx: 1, dy: 0 });

    registry.destroy(a);

    assert!(registry.filter::<Position>().is_empty());
    assert!(registry.filter::<Velocity>().is_empty());
    assert!(registry.is_empty());
    registry.validate().unwrap();
}

#[test]
fn swap_removal_leaves_other_types_alone() {
    let mut registry = Registry::new();
    let ids: Vec<EntityId> = (0..3).map(|_| registry.create()).collect();
    for (i, &id) in (0_i32..).zip(&ids) {
        registry.add(id, pos(i, i));
        registry.add(id, Velocity { dx: i, dy: -i });
    }
    let velocities_before = registry.filter::<Velocity>();

    registry.remove::<Position>(ids[1]);

    assert_eq!(registry.filter::<Velocity>(), velocities_before);
    for (i, &id) in (0_i32..).zip(&ids) {
        assert_eq!(registry.get::<Velocity>(id), &Velocity { dx: i, dy: -i });
    }
    registry.validate().unwrap();
}

#[test]
fn destroy_middle_entity_repoints_survivors() {
    let mut registry = Registry::new();
    let ids: Vec<EntityId> = (0..5).map(|_| registry.create()).collect();
    for (i, &id) in (0_i32..).zip(&ids) {
        registry.add(id, pos(i, 0));
        if i % 2 == 0 {
            registry.add(id, Sprite('#'));
        }
    }

    registry.destroy(ids[0]);
    registry.destroy(ids[2]);

    for (i, &id) in (0_i32..).zip(&ids) {
        if i == 0 || i == 2 {
            assert!(!registry.is_alive(id));
            continue;
        }
        assert_eq!(registry.get::<Position>(id), &pos(i, 0));
        assert_eq!(registry.has::<Sprite>(id), i % 2 == 0);
    }
    assert_eq!(registry.count::<Sprite>(), 1);
    registry.validate().unwrap();
}

#[test]
fn recreated_entity_starts_empty() {
    let mut registry = Registry::new();
    let old = registry.create();
    registry.add(old, pos(1, 1));
    registry.add(old, Sprite('A'));
    registry.destroy(old);

    let new = registry.create();
    assert_eq!(new.index(), old.index());
    assert_eq!(registry.component_count(new), 0);
    assert!(registry.try_get::<Position>(new).is_none());

    registry.add(new, pos(2, 2));
    assert_eq!(registry.filter::<Position>(), vec![new]);
    registry.validate().unwrap();
}

#[test]
fn add_then_get_and_remove_then_has() {
    let mut registry = Registry::new();
    let e = registry.create();

    registry.add(e, Sprite('@'));
    assert_eq!(registry.get::<Sprite>(e), &Sprite('@'));

    registry.remove::<Sprite>(e);
    assert!(!registry.has::<Sprite>(e));
    assert!(registry.try_get::<Sprite>(e).is_none());
}

#[test]
fn filter_is_a_snapshot() {
    let mut registry = Registry::new();
    let a = registry.create();
    registry.add(a, Sprite('a'));

    let snapshot = registry.filter::<Sprite>();
    let b = registry.create();
    registry.add(b, Sprite('b'));

    assert_eq!(snapshot, vec![a]);
    assert_eq!(registry.filter::<Sprite>().len(), 2);
}

// ============================================================================
// STALE HANDLES
// ============================================================================

#[test]
fn destroy_during_filter_pass_is_detected() {
    let mut registry = Registry::new();
    let ship = registry.create();
    let bullet = registry.create();
    registry.add(ship, pos(0, 0));
    registry.add(bullet, pos(0, 0));

    let hit = registry.create();
    registry.add(hit, Collision { a: ship, b: bullet });

    // Same pass: the bullet is destroyed before the collision is resolved.
    registry.destroy(bullet);

    let collisions: Vec<Collision> = registry
        .filter::<Collision>()
        .into_iter()
        .map(|id| *registry.get::<Collision>(id))
        .collect();
    assert_eq!(collisions.len(), 1);

    let Collision { a, b } = collisions[0];
    assert!(registry.is_alive(a));
    assert!(!registry.is_alive(b));
    assert_eq!(
        registry.checked_get::<Position>(b),
        Err(RegistryError::StaleEntity(b))
    );
}

#[test]
fn stale_handle_does_not_alias_reused_slot() {
    let mut registry = Registry::new();
    let old = registry.create();
    registry.destroy(old);
    let new = registry.create();
    registry.add(new, pos(9, 9));

    assert_eq!(new.index(), old.index());
    assert!(!registry.is_alive(old));
    assert_eq!(
        registry.checked_remove::<Position>(old),
        Err(RegistryError::StaleEntity(old))
    );
    assert_eq!(registry.get::<Position>(new), &pos(9, 9));
}

#[test]
#[should_panic(expected = "stale entity handle")]
fn double_destroy_panics() {
    let mut registry = Registry::new();
    let e = registry.create();
    registry.destroy(e);
    registry.destroy(e);
}

#[test]
#[should_panic(expected = "stale entity handle")]
fn has_on_destroyed_entity_panics() {
    let mut registry = Registry::new();
    let e = registry.create();
    registry.destroy(e);
    let _ = registry.has::<Position>(e);
}

#[test]
#[should_panic(expected = "has no")]
fn remove_absent_component_panics() {
    let mut registry = Registry::new();
    let e = registry.create();
    registry.remove::<Velocity>(e);
}

// ============================================================================
// CHURN
// ============================================================================

/// Applies a long random sequence of create/add/remove/destroy and checks,
/// after every step, that the registry matches a simple model and that
/// `filter` agrees with `has`.
#[test]
fn random_churn_preserves_invariants() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);
    let mut registry = Registry::new();
    let mut live: Vec<EntityId> = Vec::new();
    let mut dead: Vec<EntityId> = Vec::new();

    for step in 0..4_000 {
        let roll = rng.gen_range(0..100);
        if live.is_empty() || roll < 15 {
            live.push(registry.create());
        } else {
            let id = live[rng.gen_range(0..live.len())];
            match roll {
                15..=44 => {
                    if registry.has::<Position>(id) {
                        let expected = pos(id.index() as i32, step);
                        *registry.get_mut::<Position>(id) = expected;
                        assert_eq!(registry.remove::<Position>(id), expected);
                    } else {
                        registry.add(id, pos(id.index() as i32, step));
                    }
                }
                45..=69 => {
                    if registry.try_get::<Velocity>(id).is_some() {
                        registry.remove::<Velocity>(id);
                    } else {
                        registry.add(id, Velocity { dx: step, dy: 0 });
                    }
                }
                70..=89 => {
                    if registry.has::<Sprite>(id) {
                        assert_eq!(registry.remove::<Sprite>(id), Sprite('*'));
                    } else {
                        registry.add(id, Sprite('*'));
                    }
                }
                _ => {
                    registry.destroy(id);
                    live.retain(|&other| other != id);
                    dead.push(id);
                }
            }
        }

        registry.validate().unwrap();
        assert_eq!(registry.len(), live.len());
    }

    let live_set: HashSet<EntityId> = live.iter().copied().collect();
    assert_eq!(as_set(registry.entities()), live_set);
    for id in &dead {
        assert!(!registry.is_alive(*id));
    }

    let with_position = registry.filter::<Position>();
    assert_eq!(with_position.len(), as_set(with_position.clone()).len());
    let expected: HashSet<EntityId> = live
        .iter()
        .copied()
        .filter(|&id| registry.has::<Position>(id))
        .collect();
    assert_eq!(as_set(with_position), expected);

    for (owner, position) in registry.iter::<Position>() {
        assert_eq!(position.x, owner.index() as i32);
    }
}
