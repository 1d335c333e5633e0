//! Per-player observation vectors
//!
//! Layout: own ship, opponent ship, own projectiles, opponent projectiles.
//! Projectile slots are padded up to the cap with an inert placeholder at
//! the origin facing up. Player 2 sees the same layout with roles swapped,
//! so one policy can play either seat.

use glam::Vec2;

use super::state::{Arena, PlayerId, Projectile, Ship};
use crate::normalise;
use crate::settings::AngleEncoding;

/// Position and heading of one encoded entity
#[derive(Debug, Clone, Copy, PartialEq)]
struct EntityPose {
    pos: Vec2,
    /// Degrees, [0, 360)
    angle: f32,
}

impl EntityPose {
    const PLACEHOLDER: EntityPose = EntityPose {
        pos: Vec2::ZERO,
        angle: 0.0,
    };
}

impl From<&Ship> for EntityPose {
    fn from(ship: &Ship) -> Self {
        Self {
            pos: ship.pos,
            angle: ship.angle(),
        }
    }
}

impl From<&Projectile> for EntityPose {
    fn from(p: &Projectile) -> Self {
        Self {
            pos: p.pos,
            angle: p.angle(),
        }
    }
}

/// Encode the arena from `viewer`'s point of view
pub fn observe(arena: &Arena, viewer: PlayerId) -> Vec<f32> {
    let encoding = arena.config.angle_encoding;
    let cap = arena.config.max_projectiles;
    let me = arena.ship(viewer);
    let them = arena.ship(viewer.opponent());

    let mut out = Vec::with_capacity(arena.config.observation_len());
    encode(&mut out, me.into(), arena.bounds, encoding);
    encode(&mut out, them.into(), arena.bounds, encoding);
    for ship in [me, them] {
        let poses = ship
            .projectiles
            .iter()
            .take(cap)
            .map(EntityPose::from)
            .chain(std::iter::repeat(EntityPose::PLACEHOLDER))
            .take(cap);
        for pose in poses {
            encode(&mut out, pose, arena.bounds, encoding);
        }
    }
    out
}

fn encode(out: &mut Vec<f32>, pose: EntityPose, bounds: Vec2, encoding: AngleEncoding) {
    out.push(normalise(pose.pos.x, bounds.x));
    out.push(normalise(pose.pos.y, bounds.y));
    match encoding {
        AngleEncoding::Normalized => out.push(normalise(pose.angle, 360.0)),
        AngleEncoding::SinCos => {
            let radians = pose.angle.to_radians();
            out.push(radians.sin());
            out.push(radians.cos());
        }
    }
}
