//! Built-in stage layouts
//!
//! Coordinates are pixels with y growing downward. Anything leaving
//! `blast_zone` dies.

use serde::{Deserialize, Serialize};

use super::platform::{Platform, PlatformEffect};
use super::vector::Vector2D;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StageId {
    /// Wide floor with three drop-through platforms
    #[default]
    Battlefield,
    /// Walled pit with a lava strip and a moving lift
    Foundry,
}

/// Axis-aligned bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vector2D,
    pub max: Vector2D,
}

impl Bounds {
    pub fn contains(&self, p: &Vector2D) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[derive(Debug, Clone)]
pub struct Stage {
    pub id: StageId,
    pub platforms: Vec<Platform>,
    pub spawn_points: Vec<Vector2D>,
    pub blast_zone: Bounds,
}

impl Stage {
    pub fn load(id: StageId) -> Self {
        match id {
            StageId::Battlefield => Self::battlefield(),
            StageId::Foundry => Self::foundry(),
        }
    }

    fn battlefield() -> Self {
        let platforms = vec![
            Platform::solid(1, Vector2D::xy(800.0, 720.0), 1200.0, 40.0),
            Platform::phaseable(2, Vector2D::xy(450.0, 520.0), 260.0, 16.0),
            Platform::phaseable(3, Vector2D::xy(1150.0, 520.0), 260.0, 16.0),
            Platform::phaseable(4, Vector2D::xy(800.0, 340.0), 300.0, 16.0),
        ];
        let spawn_points = vec![
            Vector2D::xy(450.0, 460.0),
            Vector2D::xy(1150.0, 460.0),
            Vector2D::xy(800.0, 280.0),
            Vector2D::xy(800.0, 660.0),
        ];
        Self {
            id: StageId::Battlefield,
            platforms,
            spawn_points,
            blast_zone: Bounds {
                min: Vector2D::xy(-400.0, -600.0),
                max: Vector2D::xy(2000.0, 1400.0),
            },
        }
    }

    fn foundry() -> Self {
        let platforms = vec![
            Platform::solid(1, Vector2D::xy(500.0, 760.0), 500.0, 40.0),
            Platform::solid(2, Vector2D::xy(1100.0, 760.0), 500.0, 40.0),
            Platform::solid(3, Vector2D::xy(800.0, 800.0), 100.0, 20.0)
                .with_effect(PlatformEffect::Hazard { damage: 0.5 }),
            Platform::wall(4, Vector2D::xy(230.0, 500.0), 40.0, 560.0),
            Platform::wall(5, Vector2D::xy(1370.0, 500.0), 40.0, 560.0),
            Platform::phaseable(6, Vector2D::xy(800.0, 520.0), 220.0, 16.0)
                .oscillating(Vector2D::xy(0.0, 120.0), 6.0),
        ];
        let spawn_points = vec![
            Vector2D::xy(400.0, 700.0),
            Vector2D::xy(1200.0, 700.0),
            Vector2D::xy(600.0, 700.0),
            Vector2D::xy(1000.0, 700.0),
        ];
        Self {
            id: StageId::Foundry,
            platforms,
            spawn_points,
            blast_zone: Bounds {
                min: Vector2D::xy(-300.0, -700.0),
                max: Vector2D::xy(1900.0, 1300.0),
            },
        }
    }
}
