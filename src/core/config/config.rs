use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::core::session::danger::DangerParams;
use crate::core::session::death::DeathTiming;

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Bubble Burst".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GravityConfig {
    pub y: f32,
}
impl Default for GravityConfig {
    fn default() -> Self {
        Self { y: -600.0 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BounceConfig {
    pub restitution: f32,
    pub friction: f32,
}
impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            restitution: 0.6,
            friction: 0.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    pub wall_thickness: f32,
}
impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            wall_thickness: 50.0,
        }
    }
}

/// Interval spawner: starts at `initial_interval`, shrinks by
/// `interval_decrease` per spawn down to `min_interval`. Radius is a uniform
/// fraction of playfield width.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    pub initial_interval: f32,
    pub interval_decrease: f32,
    pub min_interval: f32,
    pub min_radius_ratio: f32,
    pub max_radius_ratio: f32,
}
impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            initial_interval: 0.5,
            interval_decrease: 0.002,
            min_interval: 0.05,
            min_radius_ratio: 0.02,
            max_radius_ratio: 0.05,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ConnectivityConfig {
    pub touch_tolerance: f32,
}
impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            touch_tolerance: 5.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DangerConfig {
    pub ground_tolerance: f32,
    /// Percentage at or below which the danger-zone warning shows.
    pub danger_threshold: f32,
    /// Extra headroom above the playfield top before a grounded stack counts
    /// as lost. 0 reproduces the strict threshold.
    pub top_slack: f32,
}
impl Default for DangerConfig {
    fn default() -> Self {
        Self {
            ground_tolerance: 10.0,
            danger_threshold: 20.0,
            top_slack: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DeathConfig {
    pub total_duration: f32,
    pub fade_to_white: f32,
    pub fade_from_white: f32,
}
impl Default for DeathConfig {
    fn default() -> Self {
        Self {
            total_duration: 2.0,
            fade_to_white: 0.1,
            fade_from_white: 0.4,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RoundConfig {
    /// Seconds after the death cascade before a click/key restarts.
    pub restart_delay: f32,
}
impl Default for RoundConfig {
    fn default() -> Self {
        Self { restart_delay: 2.0 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
    pub per_bubble: usize,
    pub radius: f32,
    pub lifetime: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub restitution: f32,
    pub friction: f32,
}
impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            per_bubble: 33,
            radius: 2.0,
            lifetime: 1.0,
            min_speed: 100.0,
            max_speed: 300.0,
            restitution: 0.3,
            friction: 0.05,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    /// Gap between a bubble's edge and its selection ring.
    pub ring_offset: f32,
}
impl Default for SelectionConfig {
    fn default() -> Self {
        Self { ring_offset: 15.0 }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub gravity: GravityConfig,
    pub bounce: BounceConfig,
    pub arena: ArenaConfig,
    pub spawn: SpawnConfig,
    pub connectivity: ConnectivityConfig,
    pub danger: DangerConfig,
    pub death: DeathConfig,
    pub round: RoundConfig,
    pub particles: ParticleConfig,
    pub selection: SelectionConfig,
    pub rapier_debug: bool,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            gravity: Default::default(),
            bounce: Default::default(),
            arena: Default::default(),
            spawn: Default::default(),
            connectivity: Default::default(),
            danger: Default::default(),
            death: Default::default(),
            round: Default::default(),
            particles: Default::default(),
            selection: Default::default(),
            rapier_debug: false,
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn danger_params(&self) -> DangerParams {
        DangerParams {
            touch_tolerance: self.connectivity.touch_tolerance,
            ground_tolerance: self.danger.ground_tolerance,
            top_slack: self.danger.top_slack,
        }
    }

    pub fn death_timing(&self) -> DeathTiming {
        DeathTiming {
            total_duration: self.death.total_duration as f64,
            fade_to_highlight: self.death.fade_to_white as f64,
            fade_from_highlight: self.death.fade_from_white as f64,
        }
    }
}
