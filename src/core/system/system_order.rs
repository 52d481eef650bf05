//! Central system ordering labels to make update sequence explicit.
//! Stages (high-level):
//! 1. PrePhysics (input handling, spawning, pop resolution before Rapier)
//! 2. Rapier (handled by plugin)
//! 3. PostPhysicsAdjust (field mirroring, danger evaluation, animation ticks)
//! 4. Rendering (implicit)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PrePhysicsSet; // input & spawning applied before the physics step

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PostPhysicsAdjustSet; // evaluation over the freshly stepped state

/// Subset of PostPhysicsAdjust that copies rapier transforms into the
/// session field; evaluation systems order after it.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct FieldMirrorSet;
