use bevy::prelude::*;

use crate::gameplay::danger::DangerState;

const BASE_CLEAR: Color = Color::srgb(0.02, 0.02, 0.05);
const DANGER_CLEAR: Color = Color::srgb(0.20, 0.02, 0.04);

pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BASE_CLEAR))
            .add_systems(Update, apply_danger_tint);
    }
}

/// Dark red wash while the stack sits inside the danger band; danger goes
/// inactive on game over, which also clears the tint.
fn apply_danger_tint(danger: Res<DangerState>, mut clear: ResMut<ClearColor>) {
    if !danger.is_changed() {
        return;
    }
    clear.0 = if danger.active { DANGER_CLEAR } else { BASE_CLEAR };
}
