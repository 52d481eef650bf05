pub mod background;
pub mod camera;
pub mod death_fade;
pub mod hud;
pub mod palette;
pub mod selection_ring;
