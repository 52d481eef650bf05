pub mod danger;
pub mod game_over;
pub mod particles;
pub mod pop;
pub mod spawn;
