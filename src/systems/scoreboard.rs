use bevy_ecs::prelude::*;

use crate::resources::display::ScoreDisplayOutput;
use crate::resources::scoreboard::ScoreBoard;

/// Push the scoreboard text to the display whenever the score changed.
pub fn score_display_system(
    score: Option<Res<ScoreBoard>>,
    display: Option<ResMut<ScoreDisplayOutput>>,
) {
    let (Some(score), Some(mut display)) = (score, display) else {
        return;
    };
    if score.is_changed() {
        display.show(&score.display_text());
    }
}
