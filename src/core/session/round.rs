use bevy::prelude::*;

/// Per-round scoring and loss state. `max_chain` resets on restart;
/// `high_score` survives the whole process lifetime.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct RoundState {
    pub max_chain: usize,
    pub high_score: usize,
    pub is_new_high_score: bool,
    pub is_game_over: bool,
    /// Timestamp from which the game-over screen counts; offset past the
    /// trigger by the death animation duration so the cascade finishes first.
    pub game_over_start: f64,
}

impl RoundState {
    pub fn record_chain(&mut self, len: usize) {
        if len > self.max_chain {
            self.max_chain = len;
        }
    }

    /// Transition into the loss state. Returns `false` (and changes nothing)
    /// when the round is already lost, so the death sequencer runs at most
    /// once per round.
    pub fn trigger_game_over(&mut self, now: f64, death_duration: f64) -> bool {
        if self.is_game_over {
            return false;
        }
        self.is_new_high_score = self.max_chain > self.high_score;
        if self.is_new_high_score {
            self.high_score = self.max_chain;
        }
        self.is_game_over = true;
        self.game_over_start = now + death_duration;
        true
    }

    /// Whether a restart input should be honored: lost, and the post-cascade
    /// delay has elapsed.
    pub fn accepts_restart(&self, now: f64, restart_delay: f64) -> bool {
        self.is_game_over && now - self.game_over_start >= restart_delay
    }

    pub fn restart(&mut self) {
        let high_score = self.high_score;
        *self = Self {
            high_score,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_chain_is_monotone_within_round() {
        let mut round = RoundState::default();
        round.record_chain(4);
        round.record_chain(2);
        assert_eq!(round.max_chain, 4);
        round.record_chain(7);
        assert_eq!(round.max_chain, 7);
    }

    #[test]
    fn trigger_updates_high_score_once() {
        let mut round = RoundState {
            max_chain: 9,
            high_score: 5,
            ..Default::default()
        };
        assert!(round.trigger_game_over(10.0, 2.0));
        assert_eq!(round.high_score, 9);
        assert!(round.is_new_high_score);
        assert_eq!(round.game_over_start, 12.0);

        // Re-triggering while lost is an idempotent no-op.
        assert!(!round.trigger_game_over(20.0, 2.0));
        assert_eq!(round.game_over_start, 12.0);
    }

    #[test]
    fn losing_below_high_score_is_not_a_record() {
        let mut round = RoundState {
            max_chain: 3,
            high_score: 5,
            ..Default::default()
        };
        assert!(round.trigger_game_over(0.0, 2.0));
        assert_eq!(round.high_score, 5);
        assert!(!round.is_new_high_score);
    }

    #[test]
    fn equal_chain_is_not_a_new_high_score() {
        let mut round = RoundState {
            max_chain: 5,
            high_score: 5,
            ..Default::default()
        };
        round.trigger_game_over(0.0, 2.0);
        assert!(!round.is_new_high_score);
    }

    #[test]
    fn restart_keeps_only_high_score() {
        let mut round = RoundState {
            max_chain: 6,
            high_score: 2,
            ..Default::default()
        };
        round.trigger_game_over(1.0, 2.0);
        round.restart();
        assert_eq!(round.high_score, 6);
        assert_eq!(round.max_chain, 0);
        assert!(!round.is_game_over);
        assert!(!round.is_new_high_score);
    }

    #[test]
    fn restart_gate_waits_for_delay() {
        let mut round = RoundState::default();
        round.trigger_game_over(10.0, 2.0); // screen counts from t = 12
        assert!(!round.accepts_restart(13.0, 2.0));
        assert!(round.accepts_restart(14.0, 2.0));
        let fresh = RoundState::default();
        assert!(!fresh.accepts_restart(100.0, 2.0));
    }
}
