//! Win conditions
//!
//! Gamemodes are stateless: they read `kills`/`lives` off the roster each
//! tick and never mutate it.

use serde::{Deserialize, Serialize};

use super::player::Player;
use crate::tuning::GamemodeConfig;

/// Who won, by player number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    None,
    Player(u8),
    /// Tie between two or more players
    Players(Vec<u8>),
}

impl Winner {
    /// Classify a set of qualifying player numbers
    pub fn from_numbers(mut numbers: Vec<u8>) -> Self {
        match numbers.len() {
            0 => Winner::None,
            1 => Winner::Player(numbers[0]),
            _ => {
                numbers.sort_unstable();
                Winner::Players(numbers)
            }
        }
    }
}

pub trait Gamemode: std::fmt::Debug {
    fn is_game_over(&self, players: &[Player]) -> bool;
    fn winner_data(&self, players: &[Player]) -> Winner;
    /// Lives handed to each player at match start (0 when lives are unused)
    fn starting_lives(&self) -> u32 {
        0
    }
    /// Whether a dead player with `lives_left` comes back
    fn allows_respawn(&self, lives_left: u32) -> bool;
}

/// First to `threshold` kills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kills {
    pub threshold: u32,
}

impl Gamemode for Kills {
    fn is_game_over(&self, players: &[Player]) -> bool {
        players.iter().any(|p| p.kills >= self.threshold)
    }

    fn winner_data(&self, players: &[Player]) -> Winner {
        Winner::from_numbers(
            players
                .iter()
                .filter(|p| p.kills >= self.threshold)
                .map(|p| p.number)
                .collect(),
        )
    }

    fn allows_respawn(&self, _lives_left: u32) -> bool {
        true
    }
}

/// Last player standing with lives left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stock {
    pub lives: u32,
}

impl Gamemode for Stock {
    fn is_game_over(&self, players: &[Player]) -> bool {
        players.iter().filter(|p| p.lives > 0).count() <= 1
    }

    fn winner_data(&self, players: &[Player]) -> Winner {
        Winner::from_numbers(
            players
                .iter()
                .filter(|p| p.lives > 0)
                .map(|p| p.number)
                .collect(),
        )
    }

    fn starting_lives(&self) -> u32 {
        self.lives
    }

    fn allows_respawn(&self, lives_left: u32) -> bool {
        lives_left > 0
    }
}

impl GamemodeConfig {
    pub fn build(self) -> Box<dyn Gamemode> {
        match self {
            GamemodeConfig::Kills { threshold } => Box::new(Kills { threshold }),
            GamemodeConfig::Stock { lives } => Box::new(Stock { lives }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::vector::Vector2D;
    use crate::tuning::PlayerTuning;

    fn roster(values: &[u32], set: fn(&mut Player, u32)) -> Vec<Player> {
        let tuning = PlayerTuning::default();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let mut p = Player::new(i as u8 + 1, Vector2D::zero(), &tuning);
                set(&mut p, v);
                p
            })
            .collect()
    }

    fn with_kills(values: &[u32]) -> Vec<Player> {
        roster(values, |p, v| p.kills = v)
    }

    fn with_lives(values: &[u32]) -> Vec<Player> {
        roster(values, |p, v| p.lives = v)
    }

    #[test]
    fn test_kills_not_over_below_threshold() {
        let mode = Kills { threshold: 5 };
        let players = with_kills(&[4, 0, 3]);
        assert!(!mode.is_game_over(&players));
        assert_eq!(mode.winner_data(&players), Winner::None);
    }

    #[test]
    fn test_kills_single_winner() {
        let mode = Kills { threshold: 5 };
        let players = with_kills(&[2, 5, 1, 0]);
        assert!(mode.is_game_over(&players));
        assert_eq!(mode.winner_data(&players), Winner::Player(2));
    }

    #[test]
    fn test_kills_tie() {
        let mode = Kills { threshold: 3 };
        let players = with_kills(&[3, 1, 4]);
        assert_eq!(mode.winner_data(&players), Winner::Players(vec![1, 3]));
    }

    #[test]
    fn test_stock_last_player_standing() {
        let mode = Stock { lives: 3 };
        let players = with_lives(&[0, 0, 0, 1]);
        assert!(mode.is_game_over(&players));
        assert_eq!(mode.winner_data(&players), Winner::Player(4));
    }

    #[test]
    fn test_stock_two_alive_is_not_over() {
        let mode = Stock { lives: 3 };
        let players = with_lives(&[3, 0, 0, 1]);
        assert!(!mode.is_game_over(&players));
        assert_eq!(mode.winner_data(&players), Winner::Players(vec![1, 4]));
    }

    #[test]
    fn test_stock_everyone_out_has_no_winner() {
        let mode = Stock { lives: 3 };
        let players = with_lives(&[0, 0]);
        assert!(mode.is_game_over(&players));
        assert_eq!(mode.winner_data(&players), Winner::None);
    }

    #[test]
    fn test_stock_respawn_rules() {
        let mode = Stock { lives: 3 };
        assert_eq!(mode.starting_lives(), 3);
        assert!(mode.allows_respawn(1));
        assert!(!mode.allows_respawn(0));
        assert!(Kills { threshold: 1 }.allows_respawn(0));
    }

    #[test]
    fn test_config_builds_mode() {
        let mode = GamemodeConfig::Stock { lives: 2 }.build();
        assert_eq!(mode.starting_lives(), 2);
    }
}
