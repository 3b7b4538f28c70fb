/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::DispatcherConfig;
use crate::shared::{CarStatus, Direction, Floor};

/**
 * Policy that picks which car answers a hall call.
 *
 * `select` gets a snapshot of the whole roster and returns the index of the
 * chosen car, or `None` when no car is available. Cars that are full or in
 * maintenance must never be returned.
 */
pub trait AssignmentStrategy: Send {
    fn name(&self) -> &'static str;

    fn select(&mut self, roster: &[CarStatus], floor: Floor, direction: Direction) -> Option<usize>;
}

/***************************************/
/*         Nearest car strategy        */
/***************************************/
/// Closest available car, preferring cars already heading toward the call.
#[derive(Debug, Clone)]
pub struct Nearest {
    same_direction_bonus: i64,
    opposite_direction_penalty: i64,
}

impl Nearest {
    pub fn new(same_direction_bonus: i64, opposite_direction_penalty: i64) -> Nearest {
        Nearest {
            same_direction_bonus,
            opposite_direction_penalty,
        }
    }

    /// Lower is better.
    pub fn score(&self, car: &CarStatus, floor: Floor, direction: Direction) -> i64 {
        let mut score = (i64::from(floor) - i64::from(car.floor)).abs();

        let will_pass = match direction {
            Direction::Up => car.floor <= floor,
            Direction::Down => car.floor >= floor,
            Direction::Idle => false,
        };

        if car.direction == direction && will_pass {
            score -= self.same_direction_bonus;
        } else if car.direction != Direction::Idle && car.direction == direction.opposite() {
            score += self.opposite_direction_penalty;
        }
        score
    }
}

impl Default for Nearest {
    fn default() -> Self {
        Nearest::new(2, 5)
    }
}

impl AssignmentStrategy for Nearest {
    fn name(&self) -> &'static str {
        "nearest"
    }

    fn select(&mut self, roster: &[CarStatus], floor: Floor, direction: Direction) -> Option<usize> {
        // min_by_key keeps the first of equal scores
        roster
            .iter()
            .enumerate()
            .filter(|(_, car)| car.is_available())
            .min_by_key(|(_, car)| self.score(car, floor, direction))
            .map(|(index, _)| index)
    }
}

/***************************************/
/*       Round robin strategy          */
/***************************************/
/// Hands calls to the available cars in turn.
#[derive(Debug, Clone, Default)]
pub struct RoundRobin {
    last_assigned: Option<usize>,
}

impl RoundRobin {
    pub fn new() -> RoundRobin {
        RoundRobin::default()
    }
}

impl AssignmentStrategy for RoundRobin {
    fn name(&self) -> &'static str {
        "round_robin"
    }

    fn select(&mut self, roster: &[CarStatus], _floor: Floor, _direction: Direction) -> Option<usize> {
        if roster.is_empty() {
            return None;
        }

        let start = self.last_assigned.map_or(0, |last| last + 1);
        let chosen = (0..roster.len())
            .map(|offset| (start + offset) % roster.len())
            .find(|index| roster[*index].is_available())?;

        self.last_assigned = Some(chosen);
        Some(chosen)
    }
}

/***************************************/
/*        Strategy selection           */
/***************************************/
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Nearest,
    RoundRobin,
}

impl StrategyKind {
    pub fn build(&self, config: &DispatcherConfig) -> Box<dyn AssignmentStrategy> {
        match *self {
            StrategyKind::Nearest => Box::new(Nearest::new(
                config.same_direction_bonus,
                config.opposite_direction_penalty,
            )),
            StrategyKind::RoundRobin => Box::new(RoundRobin::new()),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(StrategyKind::Nearest),
            "round_robin" | "round-robin" | "roundrobin" => Ok(StrategyKind::RoundRobin),
            other => Err(format!("unknown strategy '{}', expected nearest or round-robin", other)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            StrategyKind::Nearest => write!(f, "nearest"),
            StrategyKind::RoundRobin => write!(f, "round_robin"),
        }
    }
}
