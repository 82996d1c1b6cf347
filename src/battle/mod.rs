//! Battle scheduling: the round/turn state machine and who drives it.
//!
//! ## Key Types
//!
//! - `Battle`: Owns both rosters and resolves one action at a time
//! - `BattlePhase` / `TurnSlot`: Where the state machine stands
//! - `ActionSource`: Per-side strategy that picks actions
//! - `BattleLog` / `BattleEvent`: Everything that happened
//! - `Outcome`: Winner and rounds elapsed
//!
//! ## Example
//!
//! ```
//! use rust_skirmish::battle::{run_battle, ActionSource, RandomActionSource, Sources};
//! use rust_skirmish::combatants::{Combatant, CombatantRecord, Roster};
//! use rust_skirmish::core::{BattleConfig, GameRng, Side, SideMap};
//!
//! let knight = Combatant::new(CombatantRecord::new("Knight", "Fighter", 80, 60, 14, 8, 10)).unwrap();
//! let troll = Combatant::new(CombatantRecord::new("Troll", "Brute", 90, 50, 12, 6, 8)).unwrap();
//!
//! let mut sources: Sources<'_> = SideMap::new(
//!     Box::new(RandomActionSource) as Box<dyn ActionSource>,
//!     Box::new(RandomActionSource) as Box<dyn ActionSource>,
//! );
//! let outcome = run_battle(
//!     Roster::new("Keep").with_member(knight),
//!     Roster::new("Bridge").with_member(troll),
//!     &mut sources,
//!     BattleConfig::default(),
//!     &mut GameRng::new(7),
//! )
//! .unwrap();
//!
//! let expected = if outcome.winner == Side::A { "Keep" } else { "Bridge" };
//! assert_eq!(outcome.winning_roster, expected);
//! ```

pub mod log;
pub mod outcome;
pub mod phase;
pub mod scheduler;
pub mod source;

pub use log::{ActionRecord, BattleEvent, BattleLog};
pub use outcome::Outcome;
pub use phase::{BattlePhase, TurnSlot};
pub use scheduler::{run_battle, Battle, Sources};
pub use source::{ActionSource, RandomActionSource, ScriptedActionSource, TurnContext};
