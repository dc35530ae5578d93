//! ECS resources made available to systems.
//!
//! Overview
//! - `cue` – sink receiving audio/visual feedback cues
//! - `display` – scoreboard text output
//! - `overlay` – glitch and blackout screen fades
//! - `phase` – scenario phase controller
//! - `scenarioconfig` – tunables loaded from INI
//! - `scene` – asynchronous next-scene loader
//! - `scoreboard` – correct/error counters
//! - `spawner` – spawn schedule, body templates and spawn point
//! - `viewpoint` – participant head pose, target of the anomaly approach
//! - `worldtime` – simulation time and delta
pub mod cue;
pub mod display;
pub mod overlay;
pub mod phase;
pub mod scenarioconfig;
pub mod scene;
pub mod scoreboard;
pub mod spawner;
pub mod viewpoint;
pub mod worldtime;
