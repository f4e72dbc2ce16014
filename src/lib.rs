// Library exports for Battlesnake bot
// This allows the replay tool and other utilities to use the core bot logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod engine;
pub mod flood_fill;
pub mod forager;
pub mod grid;
pub mod pathfinding;
pub mod policy;
pub mod replay;
pub mod types;
