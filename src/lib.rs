//! Core of a points-based sports spread-prediction game.
//!
//! Users declare a favorite team, place one bet per game against the point
//! spread, and an administrative settlement pass resolves finished games
//! into win/loss/push outcomes and awards points. This crate holds the
//! placement eligibility rules, the spread-adjudication algorithm, and the
//! SQLite-backed stores that make the uniqueness and one-shot-settlement
//! guarantees hold under concurrent callers. Authentication, HTTP routing,
//! and odds-feed polling live in the surrounding system; the feed hands
//! games to [`db::GameStore::upsert`] and the request layer calls the two
//! engines.

pub mod catalog;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod models;

pub use config::Config;
pub use engine::{PlacementEngine, Settlement, SettlementEngine, POINTS_PER_WIN};
pub use error::{Error, Result};
