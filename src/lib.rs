//! An ordered map backed by a skip list.
//!
//! `SkipListMap` keeps its entries sorted by key and reaches any key in
//! expected O(log n) steps through a randomized multi-level index, without
//! any rebalancing. All nodes live in an arena addressed by stable integer
//! ids, so the structure contains no raw pointers.
//!
//! The ordering is pluggable through the [`Comparator`] trait and the level
//! randomness through the [`HeightControl`] trait, which makes the structure
//! fully deterministic under a seeded generator.

mod arena;
mod compare;
mod height_control;
mod iter;
mod map;
mod node;

pub use compare::{Comparator, NaturalOrder};
pub use height_control::{
    GeometricalGenerator, HeightControl, DEFAULT_MAX_HEIGHT, DEFAULT_UPGRADE_PROBABILITY,
};
pub use iter::Iter;
pub use map::SkipListMap;
