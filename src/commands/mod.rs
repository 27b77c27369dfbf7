//! Command implementations behind the `nativestub` binary.
//!
//! - **generate**: write stubs for one or more module snapshots
//! - **inspect**: report how each symbol of a snapshot is classified

pub mod generate;
pub mod inspect;

pub use generate::{handle_generate, GenerateConfig};
pub use inspect::{handle_inspect, inspect_snapshot, InspectReport, MemberReport, SymbolReport};
