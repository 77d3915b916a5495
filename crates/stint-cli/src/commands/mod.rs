//! Command implementations.

pub mod add;
pub mod delete;
pub mod edit;
pub mod export;
pub mod history;
pub mod merge;
pub mod note;
pub mod pause;
pub mod status;
pub mod toggle;
pub mod util;
pub mod wipe;
