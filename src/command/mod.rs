mod checkpoint;
mod commands;
mod history;

pub use checkpoint::{CheckpointStack, ImageCheckpoint, CHECKPOINT_CAPACITY};
pub use commands::Command;
pub use history::{RegionHistory, HISTORY_CAPACITY};
