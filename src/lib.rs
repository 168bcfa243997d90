pub mod analysis;
pub mod court;
pub mod export;
pub mod sample_log;
pub mod segment;
pub mod shot;
pub mod shot_log;
pub mod visibility;
