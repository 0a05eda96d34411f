pub mod config;
pub mod error;
pub mod graph;
pub mod notice;
pub mod party;

pub use config::Config;
pub use error::*;
pub use graph::NoticeGraph;
pub use notice::*;
pub use party::*;
