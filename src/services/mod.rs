pub mod cache;
pub mod history_poller;
pub mod leaderboard_poller;
pub mod pending_poller;
pub mod pot_poller;

pub use cache::PotCache;
