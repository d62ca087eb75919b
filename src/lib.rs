pub mod arbiscan;
pub mod claude;
pub mod config;
pub mod server;
pub mod tools;

pub use arbiscan::ArbiscanClient;
pub use claude::ClaudeClient;
pub use config::Config;
