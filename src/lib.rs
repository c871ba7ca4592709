pub mod app;
pub mod browser;
pub mod cancel;
pub mod config;
pub mod dispatch;
pub mod git;
pub mod github;
pub mod output;
pub mod selector;
pub mod stderr_buffer;

#[cfg(test)]
mod testing;
