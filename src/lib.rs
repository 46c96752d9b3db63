pub mod app;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(test)]
mod test;
