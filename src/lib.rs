pub mod api;
pub mod chart;
pub mod config;
pub mod demo;
pub mod display;
pub mod filter;
pub mod headshots;
pub mod http_client;
pub mod logging;
pub mod provider;
pub mod rankings;
pub mod state;
pub mod teams;
