pub mod auth;
pub mod components;
pub mod config;
pub mod logging;
pub mod pages;
pub mod routes;
pub mod services;
pub mod storage;
pub mod views;
