#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod i18n;
mod ui;
use app::run;
mod config;
mod core;
mod error;

fn main() {
    env_logger::init();
    run();
}
