mod common;
mod engine_scenarios;
mod listener_release;
mod settings_store_tests;
