pub mod api;
pub mod catalog;
pub mod config;
pub mod data_models;
pub mod db;
pub mod shop;
