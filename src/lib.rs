pub mod config;
pub mod entities;
pub mod error;
pub mod igdb;
pub mod login;
pub mod migrator;
pub mod repository;
pub mod requests;
