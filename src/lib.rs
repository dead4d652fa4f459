//! Eagle City - procedural city generation and prey hunting core

pub mod city;
pub mod collision;
pub mod core;
pub mod engine;
pub mod flight;
pub mod prey;
pub mod session;
