#![cfg_attr(not(test), no_std)]

pub mod averager;
pub mod config;
pub mod controller;
pub mod duty;
pub mod event;
pub mod regulator;
pub mod sensor;
pub mod setpoint;
pub mod wire;

#[cfg(test)]
mod mock;
