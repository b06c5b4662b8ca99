#![warn(clippy::all, missing_docs)]

//! Core domain logic for the fleetview demo.
//!
//! This crate hosts the vehicle taxonomy, the fleet aggregator and the
//! logging, configuration and line-counting services used by the
//! `fleetview` binary.

pub mod config;
pub mod demo;
pub mod error;
pub mod fleet;
pub mod line_count;
pub mod logger;
pub mod vehicle;

pub use config::AppConfig;
pub use error::FleetError;
pub use fleet::{Fleet, FleetReport, FLEET_BANNER};
pub use line_count::LineStats;
pub use logger::{
    build_logger, ConsoleLogger, ConsoleStream, FileLogger, FleetLogger, LoggerKind, MemoryLogger, TracingLogger,
};
pub use vehicle::{
    CarSpec, ElectricCapability, ElectricCar, ElectricVehicle, Sedan, SportsCar, Suv, Vehicle,
    VehicleIdentity, VehicleKind,
};
