//! Fleet aggregation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::{logger::FleetLogger, vehicle::Vehicle};

/// Header printed above the vehicle list by [`Fleet::display_all`].
pub const FLEET_BANNER: &str = "=== Fleet Overview ===";

/// An ordered collection of vehicles owned by one organisation.
///
/// The fleet owns its vehicles and borrows the logger it reports to.
/// Insertion order is preserved and duplicates are allowed.
pub struct Fleet<'log> {
    vehicles: Vec<Vehicle>,
    logger: &'log dyn FleetLogger,
}

impl<'log> Fleet<'log> {
    /// Create an empty fleet reporting to `logger`.
    pub fn new(logger: &'log dyn FleetLogger) -> Self {
        Self {
            vehicles: Vec::new(),
            logger,
        }
    }

    /// Take ownership of `vehicle` and append it.
    pub fn add(&mut self, vehicle: impl Into<Vehicle>) {
        let vehicle = vehicle.into();
        let kind = vehicle.kind();
        self.vehicles.push(vehicle);
        self.logger.log(&format!("Vehicle added: {kind}"));
        debug!(%kind, total = self.vehicles.len(), "vehicle added to fleet");
    }

    /// Banner followed by every vehicle's description in insertion order.
    pub fn display_all(&self) -> String {
        self.logger.log("Displaying fleet");
        let mut out = String::with_capacity(FLEET_BANNER.len() + 1 + self.vehicles.len() * 128);
        out.push_str(FLEET_BANNER);
        out.push('\n');
        for vehicle in &self.vehicles {
            out.push_str(&vehicle.describe());
        }
        out
    }

    /// Sum of all prices; zero for an empty fleet.
    pub fn total_value(&self) -> Decimal {
        let total: Decimal = self.vehicles.iter().map(Vehicle::price).sum();
        self.logger.log("Calculating total fleet value");
        total
    }

    /// Vehicles in insertion order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of vehicles.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether the fleet holds no vehicles.
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Snapshot of the fleet suitable for serialisation.
    pub fn report(&self) -> FleetReport<'_> {
        FleetReport {
            vehicles: &self.vehicles,
            total_value: self.total_value(),
            generated_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for Fleet<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fleet")
            .field("vehicles", &self.vehicles)
            .finish_non_exhaustive()
    }
}

/// Serialisable view of a fleet.
#[derive(Debug, Serialize)]
pub struct FleetReport<'a> {
    /// Vehicles in insertion order.
    pub vehicles: &'a [Vehicle],
    /// Sum of all prices.
    pub total_value: Decimal,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
}
