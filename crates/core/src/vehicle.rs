//! Vehicle taxonomy.
//!
//! Every record in a fleet is one variant of the closed [`Vehicle`] sum type.
//! All variants answer the same three questions: what they are
//! ([`Vehicle::classify`]), how they read to a human ([`Vehicle::describe`])
//! and what they cost ([`Vehicle::price`]).
//!
//! The car family (`Car`, `Sedan`, `SUV`, `Sports Car`) renders a shared
//! header line followed by a subtype detail line. [`ElectricCar`] shares the
//! car identity fields but renders its own single line without engine or
//! fuel information.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

/// Fuel type recorded for every [`ElectricCar`].
pub const ELECTRIC_FUEL: &str = "Electric";

/// Fixed classification tag for each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VehicleKind {
    /// Plain car.
    Car,
    /// Sedan with a trunk.
    Sedan,
    /// Sport utility vehicle.
    Suv,
    /// Sports car.
    SportsCar,
    /// Battery electric car.
    ElectricCar,
}

impl VehicleKind {
    /// Human-readable tag, e.g. `"Sports Car"`.
    pub fn label(self) -> &'static str {
        match self {
            VehicleKind::Car => "Car",
            VehicleKind::Sedan => "Sedan",
            VehicleKind::Suv => "SUV",
            VehicleKind::SportsCar => "Sports Car",
            VehicleKind::ElectricCar => "Electric Car",
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity and price shared by every vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleIdentity {
    /// Manufacturer, e.g. `Toyota`.
    pub manufacturer: String,
    /// Model name, e.g. `Camry`.
    pub model: String,
    /// Model year.
    pub year: i32,
    /// Price in dollars. Expected to be non-negative; not validated.
    pub price: Decimal,
}

impl VehicleIdentity {
    /// Build an identity record.
    pub fn new(
        manufacturer: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        price: Decimal,
    ) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            model: model.into(),
            year,
            price,
        }
    }
}

/// Attributes common to the whole car family.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarSpec {
    /// Identity and price.
    #[serde(flatten)]
    pub identity: VehicleIdentity,
    /// Number of doors.
    pub doors: u32,
    /// Engine displacement in liters.
    pub engine_displacement_liters: f64,
    /// Fuel type, e.g. `Gasoline`.
    pub fuel_type: String,
}

impl CarSpec {
    /// Build a car record.
    pub fn new(
        identity: VehicleIdentity,
        doors: u32,
        engine_displacement_liters: f64,
        fuel_type: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            doors,
            engine_displacement_liters,
            fuel_type: fuel_type.into(),
        }
    }

    fn header(&self, kind: VehicleKind) -> String {
        let id = &self.identity;
        format!(
            "{kind} - {} {} ({}), Price: ${}, Doors: {}, Engine: {}L, Fuel: {}\n",
            id.manufacturer,
            id.model,
            id.year,
            id.price.normalize(),
            self.doors,
            self.engine_displacement_liters,
            self.fuel_type,
        )
    }
}

/// Sedan: a car with a trunk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sedan {
    /// Shared car attributes.
    #[serde(flatten)]
    pub car: CarSpec,
    /// Trunk capacity in liters.
    pub trunk_capacity_liters: f64,
}

/// Sport utility vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suv {
    /// Shared car attributes.
    #[serde(flatten)]
    pub car: CarSpec,
    /// Whether all four wheels are driven.
    pub four_wheel_drive: bool,
    /// Ground clearance in millimetres.
    pub ground_clearance_mm: f64,
}

/// Sports car.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SportsCar {
    /// Shared car attributes.
    #[serde(flatten)]
    pub car: CarSpec,
    /// 0-100 km/h acceleration time in seconds.
    pub zero_to_hundred_seconds: f64,
    /// Top speed in km/h.
    pub top_speed_kmh: u32,
}

/// Battery figures of an electric drivetrain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElectricCapability {
    /// Battery capacity in kWh.
    pub battery_capacity_kwh: f64,
    /// Range on a full charge in km.
    pub range_km: f64,
}

/// Read access to electric drivetrain figures.
pub trait ElectricVehicle {
    /// Battery capacity in kWh.
    fn battery_capacity_kwh(&self) -> f64;
    /// Range on a full charge in km.
    fn range_km(&self) -> f64;
}

/// Electric car.
///
/// Carries the car identity with the fuel type pinned to [`ELECTRIC_FUEL`]
/// and zero engine displacement. Its description is rendered on its own
/// and intentionally omits the engine and fuel columns of the car header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectricCar {
    #[serde(flatten)]
    car: CarSpec,
    #[serde(flatten)]
    electric: ElectricCapability,
}

impl ElectricCar {
    /// Build an electric car from its identity, door count and battery figures.
    pub fn new(identity: VehicleIdentity, doors: u32, electric: ElectricCapability) -> Self {
        Self {
            car: CarSpec::new(identity, doors, 0.0, ELECTRIC_FUEL),
            electric,
        }
    }

    /// Car attributes (fuel type is always [`ELECTRIC_FUEL`]).
    pub fn car(&self) -> &CarSpec {
        &self.car
    }

    /// Embedded battery figures.
    pub fn electric(&self) -> &ElectricCapability {
        &self.electric
    }

    fn render(&self) -> String {
        let id = &self.car.identity;
        format!(
            "{} - {} {} ({}), Price: ${}, Doors: {}, Battery: {} kWh, Range: {} km\n",
            VehicleKind::ElectricCar,
            id.manufacturer,
            id.model,
            id.year,
            id.price.normalize(),
            self.car.doors,
            self.electric.battery_capacity_kwh,
            self.electric.range_km,
        )
    }
}

impl ElectricVehicle for ElectricCar {
    fn battery_capacity_kwh(&self) -> f64 {
        self.electric.battery_capacity_kwh
    }

    fn range_km(&self) -> f64 {
        self.electric.range_km
    }
}

/// Any vehicle a fleet can hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Vehicle {
    /// Plain car.
    Car(CarSpec),
    /// Sedan.
    Sedan(Sedan),
    /// SUV.
    Suv(Suv),
    /// Sports car.
    SportsCar(SportsCar),
    /// Electric car.
    ElectricCar(ElectricCar),
}

impl Vehicle {
    /// Variant tag.
    pub fn kind(&self) -> VehicleKind {
        match self {
            Vehicle::Car(_) => VehicleKind::Car,
            Vehicle::Sedan(_) => VehicleKind::Sedan,
            Vehicle::Suv(_) => VehicleKind::Suv,
            Vehicle::SportsCar(_) => VehicleKind::SportsCar,
            Vehicle::ElectricCar(_) => VehicleKind::ElectricCar,
        }
    }

    /// Fixed classification string; independent of field values.
    pub fn classify(&self) -> &'static str {
        self.kind().label()
    }

    /// Stored price, never recomputed.
    pub fn price(&self) -> Decimal {
        self.identity().price
    }

    /// Identity fields of the vehicle.
    pub fn identity(&self) -> &VehicleIdentity {
        &self.car().identity
    }

    /// Car attributes shared by every variant.
    pub fn car(&self) -> &CarSpec {
        match self {
            Vehicle::Car(car) => car,
            Vehicle::Sedan(sedan) => &sedan.car,
            Vehicle::Suv(suv) => &suv.car,
            Vehicle::SportsCar(sports) => &sports.car,
            Vehicle::ElectricCar(electric) => electric.car(),
        }
    }

    /// Electric capability, if the vehicle has one.
    pub fn as_electric(&self) -> Option<&dyn ElectricVehicle> {
        match self {
            Vehicle::ElectricCar(electric) => Some(electric),
            _ => None,
        }
    }

    /// Multi-line, newline-terminated human-readable summary.
    pub fn describe(&self) -> String {
        let kind = self.kind();
        match self {
            Vehicle::Car(car) => car.header(kind),
            Vehicle::Sedan(sedan) => format!(
                "{}  Trunk capacity: {} liters\n",
                sedan.car.header(kind),
                sedan.trunk_capacity_liters
            ),
            Vehicle::Suv(suv) => format!(
                "{}  4WD: {}, Clearance: {}mm\n",
                suv.car.header(kind),
                if suv.four_wheel_drive { "Yes" } else { "No" },
                suv.ground_clearance_mm
            ),
            Vehicle::SportsCar(sports) => format!(
                "{}  0-100 km/h: {}s, Top speed: {}km/h\n",
                sports.car.header(kind),
                sports.zero_to_hundred_seconds,
                sports.top_speed_kmh
            ),
            Vehicle::ElectricCar(electric) => electric.render(),
        }
    }
}

impl From<CarSpec> for Vehicle {
    fn from(value: CarSpec) -> Self {
        Vehicle::Car(value)
    }
}

impl From<Sedan> for Vehicle {
    fn from(value: Sedan) -> Self {
        Vehicle::Sedan(value)
    }
}

impl From<Suv> for Vehicle {
    fn from(value: Suv) -> Self {
        Vehicle::Suv(value)
    }
}

impl From<SportsCar> for Vehicle {
    fn from(value: SportsCar) -> Self {
        Vehicle::SportsCar(value)
    }
}

impl From<ElectricCar> for Vehicle {
    fn from(value: ElectricCar) -> Self {
        Vehicle::ElectricCar(value)
    }
}
