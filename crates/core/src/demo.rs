//! Demonstration roster.

use rust_decimal::Decimal;

use crate::vehicle::{
    CarSpec, ElectricCapability, ElectricCar, Sedan, SportsCar, Suv, Vehicle, VehicleIdentity,
};

/// The four company cars used by the `fleetview` demo, in insertion order.
pub fn company_fleet_vehicles() -> Vec<Vehicle> {
    vec![
        Sedan {
            car: CarSpec::new(
                VehicleIdentity::new("Toyota", "Camry", 2022, Decimal::from(25_000)),
                4,
                2.5,
                "Gasoline",
            ),
            trunk_capacity_liters: 500.0,
        }
        .into(),
        Suv {
            car: CarSpec::new(
                VehicleIdentity::new("Ford", "Explorer", 2021, Decimal::from(35_000)),
                5,
                3.0,
                "Gasoline",
            ),
            four_wheel_drive: true,
            ground_clearance_mm: 210.0,
        }
        .into(),
        SportsCar {
            car: CarSpec::new(
                VehicleIdentity::new("Porsche", "911", 2023, Decimal::from(120_000)),
                2,
                3.0,
                "Gasoline",
            ),
            zero_to_hundred_seconds: 3.7,
            top_speed_kmh: 320,
        }
        .into(),
        ElectricCar::new(
            VehicleIdentity::new("Tesla", "Model 3", 2023, Decimal::from(45_000)),
            4,
            ElectricCapability {
                battery_capacity_kwh: 75.0,
                range_km: 450.0,
            },
        )
        .into(),
    ]
}
