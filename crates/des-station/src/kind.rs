//! The station kinds of the airport model and their default parameters.
//!
//! All seven kinds share one implementation (service loop + failure
//! generator); they differ only in the numbers below.  Times are minutes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::StationParams;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationKind {
    SelfServiceKiosk,
    StaffedCounter,
    SecurityLane,
    BoardingGate,
    ImmigrationCounter,
    CustomsBooth,
    BaggageBelt,
}

impl StationKind {
    /// Every kind, in report order.
    pub const ALL: [StationKind; 7] = [
        StationKind::SelfServiceKiosk,
        StationKind::StaffedCounter,
        StationKind::SecurityLane,
        StationKind::BoardingGate,
        StationKind::ImmigrationCounter,
        StationKind::CustomsBooth,
        StationKind::BaggageBelt,
    ];

    /// Human-readable name used for instance names ("Security lane 3").
    pub fn label(self) -> &'static str {
        match self {
            StationKind::SelfServiceKiosk => "Self-service kiosk",
            StationKind::StaffedCounter => "Check-in counter",
            StationKind::SecurityLane => "Security lane",
            StationKind::BoardingGate => "Boarding gate",
            StationKind::ImmigrationCounter => "Immigration counter",
            StationKind::CustomsBooth => "Customs booth",
            StationKind::BaggageBelt => "Baggage belt",
        }
    }

    /// Snake-case key, identical to the configuration file spelling.
    pub fn key(self) -> &'static str {
        match self {
            StationKind::SelfServiceKiosk => "self_service_kiosk",
            StationKind::StaffedCounter => "staffed_counter",
            StationKind::SecurityLane => "security_lane",
            StationKind::BoardingGate => "boarding_gate",
            StationKind::ImmigrationCounter => "immigration_counter",
            StationKind::CustomsBooth => "customs_booth",
            StationKind::BaggageBelt => "baggage_belt",
        }
    }

    /// What a completed unit is, for reports ("passengers checked").
    pub fn unit_verb(self) -> &'static str {
        match self {
            StationKind::SelfServiceKiosk | StationKind::StaffedCounter => "clients served",
            StationKind::SecurityLane => "passengers screened",
            StationKind::BoardingGate => "passengers boarded",
            StationKind::ImmigrationCounter => "passengers admitted",
            StationKind::CustomsBooth => "passengers inspected",
            StationKind::BaggageBelt => "bags claimed",
        }
    }

    /// Instances of this kind in the reference airport.
    pub fn default_count(self) -> u32 {
        match self {
            StationKind::SelfServiceKiosk => 5,
            StationKind::StaffedCounter => 5,
            StationKind::SecurityLane => 7,
            StationKind::BoardingGate => 3,
            StationKind::ImmigrationCounter => 6,
            StationKind::CustomsBooth => 4,
            StationKind::BaggageBelt => 2,
        }
    }

    /// Reference parameters: mean service, spread, mean time to failure,
    /// repair duration.
    pub fn default_params(self) -> StationParams {
        match self {
            StationKind::SelfServiceKiosk => StationParams::gaussian(10.0, 2.0, 300.0, 30.0),
            StationKind::StaffedCounter => StationParams::gaussian(10.0, 2.0, 300.0, 15.0),
            StationKind::SecurityLane => StationParams::gaussian(30.0, 6.0, 270.0, 100.0),
            StationKind::BoardingGate => StationParams::gaussian(13.0, 3.0, 458.0, 230.0),
            // Immigration shares the customs repair time in the reference model.
            StationKind::ImmigrationCounter => StationParams::gaussian(46.0, 8.0, 592.0, 18.0),
            StationKind::CustomsBooth => StationParams::gaussian(32.0, 9.0, 78.0, 18.0),
            StationKind::BaggageBelt => StationParams::gaussian(18.0, 2.0, 142.0, 27.0),
        }
    }
}

impl fmt::Display for StationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
