//! Vehicle families and their platform quirks.
//!
//! Each supported platform maps to one immutable [`FamilyTraits`] record.
//! Calibration tables (mass, wheelbase, tuning gains) live outside this
//! workspace; only the quirks that change arbitration behavior are here.

use serde::{Deserialize, Serialize};

use crate::consts::{KPH_TO_MS, MPH_TO_MS};

/// Supported vehicle platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleFamily {
    #[serde(rename = "GRANDEUR_HEV_19")]
    GrandeurHev19,
    #[serde(rename = "GRANDEUR_HEV_20")]
    GrandeurHev20,
    SantaFe,
    Sonata,
    #[serde(rename = "SONATA_2019")]
    Sonata2019,
    Palisade,
    KiaSorento,
    Elantra,
    ElantraGtI30,
    HyundaiGenesis,
    GenesisG80,
    GenesisG90,
    KiaOptima,
    KiaOptimaH,
    KiaStinger,
    Kona,
    KonaEv,
    Ioniq,
    IoniqEvLtd,
    KiaForte,
}

/// Platform-specific behavior switches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FamilyTraits {
    /// Speed below which the EPS refuses to steer [m/s]. 0 = no limit.
    pub min_steer_speed: f64,
    /// Hard actuator disable below this speed [m/s] (EPS fault avoidance).
    pub steer_disable_below: Option<f64>,
    /// Echo the EPS status frame every tick.
    pub steering_status_echo: bool,
    /// Send the auxiliary lane-following display message at 20 Hz.
    pub aux_display: bool,
}

impl FamilyTraits {
    const BASE: Self = Self {
        min_steer_speed: 0.0,
        steer_disable_below: None,
        steering_status_echo: false,
        aux_display: false,
    };
}

const LOW_SPEED_32_MPH: f64 = 32.0 * MPH_TO_MS;

impl VehicleFamily {
    /// Every supported family, in declaration order.
    pub const ALL: [Self; 20] = [
        Self::GrandeurHev19,
        Self::GrandeurHev20,
        Self::SantaFe,
        Self::Sonata,
        Self::Sonata2019,
        Self::Palisade,
        Self::KiaSorento,
        Self::Elantra,
        Self::ElantraGtI30,
        Self::HyundaiGenesis,
        Self::GenesisG80,
        Self::GenesisG90,
        Self::KiaOptima,
        Self::KiaOptimaH,
        Self::KiaStinger,
        Self::Kona,
        Self::KonaEv,
        Self::Ioniq,
        Self::IoniqEvLtd,
        Self::KiaForte,
    ];

    /// Look up the quirk record for this family.
    pub const fn traits(self) -> FamilyTraits {
        match self {
            Self::GrandeurHev19 => FamilyTraits {
                steering_status_echo: true,
                aux_display: true,
                ..FamilyTraits::BASE
            },
            Self::GrandeurHev20 | Self::Sonata | Self::Palisade => FamilyTraits {
                aux_display: true,
                ..FamilyTraits::BASE
            },
            Self::Ioniq => FamilyTraits {
                min_steer_speed: LOW_SPEED_32_MPH,
                aux_display: true,
                ..FamilyTraits::BASE
            },
            Self::IoniqEvLtd | Self::Elantra | Self::ElantraGtI30 => FamilyTraits {
                min_steer_speed: LOW_SPEED_32_MPH,
                ..FamilyTraits::BASE
            },
            Self::HyundaiGenesis => FamilyTraits {
                min_steer_speed: 60.0 * KPH_TO_MS,
                steer_disable_below: Some(16.7),
                ..FamilyTraits::BASE
            },
            Self::SantaFe
            | Self::Sonata2019
            | Self::KiaSorento
            | Self::GenesisG80
            | Self::GenesisG90
            | Self::KiaOptima
            | Self::KiaOptimaH
            | Self::KiaStinger
            | Self::Kona
            | Self::KonaEv
            | Self::KiaForte => FamilyTraits::BASE,
        }
    }
}
