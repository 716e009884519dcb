//! Emission-factor tables. Immutable, process-wide; values are approximate
//! averages and tunable at the source rather than a behavioural contract.

/// Grid electricity, kg CO2e per kWh (global average).
pub const ELECTRICITY_KG_PER_KWH: f64 = 0.41;

/// Data transfer, kg CO2e per GB.
pub const DATA_TRANSFER_KG_PER_GB: f64 = 0.81;

/// Server energy, kg CO2e per kWh.
pub const SERVER_ENERGY_KG_PER_KWH: f64 = 0.475;

/// Rough server energy intensity, kWh per GB served.
pub const SERVER_KWH_PER_GB: f64 = 0.2;

/// Assumed page size when a fetch fails, MB.
pub const DEFAULT_PAGE_SIZE_MB: f64 = 2.0;

/// Assumed monthly views for small websites.
pub const DEFAULT_MONTHLY_VIEWS: i64 = 10_000;

/// Transport modes with a known per-km emission factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Car,
    Bus,
    Train,
    Bicycle,
    Walking,
    Motorcycle,
    Plane,
}

impl TransportMode {
    /// Lenient parse from wire input; unknown modes yield `None` so the
    /// calculator can degrade to a zero contribution.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "car" => Some(Self::Car),
            "bus" => Some(Self::Bus),
            "train" => Some(Self::Train),
            "bicycle" => Some(Self::Bicycle),
            "walking" => Some(Self::Walking),
            "motorcycle" => Some(Self::Motorcycle),
            "plane" => Some(Self::Plane),
            _ => None,
        }
    }

    /// kg CO2e per km travelled.
    pub fn kg_per_km(self) -> f64 {
        match self {
            Self::Car => 0.192,
            Self::Bus => 0.105,
            Self::Train => 0.041,
            Self::Bicycle => 0.0,
            Self::Walking => 0.0,
            Self::Motorcycle => 0.103,
            Self::Plane => 0.255,
        }
    }
}

/// Diet categories with a known per-day emission value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diet {
    MeatHeavy,
    MeatMedium,
    Pescatarian,
    Vegetarian,
    Vegan,
}

impl Diet {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "meat_heavy" => Some(Self::MeatHeavy),
            "meat_medium" => Some(Self::MeatMedium),
            "pescatarian" => Some(Self::Pescatarian),
            "vegetarian" => Some(Self::Vegetarian),
            "vegan" => Some(Self::Vegan),
            _ => None,
        }
    }

    /// kg CO2e per day.
    pub fn kg_per_day(self) -> f64 {
        match self {
            Self::MeatHeavy => 7.19,
            Self::MeatMedium => 5.63,
            Self::Pescatarian => 3.91,
            Self::Vegetarian => 3.81,
            Self::Vegan => 2.89,
        }
    }
}
