use serde::Serialize;

/// What the receiver power monitor reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RxPowerMeasurement {
    #[default]
    #[serde(rename = "OMA")]
    Oma,
    #[serde(rename = "Average power")]
    AveragePower,
}

impl RxPowerMeasurement {
    pub fn from_average_bit(average: bool) -> Self {
        if average { Self::AveragePower } else { Self::Oma }
    }
}

