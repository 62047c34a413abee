use fleet_core::{FleetError, GeoPoint};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("map view configuration error: {0}")]
    Config(String),

    #[error("default center {0} is not a valid coordinate")]
    InvalidCenter(GeoPoint),

    #[error("zoom {zoom} outside tile layer range {min}..={max}")]
    InvalidZoom {
        zoom: u8,
        min:  u8,
        max:  u8,
    },

    #[error(transparent)]
    Core(#[from] FleetError),
}

impl From<serde_json::Error> for MapError {
    fn from(e: serde_json::Error) -> Self {
        MapError::Core(FleetError::Json(e))
    }
}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::Core(FleetError::Io(e))
    }
}

pub type MapResult<T> = Result<T, MapError>;
