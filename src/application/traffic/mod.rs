pub mod service;

pub use service::{
    BoundingBox, CurrentLevel, HourlyStat, Hotspot, TrafficInput, TrafficService, TrafficSummary,
    DEFAULT_RADIUS,
};
