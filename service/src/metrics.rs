//! Per-route metric tables behind the recommended-route radar and bar charts.
//!
//! Every route is scored on the same eleven metrics, each normalised to
//! `0..=max`.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Metric {
    #[schema(value_type = String)]
    pub name: &'static str,
    pub value: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct RouteMetrics {
    /// Route key, matching the `routeN` resource name.
    #[schema(value_type = String)]
    pub route: &'static str,
    #[schema(value_type = Vec<Metric>)]
    pub metrics: &'static [Metric],
}

const fn metric(name: &'static str, value: f64) -> Metric {
    Metric {
        name,
        value,
        max: 1.0,
    }
}

pub const BUILDING_DENSITY: &str = "建筑密度";
pub const POI_DIVERSITY: &str = "POI多样性";
pub const POI_DENSITY: &str = "POI密度";
pub const ROAD_TORTUOSITY: &str = "道路曲折度";
pub const STREET_LIGHTING: &str = "街道照明情况";
pub const SKY_VIEW_INDEX: &str = "天空景观指数";
pub const GREEN_VIEW_INDEX: &str = "绿化视图指数";
pub const VISUAL_WALKABILITY: &str = "视觉步行能力";
pub const NDVI: &str = "归一化植被指数";
pub const SLOPE: &str = "坡度";
pub const WATER_DISTANCE: &str = "离水域的平均距离";

const ROUTE1: [Metric; 11] = [
    metric(BUILDING_DENSITY, 0.25),
    metric(POI_DIVERSITY, 0.81),
    metric(POI_DENSITY, 0.49),
    metric(ROAD_TORTUOSITY, 0.37),
    metric(STREET_LIGHTING, 0.41),
    metric(SKY_VIEW_INDEX, 0.67),
    metric(GREEN_VIEW_INDEX, 0.63),
    metric(VISUAL_WALKABILITY, 0.59),
    metric(NDVI, 0.65),
    metric(SLOPE, 0.73),
    metric(WATER_DISTANCE, 0.13),
];

const ROUTE2: [Metric; 11] = [
    metric(BUILDING_DENSITY, 0.67),
    metric(POI_DIVERSITY, 0.83),
    metric(POI_DENSITY, 0.51),
    metric(ROAD_TORTUOSITY, 0.45),
    metric(STREET_LIGHTING, 0.37),
    metric(SKY_VIEW_INDEX, 0.74),
    metric(GREEN_VIEW_INDEX, 0.45),
    metric(VISUAL_WALKABILITY, 0.59),
    metric(NDVI, 0.43),
    metric(SLOPE, 0.75),
    metric(WATER_DISTANCE, 0.38),
];

const ROUTE3: [Metric; 11] = [
    metric(BUILDING_DENSITY, 0.46),
    metric(POI_DIVERSITY, 0.78),
    metric(POI_DENSITY, 0.45),
    metric(ROAD_TORTUOSITY, 0.34),
    metric(STREET_LIGHTING, 0.56),
    metric(SKY_VIEW_INDEX, 0.81),
    metric(GREEN_VIEW_INDEX, 0.72),
    metric(VISUAL_WALKABILITY, 0.49),
    metric(NDVI, 0.71),
    metric(SLOPE, 0.80),
    metric(WATER_DISTANCE, 0.39),
];

pub static ROUTE_METRICS: [RouteMetrics; 3] = [
    RouteMetrics {
        route: "route1",
        metrics: &ROUTE1,
    },
    RouteMetrics {
        route: "route2",
        metrics: &ROUTE2,
    },
    RouteMetrics {
        route: "route3",
        metrics: &ROUTE3,
    },
];

#[must_use]
pub fn route_metrics(route: &str) -> Option<&'static RouteMetrics> {
    ROUTE_METRICS.iter().find(|r| r.route == route)
}
