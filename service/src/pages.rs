//! Frontend views, as a static table the router renders from.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageEntry {
    #[schema(value_type = String)]
    pub path: &'static str,
    #[schema(value_type = String)]
    pub name: &'static str,
    /// View component the frontend mounts for this path.
    #[schema(value_type = String)]
    pub component: &'static str,
}

pub static PAGES: [PageEntry; 4] = [
    PageEntry {
        path: "/marathon",
        name: "Marathon",
        component: "views/marathon.vue",
    },
    PageEntry {
        path: "/traffic_search",
        name: "Traffic_search",
        component: "views/traffic_search.vue",
    },
    PageEntry {
        path: "/AI_search",
        name: "AI_search",
        component: "views/AI_search.vue",
    },
    PageEntry {
        path: "/routeplan",
        name: "Routeplan",
        component: "views/routeplan.vue",
    },
];

/// Exact, case-sensitive lookup by path.
#[must_use]
pub fn find_page(path: &str) -> Option<&'static PageEntry> {
    PAGES.iter().find(|p| p.path == path)
}
