use serde::Serialize;
use tabled::Tabled;

/// One row of the food-supply-stage table.
///
/// The table is a cross product: every stage carries a single loss
/// percentage that is replicated across all countries.
#[derive(Debug, Clone, Tabled)]
pub struct LossRecord {
    #[tabled(rename = "Country")]
    pub country: String,
    #[tabled(rename = "FoodSupplyStage")]
    pub stage: String,
    #[tabled(rename = "LossPercentage")]
    pub loss_percentage: f64,
}

/// One row of the raw commodity table. Unlike the stage table this is not a
/// cross product; some (country, group) combinations are absent.
#[derive(Debug, Clone, Tabled)]
pub struct CommodityRecord {
    #[tabled(rename = "Country")]
    pub country: String,
    #[tabled(rename = "CommodityGroup")]
    pub commodity_group: String,
    #[tabled(rename = "LossPercentage")]
    pub loss_percentage: f64,
}

/// Derived table: one row per distinct (country, commodity group) pair seen
/// in the raw commodity table, carrying the mean loss percentage.
#[derive(Debug, Clone, Tabled)]
pub struct AggregatedCommodityRecord {
    #[tabled(rename = "Country")]
    pub country: String,
    #[tabled(rename = "CommodityGroup")]
    pub commodity_group: String,
    #[tabled(rename = "MeanLossPercentage")]
    pub mean_loss_percentage: f64,
}

/// One bar of a rendered chart. `label` is the display text attached to the
/// bar (two decimals, trailing `%`), kept server-side so the payload alone
/// fixes what the page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub country: String,
    pub loss_percentage: f64,
    pub label: String,
}

/// Everything a panel needs to redraw itself after a selection change.
///
/// Recomputed wholesale on every update and replaced as a unit; field order
/// is fixed by the struct, so identical selections serialize byte-identically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPayload {
    pub title: String,
    pub rows: Vec<ChartRow>,
    pub average_text: String,
}
