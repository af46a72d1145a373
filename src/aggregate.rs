// Group-by-mean derivation of the commodity panel's table, run once at
// startup.
use crate::error::DashboardError;
use crate::types::{AggregatedCommodityRecord, CommodityRecord};
use crate::util::average;
use std::collections::HashMap;

/// Group the raw commodity table by (country, commodity group) and compute
/// the unweighted arithmetic mean loss percentage of each group.
///
/// Output rows are in grouping-key first-seen order, so repeated calls on
/// the same input produce the same table and the dropdown population stays
/// stable. Only pairs present in the input appear in the output; a group of
/// size 1 keeps its single value unchanged.
pub fn aggregate(
    rows: &[CommodityRecord],
) -> Result<Vec<AggregatedCommodityRecord>, DashboardError> {
    if rows.is_empty() {
        return Err(DashboardError::EmptyInput(
            "commodity table has no rows to aggregate".to_string(),
        ));
    }

    let mut order: Vec<(String, String)> = Vec::new();
    let mut groups: HashMap<(String, String), Vec<f64>> = HashMap::new();
    for r in rows {
        let key = (r.country.clone(), r.commodity_group.clone());
        match groups.get_mut(&key) {
            Some(values) => values.push(r.loss_percentage),
            None => {
                order.push(key.clone());
                groups.insert(key, vec![r.loss_percentage]);
            }
        }
    }

    Ok(order
        .into_iter()
        .map(|key| {
            let values = &groups[&key];
            AggregatedCommodityRecord {
                country: key.0,
                commodity_group: key.1,
                mean_loss_percentage: average(values),
            }
        })
        .collect())
}
