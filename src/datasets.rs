// Compiled-in source tables for the two dashboard panels.
//
// Survey extract covering seven South/East Asian countries. The stage table
// pairs each supply-chain stage with one loss percentage; the commodity table
// lists per-country loss percentages for the commodity groups that were
// actually surveyed.
use crate::error::DashboardError;
use crate::types::{CommodityRecord, LossRecord};

pub const COUNTRIES: [&str; 7] = [
    "Bangladesh",
    "Nepal",
    "Sri Lanka",
    "Pakistan",
    "India",
    "China",
    "Indonesia",
];

// Stage -> loss percentage, 1:1 positional. Ascending by percentage.
const STAGES: [(&str, f64); 15] = [
    ("Distribution", 0.79),
    ("Market", 1.94),
    ("Households", 2.86),
    ("Farm", 2.94),
    ("Storage", 3.16),
    ("Processing", 3.26),
    ("Transport", 4.21),
    ("Wholesale", 5.64),
    ("Harvest", 5.81),
    ("Retail", 6.89),
    ("Food Services", 7.59),
    ("Trader", 7.95),
    ("Export", 10.79),
    ("Whole supply chain", 12.05),
    ("Post-harvest", 16.93),
];

// (country, commodity group, loss percentage), sorted by country then group.
const COMMODITY_ROWS: [(&str, &str, f64); 22] = [
    ("Bangladesh", "Cereals & Pulses", 5.311894),
    ("Bangladesh", "Fruits & Vegetables", 8.789755),
    ("Bangladesh", "Roots, Tubers & Oil crops", 20.000000),
    ("China", "Animal Products", 2.983333),
    ("China", "Cereals & Pulses", 3.104124),
    ("China", "Fruits & Vegetables", 8.980694),
    ("China", "Other", 4.930000),
    ("India", "Animal Products", 1.463529),
    ("India", "Cereals & Pulses", 2.657143),
    ("India", "Fruits & Vegetables", 4.229673),
    ("India", "Other", 2.396522),
    ("India", "Roots, Tubers & Oil crops", 1.749622),
    ("Indonesia", "Cereals & Pulses", 4.277069),
    ("Indonesia", "Fruits & Vegetables", 30.000000),
    ("Nepal", "Cereals & Pulses", 5.166000),
    ("Nepal", "Fruits & Vegetables", 14.048857),
    ("Pakistan", "Cereals & Pulses", 4.791750),
    ("Pakistan", "Fruits & Vegetables", 10.166522),
    ("Pakistan", "Roots, Tubers & Oil crops", 3.190000),
    ("Sri Lanka", "Cereals & Pulses", 12.968000),
    ("Sri Lanka", "Fruits & Vegetables", 12.179821),
    ("Sri Lanka", "Roots, Tubers & Oil crops", 10.808000),
];

/// Build the stage table: for each stage in declared order, one row per
/// country in declared order (country varies fastest). 105 rows.
pub fn stage_dataset() -> Vec<LossRecord> {
    let mut rows = Vec::with_capacity(STAGES.len() * COUNTRIES.len());
    for (stage, loss_percentage) in STAGES {
        for country in COUNTRIES {
            rows.push(LossRecord {
                country: country.to_string(),
                stage: stage.to_string(),
                loss_percentage,
            });
        }
    }
    rows
}

/// Build the raw commodity table in literal declaration order. 22 rows.
pub fn commodity_dataset() -> Vec<CommodityRecord> {
    COMMODITY_ROWS
        .iter()
        .map(|&(country, commodity_group, loss_percentage)| CommodityRecord {
            country: country.to_string(),
            commodity_group: commodity_group.to_string(),
            loss_percentage,
        })
        .collect()
}

/// Defensive startup check over both tables.
///
/// The compiled-in data is well-formed by construction; this guards edited
/// or substituted tables. Loss percentages must sit in [0, 100] and no label
/// may be blank.
pub fn validate(
    stage_rows: &[LossRecord],
    commodity_rows: &[CommodityRecord],
) -> Result<(), DashboardError> {
    for r in stage_rows {
        check_row(&r.country, &r.stage, r.loss_percentage, "stage")?;
    }
    for r in commodity_rows {
        check_row(&r.country, &r.commodity_group, r.loss_percentage, "commodity")?;
    }
    Ok(())
}

fn check_row(country: &str, category: &str, pct: f64, table: &str) -> Result<(), DashboardError> {
    if country.trim().is_empty() || category.trim().is_empty() {
        return Err(DashboardError::InvalidData(format!(
            "{} table has a row with a blank label",
            table
        )));
    }
    if !(0.0..=100.0).contains(&pct) {
        return Err(DashboardError::InvalidData(format!(
            "{} table: loss percentage {} for {} / {} out of range [0, 100]",
            table, pct, country, category
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_table_is_a_cross_product() {
        let rows = stage_dataset();
        assert_eq!(rows.len(), 105);
        // Country varies fastest: the first 7 rows all carry the first stage.
        for (i, r) in rows.iter().take(COUNTRIES.len()).enumerate() {
            assert_eq!(r.stage, "Distribution");
            assert_eq!(r.country, COUNTRIES[i]);
            assert_eq!(r.loss_percentage, 0.79);
        }
        // Every stage appears once per country.
        for (stage, pct) in STAGES {
            let matching: Vec<_> = rows.iter().filter(|r| r.stage == stage).collect();
            assert_eq!(matching.len(), COUNTRIES.len());
            assert!(matching.iter().all(|r| r.loss_percentage == pct));
        }
    }

    #[test]
    fn commodity_table_matches_declaration() {
        let rows = commodity_dataset();
        assert_eq!(rows.len(), 22);
        assert_eq!(rows[0].country, "Bangladesh");
        assert_eq!(rows[0].commodity_group, "Cereals & Pulses");
        assert_eq!(rows[0].loss_percentage, 5.311894);
        // Not a cross product: Indonesia was only surveyed for two groups.
        let indonesia = rows.iter().filter(|r| r.country == "Indonesia").count();
        assert_eq!(indonesia, 2);
    }

    #[test]
    fn compiled_in_tables_pass_validation() {
        assert!(validate(&stage_dataset(), &commodity_dataset()).is_ok());
    }

    #[test]
    fn validation_rejects_out_of_range_percentage() {
        let mut rows = stage_dataset();
        rows[0].loss_percentage = 101.0;
        let err = validate(&rows, &commodity_dataset()).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn validation_rejects_blank_labels() {
        let mut rows = commodity_dataset();
        rows[3].commodity_group = "  ".to_string();
        assert!(validate(&stage_dataset(), &rows).is_err());
    }
}
