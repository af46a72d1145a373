// Panel controllers: the filter -> average -> payload logic behind each of
// the two dashboard views, kept free of any HTTP wiring so it can be driven
// directly from tests.
use crate::error::DashboardError;
use crate::types::{AggregatedCommodityRecord, ChartRow, LossRecord, RenderPayload};
use crate::util::{average, format_pct};
use std::sync::Mutex;

/// Capability set a panel needs from its bound dataset: a selectable
/// category, a country label, and a numeric loss value per row.
pub trait CategorySource {
    fn category(&self) -> &str;
    fn country(&self) -> &str;
    fn value(&self) -> f64;
}

impl CategorySource for LossRecord {
    fn category(&self) -> &str {
        &self.stage
    }
    fn country(&self) -> &str {
        &self.country
    }
    fn value(&self) -> f64 {
        self.loss_percentage
    }
}

impl CategorySource for AggregatedCommodityRecord {
    fn category(&self) -> &str {
        &self.commodity_group
    }
    fn country(&self) -> &str {
        &self.country
    }
    fn value(&self) -> f64 {
        self.mean_loss_percentage
    }
}

// Normalized copy of one bound row. Both record types collapse to this at
// construction so the two controllers share one concrete type.
#[derive(Debug)]
struct BoundRow {
    country: String,
    category: String,
    value: f64,
}

#[derive(Debug)]
struct PanelState {
    selection: String,
    payload: RenderPayload,
}

/// One dashboard panel: an immutable bound dataset plus the current
/// selection and the payload most recently rendered for it.
///
/// `update` is a pure function of (bound rows, selected category); `select`
/// is `update` plus the state commit. The two panels are independent
/// instances, so updating one never touches the other.
#[derive(Debug)]
pub struct PanelController {
    panel: &'static str,
    metric_label: &'static str,
    rows: Vec<BoundRow>,
    categories: Vec<String>,
    state: Mutex<PanelState>,
}

impl PanelController {
    /// Bind a dataset. Derives the dropdown categories in first-seen order,
    /// initializes the selection to the first category, and renders the
    /// initial payload. An empty dataset is refused: a panel with nothing to
    /// show must fail initialization rather than render an empty chart.
    pub fn new<R: CategorySource>(
        panel: &'static str,
        metric_label: &'static str,
        source: &[R],
    ) -> Result<Self, DashboardError> {
        if source.is_empty() {
            return Err(DashboardError::EmptyInput(format!(
                "{} panel bound to an empty dataset",
                panel
            )));
        }
        let rows: Vec<BoundRow> = source
            .iter()
            .map(|r| BoundRow {
                country: r.country().to_string(),
                category: r.category().to_string(),
                value: r.value(),
            })
            .collect();
        let mut categories: Vec<String> = Vec::new();
        for row in &rows {
            if !categories.contains(&row.category) {
                categories.push(row.category.clone());
            }
        }
        let first = categories[0].clone();
        let payload = render(panel, metric_label, &rows, &first)?;
        Ok(Self {
            panel,
            metric_label,
            rows,
            categories,
            state: Mutex::new(PanelState {
                selection: first,
                payload,
            }),
        })
    }

    pub fn panel(&self) -> &'static str {
        self.panel
    }

    /// Dropdown population: the distinct category values of the bound
    /// dataset, in first-seen order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Recompute the render payload for `selected` without touching state.
    ///
    /// Rejects categories that are not present in the bound dataset; the
    /// dropdown is expected to only emit valid values, but stale client
    /// state must not take the panel down.
    pub fn update(&self, selected: &str) -> Result<RenderPayload, DashboardError> {
        if !self.categories.iter().any(|c| c == selected) {
            return Err(DashboardError::UnknownCategory {
                panel: self.panel,
                category: selected.to_string(),
            });
        }
        render(self.panel, self.metric_label, &self.rows, selected)
    }

    /// `update` plus the state commit: on success the stored selection and
    /// payload are replaced; on error both stay as they were.
    pub fn select(&self, selected: &str) -> Result<RenderPayload, DashboardError> {
        let payload = self.update(selected)?;
        let mut state = self.state.lock().unwrap();
        state.selection = selected.to_string();
        state.payload = payload.clone();
        Ok(payload)
    }

    /// Current selection and the payload last rendered for it.
    pub fn snapshot(&self) -> (String, RenderPayload) {
        let state = self.state.lock().unwrap();
        (state.selection.clone(), state.payload.clone())
    }
}

fn render(
    panel: &'static str,
    metric_label: &str,
    rows: &[BoundRow],
    selected: &str,
) -> Result<RenderPayload, DashboardError> {
    let filtered: Vec<&BoundRow> = rows.iter().filter(|r| r.category == selected).collect();
    if filtered.is_empty() {
        // Unreachable while categories derive from the same rows, but never
        // allowed to turn into a divide-by-zero.
        return Err(DashboardError::EmptyFilter {
            panel,
            category: selected.to_string(),
        });
    }
    let values: Vec<f64> = filtered.iter().map(|r| r.value).collect();
    let avg = average(&values);
    Ok(RenderPayload {
        title: format!("{} for {}", metric_label, selected),
        rows: filtered
            .iter()
            .map(|r| ChartRow {
                country: r.country.clone(),
                loss_percentage: r.value,
                label: format_pct(r.value),
            })
            .collect(),
        average_text: format!(
            "Average loss percentage for {}: {}",
            selected,
            format_pct(avg)
        ),
    })
}
