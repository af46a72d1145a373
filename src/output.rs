// The fixed rendering surface: the embedded dashboard page plus the console
// previews printed once at startup.
use tabled::{settings::Style, Table, Tabled};

/// Markdown preview of the first rows of a table, printed during startup so
/// the served data is visible in the console.
pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

/// The dashboard page. Two independent panels: each has a dropdown, a bar
/// chart, and an average-loss line. The page script fetches the initial
/// state from `/api/dashboard` and posts dropdown changes to
/// `/api/panel/{panel}/select`; a failed update shows its message inside the
/// affected panel and leaves the previous chart in place.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Food Loss Dashboard</title>
<style>
  body { font-family: sans-serif; margin: 2rem; color: #222; }
  h1 { margin-bottom: 1.5rem; }
  .panels { display: flex; gap: 2rem; flex-wrap: wrap; }
  .panel { flex: 1 1 28rem; border: 1px solid #ddd; border-radius: 6px; padding: 1rem; }
  .panel h2 { font-size: 1.05rem; margin-top: 0; }
  .panel select { width: 100%; padding: 0.3rem; margin-bottom: 1rem; }
  .chart-title { font-weight: bold; margin-bottom: 0.5rem; }
  .bar-row { display: flex; align-items: center; margin: 0.25rem 0; }
  .bar-row .country { width: 7rem; font-size: 0.85rem; }
  .bar-row .bar { background: #4878a8; height: 1.1rem; margin-right: 0.4rem; }
  .bar-row .value { font-size: 0.8rem; }
  .average { margin-top: 0.75rem; font-style: italic; }
  .error { color: #a33; margin-top: 0.75rem; }
</style>
</head>
<body>
<h1>Food Loss Dashboard</h1>
<div class="panels">
  <div class="panel" id="panel-stage">
    <h2>Food Loss Percentage by Food Supply Stage and Country</h2>
    <select></select>
    <div class="chart-title"></div>
    <div class="chart"></div>
    <div class="average"></div>
    <div class="error"></div>
  </div>
  <div class="panel" id="panel-commodity">
    <h2>Average Loss Percentage by Commodity Group and Country</h2>
    <select></select>
    <div class="chart-title"></div>
    <div class="chart"></div>
    <div class="average"></div>
    <div class="error"></div>
  </div>
</div>
<script>
function renderPayload(panelEl, payload) {
  panelEl.querySelector('.chart-title').textContent = payload.title;
  const chart = panelEl.querySelector('.chart');
  chart.innerHTML = '';
  const max = Math.max(...payload.rows.map(r => r.loss_percentage), 1);
  for (const row of payload.rows) {
    const div = document.createElement('div');
    div.className = 'bar-row';
    const country = document.createElement('span');
    country.className = 'country';
    country.textContent = row.country;
    const bar = document.createElement('span');
    bar.className = 'bar';
    bar.style.width = (row.loss_percentage / max * 55) + '%';
    const value = document.createElement('span');
    value.className = 'value';
    value.textContent = row.label;
    div.append(country, bar, value);
    chart.appendChild(div);
  }
  panelEl.querySelector('.average').textContent = payload.average_text;
  panelEl.querySelector('.error').textContent = '';
}

async function onSelect(panel, panelEl, category) {
  const resp = await fetch('/api/panel/' + panel + '/select', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ category }),
  });
  const body = await resp.json();
  if (resp.ok) {
    renderPayload(panelEl, body);
  } else {
    // Panel-local failure: keep the previous chart, show the message.
    panelEl.querySelector('.error').textContent = body.error;
  }
}

async function init() {
  const resp = await fetch('/api/dashboard');
  const panels = await resp.json();
  for (const view of panels) {
    const panelEl = document.getElementById('panel-' + view.panel);
    const select = panelEl.querySelector('select');
    for (const category of view.categories) {
      const option = document.createElement('option');
      option.value = category;
      option.textContent = category;
      select.appendChild(option);
    }
    select.value = view.selected;
    select.addEventListener('change', () => onSelect(view.panel, panelEl, select.value));
    renderPayload(panelEl, view.payload);
  }
}

init();
</script>
</body>
</html>
"#;
