//! Embedded dashboard page

/// Single-page dashboard: metric cards, campaign table and API status
pub const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Allervie Analytics Dashboard</title>
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css" rel="stylesheet">
    <style>
        .metric-card { border-radius: 8px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); margin-bottom: 20px; }
        .metric-value { font-size: 1.8rem; font-weight: bold; }
        .positive-change { color: #10b981; }
        .negative-change { color: #ef4444; }
        .data-note { font-size: 0.8rem; color: #666; font-style: italic; }
        .header { background-color: #f8f9fa; padding: 20px 0; border-bottom: 1px solid #e9ecef; }
    </style>
</head>
<body>
    <div class="header">
        <div class="container d-flex justify-content-between align-items-end">
            <div>
                <h1>Allervie Analytics Dashboard</h1>
                <p class="text-muted mb-0">Google Ads Performance Data <span id="source-badge" class="badge bg-secondary">...</span></p>
            </div>
            <div class="d-flex align-items-end">
                <div class="me-2">
                    <label for="start-date" class="form-label">Start Date</label>
                    <input type="date" id="start-date" class="form-control">
                </div>
                <div class="me-2">
                    <label for="end-date" class="form-label">End Date</label>
                    <input type="date" id="end-date" class="form-control">
                </div>
                <button id="refresh-btn" class="btn btn-primary">Refresh Data</button>
            </div>
        </div>
    </div>

    <div class="container mt-4">
        <div class="row" id="metrics-container"></div>
        <div id="metrics-note" class="data-note"></div>

        <div class="card mt-4">
            <div class="card-header"><h5>Campaign Performance</h5></div>
            <div class="card-body table-responsive">
                <table class="table table-hover">
                    <thead>
                        <tr><th>Campaign</th><th>Status</th><th>Impressions</th><th>Clicks</th><th>CTR</th><th>Cost</th></tr>
                    </thead>
                    <tbody id="campaigns-tbody"></tbody>
                </table>
                <div id="campaigns-note" class="data-note"></div>
            </div>
        </div>

        <div class="card mt-4 mb-4">
            <div class="card-header"><h5>Google Ads API Connection Status</h5></div>
            <div class="card-body"><div id="api-status">Checking API connection status...</div></div>
        </div>
    </div>

    <script>
        const startInput = document.getElementById('start-date');
        const endInput = document.getElementById('end-date');

        const fmtNumber = n => new Intl.NumberFormat('en-US').format(n);
        const fmtCurrency = n => new Intl.NumberFormat('en-US', { style: 'currency', currency: 'USD' }).format(n);

        function query() {
            const params = new URLSearchParams();
            if (startInput.value && endInput.value) {
                params.set('start_date', startInput.value);
                params.set('end_date', endInput.value);
            }
            const qs = params.toString();
            return qs ? '?' + qs : '';
        }

        function setSource(source) {
            const badge = document.getElementById('source-badge');
            badge.textContent = source === 'real' ? 'LIVE DATA' : 'MOCK DATA';
            badge.className = 'badge ' + (source === 'real' ? 'bg-success' : 'bg-warning');
        }

        async function loadPerformance() {
            const container = document.getElementById('metrics-container');
            const note = document.getElementById('metrics-note');
            try {
                const response = await fetch('/api/google-ads/performance' + query());
                const data = await response.json();
                if (!response.ok) throw new Error(data.error || response.statusText);
                setSource(response.headers.get('X-Data-Source'));

                const cards = [
                    ['impressions', 'Impressions'], ['clicks', 'Clicks'], ['clickThroughRate', 'CTR'],
                    ['conversions', 'Conversions'], ['conversionRate', 'Conversion Rate'], ['cost', 'Cost'],
                ];
                container.innerHTML = cards.map(([key, label]) => {
                    const metric = data[key] || { value: 0, change: 0 };
                    const value = typeof metric.value === 'number' ? fmtNumber(metric.value) : metric.value;
                    const cls = metric.change >= 0 ? 'positive-change' : 'negative-change';
                    const arrow = metric.change >= 0 ? '&uarr;' : '&darr;';
                    return `<div class="col-md-6 col-lg-4"><div class="card metric-card p-3">
                        <h6 class="text-muted">${label}</h6>
                        <div class="metric-value">${value}</div>
                        <div class="${cls}">${arrow} ${Math.abs(metric.change).toFixed(1)}%</div>
                    </div></div>`;
                }).join('');
                note.textContent = data.impressions && data.impressions.note ? 'Note: ' + data.impressions.note : '';
            } catch (error) {
                container.innerHTML = `<div class="col-12"><div class="alert alert-danger">Failed to load performance data: ${error.message}</div></div>`;
                note.textContent = '';
            }
        }

        async function loadCampaigns() {
            const body = document.getElementById('campaigns-tbody');
            const note = document.getElementById('campaigns-note');
            try {
                const response = await fetch('/api/google-ads/campaigns' + query());
                const campaigns = await response.json();
                if (!response.ok) throw new Error(campaigns.error || response.statusText);
                if (campaigns.length === 0) {
                    body.innerHTML = '<tr><td colspan="6" class="text-center">No campaign data available.</td></tr>';
                    note.textContent = '';
                    return;
                }
                body.innerHTML = campaigns.map(c => {
                    const cls = c.status === 'ENABLED' ? 'bg-success' : c.status === 'PAUSED' ? 'bg-warning' : 'bg-secondary';
                    return `<tr><td>${c.name}</td><td><span class="badge ${cls}">${c.status}</span></td>
                        <td>${fmtNumber(c.impressions)}</td><td>${fmtNumber(c.clicks)}</td>
                        <td>${c.ctr.toFixed(2)}%</td><td>${fmtCurrency(c.cost)}</td></tr>`;
                }).join('');
                note.textContent = campaigns[0].note ? 'Note: ' + campaigns[0].note : '';
            } catch (error) {
                body.innerHTML = `<tr><td colspan="6" class="text-center">Failed to load campaign data: ${error.message}</td></tr>`;
                note.textContent = '';
            }
        }

        async function checkApiStatus() {
            const status = document.getElementById('api-status');
            try {
                const data = await (await fetch('/api/health')).json();
                if (data.data_source === 'real') {
                    status.innerHTML = `<div class="alert alert-success"><strong>Connected to Google Ads API</strong>
                        <p>Using client ID: ${data.google_ads_client_id || 'Unknown'}</p>
                        <p>Customer ID: ${data.google_ads_customer_id || 'Unknown'}</p></div>`;
                } else {
                    status.innerHTML = `<div class="alert alert-warning"><strong>Using Mock Data</strong>
                        <p>Missing credentials: ${data.missing_credentials.join(', ')}</p></div>`;
                }
            } catch (error) {
                status.innerHTML = '<div class="alert alert-danger"><strong>Error Checking API Status</strong></div>';
            }
        }

        function refresh() {
            loadPerformance();
            loadCampaigns();
            checkApiStatus();
        }

        document.getElementById('refresh-btn').addEventListener('click', refresh);
        document.addEventListener('DOMContentLoaded', refresh);
    </script>
</body>
</html>
"##;
