//! Dashboard assets, compiled into the binary.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Usable Public Toilet Locator</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
  <link rel="stylesheet" href="/style.css">
</head>
<body>
  <header>
    <h1>Usable Public Toilet Locator</h1>
    <p>Find hygienic public toilets near bus stands using natural language queries</p>
  </header>

  <main>
    <section class="card">
      <form id="search">
        <input id="query" type="text" autocomplete="off"
               placeholder="Example: I need a washroom near Connaught Place">
        <button type="submit">Search</button>
      </form>
      <p class="info-text">Try these example queries:</p>
      <div id="examples"></div>
    </section>

    <section id="result" class="result-area" hidden>
      <h2 id="result-title"></h2>
      <p id="result-message"></p>
      <div id="result-body" class="columns">
        <dl id="details"></dl>
        <div id="map"></div>
      </div>
    </section>
  </main>

  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <script src="/app.js"></script>
</body>
</html>
"#;

pub const STYLE_CSS: &str = r#"body {
  font-family: system-ui, sans-serif;
  margin: 0 auto;
  max-width: 960px;
  padding: 1rem;
  color: #424242;
}
header { text-align: center; }
h1 { color: #1E88E5; font-size: 2.2rem; margin-bottom: 0.25rem; }
.card {
  padding: 1.5rem;
  border-radius: 0.5rem;
  background: #f8f9fa;
  box-shadow: 0 0.125rem 0.25rem rgba(0, 0, 0, 0.075);
}
#search { display: flex; gap: 0.5rem; }
#query { flex: 1; padding: 0.6rem; font-size: 1rem; }
button { padding: 0.6rem 1.2rem; background: #1976D2; color: #fff; border: 0; border-radius: 0.3rem; cursor: pointer; }
#examples { display: grid; grid-template-columns: 1fr 1fr; gap: 0.5rem; }
#examples button { background: #fff; color: #1976D2; border: 1px solid #C5CAE9; text-align: left; }
.info-text { font-size: 0.9rem; color: #616161; }
.result-area { margin-top: 2rem; padding: 1.5rem; border-radius: 0.5rem; }
.success-area { background: #E8F5E9; border: 1px solid #C8E6C9; }
.error-area { background: #FFEBEE; border: 1px solid #FFCDD2; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
#map { height: 320px; border: 1px solid #ccc; border-radius: 0.5rem; }
dt { font-weight: 600; }
dd { margin: 0 0 0.5rem 0; }
"#;

pub const APP_JS: &str = r#"(function () {
  const form = document.getElementById('search');
  const input = document.getElementById('query');
  const result = document.getElementById('result');
  let map = null;

  fetch('/api/examples')
    .then((r) => r.json())
    .then((examples) => {
      const box = document.getElementById('examples');
      examples.forEach((q) => {
        const b = document.createElement('button');
        b.type = 'button';
        b.textContent = q;
        b.onclick = () => { input.value = q; search(q); };
        box.appendChild(b);
      });
    });

  form.addEventListener('submit', (e) => {
    e.preventDefault();
    const q = input.value.trim();
    if (q) search(q);
  });

  function search(q) {
    fetch('/api/resolve?query=' + encodeURIComponent(q))
      .then((r) => r.json())
      .then(render)
      .catch((err) => render({ success: false, message: String(err) }));
  }

  function render(res) {
    result.hidden = false;
    result.className = 'result-area ' + (res.success ? 'success-area' : 'error-area');
    document.getElementById('result-title').textContent =
      res.success ? 'Found a Public Toilet!' : 'No Results Found';
    document.getElementById('result-message').textContent = res.message;

    const body = document.getElementById('result-body');
    if (!res.success) { body.hidden = true; return; }
    body.hidden = false;

    const r = res.matched_record;
    const details = document.getElementById('details');
    details.innerHTML = '';
    [
      ['Bus Stand', r.stop_name],
      ['Toilet ID', r.facility_id],
      ['Location', r.facility_address],
      ['Distance', r.distance_meters + ' meters'],
    ].forEach(([k, v]) => {
      const dt = document.createElement('dt'); dt.textContent = k;
      const dd = document.createElement('dd'); dd.textContent = v;
      details.append(dt, dd);
    });
    const link = document.createElement('a');
    link.href = res.maps_link;
    link.target = '_blank';
    link.rel = 'noopener';
    link.textContent = 'Get Directions on Google Maps';
    details.appendChild(link);

    drawMap(r);
  }

  function drawMap(r) {
    if (typeof L === 'undefined') return;
    if (map) map.remove();
    const stop = [r.stop_lat, r.stop_lon];
    const loo = [r.facility_lat, r.facility_lon];
    map = L.map('map').setView(stop, 16);
    L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
      attribution: '&copy; OpenStreetMap contributors',
    }).addTo(map);
    L.marker(stop).addTo(map).bindPopup(popup('Bus Stand: ' + r.stop_name));
    L.marker(loo).addTo(map).bindPopup(popup('Toilet: ' + r.facility_address));
    L.polyline([stop, loo], { color: 'blue', weight: 2, opacity: 0.7, dashArray: '5' }).addTo(map);
  }

  function popup(text) {
    const el = document.createElement('span');
    el.textContent = text;
    return el;
  }
})();
"#;
