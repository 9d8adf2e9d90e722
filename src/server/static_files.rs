//! Embedded frontend: the browser rendition of the same pipeline, against
//! the real HERE mapping SDK.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>MediMap — nearby hospitals</title>
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <link rel="stylesheet" href="https://js.api.here.com/v3/3.1/mapsjs-ui.css">
  <style>
    body { font-family: sans-serif; margin: 0; display: flex; flex-direction: column; height: 100vh; }
    header { padding: 0.5rem 1rem; display: flex; gap: 0.5rem; }
    #search-input { flex: 1; padding: 0.4rem; }
    main { display: flex; flex: 1; min-height: 0; }
    #map { flex: 2; }
    aside { flex: 1; overflow-y: auto; padding: 0 1rem; }
  </style>
  <script src="https://js.api.here.com/v3/3.1/mapsjs-core.js"></script>
  <script src="https://js.api.here.com/v3/3.1/mapsjs-service.js"></script>
  <script src="https://js.api.here.com/v3/3.1/mapsjs-mapevents.js"></script>
  <script src="https://js.api.here.com/v3/3.1/mapsjs-ui.js"></script>
  <script>window.MEDIMAP_API_KEY = "{{API_KEY}}";</script>
  <script src="/app.js" defer></script>
</head>
<body>
  <header>
    <input id="search-input" type="text" placeholder="Search an address or place">
    <button id="search-button">Search</button>
  </header>
  <main>
    <div id="map"></div>
    <aside>
      <h2>Nearby hospitals</h2>
      <ul id="hospital-list"></ul>
    </aside>
  </main>
</body>
</html>
"#;

pub const APP_JS: &str = r#"document.addEventListener('DOMContentLoaded', function () {
    const mapContainer = document.getElementById('map');
    const hospitalList = document.getElementById('hospital-list');
    const searchButton = document.getElementById('search-button');
    const searchInput = document.getElementById('search-input');

    const platform = new H.service.Platform({ apikey: window.MEDIMAP_API_KEY });

    // Identity of the current map session. A response carrying a stale
    // sequence number belongs to a superseded session and is discarded.
    let requestSeq = 0;

    function initializeMap(lat, lng) {
        const defaultLayers = platform.createDefaultLayers();
        mapContainer.innerHTML = '';
        const map = new H.Map(mapContainer, defaultLayers.vector.normal.map, {
            center: { lat: lat, lng: lng },
            zoom: 14,
            pixelRatio: window.devicePixelRatio || 1,
        });
        new H.mapevents.Behavior(new H.mapevents.MapEvents(map));
        H.ui.UI.createDefault(map, defaultLayers);
        return map;
    }

    function geocodeLocation(query) {
        const geocoder = platform.getSearchService();
        return new Promise((resolve, reject) => {
            geocoder.geocode({ q: query }, (result) => {
                if (result.items.length > 0) {
                    resolve(result.items[0].position);
                } else {
                    reject('Location not found: ' + query);
                }
            }, reject);
        });
    }

    function runSearch(lat, lng) {
        const seq = ++requestSeq;
        const map = initializeMap(lat, lng);
        map.addObject(new H.map.Marker({ lat: lat, lng: lng }));

        fetch('/api/search_hospitals', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ latitude: lat, longitude: lng }),
        })
            .then((response) => {
                if (!response.ok) throw new Error('backend returned ' + response.status);
                return response.json();
            })
            .then((data) => {
                if (seq !== requestSeq) {
                    console.warn('Discarding stale hospital response.');
                    return;
                }
                hospitalList.innerHTML = '';
                data.forEach((hospital) => {
                    const li = document.createElement('li');
                    li.textContent = hospital.title;
                    hospitalList.appendChild(li);
                    if (hospital.position && hospital.position.lat != null && hospital.position.lng != null) {
                        map.addObject(new H.map.Marker(hospital.position));
                    } else {
                        console.warn('No valid position for: ' + hospital.title);
                    }
                });
            })
            .catch((err) => {
                if (seq === requestSeq) hospitalList.innerHTML = '';
                console.error('Hospital fetch failed:', err);
            });
    }

    searchButton.addEventListener('click', () => {
        const query = searchInput.value.trim();
        if (!query) {
            alert('Please enter a location to search.');
            return;
        }
        geocodeLocation(query)
            .then(({ lat, lng }) => runSearch(lat, lng))
            .catch((error) => alert('Error: ' + error));
    });

    if (navigator.geolocation) {
        navigator.geolocation.getCurrentPosition(
            (position) => runSearch(position.coords.latitude, position.coords.longitude),
            () => alert('Unable to retrieve location. Ensure location services are enabled.')
        );
    } else {
        alert('Geolocation is not supported by this browser.');
    }
});
"#;
