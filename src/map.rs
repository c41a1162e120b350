use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::aggregate::{PlaceGroup, PlaceKey};

/// Continental-US centroid; the initial view is fixed, never fitted to data.
const MAP_CENTER: [f64; 2] = [39.8283, -98.5795];
const MAP_ZOOM: u32 = 4;

/// Render the grouped places as a single Leaflet document.
///
/// One marker per group with a usable coordinate; groups without one are
/// skipped. Tooltip and popup are formatted off the same label so the two
/// views cannot drift apart. Markers come out in sorted key order.
pub fn render_html(groups: &HashMap<PlaceKey, PlaceGroup>) -> String {
    let mut entries: Vec<_> = groups.iter().collect();
    entries.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));

    let mut markers = String::new();
    for (key, group) in entries {
        let Some(coord) = group.coordinate else {
            continue;
        };
        let label = escape(&format!("{key} ({})", group.codes.len()));
        let zip_list = escape(&group.codes.join(", "));
        markers.push_str(&format!(
            "L.marker([{}, {}]).addTo(map)\n    .bindPopup(\"{label}<br>Zip Codes: {zip_list}\")\n    .bindTooltip(\"{label}\");\n",
            coord.latitude, coord.longitude,
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>US City Map</title>
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map('map').setView([{lat}, {lon}], {zoom});
L.tileLayer('https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
    maxZoom: 19,
    attribution: '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors'
}}).addTo(map);
{markers}</script>
</body>
</html>
"#,
        lat = MAP_CENTER[0],
        lon = MAP_CENTER[1],
        zoom = MAP_ZOOM,
        markers = markers,
    )
}

/// render and write the map to an HTML file
pub fn save_map(groups: &HashMap<PlaceKey, PlaceGroup>, save_path: impl AsRef<Path>) -> color_eyre::Result<()> {
    let save_path = save_path.as_ref();
    if let Some(parent) = save_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(save_path, render_html(groups))?;
    Ok(())
}

/// Marker text is interpolated into a double-quoted JS string inside HTML,
/// so both the HTML metacharacters and the string delimiters must go.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out
}
