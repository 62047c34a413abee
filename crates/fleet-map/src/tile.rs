//! Basemap tile layer description.
//!
//! The core never fetches tiles; it only hands this description to the
//! surface.  There is one provider and no fallback.

use serde::{Deserialize, Serialize};

pub const OSM_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// A slippy-map tile provider.
///
/// `url_template` placeholders: `{s}` subdomain, `{z}` zoom, `{x}`/`{y}`
/// tile column/row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution:  String,
    pub subdomains:   Vec<String>,
    pub min_zoom:     u8,
    pub max_zoom:     u8,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: OSM_URL_TEMPLATE.to_owned(),
            attribution:  OSM_ATTRIBUTION.to_owned(),
            subdomains:   ["a", "b", "c"].map(String::from).to_vec(),
            min_zoom:     0,
            max_zoom:     19,
        }
    }
}

impl TileLayer {
    /// Subdomain for tile `(x, y)`: `|x + y| mod n`, so neighbouring tiles
    /// spread across servers.
    pub fn subdomain(&self, x: i64, y: i64) -> &str {
        if self.subdomains.is_empty() {
            return "";
        }
        let n = self.subdomains.len() as u64;
        let i = (x.wrapping_add(y)).unsigned_abs() % n;
        &self.subdomains[i as usize]
    }

    /// Expand the template for one tile.
    pub fn tile_url(&self, z: u8, x: i64, y: i64) -> String {
        self.url_template
            .replace("{s}", self.subdomain(x, y))
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }

    #[inline]
    pub fn allows_zoom(&self, z: u8) -> bool {
        (self.min_zoom..=self.max_zoom).contains(&z)
    }
}
