//! Shareable trip links
//!
//! A trip is shared as query parameters `flat, flon, fname` (origin) and
//! `tlat, tlon, tname` (destination). Coordinates are written with six
//! decimals.
//!
//! The same trip can be handed off to other planners (Google Maps,
//! Citymapper) or turned into a text message.

use url::form_urlencoded;

use crate::value_objects::Location;

/// Origin and destination carried by a share link
#[derive(Debug, Clone, Default)]
pub struct ShareLink {
    /// Trip origin
    pub from: Option<Location>,
    /// Trip destination
    pub to: Option<Location>,
}

impl ShareLink {
    /// Create a link for a trip
    #[must_use]
    pub const fn new(from: Option<Location>, to: Option<Location>) -> Self {
        Self { from, to }
    }

    /// Encode as a form-urlencoded query string (without leading `?`)
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(from) = &self.from {
            query
                .append_pair("flat", &format!("{:.6}", from.lat()))
                .append_pair("flon", &format!("{:.6}", from.lon()))
                .append_pair("fname", from.name());
        }
        if let Some(to) = &self.to {
            query
                .append_pair("tlat", &format!("{:.6}", to.lat()))
                .append_pair("tlon", &format!("{:.6}", to.lon()))
                .append_pair("tname", to.name());
        }
        query.finish()
    }

    /// Append the query to a page URL, e.g. `https://example.org/app/`
    #[must_use]
    pub fn to_url(&self, base: &str) -> String {
        let base = base.split(['?', '#']).next().unwrap_or(base);
        format!("{base}?{}", self.to_query())
    }

    /// Google Maps directions between both ends
    ///
    /// `None` unless both ends are set.
    #[must_use]
    pub fn google_maps_url(&self) -> Option<String> {
        let (from, to) = self.ends()?;
        Some(format!(
            "https://www.google.com/maps/dir/{},{}/{},{}",
            from.lat(),
            from.lon(),
            to.lat(),
            to.lon()
        ))
    }

    /// Citymapper directions between both ends
    ///
    /// `None` unless both ends are set.
    #[must_use]
    pub fn citymapper_url(&self) -> Option<String> {
        let (from, to) = self.ends()?;
        Some(format!(
            "https://citymapper.com/directions?startcoord={},{}&endcoord={},{}",
            from.lat(),
            from.lon(),
            to.lat(),
            to.lon()
        ))
    }

    /// Origin as `"<lat>, <lon>"` with six decimals
    #[must_use]
    pub fn origin_coordinates(&self) -> Option<String> {
        self.from
            .as_ref()
            .map(|from| format!("{:.6}, {:.6}", from.lat(), from.lon()))
    }

    /// "Landed" text message announcing the origin, followed by `link`
    #[must_use]
    pub fn landing_message(&self, link: &str) -> Option<String> {
        self.from
            .as_ref()
            .map(|from| format!("I've landed at: {}\n{link}", from.name()))
    }

    /// Emergency text message with the origin's name, coordinates and `link`
    #[must_use]
    pub fn sos_message(&self, link: &str) -> Option<String> {
        self.from.as_ref().map(|from| {
            format!(
                "🆘 EMERGENCY: I need help!\n\nI'm at: {}\nCoords: {:.5}, {:.5}\nTrack me: {link}",
                from.name(),
                from.lat(),
                from.lon()
            )
        })
    }

    fn ends(&self) -> Option<(&Location, &Location)> {
        Some((self.from.as_ref()?, self.to.as_ref()?))
    }

    /// Decode a query string or a full URL
    ///
    /// A side is present only if both of its coordinates are present and
    /// valid. A missing name falls back to the raw `"<lat>, <lon>"` text.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let query = input.split_once('?').map_or(input, |(_, query)| query);
        let query = query.split('#').next().unwrap_or(query);

        let mut params = Params::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params.set(&key, value.into_owned());
        }

        Self {
            from: side(params.flat, params.flon, params.fname),
            to: side(params.tlat, params.tlon, params.tname),
        }
    }
}

/// Raw parameter values, first occurrence wins
#[derive(Default)]
struct Params {
    flat: Option<String>,
    flon: Option<String>,
    fname: Option<String>,
    tlat: Option<String>,
    tlon: Option<String>,
    tname: Option<String>,
}

impl Params {
    fn set(&mut self, key: &str, value: String) {
        let slot = match key {
            "flat" => &mut self.flat,
            "flon" => &mut self.flon,
            "fname" => &mut self.fname,
            "tlat" => &mut self.tlat,
            "tlon" => &mut self.tlon,
            "tname" => &mut self.tname,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }
}

fn side(lat: Option<String>, lon: Option<String>, name: Option<String>) -> Option<Location> {
    let lat_text = lat.filter(|s| !s.is_empty())?;
    let lon_text = lon.filter(|s| !s.is_empty())?;
    let lat: f64 = lat_text.trim().parse().ok()?;
    let lon: f64 = lon_text.trim().parse().ok()?;
    let name = name
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("{lat_text}, {lon_text}"));
    Location::new(lat, lon, name).ok()
}
