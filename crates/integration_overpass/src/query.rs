//! Overpass QL query building

use crate::config::SearchRadii;

/// Build the union query for transport points of interest around a point
///
/// Every clause is a `node` filter with an `around` radius taken from
/// `radii`. Coordinates are written with 7 decimals.
pub fn build_query(lat: f64, lon: f64, radii: &SearchRadii, timeout_secs: u32) -> String {
    let around = |radius: u32| format!("(around:{radius},{lat:.7},{lon:.7})");

    let clauses = [
        (r#"["highway"="bus_stop"]"#, radii.bus_stop),
        (
            r#"["public_transport"="stop_position"]["bus"="yes"]"#,
            radii.stop_position,
        ),
        (r#"["railway"="station"]"#, radii.station),
        (r#"["railway"="halt"]"#, radii.halt),
        (r#"["amenity"="bicycle_rental"]"#, radii.bicycle_rental),
        (r#"["amenity"="taxi"]"#, radii.taxi),
    ];

    let mut query = format!("[out:json][timeout:{timeout_secs}];\n(\n");
    for (filter, radius) in clauses {
        query.push_str(&format!("  node{filter}{};\n", around(radius)));
    }
    query.push_str(");\nout body;\n");
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query() {
        let query = build_query(51.508, -0.1281, &SearchRadii::default(), 15);
        assert!(query.starts_with("[out:json][timeout:15];"));
        assert!(query.contains(r#"node["highway"="bus_stop"](around:600,51.5080000,-0.1281000);"#));
        assert!(query.contains(r#"node["public_transport"="stop_position"]["bus"="yes"](around:600,"#));
        assert!(query.contains(r#"node["railway"="station"](around:3000,"#));
        assert!(query.contains(r#"node["railway"="halt"](around:2000,"#));
        assert!(query.contains(r#"node["amenity"="bicycle_rental"](around:800,"#));
        assert!(query.contains(r#"node["amenity"="taxi"](around:1000,"#));
        assert!(query.trim_end().ends_with("out body;"));
    }

    #[test]
    fn test_custom_radii() {
        let radii = SearchRadii {
            station: 1500,
            ..SearchRadii::default()
        };
        let query = build_query(0.0, 0.0, &radii, 30);
        assert!(query.contains("[timeout:30]"));
        assert!(query.contains(r#"node["railway"="station"](around:1500,0.0000000,0.0000000);"#));
        assert_eq!(query.matches("node[").count(), 6);
    }
}
