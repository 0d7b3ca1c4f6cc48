//! End-to-end tests of the adapters against mocked providers (wiremock-based)

use std::sync::Arc;

use application::{JourneyPlanner, LocationService, NearbyService};
use domain::{Location, StopKind};
use infrastructure::{GeocodingAdapter, PoiAdapter, RoutingAdapter, TransitAdapter};
use integration_overpass::OverpassConfig;
use integration_routing::RoutingConfig;
use integration_transit::{NominatimConfig, TransitConfig};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn trafalgar() -> Location {
    Location::new(51.5080, -0.1281, "Trafalgar Square").unwrap()
}

fn kings_cross() -> Location {
    Location::new(51.5303, -0.1238, "King's Cross").unwrap()
}

fn osrm_route(duration: f64, distance: f64) -> String {
    format!(
        r#"{{
            "code": "Ok",
            "routes": [{{
                "duration": {duration},
                "distance": {distance},
                "geometry": {{ "type": "LineString", "coordinates": [[-0.1281, 51.508], [-0.1238, 51.5303]] }},
                "legs": [{{
                    "steps": [
                        {{ "duration": {duration}, "distance": {distance}, "name": "Charing Cross Road", "maneuver": {{ "type": "depart" }} }},
                        {{ "duration": 0, "distance": 0, "name": "", "maneuver": {{ "type": "arrive" }} }}
                    ]
                }}]
            }}]
        }}"#
    )
}

async fn mount_osrm(server: &MockServer, profile: &str, duration: f64, distance: f64) {
    Mock::given(method("GET"))
        .and(path_regex(format!("^/route/v1/{profile}/")))
        .respond_with(ResponseTemplate::new(200).set_body_string(osrm_route(duration, distance)))
        .mount(server)
        .await;
}

fn planner_for(server: &MockServer) -> JourneyPlanner {
    let routing = RoutingAdapter::new(&RoutingConfig {
        base_url: server.uri(),
        ..RoutingConfig::for_testing()
    })
    .unwrap();
    let transit = TransitAdapter::new(&TransitConfig {
        base_url: server.uri(),
        ..TransitConfig::for_testing()
    })
    .unwrap();
    JourneyPlanner::new(Arc::new(routing), Arc::new(transit))
}

#[tokio::test]
async fn test_journey_over_mocked_providers() {
    let server = MockServer::start().await;
    mount_osrm(&server, "walking", 2400.0, 2900.0).await;
    mount_osrm(&server, "driving", 600.0, 5000.0).await;
    mount_osrm(&server, "cycling", 900.0, 3100.0).await;

    Mock::given(method("GET"))
        .and(path("/plan"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"itineraries": [{
                "duration": 1500,
                "walkDistance": 400,
                "transfers": 0,
                "legs": [
                    {"mode": "WALK", "duration": 300, "distance": 400},
                    {"mode": "BUS", "routeShortName": "91", "headsign": "Crouch End", "duration": 1200, "distance": 3000}
                ]
            }]}"#,
        ))
        .mount(&server)
        .await;

    let journey = planner_for(&server).plan(&trafalgar(), &kings_cross()).await;
    let ids: Vec<&str> = journey.routes.iter().map(|r| r.id.as_str()).collect();

    assert_eq!(ids, ["drive", "taxi", "cycle", "transit_0", "walk"]);
    assert_eq!(journey.routes.fastest().map(|r| r.id.as_str()), Some("drive"));

    let taxi = journey.routes.get("taxi").unwrap();
    assert!((taxi.duration_secs - 660.0).abs() < 1e-9);
    assert_eq!(
        taxi.cost_estimate.as_ref().map(ToString::to_string).as_deref(),
        Some("£8–£13")
    );

    let walk = journey.routes.get("walk").unwrap();
    assert!(walk.geometry.is_some());
}

#[tokio::test]
async fn test_journey_survives_provider_outage() {
    let server = MockServer::start().await;
    mount_osrm(&server, "walking", 2400.0, 2900.0).await;

    Mock::given(method("GET"))
        .and(path_regex("^/route/v1/(driving|cycling)/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/plan"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let journey = planner_for(&server).plan(&trafalgar(), &kings_cross()).await;
    let ids: Vec<&str> = journey.routes.iter().map(|r| r.id.as_str()).collect();

    assert_eq!(ids, ["walk", "transit"]);
    assert!(journey.routes.get("transit").unwrap().unavailable);
    assert!(journey.routes.get("walk").unwrap().fastest);
}

#[tokio::test]
async fn test_journey_no_route_from_osrm() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex("^/route/v1/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"code": "NoRoute", "message": "Impossible route", "routes": []}"#),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/plan"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"itineraries": []}"#))
        .mount(&server)
        .await;

    let journey = planner_for(&server).plan(&trafalgar(), &kings_cross()).await;
    assert!(journey.routes.is_total_failure());
}

#[tokio::test]
async fn test_nearby_over_mocked_overpass() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"elements": [
                {"type": "node", "id": 1, "lat": 51.5078, "lon": -0.1275, "tags": {"highway": "bus_stop", "name": "Trafalgar Square", "route_ref": "24;29;176"}},
                {"type": "node", "id": 2, "lat": 51.5081, "lon": -0.1247, "tags": {"railway": "station", "name": "Charing Cross", "operator": "Network Rail"}},
                {"type": "node", "id": 3, "lat": 51.5069, "lon": -0.1300, "tags": {"amenity": "bicycle_rental", "network": "Santander Cycles"}},
                {"type": "node", "id": 4, "lat": 51.5090, "lon": -0.1260, "tags": {"amenity": "taxi"}},
                {"type": "node", "id": 5, "lat": 51.5085, "lon": -0.1290, "tags": {"amenity": "cafe"}},
                {"type": "way", "id": 6, "tags": {"amenity": "taxi"}}
            ]}"#,
        ))
        .mount(&server)
        .await;

    let poi = PoiAdapter::new(&OverpassConfig {
        url: format!("{}/api/interpreter", server.uri()),
        ..OverpassConfig::for_testing()
    })
    .unwrap();
    let nearby = NearbyService::new(Arc::new(poi))
        .nearby(&trafalgar())
        .await
        .unwrap();

    assert_eq!(nearby.stops.len(), 4);
    assert_eq!(nearby.stops.bucket(StopKind::Bus)[0].routes.as_deref(), Some("24;29;176"));
    assert_eq!(nearby.stops.bucket(StopKind::Train)[0].label, "Charing Cross");
    assert_eq!(nearby.stops.bucket(StopKind::Taxi)[0].label, "Taxi Rank");
}

#[tokio::test]
async fn test_nearby_outage_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(504))
        .mount(&server)
        .await;

    let poi = PoiAdapter::new(&OverpassConfig {
        url: server.uri(),
        ..OverpassConfig::for_testing()
    })
    .unwrap();
    let result = NearbyService::new(Arc::new(poi)).nearby(&trafalgar()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_location_search_and_label_fix() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"lat": "51.5303", "lon": "-0.1238", "display_name": "King's Cross, London Borough of Camden, London, Greater London, England"}]"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"display_name": "Trafalgar Square, St. James's, Westminster, London, England"}"#,
        ))
        .mount(&server)
        .await;

    let geocoding = GeocodingAdapter::new(&NominatimConfig {
        base_url: server.uri(),
        ..NominatimConfig::for_testing()
    })
    .unwrap();
    let service = LocationService::new(Arc::new(geocoding));

    let found = service.search("kings cross", 5).await.unwrap();
    assert_eq!(found.len(), 1);
    assert!(found[0].name().starts_with("King's Cross"));

    let fix = service.label_fix(51.508, -0.1281).await.unwrap();
    assert_eq!(fix.name(), "Trafalgar Square, St. James's, Westminster");
}

#[tokio::test]
async fn test_label_fix_falls_back_to_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let geocoding = GeocodingAdapter::new(&NominatimConfig {
        base_url: server.uri(),
        ..NominatimConfig::for_testing()
    })
    .unwrap();
    let fix = LocationService::new(Arc::new(geocoding))
        .label_fix(51.508, -0.1281)
        .await
        .unwrap();
    assert_eq!(fix.name(), application::fallback_label(51.508, -0.1281));
}
