use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use restmcp::client::{Fetch, FetchError};
use restmcp::provider::RemoteCatalog;
use restmcp::query::Query;
use restmcp::tools::*;
use serde_json::{json, Value};

type Request = (Vec<String>, Vec<(String, String)>);

/// Replays canned responses in order and records every request.
#[derive(Clone)]
struct MockFetch {
    responses: Arc<Mutex<Vec<Result<Value, FetchError>>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl MockFetch {
    fn new(responses: Vec<Result<Value, FetchError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn ok(response: Value) -> Self {
        Self::new(vec![Ok(response)])
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetch for MockFetch {
    async fn get(&self, path: &[&str], query: &Query) -> Result<Value, FetchError> {
        self.requests
            .lock()
            .unwrap()
            .push((segments(path), query.to_pairs()));
        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            responses.remove(0)
        } else {
            Err(FetchError::Request("No more mock responses".to_string()))
        }
    }
}

fn segments(path: &[&str]) -> Vec<String> {
    path.iter().map(|s| s.to_string()).collect()
}

fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
    list.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn solar(mock: &MockFetch) -> SolarTools {
    SolarTools::new(Arc::new(mock.clone()))
}

fn body(id: &str, moons: Value) -> Value {
    json!({"id": id, "englishName": id, "bodyType": "Planet", "moons": moons})
}

fn markdown() -> Option<String> {
    Some("markdown".to_string())
}

#[tokio::test]
async fn test_list_bodies_encodes_query() {
    let mock = MockFetch::ok(json!({"bodies": [body("mars", json!(null)), body("terre", json!(null))]}));
    let text = solar(&mock)
        .list_bodies(ListBodiesParams {
            limit: 500,
            page: 0,
            body_type: Some("Planet".into()),
            is_planet: Some(true),
            order_by: "gravity".into(),
            order_desc: true,
            response_format: None,
        })
        .await;

    assert_eq!(
        mock.requests(),
        vec![(
            segments(&["bodies"]),
            pairs(&[
                ("order", "gravity,desc"),
                ("page", "1,100"),
                ("filter[]", "bodyType,eq,Planet"),
                ("filter[]", "isPlanet,eq,true"),
            ])
        )]
    );

    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["page"], 1);
    assert_eq!(value["count"], 2);
    assert_eq!(value["bodies"][1]["id"], "terre");
}

#[tokio::test]
async fn test_list_bodies_full_page_footer() {
    let mock = MockFetch::ok(json!({"bodies": [body("a", json!(null)), body("b", json!(null))]}));
    let text = solar(&mock)
        .list_bodies(ListBodiesParams {
            limit: 2,
            response_format: markdown(),
            ..Default::default()
        })
        .await;

    assert!(text.starts_with("# Solar System Bodies\n\nPage 1, showing 2 bodies\n\n## a (ID: a)"));
    assert!(text.ends_with("*More bodies may be available. Use page=2 for next page.*"));
}

#[tokio::test]
async fn test_list_bodies_short_page_has_no_footer() {
    let mock = MockFetch::ok(json!({"bodies": [body("a", json!(null))]}));
    let text = solar(&mock)
        .list_bodies(ListBodiesParams {
            limit: 2,
            response_format: markdown(),
            ..Default::default()
        })
        .await;
    assert!(!text.contains("More bodies"));
}

#[tokio::test]
async fn test_rate_limit_message_ignores_body() {
    let mock = MockFetch::new(vec![Err(FetchError::Status {
        status: 429,
        body: r#"{"message": "too many requests", "retry": 60}"#.to_string(),
    })]);
    let text = solar(&mock)
        .get_body(GetBodyParams {
            body_id: "terre".into(),
            response_format: markdown(),
        })
        .await;

    assert_eq!(text, "Error: Rate limit exceeded. Please wait before retrying.");
    assert_eq!(mock.requests()[0].0, segments(&["bodies", "terre"]));
}

#[tokio::test]
async fn test_invalid_latitude_makes_no_request() {
    let mock = MockFetch::new(vec![]);
    let text = solar(&mock)
        .calculate_positions(CalculatePositionsParams {
            latitude: 91.0,
            longitude: 0.0,
            elevation: 0.0,
            datetime_utc: String::new(),
            timezone_offset: 0,
            response_format: None,
        })
        .await;

    assert_eq!(text, "Error: Latitude must be between -90 and +90 degrees.");
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_positions_request_and_markdown() {
    let mock = MockFetch::ok(json!({
        "location": {"lat": 48.85, "lon": 2.35},
        "time_info": {"utc": "2024-06-01T12:00:00", "jd": 2460463.5},
        "positions": [
            {"name": "Mars", "ra": 1.5, "dec": 2.5, "az": 100.25, "alt": 10.5},
            {"name": "Sun"}
        ],
    }));
    let text = solar(&mock)
        .calculate_positions(CalculatePositionsParams {
            latitude: 48.85,
            longitude: 2.35,
            elevation: 35.0,
            datetime_utc: "2024-06-01T12:00:00".into(),
            timezone_offset: 2,
            response_format: markdown(),
        })
        .await;

    assert_eq!(
        mock.requests(),
        vec![(
            segments(&["positions"]),
            pairs(&[
                ("lat", "48.85"),
                ("lon", "2.35"),
                ("elev", "35"),
                ("datetime", "2024-06-01T12:00:00"),
                ("zone", "2"),
            ])
        )]
    );

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "# Celestial Positions");
    assert!(lines.contains(&"- Latitude: 48.85°"));
    // missing from the response, so the observer's own value is shown
    assert!(lines.contains(&"- Elevation: 35 m"));
    assert!(lines.contains(&"- UTC: 2024-06-01T12:00:00"));
    assert!(lines.contains(&"- Local: N/A"));
    assert!(lines.contains(&"- Julian Day: 2460463.5"));
    assert!(lines.contains(&"### Mars"));
    assert!(lines.contains(&"**Azimuth**: 100.25°"));
    assert!(lines.contains(&"### Sun"));
}

#[tokio::test]
async fn test_empty_datetime_uses_current_time() {
    let mock = MockFetch::ok(json!({"positions": []}));
    solar(&mock)
        .calculate_positions(CalculatePositionsParams {
            latitude: 0.0,
            longitude: 0.0,
            elevation: 0.0,
            datetime_utc: "  ".into(),
            timezone_offset: 0,
            response_format: None,
        })
        .await;

    let (_, params) = &mock.requests()[0];
    let (_, datetime) = params.iter().find(|(k, _)| k == "datetime").unwrap();
    assert_eq!(datetime.len(), "2024-06-01T12:00:00".len());
    assert_eq!(&datetime[10..11], "T");
}

#[tokio::test]
async fn test_has_moons_post_filter_recounts() {
    let page = json!({"bodies": [
        body("jupiter", json!([{"moon": "Io"}, {"moon": "Europa"}])),
        body("mercure", json!(null)),
        body("terre", json!([{"moon": "La Lune"}])),
    ]});
    let mock = MockFetch::new(vec![Ok(page.clone()), Ok(page)]);
    let tools = solar(&mock);

    let with_moons = tools
        .filter_bodies(FilterBodiesParams {
            min_radius: Some(1000.0),
            has_moons: Some(true),
            ..Default::default()
        })
        .await;
    let value: Value = serde_json::from_str(&with_moons).unwrap();
    assert_eq!(value["count"], 2);
    assert_eq!(value["bodies"].as_array().unwrap().len(), 2);

    let without = tools
        .filter_bodies(FilterBodiesParams {
            has_moons: Some(false),
            response_format: markdown(),
            ..Default::default()
        })
        .await;
    assert!(without.contains("Found 1 body(ies) matching criteria"));
    assert!(without.contains("## mercure (ID: mercure)"));

    assert_eq!(
        mock.requests()[0].1,
        pairs(&[
            ("order", "meanRadius,desc"),
            ("page", "1,20"),
            ("filter[]", "meanRadius,ge,1000"),
        ])
    );
}

#[tokio::test]
async fn test_blank_search_makes_no_request() {
    let mock = MockFetch::new(vec![]);
    let text = solar(&mock)
        .search_bodies(SearchBodiesParams {
            query: " \t ".into(),
            limit: 20,
            response_format: None,
        })
        .await;
    assert_eq!(text, "Error: Search query cannot be empty.");
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_search_bodies_no_match() {
    let mock = MockFetch::ok(json!({"bodies": []}));
    let text = solar(&mock)
        .search_bodies(SearchBodiesParams {
            query: "vulcan".into(),
            limit: 5,
            response_format: markdown(),
        })
        .await;
    assert_eq!(text, "No celestial bodies found matching 'vulcan'.");
    assert_eq!(
        mock.requests()[0].1,
        pairs(&[
            ("order", "id,asc"),
            ("page", "1,5"),
            ("filter[]", "englishName,cs,vulcan"),
        ])
    );
}

#[tokio::test]
async fn test_moons_envelope() {
    let mock = MockFetch::ok(json!({"bodies": [{"id": "io", "englishName": "Io"}]}));
    let text = solar(&mock)
        .get_moons(GetMoonsParams {
            planet_id: "jupiter".into(),
            response_format: None,
        })
        .await;

    assert!(text.starts_with("{\n  \"planet\": \"jupiter\",\n  \"count\": 1,\n  \"moons\": ["));
    assert_eq!(
        mock.requests()[0].1,
        pairs(&[
            ("order", "meanRadius,desc"),
            ("page", "1,100"),
            ("filter[]", "aroundPlanet,eq,jupiter"),
        ])
    );
}

#[tokio::test]
async fn test_json_rendering_is_reproducible() {
    let page = json!({"bodies": [{"id": "terre", "density": 5.51, "englishName": "Earth"}]});
    let mock = MockFetch::new(vec![Ok(page.clone()), Ok(page)]);
    let tools = solar(&mock);

    let first = tools.get_planets(FormatParams::default()).await;
    let second = tools.get_planets(FormatParams::default()).await;
    assert_eq!(first, second);
    assert_eq!(
        mock.requests()[0].1,
        pairs(&[("order", "semimajorAxis,asc"), ("filter[]", "isPlanet,eq,true")])
    );
}

#[tokio::test]
async fn test_no_dwarf_planets() {
    let mock = MockFetch::ok(json!({"bodies": []}));
    let text = solar(&mock).get_dwarf_planets(FormatParams::default()).await;
    assert_eq!(text, "No dwarf planets found.");
    assert_eq!(
        mock.requests()[0].1,
        pairs(&[
            ("order", "semimajorAxis,asc"),
            ("filter[]", "bodyType,eq,Dwarf Planet"),
        ])
    );
}

#[tokio::test]
async fn test_known_counts_markdown() {
    let mock = MockFetch::new(vec![
        Ok(json!({"knowncount": [
            {"id": "asteroids", "knownCount": 1000, "updateDate": "2024-05-01"}
        ]})),
        Ok(json!({"id": "comets", "knownCount": 4000, "updateDate": "2024-01-01"})),
    ]);
    let tools = solar(&mock);

    let all = tools
        .list_known_counts(FormatParams {
            response_format: markdown(),
        })
        .await;
    assert_eq!(
        all,
        "# Known Object Counts\n\n- **asteroids**: 1000 (updated: 2024-05-01)"
    );

    let one = tools
        .get_known_count(GetKnownCountParams {
            category_id: "comets".into(),
            response_format: markdown(),
        })
        .await;
    assert_eq!(
        one,
        "# Known Comets\n\n**Count**: 4000\n**Last Updated**: 2024-01-01"
    );
    assert_eq!(mock.requests()[1].0, segments(&["knowncount", "comets"]));
}

#[tokio::test]
async fn test_remote_catalog_wire_format() {
    let mock = MockFetch::ok(json!({
        "items": [{"id": "a-1", "name": "Logo", "type": "image"}],
        "total": 10,
    }));
    let catalog = CatalogTools::new(Arc::new(RemoteCatalog::new(Arc::new(mock.clone()))));

    let text = catalog
        .list_items(ListItemsParams {
            limit: 1,
            offset: 4,
            item_type: Some("image".into()),
            response_format: None,
        })
        .await;

    assert_eq!(
        mock.requests(),
        vec![(
            segments(&["items"]),
            pairs(&[("limit", "1"), ("offset", "4"), ("filter[]", "type,eq,image")])
        )]
    );
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["total"], 10);
    assert_eq!(value["next_offset"], 5);
}

#[tokio::test]
async fn test_remote_catalog_not_found() {
    let mock = MockFetch::new(vec![Err(FetchError::Status {
        status: 404,
        body: String::new(),
    })]);
    let catalog = CatalogTools::new(Arc::new(RemoteCatalog::new(Arc::new(mock))));

    let text = catalog
        .get_item(GetItemParams {
            item_id: "missing".into(),
            response_format: None,
        })
        .await;
    assert_eq!(
        text,
        "Error: Item not found with ID 'missing'. Use catalog_list_items to see available items."
    );
}

#[tokio::test]
async fn test_ids_travel_as_single_path_segments() {
    let mock = MockFetch::new(vec![
        Ok(json!({"id": "x"})),
        Ok(json!({"id": "x"})),
        Ok(json!({"id": "x"})),
    ]);
    let tools = solar(&mock);
    let catalog = CatalogTools::new(Arc::new(RemoteCatalog::new(Arc::new(mock.clone()))));
    let hostile = "../knowncount?x=1#frag";

    tools
        .get_body(GetBodyParams {
            body_id: hostile.into(),
            response_format: None,
        })
        .await;
    tools
        .get_known_count(GetKnownCountParams {
            category_id: hostile.into(),
            response_format: None,
        })
        .await;
    catalog
        .get_item(GetItemParams {
            item_id: hostile.into(),
            response_format: None,
        })
        .await;

    let paths: Vec<Vec<String>> = mock.requests().into_iter().map(|(path, _)| path).collect();
    assert_eq!(
        paths,
        vec![
            segments(&["bodies", hostile]),
            segments(&["knowncount", hostile]),
            segments(&["items", hostile]),
        ]
    );
}

#[tokio::test]
async fn test_blank_ids_make_no_request() {
    let mock = MockFetch::new(Vec::new());
    let tools = solar(&mock);

    let body = tools
        .get_body(GetBodyParams {
            body_id: "  ".into(),
            response_format: None,
        })
        .await;
    assert_eq!(body, "Error: Body ID cannot be empty.");

    let count = tools
        .get_known_count(GetKnownCountParams {
            category_id: String::new(),
            response_format: markdown(),
        })
        .await;
    assert_eq!(count, "Error: Category ID cannot be empty.");

    let dots = tools
        .get_body(GetBodyParams {
            body_id: "..".into(),
            response_format: None,
        })
        .await;
    assert_eq!(dots, "Error: Invalid Body ID '..'.");

    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_empty_known_counts() {
    let mock = MockFetch::new(vec![Ok(json!({"knowncount": []})), Ok(json!([]))]);
    let tools = solar(&mock);

    let json_text = tools.list_known_counts(FormatParams::default()).await;
    assert_eq!(json_text, "No known object counts found.");

    let md = tools
        .list_known_counts(FormatParams {
            response_format: markdown(),
        })
        .await;
    assert_eq!(md, "No known object counts found.");
}
