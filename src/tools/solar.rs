//! Astronomy tools backed by the Solar System OpenData API.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::info;

use crate::client::{Fetch, FetchError};
use crate::error::ErrorCatalog;
use crate::format::{to_json, ResponseFormat};
use crate::normalize::{
    clamp_limit, clamp_page, non_blank, resource_id, search_query, title_case, Observer,
};
use crate::query::{Filter, FilterOp, Pagination, Query, Sort};
use crate::record::{display, Record};
use crate::render::solar::{body_block, defined_or, known_count_line, position_block};
use crate::render::{Document, Envelope};
use crate::tools::params::{
    CalculatePositionsParams, FilterBodiesParams, FormatParams, GetBodyParams,
    GetKnownCountParams, GetMoonsParams, ListBodiesParams, SearchBodiesParams,
};

/// Moons are fetched in a single page of this size.
const MOON_PAGE_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct SolarTools {
    fetch: Arc<dyn Fetch>,
}

impl SolarTools {
    pub fn new(fetch: Arc<dyn Fetch>) -> Self {
        Self { fetch }
    }

    async fn request(&self, tool: &str, path: &[&str], query: &Query) -> Result<Value, String> {
        self.fetch
            .get(path, query)
            .await
            .map_err(|e: FetchError| ErrorCatalog::SOLAR.report(tool, &e))
    }

    /// `GET bodies` and unwrap the `bodies` array.
    async fn bodies(&self, tool: &str, query: &Query) -> Result<Vec<Value>, String> {
        let result = self.request(tool, &["bodies"], query).await?;
        Ok(result
            .get("bodies")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    pub async fn list_bodies(&self, params: ListBodiesParams) -> String {
        let limit = clamp_limit(params.limit);
        let page = clamp_page(params.page);
        let format = ResponseFormat::from(params.response_format);
        let order_by = non_blank(Some(&params.order_by)).unwrap_or("id");
        let sort = if params.order_desc {
            Sort::desc(order_by)
        } else {
            Sort::asc(order_by)
        };
        info!(tool = "solar_list_bodies", limit, page, "tool call");

        let query = Query::new()
            .sort(sort)
            .paginate(Pagination::Page { page, limit })
            .filter_opt(
                non_blank(params.body_type.as_deref())
                    .map(|t| Filter::new("bodyType", FilterOp::Eq, t)),
            )
            .filter_opt(
                params
                    .is_planet
                    .map(|p| Filter::new("isPlanet", FilterOp::Eq, p)),
            );

        let bodies = match self.bodies("solar_list_bodies", &query).await {
            Ok(bodies) => bodies,
            Err(msg) => return msg,
        };
        let Some(envelope) = Envelope::new("bodies", bodies) else {
            return "No celestial bodies found matching the criteria.".to_string();
        };

        if !format.is_markdown() {
            return to_json(&envelope.lead("page", page));
        }

        // A full page is the only hint the API gives about further pages.
        let full = envelope.count() == limit as usize;
        Document::titled("Solar System Bodies")
            .paragraph(format!("Page {}, showing {} bodies", page, envelope.count()))
            .blocks(envelope.items().map(body_block))
            .footer(full.then(|| {
                format!(
                    "More bodies may be available. Use page={} for next page.",
                    page + 1
                )
            }))
            .finish()
    }

    pub async fn get_body(&self, params: GetBodyParams) -> String {
        let body_id = match resource_id(&params.body_id, "Body ID") {
            Ok(id) => id,
            Err(msg) => return msg,
        };
        let format = ResponseFormat::from(params.response_format);
        info!(tool = "solar_get_body", body_id, "tool call");

        match self
            .request("solar_get_body", &["bodies", body_id], &Query::new())
            .await
        {
            Ok(body) if format.is_markdown() => body_block(&body),
            Ok(body) => to_json(&body),
            Err(msg) => msg,
        }
    }

    pub async fn search_bodies(&self, params: SearchBodiesParams) -> String {
        let needle = match search_query(&params.query) {
            Ok(q) => q,
            Err(msg) => return msg,
        };
        let limit = clamp_limit(params.limit);
        let format = ResponseFormat::from(params.response_format);
        info!(tool = "solar_search_bodies", query = needle, limit, "tool call");

        let query = Query::new()
            .filter(Filter::new("englishName", FilterOp::Cs, needle))
            .sort(Sort::asc("id"))
            .paginate(Pagination::Page { page: 1, limit });

        let bodies = match self.bodies("solar_search_bodies", &query).await {
            Ok(bodies) => bodies,
            Err(msg) => return msg,
        };
        let Some(envelope) = Envelope::new("bodies", bodies) else {
            return format!("No celestial bodies found matching '{}'.", params.query);
        };

        if !format.is_markdown() {
            return to_json(&envelope.lead("query", params.query));
        }

        Document::titled(format!("Search Results: '{}'", params.query))
            .paragraph(format!("Found {} body(ies)", envelope.count()))
            .blocks(envelope.items().map(body_block))
            .finish()
    }

    /// Range filters go to the API; `has_moons` is applied to the returned page.
    pub async fn filter_bodies(&self, params: FilterBodiesParams) -> String {
        let limit = clamp_limit(params.limit);
        let format = ResponseFormat::from(params.response_format);
        info!(tool = "solar_filter_bodies", limit, has_moons = ?params.has_moons, "tool call");

        let ranges = [
            ("meanRadius", FilterOp::Ge, params.min_radius),
            ("meanRadius", FilterOp::Le, params.max_radius),
            ("gravity", FilterOp::Ge, params.min_gravity),
            ("gravity", FilterOp::Le, params.max_gravity),
            ("density", FilterOp::Ge, params.min_density),
            ("density", FilterOp::Le, params.max_density),
        ];
        let query = ranges.into_iter().fold(
            Query::new()
                .sort(Sort::desc("meanRadius"))
                .paginate(Pagination::Page { page: 1, limit }),
            |query, (field, op, bound)| query.filter_opt(bound.map(|b| Filter::new(field, op, b))),
        );

        let mut bodies = match self.bodies("solar_filter_bodies", &query).await {
            Ok(bodies) => bodies,
            Err(msg) => return msg,
        };
        if let Some(want) = params.has_moons {
            bodies.retain(|body| Record::new(body).has("moons") == want);
        }

        let Some(envelope) = Envelope::new("bodies", bodies) else {
            return "No celestial bodies found matching the criteria.".to_string();
        };

        if !format.is_markdown() {
            return to_json(&envelope);
        }

        Document::titled("Filtered Bodies")
            .paragraph(format!("Found {} body(ies) matching criteria", envelope.count()))
            .blocks(envelope.items().map(body_block))
            .finish()
    }

    pub async fn get_moons(&self, params: GetMoonsParams) -> String {
        let format = ResponseFormat::from(params.response_format);
        let planet = params.planet_id;
        info!(tool = "solar_get_moons", planet = %planet, "tool call");

        let query = Query::new()
            .filter(Filter::new("aroundPlanet", FilterOp::Eq, &planet))
            .sort(Sort::desc("meanRadius"))
            .paginate(Pagination::Page {
                page: 1,
                limit: MOON_PAGE_LIMIT,
            });

        let moons = match self.bodies("solar_get_moons", &query).await {
            Ok(moons) => moons,
            Err(msg) => return msg,
        };
        let Some(envelope) = Envelope::new("moons", moons) else {
            return format!("No moons found orbiting '{}'.", planet);
        };

        if !format.is_markdown() {
            return to_json(&envelope.lead("planet", planet));
        }

        Document::titled(format!("Moons of {}", title_case(&planet)))
            .paragraph(format!("Found {} moon(s)", envelope.count()))
            .blocks(envelope.items().map(body_block))
            .finish()
    }

    pub async fn list_known_counts(&self, params: FormatParams) -> String {
        let format = ResponseFormat::from(params.response_format);
        info!(tool = "solar_list_known_counts", "tool call");

        let result = match self
            .request("solar_list_known_counts", &["knowncount"], &Query::new())
            .await
        {
            Ok(result) => result,
            Err(msg) => return msg,
        };
        let counts = result.get("knowncount").unwrap_or(&result);
        if counts.as_array().is_some_and(Vec::is_empty) {
            return "No known object counts found.".to_string();
        }

        if !format.is_markdown() {
            return to_json(counts);
        }

        let doc = Document::titled("Known Object Counts");
        let doc = match counts.as_array() {
            Some(entries) => entries
                .iter()
                .fold(doc, |doc, entry| doc.line(known_count_line(entry))),
            None => doc.line(format!("Total known objects: {}", display(counts))),
        };
        doc.finish()
    }

    pub async fn get_known_count(&self, params: GetKnownCountParams) -> String {
        let category = match resource_id(&params.category_id, "Category ID") {
            Ok(id) => id,
            Err(msg) => return msg,
        };
        let format = ResponseFormat::from(params.response_format);
        info!(tool = "solar_get_known_count", category, "tool call");

        let result = match self
            .request("solar_get_known_count", &["knowncount", category], &Query::new())
            .await
        {
            Ok(result) => result,
            Err(msg) => return msg,
        };

        if !format.is_markdown() {
            return to_json(&result);
        }

        let entry = Record::new(&result);
        Document::titled(format!("Known {}", title_case(category)))
            .line(format!("**Count**: {}", defined_or(&entry, "knownCount", "N/A")))
            .line(format!(
                "**Last Updated**: {}",
                defined_or(&entry, "updateDate", "N/A")
            ))
            .finish()
    }

    /// Positions of solar system objects as seen by an observer.
    ///
    /// Coordinates are validated before any request; an empty `datetime_utc`
    /// means now.
    pub async fn calculate_positions(&self, params: CalculatePositionsParams) -> String {
        let observer = Observer {
            latitude: params.latitude,
            longitude: params.longitude,
            elevation: params.elevation,
            timezone_offset: params.timezone_offset,
        };
        let observer = match observer.validate() {
            Ok(observer) => observer,
            Err(msg) => return msg,
        };
        let format = ResponseFormat::from(params.response_format);
        let datetime = match non_blank(Some(&params.datetime_utc)) {
            Some(dt) => dt.to_string(),
            None => Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
        };
        info!(tool = "solar_calculate_positions", %datetime, "tool call");

        let query = Query::new()
            .param("lat", observer.latitude)
            .param("lon", observer.longitude)
            .param("elev", observer.elevation)
            .param("datetime", &datetime)
            .param("zone", observer.timezone_offset);

        let result = match self
            .request("solar_calculate_positions", &["positions"], &query)
            .await
        {
            Ok(result) => result,
            Err(msg) => return msg,
        };

        if !format.is_markdown() {
            return to_json(&result);
        }

        let response = Record::new(&result);
        let location = Record::new(response.raw("location").unwrap_or(&Value::Null));
        let time_info = Record::new(response.raw("time_info").unwrap_or(&Value::Null));
        let positions = response.list("positions").map(Vec::as_slice).unwrap_or(&[]);

        Document::titled("Celestial Positions")
            .section("Observer Location")
            .line(format!(
                "- Latitude: {}°",
                defined_or(&location, "lat", &observer.latitude.to_string())
            ))
            .line(format!(
                "- Longitude: {}°",
                defined_or(&location, "lon", &observer.longitude.to_string())
            ))
            .paragraph(format!(
                "- Elevation: {} m",
                defined_or(&location, "elev", &observer.elevation.to_string())
            ))
            .section("Time Information")
            .line(format!("- UTC: {}", defined_or(&time_info, "utc", &datetime)))
            .line(format!("- Local: {}", defined_or(&time_info, "local", "N/A")))
            .paragraph(format!("- Julian Day: {}", defined_or(&time_info, "jd", "N/A")))
            .section("Object Positions")
            .line(String::new())
            .blocks(positions.iter().map(position_block))
            .finish()
    }

    pub async fn get_planets(&self, params: FormatParams) -> String {
        self.ordered_by_distance(
            "solar_get_planets",
            Filter::new("isPlanet", FilterOp::Eq, true),
            ("planets", "Planets of the Solar System", "planets"),
            params,
        )
        .await
    }

    pub async fn get_dwarf_planets(&self, params: FormatParams) -> String {
        self.ordered_by_distance(
            "solar_get_dwarf_planets",
            Filter::new("bodyType", FilterOp::Eq, "Dwarf Planet"),
            ("dwarf_planets", "Dwarf Planets of the Solar System", "dwarf planets"),
            params,
        )
        .await
    }

    /// Every body matching `filter`, nearest to the Sun first.
    async fn ordered_by_distance(
        &self,
        tool: &str,
        filter: Filter,
        (key, title, noun): (&'static str, &str, &str),
        params: FormatParams,
    ) -> String {
        let format = ResponseFormat::from(params.response_format);
        info!(tool, "tool call");

        let query = Query::new()
            .filter(filter)
            .sort(Sort::asc("semimajorAxis"));

        let bodies = match self.bodies(tool, &query).await {
            Ok(bodies) => bodies,
            Err(msg) => return msg,
        };
        let Some(envelope) = Envelope::new(key, bodies) else {
            return format!("No {} found.", noun);
        };

        if !format.is_markdown() {
            return to_json(&envelope);
        }

        Document::titled(title)
            .paragraph(format!("Total: {} {}", envelope.count(), noun))
            .blocks(envelope.items().map(body_block))
            .finish()
    }
}
