//! Search controller — orchestrates the resolve → map → fetch → render
//! pipeline.
//!
//! One search attempt walks Idle → Resolving → Rendering → Idle. Resolution
//! failures abort the attempt and leave whatever the previous search put on
//! screen untouched; POI-fetch failures degrade instead: the fresh map and
//! origin marker stand, only the list is cleared.

use crate::location::{LocationError, ResolveLocation, ResolvedOrigin};
use crate::map::{MapBackend, MapError, MapView, SessionId};
use crate::poi::{PointOfInterest, SearchPoints};
use serde::Serialize;

/// What started the search: startup auto-resolution, a typed query, or a
/// manually supplied coordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchTrigger {
    Device,
    Query(String),
    Manual(ResolvedOrigin),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Resolving,
    Rendering,
}

/// Outcome of rendering one completed POI fetch.
#[derive(Debug, PartialEq)]
pub enum RenderOutcome {
    Rendered { placed: usize },
    /// The fetch outlived its session; nothing was rendered.
    Superseded,
}

/// The result of one completed search attempt.
#[derive(Debug, Serialize)]
pub struct SearchReport {
    pub origin: ResolvedOrigin,
    pub points: Vec<PointOfInterest>,
    pub markers_placed: usize,
    /// Present when the POI fetch failed and the attempt degraded to
    /// origin-only display. Never set for an empty (but successful) result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poi_error: Option<String>,
}

pub struct SearchController<L, P, B: MapBackend> {
    location: L,
    poi: P,
    map: MapView<B>,
    list: Vec<String>,
    phase: Phase,
}

impl<L, P, B> SearchController<L, P, B>
where
    L: ResolveLocation,
    P: SearchPoints,
    B: MapBackend,
{
    pub fn new(location: L, poi: P, map: MapView<B>) -> Self {
        Self {
            location,
            poi,
            map,
            list: Vec::new(),
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The textual result list, one entry per returned point.
    pub fn list(&self) -> &[String] {
        &self.list
    }

    pub fn map(&self) -> &MapView<B> {
        &self.map
    }

    /// Run one full search attempt.
    pub async fn run(&mut self, trigger: SearchTrigger) -> Result<SearchReport, LocationError> {
        self.phase = Phase::Resolving;
        let resolved = match &trigger {
            SearchTrigger::Device => self.location.resolve_from_device().await,
            SearchTrigger::Query(text) => {
                if text.trim().is_empty() {
                    // Pre-flight validation; the provider is never invoked.
                    self.phase = Phase::Idle;
                    return Err(LocationError::EmptyQuery);
                }
                self.location.resolve_from_query(text).await
            }
            SearchTrigger::Manual(origin) => Ok(origin.clone()),
        };

        let origin = match resolved {
            Ok(origin) => origin,
            Err(e) => {
                self.phase = Phase::Idle;
                return Err(e);
            }
        };

        self.phase = Phase::Rendering;
        let session = self.begin_session(&origin);

        let report = match self.poi.search(origin.coordinate).await {
            Ok(points) => match self.render_results(session, &points) {
                RenderOutcome::Rendered { placed } => SearchReport {
                    origin,
                    points,
                    markers_placed: placed,
                    poi_error: None,
                },
                RenderOutcome::Superseded => SearchReport {
                    origin,
                    points: Vec::new(),
                    markers_placed: 0,
                    poi_error: None,
                },
            },
            Err(e) => {
                log::warn!("Hospital search failed, showing origin only: {}", e);
                if self.map.is_current(session) {
                    self.list.clear();
                }
                SearchReport {
                    origin,
                    points: Vec::new(),
                    markers_placed: 0,
                    poi_error: Some(e.to_string()),
                }
            }
        };

        self.phase = Phase::Idle;
        Ok(report)
    }

    /// Rebuild the map around a resolved origin and place its marker. Must
    /// complete before the POI fetch for this search is issued.
    pub fn begin_session(&mut self, origin: &ResolvedOrigin) -> SessionId {
        let session = self.map.initialize(origin.coordinate);
        // The session was just created; placement cannot be stale.
        let _ = self.map.place_origin_marker(session, origin.coordinate);
        session
    }

    /// Render fetched points into the session the fetch was issued for. If
    /// a newer search has superseded that session, the results are
    /// discarded rather than rendered into the wrong map.
    pub fn render_results(
        &mut self,
        session: SessionId,
        points: &[PointOfInterest],
    ) -> RenderOutcome {
        match self.map.place_points_of_interest(session, points) {
            Ok(placed) => {
                self.list.clear();
                self.list.extend(points.iter().map(|p| p.title.clone()));
                RenderOutcome::Rendered { placed }
            }
            Err(MapError::Superseded) => {
                log::info!(
                    "Discarding {} late result(s) for a superseded map session",
                    points.len()
                );
                RenderOutcome::Superseded
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use crate::location::LocationSource;
    use crate::map::testing::RecordingBackend;
    use crate::map::MarkerKind;
    use crate::poi::PoiError;
    use std::cell::Cell;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn origin_at(lat: f64, lon: f64, label: &str) -> ResolvedOrigin {
        ResolvedOrigin {
            coordinate: coord(lat, lon),
            label: label.into(),
            source: LocationSource::Geocoded,
        }
    }

    struct FakeLocation {
        device: Result<ResolvedOrigin, LocationError>,
        query: Result<ResolvedOrigin, LocationError>,
        calls: Cell<u32>,
    }

    impl FakeLocation {
        fn queries(origin: Result<ResolvedOrigin, LocationError>) -> Self {
            Self {
                device: Err(LocationError::Unsupported),
                query: origin,
                calls: Cell::new(0),
            }
        }
    }

    impl ResolveLocation for FakeLocation {
        async fn resolve_from_device(&self) -> Result<ResolvedOrigin, LocationError> {
            self.calls.set(self.calls.get() + 1);
            self.device.clone()
        }

        async fn resolve_from_query(&self, _text: &str) -> Result<ResolvedOrigin, LocationError> {
            self.calls.set(self.calls.get() + 1);
            self.query.clone()
        }
    }

    struct FakePoi {
        result: Result<Vec<PointOfInterest>, PoiError>,
    }

    impl SearchPoints for FakePoi {
        async fn search(&self, _center: Coordinate) -> Result<Vec<PointOfInterest>, PoiError> {
            self.result.clone()
        }
    }

    fn controller(
        location: FakeLocation,
        poi: FakePoi,
    ) -> SearchController<FakeLocation, FakePoi, RecordingBackend> {
        SearchController::new(location, poi, MapView::new(RecordingBackend::default()))
    }

    fn example_points() -> Vec<PointOfInterest> {
        vec![
            PointOfInterest {
                title: "City Hospital".into(),
                position: Some(coord(37.78, -122.41)),
            },
            PointOfInterest {
                title: "No-Position Clinic".into(),
                position: None,
            },
        ]
    }

    #[tokio::test]
    async fn test_end_to_end_success() {
        let location = FakeLocation::queries(Ok(origin_at(37.7749, -122.4194, "San Francisco")));
        let poi = FakePoi {
            result: Ok(example_points()),
        };
        let mut ctl = controller(location, poi);

        let report = ctl.run(SearchTrigger::Query("san francisco".into())).await.unwrap();

        assert_eq!(report.markers_placed, 1);
        assert_eq!(report.poi_error, None);
        assert_eq!(ctl.list(), &["City Hospital", "No-Position Clinic"][..]);
        assert_eq!(ctl.phase(), Phase::Idle);

        let markers = ctl.map().session().unwrap().markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].kind, MarkerKind::Origin);
        assert_eq!(markers[1].kind, MarkerKind::PointOfInterest);
        assert_eq!(markers[1].position, coord(37.78, -122.41));
    }

    #[tokio::test]
    async fn test_empty_query_rejected_without_resolution() {
        let location = FakeLocation::queries(Ok(origin_at(1.0, 1.0, "x")));
        let poi = FakePoi { result: Ok(vec![]) };
        let mut ctl = controller(location, poi);

        let err = ctl.run(SearchTrigger::Query("   ".into())).await.unwrap_err();

        assert_eq!(err, LocationError::EmptyQuery);
        assert_eq!(ctl.location.calls.get(), 0);
        assert!(ctl.map().session().is_none());
        assert_eq!(ctl.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_resolution_failure_leaves_previous_search_visible() {
        let location = FakeLocation {
            device: Ok(origin_at(37.7749, -122.4194, "here")),
            query: Err(LocationError::NoMatch("atlantis".into())),
            calls: Cell::new(0),
        };
        let poi = FakePoi {
            result: Ok(example_points()),
        };
        let mut ctl = controller(location, poi);

        ctl.run(SearchTrigger::Device).await.unwrap();
        let session_before = ctl.map().session().unwrap().id();

        let err = ctl.run(SearchTrigger::Query("atlantis".into())).await.unwrap_err();

        assert_eq!(err, LocationError::NoMatch("atlantis".into()));
        assert_eq!(ctl.map().session().unwrap().id(), session_before);
        assert_eq!(ctl.map().session().unwrap().markers().len(), 2);
        assert_eq!(ctl.list(), &["City Hospital", "No-Position Clinic"][..]);
    }

    #[tokio::test]
    async fn test_poi_failure_degrades_to_origin_only() {
        let location = FakeLocation::queries(Ok(origin_at(37.7749, -122.4194, "sf")));
        let poi = FakePoi {
            result: Err(PoiError::Network("connection refused".into())),
        };
        let mut ctl = controller(location, poi);

        let report = ctl.run(SearchTrigger::Query("sf".into())).await.unwrap();

        assert!(report.poi_error.is_some());
        assert_eq!(report.markers_placed, 0);
        assert!(ctl.list().is_empty());
        // The map and its origin marker still stand.
        let markers = ctl.map().session().unwrap().markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].kind, MarkerKind::Origin);
    }

    #[tokio::test]
    async fn test_empty_result_is_not_an_error() {
        let location = FakeLocation::queries(Ok(origin_at(37.7749, -122.4194, "sf")));
        let poi = FakePoi { result: Ok(vec![]) };
        let mut ctl = controller(location, poi);

        let report = ctl.run(SearchTrigger::Query("sf".into())).await.unwrap();

        assert_eq!(report.poi_error, None);
        assert_eq!(report.markers_placed, 0);
        assert!(ctl.list().is_empty());
        assert_eq!(ctl.map().session().unwrap().markers().len(), 1);
    }

    #[tokio::test]
    async fn test_manual_trigger_skips_providers() {
        let location = FakeLocation::queries(Err(LocationError::Provider("offline".into())));
        let poi = FakePoi { result: Ok(vec![]) };
        let mut ctl = controller(location, poi);

        let origin = ResolvedOrigin::manual(coord(21.4225, 39.8262));
        let report = ctl.run(SearchTrigger::Manual(origin)).await.unwrap();

        assert_eq!(ctl.location.calls.get(), 0);
        assert_eq!(report.origin.source, LocationSource::Manual);
    }

    /// Search A's late POI response must not be rendered into search B's
    /// session.
    #[tokio::test]
    async fn test_late_results_for_superseded_session_are_discarded() {
        let location = FakeLocation::queries(Ok(origin_at(1.0, 1.0, "unused")));
        let poi = FakePoi { result: Ok(vec![]) };
        let mut ctl = controller(location, poi);

        let session_a = ctl.begin_session(&origin_at(37.7749, -122.4194, "A"));
        let session_b = ctl.begin_session(&origin_at(48.8566, 2.3522, "B"));

        let outcome = ctl.render_results(session_a, &example_points());

        assert_eq!(outcome, RenderOutcome::Superseded);
        assert!(ctl.list().is_empty());
        let session = ctl.map().session().unwrap();
        assert_eq!(session.id(), session_b);
        assert_eq!(session.center(), coord(48.8566, 2.3522));
        // Only B's origin marker; nothing of A leaked in.
        assert_eq!(session.markers().len(), 1);
        assert_eq!(session.markers()[0].kind, MarkerKind::Origin);
    }
}
