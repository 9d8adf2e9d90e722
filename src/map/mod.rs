//! Map view: one live session at a time, rebuilt wholesale per search.
//!
//! There is deliberately no pan operation — every new coordinate tears the
//! old session down and constructs a fresh one, so markers can never leak
//! across searches. Late results for a torn-down session are rejected via
//! the session id.

pub mod ascii;

use crate::geo::Coordinate;
use crate::poi::PointOfInterest;
use std::fmt;

/// Matches the original widget's display zoom.
pub const DEFAULT_ZOOM: u8 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Origin,
    PointOfInterest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    pub kind: MarkerKind,
    /// Title for POI markers; None for the origin.
    pub label: Option<String>,
}

/// Identity of one map session. Monotonic per `MapView`; a stale id means
/// the session was superseded by a newer search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionId(u64);

/// The live bound state of one map display: its center and the markers it
/// owns. Discarded wholesale when the next session is initialized.
#[derive(Debug)]
pub struct MapSession {
    id: SessionId,
    center: Coordinate,
    markers: Vec<Marker>,
}

impl MapSession {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The targeted session is no longer current; the write was discarded.
    Superseded,
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Superseded => write!(f, "map session superseded"),
        }
    }
}

impl std::error::Error for MapError {}

/// The narrow contract the external mapping SDK is consumed through.
pub trait MapBackend {
    fn clear_container(&mut self);
    fn construct_map(&mut self, center: Coordinate, zoom: u8);
    fn add_marker(&mut self, position: Coordinate, kind: MarkerKind);
}

/// Owns a single map display instance bound to one coordinate at a time.
pub struct MapView<B: MapBackend> {
    backend: B,
    session: Option<MapSession>,
    next_id: u64,
    zoom: u8,
}

impl<B: MapBackend> MapView<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            session: None,
            next_id: 0,
            zoom: DEFAULT_ZOOM,
        }
    }

    /// Destroy any prior session's visual content and construct a new
    /// display bound to `center`. The only way the displayed center changes.
    pub fn initialize(&mut self, center: Coordinate) -> SessionId {
        self.backend.clear_container();
        self.backend.construct_map(center, self.zoom);
        self.next_id += 1;
        let id = SessionId(self.next_id);
        self.session = Some(MapSession {
            id,
            center,
            markers: Vec::new(),
        });
        id
    }

    pub fn session(&self) -> Option<&MapSession> {
        self.session.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_current(&self, id: SessionId) -> bool {
        matches!(&self.session, Some(s) if s.id == id)
    }

    /// Add the single marker denoting the resolved origin.
    pub fn place_origin_marker(
        &mut self,
        id: SessionId,
        position: Coordinate,
    ) -> Result<(), MapError> {
        let session = match self.session.as_mut() {
            Some(s) if s.id == id => s,
            _ => return Err(MapError::Superseded),
        };
        session.markers.push(Marker {
            position,
            kind: MarkerKind::Origin,
            label: None,
        });
        self.backend.add_marker(position, MarkerKind::Origin);
        Ok(())
    }

    /// Add one marker per point with a structurally valid position; the
    /// rest are skipped with a diagnostic. Returns the number placed, or
    /// `Superseded` if the session has been replaced — late results for a
    /// stale session must be discarded, never rendered.
    pub fn place_points_of_interest(
        &mut self,
        id: SessionId,
        points: &[PointOfInterest],
    ) -> Result<usize, MapError> {
        let session = match self.session.as_mut() {
            Some(s) if s.id == id => s,
            _ => return Err(MapError::Superseded),
        };
        let mut placed = 0;
        for point in points {
            match point.position {
                Some(position) => {
                    session.markers.push(Marker {
                        position,
                        kind: MarkerKind::PointOfInterest,
                        label: Some(point.title.clone()),
                    });
                    self.backend.add_marker(position, MarkerKind::PointOfInterest);
                    placed += 1;
                }
                None => {
                    log::warn!("No valid position for '{}'; listed only", point.title);
                }
            }
        }
        Ok(placed)
    }
}
