//! The map widget seam.
//!
//! The controller drives whatever renders the map through [`MapWidget`].
//! [`RecordingMapWidget`] is a headless implementation that just keeps the
//! resulting state, for terminal front ends and tests.

use std::collections::BTreeMap;

use pothole_map_pothole_models::GeoPoint;

/// Handle to a marker placed on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(pub u64);

/// Operations the controller needs from a map widget.
pub trait MapWidget {
    /// Centers the map on `center` at `zoom`.
    fn set_view(&mut self, center: GeoPoint, zoom: u8);

    /// Moves the map center, keeping the zoom.
    fn pan_to(&mut self, center: GeoPoint);

    /// Changes the zoom level, keeping the center.
    fn set_zoom(&mut self, zoom: u8);

    /// Adds a marker and returns its handle.
    fn place_marker(&mut self, at: GeoPoint) -> MarkerId;

    /// Removes a marker. Unknown handles are ignored.
    fn remove_marker(&mut self, id: MarkerId);
}

/// Current center and zoom of a map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    /// Map center.
    pub center: GeoPoint,
    /// Zoom level.
    pub zoom: u8,
}

/// Headless [`MapWidget`] that records the view and markers.
#[derive(Debug, Clone)]
pub struct RecordingMapWidget {
    view: MapView,
    markers: BTreeMap<MarkerId, GeoPoint>,
    next_id: u64,
}

impl Default for RecordingMapWidget {
    fn default() -> Self {
        Self {
            view: MapView {
                center: GeoPoint::new(0.0, 0.0),
                zoom: 0,
            },
            markers: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl RecordingMapWidget {
    /// Current view.
    #[must_use]
    pub const fn view(&self) -> MapView {
        self.view
    }

    /// Markers currently on the map, keyed by handle.
    #[must_use]
    pub const fn markers(&self) -> &BTreeMap<MarkerId, GeoPoint> {
        &self.markers
    }
}

impl MapWidget for RecordingMapWidget {
    fn set_view(&mut self, center: GeoPoint, zoom: u8) {
        self.view = MapView { center, zoom };
    }

    fn pan_to(&mut self, center: GeoPoint) {
        self.view.center = center;
    }

    fn set_zoom(&mut self, zoom: u8) {
        self.view.zoom = zoom;
    }

    fn place_marker(&mut self, at: GeoPoint) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.insert(id, at);
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.remove(&id);
    }
}
