use crate::error::{Result, SessionError};
use crate::geometry::{CanvasSize, ComputeRoomGeometry, RoomGeometry, SketchParams};
use crate::render::{DrawingSurface, RoomRenderer};
use crate::room::{Room, WallId};

/// Holds the room being sketched, its derived geometry and the wall selection.
///
/// Every change that affects geometry recomputes it before swapping it in, so
/// the renderer never sees a room without matching geometry.
#[derive(Debug, Default)]
pub struct Sketcher {
    params: SketchParams,
    renderer: RoomRenderer,
    loaded: Option<Loaded>,
}

#[derive(Debug)]
struct Loaded {
    room: Room,
    geometry: RoomGeometry,
    selected: Option<usize>,
}

impl Sketcher {
    #[must_use]
    pub fn new(params: SketchParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: RoomRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    #[must_use]
    pub fn params(&self) -> &SketchParams {
        &self.params
    }

    #[must_use]
    pub fn room(&self) -> Option<&Room> {
        self.loaded.as_ref().map(|l| &l.room)
    }

    #[must_use]
    pub fn geometry(&self) -> Option<&RoomGeometry> {
        self.loaded.as_ref().map(|l| &l.geometry)
    }

    /// Loads `room`, computes its geometry and selects its first wall.
    ///
    /// # Errors
    ///
    /// Returns the geometry error if the room cannot be computed; the
    /// previously loaded room stays in place.
    pub fn load_room(&mut self, room: Room) -> Result<()> {
        let geometry = ComputeRoomGeometry::new(self.params).execute(&room)?;
        let selected = (!geometry.walls().is_empty()).then_some(0);
        tracing::info!(
            walls = geometry.walls().len(),
            width = geometry.dimensions().width,
            height = geometry.dimensions().height,
            "room loaded"
        );
        self.loaded = Some(Loaded {
            room,
            geometry,
            selected,
        });
        Ok(())
    }

    /// Drops the room, its geometry and the selection.
    pub fn clear_room(&mut self) {
        self.loaded = None;
    }

    /// Changes the canvas size and recomputes the geometry.
    ///
    /// # Errors
    ///
    /// Propagates geometry errors; the previous state is kept on failure.
    pub fn set_canvas_size(&mut self, canvas: CanvasSize) -> Result<()> {
        self.update_params(SketchParams {
            canvas,
            ..self.params
        })
    }

    /// Changes the scale and recomputes the geometry.
    ///
    /// # Errors
    ///
    /// Propagates geometry errors; the previous state is kept on failure.
    pub fn set_scale(&mut self, scale: f64) -> Result<()> {
        self.update_params(SketchParams {
            scale,
            ..self.params
        })
    }

    fn update_params(&mut self, params: SketchParams) -> Result<()> {
        if let Some(loaded) = &mut self.loaded {
            loaded.geometry = ComputeRoomGeometry::new(params).execute(&loaded.room)?;
        }
        self.params = params;
        Ok(())
    }

    /// Id of the selected wall, if any.
    #[must_use]
    pub fn selected_wall(&self) -> Option<&WallId> {
        let loaded = self.loaded.as_ref()?;
        loaded
            .selected
            .and_then(|i| loaded.geometry.walls().get(i))
            .map(|w| &w.id)
    }

    /// Selects the wall with the given id.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoRoom` without a room, or
    /// `SessionError::UnknownWall` if the room has no such wall.
    pub fn select_wall(&mut self, id: &WallId) -> Result<()> {
        let loaded = self.loaded.as_mut().ok_or(SessionError::NoRoom)?;
        let index = loaded
            .geometry
            .wall_index(id)
            .ok_or_else(|| SessionError::UnknownWall(id.clone()))?;
        loaded.selected = Some(index);
        Ok(())
    }

    /// Advances the selection to the next wall, wrapping around.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoRoom` without a room, or
    /// `SessionError::NoWalls` if the room has no walls.
    pub fn select_next_wall(&mut self) -> Result<&WallId> {
        let loaded = self.loaded.as_mut().ok_or(SessionError::NoRoom)?;
        let count = loaded.geometry.walls().len();
        if count == 0 {
            return Err(SessionError::NoWalls.into());
        }
        let next = loaded.selected.map_or(0, |i| (i + 1) % count);
        loaded.selected = Some(next);
        Ok(&loaded.geometry.walls()[next].id)
    }

    /// Renders the current room onto `surface`, highlighting the selection.
    pub fn render<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        self.renderer
            .render(surface, self.geometry(), self.selected_wall());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{GeometryError, SketchError};
    use crate::math::{Point2, Vector2};
    use crate::render::RecordingSurface;
    use crate::room::WallData;
    use approx::assert_relative_eq;

    fn square() -> Room {
        Room::closed_loop(&[
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ])
    }

    #[test]
    fn load_selects_first_wall() {
        let mut s = Sketcher::default();
        s.load_room(square()).unwrap();
        assert_eq!(s.selected_wall(), Some(&WallId::from("w0")));
        assert_relative_eq!(s.geometry().unwrap().scale(), 0.5);
    }

    #[test]
    fn next_wall_wraps_around() {
        let mut s = Sketcher::default();
        s.load_room(square()).unwrap();
        let visited: Vec<String> = (0..5)
            .map(|_| s.select_next_wall().unwrap().to_string())
            .collect();
        assert_eq!(visited, ["w1", "w2", "w3", "w0", "w1"]);
    }

    #[test]
    fn selection_errors() {
        let mut s = Sketcher::default();
        assert_eq!(
            s.select_next_wall().unwrap_err().to_string(),
            SessionError::NoRoom.to_string()
        );

        let mut corner_only = Room::new();
        corner_only.add_corner(crate::room::CornerData::new(Point2::new(1.0, 1.0)));
        s.load_room(corner_only).unwrap();
        assert!(s.selected_wall().is_none());
        assert!(matches!(
            s.select_next_wall().unwrap_err(),
            SketchError::Session(SessionError::NoWalls)
        ));

        s.load_room(square()).unwrap();
        assert!(matches!(
            s.select_wall(&WallId::from("nope")).unwrap_err(),
            SketchError::Session(SessionError::UnknownWall(_))
        ));
        s.select_wall(&WallId::from("w2")).unwrap();
        assert_eq!(s.selected_wall(), Some(&WallId::from("w2")));
    }

    #[test]
    fn failed_load_keeps_previous_room() {
        let mut s = Sketcher::default();
        s.load_room(square()).unwrap();
        s.select_wall(&WallId::from("w3")).unwrap();

        let mut broken = square();
        broken.add_wall(WallData::new("ghost"));
        let err = s.load_room(broken).unwrap_err();
        assert!(matches!(
            err,
            SketchError::Geometry(GeometryError::DanglingWallReference { .. })
        ));
        assert_eq!(s.room().unwrap().walls().len(), 4);
        assert_eq!(s.selected_wall(), Some(&WallId::from("w3")));
    }

    #[test]
    fn parameter_changes_recompute_geometry() {
        let mut s = Sketcher::new(SketchParams {
            scale: 1.0,
            ..SketchParams::default()
        });
        s.load_room(square()).unwrap();
        assert_relative_eq!(s.geometry().unwrap().sketch_offset(), Vector2::new(395.0, 295.0));

        s.set_canvas_size(CanvasSize::new(200.0, 100.0)).unwrap();
        assert_relative_eq!(s.geometry().unwrap().sketch_offset(), Vector2::new(95.0, 45.0));

        s.set_scale(-3.0).unwrap();
        assert_relative_eq!(s.geometry().unwrap().scale(), 1.0);
        s.set_scale(2.0).unwrap();
        assert_relative_eq!(s.geometry().unwrap().sketch_offset(), Vector2::new(90.0, 40.0));
    }

    #[test]
    fn clear_room_drops_everything() {
        let mut s = Sketcher::default();
        s.load_room(square()).unwrap();
        s.clear_room();
        assert!(s.room().is_none() && s.geometry().is_none() && s.selected_wall().is_none());

        let mut surface = RecordingSurface::new(800.0, 600.0);
        s.render(&mut surface);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn first_advance_without_selection_starts_at_first_wall() {
        let mut s = Sketcher::default();
        s.load_room(square()).unwrap();
        s.loaded.as_mut().unwrap().selected = None;
        assert_eq!(s.select_next_wall().unwrap(), &WallId::from("w0"));
    }

    #[test]
    fn custom_renderer_is_used() {
        let style = crate::render::SketchStyle {
            selected_color: crate::render::Color::rgb(1, 2, 3),
            ..crate::render::SketchStyle::default()
        };
        let mut s = Sketcher::default().with_renderer(RoomRenderer::with_style(style));
        s.load_room(square()).unwrap();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        s.render(&mut surface);
        assert!(surface.commands().contains(&crate::render::DrawCommand::StrokeColor(
            crate::render::Color::rgb(1, 2, 3)
        )));
    }

    #[test]
    fn render_highlights_selection() {
        let mut s = Sketcher::default();
        s.load_room(square()).unwrap();
        s.select_next_wall().unwrap();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        s.render(&mut surface);
        let texts = surface.texts();
        assert!(texts.contains(&"Length: 10"));
        assert!(texts.contains(&"Depth: 10"));
    }
}
