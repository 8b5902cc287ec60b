use glam::Vec2;

/// Latest pointer position in normalized device coordinates.
///
/// `x` grows to the right and `y` grows upwards, both in \[-1, 1\]. Updated in
/// place on every move event and read once per frame by picking.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub ndc: Vec2,
}

impl PointerState {
    /// Returns false (leaving the state untouched) for a degenerate viewport.
    pub fn update_from_client(&mut self, x: f32, y: f32, width: f32, height: f32) -> bool {
        match client_to_ndc(x, y, width, height) {
            Some(ndc) => {
                self.ndc = ndc;
                true
            }
            None => false,
        }
    }
}

#[inline]
pub fn client_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Option<Vec2> {
    if !(width > 0.0 && height > 0.0) || !x.is_finite() || !y.is_finite() {
        return None;
    }
    let nx = (x / width) * 2.0 - 1.0;
    let ny = 1.0 - (y / height) * 2.0;
    Some(Vec2::new(nx.clamp(-1.0, 1.0), ny.clamp(-1.0, 1.0)))
}
