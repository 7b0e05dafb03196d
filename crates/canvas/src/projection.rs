use euclid::default::{Size2D, Transform3D};

/// Maps window pixels (origin top left, y down) to clip space.
#[derive(Clone, Debug)]
pub struct Projection {
    needs_rebinding: bool,
    viewport: Size2D<f32>,
}

impl Projection {
    pub fn new(viewport: Size2D<f32>) -> Self {
        Self {
            needs_rebinding: true,
            viewport,
        }
    }

    pub fn needs_rebinding(&self) -> bool {
        self.needs_rebinding
    }
    pub fn mark_bound(&mut self) {
        self.needs_rebinding = false;
    }

    pub fn viewport(&self) -> Size2D<f32> {
        self.viewport
    }
    pub fn set_viewport(&mut self, new_size: Size2D<f32>) {
        if self.viewport != new_size {
            self.viewport = new_size;
            self.needs_rebinding = true;
        }
    }

    pub fn viewport_to_uv(&self) -> Transform3D<f32> {
        Transform3D::ortho(
            0.0,
            self.viewport.width,
            self.viewport.height,
            0.0,
            -1.0,
            1.0,
        )
    }
}
