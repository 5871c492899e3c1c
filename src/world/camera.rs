use glam::{DVec2, IVec2, dvec2};

/// Player view-point in grid space.
///
/// * `dir` is the facing vector, roughly unit length.
/// * `plane` is perpendicular to `dir`; its length sets the field of view
///   (0.66 against a unit `dir` gives ~66°).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: DVec2,
    pub dir: DVec2,
    pub plane: DVec2,
}

impl Camera {
    pub fn new(pos: DVec2, dir: DVec2, plane: DVec2) -> Self {
        Self { pos, dir, plane }
    }

    /// Camera at `pos` looking along `dir` with a plane of length
    /// `plane_len`, oriented so screen column 0 is the left edge.
    pub fn looking(pos: DVec2, dir: DVec2, plane_len: f64) -> Self {
        let plane = dvec2(dir.y, -dir.x) * plane_len;
        Self { pos, dir, plane }
    }

    /// Grid cell that contains the camera.
    #[inline]
    pub fn cell(&self) -> IVec2 {
        self.pos.floor().as_ivec2()
    }

    /// Direction of the ray through screen column `x` of a `width`-wide view.
    ///
    /// ```text
    /// cam_x = 2x / width - 1      (-1 left edge, 0 centre, +1 right edge)
    /// ray   = dir + plane * cam_x
    /// ```
    #[inline]
    pub fn ray_dir(&self, x: usize, width: usize) -> DVec2 {
        let cam_x = 2.0 * x as f64 / width as f64 - 1.0;
        self.dir + self.plane * cam_x
    }

    /// Rotate facing and plane together (positive = counter-clockwise),
    /// keeping them perpendicular and the field of view unchanged.
    pub fn rotate(&mut self, angle: f64) {
        let rot = DVec2::from_angle(angle);
        self.dir = rot.rotate(self.dir);
        self.plane = rot.rotate(self.plane);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
