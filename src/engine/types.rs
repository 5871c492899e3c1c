/// Pixel size of the view being painted.  `half_h` is the horizon row
/// (`h / 2`, rounded down), kept as `i32` for the signed span maths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Screen {
    pub w: usize,
    pub h: usize,
    pub half_h: i32,
}

impl Screen {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            half_h: h as i32 / 2,
        }
    }

    /// Number of pixels the frame-buffer must hold.
    #[inline]
    pub fn len(&self) -> usize {
        self.w * self.h
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
