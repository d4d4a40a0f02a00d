/// Number of keypoints in the MediaPipe hand layout.
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Represents a single 2D point in image pixel coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point2D) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// A detector-reported keypoint, identified by its index in the hand layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub id: usize,
    pub position: Point2D,
}

/// Axis-aligned box around the detected hand.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub xmin: f32,
    pub ymin: f32,
    pub xmax: f32,
    pub ymax: f32,
}

impl BoundingBox {
    pub fn new(xmin: f32, ymin: f32, xmax: f32, ymax: f32) -> Self {
        Self { xmin, ymin, xmax, ymax }
    }

    /// Smallest box enclosing all points. `None` for an empty slice.
    pub fn enclosing<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2D>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = BoundingBox::new(first.x, first.y, first.x, first.y);
        for p in iter {
            bbox.xmin = bbox.xmin.min(p.x);
            bbox.ymin = bbox.ymin.min(p.y);
            bbox.xmax = bbox.xmax.max(p.x);
            bbox.ymax = bbox.ymax.max(p.y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f32 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f32 {
        self.ymax - self.ymin
    }
}

/// One frame's worth of hand landmarks. Owned by the current cycle only.
#[derive(Debug, Clone, Default)]
pub struct HandDetection {
    pub landmarks: Vec<Landmark>,
    pub bbox: BoundingBox,
    pub score: f32,
}

impl HandDetection {
    /// Builds a detection from points in layout order; the box is derived from the points.
    pub fn from_points(points: &[Point2D], score: f32) -> Self {
        let landmarks = points
            .iter()
            .enumerate()
            .map(|(id, &position)| Landmark { id, position })
            .collect();
        let bbox = BoundingBox::enclosing(points).unwrap_or_default();
        Self { landmarks, bbox, score }
    }

    pub fn point(&self, id: usize) -> Option<Point2D> {
        self.landmarks
            .iter()
            .find(|l| l.id == id)
            .map(|l| l.position)
    }
}
