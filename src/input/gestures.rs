use crate::core::{
    constants::{DRAG_DECAY_RATE, PINCH_MIN_DISTANCE},
    geo::Point,
};

/// Tracks a drag of the pointer centroid and smooths its velocity.
///
/// The velocity is of the map position, i.e. opposite to the pointer motion, in px/ms.
#[derive(Debug, Clone, PartialEq)]
pub struct Drag {
    pub position: Point,
    pub speed: Point,
    time: f64,
}

impl Drag {
    pub fn new(position: Point, time: f64) -> Self {
        Self {
            position,
            speed: Point::default(),
            time,
        }
    }

    /// Moves the tracked centroid to `position` and returns the pan offset for the map.
    ///
    /// Each sample is blended in with weight `1 - exp(-rate * dt)`, so bursts of events
    /// arriving close together barely move the estimate. Samples with no elapsed time only
    /// move the centroid.
    pub fn update(&mut self, position: Point, time: f64) -> Point {
        let delta = self.position.subtract(&position);
        let dt = time - self.time;
        if dt > 0.0 {
            let decay = (-DRAG_DECAY_RATE * dt).exp();
            self.speed = self
                .speed
                .multiply(decay)
                .add(&delta.multiply((1.0 - decay) / dt));
            self.time = time;
        }
        self.position = position;
        delta
    }

    pub fn is_moving(&self) -> bool {
        self.speed.x != 0.0 || self.speed.y != 0.0
    }
}

/// Pointers currently pressed on the map, in the order they went down.
#[derive(Debug, Clone, Default)]
pub struct PointerSet {
    pointers: Vec<(u64, Point)>,
}

impl PointerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    pub fn contains(&self, pointer_id: u64) -> bool {
        self.pointers.iter().any(|(id, _)| *id == pointer_id)
    }

    pub fn clear(&mut self) {
        self.pointers.clear();
    }

    /// Adds a pointer or moves an existing one
    pub fn insert(&mut self, pointer_id: u64, position: Point) {
        if !self.update(pointer_id, position) {
            self.pointers.push((pointer_id, position));
        }
    }

    /// Moves a known pointer; unknown pointers are ignored
    pub fn update(&mut self, pointer_id: u64, position: Point) -> bool {
        match self.pointers.iter_mut().find(|(id, _)| *id == pointer_id) {
            Some(entry) => {
                entry.1 = position;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, pointer_id: u64) -> bool {
        let len = self.pointers.len();
        self.pointers.retain(|(id, _)| *id != pointer_id);
        self.pointers.len() != len
    }

    pub fn centroid(&self) -> Option<Point> {
        if self.pointers.is_empty() {
            return None;
        }
        let sum = self
            .pointers
            .iter()
            .fold(Point::default(), |sum, (_, p)| sum.add(p));
        Some(sum.multiply(1.0 / self.pointers.len() as f64))
    }

    /// Squared distance between the first two pointers, floored at [`PINCH_MIN_DISTANCE`].
    pub fn pinch_squared_distance(&self) -> Option<f64> {
        match self.pointers.as_slice() {
            [(_, a), (_, b), ..] => {
                Some(a.squared_distance_to(b).max(PINCH_MIN_DISTANCE * PINCH_MIN_DISTANCE))
            }
            _ => None,
        }
    }
}

/// Whole zoom steps for a pinch that went from `baseline` to `current` squared distance.
pub fn pinch_zoom_delta(baseline: f64, current: f64) -> i32 {
    let dz = (0.5 * (current / baseline).log2()).round();
    if dz.is_finite() {
        dz as i32
    } else {
        0
    }
}
