use glam::Vec3;

/// World-space axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centred on `center` with the given half-size per axis.
    pub fn from_center_half(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_size(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    #[inline]
    pub fn translated(&self, by: Vec3) -> Self {
        Self {
            min: self.min + by,
            max: self.max + by,
        }
    }

    /// Grow (positive) or shrink (negative) the box by `margin` on every
    /// face. Shrinking past a degenerate box collapses it onto its centre
    /// so it can never block anything.
    pub fn expand(&self, margin: f32) -> Self {
        let m = Vec3::splat(margin);
        let half = (self.half_size() + m).max(Vec3::ZERO);
        Self::from_center_half(self.center(), half)
    }

    /// True when the interval overlap holds on all three axes.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// Ordered obstacle list: static boxes baked at scene load, dynamic
/// boxes re-pushed every frame from current transforms.
#[derive(Debug, Default)]
pub struct ObstacleSet {
    boxes: Vec<Aabb>,
    static_len: usize,
}

impl ObstacleSet {
    pub fn with_static(boxes: Vec<Aabb>) -> Self {
        let static_len = boxes.len();
        Self { boxes, static_len }
    }

    /// Drop last frame's dynamic boxes, keep the baked ones.
    pub fn begin_frame(&mut self) {
        self.boxes.truncate(self.static_len);
    }

    pub fn push_dynamic(&mut self, aabb: Aabb) {
        self.boxes.push(aabb);
    }

    #[inline]
    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }

    #[inline]
    pub fn static_boxes(&self) -> &[Aabb] {
        &self.boxes[..self.static_len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(center: Vec3) -> Aabb {
        Aabb::from_center_half(center, Vec3::splat(0.5))
    }

    #[test]
    fn disjoint_boxes_do_not_intersect() {
        let a = unit_at(Vec3::ZERO);
        // Touching on one axis but separated on another.
        let b = unit_at(Vec3::new(5.0, 0.0, 0.0));
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn overlap_requires_all_three_axes() {
        let a = unit_at(Vec3::ZERO);
        // Overlaps in x and z, separated in y.
        let b = unit_at(Vec3::new(0.2, 3.0, 0.2));
        assert!(!a.intersects(&b));
        let c = unit_at(Vec3::new(0.2, 0.2, 0.2));
        assert!(a.intersects(&c));
    }

    #[test]
    fn shared_face_counts_as_contact() {
        let a = unit_at(Vec3::ZERO);
        let b = unit_at(Vec3::new(1.0, 0.0, 0.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn negative_expand_shrinks_and_saturates() {
        let a = Aabb::from_center_half(Vec3::ZERO, Vec3::splat(5.0));
        let shrunk = a.expand(-2.0);
        assert_eq!(shrunk.half_size(), Vec3::splat(3.0));
        // Over-shrinking collapses instead of inverting min/max.
        let collapsed = a.expand(-50.0);
        assert_eq!(collapsed.half_size(), Vec3::ZERO);
        assert_eq!(collapsed.center(), Vec3::ZERO);
    }

    #[test]
    fn obstacle_set_keeps_statics_across_frames() {
        let mut set = ObstacleSet::with_static(vec![unit_at(Vec3::ZERO)]);
        set.push_dynamic(unit_at(Vec3::new(3.0, 0.0, 0.0)));
        assert_eq!(set.boxes().len(), 2);
        set.begin_frame();
        assert_eq!(set.boxes().len(), 1);
        assert_eq!(set.static_boxes().len(), 1);
    }
}
