//! Closed-form squared distance between a ray and a plane in 3D.
//!
//! A pure, stateless routine over `f64` coordinates: classify the ray start
//! against the plane, and either the ray reaches the plane (distance zero) or the
//! start point is the closest point and its squared point-plane distance is the
//! answer. No generic kernel, no I/O.
//!
//! # Examples
//!
//! ```
//! use ray_plane::{Plane3, Point3, Ray3, Vector3, squared_distance};
//!
//! let plane = Plane3::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
//!
//! // A ray starting above the plane and pointing away from it: the start point
//! // is the closest approach.
//! let ray = Ray3::new(Point3::new(0.0, 0.0, 3.0), Vector3::new(0.0, 0.0, 1.0));
//! assert_eq!(squared_distance(&ray, &plane), 9.0);
//!
//! // Pointing towards the plane, the ray eventually hits it.
//! let ray = Ray3::new(Point3::new(0.0, 0.0, 3.0), Vector3::new(0.0, 0.0, -1.0));
//! assert_eq!(squared_distance(&ray, &plane), 0.0);
//! ```

use std::cmp::Ordering;
use std::ops::Sub;

/// A point in 3D space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point3 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point3 {
    /// Creates a point from its coordinates.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A direction or displacement in 3D space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vector3 {
    /// Creates a vector from its components.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The dot product with another vector.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x
            .mul_add(other.x, self.y.mul_add(other.y, self.z * other.z))
    }

    /// The squared length of the vector.
    #[must_use]
    pub fn squared_length(self) -> f64 {
        self.dot(self)
    }

    #[allow(clippy::float_cmp, reason = "exact zero test rejecting degenerate input")]
    fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

impl Sub for Point3 {
    type Output = Vector3;

    fn sub(self, other: Self) -> Vector3 {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

/// A half-line: a start point and the direction it extends in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray3 {
    start: Point3,
    direction: Vector3,
}

impl Ray3 {
    /// Creates a ray from its start point and direction.
    ///
    /// The direction need not be normalized.
    ///
    /// # Panics
    ///
    /// Panics if the direction is the zero vector.
    #[must_use]
    pub fn new(start: Point3, direction: Vector3) -> Self {
        assert!(
            !direction.is_zero(),
            "a ray cannot have a zero direction vector"
        );

        Self { start, direction }
    }

    /// The start point of the ray.
    #[must_use]
    pub fn start(&self) -> Point3 {
        self.start
    }

    /// The direction of the ray.
    #[must_use]
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// The squared distance from this ray to a plane.
    #[must_use]
    pub fn squared_distance_to_plane(&self, plane: &Plane3) -> f64 {
        squared_distance(self, plane)
    }
}

/// A plane given by a point on it and a normal vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane3 {
    point: Point3,
    normal: Vector3,
}

impl Plane3 {
    /// Creates a plane from a point on it and its normal.
    ///
    /// The normal need not be normalized.
    ///
    /// # Panics
    ///
    /// Panics if the normal is the zero vector.
    #[must_use]
    pub fn new(point: Point3, normal: Vector3) -> Self {
        assert!(!normal.is_zero(), "a plane cannot have a zero normal vector");

        Self { point, normal }
    }

    /// A point on the plane.
    #[must_use]
    pub fn point(&self) -> Point3 {
        self.point
    }

    /// The normal of the plane.
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// The squared distance from this plane to a ray.
    #[must_use]
    pub fn squared_distance_to_ray(&self, ray: &Ray3) -> f64 {
        squared_distance(ray, self)
    }
}

/// The squared distance between a ray and a plane.
///
/// Zero when the ray start lies on the plane or the ray points towards the plane
/// (it reaches the plane eventually). Otherwise the ray start is the closest
/// point and its squared point-plane distance is returned.
///
/// # Examples
///
/// ```
/// use ray_plane::{Plane3, Point3, Ray3, Vector3, squared_distance};
///
/// let plane = Plane3::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
///
/// // Parallel to the plane at height 2: the distance never changes.
/// let ray = Ray3::new(Point3::new(1.0, 1.0, 2.0), Vector3::new(1.0, 0.0, 0.0));
/// assert_eq!(squared_distance(&ray, &plane), 4.0);
/// ```
#[must_use]
pub fn squared_distance(ray: &Ray3, plane: &Plane3) -> f64 {
    let normal = plane.normal();
    let start_offset = ray.start() - plane.point();

    // Signed measures of the ray start and the ray direction against the plane
    // normal. Only the signs matter for the classification.
    let start_side = normal.dot(start_offset);
    let approach = normal.dot(ray.direction());

    let points_towards_plane = match start_side.partial_cmp(&0.0) {
        Some(Ordering::Less) => approach > 0.0,
        Some(Ordering::Greater) => approach < 0.0,
        // On the plane, or NaN coordinates poisoned the comparison; either way
        // there is no meaningful positive distance to report.
        _ => return 0.0,
    };

    if points_towards_plane {
        return 0.0;
    }

    // Squared point-plane distance of the start, with the normalization folded in
    // so the normal need not be a unit vector.
    start_side * start_side / normal.squared_length()
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::float_cmp,
        reason = "test inputs are chosen to make results exactly representable"
    )]

    use super::*;

    fn unit_z_plane() -> Plane3 {
        Plane3::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0))
    }

    #[test]
    fn ray_towards_plane_is_zero() {
        let ray = Ray3::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));

        assert_eq!(squared_distance(&ray, &unit_z_plane()), 0.0);
    }

    #[test]
    fn ray_towards_plane_from_below_is_zero() {
        let ray = Ray3::new(Point3::new(2.0, 3.0, -5.0), Vector3::new(0.0, 0.0, 1.0));

        assert_eq!(squared_distance(&ray, &unit_z_plane()), 0.0);
    }

    #[test]
    fn start_on_plane_is_zero() {
        let ray = Ray3::new(Point3::new(7.0, -2.0, 0.0), Vector3::new(0.0, 0.0, 1.0));

        assert_eq!(squared_distance(&ray, &unit_z_plane()), 0.0);
    }

    #[test]
    fn ray_away_from_plane_measures_start_point() {
        let ray = Ray3::new(Point3::new(0.0, 0.0, 3.0), Vector3::new(0.0, 0.0, 1.0));

        assert_eq!(squared_distance(&ray, &unit_z_plane()), 9.0);
    }

    #[test]
    fn parallel_ray_measures_start_point() {
        let ray = Ray3::new(Point3::new(1.0, 2.0, 4.0), Vector3::new(1.0, 1.0, 0.0));

        assert_eq!(squared_distance(&ray, &unit_z_plane()), 16.0);
    }

    #[test]
    fn normal_need_not_be_unit_length() {
        let plane = Plane3::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 2.0));
        let ray = Ray3::new(Point3::new(0.0, 0.0, 3.0), Vector3::new(0.0, 0.0, 1.0));

        assert_eq!(squared_distance(&ray, &plane), 9.0);
    }

    #[test]
    fn plane_offset_from_origin() {
        let plane = Plane3::new(Point3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, 1.0));
        let ray = Ray3::new(Point3::new(5.0, 5.0, 13.0), Vector3::new(0.0, 0.0, 1.0));

        assert_eq!(squared_distance(&ray, &plane), 9.0);
    }

    #[test]
    fn argument_order_is_symmetric() {
        let plane = unit_z_plane();
        let ray = Ray3::new(Point3::new(0.0, 0.0, 3.0), Vector3::new(1.0, 0.0, 1.0));

        assert_eq!(
            ray.squared_distance_to_plane(&plane),
            plane.squared_distance_to_ray(&ray)
        );
    }

    #[test]
    #[should_panic]
    fn zero_direction_panics() {
        _ = Ray3::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    #[should_panic]
    fn zero_normal_panics() {
        _ = Plane3::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0));
    }
}
