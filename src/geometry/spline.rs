//! Catmull-Rom spline evaluation and frame computation.
//!
//! Pure Vec3 math with no GPU dependencies. The spline passes through every
//! control point; its knot spacing is chosen by [`SplineKind`].

use glam::Vec3;

use crate::options::SplineKind;

/// Arc-length table resolution (samples along the whole curve).
pub const ARC_LENGTH_DIVISIONS: usize = 200;

/// Squared knot distances below this are treated as coincident points.
const KNOT_EPSILON: f32 = 1e-4;

/// A point along the spline with position, tangent, and frame vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplinePoint {
    /// Position on the curve.
    pub pos: Vec3,
    /// Unit tangent.
    pub tangent: Vec3,
    /// Unit normal (first cross-section axis).
    pub normal: Vec3,
    /// Unit binormal (second cross-section axis).
    pub binormal: Vec3,
}

/// Open Catmull-Rom spline through a list of control points.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRom {
    points: Vec<Vec3>,
    kind: SplineKind,
    tension: f32,
}

/// Cubic `c0 + c1 t + c2 t^2 + c3 t^3` for one span.
struct Cubic {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl Cubic {
    /// Hermite form from endpoints and endpoint tangents.
    fn hermite(x0: Vec3, x1: Vec3, t0: Vec3, t1: Vec3) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    /// Uniform Catmull-Rom span with tangents scaled by `tension`.
    fn uniform(x0: Vec3, x1: Vec3, x2: Vec3, x3: Vec3, tension: f32) -> Self {
        Self::hermite(x1, x2, tension * (x2 - x0), tension * (x3 - x1))
    }

    /// Non-uniform span with knot intervals `dt0`, `dt1`, `dt2`.
    fn non_uniform(
        x0: Vec3,
        x1: Vec3,
        x2: Vec3,
        x3: Vec3,
        dt0: f32,
        dt1: f32,
        dt2: f32,
    ) -> Self {
        let t1 =
            (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let t2 =
            (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        Self::hermite(x1, x2, t1 * dt1, t2 * dt1)
    }

    fn eval(&self, t: f32) -> Vec3 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}

impl CatmullRom {
    /// Spline through `points`. `tension` only affects
    /// [`SplineKind::Uniform`].
    #[must_use]
    pub fn new(points: Vec<Vec3>, kind: SplineKind, tension: f32) -> Self {
        Self {
            points,
            kind,
            tension,
        }
    }

    /// Control points, in order.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Parameterization in use.
    #[must_use]
    pub fn kind(&self) -> SplineKind {
        self.kind
    }

    /// Evaluate at parameter `t` in `[0, 1]` (uniform in span index, not
    /// in arc length).
    #[must_use]
    pub fn point(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        match n {
            0 => return Vec3::ZERO,
            1 => return self.points[0],
            _ => {}
        }

        let p = (n - 1) as f32 * t.clamp(0.0, 1.0);
        let mut span = p.floor() as usize;
        let mut weight = p - span as f32;
        if span >= n - 1 {
            span = n - 2;
            weight = 1.0;
        }

        // Phantom end points mirror the neighbor through the end point.
        let p0 = if span > 0 {
            self.points[span - 1]
        } else {
            self.points[0] * 2.0 - self.points[1]
        };
        let p1 = self.points[span];
        let p2 = self.points[span + 1];
        let p3 = if span + 2 < n {
            self.points[span + 2]
        } else {
            self.points[n - 1] * 2.0 - self.points[n - 2]
        };

        let cubic = match self.kind {
            SplineKind::Uniform => Cubic::uniform(p0, p1, p2, p3, self.tension),
            SplineKind::Centripetal | SplineKind::Chordal => {
                let power = if self.kind == SplineKind::Chordal {
                    0.5
                } else {
                    0.25
                };
                let mut dt0 = p0.distance_squared(p1).powf(power);
                let mut dt1 = p1.distance_squared(p2).powf(power);
                let mut dt2 = p2.distance_squared(p3).powf(power);
                if dt1 < KNOT_EPSILON {
                    dt1 = 1.0;
                }
                if dt0 < KNOT_EPSILON {
                    dt0 = dt1;
                }
                if dt2 < KNOT_EPSILON {
                    dt2 = dt1;
                }
                Cubic::non_uniform(p0, p1, p2, p3, dt0, dt1, dt2)
            }
        };
        cubic.eval(weight)
    }

    /// Unit tangent at parameter `t` by central difference.
    #[must_use]
    pub fn tangent(&self, t: f32) -> Vec3 {
        let delta = 1e-4;
        let t1 = (t - delta).max(0.0);
        let t2 = (t + delta).min(1.0);
        (self.point(t2) - self.point(t1)).normalize_or_zero()
    }

    /// Cumulative chord lengths at `divisions + 1` evenly spaced parameters.
    #[must_use]
    pub fn arc_lengths(&self, divisions: usize) -> Vec<f32> {
        let divisions = divisions.max(1);
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);
        for d in 1..=divisions {
            let current = self.point(d as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }
}

/// Map arc-length fraction `u` to spline parameter `t` using a cumulative
/// length table from [`CatmullRom::arc_lengths`].
#[must_use]
pub fn arc_fraction_to_param(lengths: &[f32], u: f32) -> f32 {
    let Some(&total) = lengths.last() else {
        return 0.0;
    };
    if lengths.len() < 2 || total <= 0.0 {
        return u.clamp(0.0, 1.0);
    }
    let target = u.clamp(0.0, 1.0) * total;

    // First index whose length is >= target.
    let idx = lengths.partition_point(|&l| l < target);
    if idx == 0 {
        return 0.0;
    }
    let idx = idx.min(lengths.len() - 1);
    let before = lengths[idx - 1];
    let segment = lengths[idx] - before;
    let fraction = if segment > 0.0 {
        (target - before) / segment
    } else {
        0.0
    };
    ((idx - 1) as f32 + fraction) / (lengths.len() - 1) as f32
}

/// Compute Rotation Minimizing Frames using the double reflection method
/// (Wang et al. 2008).
pub fn compute_rmf(points: &mut [SplinePoint]) {
    if points.is_empty() {
        return;
    }

    // A zero first tangent (coincident samples) falls back to the helix axis.
    let t0 = points[0].tangent.try_normalize().unwrap_or(Vec3::Y);
    let arbitrary = if t0.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let n0 = t0.cross(arbitrary).normalize();
    let b0 = t0.cross(n0).normalize();

    points[0].normal = n0;
    points[0].binormal = b0;

    for i in 0..points.len() - 1 {
        let x_i = points[i].pos;
        let x_i1 = points[i + 1].pos;
        let t_i = points[i].tangent;
        let t_i1 = points[i + 1].tangent;
        let r_i = points[i].normal;

        let v1 = x_i1 - x_i;
        let c1 = v1.dot(v1);

        if c1 < 1e-10 {
            points[i + 1].normal = r_i;
            points[i + 1].binormal = points[i].binormal;
            continue;
        }

        // First reflection
        let r_i_l = r_i - (2.0 / c1) * v1.dot(r_i) * v1;
        let t_i_l = t_i - (2.0 / c1) * v1.dot(t_i) * v1;

        // Second reflection
        let v2 = t_i1 - t_i_l;
        let c2 = v2.dot(v2);

        let r_i1 = if c2 < 1e-10 {
            r_i_l
        } else {
            r_i_l - (2.0 / c2) * v2.dot(r_i_l) * v2
        };

        // Ensure orthonormality
        let r_i1 = (r_i1 - t_i1 * t_i1.dot(r_i1)).normalize();
        let s_i1 = t_i1.cross(r_i1).normalize();

        points[i + 1].normal = r_i1;
        points[i + 1].binormal = s_i1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(2.0, 0.0, 0.5),
            Vec3::new(3.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn passes_through_control_points() {
        for kind in [
            SplineKind::Centripetal,
            SplineKind::Chordal,
            SplineKind::Uniform,
        ] {
            let spline = CatmullRom::new(zigzag(), kind, 0.5);
            for (i, p) in zigzag().iter().enumerate() {
                let t = i as f32 / 3.0;
                assert!(
                    spline.point(t).distance(*p) < 1e-4,
                    "{kind:?} misses control point {i}"
                );
            }
        }
    }

    #[test]
    fn straight_line_stays_straight() {
        let pts = vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0, Vec3::X * 3.0];
        let spline = CatmullRom::new(pts, SplineKind::Centripetal, 0.5);
        for k in 0..=20 {
            let p = spline.point(k as f32 / 20.0);
            assert!(p.y.abs() < 1e-5 && p.z.abs() < 1e-5);
        }
        assert!((spline.tangent(0.5) - Vec3::X).length() < 1e-3);
    }

    #[test]
    fn parameter_is_clamped() {
        let spline = CatmullRom::new(zigzag(), SplineKind::Centripetal, 0.5);
        assert_eq!(spline.point(-1.0), spline.point(0.0));
        assert!(spline.point(2.0).distance(zigzag()[3]) < 1e-5);
    }

    #[test]
    fn degenerate_inputs_do_not_panic() {
        let empty = CatmullRom::new(Vec::new(), SplineKind::Centripetal, 0.5);
        assert_eq!(empty.point(0.3), Vec3::ZERO);
        let single =
            CatmullRom::new(vec![Vec3::ONE], SplineKind::Centripetal, 0.5);
        assert_eq!(single.point(0.7), Vec3::ONE);
        let repeated = CatmullRom::new(
            vec![Vec3::ONE, Vec3::ONE, Vec3::ONE],
            SplineKind::Centripetal,
            0.5,
        );
        assert!(repeated.point(0.5).is_finite());
    }

    #[test]
    fn arc_length_of_line_is_exact() {
        let pts = vec![Vec3::ZERO, Vec3::X * 2.0, Vec3::X * 4.0];
        let spline = CatmullRom::new(pts, SplineKind::Uniform, 0.5);
        let lengths = spline.arc_lengths(ARC_LENGTH_DIVISIONS);
        assert_eq!(lengths.len(), ARC_LENGTH_DIVISIONS + 1);
        assert!((lengths[ARC_LENGTH_DIVISIONS] - 4.0).abs() < 1e-3);

        assert_eq!(arc_fraction_to_param(&lengths, 0.0), 0.0);
        assert!((arc_fraction_to_param(&lengths, 1.0) - 1.0).abs() < 1e-5);
        let mid = spline.point(arc_fraction_to_param(&lengths, 0.5));
        assert!(mid.distance(Vec3::X * 2.0) < 1e-2);
    }

    #[test]
    fn rmf_frames_are_orthonormal() {
        let spline = CatmullRom::new(zigzag(), SplineKind::Centripetal, 0.5);
        let mut points: Vec<SplinePoint> = (0..=32)
            .map(|k| {
                let t = k as f32 / 32.0;
                SplinePoint {
                    pos: spline.point(t),
                    tangent: spline.tangent(t),
                    normal: Vec3::ZERO,
                    binormal: Vec3::ZERO,
                }
            })
            .collect();
        compute_rmf(&mut points);
        for p in &points {
            assert!((p.normal.length() - 1.0).abs() < 1e-4);
            assert!((p.binormal.length() - 1.0).abs() < 1e-4);
            assert!(p.normal.dot(p.tangent).abs() < 1e-3);
            assert!(p.binormal.dot(p.normal).abs() < 1e-3);
        }
    }

    #[test]
    fn rmf_survives_zero_tangents() {
        let mut points = vec![
            SplinePoint {
                pos: Vec3::ONE,
                tangent: Vec3::ZERO,
                normal: Vec3::ZERO,
                binormal: Vec3::ZERO,
            };
            5
        ];
        compute_rmf(&mut points);
        for p in &points {
            assert!(p.normal.is_finite() && p.binormal.is_finite());
            assert!((p.normal.length() - 1.0).abs() < 1e-4);
        }
    }
}
