use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    NonparametricCurve,
    Point2D
};

// ─────────────────────────────────────────────────────────────────────────────
// PiecewiseLinear - 兩端錨定的分段線性插值
// ─────────────────────────────────────────────────────────────────────────────
//
// 節點 (x_0, y_0) … (x_n, y_n) 之外各有一個錨點 (a_l, y_l)、(a_r, y_r)：
//
//   x ≤ x_0       : 由左錨點線性爬升到 (x_0, y_0)
//   x ≥ x_n       : 由 (x_n, y_n) 線性衰減到右錨點
//   x_i ≤ x ≤ x_j : 相鄰節點之間線性插值
//
// 左側判斷優先於右側，所以只有一個節點時 x = x_0 落在左段。
// 外插段的比例一律由錨點那一側起算（ratio = (x - a) / (x_k - a)），
// 與「y_k · (x / x_k)」、「y_k · ((a_r - x) / (a_r - x_k))」逐位元一致。

#[derive(Clone, Debug, PartialEq)]
pub struct PiecewiseLinear {
    points: Vec<Point2D>,
    lhs_anchor: Point2D,
    rhs_anchor: Point2D
}

impl PiecewiseLinear {
    pub fn new(mut points: Vec<Point2D>, lhs_anchor: Point2D, rhs_anchor: Point2D) -> PiecewiseLinear {
        points.sort_by(|lhs, rhs| lhs.x().total_cmp(&rhs.x()));
        PiecewiseLinear { points, lhs_anchor, rhs_anchor }
    }

    /// 兩端錨點的 y 皆為 0。
    pub fn anchored_at_zero(points: Vec<Point2D>, min_x: f64, max_x: f64) -> PiecewiseLinear {
        PiecewiseLinear::new(points, Point2D::new(min_x, 0.0), Point2D::new(max_x, 0.0))
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 回傳包含 x 的區段，第一個元素是比例起算的那一端。
    fn segment(&self, x: f64) -> Option<(Point2D, Point2D)> {
        let first = *self.points.first()?;
        let last = *self.points.last()?;
        if x <= first.x() {
            return Some((self.lhs_anchor, first));
        }
        if x >= last.x() {
            return Some((self.rhs_anchor, last));
        }
        let idx = self.points.partition_point(|pt| pt.x() < x);
        Some((self.points[idx - 1], self.points[idx]))
    }
}

impl Curve for PiecewiseLinear {
    fn value(&self, x: f64) -> f64 {
        self.segment(x)
            .map_or(0.0, |(from_pt, to_pt)| Point2D::lerp(&from_pt, &to_pt, x))
    }

    fn derivative(&self, x: f64) -> f64 {
        match self.segment(x) {
            Some((from_pt, to_pt)) if from_pt.x() != to_pt.x() => Point2D::slope(&from_pt, &to_pt),
            _ => 0.0
        }
    }
}

impl NonparametricCurve for PiecewiseLinear {
    fn points(&self) -> Vec<Point2D> {
        self.points.clone()
    }

    fn min_x(&self) -> f64 {
        self.lhs_anchor.x()
    }

    fn max_x(&self) -> f64 {
        self.rhs_anchor.x()
    }
}
