use serde::{
    Deserialize,
    Serialize
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x: x, y: y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn slope(lhs_pt: &Point2D, rhs_pt: &Point2D) -> f64 {
        (rhs_pt.y - lhs_pt.y) / (rhs_pt.x - lhs_pt.x)
    }

    /// x 在 [lhs.x, rhs.x] 之間的相對位置；兩點 x 相同時回傳 0。
    pub fn ratio(lhs_pt: &Point2D, rhs_pt: &Point2D, x: f64) -> f64 {
        let width = rhs_pt.x - lhs_pt.x;
        if width == 0.0 {
            0.0
        } else {
            (x - lhs_pt.x) / width
        }
    }

    /// 兩點之間以位置比例做線性插值。
    pub fn lerp(lhs_pt: &Point2D, rhs_pt: &Point2D, x: f64) -> f64 {
        lhs_pt.y + (rhs_pt.y - lhs_pt.y) * Point2D::ratio(lhs_pt, rhs_pt, x)
    }
}

pub trait NonparametricCurve {
    fn points(&self) -> Vec<Point2D>;

    fn min_x(&self) -> f64;

    fn max_x(&self) -> f64;
}
