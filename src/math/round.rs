use rust_decimal::{
    Decimal,
    RoundingStrategy
};
use rust_decimal::prelude::{
    FromPrimitive,
    ToPrimitive
};

/// 四捨五入至 `digits` 位小數，midpoint 一律遠離零（half away from zero）。
///
/// 捨入在 `Decimal` 上進行而非直接乘上 10^digits，避免 `x * 10.0` 在二進位下
/// 產生的誤差把 .x5 的值捨錯方向。
/// NaN、±inf 或超出 `Decimal` 範圍的值原樣返回。
/// 負零會被正規化為 0，輸出表格不會出現 `-0`。
pub fn round(x: f64, digits: u32) -> f64 {
    Decimal::from_f64(x)
        .map(|d| d.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .map_or(x, |y| y + 0.0)
}

/// 顯示用的一位小數捨入。
pub fn round1(x: f64) -> f64 {
    round(x, 1)
}
