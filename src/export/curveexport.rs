use crate::compensation::continuouscompensation::CompensationPoint;
use crate::engine::samplepoint::ToneCurve;

pub const CURVE_TSV_HEADER: &str = "Input %\tTVI %\tOutput %\tBump %";
pub const DGC_TSV_HEADER: &str = "Target %\tInput %";

/// 最短的十進位表示：`17` 而非 `17.0`，負零印成 `0`。
pub fn format_tone(value: f64) -> String {
    (value + 0.0).to_string()
}

/// 以 tab 分隔的曲線表，第一列為表頭，列與列之間以 `\n` 連接（結尾不換行）。
pub fn curve_to_tsv(curve: &ToneCurve) -> String {
    let mut lines = Vec::with_capacity(curve.len() + 1);
    lines.push(CURVE_TSV_HEADER.to_owned());
    for sample in curve {
        lines.push(format!("{}\t{}\t{}\t{}",
                           format_tone(sample.input()),
                           format_tone(sample.tvi()),
                           format_tone(sample.output()),
                           format_tone(sample.bump())));
    }
    lines.join("\n")
}

pub fn curve_to_json(curve: &ToneCurve) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(curve.samples())
}

/// 無解的目標印成 `-`。
pub fn compensation_table_to_tsv(table: &[CompensationPoint]) -> String {
    let mut lines = Vec::with_capacity(table.len() + 1);
    lines.push(DGC_TSV_HEADER.to_owned());
    for pt in table {
        let input = pt.input().map_or("-".to_owned(), format_tone);
        lines.push(format!("{}\t{}", format_tone(pt.target()), input));
    }
    lines.join("\n")
}
