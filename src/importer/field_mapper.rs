// ==========================================
// CNC 生产 KPI 看板 - 字段映射器实现
// ==========================================
// 阶段 2: 源列名 → 标准字段 + 类型转换
// 列名同时接受韩文表头与英文表头
// ==========================================

use crate::domain::production::NewProductionRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{FieldMapper, RawRow};
use chrono::{Days, NaiveDate};

/// 标准字段 → 可接受的列名（按优先级）
pub mod columns {
    pub const DATE: &[&str] = &["날짜", "date"];
    pub const WORKER: &[&str] = &["작업자", "worker"];
    pub const LINE: &[&str] = &["라인번호", "line"];
    pub const MODEL: &[&str] = &["모델차수", "model"];
    pub const TARGET: &[&str] = &["목표수량", "target"];
    pub const PRODUCED: &[&str] = &["생산수량", "production"];
    pub const DEFECT: &[&str] = &["불량수량", "defect"];
    pub const NOTE: &[&str] = &["특이사항", "note"];
}

pub struct ProductionFieldMapper;

impl FieldMapper for ProductionFieldMapper {
    fn map_to_production(&self, row: &RawRow, row_number: usize) -> ImportResult<NewProductionRecord> {
        Ok(NewProductionRecord {
            date: self.parse_date(row, columns::DATE, row_number)?,
            worker: self.require_string(row, columns::WORKER, row_number)?,
            line: self.require_string(row, columns::LINE, row_number)?,
            model: self.require_string(row, columns::MODEL, row_number)?,
            // 数量缺失按 0 处理
            target_quantity: self.parse_quantity(row, columns::TARGET, row_number)?,
            produced_quantity: self.parse_quantity(row, columns::PRODUCED, row_number)?,
            defect_quantity: self.parse_quantity(row, columns::DEFECT, row_number)?,
            note: self.get_string(row, columns::NOTE),
        })
    }
}

impl ProductionFieldMapper {
    /// 提取字符串字段，依次尝试别名，取第一个非空值
    fn get_string(&self, row: &RawRow, aliases: &[&str]) -> Option<String> {
        aliases.iter().find_map(|alias| {
            row.get(*alias)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
    }

    fn require_string(&self, row: &RawRow, aliases: &[&str], row_number: usize) -> ImportResult<String> {
        self.get_string(row, aliases)
            .ok_or_else(|| ImportError::MissingField {
                row: row_number,
                field: aliases[0].to_string(),
            })
    }

    /// 解析数量（整数；"120.0" 这类整值小数也接受）
    fn parse_quantity(&self, row: &RawRow, aliases: &[&str], row_number: usize) -> ImportResult<i64> {
        let value = match self.get_string(row, aliases) {
            None => return Ok(0),
            Some(v) => v.replace(',', ""),
        };

        if let Ok(n) = value.parse::<i64>() {
            return Ok(n);
        }

        match value.parse::<f64>() {
            // i64::MAX as f64 等于 2^63，需用半开区间排除
            Ok(f) if f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(&f) => {
                Ok(f as i64)
            }
            _ => Err(ImportError::TypeConversionError {
                row: row_number,
                field: aliases[0].to_string(),
                message: format!("无法解析为整数: {}", value),
            }),
        }
    }

    /// 解析日期
    ///
    /// 支持: YYYY-MM-DD / YYYYMMDD / YYYY/MM/DD / YYYY.MM.DD / Excel 序列日
    fn parse_date(&self, row: &RawRow, aliases: &[&str], row_number: usize) -> ImportResult<NaiveDate> {
        let value = self.require_string(row, aliases, row_number)?;
        parse_date_text(&value).ok_or_else(|| ImportError::DateFormatError {
            row: row_number,
            field: aliases[0].to_string(),
            value,
        })
    }
}

/// 解析日期文本，失败返回 None
pub fn parse_date_text(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    // 截掉时间部分（"2024-05-01 00:00:00" / "2024-05-01T00:00:00"）
    let date_part = value
        .split(|c| c == ' ' || c == 'T')
        .next()
        .unwrap_or(value);

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, fmt) {
            return Some(date);
        }
    }

    excel_serial_to_date(value)
}

/// Excel 序列日 → 日期（1900 日期系统，基准 1899-12-30）
fn excel_serial_to_date(value: &str) -> Option<NaiveDate> {
    let serial = value.parse::<f64>().ok()?;
    // 只接受合理区间（1900-03-01 之后，9999 年之前）
    if !(61.0..2_958_466.0).contains(&serial) {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_days(Days::new(serial.trunc() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>()
    }

    #[test]
    fn test_map_korean_headers() {
        let r = row(&[
            ("날짜", "2024-05-01"),
            ("작업자", "Kim"),
            ("라인번호", "B-03"),
            ("모델차수", "M-100 R2"),
            ("목표수량", "100"),
            ("생산수량", "97"),
            ("불량수량", "2"),
            ("특이사항", "공구 교체"),
        ]);
        let record = ProductionFieldMapper.map_to_production(&r, 1).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(record.worker, "Kim");
        assert_eq!(record.target_quantity, 100);
        assert_eq!(record.produced_quantity, 97);
        assert_eq!(record.defect_quantity, 2);
        assert_eq!(record.note.as_deref(), Some("공구 교체"));
    }

    #[test]
    fn test_map_english_headers_and_missing_quantities() {
        let r = row(&[
            ("date", "20240501"),
            ("worker", "Lee"),
            ("line", "B-04"),
            ("model", "M-200"),
            ("production", "120.0"),
        ]);
        let record = ProductionFieldMapper.map_to_production(&r, 3).unwrap();
        assert_eq!(record.target_quantity, 0);
        assert_eq!(record.produced_quantity, 120);
        assert_eq!(record.defect_quantity, 0);
        assert_eq!(record.note, None);
    }

    #[test]
    fn test_korean_header_wins_over_english() {
        let r = row(&[
            ("date", "2024-05-02"),
            ("날짜", "2024-05-01"),
            ("worker", "Lee"),
            ("작업자", ""),
            ("line", "B-04"),
            ("model", "M-200"),
        ]);
        let record = ProductionFieldMapper.map_to_production(&r, 1).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        // 空值回退到英文列
        assert_eq!(record.worker, "Lee");
    }

    #[test]
    fn test_missing_worker_is_error() {
        let r = row(&[("date", "2024-05-01"), ("line", "B-04"), ("model", "M-200")]);
        let err = ProductionFieldMapper.map_to_production(&r, 7).unwrap_err();
        assert!(matches!(err, ImportError::MissingField { row: 7, .. }));
    }

    #[test]
    fn test_non_numeric_quantity_is_error() {
        let r = row(&[
            ("date", "2024-05-01"),
            ("worker", "Lee"),
            ("line", "B-04"),
            ("model", "M-200"),
            ("target", "abc"),
        ]);
        assert!(matches!(
            ProductionFieldMapper.map_to_production(&r, 2),
            Err(ImportError::TypeConversionError { .. })
        ));

        let r = row(&[
            ("date", "2024-05-01"),
            ("worker", "Lee"),
            ("line", "B-04"),
            ("model", "M-200"),
            ("target", "12.5"),
        ]);
        assert!(ProductionFieldMapper.map_to_production(&r, 2).is_err());
    }

    #[test]
    fn test_out_of_range_quantity_is_error() {
        for value in ["1e30", "9223372036854775808", "-1e19", "inf"] {
            let r = row(&[
                ("date", "2024-05-01"),
                ("worker", "Lee"),
                ("line", "B-04"),
                ("model", "M-200"),
                ("production", value),
            ]);
            assert!(
                matches!(
                    ProductionFieldMapper.map_to_production(&r, 4),
                    Err(ImportError::TypeConversionError { row: 4, .. })
                ),
                "{} should be rejected",
                value
            );
        }

        let r = row(&[
            ("date", "2024-05-01"),
            ("worker", "Lee"),
            ("line", "B-04"),
            ("model", "M-200"),
            ("production", "1e3"),
        ]);
        assert_eq!(
            ProductionFieldMapper.map_to_production(&r, 4).unwrap().produced_quantity,
            1000
        );
    }

    #[test]
    fn test_parse_date_text_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(parse_date_text("2024-05-01"), expected);
        assert_eq!(parse_date_text("2024/05/01"), expected);
        assert_eq!(parse_date_text("2024.05.01"), expected);
        assert_eq!(parse_date_text("20240501"), expected);
        assert_eq!(parse_date_text("2024-05-01 08:30:00"), expected);
        // Excel 序列日 45413 = 2024-05-01
        assert_eq!(parse_date_text("45413"), expected);
        assert_eq!(parse_date_text("not a date"), None);
    }
}
