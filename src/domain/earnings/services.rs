use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::collections::BTreeMap;

use super::entities::{EarningKind, EarningRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindTotal {
  pub kind: EarningKind,
  pub label: &'static str,
  pub total: Decimal,
  pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
  pub date: NaiveDate,
  pub total: Decimal,
  /// Bar width (0-100) relative to the best day
  pub share: u8,
}

/// Aggregated view over a user's earning records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarningsReport {
  pub total: Decimal,
  /// One entry per kind, including kinds with no records
  pub by_kind: Vec<KindTotal>,
  /// Oldest day first, keyed by UTC date
  pub daily: Vec<DailyTotal>,
  /// Newest record first
  pub records: Vec<EarningRecord>,
}

impl EarningsReport {
  pub fn build(mut records: Vec<EarningRecord>) -> Self {
    let total = records.iter().map(|record| record.amount).sum();

    let by_kind = EarningKind::ALL
      .iter()
      .map(|kind| {
        let matching = records.iter().filter(|record| record.kind == *kind);
        KindTotal {
          kind: *kind,
          label: kind.label(),
          total: matching.clone().map(|record| record.amount).sum(),
          count: matching.count(),
        }
      })
      .collect();

    let mut days: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for record in &records {
      *days.entry(record.created_at.date_naive()).or_default() += record.amount;
    }
    let best = days.values().copied().max().unwrap_or_default();
    let daily = days
      .into_iter()
      .map(|(date, total)| DailyTotal {
        date,
        total,
        share: share_of(total, best),
      })
      .collect();

    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Self {
      total,
      by_kind,
      daily,
      records,
    }
  }
}

/// Percentage of `value` against `max`, clamped to 0-100
pub fn share_of(value: Decimal, max: Decimal) -> u8 {
  if max <= Decimal::ZERO {
    return 0;
  }
  (value * Decimal::ONE_HUNDRED / max)
    .round()
    .to_u8()
    .unwrap_or(0)
    .min(100)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{TimeZone, Utc};
  use rust_decimal_macros::dec;

  fn record(id: u32, amount: Decimal, kind: EarningKind, day: u32, hour: u32) -> EarningRecord {
    EarningRecord {
      id,
      amount,
      kind,
      duration: None,
      created_at: Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap(),
    }
  }

  fn sample() -> Vec<EarningRecord> {
    vec![
      record(1, dec!(2.50), EarningKind::Text, 10, 14),
      record(2, dec!(5.00), EarningKind::Call, 10, 15),
      record(3, dec!(2.50), EarningKind::Text, 10, 16),
      record(4, dec!(7.50), EarningKind::Call, 11, 10),
      record(5, dec!(2.50), EarningKind::Text, 11, 11),
      record(6, dec!(10.00), EarningKind::Call, 11, 14),
    ]
  }

  #[test]
  fn test_totals() {
    let report = EarningsReport::build(sample());
    assert_eq!(report.total, dec!(30.00));
    assert_eq!(report.by_kind[0].label, "Text Surveys");
    assert_eq!(report.by_kind[0].total, dec!(7.50));
    assert_eq!(report.by_kind[0].count, 3);
    assert_eq!(report.by_kind[1].label, "Phone Calls");
    assert_eq!(report.by_kind[1].total, dec!(22.50));
  }

  #[test]
  fn test_daily_totals_are_ordered_by_date() {
    let report = EarningsReport::build(sample());
    let daily: Vec<_> = report
      .daily
      .iter()
      .map(|day| (day.date.to_string(), day.total))
      .collect();
    assert_eq!(
      daily,
      vec![
        ("2024-03-10".to_string(), dec!(10.00)),
        ("2024-03-11".to_string(), dec!(20.00)),
      ]
    );
    assert_eq!(report.daily[0].share, 50);
    assert_eq!(report.daily[1].share, 100);
  }

  #[test]
  fn test_records_newest_first() {
    let report = EarningsReport::build(sample());
    let ids: Vec<u32> = report.records.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![6, 5, 4, 3, 2, 1]);
  }

  #[test]
  fn test_share_of_bounds() {
    assert_eq!(share_of(dec!(5), Decimal::ZERO), 0);
    assert_eq!(share_of(dec!(1), dec!(3)), 33);
    assert_eq!(share_of(dec!(-1), dec!(3)), 0);
  }

  #[test]
  fn test_empty_report() {
    let report = EarningsReport::build(Vec::new());
    assert_eq!(report.total, Decimal::ZERO);
    assert_eq!(report.by_kind.len(), 2);
    assert!(report.by_kind.iter().all(|kind| kind.count == 0));
    assert!(report.daily.is_empty());
  }
}
