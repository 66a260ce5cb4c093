use std::cmp::Ordering;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::projection::LoanProjection;
use crate::statement::CardStatement;
use crate::types::{InstrumentId, InstrumentKind, Severity};

pub const DUE_CRITICAL_DAYS: i64 = 1;
pub const DUE_WARNING_DAYS: i64 = 3;
pub const DUE_WATCH_DAYS: i64 = 14;

pub const UTILIZATION_CRITICAL: Decimal = dec!(0.9);
pub const UTILIZATION_WARNING: Decimal = dec!(0.5);
pub const UTILIZATION_WATCH: Decimal = dec!(0.3);

/// a derived, unpersisted risk alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioAlert {
    /// `<instrument id>:<category>`
    pub id: String,
    pub instrument_id: InstrumentId,
    pub severity: Severity,
    pub title: String,
    pub detail: String,
}

/// the per-instrument facts alerts are classified from
#[derive(Debug, Clone, PartialEq)]
pub struct RiskSignals {
    pub instrument_id: InstrumentId,
    pub kind: InstrumentKind,
    pub name: String,
    pub display_balance: Money,
    pub due_in_days: i64,
    pub utilization: Rate,
    pub payment_below_interest: bool,
    pub over_limit: bool,
    pub planned_payment: Money,
    pub interest: Money,
    pub credit_limit: Money,
}

impl From<&CardStatement> for RiskSignals {
    fn from(statement: &CardStatement) -> Self {
        Self {
            instrument_id: statement.instrument_id,
            kind: InstrumentKind::Card,
            name: statement.name.clone(),
            display_balance: statement.display_balance,
            due_in_days: statement.due_cycle.due_in_days,
            utilization: statement.display_utilization,
            payment_below_interest: statement.payment_below_interest,
            over_limit: statement.over_limit,
            planned_payment: statement.planned_payment,
            interest: statement.interest,
            credit_limit: statement.credit_limit,
        }
    }
}

impl From<&LoanProjection> for RiskSignals {
    fn from(loan: &LoanProjection) -> Self {
        Self {
            instrument_id: loan.instrument_id,
            kind: InstrumentKind::Loan,
            name: loan.name.clone(),
            display_balance: loan.current_principal,
            due_in_days: loan.due_cycle.due_in_days,
            utilization: Rate::ZERO,
            payment_below_interest: false,
            over_limit: false,
            planned_payment: loan.rows.first().map(|r| r.total_payment).unwrap_or(Money::ZERO),
            interest: loan.current_interest,
            credit_limit: Money::ZERO,
        }
    }
}

/// classifies instruments against the fixed risk thresholds
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskAlertGenerator;

impl RiskAlertGenerator {
    pub fn new() -> Self {
        Self
    }

    /// every alert for every instrument, most severe first
    pub fn generate<'a>(&self, signals: impl IntoIterator<Item = &'a RiskSignals>) -> Vec<PortfolioAlert> {
        let mut alerts: Vec<PortfolioAlert> = signals
            .into_iter()
            .flat_map(|s| self.alerts_for(s))
            .collect();
        sort_alerts(&mut alerts);
        alerts
    }

    /// alerts for one instrument; each category contributes at most its most severe band
    pub fn alerts_for(&self, signals: &RiskSignals) -> Vec<PortfolioAlert> {
        let mut alerts = Vec::new();
        let name = &signals.name;

        if signals.display_balance.is_positive() {
            let days = signals.due_in_days;
            let severity = if days <= DUE_CRITICAL_DAYS {
                Some(Severity::Critical)
            } else if days <= DUE_WARNING_DAYS {
                Some(Severity::Warning)
            } else if days <= DUE_WATCH_DAYS {
                Some(Severity::Watch)
            } else {
                None
            };

            if let Some(severity) = severity {
                let when = match days {
                    d if d <= 0 => "today".to_string(),
                    1 => "tomorrow".to_string(),
                    d => format!("in {} days", d),
                };
                let owed = match signals.kind {
                    InstrumentKind::Card => "card balance",
                    InstrumentKind::Loan => "loan principal",
                };
                alerts.push(alert(
                    signals,
                    "due",
                    severity,
                    format!("{}: payment due {}", name, when),
                    format!(
                        "{} {} outstanding, planned payment {}",
                        signals.display_balance, owed, signals.planned_payment
                    ),
                ));
            }
        }

        let utilization = signals.utilization.as_decimal();
        let band = if utilization >= UTILIZATION_CRITICAL {
            Some((Severity::Critical, "critical"))
        } else if utilization >= UTILIZATION_WARNING {
            Some((Severity::Warning, "high"))
        } else if utilization >= UTILIZATION_WATCH {
            Some((Severity::Watch, "elevated"))
        } else {
            None
        };
        if let Some((severity, label)) = band {
            alerts.push(alert(
                signals,
                "utilization",
                severity,
                format!("{}: utilization {}", name, label),
                format!(
                    "{}% of the {} limit in use",
                    signals.utilization.as_percentage().round_dp(1).normalize(),
                    signals.credit_limit
                ),
            ));
        }

        if signals.payment_below_interest {
            alerts.push(alert(
                signals,
                "below-interest",
                Severity::Critical,
                format!("{}: payment below interest", name),
                format!(
                    "planned payment {} does not cover {} of interest",
                    signals.planned_payment, signals.interest
                ),
            ));
        }

        if signals.over_limit {
            alerts.push(alert(
                signals,
                "over-limit",
                Severity::Critical,
                format!("{}: over credit limit", name),
                format!("{} owed against a {} limit", signals.display_balance, signals.credit_limit),
            ));
        }

        alerts
    }
}

fn alert(
    signals: &RiskSignals,
    category: &str,
    severity: Severity,
    title: String,
    detail: String,
) -> PortfolioAlert {
    PortfolioAlert {
        id: format!("{}:{}", signals.instrument_id, category),
        instrument_id: signals.instrument_id,
        severity,
        title,
        detail,
    }
}

/// severity descending, then title ascending ignoring case, then id
pub fn sort_alerts(alerts: &mut [PortfolioAlert]) {
    alerts.sort_by(compare_alerts);
}

fn compare_alerts(a: &PortfolioAlert, b: &PortfolioAlert) -> Ordering {
    b.severity
        .rank()
        .cmp(&a.severity.rank())
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn signals(name: &str) -> RiskSignals {
        RiskSignals {
            instrument_id: Uuid::new_v4(),
            kind: InstrumentKind::Card,
            name: name.to_string(),
            display_balance: Money::from_major(1_000),
            due_in_days: 30,
            utilization: Rate::ZERO,
            payment_below_interest: false,
            over_limit: false,
            planned_payment: Money::from_major(50),
            interest: Money::from_major(20),
            credit_limit: Money::from_major(5_000),
        }
    }

    #[test]
    fn test_three_critical_alerts_sorted_by_title() {
        let s = RiskSignals {
            utilization: Rate::from_decimal(dec!(0.95)),
            due_in_days: 0,
            payment_below_interest: true,
            ..signals("Card")
        };
        let alerts = RiskAlertGenerator::new().generate([&s]);

        assert_eq!(alerts.len(), 3);
        assert!(alerts.iter().all(|a| a.severity == Severity::Critical));
        let titles: Vec<&str> = alerts.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Card: payment below interest",
                "Card: payment due today",
                "Card: utilization critical",
            ]
        );
    }

    #[test]
    fn test_due_windows() {
        let generator = RiskAlertGenerator::new();
        let severity_at = |days: i64| {
            let s = RiskSignals { due_in_days: days, ..signals("Card") };
            generator.alerts_for(&s).first().map(|a| a.severity)
        };

        assert_eq!(severity_at(1), Some(Severity::Critical));
        assert_eq!(severity_at(2), Some(Severity::Warning));
        assert_eq!(severity_at(3), Some(Severity::Warning));
        assert_eq!(severity_at(4), Some(Severity::Watch));
        assert_eq!(severity_at(14), Some(Severity::Watch));
        assert_eq!(severity_at(15), None);
    }

    #[test]
    fn test_no_due_alert_without_balance() {
        let s = RiskSignals {
            display_balance: Money::ZERO,
            due_in_days: 1,
            ..signals("Paid card")
        };
        assert!(RiskAlertGenerator::new().alerts_for(&s).is_empty());
    }

    #[test]
    fn test_utilization_bands() {
        let generator = RiskAlertGenerator::new();
        let band = |u: Decimal| {
            let s = RiskSignals { utilization: Rate::from_decimal(u), ..signals("Card") };
            generator.alerts_for(&s).first().map(|a| a.severity)
        };

        assert_eq!(band(dec!(0.9)), Some(Severity::Critical));
        assert_eq!(band(dec!(0.8999)), Some(Severity::Warning));
        assert_eq!(band(dec!(0.5)), Some(Severity::Warning));
        assert_eq!(band(dec!(0.3)), Some(Severity::Watch));
        assert_eq!(band(dec!(0.2999)), None);
    }

    #[test]
    fn test_over_limit_alert() {
        let s = RiskSignals {
            over_limit: true,
            utilization: Rate::from_decimal(dec!(1.05)),
            ..signals("Maxed")
        };
        let alerts = RiskAlertGenerator::new().alerts_for(&s);
        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().any(|a| a.title == "Maxed: over credit limit"));
        assert!(alerts.iter().all(|a| a.severity == Severity::Critical));
    }

    #[test]
    fn test_sort_severity_then_case_insensitive_title() {
        let watch = RiskSignals {
            utilization: Rate::from_decimal(dec!(0.35)),
            ..signals("alpha")
        };
        let warning = RiskSignals { due_in_days: 3, ..signals("zulu") };
        let critical = RiskSignals { due_in_days: 1, ..signals("Bravo") };
        let critical_lower = RiskSignals {
            payment_below_interest: true,
            ..signals("bravo")
        };

        let alerts = RiskAlertGenerator::new().generate([&watch, &warning, &critical, &critical_lower]);
        let titles: Vec<&str> = alerts.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "bravo: payment below interest",
                "Bravo: payment due tomorrow",
                "zulu: payment due in 3 days",
                "alpha: utilization elevated",
            ]
        );
    }

    #[test]
    fn test_due_detail_names_what_is_owed() {
        let generator = RiskAlertGenerator::new();
        let card = RiskSignals { due_in_days: 2, ..signals("Card") };
        let loan = RiskSignals {
            kind: InstrumentKind::Loan,
            due_in_days: 2,
            ..signals("Mortgage")
        };

        assert_eq!(
            generator.alerts_for(&card)[0].detail,
            "1000.00 card balance outstanding, planned payment 50.00"
        );
        assert_eq!(
            generator.alerts_for(&loan)[0].detail,
            "1000.00 loan principal outstanding, planned payment 50.00"
        );
    }

    #[test]
    fn test_alert_ids_name_category() {
        let s = RiskSignals { over_limit: true, ..signals("Card") };
        let alerts = RiskAlertGenerator::new().alerts_for(&s);
        assert_eq!(alerts[0].id, format!("{}:over-limit", s.instrument_id));
    }
}
