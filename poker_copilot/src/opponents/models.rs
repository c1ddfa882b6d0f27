use serde::{Deserialize, Serialize};

use crate::{game::entities::Usd, table::SeatIndex};

/// Coarse action class used by the tendency counters.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Raise,
    Call,
    Fold,
    Check,
}

impl ActionKind {
    /// Classify a free-form action string. Case-insensitive substring match,
    /// checked in the order raise/bet, call, fold, check.
    #[must_use]
    pub fn classify(action: &str) -> Option<Self> {
        let action = action.to_ascii_lowercase();
        if action.contains("raise") || action.contains("bet") {
            Some(Self::Raise)
        } else if action.contains("call") {
            Some(Self::Call)
        } else if action.contains("fold") {
            Some(Self::Fold)
        } else if action.contains("check") {
            Some(Self::Check)
        } else {
            None
        }
    }
}

/// Raw action counters for one opponent.
///
/// `total_actions` counts every classified action, checks included.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Tendency {
    pub raises: u32,
    pub calls: u32,
    pub folds: u32,
    pub checks: u32,
    pub total_actions: u32,
}

fn ratio_pct(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        100.0 * f64::from(numerator) / f64::from(denominator)
    }
}

fn round_tenth(pct: f64) -> f64 {
    (pct * 10.0).round() / 10.0
}

impl Tendency {
    /// Classify and count an action. Unrecognized strings change nothing.
    pub fn record(&mut self, action: &str) -> Option<ActionKind> {
        let kind = ActionKind::classify(action)?;
        match kind {
            ActionKind::Raise => self.raises += 1,
            ActionKind::Call => self.calls += 1,
            ActionKind::Fold => self.folds += 1,
            ActionKind::Check => self.checks += 1,
        }
        self.total_actions += 1;
        Some(kind)
    }

    /// Share of all classified actions that were raises.
    #[must_use]
    pub fn aggression_pct(&self) -> f64 {
        ratio_pct(self.raises, self.total_actions)
    }

    #[must_use]
    pub fn fold_pct(&self) -> f64 {
        ratio_pct(self.folds, self.total_actions)
    }

    /// Calls and raises over calls, raises and folds. Checks are free and
    /// count on neither side.
    #[must_use]
    pub fn vpip_pct(&self) -> f64 {
        ratio_pct(self.calls + self.raises, self.calls + self.raises + self.folds)
    }

    #[must_use]
    pub fn report(&self) -> TendencyReport {
        TendencyReport {
            raises: self.raises,
            calls: self.calls,
            folds: self.folds,
            checks: self.checks,
            total_actions: self.total_actions,
            aggression_pct: round_tenth(self.aggression_pct()),
            fold_pct: round_tenth(self.fold_pct()),
            vpip_pct: round_tenth(self.vpip_pct()),
        }
    }
}

/// Counters plus derived percentages rounded to one decimal.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TendencyReport {
    pub raises: u32,
    pub calls: u32,
    pub folds: u32,
    pub checks: u32,
    pub total_actions: u32,
    pub aggression_pct: f64,
    pub fold_pct: f64,
    pub vpip_pct: f64,
}

/// An opponent at the table.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Opponent {
    pub name: String,
    pub chips: Usd,
    pub seat: SeatIndex,
    pub tendency: Tendency,
}

impl Opponent {
    #[must_use]
    pub fn new(name: impl Into<String>, chips: Usd, seat: SeatIndex) -> Self {
        Self {
            name: name.into(),
            chips,
            seat,
            tendency: Tendency::default(),
        }
    }

    /// Name match used for updates; ASCII case-insensitive.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_order() {
        assert_eq!(ActionKind::classify("Raises to 60"), Some(ActionKind::Raise));
        assert_eq!(ActionKind::classify("bets 20"), Some(ActionKind::Raise));
        assert_eq!(ActionKind::classify("CALL"), Some(ActionKind::Call));
        assert_eq!(ActionKind::classify("folds"), Some(ActionKind::Fold));
        assert_eq!(ActionKind::classify("checks"), Some(ActionKind::Check));
        // "raise" wins over "call" when both appear.
        assert_eq!(
            ActionKind::classify("call then re-raise"),
            Some(ActionKind::Raise)
        );
        assert_eq!(ActionKind::classify("sits out"), None);
        assert_eq!(ActionKind::classify(""), None);
    }

    #[test]
    fn test_record_counts() {
        let mut tendency = Tendency::default();
        assert_eq!(tendency.record("raise"), Some(ActionKind::Raise));
        assert_eq!(tendency.record("check"), Some(ActionKind::Check));
        assert_eq!(tendency.record("mucks"), None);
        assert_eq!(tendency.raises, 1);
        assert_eq!(tendency.checks, 1);
        assert_eq!(tendency.total_actions, 2);
    }

    #[test]
    fn test_percentages() {
        let mut tendency = Tendency::default();
        tendency.record("raise");
        tendency.record("raise");
        tendency.record("call");
        let report = tendency.report();
        assert_eq!(report.aggression_pct, 66.7);
        assert_eq!(report.vpip_pct, 100.0);
        assert_eq!(report.fold_pct, 0.0);
        assert_eq!(report.total_actions, 3);
    }

    #[test]
    fn test_checks_stay_out_of_vpip() {
        let mut tendency = Tendency::default();
        tendency.record("call");
        tendency.record("check");
        tendency.record("check");
        tendency.record("check");
        assert_eq!(tendency.vpip_pct(), 100.0);
        assert_eq!(tendency.report().fold_pct, 0.0);
        // Checks still dilute aggression and fold rates.
        tendency.record("raise");
        tendency.record("fold");
        let report = tendency.report();
        assert_eq!(report.aggression_pct, 16.7);
        assert_eq!(report.fold_pct, 16.7);
        assert_eq!(report.vpip_pct, 66.7);
    }

    #[test]
    fn test_no_decisions_reports_zero() {
        let mut tendency = Tendency::default();
        tendency.record("check");
        let report = tendency.report();
        assert_eq!(report.aggression_pct, 0.0);
        assert_eq!(report.fold_pct, 0.0);
        assert_eq!(report.vpip_pct, 0.0);
    }

    #[test]
    fn test_percentages_sum() {
        let mut tendency = Tendency::default();
        for action in ["raise", "call", "call", "fold", "fold", "fold", "check"] {
            tendency.record(action);
        }
        // Without checks in the mix every decision is either in or out.
        let mut no_checks = tendency.clone();
        no_checks.checks = 0;
        no_checks.total_actions -= tendency.checks;
        let sum = no_checks.vpip_pct() + no_checks.fold_pct();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!(tendency.aggression_pct() <= tendency.vpip_pct());
    }

    #[test]
    fn test_opponent_name_match() {
        let opponent = Opponent::new("Villain", 1000, 3);
        assert!(opponent.is_named("villain"));
        assert!(!opponent.is_named("villain2"));
        assert_eq!(opponent.tendency, Tendency::default());
    }
}
