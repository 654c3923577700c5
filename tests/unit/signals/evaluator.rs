//! Unit tests for threshold rule evaluation

use ratiowatch::indicators::calculator::EmaRequest;
use ratiowatch::models::alert::AlertTrigger;
use ratiowatch::models::indicators::IndicatorResult;
use ratiowatch::models::rule::{Comparison, ThresholdType, TickerRule};
use ratiowatch::signals::RuleEvaluator;

fn pe_rule(threshold: f64, comparison: Comparison) -> TickerRule {
    TickerRule::new("ACME", ThresholdType::PriceEarnings, threshold, comparison)
}

fn with_pe(pe: Option<f64>) -> IndicatorResult {
    IndicatorResult {
        recomputed_pe: pe,
        ..IndicatorResult::default()
    }
}

fn trend_indicators() -> IndicatorResult {
    IndicatorResult {
        prev_day_close: Some(105.0),
        current_day_close: Some(100.0),
        ema_prev_day: Some(102.0),
        ema_current: Some(101.0),
        ..IndicatorResult::default()
    }
}

#[test]
fn test_pe_lt_fires_below_threshold() {
    let rule = pe_rule(15.0, Comparison::LessThan);
    let event = RuleEvaluator::evaluate("ACME", &rule, &with_pe(Some(10.0))).expect("alert");
    assert_eq!(event.ticker, "ACME");
    assert_eq!(
        event.trigger,
        AlertTrigger::PriceEarnings {
            ratio: 10.0,
            comparison: Comparison::LessThan,
            threshold: 15.0,
        }
    );
    assert_eq!(event.message, "ALERT: ACME P/E ratio (10.00) is lt threshold (15)!");
}

#[test]
fn test_pe_lt_does_not_fire_above_or_at_threshold() {
    let rule = pe_rule(15.0, Comparison::LessThan);
    assert!(RuleEvaluator::evaluate("ACME", &rule, &with_pe(Some(20.0))).is_none());
    assert!(RuleEvaluator::evaluate("ACME", &rule, &with_pe(Some(15.0))).is_none());
}

#[test]
fn test_pe_gt() {
    let rule = pe_rule(15.0, Comparison::GreaterThan);
    assert!(RuleEvaluator::evaluate("ACME", &rule, &with_pe(Some(20.0))).is_some());
    assert!(RuleEvaluator::evaluate("ACME", &rule, &with_pe(Some(15.0))).is_none());
    assert!(RuleEvaluator::evaluate("ACME", &rule, &with_pe(Some(10.0))).is_none());
}

#[test]
fn test_pe_unknown_ratio_never_fires() {
    let rule = pe_rule(15.0, Comparison::LessThan);
    assert!(RuleEvaluator::evaluate("ACME", &rule, &with_pe(None)).is_none());
}

#[test]
fn test_pe_without_threshold_never_fires() {
    let rule = TickerRule {
        name: Some("ACME".to_string()),
        threshold_type: ThresholdType::PriceEarnings,
        threshold_number: None,
        comparison: Comparison::LessThan,
    };
    assert!(RuleEvaluator::evaluate("ACME", &rule, &with_pe(Some(1.0))).is_none());
}

#[test]
fn test_pb_uses_recomputed_pb() {
    let rule = TickerRule::new("BANK", ThresholdType::PriceBook, 1.0, Comparison::LessThan);
    let indicators = IndicatorResult {
        recomputed_pe: Some(0.5),
        recomputed_pb: Some(0.8),
        ..IndicatorResult::default()
    };
    let event = RuleEvaluator::evaluate("BANK", &rule, &indicators).expect("alert");
    assert_eq!(event.message, "ALERT: BANK P/B ratio (0.80) is lt threshold (1)!");

    let above = IndicatorResult {
        recomputed_pb: Some(1.2),
        ..IndicatorResult::default()
    };
    assert!(RuleEvaluator::evaluate("BANK", &rule, &above).is_none());
}

#[test]
fn test_unrecognized_comparison_never_fires() {
    let rule = pe_rule(15.0, Comparison::Unrecognized("eq".to_string()));
    assert!(RuleEvaluator::evaluate("ACME", &rule, &with_pe(Some(10.0))).is_none());
    assert!(RuleEvaluator::evaluate("ACME", &rule, &with_pe(Some(15.0))).is_none());
}

#[test]
fn test_ema_gt_fires_when_price_above_ema() {
    let rule = TickerRule::new("TREND", ThresholdType::Ema, 20.0, Comparison::GreaterThan);
    let indicators = IndicatorResult {
        current_price: Some(110.0),
        ema_current: Some(100.0),
        ..IndicatorResult::default()
    };
    let event = RuleEvaluator::evaluate("TREND", &rule, &indicators).expect("alert");
    assert!(event.message.contains("110.00"));
    assert!(event.message.contains("100.00"));
    assert!(event.message.contains("20-day EMA"));
    assert_eq!(
        event.trigger,
        AlertTrigger::PriceAboveEma {
            price: 110.0,
            ema: 100.0,
            period: 20,
        }
    );
}

#[test]
fn test_ema_gt_does_not_fire_below_or_without_price() {
    let rule = TickerRule::new("TREND", ThresholdType::Ema, 20.0, Comparison::GreaterThan);
    let below = IndicatorResult {
        current_price: Some(95.0),
        ema_current: Some(100.0),
        ..IndicatorResult::default()
    };
    assert!(RuleEvaluator::evaluate("TREND", &rule, &below).is_none());

    let no_price = IndicatorResult {
        current_price: None,
        ema_current: Some(100.0),
        ..IndicatorResult::default()
    };
    assert!(RuleEvaluator::evaluate("TREND", &rule, &no_price).is_none());

    let no_ema = IndicatorResult {
        current_price: Some(110.0),
        ..IndicatorResult::default()
    };
    assert!(RuleEvaluator::evaluate("TREND", &rule, &no_ema).is_none());
}

#[test]
fn test_ema_lt_fires_on_falling_close_and_ema() {
    let rule = TickerRule::new("TREND", ThresholdType::Ema, 20.9, Comparison::LessThan);
    let event = RuleEvaluator::evaluate("TREND", &rule, &trend_indicators()).expect("alert");
    assert_eq!(
        event.message,
        "ALERT: TREND EMA conditions met: Previous close (105.00) > Current close (100.00), \
         Previous 20-day EMA (102.00) > Current 20-day EMA (101.00)!"
    );
}

#[test]
fn test_ema_lt_requires_all_four_inputs() {
    let rule = TickerRule::new("TREND", ThresholdType::Ema, 20.0, Comparison::LessThan);
    let removals: [fn(&mut IndicatorResult); 4] = [
        |i: &mut IndicatorResult| i.prev_day_close = None,
        |i: &mut IndicatorResult| i.current_day_close = None,
        |i: &mut IndicatorResult| i.ema_prev_day = None,
        |i: &mut IndicatorResult| i.ema_current = None,
    ];
    for remove in removals {
        let mut indicators = trend_indicators();
        remove(&mut indicators);
        assert!(RuleEvaluator::evaluate("TREND", &rule, &indicators).is_none());
    }
}

#[test]
fn test_ema_lt_needs_both_declines() {
    let rule = TickerRule::new("TREND", ThresholdType::Ema, 20.0, Comparison::LessThan);

    let rising_close = IndicatorResult {
        current_day_close: Some(106.0),
        ..trend_indicators()
    };
    assert!(RuleEvaluator::evaluate("TREND", &rule, &rising_close).is_none());

    let flat_ema = IndicatorResult {
        ema_prev_day: Some(101.0),
        ..trend_indicators()
    };
    assert!(RuleEvaluator::evaluate("TREND", &rule, &flat_ema).is_none());
}

#[test]
fn test_ema_lt_ignores_current_price() {
    let rule = TickerRule::new("TREND", ThresholdType::Ema, 20.0, Comparison::LessThan);
    let indicators = IndicatorResult {
        current_price: Some(500.0),
        ..trend_indicators()
    };
    assert!(RuleEvaluator::evaluate("TREND", &rule, &indicators).is_some());
}

#[test]
fn test_report_only_never_fires() {
    let rule = TickerRule::report_only("ACME");
    let indicators = IndicatorResult {
        recomputed_pe: Some(1.0),
        recomputed_pb: Some(0.1),
        current_price: Some(110.0),
        ..trend_indicators()
    };
    assert!(RuleEvaluator::evaluate("ACME", &rule, &indicators).is_none());
}

#[test]
fn test_ema_request_follows_rule_kind() {
    let ema_rule = TickerRule::new("A", ThresholdType::Ema, 50.0, Comparison::LessThan);
    assert_eq!(
        RuleEvaluator::ema_request(&ema_rule, 20),
        EmaRequest::with_previous_day(50)
    );

    let pe = TickerRule::new("A", ThresholdType::PriceEarnings, 50.0, Comparison::LessThan);
    assert_eq!(RuleEvaluator::ema_request(&pe, 20), EmaRequest::current_only(20));

    let bad_period = TickerRule::new("A", ThresholdType::Ema, 0.4, Comparison::LessThan);
    assert_eq!(
        RuleEvaluator::ema_request(&bad_period, 30),
        EmaRequest::current_only(30)
    );
}
