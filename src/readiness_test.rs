use super::*;
use crate::fake_dom::diagram;

#[test]
fn laid_out_diagram_is_ready_immediately() {
    let gate = ReadinessGate::new(100);
    let d = diagram(300.0, 200.0);
    assert_eq!(gate.check(d.clone()), Readiness::Ready(d));
}

#[test]
fn zero_sized_diagram_asks_for_retry() {
    let gate = ReadinessGate::new(100);
    let d = diagram(0.0, 0.0);
    assert_eq!(gate.check(d.clone()), Readiness::Retry { diagram: d, delay_ms: 100 });
}

#[test]
fn zero_height_alone_is_not_ready() {
    let gate = ReadinessGate::new(50);
    assert!(matches!(gate.check(diagram(300.0, 0.0)), Readiness::Retry { delay_ms: 50, .. }));
}

#[test]
fn recheck_passes_once_laid_out() {
    let gate = ReadinessGate::new(100);
    let d = diagram(0.0, 0.0);
    d.set_size(120.0, 80.0);
    assert_eq!(gate.recheck(d.clone()), Some(d));
}

#[test]
fn recheck_gives_up_when_still_empty() {
    let gate = ReadinessGate::new(100);
    assert!(gate.recheck(diagram(0.0, 0.0)).is_none());
}
