//! End-to-end timing scenarios for the typewriter and the cursor blinker,
//! driven through the public API on a virtual clock.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use spark_hero::typewriter::Label;
use spark_hero::{
    CursorBlinker, HeroConfig, HeroView, ManualScheduler, Phase, Scheduler, TypewriterConfig,
    TypewriterEngine,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn engine_with(labels: &[&str], t: u64, p: u64, e: u64) -> (Rc<ManualScheduler>, TypewriterEngine) {
    let scheduler = Rc::new(ManualScheduler::new());
    let engine = TypewriterEngine::new(scheduler.clone());
    engine
        .start(TypewriterConfig {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            typing_speed_ms: t,
            pause_duration_ms: p,
            erasing_speed_ms: e,
        })
        .unwrap();
    (scheduler, engine)
}

/// Distinct revealed values in order, collapsing repeats.
fn revealed_trace(scheduler: &ManualScheduler, engine: &TypewriterEngine, ticks: usize) -> Vec<String> {
    let mut trace = vec![engine.revealed()];
    for _ in 0..ticks {
        scheduler.run_next().unwrap();
        let text = engine.revealed();
        if trace.last() != Some(&text) {
            trace.push(text);
        }
    }
    trace
}

#[test]
fn ab_label_reveals_in_order_and_restarts() {
    let (scheduler, engine) = engine_with(&["AB"], 10, 5, 10);

    // 7 ticks per cycle, plus two into the next one.
    let trace = revealed_trace(&scheduler, &engine, 9);
    assert_eq!(trace, vec!["", "A", "AB", "A", "", "A", "AB"]);
    assert_eq!(engine.label_index(), 0);
}

#[test]
fn pause_happens_once_with_no_text_change() {
    let (scheduler, engine) = engine_with(&["AB"], 10, 5, 10);
    scheduler.advance(ms(20));
    assert_eq!(engine.revealed(), "AB");
    assert_eq!(engine.phase(), Phase::Typing);

    // Nothing changes during the pause.
    scheduler.advance(ms(4));
    assert_eq!(engine.revealed(), "AB");
    assert_eq!(engine.phase(), Phase::Typing);

    // Pause ends: Pausing then straight into Erasing at the same instant.
    scheduler.advance(ms(1));
    assert_eq!(engine.revealed(), "AB");
    assert_eq!(engine.phase(), Phase::Erasing);

    scheduler.advance(ms(10));
    assert_eq!(engine.revealed(), "A");
}

#[test]
fn empty_label_never_desynchronizes_index() {
    let (scheduler, engine) = engine_with(&["", "X"], 10, 5, 10);

    assert_eq!(engine.label_index(), 0);
    scheduler.advance(ms(4));
    assert_eq!(engine.label_index(), 0);
    assert_eq!(engine.revealed(), "");

    scheduler.advance(ms(1));
    assert_eq!(engine.label_index(), 1);
    assert_eq!(engine.phase(), Phase::Typing);

    // "X": type 10, pause 5, erase 10, then back to "".
    scheduler.advance(ms(10));
    assert_eq!(engine.revealed(), "X");
    scheduler.advance(ms(15));
    assert_eq!(engine.revealed(), "");
    assert_eq!(engine.label_index(), 0);
}

#[test]
fn full_cycle_takes_exact_time() {
    let (t, p, e) = (7, 30, 3);
    let labels = ["hello", "ab"];
    let (scheduler, engine) = engine_with(&labels, t, p, e);

    let cycle = |m: u64| ms(m * t + p + m * e);

    while engine.label_index() == 0 {
        scheduler.run_next().unwrap();
    }
    assert_eq!(scheduler.now(), cycle(5));

    while engine.label_index() == 1 {
        scheduler.run_next().unwrap();
    }
    assert_eq!(scheduler.now(), cycle(5) + cycle(2));
}

#[test]
fn revealed_is_always_a_prefix_of_current_label() {
    let labels = ["Tech Enthusiast", "", "naïve café", "🦀 crab", "x"];
    let (scheduler, engine) = engine_with(&labels, 2, 3, 1);
    let parsed: Vec<Label> = labels.iter().map(|l| Label::new(*l)).collect();

    for _ in 0..2_000 {
        scheduler.run_next().unwrap();
        let label = &parsed[engine.label_index()];
        let revealed = engine.revealed();
        let len = engine.state().unwrap().revealed_len;

        assert!(len <= label.len());
        assert_eq!(revealed, label.prefix(len));
        assert!(label.as_str().starts_with(&revealed));
        assert_eq!(scheduler.pending(), 1);
    }
}

#[test]
fn no_stray_callback_after_stop_or_reconfigure() {
    let (scheduler, engine) = engine_with(&["Hello", "World"], 10, 5, 10);
    scheduler.advance(ms(33));

    for labels in [["a", "b"], ["c", "d"], ["e", "f"]] {
        engine.set_labels(labels).unwrap();
        assert_eq!(scheduler.pending(), 1);
    }
    engine.set_pause_duration_ms(1).unwrap();
    assert_eq!(scheduler.pending(), 1);

    engine.stop();
    assert_eq!(scheduler.pending(), 0);

    let fired = scheduler.fired();
    scheduler.advance(ms(10_000));
    assert_eq!(scheduler.fired(), fired);
}

#[test]
fn blinker_period_is_independent_of_typing() {
    let scheduler = Rc::new(ManualScheduler::new());
    let engine = TypewriterEngine::new(scheduler.clone());
    let blinker = CursorBlinker::new(scheduler.clone());
    engine.start(TypewriterConfig::with_labels(["abcdef"])).unwrap();
    blinker.start(530).unwrap();

    let mut toggles = Vec::new();
    let mut last = blinker.visible();
    for step in 1..=2_120 {
        scheduler.advance(ms(1));
        if blinker.visible() != last {
            last = blinker.visible();
            toggles.push(step);
        }
    }
    assert_eq!(toggles, vec![530, 1060, 1590, 2120]);
}

#[test]
fn hero_view_renders_every_change() {
    let scheduler = Rc::new(ManualScheduler::new());
    let config = HeroConfig {
        labels: vec!["AB".to_string()],
        typing_speed_ms: 10,
        pause_duration_ms: 5,
        erasing_speed_ms: 10,
        cursor_blink_period_ms: 1_000,
        ..HeroConfig::default()
    };
    let mut hero = HeroView::new(scheduler.clone(), config).unwrap();

    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = lines.clone();
    hero.mount(move |frame| sink.borrow_mut().push(frame.line()))
        .unwrap();

    scheduler.advance(ms(45));
    hero.unmount();

    let mut lines = lines.borrow().clone();
    lines.dedup();
    assert_eq!(
        lines,
        vec![
            "Hi I'm Prabhas |",
            "Hi I'm Prabhas A|",
            "Hi I'm Prabhas AB|",
            "Hi I'm Prabhas A|",
            "Hi I'm Prabhas |",
        ]
    );
}
