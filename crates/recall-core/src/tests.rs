#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::*;

    type Log = Rc<RefCell<Vec<String>>>;

    fn log_handle() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn drain(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.borrow_mut())
    }

    struct Pair {
        a: (i32, SetState<i32>),
        b: (i32, SetState<i32>),
    }

    impl Instance for Pair {
        fn render(&self) {}
    }

    fn pair() -> Pair {
        Pair {
            a: use_state(10),
            b: use_state(20),
        }
    }

    #[test]
    fn test_state_slots_are_stable() {
        let mut rt = Runtime::new();
        for round in 0..5 {
            let p = rt.render(pair).unwrap();
            assert_eq!(p.a.1.index(), 0);
            assert_eq!(p.b.1.index(), 1);
            assert_eq!(p.a.0, 10 + round);
            assert_eq!(p.b.0, 20);
            p.a.1.update(|v| v + 1);
        }
        assert_eq!(rt.slot_counts().state, 2);
    }

    #[test]
    fn test_cursors_reset_after_render() {
        let mut rt = Runtime::new();
        let seen = Rc::new(RefCell::new(None));
        {
            let seen = seen.clone();
            rt.render(move || {
                use_state(1);
                use_effect(|| {}, deps![]);
                use_memo(|| 0, deps![]);
                *seen.borrow_mut() = Some(crate::runtime::current_store("test").borrow().cursors());
            })
            .unwrap();
        }
        assert_eq!(
            *seen.borrow(),
            Some(HookCounts {
                state: 1,
                effect: 1,
                memo: 1
            })
        );
        assert!(rt.cursors().is_zero());
        assert!(!is_rendering());
    }

    #[test]
    fn test_set_value_equal_to_captured_is_noop() {
        let mut rt = Runtime::new();
        let p = rt.render(pair).unwrap();
        p.a.1.set(10);
        let p = rt.render(pair).unwrap();
        assert_eq!(p.a.0, 10);
    }

    #[test]
    fn test_set_value_compares_against_captured_value() {
        let mut rt = Runtime::new();
        let p = rt.render(pair).unwrap();
        p.a.1.set(11);
        // captured value is still 10, so this write is skipped
        p.a.1.set(10);
        let p = rt.render(pair).unwrap();
        assert_eq!(p.a.0, 11);
    }

    #[test]
    fn test_update_always_applies() {
        let mut rt = Runtime::new();
        let p = rt.render(pair).unwrap();
        p.a.1.update(|v| v + 5);
        // function path uses the captured value, not the slot's latest one
        p.a.1.update(|v| v + 1);
        let p = rt.render(pair).unwrap();
        assert_eq!(p.a.0, 11);

        p.b.1.update(|v| *v);
        let p = rt.render(pair).unwrap();
        assert_eq!(p.b.0, 20);
    }

    impl Instance for SetState<Rc<i32>> {
        fn render(&self) {}
    }

    #[test]
    fn test_update_writes_even_when_equal() {
        let mut rt = Runtime::new();
        let component = || use_state(Rc::new(1)).1;
        let set = rt.render(component).unwrap();
        let before = set.captured().clone();
        set.update(|v| Rc::new(**v));
        let set = rt.render(component).unwrap();
        assert_eq!(**set.captured(), 1);
        // a new allocation was stored even though the contents are equal
        assert!(!Rc::ptr_eq(&before, set.captured()));
    }

    #[test]
    fn test_effect_fires_on_dependency_change() {
        let mut rt = Runtime::new();
        let log = log_handle();
        let mut fired = Vec::new();
        for x in [1, 1, 2, 2] {
            let l = log.clone();
            rt.render(move || {
                use_effect(move || l.borrow_mut().push(format!("x={x}")), deps![x]);
            })
            .unwrap();
            fired.push(!drain(&log).is_empty());
        }
        assert_eq!(fired, vec![true, false, true, false]);
    }

    #[test]
    fn test_effects_track_their_own_history() {
        let mut rt = Runtime::new();
        let log = log_handle();
        for (a, b) in [(1, 1), (2, 1), (2, 2)] {
            let log = log.clone();
            rt.render(move || {
                let l = log.clone();
                use_effect(move || l.borrow_mut().push(format!("a={a}")), deps![a]);
                use_effect(move || log.borrow_mut().push(format!("b={b}")), deps![b]);
            })
            .unwrap();
        }
        assert_eq!(*log.borrow(), vec!["a=1", "b=1", "a=2", "b=2"]);
    }

    #[test]
    fn test_empty_deps_fire_once() {
        let mut rt = Runtime::new();
        let count = Rc::new(RefCell::new(0));
        for _ in 0..3 {
            let count = count.clone();
            rt.render(move || use_effect(move || *count.borrow_mut() += 1, deps![]))
                .unwrap();
        }
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_dependency_length_change_fires() {
        let mut rt = Runtime::new();
        let count = Rc::new(RefCell::new(0));
        for extra in [false, false, true] {
            let count = count.clone();
            rt.render(move || {
                let mut d = deps![1];
                if extra {
                    d = d.with(2);
                }
                use_effect(move || *count.borrow_mut() += 1, d);
            })
            .unwrap();
        }
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_nan_and_signed_zero_dependencies() {
        let mut rt = Runtime::new();
        let count = Rc::new(RefCell::new(0));
        for x in [f64::NAN, f64::NAN, 0.0, -0.0] {
            let count = count.clone();
            rt.render(move || use_effect(move || *count.borrow_mut() += 1, deps![x]))
                .unwrap();
        }
        // NaN -> NaN is unchanged, 0.0 -> -0.0 is a change
        assert_eq!(*count.borrow(), 3);
    }

    #[test]
    fn test_memo_recomputes_only_on_change() {
        let mut rt = Runtime::new();
        let computed = Rc::new(RefCell::new(Vec::new()));
        let mut results = Vec::new();
        for x in [1, 1, 3, 3, 1] {
            let computed = computed.clone();
            let value = rt
                .render(move || {
                    use_memo(
                        move || {
                            computed.borrow_mut().push(x);
                            x * 2
                        },
                        deps![x],
                    )
                })
                .unwrap();
            results.push(value);
        }
        assert_eq!(results, vec![2, 2, 6, 6, 2]);
        assert_eq!(*computed.borrow(), vec![1, 3, 1]);
    }

    impl Instance for i32 {
        fn render(&self) {}
    }

    struct Shared(Rc<Vec<i32>>);

    impl Instance for Shared {
        fn render(&self) {}
    }

    #[test]
    fn test_memo_returns_same_reference() {
        let mut rt = Runtime::new();
        let component = |n: usize| move || Shared(use_memo(|| Rc::new(vec![0; n]), deps![n]));
        let first = rt.render(component(3)).unwrap();
        let second = rt.render(component(3)).unwrap();
        assert!(Rc::ptr_eq(&first.0, &second.0));
        let third = rt.render(component(4)).unwrap();
        assert!(!Rc::ptr_eq(&second.0, &third.0));
    }

    #[test]
    fn test_memo_output_stabilizes_downstream_effect() {
        let mut rt = Runtime::new();
        let fired = Rc::new(RefCell::new(0));
        for x in [1, 1, 2] {
            let fired = fired.clone();
            rt.render(move || {
                let v = use_memo(|| Rc::new(x), deps![x]);
                use_effect(move || *fired.borrow_mut() += 1, deps![v]);
            })
            .unwrap();
        }
        assert_eq!(*fired.borrow(), 2);
    }

    #[test]
    fn test_setter_inside_effect() {
        let mut rt = Runtime::new();
        let component = || {
            let (v, set) = use_state(0);
            use_effect(move || set.set(42), deps![]);
            v
        };
        assert_eq!(rt.render(component).unwrap(), 0);
        assert_eq!(rt.render(component).unwrap(), 42);
    }

    #[test]
    fn test_hook_inside_memo_is_reported_as_count_drift() {
        // the nested hook only runs when the outer memo recomputes
        let component = |x: i32| move || use_memo(|| use_memo(|| 100, deps![]) + x, deps![x]);

        let mut rt =
            Runtime::with_config(RuntimeConfig::new().hook_count_check(HookCountCheck::Error));
        assert_eq!(rt.render(component(1)).unwrap(), 101);
        assert_eq!(
            rt.render(component(1)).unwrap_err(),
            RenderError::HookCountMismatch {
                component: "component".into(),
                kind: HookKind::Memo,
                expected: 2,
                found: 1,
            }
        );
        assert!(rt.cursors().is_zero());
    }

    #[test]
    fn test_stats_report_firings() {
        let mut rt = Runtime::new();
        let component = |x: i32| {
            move || {
                use_state(0);
                use_effect(|| {}, deps![x]);
                use_memo(|| x, deps![x]);
            }
        };
        rt.render(component(1)).unwrap();
        rt.render(component(1)).unwrap();
        let stats = rt.last_stats().unwrap();
        assert_eq!(stats.render, 2);
        assert_eq!(stats.effects_fired, 0);
        assert_eq!(stats.memos_computed, 0);
        assert_eq!(
            stats.hooks,
            HookCounts {
                state: 1,
                effect: 1,
                memo: 1
            }
        );
        rt.render(component(2)).unwrap();
        let stats = rt.last_stats().unwrap();
        assert_eq!((stats.effects_fired, stats.memos_computed), (1, 1));
        assert_eq!(rt.renders(), 3);
    }

    #[test]
    fn test_hook_count_mismatch_is_reported() {
        let mut rt = Runtime::with_config(
            RuntimeConfig::new()
                .name("flaky")
                .hook_count_check(HookCountCheck::Error),
        );
        rt.render(|| {
            use_state(1);
        })
        .unwrap();
        let err = rt
            .render(|| {
                use_state(1);
                use_state(2);
            })
            .unwrap_err();
        assert_eq!(
            err,
            RenderError::HookCountMismatch {
                component: "flaky".into(),
                kind: HookKind::State,
                expected: 1,
                found: 2,
            }
        );
        assert!(rt.cursors().is_zero());
    }

    #[test]
    fn test_hook_count_mismatch_can_be_tolerated() {
        let mut rt = Runtime::with_config(RuntimeConfig::new().hook_count_check(HookCountCheck::Warn));
        rt.render(|| {
            use_state(1);
        })
        .unwrap();
        assert!(
            rt.render(|| {
                use_state(1);
                use_state(2);
            })
            .is_ok()
        );
    }

    impl Instance for RenderError {
        fn render(&self) {}
    }

    #[test]
    fn test_nested_render_is_rejected() {
        let mut outer = Runtime::new();
        let err = outer
            .render(|| {
                let mut inner = Runtime::with_config(RuntimeConfig::new().name("inner"));
                inner.render(|| ()).unwrap_err()
            })
            .unwrap();
        assert_eq!(
            err,
            RenderError::NestedRender {
                component: "inner".into()
            }
        );
    }

    #[test]
    fn test_setter_after_runtime_dropped_is_ignored() {
        let mut rt = Runtime::new();
        let p = rt.render(pair).unwrap();
        drop(rt);
        p.a.1.set(99);
        p.b.1.update(|v| v + 1);
    }

    #[test]
    #[should_panic(expected = "use_state called outside of a render pass")]
    fn test_hook_outside_render_panics() {
        use_state(0);
    }

    #[test]
    fn test_panicking_component_leaves_runtime_usable() {
        let mut rt = Runtime::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            rt.render(|| -> () {
                use_state(1);
                panic!("boom");
            })
        }));
        assert!(result.is_err());
        assert!(!is_rendering());
        assert!(rt.cursors().is_zero());
        let p = rt.render(pair).unwrap();
        assert_eq!(p.a.0, 1);
    }

    struct App {
        count: i32,
        text: String,
        set_count: SetState<i32>,
        set_text: SetState<String>,
        log: Log,
    }

    impl Instance for App {
        fn render(&self) {
            self.log
                .borrow_mut()
                .push(format!("render {} {}", self.count, self.text));
        }
    }

    impl App {
        fn click(&self) {
            self.set_count.set(self.count + 1);
        }

        fn plus(&self) {
            self.set_count.update(|c| c + 1);
        }

        fn type_text(&self, word: &str) {
            self.set_text.set(word.to_string());
        }
    }

    fn app(log: &Log) -> impl FnOnce() -> App + '_ {
        move || {
            let (count, set_count) = use_state(1);
            let (text, set_text) = use_state("apple".to_string());

            let l = log.clone();
            use_effect(move || l.borrow_mut().push("count".into()), deps![count]);
            let l = log.clone();
            use_effect(move || l.borrow_mut().push("text".into()), deps![text.clone()]);
            let computed = use_memo(|| count * 2, deps![count]);
            let l = log.clone();
            use_effect(move || l.borrow_mut().push("computed".into()), deps![computed]);

            App {
                count,
                text,
                set_count,
                set_text,
                log: log.clone(),
            }
        }
    }

    #[test]
    fn test_counter_scenario() {
        let mut rt = Runtime::new();
        let log = log_handle();

        let a = rt.render(app(&log)).unwrap();
        assert_eq!(drain(&log), vec!["count", "text", "computed", "render 1 apple"]);

        a.click();
        let a = rt.render(app(&log)).unwrap();
        assert_eq!(drain(&log), vec!["count", "computed", "render 2 apple"]);

        a.type_text("pear");
        let a = rt.render(app(&log)).unwrap();
        assert_eq!(drain(&log), vec!["text", "render 2 pear"]);

        a.plus();
        let a = rt.render(app(&log)).unwrap();
        assert_eq!(drain(&log), vec!["count", "computed", "render 3 pear"]);
        assert_eq!((a.count, a.text.as_str()), (3, "pear"));
    }
}
