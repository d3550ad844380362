//! Tests for the indentation coordinator.

use ezpl::indent::{IndentCoordinator, IndentStyle, MAX_INDENT};
use ezpl::Error;
use std::sync::Arc;
use std::thread;

#[test]
fn test_push_clamps_at_the_bound() {
    let indent = IndentCoordinator::default();
    for _ in 0..MAX_INDENT + 5 {
        indent.push();
    }
    assert_eq!(indent.current_depth(), MAX_INDENT);
    assert!(!indent.push());
}

#[test]
fn test_pop_stops_at_zero() {
    let indent = IndentCoordinator::default();
    assert!(!indent.pop());
    assert_eq!(indent.current_depth(), 0);
    indent.push();
    assert!(indent.pop());
    assert_eq!(indent.current_depth(), 0);
}

#[test]
fn test_scoped_guards_nest_and_unwind() {
    let indent = IndentCoordinator::default();
    for depth in 1..=MAX_INDENT + 3 {
        let mut guards = Vec::new();
        for _ in 0..depth {
            guards.push(indent.scoped());
        }
        assert_eq!(indent.current_depth(), depth.min(MAX_INDENT));
        drop(guards);
        assert_eq!(indent.current_depth(), 0);
    }
}

#[test]
fn test_over_nested_guard_leaves_outer_levels() {
    let indent = IndentCoordinator::default();
    for _ in 0..MAX_INDENT {
        indent.push();
    }
    {
        let _guard = indent.scoped();
        assert_eq!(indent.current_depth(), MAX_INDENT);
    }
    assert_eq!(indent.current_depth(), MAX_INDENT);
}

#[test]
fn test_scoped_pops_when_the_scope_panics() {
    let indent = IndentCoordinator::default();
    let result = std::panic::catch_unwind(|| {
        let _outer = indent.scoped();
        let _inner = indent.scoped();
        panic!("caller failure");
    });
    assert!(result.is_err());
    assert_eq!(indent.current_depth(), 0);
}

#[test]
fn test_scoped_pops_on_early_return() {
    fn nested(indent: &IndentCoordinator, fail: bool) -> Result<usize, &'static str> {
        let _guard = indent.scoped();
        if fail {
            return Err("early");
        }
        Ok(indent.current_depth())
    }

    let indent = IndentCoordinator::default();
    assert_eq!(nested(&indent, false), Ok(1));
    assert_eq!(nested(&indent, true), Err("early"));
    assert_eq!(indent.current_depth(), 0);
}

#[test]
fn test_reset() {
    let indent = IndentCoordinator::default();
    indent.push();
    indent.push();
    indent.reset();
    assert_eq!(indent.current_depth(), 0);
    assert_eq!(indent.render_prefix(), "");
}

#[test]
fn test_default_prefix() {
    let indent = IndentCoordinator::default();
    assert_eq!(indent.render_prefix(), "");
    indent.push();
    assert_eq!(indent.render_prefix(), "~ >>> ");
    indent.push();
    assert_eq!(indent.render_prefix(), "~ >>>>>> ");
}

#[test]
fn test_prefix_grows_by_step() {
    let style = IndentStyle::new(2, "-", "*").unwrap();
    let mut previous = style.prefix(1).len();
    for depth in 2..=MAX_INDENT {
        let len = style.prefix(depth).len();
        assert_eq!(len, previous + 2);
        previous = len;
    }
    assert_eq!(style.prefix(1), "* -- ");
}

#[test]
fn test_prefix_is_deterministic() {
    let style = IndentStyle::default();
    for depth in 0..=MAX_INDENT {
        assert_eq!(style.prefix(depth), style.prefix(depth));
    }
}

#[test]
fn test_invalid_style_is_rejected() {
    assert!(matches!(
        IndentStyle::new(0, ">", "~"),
        Err(Error::Configuration(_))
    ));
    assert!(matches!(
        IndentStyle::new(3, "", "~"),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn test_set_style_changes_the_prefix() {
    let indent = IndentCoordinator::default();
    indent.push();
    indent.set_style(IndentStyle::new(1, "|", "#").unwrap());
    assert_eq!(indent.render_prefix(), "# | ");
    assert_eq!(indent.style().step(), 1);
}

#[test]
fn test_concurrent_push_pop_balance() {
    let indent = Arc::new(IndentCoordinator::default());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let indent = indent.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    let _guard = indent.scoped();
                    assert!(indent.current_depth() <= MAX_INDENT);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(indent.current_depth(), 0);
}
