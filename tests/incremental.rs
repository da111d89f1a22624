use std::{cell::RefCell, rc::Rc};

use kissat_core::{
    config::Config,
    context::Context,
    reports::Report,
    structures::literal::Literal,
};

/// The clauses of `pigeons` pigeons in one hole fewer.
fn pigeonhole(ctx: &mut Context, pigeons: i32) {
    let holes = pigeons - 1;
    let p = |i: i32, h: i32| holes * i + h + 1;
    for i in 0..pigeons {
        let clause = (0..holes).map(|h| p(i, h)).collect::<Vec<_>>();
        assert!(ctx.add_clause(&clause).is_ok());
    }
    for h in 0..holes {
        for i in 0..pigeons {
            for j in i + 1..pigeons {
                assert!(ctx.add_clause(&[-p(i, h), -p(j, h)]).is_ok());
            }
        }
    }
}

mod assumptions {
    use super::*;

    #[test]
    fn chain() {
        let mut ctx = Context::from_config(Config::default());
        for i in 1..10 {
            assert!(ctx.add_clause(&[-i, i + 1]).is_ok());
        }

        assert!(ctx.assume(1).is_ok());
        assert!(ctx.assume(-10).is_ok());
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.failed(1), Ok(true));
        assert_eq!(ctx.failed(-10), Ok(true));
        assert!(!ctx.is_inconsistent());

        assert!(ctx.assume(1).is_ok());
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        for i in 1..=10 {
            assert_eq!(ctx.value(i), Ok(i));
        }

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert!(ctx.add_clause(&[-5]).is_ok());
        assert_eq!(ctx.fixed(1), Ok(-1));
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.value(1), Ok(-1));
    }

    #[test]
    fn clashing() {
        let mut ctx = Context::from_config(Config::default());
        assert!(ctx.add_clause(&[1, 2]).is_ok());
        assert!(ctx.assume(2).is_ok());
        assert!(ctx.assume(-2).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.failed(-2), Ok(true));
        assert_eq!(ctx.failed(2), Ok(true));
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
    }
}

mod limits {
    use super::*;

    #[test]
    fn conflicts_then_complete() {
        let mut ctx = Context::from_config(Config::default());
        pigeonhole(&mut ctx, 6);

        ctx.set_conflict_limit(10);
        assert_eq!(ctx.solve(), Ok(Report::Unknown));
        assert_eq!(ctx.report().code(), 0);
        assert!(ctx.counters().conflicts >= 10);

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn decisions() {
        let mut ctx = Context::from_config(Config::default());
        pigeonhole(&mut ctx, 4);

        ctx.set_decision_limit(0);
        assert_eq!(ctx.solve(), Ok(Report::Unknown));
        assert_eq!(ctx.counters().decisions, 0);
    }

    #[test]
    fn ticks() {
        let mut ctx = Context::from_config(Config::default());
        pigeonhole(&mut ctx, 6);

        ctx.set_ticks_limit(100);
        assert_eq!(ctx.solve(), Ok(Report::Unknown));
    }

    #[test]
    fn terminate() {
        let mut ctx = Context::from_config(Config::default());
        pigeonhole(&mut ctx, 4);

        let calls = Rc::new(RefCell::new(0));
        let counted = calls.clone();
        ctx.set_callback_terminate(Box::new(move || {
            *counted.borrow_mut() += 1;
            true
        }));
        assert_eq!(ctx.solve(), Ok(Report::Unknown));
        assert_eq!(*calls.borrow(), 1);

        ctx.set_callback_terminate(Box::new(|| false));
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
    }
}

mod proof {
    use super::*;

    type Clauses = Rc<RefCell<Vec<Vec<i32>>>>;

    fn recorder(clauses: &Clauses) -> Box<dyn FnMut(&[Literal])> {
        let clauses = clauses.clone();
        Box::new(move |literals: &[Literal]| {
            let external = literals.iter().map(|literal| literal.as_external()).collect();
            clauses.borrow_mut().push(external);
        })
    }

    #[test]
    fn callbacks() {
        let original = Clauses::default();
        let added = Clauses::default();
        let deleted = Clauses::default();

        let mut config = Config::default();
        config.checker.value = true;
        let mut ctx = Context::from_config(config);
        ctx.set_callback_original(recorder(&original));
        ctx.set_callback_addition(recorder(&added));
        ctx.set_callback_delete(recorder(&deleted));

        pigeonhole(&mut ctx, 4);
        assert_eq!(original.borrow().len(), 4 + 3 * 6);

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert_eq!(added.borrow().last(), Some(&Vec::default()));
        assert!(added.borrow().len() as u64 >= ctx.counters().learned);
    }

    #[test]
    fn shortened_on_entry() {
        let added = Clauses::default();
        let deleted = Clauses::default();

        let mut ctx = Context::from_config(Config::default());
        ctx.set_callback_addition(recorder(&added));
        ctx.set_callback_delete(recorder(&deleted));

        assert!(ctx.add_clause(&[-1]).is_ok());
        assert!(ctx.add_clause(&[1, 2, 3]).is_ok());
        assert_eq!(*added.borrow(), vec![vec![2, 3]]);
        assert_eq!(*deleted.borrow(), vec![vec![1, 2, 3]]);

        assert!(ctx.add_clause(&[-1, 4]).is_ok());
        assert_eq!(deleted.borrow().last(), Some(&vec![-1, 4]));
    }

    #[test]
    fn checked_with_busy_schedule() {
        let mut config = Config::default();
        config.checker.value = true;
        config.mode_init.value = 10;
        config.reduce_interval.value = 10;
        config.rephase_interval.value = 5;
        config.backbone_interval.value = 20;

        let mut ctx = Context::from_config(config);
        pigeonhole(&mut ctx, 6);
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert!(ctx.counters().reductions > 0);
        assert!(ctx.counters().switches > 0);
    }
}
