use kissat_core::{
    config::Config,
    context::Context,
    procedures::add::ClauseOk,
    reports::Report,
    types::err::{ErrorKind, StateError},
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

mod scenarios {

    use super::*;

    #[test]
    fn forced_then_contradicted() {
        init_logger();
        let mut ctx = Context::from_config(Config::default());

        assert_eq!(Ok(ClauseOk::Added), ctx.add_clause(&[1, 2]));
        assert_eq!(Ok(ClauseOk::Added), ctx.add_clause(&[-1, 2]));
        assert!(ctx.add_clause(&[-2]).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.report().code(), 20);
    }

    #[test]
    fn forced_by_units() {
        let mut ctx = Context::from_config(Config::default());

        assert!(ctx.add_clause(&[1, 2, 3]).is_ok());
        assert!(ctx.add_clause(&[-1]).is_ok());
        assert!(ctx.add_clause(&[-2]).is_ok());
        assert_eq!(ctx.fixed(3), Ok(1));

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert!(ctx.value(3).unwrap() > 0);
        assert_eq!(ctx.report().code(), 10);
    }

    #[test]
    fn inconsistent_without_solve() {
        let mut ctx = Context::from_config(Config::default());

        assert!(ctx.add_clause(&[1]).is_ok());
        assert!(!ctx.is_inconsistent());

        assert!(ctx.add_clause(&[-1]).is_ok());
        assert!(ctx.is_inconsistent());
        assert_eq!(ctx.report(), Report::Unknown);
    }

    #[test]
    fn pigeonhole() {
        let mut ctx = Context::from_config(Config::default());

        // Pigeon i in hole h.
        let p = |i: i32, h: i32| 2 * i + h + 1;
        for i in 0..3 {
            assert!(ctx.add_clause(&[p(i, 0), p(i, 1)]).is_ok());
        }
        for h in 0..2 {
            for i in 0..3 {
                for j in i + 1..3 {
                    assert!(ctx.add_clause(&[-p(i, h), -p(j, h)]).is_ok());
                }
            }
        }

        ctx.set_conflict_limit(100);
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert!(ctx.counters().conflicts <= 100);
    }

    #[test]
    fn failed_assumption_then_satisfiable() {
        let mut ctx = Context::from_config(Config::default());

        assert!(ctx.add_clause(&[-1, 2]).is_ok());
        assert!(ctx.add_clause(&[-2, 3]).is_ok());
        assert!(ctx.add_clause(&[-3, -1]).is_ok());

        assert!(ctx.assume(1).is_ok());
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.failed(1), Ok(true));
        assert!(!ctx.is_inconsistent());

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.value(1), Ok(-1));
    }
}

mod api {

    use super::*;

    #[test]
    fn streaming_literals() {
        let mut ctx = Context::from_config(Config::default());
        for literal in [1, -2, 0, 2, 3, 0, -3, 0] {
            assert!(ctx.add(literal).is_ok());
        }

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.value(1), Ok(1));
        assert_eq!(ctx.value(2), Ok(2));
        assert_eq!(ctx.value(-3), Ok(-3));
        assert_eq!(ctx.value(3), Ok(-3));
    }

    #[test]
    fn duplicates_and_tautologies() {
        let mut ctx = Context::from_config(Config::default());

        assert_eq!(ctx.add_clause(&[1, 1, 2, 2]), Ok(ClauseOk::Added));
        assert_eq!(ctx.add_clause(&[3, -3]), Ok(ClauseOk::Tautology));
        assert_eq!(ctx.variables(), 3);

        assert_eq!(ctx.add_clause(&[-2]), Ok(ClauseOk::Added));
        assert_eq!(ctx.add_clause(&[1, 4, 5]), Ok(ClauseOk::Satisfied));
        assert_eq!(ctx.clauses().count(), 0);
    }

    #[test]
    fn values_require_satisfiable() {
        let mut ctx = Context::from_config(Config::default());
        assert!(ctx.add_clause(&[1, 2]).is_ok());

        assert_eq!(ctx.value(1), Err(ErrorKind::State(StateError::NotSatisfiable)));
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert!(ctx.value(1).is_ok());
        assert_eq!(ctx.value(0), Err(ErrorKind::InvalidLiteral(0)));
        assert_eq!(ctx.value(7), Ok(0));

        assert!(ctx.add_clause(&[3]).is_ok());
        assert_eq!(ctx.value(1), Err(ErrorKind::State(StateError::NotSatisfiable)));
    }

    #[test]
    fn reserve() {
        let mut ctx = Context::from_config(Config::default());
        assert!(ctx.reserve(10).is_ok());
        assert_eq!(ctx.variables(), 10);

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        for variable in 1..=10 {
            assert_ne!(ctx.value(variable), Ok(0));
        }
    }
}
