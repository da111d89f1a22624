use kissat_core::{
    config::Config,
    context::Context,
    generic::minimal_pcg::MinimalPCG32,
    reports::Report,
    structures::literal::Literal,
};
use rand::Rng;

fn random_formula(seed: u64, variables: i32, clauses: usize) -> Vec<Vec<i32>> {
    let mut rng = MinimalPCG32::seeded(seed);
    let mut formula = Vec::with_capacity(clauses);
    while formula.len() < clauses {
        let mut clause: Vec<i32> = Vec::default();
        while clause.len() < 3 {
            let literal = rng.random_range(1..=variables) * if rng.random_bool(0.5) { 1 } else { -1 };
            if !clause.iter().any(|other| other.abs() == literal.abs()) {
                clause.push(literal);
            }
        }
        formula.push(clause);
    }
    formula
}

fn snapshot(ctx: &Context) -> Vec<Vec<Literal>> {
    let mut clauses = ctx
        .clauses()
        .map(|(_, literals)| {
            let mut literals = literals.to_vec();
            literals.sort();
            literals
        })
        .collect::<Vec<_>>();
    clauses.sort();
    clauses
}

mod references {
    use super::*;

    #[test]
    fn stable_across_collection() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut config = Config::default();
        config.reduce.value = false;
        config.backbone.value = false;

        let mut ctx = Context::from_config(config);
        for clause in random_formula(7, 60, 256) {
            assert!(ctx.add_clause(&clause).is_ok());
        }
        ctx.set_conflict_limit(300);
        let report = ctx.solve();
        assert!(report.is_ok());

        ctx.collect_garbage();
        let before = snapshot(&ctx);
        let literals = ctx
            .clauses()
            .map(|(reference, literals)| (reference, literals.to_vec()))
            .collect::<Vec<_>>();
        for (reference, expected) in &literals {
            assert_eq!(ctx.clause_literals(*reference), expected.as_slice());
        }

        ctx.reduce();
        let after = snapshot(&ctx);
        assert!(after.len() <= before.len());
        assert!(after.iter().all(|clause| before.binary_search(clause).is_ok()));
        for (reference, literals) in ctx.clauses() {
            assert_eq!(ctx.clause_literals(reference), literals);
        }

        ctx.collect_garbage();
        assert_eq!(snapshot(&ctx), after);
    }

    #[test]
    fn reasons_survive() {
        let formula = random_formula(11, 40, 150);
        let mut ctx = Context::from_config(Config::default());
        for clause in &formula {
            assert!(ctx.add_clause(clause).is_ok());
        }

        if ctx.solve() == Ok(Report::Satisfiable) {
            ctx.collect_garbage();
            for clause in &formula {
                assert!(clause.iter().any(|literal| ctx.value(*literal) == Ok(*literal)));
            }
        }

        assert!(ctx.add_clause(&[1, 2, 3]).is_ok());
        assert!(ctx.solve().is_ok());
    }

    #[test]
    fn valuation_kept_through_reduce() {
        let formula = random_formula(13, 30, 110);
        let mut ctx = Context::from_config(Config::default());
        for clause in &formula {
            assert!(ctx.add_clause(clause).is_ok());
        }

        if ctx.solve() == Ok(Report::Satisfiable) {
            ctx.reduce();
            ctx.collect_garbage();
            assert_eq!(ctx.report(), Report::Satisfiable);
            for clause in &formula {
                assert!(clause.iter().any(|literal| ctx.value(*literal) == Ok(*literal)));
            }
        }
    }

    #[test]
    fn root_collection_shrinks() {
        let mut ctx = Context::from_config(Config::default());
        assert!(ctx.add_clause(&[1, 2, 3, 4]).is_ok());
        assert!(ctx.add_clause(&[1, 5, 6]).is_ok());
        assert_eq!(ctx.clauses().count(), 2);

        assert!(ctx.add_clause(&[-1]).is_ok());
        ctx.collect_garbage();

        let remaining = ctx.clauses().map(|(_, literals)| literals.len()).collect::<Vec<_>>();
        assert_eq!(remaining, vec![3]);
        assert_eq!(ctx.counters().collections, 1);
    }
}
