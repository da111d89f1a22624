use kissat_core::{
    kitten::{Kitten, KittenStatus},
    structures::{literal::Literal, value::Value},
};

fn lit(external: i32) -> Literal {
    Literal::from_external(external).unwrap()
}

fn clause(externals: &[i32]) -> Vec<Literal> {
    externals.iter().map(|external| lit(*external)).collect()
}

/// Three pigeons in two holes, followed by clauses over unrelated variables.
fn pigeons_and_noise() -> Vec<Vec<Literal>> {
    let p = |i: i32, h: i32| 2 * i + h + 1;
    let mut clauses = Vec::default();
    for i in 0..3 {
        clauses.push(clause(&[p(i, 0), p(i, 1)]));
    }
    for h in 0..2 {
        for i in 0..3 {
            for j in i + 1..3 {
                clauses.push(clause(&[-p(i, h), -p(j, h)]));
            }
        }
    }
    clauses.push(clause(&[10, 11, 12]));
    clauses.push(clause(&[-10, 11]));
    clauses.push(clause(&[-11, -12, 13]));
    clauses
}

const PIGEON_CLAUSES: u32 = 9;

mod clausal_core {
    use super::*;

    #[test]
    fn subset_of_originals() {
        let _ = env_logger::builder().is_test(true).try_init();
        let clauses = pigeons_and_noise();

        let mut kitten = Kitten::default();
        kitten.track_antecedents().unwrap();
        for (id, literals) in clauses.iter().enumerate() {
            kitten.clause_with_id(id as u32, literals).unwrap();
        }
        assert_eq!(kitten.solve(), KittenStatus::Unsatisfiable);

        let counts = kitten.compute_clausal_core().unwrap();
        assert_eq!(kitten.status(), KittenStatus::Core);
        assert!(counts.original > 0);

        let mut ids = Vec::default();
        kitten.traverse_core_ids(|id| ids.push(id.unwrap())).unwrap();
        assert_eq!(ids.len(), counts.original);
        assert!(ids.iter().all(|id| *id < PIGEON_CLAUSES));

        let mut original = Vec::default();
        kitten
            .traverse_core_clauses(|learned, literals| {
                if !learned {
                    original.push(literals.to_vec());
                }
            })
            .unwrap();
        assert!(original.iter().all(|literals| clauses.contains(literals)));

        let mut fresh = Kitten::default();
        for literals in &original {
            fresh.clause(literals).unwrap();
        }
        assert_eq!(fresh.solve(), KittenStatus::Unsatisfiable);
    }

    #[test]
    fn shrink_and_solve_again() {
        let mut kitten = Kitten::default();
        kitten.track_antecedents().unwrap();
        for (id, literals) in pigeons_and_noise().iter().enumerate() {
            kitten.clause_with_id(id as u32, literals).unwrap();
        }
        assert_eq!(kitten.solve(), KittenStatus::Unsatisfiable);
        kitten.compute_clausal_core().unwrap();
        kitten.shrink_to_clausal_core().unwrap();
        assert_eq!(kitten.status(), KittenStatus::Unknown);

        assert_eq!(kitten.solve(), KittenStatus::Unsatisfiable);
    }

    #[test]
    fn requires_tracking() {
        let mut kitten = Kitten::default();
        kitten.clause(&clause(&[1])).unwrap();
        kitten.clause(&clause(&[-1])).unwrap();
        assert_eq!(kitten.solve(), KittenStatus::Unsatisfiable);
        assert!(kitten.compute_clausal_core().is_err());
    }
}

mod clear {
    use super::*;

    #[test]
    fn idempotent() {
        let mut kitten = Kitten::default();
        for literals in pigeons_and_noise() {
            kitten.clause(&literals).unwrap();
        }
        assert_eq!(kitten.solve(), KittenStatus::Unsatisfiable);

        kitten.clear();
        let once = (kitten.status(), kitten.variables());
        kitten.clear();
        assert_eq!(once, (kitten.status(), kitten.variables()));
        assert_eq!(once, (KittenStatus::Unknown, 0));

        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);
        assert_eq!(kitten.value(lit(1)), Ok(Value::Unassigned));
    }

    #[test]
    fn reuse_after_clear() {
        let mut kitten = Kitten::default();
        kitten.track_antecedents().unwrap();
        kitten.clause(&clause(&[1, 2])).unwrap();
        kitten.clause(&clause(&[-1, 2])).unwrap();
        kitten.assume(lit(-2));
        assert_eq!(kitten.solve(), KittenStatus::Unsatisfiable);
        assert_eq!(kitten.failed(lit(-2)), Ok(true));

        kitten.clear();
        kitten.clear();
        kitten.track_antecedents().unwrap();
        kitten.clause(&clause(&[1, 2])).unwrap();
        kitten.assume(lit(-2));
        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);
        assert_eq!(kitten.value(lit(1)), Ok(Value::True));
    }
}

mod flips {
    use super::*;

    #[test]
    fn free_and_forced() {
        let mut kitten = Kitten::default();
        kitten.clause(&clause(&[1, 2])).unwrap();
        kitten.clause(&clause(&[-1, 2])).unwrap();
        kitten.clause(&clause(&[3, 4])).unwrap();
        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);

        assert_eq!(kitten.value(lit(2)), Ok(Value::True));
        assert_eq!(kitten.flip_literal(lit(2)), Ok(false));
        assert_eq!(kitten.value(lit(2)), Ok(Value::True));

        let one = match kitten.value(lit(1)).unwrap() {
            Value::True => lit(1),
            _ => lit(-1),
        };
        assert_eq!(kitten.flip_literal(one), Ok(true));
        assert_eq!(kitten.value(one), Ok(Value::False));
    }
}

mod incremental {
    use super::*;

    #[test]
    fn clause_falsified_at_the_root() {
        let mut kitten = Kitten::default();
        kitten.unit(lit(-1)).unwrap();
        kitten.unit(lit(-2)).unwrap();
        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);

        kitten.clause(&clause(&[1, 2, 3])).unwrap();
        assert_eq!(kitten.fixed(lit(3)), Value::True);
        kitten.clause(&clause(&[-3, 4])).unwrap();
        kitten.flip_phases();

        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);
        assert_eq!(kitten.value(lit(1)), Ok(Value::False));
        assert_eq!(kitten.value(lit(2)), Ok(Value::False));
        assert_eq!(kitten.value(lit(3)), Ok(Value::True));
        assert_eq!(kitten.value(lit(4)), Ok(Value::True));
    }

    #[test]
    fn clause_falsified_at_the_root_in_the_core() {
        let mut kitten = Kitten::default();
        kitten.track_antecedents().unwrap();
        kitten.clause_with_id(0, &clause(&[-1])).unwrap();
        kitten.clause_with_id(1, &clause(&[-2])).unwrap();
        kitten.clause_with_id(2, &clause(&[5, 6])).unwrap();
        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);

        kitten.clause_with_id(3, &clause(&[1, 2])).unwrap();
        assert_eq!(kitten.solve(), KittenStatus::Unsatisfiable);

        kitten.compute_clausal_core().unwrap();
        let mut ids = Vec::default();
        kitten.traverse_core_ids(|id| ids.push(id.unwrap())).unwrap();
        assert_eq!(ids, vec![0, 1, 3]);
    }

    #[test]
    fn clause_added_during_search() {
        let mut kitten = Kitten::default();
        kitten.clause(&clause(&[1, 2])).unwrap();
        kitten.assume(lit(1));
        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);

        kitten.unit(lit(-1)).unwrap();
        kitten.clause(&clause(&[1, -2, 3])).unwrap();
        assert_eq!(kitten.solve(), KittenStatus::Satisfiable);
        assert_eq!(kitten.value(lit(2)), Ok(Value::True));
        assert_eq!(kitten.value(lit(3)), Ok(Value::True));
    }
}
