use areax::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_operand(rng: &mut StdRng) -> Path<f64> {
    let x = rng.random_range(0.0..20.0);
    let y = rng.random_range(0.0..20.0);
    let w = rng.random_range(0.5..6.0);
    let h = rng.random_range(0.5..6.0);
    if rng.random_bool(0.3) {
        Path::ellipse(x, y, w, h)
    } else {
        Path::rectangle(x, y, w, h)
    }
}

fn random_batch(rng: &mut StdRng, len: usize) -> Vec<Option<Operation>> {
    let mut operator = Operator::Add;
    (0..len)
        .map(|_| {
            if rng.random_bool(0.05) {
                return None;
            }
            if rng.random_bool(0.25) {
                operator = Operator::ALL[rng.random_range(0..4)];
            }
            Some(Operation::new(random_operand(rng), operator))
        })
        .collect()
}

#[test]
fn optimizer_matches_sequential_execution() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let flags = [(false, false), (true, false), (false, true), (true, true)];
    for _ in 0..24 {
        let batch = random_batch(&mut rng, 16);
        let expected = SequentialRules.apply(Region::empty(), &batch);
        for (cull, merge) in flags {
            let rules = BoundsRules::new(cull, merge);
            let region = rules.apply(Region::empty(), &batch);
            assert_eq!(region, expected, "cull {} merge {}", cull, merge);
        }
    }
}

#[test]
fn polygonal_batches_are_identical() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..8 {
        let batch = (0..20)
            .map(|_| {
                let x = rng.random_range(0..30) as f64;
                let y = rng.random_range(0..30) as f64;
                let size = rng.random_range(1..8) as f64;
                let operator = if rng.random_bool(0.7) {
                    Operator::Add
                } else {
                    Operator::Subtract
                };
                Some(Operation::new(Path::rectangle(x, y, size, size), operator))
            })
            .collect::<Vec<_>>();
        let expected = SequentialRules.apply(Region::empty(), &batch);
        let optimized = BoundsRules::default().apply(Region::empty(), &batch);
        assert_eq!(optimized, expected);
    }
}

#[test]
fn area_front_end_matches_rules() {
    let mut rng = StdRng::seed_from_u64(42);
    let batch = random_batch(&mut rng, 24);
    let mut area = Area::new();
    for op in batch.iter().cloned() {
        area.push(op);
    }
    let expected = SequentialRules.apply(Region::empty(), &batch);
    assert_eq!(*area.region(), expected);
}
