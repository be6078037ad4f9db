use deopt_de::{Crossover, DiffCount, Selection, Variant};

#[test]
fn test_parse_variants() {
    let v: Variant = "best/1/exp".parse().unwrap();
    assert_eq!(v.selection, Selection::Best);
    assert_eq!(v.diff_count, DiffCount::One);
    assert_eq!(v.crossover, Crossover::Exponential);

    let v: Variant = "RAND/2/BIN".parse().unwrap();
    assert_eq!(v.selection, Selection::Rand);
    assert_eq!(v.diff_count, DiffCount::Two);
    assert_eq!(v.crossover, Crossover::Binomial);
    assert_eq!(v.to_string(), "rand/2/bin");

    assert_eq!("rand1bin".parse::<Variant>().unwrap(), "rand/1/bin".parse().unwrap());
}

#[test]
fn test_reject_unknown_variants() {
    for bad in ["", "best", "best/1", "best/3/bin", "worst/1/bin", "best/1/uni", "best/1/bin/x"] {
        assert!(bad.parse::<Variant>().is_err(), "{bad:?} should not parse");
    }
}

#[test]
fn test_minimum_population() {
    assert_eq!("best/1/bin".parse::<Variant>().unwrap().min_population(), 4);
    assert_eq!("rand/2/exp".parse::<Variant>().unwrap().min_population(), 6);
}
