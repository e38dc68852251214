use itertools::iproduct;
use paulimer::{PauliAlgebraError, PauliRegister};
use proptest::prelude::*;
use quantum_core::{x, y, z, All, PauliLabel, Phase};

const WIDTH: usize = 6;

fn arbitrary_register(width: usize) -> impl Strategy<Value = PauliRegister> {
    (
        prop::collection::vec(prop::sample::select(PauliLabel::all().to_vec()), width),
        0u8..4,
    )
        .prop_map(|(labels, exponent)| PauliRegister::new(labels, Phase::from_exponent(exponent)))
}

proptest! {
    #[test]
    fn product_is_associative(
        first in arbitrary_register(WIDTH),
        second in arbitrary_register(WIDTH),
        third in arbitrary_register(WIDTH),
    ) {
        let left = first.checked_mul(&second).unwrap().checked_mul(&third).unwrap();
        let right = first.checked_mul(&second.checked_mul(&third).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn swapped_product_differs_by_commutation_sign(first in arbitrary_register(WIDTH), second in arbitrary_register(WIDTH)) {
        let forward = &first * &second;
        let backward = &second * &first;
        prop_assert_eq!(forward.labels(), backward.labels());
        if first.commutes_with(&second).unwrap() {
            prop_assert_eq!(forward.phase(), backward.phase());
        } else {
            prop_assert_eq!(forward.phase(), -backward.phase());
        }
    }

    #[test]
    fn register_times_adjoint_is_identity(register in arbitrary_register(WIDTH)) {
        prop_assert_eq!(&register * &register.adjoint(), PauliRegister::identity(WIDTH));
    }

    #[test]
    fn display_parses_back(register in arbitrary_register(WIDTH)) {
        let parsed: PauliRegister = register.to_string().parse().unwrap();
        prop_assert_eq!(parsed, register);
    }

    #[test]
    fn normalized_splits_phase(register in arbitrary_register(WIDTH)) {
        let (normalized, phase) = register.normalized();
        prop_assert_eq!(normalized.phase(), Phase::ONE);
        prop_assert_eq!(normalized.with_phase(phase), register);
    }
}

#[test]
fn single_qubit_products_match_table() {
    for (left, right) in iproduct!(PauliLabel::all(), PauliLabel::all()) {
        let product = &PauliRegister::new(vec![left], Phase::ONE) * &PauliRegister::new(vec![right], Phase::ONE);
        let (label, phase) = left.multiply(right);
        assert_eq!(product, PauliRegister::new(vec![label], phase), "{left}{right}");
    }
}

#[test]
fn weight_and_support() {
    let register = PauliRegister::from_positioned(5, &[x(0), y(2), z(4)]).unwrap();
    assert_eq!(register.weight(), 3);
    assert_eq!(register.support().collect::<Vec<_>>(), vec![0, 2, 4]);
    assert!(!register.is_diagonal());
    assert!(PauliRegister::from_positioned(5, &[z(1), z(3)]).unwrap().is_diagonal());
    assert!(PauliRegister::identity(5).is_identity());
}

#[test]
fn with_label_is_range_checked() {
    let register = PauliRegister::identity(2).with_label(1, PauliLabel::Y).unwrap();
    assert_eq!(register.to_string(), "IY");
    assert_eq!(
        PauliRegister::identity(2).with_label(2, PauliLabel::Y),
        Err(PauliAlgebraError::QubitOutOfRange { qubit: 2, width: 2 })
    );
}

#[test]
#[should_panic(expected = "width mismatch")]
fn operator_panics_on_width_mismatch() {
    let _ = &PauliRegister::identity(1) * &PauliRegister::identity(2);
}
