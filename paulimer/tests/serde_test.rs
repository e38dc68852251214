#[cfg(feature = "serde")]
mod serde_tests {
    use paulimer::PauliRegister;
    use proptest::prelude::*;
    use quantum_core::{All, PauliLabel, Phase};

    fn arbitrary_register() -> impl Strategy<Value = PauliRegister> {
        (
            prop::collection::vec(prop::sample::select(PauliLabel::all().to_vec()), 0..12),
            0u8..4,
        )
            .prop_map(|(labels, exponent)| PauliRegister::new(labels, Phase::from_exponent(exponent)))
    }

    proptest! {
        #[test]
        fn register_json_matches_display(register in arbitrary_register()) {
            let json = serde_json::to_string(&register).unwrap();
            prop_assert_eq!(&json, &format!("\"{register}\""));
            let parsed: PauliRegister = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(parsed, register);
        }
    }

    #[test]
    fn zero_width_register_round_trips() {
        let register = PauliRegister::identity(0);
        let json = serde_json::to_string(&register).unwrap();
        assert_eq!(json, "\"\"");
        assert_eq!(serde_json::from_str::<PauliRegister>(&json).unwrap(), register);
    }

    #[test]
    fn malformed_register_is_rejected() {
        assert!(serde_json::from_str::<PauliRegister>("\"XQ\"").is_err());
    }
}
