use holotrace::{bind, inverse_permute, permute, similarity, superpose, unbind, Accumulation, HrrError, HrrVector};
use proptest::prelude::*;

fn vec_f64(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-100.0..100.0, len)
}

fn close(a: &HrrVector, b: &HrrVector, tol: f64) -> bool {
    a.components()
        .iter()
        .zip(b.components().iter())
        .all(|(x, y)| (x - y).norm() < tol)
}

#[test]
fn bind_is_commutative() {
    proptest!(|(x in vec_f64(16), y in vec_f64(16))| {
        let x = HrrVector::from_real(&x);
        let y = HrrVector::from_real(&y);
        let xy = bind(&x, &y).unwrap();
        let yx = bind(&y, &x).unwrap();
        prop_assert!(close(&xy, &yx, 1e-6));
    });
}

#[test]
fn bind_distributes_over_sum() {
    proptest!(|(a in vec_f64(16), b in vec_f64(16), c in vec_f64(16))| {
        let a = HrrVector::from_real(&a);
        let b = HrrVector::from_real(&b);
        let c = HrrVector::from_real(&c);
        let mut b_plus_c = b.clone();
        b_plus_c.add_scaled(&c, 1.0).unwrap();
        let lhs = bind(&a, &b_plus_c).unwrap();
        let mut rhs = bind(&a, &b).unwrap();
        rhs.add_scaled(&bind(&a, &c).unwrap(), 1.0).unwrap();
        prop_assert!(close(&lhs, &rhs, 1e-6));
    });
}

#[test]
fn bind_identity_property() {
    proptest!(|(v in vec_f64(16))| {
        let mut identity = vec![0.0; 16];
        identity[0] = 1.0;
        let v = HrrVector::from_real(&v);
        let result = bind(&v, &HrrVector::from_real(&identity)).unwrap();
        prop_assert!(close(&result, &v, 1e-6));
    });
}

#[test]
fn bind_preserves_dimension() {
    proptest!(|(x in vec_f64(32), y in vec_f64(32))| {
        let result = bind(&HrrVector::from_real(&x), &HrrVector::from_real(&y)).unwrap();
        prop_assert_eq!(result.dim(), 32);
    });
}

#[test]
fn permute_inverse_roundtrip() {
    proptest!(|(v in vec_f64(24), shift in 0usize..100)| {
        let v = HrrVector::from_real(&v);
        let back = inverse_permute(&permute(&v, shift), shift);
        prop_assert_eq!(back, v);
    });
}

#[test]
fn similarity_is_bounded_and_symmetric() {
    proptest!(|(x in vec_f64(16), y in vec_f64(16))| {
        let x = HrrVector::from_real(&x);
        let y = HrrVector::from_real(&y);
        let xy = similarity(&x, &y).unwrap();
        let yx = similarity(&y, &x).unwrap();
        prop_assert!((-1.0..=1.0).contains(&xy));
        prop_assert!((xy - yx).abs() < 1e-9);
    });
}

#[test]
fn unitary_unbind_is_exact() {
    proptest!(|(seed in any::<u64>())| {
        use rand::{rngs::StdRng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(seed);
        let a = HrrVector::random(64, &mut rng);
        let b = HrrVector::random(64, &mut rng);
        let recovered = unbind(&bind(&a, &b).unwrap(), &a).unwrap();
        prop_assert!(similarity(&recovered, &b).unwrap() > 0.999);
    });
}

#[test]
fn normalized_superposition_has_unit_norm() {
    proptest!(|(a in vec_f64(16), b in vec_f64(16))| {
        let items = [HrrVector::from_real(&a), HrrVector::from_real(&b)];
        let trace = superpose(16, &items, Accumulation::NormalizedSum).unwrap();
        let raw = superpose(16, &items, Accumulation::Sum).unwrap();
        if raw.norm() > 1e-9 {
            prop_assert!((trace.norm() - 1.0).abs() < 1e-9);
        }
    });
}

#[test]
fn bind_rejects_mismatched_dimensions() {
    proptest!(|(x in vec_f64(8), y in vec_f64(12))| {
        let err = bind(&HrrVector::from_real(&x), &HrrVector::from_real(&y)).unwrap_err();
        prop_assert_eq!(err, HrrError::DimensionMismatch { expected: 8, found: 12 });
    });
}
