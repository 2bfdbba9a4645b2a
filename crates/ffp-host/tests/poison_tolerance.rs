//! Values outside the finite domain must never cause a panic or a crash,
//! only unspecified results.

use std::num::FpCategory;

use ffp_host::{fp32, fp64, Fp32, Fp64, MaybePoison};

fn specials() -> [f64; 4] {
    [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -f64::NAN]
}

#[test]
fn arithmetic_on_special_values_completes() {
    for s in specials() {
        let x = fp64(s);
        let y = fp64(1.0);
        let results = [x + y, x - y, x * y, x / y, -x, y / fp64(0.0), x % y];
        for r in results {
            // any value is acceptable; freezing must simply produce one
            let _ = f64::from(r);
        }
    }
}

#[test]
fn safe_methods_on_special_values_complete() {
    for s in specials() {
        let x = fp64(s);
        let _ = x.abs().value();
        let _ = x.copysign(fp64(-1.0)).value();
        let _ = x.max(fp64(1.0)).value();
        let _ = x.min(fp64(1.0)).value();
        let _ = x.powi(-3).value();
        let _ = x.clamp(fp64(0.0), fp64(1.0)).value();
    }
}

#[test]
fn frozen_methods_on_special_values_complete() {
    for s in specials() {
        let x = fp64(s);
        let _ = (x.ln(), x.sqrt(), x.sin_cos(), x.atan2(x), x.log(x));
        let _ = (x.floor(), x.rem_euclid(fp64(2.0)), x.mul_add(x, x));
    }
}

#[test]
fn observers_on_special_values_complete() {
    for s in specials() {
        let x = fp64(s);
        let _ = x == x;
        let _ = x < fp64(0.0);
        let _ = x.cmp(&fp64(0.0));
        let _ = format!("{x} {x:?} {x:e}");
        assert!(!matches!(
            x.classify(),
            FpCategory::Nan | FpCategory::Infinite
        ));
    }
}

#[test]
fn valid_values_pass_through_unchanged() {
    let x = fp32(0.1);
    assert_eq!(f32::from(x).to_bits(), 0.1f32.to_bits());
    assert_eq!(MaybePoison::new(0.1f64).freeze(), 0.1);
    assert_eq!(Fp32::MIN_POSITIVE.value(), f32::MIN_POSITIVE);
}

#[test]
fn overflow_is_unspecified_not_fatal() {
    let big = Fp64::MAX;
    let r = big * big;
    let _ = r.is_sign_negative();
    let _ = r.classify();
}
