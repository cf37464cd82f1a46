use parallel_plot_wasm::domain::plot::{Classifier, DisplayRange, FitPolicy, RangeFitter, Sample};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::*;

fn samples(ys: &[f64]) -> Vec<Sample> {
    ys.iter().enumerate().map(|(i, &y)| Sample::new(i as f64, y, i)).collect()
}

const DOMAIN: DisplayRange = DisplayRange::new(-5.0, 5.0);

#[quickcheck]
fn auto_fit_is_symmetric_and_contains_every_sample(ys: Vec<i32>) -> TestResult {
    if ys.is_empty() {
        return TestResult::discard();
    }
    let mut set = samples(&ys.iter().map(|&y| y as f64).collect::<Vec<_>>());
    let range = RangeFitter::fit(&set, DOMAIN, FitPolicy::AutoFitSymmetric);
    let outside = Classifier::classify_all(&mut set, range);

    TestResult::from_bool(range.min == -range.max && outside == 0)
}

#[quickcheck]
fn domain_matched_ignores_samples(ys: Vec<i32>) -> bool {
    let set = samples(&ys.iter().map(|&y| y as f64).collect::<Vec<_>>());
    RangeFitter::fit(&set, DOMAIN, FitPolicy::DomainMatched) == DOMAIN
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn auto_fit_uses_largest_magnitude() {
    let set = samples(&[-3.0, 1.0, 2.5]);
    assert_eq!(RangeFitter::fit(&set, DOMAIN, FitPolicy::AutoFitSymmetric), DisplayRange::new(-3.0, 3.0));
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn empty_set_falls_back_to_domain() {
    assert_eq!(RangeFitter::fit(&[], DOMAIN, FitPolicy::AutoFitSymmetric), DOMAIN);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn all_zero_samples_give_degenerate_range() {
    let set = samples(&[0.0, 0.0]);
    let range = RangeFitter::fit(&set, DOMAIN, FitPolicy::AutoFitSymmetric);
    assert!(range.is_degenerate());
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn classification_boundary_is_inclusive() {
    let mut set = samples(&[-5.0, 5.0, 5.000001, -7.0, 0.0]);
    let outside = Classifier::classify_all(&mut set, DOMAIN);
    assert_eq!(outside, 2);
    let flags: Vec<bool> = set.iter().map(|s| s.out_of_range).collect();
    assert_eq!(flags, vec![false, false, true, true, false]);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn reclassification_overwrites_previous_flags() {
    let mut set = samples(&[10.0, -10.0]);
    assert_eq!(Classifier::classify_all(&mut set, DOMAIN), 2);
    assert_eq!(Classifier::classify_all(&mut set, DisplayRange::new(-10.0, 10.0)), 0);
    assert!(set.iter().all(|s| !s.out_of_range));
}
