use super::{unrestricted, Registry};

pub(super) fn register(registry: &mut Registry) {
    registry.insert_function("log", positive, f64::log10);
    registry.insert_function("ln", positive, f64::ln);
    registry.insert_function("sqrt", non_negative, f64::sqrt);
    registry.insert_function("exp", unrestricted, f64::exp);
}

// Also rejects NaN.
fn non_negative(x: f64) -> bool {
    x >= 0.0
}

fn positive(x: f64) -> bool {
    x > 0.0
}
