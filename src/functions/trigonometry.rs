use super::{unrestricted, Registry};

pub(super) fn register(registry: &mut Registry) {
    registry.insert_function("sin", unrestricted, f64::sin);
    registry.insert_function("cos", unrestricted, f64::cos);
    registry.insert_function("tan", unrestricted, f64::tan);
    registry.insert_function("asin", unit_interval, f64::asin);
    registry.insert_function("acos", unit_interval, f64::acos);
    registry.insert_function("atan", unrestricted, f64::atan);
}

fn unit_interval(x: f64) -> bool {
    (-1.0..=1.0).contains(&x)
}
