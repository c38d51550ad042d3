use super::{unrestricted, Registry};

pub(super) fn register(registry: &mut Registry) {
    registry.insert_function("abs", unrestricted, f64::abs);
    registry.insert_function("ceil", unrestricted, f64::ceil);
    registry.insert_function("floor", unrestricted, f64::floor);
}
