use std::rc::Rc;

use super::signal::Signal;

/// A widget property that is either a fixed value or re-read every frame.
pub enum MaybeDyn<T: 'static> {
    Static(T),
    Dynamic(Rc<dyn Fn() -> T>),
}

impl<T: Clone + 'static> MaybeDyn<T> {
    /// Get the current value. If dynamic, this calls the getter.
    pub fn get(&self) -> T {
        match self {
            MaybeDyn::Static(v) => v.clone(),
            MaybeDyn::Dynamic(getter) => getter(),
        }
    }

    pub fn fixed(value: T) -> Self {
        MaybeDyn::Static(value)
    }

    pub fn dynamic<F: Fn() -> T + 'static>(f: F) -> Self {
        MaybeDyn::Dynamic(Rc::new(f))
    }
}

impl<T: Clone + 'static> Clone for MaybeDyn<T> {
    fn clone(&self) -> Self {
        match self {
            MaybeDyn::Static(v) => MaybeDyn::Static(v.clone()),
            MaybeDyn::Dynamic(getter) => MaybeDyn::Dynamic(getter.clone()),
        }
    }
}

/// Conversion into [`MaybeDyn`], so builders accept plain values, closures
/// and signals alike.
pub trait IntoMaybeDyn<T: Clone + 'static> {
    fn into_maybe_dyn(self) -> MaybeDyn<T>;
}

// Static impls per concrete type; a blanket impl would collide with the
// closure impl below.

impl IntoMaybeDyn<String> for String {
    fn into_maybe_dyn(self) -> MaybeDyn<String> {
        MaybeDyn::Static(self)
    }
}

impl IntoMaybeDyn<String> for &str {
    fn into_maybe_dyn(self) -> MaybeDyn<String> {
        MaybeDyn::Static(self.to_string())
    }
}

impl IntoMaybeDyn<f32> for f32 {
    fn into_maybe_dyn(self) -> MaybeDyn<f32> {
        MaybeDyn::Static(self)
    }
}

impl IntoMaybeDyn<f32> for u32 {
    fn into_maybe_dyn(self) -> MaybeDyn<f32> {
        MaybeDyn::Static(self as f32)
    }
}

impl IntoMaybeDyn<f32> for i32 {
    fn into_maybe_dyn(self) -> MaybeDyn<f32> {
        MaybeDyn::Static(self as f32)
    }
}

impl<T, F> IntoMaybeDyn<T> for F
where
    T: Clone + 'static,
    F: Fn() -> T + 'static,
{
    fn into_maybe_dyn(self) -> MaybeDyn<T> {
        MaybeDyn::Dynamic(Rc::new(self))
    }
}

impl<T: Clone + 'static> IntoMaybeDyn<T> for Signal<T> {
    fn into_maybe_dyn(self) -> MaybeDyn<T> {
        MaybeDyn::Dynamic(Rc::new(move || self.get()))
    }
}

impl<T: Clone + 'static> IntoMaybeDyn<T> for MaybeDyn<T> {
    fn into_maybe_dyn(self) -> MaybeDyn<T> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::create_signal;

    #[test]
    fn fixed_returns_static_value() {
        let value = MaybeDyn::fixed(42);
        assert_eq!(value.get(), 42);
    }

    #[test]
    fn dynamic_calls_closure() {
        let source = create_signal(10);
        let value: MaybeDyn<i32> = {
            let source = source.clone();
            MaybeDyn::dynamic(move || source.get())
        };
        assert_eq!(value.get(), 10);
        source.set(20);
        assert_eq!(value.get(), 20);
    }

    #[test]
    fn str_converts_to_string_prop() {
        let value: MaybeDyn<String> = "hello".into_maybe_dyn();
        assert_eq!(value.get(), "hello");
    }

    #[test]
    fn signal_converts_to_dynamic_prop() {
        let signal = create_signal(1.5f32);
        let value: MaybeDyn<f32> = signal.clone().into_maybe_dyn();
        signal.set(2.5);
        assert_eq!(value.get(), 2.5);
    }
}
