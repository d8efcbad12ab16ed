use std::sync::{Arc, RwLock};

/// A shared mutable value readable from any thread.
///
/// This is the seam between the one-shot font loader thread and the frame
/// loop: the loader publishes a status, the shell reads it once per frame.
/// Writes only take effect when the value actually changes.
#[derive(Clone)]
pub struct Signal<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.inner.read().expect("signal lock poisoned"))
    }
}

impl<T: Clone> Signal<T> {
    pub fn get(&self) -> T {
        self.inner.read().expect("signal lock poisoned").clone()
    }
}

impl<T: PartialEq> Signal<T> {
    /// Set the value; a write of an equal value is a no-op.
    pub fn set(&self, value: T) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        if *guard != value {
            *guard = value;
        }
    }
}

impl<T: PartialEq + Clone> Signal<T> {
    /// Update the value in place through a closure.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        f(&mut guard);
    }
}

pub fn create_signal<T>(value: T) -> Signal<T> {
    Signal::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_get() {
        let signal = create_signal(42);
        assert_eq!(signal.get(), 42);
    }

    #[test]
    fn set_updates_value() {
        let signal = create_signal(10);
        signal.set(20);
        assert_eq!(signal.get(), 20);
    }

    #[test]
    fn update_with_closure() {
        let signal = create_signal(5);
        signal.update(|v| *v += 10);
        assert_eq!(signal.get(), 15);
    }

    #[test]
    fn with_borrows() {
        let signal = create_signal(String::from("hello"));
        assert_eq!(signal.with(|s| s.len()), 5);
    }

    #[test]
    fn clones_share_the_value() {
        let a = create_signal(50);
        let b = a.clone();
        a.set(75);
        assert_eq!(b.get(), 75);
    }

    #[test]
    fn readable_across_threads() {
        let signal = create_signal(0);
        let writer = signal.clone();
        std::thread::spawn(move || writer.set(7))
            .join()
            .expect("writer thread panicked");
        assert_eq!(signal.get(), 7);
    }
}
