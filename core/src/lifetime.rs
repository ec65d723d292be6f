//! Ties async completions to the view that started them.
//!
//! A page holds a [`ViewLifetime`] for as long as it is mounted and hands a
//! [`LiveToken`] to every future it spawns. When the page goes away the
//! lifetime is dropped and late completions check the token and do nothing.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug)]
pub struct ViewLifetime {
    alive: Rc<Cell<bool>>,
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    pub fn token(&self) -> LiveToken {
        LiveToken {
            alive: Rc::clone(&self.alive),
        }
    }

    /// Ends the lifetime early. Dropping does the same.
    pub fn end(&self) {
        self.alive.set(false);
    }
}

impl Default for ViewLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ViewLifetime {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

#[derive(Debug, Clone)]
pub struct LiveToken {
    alive: Rc<Cell<bool>>,
}

impl LiveToken {
    pub fn is_live(&self) -> bool {
        self.alive.get()
    }

    /// Runs `f` only while the owning view is still mounted.
    pub fn run<F: FnOnce()>(&self, f: F) -> bool {
        if self.is_live() {
            f();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_goes_dead_when_lifetime_drops() {
        let lifetime = ViewLifetime::new();
        let token = lifetime.token();
        assert!(token.is_live());
        drop(lifetime);
        assert!(!token.is_live());
    }

    #[test]
    fn run_skips_work_after_end() {
        let lifetime = ViewLifetime::new();
        let token = lifetime.token();
        let hits = Cell::new(0);
        assert!(token.run(|| hits.set(hits.get() + 1)));
        lifetime.end();
        assert!(!token.run(|| hits.set(hits.get() + 1)));
        assert_eq!(hits.get(), 1);
    }
}
