//! Observer (sink) system for die rolls and turn events.
//!
//! Observers are capability-typed sinks: [`DieObserver`] for raw die values
//! and [`GameObserver`] for the four turn-level events. Both are held in an
//! [`ObserverList`] which keeps only weak references and calls them
//! synchronously, in registration order, on the calling thread.
//!
//! Callers keep their observer in an `Rc<RefCell<_>>` and register a clone:
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use ladder_games::dice::Die;
//! use ladder_games::core::GameRng;
//! use ladder_games::observers::{DieObserver, ObserverResult};
//!
//! #[derive(Default)]
//! struct Log(Vec<u8>);
//!
//! impl DieObserver for Log {
//!     fn on_roll(&mut self, value: u8) -> ObserverResult {
//!         self.0.push(value);
//!         Ok(())
//!     }
//! }
//!
//! let log = Rc::new(RefCell::new(Log::default()));
//! let mut die = Die::new(GameRng::new(1));
//! die.add_observer(&log);
//! let value = die.roll_die().unwrap();
//! assert_eq!(log.borrow().0, vec![value]);
//! ```
//!
//! A failing observer aborts the remaining notifications. Mutations made
//! before the notification (the roll, the move) are not rolled back.

mod list;
mod sink;

pub use list::{ObserverId, ObserverList};
pub use sink::{DieObserver, GameObserver, ObserverError, ObserverResult};
