//! Six-sided die with observer notification.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::core::{GameError, GameRng, Result, RollSource};
use crate::observers::{DieObserver, ObserverId, ObserverList};

/// Lowest face of the die.
pub const MIN_FACE: u8 = 1;
/// Highest face of the die.
pub const MAX_FACE: u8 = 6;
/// Lowest value a turn-marker roll can produce.
pub const MARKER_MIN: u8 = 3;
/// Turn-marker rolls strictly above this value succeed.
pub const MARKER_THRESHOLD: u8 = 3;

/// A die drawing from an injectable [`RollSource`].
///
/// The die caches the last value it produced. [`Die::set_value`] overwrites
/// that value and forces the next roll of either kind to return it, which is
/// how tests and replays make a turn deterministic without swapping the
/// source. A forced value never outlives the roll that follows it.
#[derive(Debug)]
pub struct Die<R: RollSource = GameRng> {
    source: R,
    value: u8,
    forced: Option<u8>,
    observers: ObserverList<dyn DieObserver>,
}

impl<R: RollSource> Die<R> {
    /// Create a die drawing from `source`. The initial value is 1.
    pub fn new(source: R) -> Self {
        Self {
            source,
            value: MIN_FACE,
            forced: None,
            observers: ObserverList::new(),
        }
    }

    /// The last value rolled or set.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Access the underlying random source.
    #[must_use]
    pub fn source(&self) -> &R {
        &self.source
    }

    /// Roll the die: a value in 1-6, cached and sent to every observer
    /// before returning.
    ///
    /// A value armed with [`Die::set_value`] is consumed instead of drawing.
    /// If an observer fails, the roll has already been recorded.
    pub fn roll_die(&mut self) -> Result<u8> {
        let value = match self.forced.take() {
            Some(forced) => forced,
            None => self.source.draw(MIN_FACE, MAX_FACE),
        };
        self.value = value;
        debug!(value, "die rolled");

        self.observers.notify(|o| o.on_roll(value))?;
        Ok(value)
    }

    /// Roll for the turn marker: a value in 3-6, sent to observers raw.
    ///
    /// Returns `true` when the value is above 3. A value armed with
    /// [`Die::set_value`] is consumed: used if it lies in 3-6, otherwise
    /// discarded and a fresh value drawn.
    pub fn roll_to_turn_marker(&mut self) -> Result<bool> {
        let value = match self.forced.take() {
            Some(forced) if forced >= MARKER_MIN => forced,
            Some(forced) => {
                debug!(forced, "forced value below turn-marker range discarded");
                self.source.draw(MARKER_MIN, MAX_FACE)
            }
            None => self.source.draw(MARKER_MIN, MAX_FACE),
        };
        self.value = value;
        let passed = value > MARKER_THRESHOLD;
        debug!(value, passed, "turn marker rolled");

        self.observers.notify(|o| o.on_roll(value))?;
        Ok(passed)
    }

    /// Overwrite the cached value without notifying observers, and force the
    /// next roll to produce it.
    pub fn set_value(&mut self, value: u8) -> Result<()> {
        if !(MIN_FACE..=MAX_FACE).contains(&value) {
            return Err(GameError::invalid_argument(format!(
                "die value {value} is outside {MIN_FACE}-{MAX_FACE}"
            )));
        }
        self.value = value;
        self.forced = Some(value);
        Ok(())
    }

    /// Register an observer. Notification follows registration order.
    pub fn add_observer<O: DieObserver + 'static>(&mut self, observer: &Rc<RefCell<O>>) -> ObserverId {
        let observer: Rc<RefCell<dyn DieObserver>> = observer.clone();
        self.observers.register(Rc::downgrade(&observer))
    }

    /// Unregister an observer. Unknown handles are ignored.
    pub fn remove_observer(&mut self, id: ObserverId) {
        self.observers.unregister(id);
    }

    /// Number of live observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedRolls;
    use crate::observers::{ObserverError, ObserverResult};

    #[derive(Default)]
    struct Recorder(Vec<u8>);

    impl DieObserver for Recorder {
        fn on_roll(&mut self, value: u8) -> ObserverResult {
            self.0.push(value);
            Ok(())
        }
    }

    struct Refuse;

    impl DieObserver for Refuse {
        fn on_roll(&mut self, _value: u8) -> ObserverResult {
            Err(ObserverError::new("refused"))
        }
    }

    #[test]
    fn test_roll_in_range() {
        let mut die = Die::new(GameRng::new(3));
        for _ in 0..500 {
            let v = die.roll_die().unwrap();
            assert!((1..=6).contains(&v));
            assert_eq!(die.value(), v);
        }
    }

    #[test]
    fn test_turn_marker() {
        let mut die = Die::new(GameRng::new(11));
        for _ in 0..500 {
            let passed = die.roll_to_turn_marker().unwrap();
            let v = die.value();
            assert!((3..=6).contains(&v));
            assert_eq!(passed, v > 3);
        }
    }

    #[test]
    fn test_turn_marker_scripted() {
        let mut die = Die::new(ScriptedRolls::new([3, 4]));
        assert!(!die.roll_to_turn_marker().unwrap());
        assert!(die.roll_to_turn_marker().unwrap());
    }

    #[test]
    fn test_set_value_bounds() {
        let mut die = Die::new(GameRng::new(0));
        assert!(matches!(die.set_value(0), Err(GameError::InvalidArgument(_))));
        assert!(matches!(die.set_value(7), Err(GameError::InvalidArgument(_))));
        for v in 1..=6 {
            die.set_value(v).unwrap();
            assert_eq!(die.value(), v);
        }
    }

    #[test]
    fn test_set_value_forces_next_roll_only() {
        let mut die = Die::new(ScriptedRolls::new([2]));
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        die.add_observer(&recorder);

        die.set_value(5).unwrap();
        assert!(recorder.borrow().0.is_empty(), "set_value must not notify");

        assert_eq!(die.roll_die().unwrap(), 5);
        assert_eq!(die.roll_die().unwrap(), 2);
        assert_eq!(recorder.borrow().0, vec![5, 2]);
        assert_eq!(die.source().drawn(), 1);
    }

    #[test]
    fn test_turn_marker_consumes_forced_value() {
        let mut die = Die::new(ScriptedRolls::new([4, 2]));

        die.set_value(5).unwrap();
        assert!(die.roll_to_turn_marker().unwrap());
        assert_eq!(die.value(), 5);
        assert_eq!(die.source().drawn(), 0);

        // Below the marker range: dropped, the source decides.
        die.set_value(2).unwrap();
        assert!(die.roll_to_turn_marker().unwrap());
        assert_eq!(die.value(), 4);
        assert_eq!(die.roll_die().unwrap(), 2);
    }

    #[test]
    fn test_observers_in_order_and_removal() {
        let mut die = Die::new(ScriptedRolls::new([4]));
        let first = Rc::new(RefCell::new(Recorder::default()));
        let second = Rc::new(RefCell::new(Recorder::default()));
        let first_id = die.add_observer(&first);
        die.add_observer(&second);

        die.remove_observer(first_id);
        die.remove_observer(first_id);
        die.roll_die().unwrap();

        assert!(first.borrow().0.is_empty());
        assert_eq!(second.borrow().0, vec![4]);
        assert_eq!(die.observer_count(), 1);
    }

    #[test]
    fn test_failing_observer_aborts_roll() {
        let mut die = Die::new(ScriptedRolls::new([6]));
        let refuse = Rc::new(RefCell::new(Refuse));
        let after = Rc::new(RefCell::new(Recorder::default()));
        die.add_observer(&refuse);
        die.add_observer(&after);

        let err = die.roll_die().unwrap_err();
        assert_eq!(err, GameError::Observer(ObserverError::new("refused")));
        assert_eq!(die.value(), 6);
        assert!(after.borrow().0.is_empty());
    }
}
