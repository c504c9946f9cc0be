use std::fmt;
use std::future::Future;
use std::pin::Pin;

pub type LocalBoxFuture = Pin<Box<dyn Future<Output = ()>>>;

/// Something that delivers clicks on likeable items.
///
/// Implementations decide what counts as likeable and must stop the click from reaching any
/// other handler before passing it on. Keyboard activation of a focused likeable item counts
/// as a click.
pub trait ClickSource {
    type Target: 'static;
    type Connection;

    fn connect(&self, handler: Box<dyn Fn(Self::Target)>) -> Self::Connection;
    fn disconnect(&self, connection: Self::Connection);
}

/// Live click listener. Dropping it detaches too.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self { detach: Some(Box::new(detach)) }
    }

    pub fn is_attached(&self) -> bool {
        self.detach.is_some()
    }

    /// Stops delivering clicks. Requests already sent still complete.
    pub fn detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
            log::debug!("like listener detached");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("attached", &self.is_attached()).finish()
    }
}

/// Pairs presses with releases the way a click is defined: it fires on release over the
/// same likeable element the press landed on. The press is what gets claimed, so the
/// element's own handling never starts.
#[derive(Debug)]
pub struct ClickTracker<T> {
    pressed: Option<T>,
}

impl<T> Default for ClickTracker<T> {
    fn default() -> Self {
        Self { pressed: None }
    }
}

impl<T: PartialEq> ClickTracker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// `likeable` is the likeable element under the press, if any. Returns whether the press
    /// must be claimed.
    pub fn press(&mut self, likeable: Option<T>) -> bool {
        self.pressed = likeable;
        self.pressed.is_some()
    }

    /// Returns the clicked element when the release lands on the one that was pressed.
    pub fn release(&mut self, likeable: Option<T>) -> Option<T> {
        let pressed = self.pressed.take()?;
        (likeable.as_ref() == Some(&pressed)).then_some(pressed)
    }

    pub fn cancel(&mut self) {
        self.pressed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn detach_runs_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut sub = Subscription::new(move || counter.set(counter.get() + 1));

        assert!(sub.is_attached());
        sub.detach();
        sub.detach();
        drop(sub);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn drop_detaches() {
        let detached = Rc::new(Cell::new(false));
        let flag = detached.clone();
        drop(Subscription::new(move || flag.set(true)));
        assert!(detached.get());
    }

    #[test]
    fn press_on_likeable_is_claimed_and_release_clicks() {
        let mut tracker = ClickTracker::new();
        assert!(tracker.press(Some("like-button-42")));
        assert_eq!(tracker.release(Some("like-button-42")), Some("like-button-42"));
        assert_eq!(tracker.release(Some("like-button-42")), None);
    }

    #[test]
    fn press_elsewhere_is_left_alone() {
        let mut tracker: ClickTracker<&str> = ClickTracker::new();
        assert!(!tracker.press(None));
        assert_eq!(tracker.release(Some("like-button-42")), None);
    }

    #[test]
    fn release_off_the_pressed_element_does_not_click() {
        let mut tracker = ClickTracker::new();
        assert!(tracker.press(Some("like-button-42")));
        assert_eq!(tracker.release(Some("like-button-7")), None);

        assert!(tracker.press(Some("like-button-42")));
        assert_eq!(tracker.release(None), None);
    }

    #[test]
    fn cancelled_press_does_not_click() {
        let mut tracker = ClickTracker::new();
        assert!(tracker.press(Some("like-button-42")));
        tracker.cancel();
        assert_eq!(tracker.release(Some("like-button-42")), None);
    }
}
