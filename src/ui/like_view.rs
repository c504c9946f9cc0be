use crate::api::models::ButtonState;
use crate::like::{ClickSource, ClickTracker, LikeView};
use crate::ui::message_list::{LIKEABLE_CLASS, apply_state};
use gtk4 as gtk;
use gtk4::prelude::*;
use gtk4::{gdk, glib};
use std::cell::RefCell;
use std::rc::Rc;

/// The message list as seen by the like handler.
pub struct GtkLikeView {
    pub list: gtk::ListBox,
    pub window: adw::ApplicationWindow,
}

impl LikeView for GtkLikeView {
    type Target = gtk::Widget;
    type Button = gtk::Button;

    fn row_id(&self, target: &gtk::Widget) -> Option<String> {
        let row = target.ancestor(gtk::ListBoxRow::static_type())?;
        Some(row.widget_name().to_string())
    }

    fn find_button(&self, name: &str) -> Option<gtk::Button> {
        find_named(self.list.upcast_ref(), name)?.downcast::<gtk::Button>().ok()
    }

    fn set_button_state(&self, button: &gtk::Button, state: ButtonState) {
        apply_state(button, state);
    }

    fn alert(&self, message: &str) {
        let dialog = gtk::MessageDialog::builder()
            .transient_for(&self.window)
            .modal(true)
            .message_type(gtk::MessageType::Error)
            .buttons(gtk::ButtonsType::Ok)
            .text(message)
            .build();
        dialog.connect_response(|dialog, _| dialog.close());
        dialog.present();
    }
}

fn find_named(root: &gtk::Widget, name: &str) -> Option<gtk::Widget> {
    if root.widget_name() == name {
        return Some(root.clone());
    }
    let mut child = root.first_child();
    while let Some(widget) = child {
        if let Some(found) = find_named(&widget, name) {
            return Some(found);
        }
        child = widget.next_sibling();
    }
    None
}

fn likeable_ancestor(picked: &gtk::Widget, stop: &gtk::Widget) -> Option<gtk::Widget> {
    let mut current = Some(picked.clone());
    while let Some(widget) = current {
        if widget.has_css_class(LIKEABLE_CLASS) {
            return Some(widget);
        }
        if &widget == stop {
            return None;
        }
        current = widget.parent();
    }
    None
}

fn likeable_at(list: &gtk::ListBox, x: f64, y: f64) -> Option<gtk::Widget> {
    let picked = list.pick(x, y, gtk::PickFlags::DEFAULT)?;
    likeable_ancestor(&picked, list.upcast_ref())
}

fn is_activation_key(key: gdk::Key) -> bool {
    [gdk::Key::Return, gdk::Key::KP_Enter, gdk::Key::ISO_Enter, gdk::Key::space, gdk::Key::KP_Space].contains(&key)
}

/// Delegated listener on the list itself, so rows added later are covered too. Pointer
/// clicks and Enter/Space on a focused likeable button both count.
pub struct ListClicks {
    pub list: gtk::ListBox,
}

pub struct ListConnection {
    click: gtk::GestureClick,
    keys: gtk::EventControllerKey,
}

impl ClickSource for ListClicks {
    type Target = gtk::Widget;
    type Connection = ListConnection;

    fn connect(&self, handler: Box<dyn Fn(gtk::Widget)>) -> ListConnection {
        let handler: Rc<dyn Fn(gtk::Widget)> = Rc::from(handler);
        let tracker = Rc::new(RefCell::new(ClickTracker::new()));

        let click = gtk::GestureClick::new();
        // Capture phase so the button's own gesture is denied once the press is claimed.
        click.set_propagation_phase(gtk::PropagationPhase::Capture);
        {
            let list = self.list.clone();
            let tracker = tracker.clone();
            click.connect_pressed(move |gesture, _n_press, x, y| {
                if tracker.borrow_mut().press(likeable_at(&list, x, y)) {
                    gesture.set_state(gtk::EventSequenceState::Claimed);
                }
            });
        }
        {
            let list = self.list.clone();
            let tracker = tracker.clone();
            let handler = handler.clone();
            click.connect_released(move |_, _n_press, x, y| {
                let clicked = tracker.borrow_mut().release(likeable_at(&list, x, y));
                if let Some(likeable) = clicked {
                    handler(likeable);
                }
            });
        }
        click.connect_cancel(move |_, _| tracker.borrow_mut().cancel());

        let keys = gtk::EventControllerKey::new();
        keys.set_propagation_phase(gtk::PropagationPhase::Capture);
        {
            let list = self.list.clone();
            keys.connect_key_pressed(move |_, key, _keycode, _modifiers| {
                if !is_activation_key(key) {
                    return glib::Propagation::Proceed;
                }
                let likeable = list
                    .root()
                    .and_then(|root| root.focus())
                    .filter(|focused| focused.is_ancestor(&list))
                    .and_then(|focused| likeable_ancestor(&focused, list.upcast_ref()));
                match likeable {
                    Some(likeable) => {
                        handler(likeable);
                        glib::Propagation::Stop
                    }
                    None => glib::Propagation::Proceed,
                }
            });
        }

        self.list.add_controller(click.clone());
        self.list.add_controller(keys.clone());
        ListConnection { click, keys }
    }

    fn disconnect(&self, connection: ListConnection) {
        self.list.remove_controller(&connection.click);
        self.list.remove_controller(&connection.keys);
    }
}
