use crate::api::models::{ButtonState, MessageId};
use gtk4 as gtk;
use gtk4::prelude::*;

/// Marks a widget whose clicks toggle the like on its row.
pub const LIKEABLE_CLASS: &str = "messages-like";

pub struct MessageList {
    root: gtk::Box,
    list: gtk::ListBox,
}

impl MessageList {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let title = gtk::Label::new(Some("Messages"));
        title.add_css_class("heading");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let list = gtk::ListBox::new();
        list.set_selection_mode(gtk::SelectionMode::None);
        root.append(&list);

        Self { root, list }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn list(&self) -> &gtk::ListBox {
        &self.list
    }

    /// One row per message. The row's widget name is the message id, the way the like
    /// handler expects to find it.
    pub fn set_items(&self, items: &[MessageId]) {
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }
        for id in items {
            self.list.append(&Self::row(id));
        }
    }

    fn row(id: &MessageId) -> gtk::ListBoxRow {
        let row = gtk::ListBoxRow::new();
        row.set_widget_name(id.as_str());

        let content = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        content.set_margin_top(8);
        content.set_margin_bottom(8);
        content.set_margin_start(8);
        content.set_margin_end(8);

        let label = gtk::Label::new(Some(&format!("Message #{}", id)));
        label.set_halign(gtk::Align::Start);
        label.set_hexpand(true);
        content.append(&label);

        let button = gtk::Button::from_icon_name("starred-symbolic");
        button.set_widget_name(&id.button_name());
        apply_state(&button, ButtonState::NotLiked);
        content.append(&button);

        row.set_child(Some(&content));
        row
    }
}

/// Replaces the button's classes wholesale. The likeable marker is kept so the button still
/// receives clicks afterwards.
pub fn apply_state(button: &gtk::Button, state: ButtonState) {
    let mut classes = vec![LIKEABLE_CLASS];
    classes.extend(state.css_classes());
    button.set_css_classes(&classes);
}
