use crate::api::client::{ApiClient, RuntimeApi};
use crate::api::models::MessageId;
use crate::like::{LikeToggle, Subscription};
use crate::ui::like_view::{GtkLikeView, ListClicks};
use crate::ui::message_list::MessageList;
use adw::Application;
use adw::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub fn show_main_window(app: &Application, client: ApiClient, ids: &[MessageId]) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Warbler")
        .default_width(480)
        .default_height(640)
        .build();

    let messages = MessageList::new();
    messages.set_items(ids);

    let scroller = gtk4::ScrolledWindow::builder()
        .vexpand(true)
        .hexpand(true)
        .build();
    scroller.set_child(Some(&messages.widget()));

    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk4::Label::new(Some("Warbler"));
    header.set_title_widget(Some(&title));
    container.append(&header);
    container.append(&scroller);
    window.set_content(Some(&container));

    log::info!("showing {} messages, liking against {}", ids.len(), client.base_url());
    let view = GtkLikeView { list: messages.list().clone(), window: window.clone() };
    let toggle = Rc::new(LikeToggle::new(RuntimeApi(client), view));
    let subscription = toggle.attach(
        ListClicks { list: messages.list().clone() },
        |fut| {
            glib::MainContext::default().spawn_local(fut);
        },
    );

    // Tear the listener down with the window rather than at process exit.
    let subscription: Rc<RefCell<Subscription>> = Rc::new(RefCell::new(subscription));
    window.connect_close_request(move |_| {
        subscription.borrow_mut().detach();
        glib::Propagation::Proceed
    });

    window.present();
}
