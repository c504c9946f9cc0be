use crate::api::client::LikeApi;
use crate::api::models::{ButtonState, MessageId};
use crate::error::{LikeError, Result};
use crate::like::sequencer::{LikeSequencer, TicketGuard};
use crate::like::subscription::{ClickSource, LocalBoxFuture, Subscription};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

/// The parts of the widget tree the like handler reads and writes.
pub trait LikeView {
    type Target;
    type Button;

    /// Identifier carried by the closest message row around `target`.
    fn row_id(&self, target: &Self::Target) -> Option<String>;
    fn find_button(&self, name: &str) -> Option<Self::Button>;
    /// Replaces every presentation class on the button.
    fn set_button_state(&self, button: &Self::Button, state: ButtonState);
    /// Blocking notice for the user.
    fn alert(&self, message: &str);
}

#[derive(Debug)]
pub enum Outcome {
    Applied(ButtonState),
    /// A newer click on the same message was made while this request was in flight.
    Superseded,
    Failed(LikeError),
}

pub struct LikeToggle<A, V> {
    api: A,
    view: V,
    sequencer: RefCell<LikeSequencer>,
}

impl<A: LikeApi, V: LikeView> LikeToggle<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self { api, view, sequencer: RefCell::new(LikeSequencer::new()) }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn resolve(&self, target: &V::Target) -> Result<(MessageId, V::Button)> {
        let id = self
            .view
            .row_id(target)
            .as_deref()
            .and_then(MessageId::parse)
            .ok_or(LikeError::MissingIdentifier)?;
        let button = self
            .view
            .find_button(&id.button_name())
            .ok_or_else(|| LikeError::MissingButton(id.clone()))?;
        Ok((id, button))
    }

    /// Handles one click. The request is issued before this returns; the returned future
    /// resolves once the button has been updated or the user alerted.
    pub fn activate<'a>(&'a self, target: &V::Target) -> impl Future<Output = Outcome> + use<'a, A, V> {
        let started = self.resolve(target).map(|(id, button)| {
            let guard = TicketGuard::issue(&self.sequencer, &id);
            log::info!("liking message {}", id);
            (guard, button, self.api.like_message(id))
        });

        async move {
            let (guard, button, request) = match started {
                Ok(started) => started,
                Err(e) => return self.fail(e),
            };
            let result = request.await;

            let (ticket, current) = guard.finish();
            if !current {
                log::debug!("dropping stale like response for message {} (request #{})", ticket.id(), ticket.seq());
                return Outcome::Superseded;
            }

            match result {
                Ok(resp) => {
                    let state = resp.button_state();
                    log::debug!("message {} is now {:?}", ticket.id(), state);
                    self.view.set_button_state(&button, state);
                    Outcome::Applied(state)
                }
                Err(e) => self.fail(e),
            }
        }
    }

    fn fail(&self, err: LikeError) -> Outcome {
        log::warn!("like failed: {}", err);
        self.view.alert(err.user_message());
        Outcome::Failed(err)
    }
}

impl<A, V> LikeToggle<A, V>
where
    A: LikeApi + 'static,
    V: LikeView + 'static,
{
    /// Starts listening on `source`. Each click becomes a future handed to `spawn_local`.
    pub fn attach<S, F>(self: &Rc<Self>, source: S, spawn_local: F) -> Subscription
    where
        S: ClickSource<Target = V::Target> + 'static,
        F: Fn(LocalBoxFuture) + 'static,
    {
        let toggle = Rc::clone(self);
        let connection = source.connect(Box::new(move |target: V::Target| {
            let toggle = Rc::clone(&toggle);
            spawn_local(Box::pin(async move {
                toggle.activate(&target).await;
            }));
        }));
        log::debug!("like listener attached");
        Subscription::new(move || source.disconnect(connection))
    }
}
