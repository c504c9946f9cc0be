use crate::api::models::MessageId;
use std::cell::RefCell;
use std::collections::HashMap;

/// Marks one request for one message. Only the newest ticket per message may touch its button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    id: MessageId,
    seq: u64,
}

impl Ticket {
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Sequence numbers come from one counter shared by all messages, so a number is never
/// reused even after a message's entry is dropped.
#[derive(Debug, Default)]
pub struct LikeSequencer {
    next: u64,
    latest: HashMap<MessageId, u64>,
}

impl LikeSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, id: &MessageId) -> Ticket {
        self.next += 1;
        self.latest.insert(id.clone(), self.next);
        Ticket { id: id.clone(), seq: self.next }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.id) == Some(&ticket.seq)
    }

    /// Consumes the ticket. Returns whether it was still the newest one; if so the entry is
    /// dropped so the map only holds messages with requests in flight.
    pub fn finish(&mut self, ticket: &Ticket) -> bool {
        let current = self.is_current(ticket);
        if current {
            self.latest.remove(&ticket.id);
        }
        current
    }

    pub fn in_flight(&self) -> usize {
        self.latest.len()
    }
}

/// Holds a ticket for one in-flight request. If the request is dropped before
/// [`TicketGuard::finish`], the ticket is still retired so its entry does not linger.
pub struct TicketGuard<'a> {
    sequencer: &'a RefCell<LikeSequencer>,
    ticket: Option<Ticket>,
}

impl<'a> TicketGuard<'a> {
    pub fn issue(sequencer: &'a RefCell<LikeSequencer>, id: &MessageId) -> Self {
        let ticket = sequencer.borrow_mut().issue(id);
        Self { sequencer, ticket: Some(ticket) }
    }

    /// Retires the ticket and returns it along with whether it was still the newest.
    pub fn finish(mut self) -> (Ticket, bool) {
        let ticket = self.ticket.take().expect("ticket is only taken once");
        let current = self.sequencer.borrow_mut().finish(&ticket);
        (ticket, current)
    }
}

impl Drop for TicketGuard<'_> {
    fn drop(&mut self) {
        let Some(ticket) = self.ticket.take() else { return };
        if let Ok(mut sequencer) = self.sequencer.try_borrow_mut() {
            if sequencer.finish(&ticket) {
                log::debug!("like request #{} for message {} abandoned", ticket.seq, ticket.id);
            }
        }
    }
}
