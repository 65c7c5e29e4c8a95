use rfxtrx_packet::Event;

/// Consumer of decoded events.
///
/// Called on the receive thread; a slow handler delays reception.
pub trait EventHandler {
    fn handle_event(&mut self, event: Event);
}

impl<F: FnMut(Event)> EventHandler for F {
    fn handle_event(&mut self, event: Event) {
        self(event)
    }
}
