/// Identifier handed out on listener registration, used to unregister
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Explicit observer registry for controller change notifications. Events
/// carry no payload; listeners re-read controller state when invoked.
#[derive(Default)]
pub struct ChangeDispatcher {
    listeners: Vec<(ListenerId, Box<dyn FnMut()>)>,
    next_id: u64,
}

impl ChangeDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_change(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove(&mut self, id: ListenerId) {
        self.listeners.retain(|(lid, _)| *lid != id);
    }

    pub fn emit(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
