use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with lifecycle hooks and actions)
// =============================================================================

/// Trait that any domain entity must implement to be managed by a [`ResourceActor`].
///
/// The actor owns a map of `Id -> Entity` and serializes all access to it, so
/// hooks and actions run without interleaving with other requests against the
/// same store.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    /// Domain-specific operation applied to a single entity (e.g. a stock
    /// reservation). Runs inside the actor, so check-and-mutate is atomic.
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    fn id(&self) -> &Self::Id;

    /// Construct the full entity from a freshly generated id and the payload.
    /// Validation failures reject the create before anything is stored.
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, String>;

    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;

    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, String>>;

/// Predicate applied inside the actor when scanning the store.
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send>;

pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    /// Scan the store and return every entity matching the filter. Ordering is
    /// left to the caller; the store itself is unordered.
    Query {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let id = (self.next_id_fn)();
                    match T::from_create(id, payload) {
                        Ok(item) => {
                            let id = item.id().clone();
                            self.store.insert(id.clone(), item);
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Query { filter, respond_to } => {
                    let items = self.store.values().filter(|item| filter(item)).cloned().collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(patch) {
                            let _ = respond_to.send(Err(e));
                            continue;
                        }
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        let _ = respond_to.send(Err(format!("Item not found: {}", id)));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    if self.store.remove(&id).is_some() {
                        let _ = respond_to.send(Ok(()));
                    } else {
                        let _ = respond_to.send(Err(format!("Item not found: {}", id)));
                    }
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item.handle_action(action);
                        let _ = respond_to.send(result);
                    } else {
                        let _ = respond_to.send(Err(format!("Item not found: {}", id)));
                    }
                }
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    /// Build a client around a raw channel. Used by the mock framework to
    /// intercept requests in tests.
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T::Id, String> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Create { payload, respond_to })
            .await
            .map_err(|_| "Actor closed".to_string())?;
        response.await.map_err(|_| "Actor dropped".to_string())?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, String> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| "Actor closed".to_string())?;
        response.await.map_err(|_| "Actor dropped".to_string())?
    }

    pub async fn query(&self, filter: impl Fn(&T) -> bool + Send + 'static) -> Result<Vec<T>, String> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Query { filter: Box::new(filter), respond_to })
            .await
            .map_err(|_| "Actor closed".to_string())?;
        response.await.map_err(|_| "Actor dropped".to_string())?
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, String> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Update { id, patch, respond_to })
            .await
            .map_err(|_| "Actor closed".to_string())?;
        response.await.map_err(|_| "Actor dropped".to_string())?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), String> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Delete { id, respond_to })
            .await
            .map_err(|_| "Actor closed".to_string())?;
        response.await.map_err(|_| "Actor dropped".to_string())?
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, String> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Action { id, action, respond_to })
            .await
            .map_err(|_| "Actor closed".to_string())?;
        response.await.map_err(|_| "Actor dropped".to_string())?
    }
}

// =============================================================================
// 5. FRAMEWORK TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // A small store-credit voucher entity, enough to exercise every request kind.

    #[derive(Clone, Debug, PartialEq)]
    struct Voucher {
        id: String,
        owner: String,
        balance: u32,
    }

    #[derive(Debug)]
    struct VoucherCreate {
        owner: String,
        balance: u32,
    }

    #[derive(Debug)]
    struct VoucherPatch {
        owner: Option<String>,
    }

    #[derive(Debug)]
    enum VoucherAction {
        Redeem(u32),
    }

    impl Entity for Voucher {
        type Id = String;
        type CreatePayload = VoucherCreate;
        type Patch = VoucherPatch;
        type Action = VoucherAction;
        type ActionResult = u32;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create(id: String, payload: VoucherCreate) -> Result<Self, String> {
            if payload.balance == 0 {
                return Err("Voucher balance must be positive".to_string());
            }
            Ok(Self { id, owner: payload.owner, balance: payload.balance })
        }

        fn on_update(&mut self, patch: VoucherPatch) -> Result<(), String> {
            if let Some(owner) = patch.owner {
                self.owner = owner;
            }
            Ok(())
        }

        fn handle_action(&mut self, action: VoucherAction) -> Result<u32, String> {
            match action {
                VoucherAction::Redeem(amount) => {
                    if amount > self.balance {
                        return Err(format!("Voucher balance too low: {}", self.balance));
                    }
                    self.balance -= amount;
                    Ok(self.balance)
                }
            }
        }
    }

    fn spawn_voucher_actor() -> ResourceClient<Voucher> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || {
            let id = counter.fetch_add(1, Ordering::SeqCst);
            format!("voucher_{}", id)
        };
        let (actor, client) = ResourceActor::new(8, next_id);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn create_get_update_delete_roundtrip() {
        let client = spawn_voucher_actor();

        let id = client
            .create(VoucherCreate { owner: "alice".into(), balance: 100 })
            .await
            .unwrap();
        assert_eq!(id, "voucher_1");

        let voucher = client.get(id.clone()).await.unwrap().unwrap();
        assert_eq!(voucher.balance, 100);

        let updated = client
            .update(id.clone(), VoucherPatch { owner: Some("bob".into()) })
            .await
            .unwrap();
        assert_eq!(updated.owner, "bob");

        client.delete(id.clone()).await.unwrap();
        assert_eq!(client.get(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn create_rejects_invalid_payload_without_storing() {
        let client = spawn_voucher_actor();

        let err = client
            .create(VoucherCreate { owner: "alice".into(), balance: 0 })
            .await
            .unwrap_err();
        assert!(err.contains("must be positive"));

        // The rejected create must not have stored anything.
        let all = client.query(|_| true).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn actions_check_and_mutate_atomically() {
        let client = spawn_voucher_actor();
        let id = client
            .create(VoucherCreate { owner: "alice".into(), balance: 10 })
            .await
            .unwrap();

        let remaining = client
            .perform_action(id.clone(), VoucherAction::Redeem(4))
            .await
            .unwrap();
        assert_eq!(remaining, 6);

        let err = client
            .perform_action(id.clone(), VoucherAction::Redeem(7))
            .await
            .unwrap_err();
        assert!(err.contains("too low"));

        // Failed action left state untouched.
        let voucher = client.get(id).await.unwrap().unwrap();
        assert_eq!(voucher.balance, 6);
    }

    #[tokio::test]
    async fn query_filters_inside_the_actor() {
        let client = spawn_voucher_actor();
        for (owner, balance) in [("alice", 10), ("bob", 20), ("alice", 30)] {
            client
                .create(VoucherCreate { owner: owner.into(), balance })
                .await
                .unwrap();
        }

        let mine = client.query(|v| v.owner == "alice").await.unwrap();
        assert_eq!(mine.len(), 2);

        let missing = client.query(|v| v.owner == "carol").await.unwrap();
        assert!(missing.is_empty());
    }
}
