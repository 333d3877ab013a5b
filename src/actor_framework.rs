use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with creation and replacement payloads)
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Update: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the assigned ID and creation parameters
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, String>;

    /// Apply an update in place. The ID must not change.
    fn on_update(&mut self, update: Self::Update) -> Result<(), String>;
}

/// Errors produced by the framework itself, independent of the entity type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the response")]
    ActorDropped,
    #[error("Rejected: {0}")]
    Rejected(String),
}

// =============================================================================
// 2. PAGINATION
// =============================================================================

/// One-based page selector. A zero page number or zero page size selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub per_page: u32,
}

impl Page {
    pub fn new(number: u32, per_page: u32) -> Self {
        Self { number, per_page }
    }

    /// Offset of the first record on this page, or None if the page is empty by construction.
    pub fn offset(&self) -> Option<usize> {
        if self.number == 0 || self.per_page == 0 {
            return None;
        }
        usize::try_from(self.number - 1)
            .ok()?
            .checked_mul(usize::try_from(self.per_page).ok()?)
    }

    /// Slice `items` the way `items[(number-1)*per_page .. number*per_page]` would,
    /// clamped to the end of the list.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        match self.offset() {
            Some(offset) => items
                .iter()
                .skip(offset)
                .take(self.per_page as usize)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }
}

// =============================================================================
// 3. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        page: Page,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<Option<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    #[cfg(test)]
    Count {
        respond_to: Response<usize>,
    },
}

// =============================================================================
// 4. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns an insertion-ordered list of entities. Requests are handled one at a
/// time, so the list has a single writer.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Vec<T>,
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
            store: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs until every client has been dropped.
    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        info!("Actor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_get(&id)));
                }
                ResourceRequest::List { page, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_list(page)));
                }
                ResourceRequest::Update { id, update, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, update));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_delete(id)));
                }
                #[cfg(test)]
                ResourceRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }

        info!("Actor stopped");
    }

    fn position(&self, id: &T::Id) -> Option<usize> {
        self.store.iter().position(|item| item.id() == id)
    }

    #[instrument(skip(self, params))]
    fn handle_create(&mut self, params: T::CreateParams) -> Result<T, FrameworkError> {
        debug!("Processing create request");
        let id = (self.next_id_fn)();
        let item = T::from_create_params(id.clone(), params).map_err(FrameworkError::Rejected)?;
        self.store.push(item.clone());
        info!(id = %id, "Item created");
        Ok(item)
    }

    #[instrument(fields(id = %id), skip(self, id))]
    fn handle_get(&self, id: &T::Id) -> Option<T> {
        debug!("Processing get request");
        self.position(id).map(|index| self.store[index].clone())
    }

    #[instrument(fields(page = page.number, per_page = page.per_page), skip(self, page))]
    fn handle_list(&self, page: Page) -> Vec<T> {
        debug!("Processing list request");
        let items = page.slice(&self.store);
        debug!(returned = items.len(), total = self.store.len(), "Listed items");
        items
    }

    #[instrument(fields(id = %id), skip(self, id, update))]
    fn handle_update(&mut self, id: T::Id, update: T::Update) -> Result<Option<T>, FrameworkError> {
        debug!("Processing update request");
        let Some(index) = self.position(&id) else {
            warn!("Item not found for update");
            return Ok(None);
        };

        // Apply to a copy so a rejected update leaves the stored record untouched.
        let mut item = self.store[index].clone();
        item.on_update(update).map_err(FrameworkError::Rejected)?;
        self.store[index] = item.clone();
        info!("Item updated");
        Ok(Some(item))
    }

    #[instrument(fields(id = %id), skip(self, id))]
    fn handle_delete(&mut self, id: T::Id) -> Option<T> {
        debug!("Processing delete request");
        match self.position(&id) {
            Some(index) => {
                let item = self.store.remove(index);
                info!(remaining = self.store.len(), "Item removed");
                Some(item)
            }
            None => {
                warn!("Item not found for delete");
                None
            }
        }
    }
}

// =============================================================================
// 5. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self, page: Page) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { page, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, update, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Count { respond_to })
            .await
    }
}

// =============================================================================
// 6. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
        text: String,
    }

    #[derive(Debug)]
    struct NoteCreate {
        text: String,
    }

    #[derive(Debug)]
    struct NoteUpdate {
        text: String,
    }

    impl Entity for Note {
        type Id = String;
        type CreateParams = NoteCreate;
        type Update = NoteUpdate;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create_params(id: String, params: NoteCreate) -> Result<Self, String> {
            if params.text.is_empty() {
                return Err("text required".to_string());
            }
            Ok(Self { id, text: params.text })
        }

        fn on_update(&mut self, update: NoteUpdate) -> Result<(), String> {
            if update.text.is_empty() {
                return Err("text required".to_string());
            }
            self.text = update.text;
            Ok(())
        }
    }

    fn start() -> ResourceClient<Note> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || counter.fetch_add(1, Ordering::SeqCst).to_string();
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    async fn seed(client: &ResourceClient<Note>, n: usize) {
        for i in 0..n {
            client
                .create(NoteCreate { text: format!("note {}", i) })
                .await
                .unwrap();
        }
    }

    #[test]
    fn test_page_slice_matches_array_slice() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(Page::new(1, 10).slice(&items), (0..10).collect::<Vec<_>>());
        assert_eq!(Page::new(3, 10).slice(&items), (20..25).collect::<Vec<_>>());
        assert!(Page::new(4, 10).slice(&items).is_empty());
        assert!(Page::new(0, 10).slice(&items).is_empty());
        assert!(Page::new(1, 0).slice(&items).is_empty());
        assert!(Page::new(u32::MAX, u32::MAX).slice(&items).is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let client = start();

        let first = client.create(NoteCreate { text: "a".into() }).await.unwrap();
        let second = client.create(NoteCreate { text: "b".into() }).await.unwrap();

        assert_eq!(first.id, "1");
        assert_eq!(second.id, "2");
        assert_eq!(client.get("2".into()).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_rejected_create_stores_nothing() {
        let client = start();

        let result = client.create(NoteCreate { text: String::new() }).await;
        assert_eq!(result, Err(FrameworkError::Rejected("text required".into())));
        assert_eq!(client.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let client = start();
        seed(&client, 5).await;

        let page = client.list(Page::new(2, 2)).await.unwrap();
        let ids: Vec<_> = page.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "4"]);
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let client = start();
        seed(&client, 3).await;

        let updated = client
            .update("2".into(), NoteUpdate { text: "changed".into() })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated, Note { id: "2".into(), text: "changed".into() });

        let all = client.list(Page::new(1, 10)).await.unwrap();
        assert_eq!(all[1], updated);
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_record_unchanged() {
        let client = start();
        seed(&client, 1).await;

        let result = client.update("1".into(), NoteUpdate { text: String::new() }).await;
        assert!(matches!(result, Err(FrameworkError::Rejected(_))));
        assert_eq!(client.get("1".into()).await.unwrap().unwrap().text, "note 0");
    }

    #[tokio::test]
    async fn test_missing_ids_return_none() {
        let client = start();
        seed(&client, 2).await;

        let updated = client.update("9".into(), NoteUpdate { text: "x".into() }).await.unwrap();
        assert_eq!(updated, None);
        assert_eq!(client.delete("9".into()).await.unwrap(), None);
        assert_eq!(client.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_splices_and_ids_are_not_reused() {
        let client = start();
        seed(&client, 3).await;

        let removed = client.delete("2".into()).await.unwrap().unwrap();
        assert_eq!(removed.id, "2");
        assert_eq!(client.delete("2".into()).await.unwrap(), None);

        let next = client.create(NoteCreate { text: "later".into() }).await.unwrap();
        assert_eq!(next.id, "4");

        let ids: Vec<_> = client
            .list(Page::new(1, 10))
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
    }

    #[tokio::test]
    async fn test_closed_actor_reports_error() {
        let (actor, client) = ResourceActor::<Note>::new(1, || "1".to_string());
        drop(actor);

        let result = client.list(Page::new(1, 10)).await;
        assert_eq!(result, Err(FrameworkError::ActorClosed));
    }
}
