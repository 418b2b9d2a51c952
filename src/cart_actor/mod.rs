//! Cart store.
//!
//! Unlike the generic resource stores, cart lines are keyed by the composite
//! `(user_id, product_id)`, so this is a hand-written service actor with its
//! own message enum. The actor processes one request at a time, which makes
//! add-to-cart an atomic upsert: two concurrent adds for the same pair always
//! increment one line, never create a duplicate.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

use crate::domain::CartLine;
use crate::error::CartError;

pub type CartResponse<T> = oneshot::Sender<Result<T, CartError>>;

#[derive(Debug)]
pub enum CartRequest {
    /// Upsert: create the line with quantity 1 or increment an existing one.
    Add {
        user_id: String,
        product_id: String,
        respond_to: CartResponse<CartLine>,
    },
    /// All lines for a user, oldest first.
    Lines {
        user_id: String,
        respond_to: CartResponse<Vec<CartLine>>,
    },
    /// Drop a single line. Removing an absent line is not an error.
    Remove {
        user_id: String,
        product_id: String,
        respond_to: CartResponse<()>,
    },
    /// Drop every line for a user. Checkout calls this after persisting the
    /// order.
    Clear {
        user_id: String,
        respond_to: CartResponse<()>,
    },
}

pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    lines: HashMap<(String, String), CartLine>,
}

impl CartService {
    pub fn new(buffer_size: usize) -> (Self, mpsc::Sender<CartRequest>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, lines: HashMap::new() };
        (service, sender)
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!("CartService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::Add { user_id, product_id, respond_to } => {
                    let line = self.upsert(user_id, product_id);
                    let _ = respond_to.send(Ok(line));
                }
                CartRequest::Lines { user_id, respond_to } => {
                    let _ = respond_to.send(Ok(self.lines_for(&user_id)));
                }
                CartRequest::Remove { user_id, product_id, respond_to } => {
                    self.lines.remove(&(user_id, product_id));
                    let _ = respond_to.send(Ok(()));
                }
                CartRequest::Clear { user_id, respond_to } => {
                    self.lines.retain(|(owner, _), _| owner != &user_id);
                    let _ = respond_to.send(Ok(()));
                }
            }
        }
        info!("CartService stopped");
    }

    fn upsert(&mut self, user_id: String, product_id: String) -> CartLine {
        let key = (user_id.clone(), product_id.clone());
        let line = self
            .lines
            .entry(key)
            .and_modify(|line| line.quantity += 1)
            .or_insert_with(|| {
                debug!(%user_id, %product_id, "Creating cart line");
                CartLine { user_id, product_id, quantity: 1, added_at: Utc::now() }
            });
        line.clone()
    }

    fn lines_for(&self, user_id: &str) -> Vec<CartLine> {
        let mut lines: Vec<CartLine> = self
            .lines
            .values()
            .filter(|line| line.user_id == user_id)
            .cloned()
            .collect();
        lines.sort_by(|a, b| a.added_at.cmp(&b.added_at));
        lines
    }
}
