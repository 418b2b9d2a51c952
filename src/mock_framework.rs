//! # Mock Framework
//!
//! Utilities for testing orchestration clients in isolation.
//!
//! Instead of spinning up a real store actor, a mock client sends its requests
//! to a channel the test controls. The test inspects each request as it
//! arrives, asserts it is the expected one, and answers through the bundled
//! oneshot sender, simulating success, failure, or lost stock
//! deterministically.

use tokio::sync::mpsc;

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};
use crate::cart_actor::{CartRequest, CartResponse};
use crate::clients::CartStoreClient;
use crate::domain::CartLine;

pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

pub fn create_mock_cart_client(buffer_size: usize) -> (CartStoreClient, mpsc::Receiver<CartRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CartStoreClient::new(sender), receiver)
}

/// Assert the next store request is a `Create` and hand back its payload and
/// responder.
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreatePayload, Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

pub async fn expect_cart_lines(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(String, CartResponse<Vec<CartLine>>)> {
    match receiver.recv().await {
        Some(CartRequest::Lines { user_id, respond_to }) => Some((user_id, respond_to)),
        _ => None,
    }
}

pub async fn expect_cart_clear(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(String, CartResponse<()>)> {
    match receiver.recv().await {
        Some(CartRequest::Clear { user_id, respond_to }) => Some((user_id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Product, ProductCreate, Unit};

    #[tokio::test]
    async fn mock_client_surfaces_scripted_responses() {
        let (client, mut receiver) = create_mock_client::<Product>(8);

        let create_task = tokio::spawn(async move {
            client
                .create(ProductCreate {
                    name: "Tomato".into(),
                    price: 50.0,
                    quantity: 10,
                    unit: Unit::Kg,
                    category: Category::Vegetables,
                    image: "tomato.jpg".into(),
                    farmer_id: "farmer_1".into(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Tomato");
        responder.send(Ok("product_1".to_string())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok("product_1".to_string()));
    }
}
