//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_action`] to assert behavior.

use std::time::Duration;

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use crate::admin_actor::{AdminAction, AdminActionResult};
use crate::clients::{AdminClient, StorageClient};
use crate::domain::{AdminAccount, AdminSession, StoredObject};
use tokio::sync::{mpsc, oneshot};

type Responder<R> = oneshot::Sender<Result<R, FrameworkError>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// Instead of spinning up a `ResourceActor`, the client sends to a channel the
/// test owns. The test reads each request off `receiver` and answers it, which
/// makes success, failure and delay deterministic.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreatePayload, Responder<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<Responder<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Patch, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Responder<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

pub fn mock_admin_client() -> (AdminClient, mpsc::Receiver<ResourceRequest<AdminAccount>>) {
    let (client, receiver) = create_mock_client(10);
    (AdminClient::new(client), receiver)
}

pub fn mock_storage_client() -> (StorageClient, mpsc::Receiver<ResourceRequest<StoredObject>>) {
    let (client, receiver) = create_mock_client(10);
    (StorageClient::new(client, Duration::from_secs(30)), receiver)
}

/// An admin client whose session checks succeed for `session.token` only.
/// Every other admin request is rejected.
pub fn approving_admin_client(session: &AdminSession) -> AdminClient {
    let (client, mut receiver) = mock_admin_client();
    let token = session.token.clone();
    tokio::spawn(async move {
        while let Some(request) = receiver.recv().await {
            match request {
                ResourceRequest::Action {
                    action: AdminAction::ValidateSession(candidate),
                    respond_to,
                    ..
                } => {
                    let _ = respond_to.send(Ok(AdminActionResult::ValidateSession(candidate == token)));
                }
                ResourceRequest::Action { respond_to, .. } => {
                    let _ = respond_to.send(Err(FrameworkError::Rejected("not scripted".into())));
                }
                _ => {}
            }
        }
    });
    client
}

pub fn test_session() -> AdminSession {
    AdminSession {
        username: "admin".into(),
        token: "token-1".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, CategoryCreate};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Category>(10);

        let create_task = tokio::spawn(async move { client.create(CategoryCreate::named("Home")).await });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Home");
        responder.send(Ok("Home".to_string())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok("Home".to_string()));
    }

    #[tokio::test]
    async fn test_approving_admin_client() {
        let session = test_session();
        let admin = approving_admin_client(&session);
        assert!(admin.authorize(&session).await.is_ok());

        let forged = AdminSession {
            token: "forged".into(),
            ..session
        };
        assert!(admin.authorize(&forged).await.is_err());
    }
}
