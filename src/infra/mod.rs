//! Infrastructure layer - gateways to the hosted store, auth, object
//! storage and the chat completion service.

pub mod auth;
pub mod chat;
pub mod storage;
pub mod store;

pub use auth::{AuthGateway, AuthProvider, Credentials, PasswordChange, Session, SessionUser};
pub use chat::{ChatClient, ChatGateway, ChatMessage, TextFragments};
pub use storage::{object_path, BucketStorage, ObjectStorage};
pub use store::{Collection, DataStore, RestStore};

#[cfg(any(test, feature = "test-utils"))]
pub use auth::MockAuthProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use chat::MockChatClient;
#[cfg(any(test, feature = "test-utils"))]
pub use storage::MockObjectStorage;
#[cfg(any(test, feature = "test-utils"))]
pub use store::MockDataStore;
