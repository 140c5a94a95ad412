//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination (fixed page sizes per screen)
// =============================================================================

/// Page size for the orders screen
pub const ORDERS_PAGE_SIZE: u64 = 5;

/// Page size for the customers screen
pub const CUSTOMERS_PAGE_SIZE: u64 = 5;

/// Page size for the products screen
pub const PRODUCTS_PAGE_SIZE: u64 = 8;

/// Page size for product reviews
pub const REVIEWS_PAGE_SIZE: u64 = 5;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

// =============================================================================
// Remote data store
// =============================================================================

/// REST path prefix of the hosted data store
pub const STORE_REST_PATH: &str = "/rest/v1";

/// Auth provider path prefix
pub const STORE_AUTH_PATH: &str = "/auth/v1";

/// Object storage path prefix
pub const STORE_STORAGE_PATH: &str = "/storage/v1";

/// Bucket holding product images
pub const PRODUCT_IMAGE_BUCKET: &str = "product-images";

/// API key header used by the hosted store
pub const STORE_API_KEY_HEADER: &str = "apikey";

// =============================================================================
// Authentication
// =============================================================================

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

// =============================================================================
// Hosted chat service
// =============================================================================

/// Default chat model identifier
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Character cap for the products snapshot embedded in assistant prompts
pub const ASSISTANT_PRODUCTS_SNAPSHOT_CHARS: usize = 8_000;

/// Character cap for the users snapshot embedded in assistant prompts
pub const ASSISTANT_USERS_SNAPSHOT_CHARS: usize = 3_000;

/// Character cap for the orders snapshot embedded in assistant prompts
pub const ASSISTANT_ORDERS_SNAPSHOT_CHARS: usize = 4_000;

// =============================================================================
// Join defaults (applied when a foreign row is missing)
// =============================================================================

/// Customer name shown when no user row matches an order
pub const UNKNOWN_USER_NAME: &str = "Unknown";

/// Shipping address shown when the user row has none
pub const UNKNOWN_ADDRESS: &str = "Not Provided";

/// Payment method shown when no payment row matches an order
pub const UNKNOWN_PAYMENT_METHOD: &str = "Unknown";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;
