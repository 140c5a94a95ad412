//! Product service - catalog listing, lifecycle and image uploads.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::PRODUCTS_PAGE_SIZE;
use crate::domain::{NewProduct, Product, UpdateProduct};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{DataStore, ObjectStorage};
use crate::types::{filter_paginate, ListQuery, PageView};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductService: Send + Sync {
    /// One page of the catalog, filtered by name/category.
    async fn list(&self, query: ListQuery) -> AppResult<PageView<Product>>;

    async fn get(&self, id: i64) -> AppResult<Product>;

    async fn create(&self, product: NewProduct) -> AppResult<Product>;

    async fn update(&self, id: i64, patch: UpdateProduct) -> AppResult<Product>;

    async fn remove(&self, id: i64, query: ListQuery) -> AppResult<PageView<Product>>;

    /// Upload an image blob and append its public URL to the product.
    async fn attach_image(
        &self,
        id: i64,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<Product>;

    /// Remove an image: delete the blob and strip its URL from the product.
    async fn detach_image(&self, id: i64, image_url: &str) -> AppResult<Product>;
}

pub struct ProductManager {
    store: Arc<dyn DataStore>,
    storage: Arc<dyn ObjectStorage>,
}

impl ProductManager {
    pub fn new(store: Arc<dyn DataStore>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { store, storage }
    }

    fn check_prices(price: Decimal, discounted: Decimal) -> AppResult<()> {
        if price < Decimal::ZERO || discounted < Decimal::ZERO {
            return Err(AppError::validation("Price cannot be negative"));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductService for ProductManager {
    async fn list(&self, query: ListQuery) -> AppResult<PageView<Product>> {
        let products = self.store.fetch_products().await?;
        Ok(filter_paginate(
            products,
            query.q.as_deref(),
            query.page,
            PRODUCTS_PAGE_SIZE,
        ))
    }

    async fn get(&self, id: i64) -> AppResult<Product> {
        self.store.fetch_product(id).await?.ok_or_not_found()
    }

    async fn create(&self, product: NewProduct) -> AppResult<Product> {
        Self::check_prices(product.price, product.discounted_price)?;
        self.store.insert_product(&product).await
    }

    async fn update(&self, id: i64, patch: UpdateProduct) -> AppResult<Product> {
        Self::check_prices(
            patch.price.unwrap_or(Decimal::ZERO),
            patch.discounted_price.unwrap_or(Decimal::ZERO),
        )?;
        self.store.update_product(id, &patch).await
    }

    async fn remove(&self, id: i64, query: ListQuery) -> AppResult<PageView<Product>> {
        self.store.delete_product(id).await?;
        self.list(query).await
    }

    async fn attach_image(
        &self,
        id: i64,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<Product> {
        let product = self.store.fetch_product(id).await?.ok_or_not_found()?;

        let path = format!("{id}/{}-{filename}", Uuid::new_v4());
        let url = self.storage.upload(&path, bytes, content_type).await?;

        let mut images = product.images;
        images.push(url);
        let patch = UpdateProduct {
            images: Some(images),
            ..UpdateProduct::default()
        };
        self.store.update_product(id, &patch).await
    }

    async fn detach_image(&self, id: i64, image_url: &str) -> AppResult<Product> {
        let product = self.store.fetch_product(id).await?.ok_or_not_found()?;

        if !product.images.iter().any(|url| url == image_url) {
            return Err(AppError::validation(
                "Image is not attached to this product",
            ));
        }

        // Blobs outside our bucket carry no path; only the URL is removed.
        if let Some(path) = crate::infra::object_path(image_url) {
            self.storage.delete(path).await?;
        }

        let images: Vec<String> = product
            .images
            .into_iter()
            .filter(|url| url != image_url)
            .collect();
        let patch = UpdateProduct {
            images: Some(images),
            ..UpdateProduct::default()
        };
        self.store.update_product(id, &patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: None,
            price: dec!(20),
            discounted_price: dec!(15),
            category: Some("Frames".to_string()),
            stock: 3,
            try_on_compatible: false,
            features: vec![],
            colors: vec![],
            sizes: vec![],
            images: vec![],
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_name_and_category() {
        let mut store = crate::infra::MockDataStore::new();
        store.expect_fetch_products().returning(|| {
            Ok(vec![product(1, "Aviator Classic"), product(2, "Round Metal")])
        });
        let storage = crate::infra::MockObjectStorage::new();

        let page = ProductManager::new(Arc::new(store), Arc::new(storage))
            .list(ListQuery {
                q: Some("aviator".to_string()),
                page: 1,
            })
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].name, "Aviator Classic");
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price() {
        let store = crate::infra::MockDataStore::new();
        let storage = crate::infra::MockObjectStorage::new();

        let result = ProductManager::new(Arc::new(store), Arc::new(storage))
            .create(NewProduct {
                name: "Bad".to_string(),
                description: None,
                price: dec!(-1),
                discounted_price: dec!(0),
                category: None,
                stock: 0,
                try_on_compatible: false,
                features: vec![],
                colors: vec![],
                sizes: vec![],
                images: vec![],
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_unknown_product_is_not_found() {
        let mut store = crate::infra::MockDataStore::new();
        store.expect_fetch_product().returning(|_| Ok(None));
        let storage = crate::infra::MockObjectStorage::new();

        let result = ProductManager::new(Arc::new(store), Arc::new(storage))
            .get(99)
            .await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_detach_image_deletes_the_blob_and_strips_the_url() {
        let url = "https://store.example/storage/v1/object/public/product-images/1/abc-img.png";
        let mut store = crate::infra::MockDataStore::new();
        store.expect_fetch_product().returning(move |id| {
            let mut p = product(id, "Aviator");
            p.images = vec![url.to_string()];
            Ok(Some(p))
        });
        store
            .expect_update_product()
            .withf(|_, patch| patch.images.as_ref().is_some_and(|images| images.is_empty()))
            .returning(|id, _| Ok(product(id, "Aviator")));
        let mut storage = crate::infra::MockObjectStorage::new();
        storage
            .expect_delete()
            .withf(|path| path == "1/abc-img.png")
            .times(1)
            .returning(|_| Ok(()));

        let updated = ProductManager::new(Arc::new(store), Arc::new(storage))
            .detach_image(1, url)
            .await
            .unwrap();

        assert!(updated.images.is_empty());
    }

    #[tokio::test]
    async fn test_detach_of_an_unattached_image_is_rejected() {
        let mut store = crate::infra::MockDataStore::new();
        store
            .expect_fetch_product()
            .returning(|id| Ok(Some(product(id, "Aviator"))));
        let storage = crate::infra::MockObjectStorage::new();

        let result = ProductManager::new(Arc::new(store), Arc::new(storage))
            .detach_image(1, "https://cdn.example/unrelated.png")
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_attach_image_appends_the_public_url() {
        let mut store = crate::infra::MockDataStore::new();
        store
            .expect_fetch_product()
            .returning(|id| Ok(Some(product(id, "Aviator"))));
        store
            .expect_update_product()
            .withf(|_, patch| {
                patch
                    .images
                    .as_ref()
                    .is_some_and(|images| images == &["https://cdn.example/img.png"])
            })
            .returning(|id, _| {
                let mut p = product(id, "Aviator");
                p.images = vec!["https://cdn.example/img.png".to_string()];
                Ok(p)
            });
        let mut storage = crate::infra::MockObjectStorage::new();
        storage
            .expect_upload()
            .returning(|_, _, _| Ok("https://cdn.example/img.png".to_string()));

        let updated = ProductManager::new(Arc::new(store), Arc::new(storage))
            .attach_image(1, "img.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();

        assert_eq!(updated.images, vec!["https://cdn.example/img.png"]);
    }
}
