use super::{ProductStore, StoreError};
use crate::models::{
    Creator, NewImage, NewProduct, Product, ProductChanges, ProductImage, ProductRecord, User,
};
use crate::services::query::{ProductFilter, Window};
use chrono::Utc;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug)]
struct Entry {
    // insertion counter, breaks created_at ties
    seq: u64,
    product: Product,
}

#[derive(Debug, Default)]
struct State {
    next_seq: u64,
    products: HashMap<Uuid, Entry>,
    images: Vec<ProductImage>,
    users: HashMap<String, User>,
}

impl State {
    fn record(&self, product: &Product) -> ProductRecord {
        let mut images: Vec<ProductImage> = self
            .images
            .iter()
            .filter(|image| image.product_id == product.id)
            .cloned()
            .collect();
        images.sort_by_key(|image| image.position);

        let creator = product
            .creator_id
            .as_ref()
            .and_then(|id| self.users.get(id))
            .map(|user| Creator {
                id: user.id.clone(),
                name: user.name.clone(),
            });

        ProductRecord {
            product: product.clone(),
            images,
            creator,
        }
    }

    fn matching(&self, filter: &ProductFilter) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self
            .products
            .values()
            .filter(|entry| filter.matches(&entry.product))
            .collect();
        // newest first
        entries.sort_by(|a, b| {
            b.product
                .created_at
                .cmp(&a.product.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        entries
    }

    fn attach_images(&mut self, product_id: Uuid, product_name: &str, images: &[NewImage]) {
        let now = Utc::now();
        for (position, image) in images.iter().enumerate() {
            self.images.push(ProductImage {
                id: Uuid::new_v4(),
                product_id,
                url: image.url.clone(),
                alt: image.resolve_alt(product_name),
                position: position as i32,
                created_at: now,
            });
        }
    }
}

/// Process-local store with the same semantics as the Postgres one.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    state: RwLock<State>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ProductStore for MemoryProductStore {
    async fn count(&self, filter: &ProductFilter) -> Result<i64, StoreError> {
        let state = self.state.read().await;
        Ok(state.matching(filter).len() as i64)
    }

    async fn list(
        &self,
        filter: &ProductFilter,
        window: Window,
    ) -> Result<Vec<ProductRecord>, StoreError> {
        let state = self.state.read().await;
        let skip = usize::try_from(window.skip).unwrap_or(usize::MAX);
        let take = usize::try_from(window.take).unwrap_or(0);

        Ok(state
            .matching(filter)
            .into_iter()
            .skip(skip)
            .take(take)
            .map(|entry| state.record(&entry.product))
            .collect())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<ProductRecord>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .products
            .get(&id)
            .map(|entry| state.record(&entry.product)))
    }

    async fn insert(&self, new_product: NewProduct) -> Result<ProductRecord, StoreError> {
        let mut state = self.state.write().await;
        let (product, images) = new_product.into_product(Uuid::new_v4(), Utc::now());

        state.attach_images(product.id, &product.name, &images);
        let seq = state.next_seq;
        state.next_seq += 1;
        let record_id = product.id;
        state.products.insert(record_id, Entry { seq, product });

        let product = &state.products[&record_id].product;
        Ok(state.record(product))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: ProductChanges,
    ) -> Result<Option<ProductRecord>, StoreError> {
        // the write guard makes the whole update one atomic step
        let mut state = self.state.write().await;
        let product = match state.products.get_mut(&id) {
            Some(entry) => {
                changes.apply(&mut entry.product);
                entry.product.updated_at = Utc::now();
                entry.product.clone()
            }
            None => return Ok(None),
        };

        if let Some(images) = &changes.images {
            state.images.retain(|image| image.product_id != id);
            state.attach_images(id, &product.name, images);
        }

        Ok(Some(state.record(&product)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        if state.products.remove(&id).is_none() {
            return Ok(false);
        }
        state.images.retain(|image| image.product_id != id);
        Ok(true)
    }

    async fn delete_all(&self) -> Result<(u64, u64), StoreError> {
        let mut state = self.state.write().await;
        let counts = (state.products.len() as u64, state.images.len() as u64);
        state.products.clear();
        state.images.clear();
        Ok(counts)
    }

    async fn images(&self, product_id: Uuid) -> Result<Vec<ProductImage>, StoreError> {
        let state = self.state.read().await;
        let mut images: Vec<ProductImage> = state
            .images
            .iter()
            .filter(|image| image.product_id == product_id)
            .cloned()
            .collect();
        images.sort_by_key(|image| image.position);
        Ok(images)
    }

    async fn categories(&self) -> Result<Vec<String>, StoreError> {
        let state = self.state.read().await;
        let categories: BTreeSet<String> = state
            .products
            .values()
            .map(|entry| entry.product.category.clone())
            .filter(|category| !category.is_empty())
            .collect();
        Ok(categories.into_iter().collect())
    }

    async fn brands(&self) -> Result<Vec<String>, StoreError> {
        let state = self.state.read().await;
        let brands: BTreeSet<String> = state
            .products
            .values()
            .filter_map(|entry| entry.product.brand.clone())
            .filter(|brand| !brand.is_empty())
            .collect();
        Ok(brands.into_iter().collect())
    }

    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state.users.insert(user.id.clone(), user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::query::{Paging, PriceRange};

    fn new_product(name: &str, category: &str, price: f64, images: &[&str]) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: format!("{name} description"),
            price,
            category: category.to_string(),
            brand: None,
            stock: 1,
            creator_id: None,
            images: images
                .iter()
                .map(|url| NewImage {
                    url: url.to_string(),
                    alt: None,
                })
                .collect(),
        }
    }

    fn urls(record: &ProductRecord) -> Vec<&str> {
        record.images.iter().map(|image| image.url.as_str()).collect()
    }

    #[tokio::test]
    async fn list_is_newest_first_and_windowed() {
        let store = MemoryProductStore::new();
        for i in 0..5 {
            store
                .insert(new_product(&format!("p{i}"), "BOOKS", 10.0, &[]))
                .await
                .unwrap();
        }

        let filter = ProductFilter::default();
        let page = store
            .list(&filter, Paging { page: 1, limit: 2 }.window())
            .await
            .unwrap();
        let names: Vec<&str> = page.iter().map(|r| r.product.name.as_str()).collect();
        assert_eq!(names, vec!["p4", "p3"]);

        let last = store
            .list(&filter, Paging { page: 3, limit: 2 }.window())
            .await
            .unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].product.name, "p0");

        assert_eq!(store.count(&filter).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn count_uses_the_same_predicate() {
        let store = MemoryProductStore::new();
        store.insert(new_product("cheap", "HOME", 99.99, &[])).await.unwrap();
        store.insert(new_product("mid", "HOME", 150.0, &[])).await.unwrap();

        let filter = ProductFilter {
            price: Some(PriceRange {
                min: Some(100.0),
                max: Some(200.0),
            }),
            ..Default::default()
        };
        let window = Paging::default().window();
        let page = store.list(&filter, window).await.unwrap();

        assert_eq!(store.count(&filter).await.unwrap(), page.len() as i64);
        assert_eq!(page[0].product.name, "mid");
    }

    #[tokio::test]
    async fn update_replaces_images() {
        let store = MemoryProductStore::new();
        let record = store
            .insert(new_product("lamp", "HOME", 20.0, &["a", "b"]))
            .await
            .unwrap();
        assert_eq!(urls(&record), vec!["a", "b"]);

        let changes = ProductChanges {
            images: Some(vec![NewImage {
                url: "c".to_string(),
                alt: None,
            }]),
            ..Default::default()
        };
        let updated = store.update(record.product.id, changes).await.unwrap().unwrap();
        assert_eq!(urls(&updated), vec!["c"]);
        assert_eq!(updated.images[0].alt, "lamp image");
        assert_eq!(updated.images[0].position, 0);
    }

    #[tokio::test]
    async fn update_of_missing_product_is_none() {
        let store = MemoryProductStore::new();
        let result = store
            .update(Uuid::new_v4(), ProductChanges::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_cascades_to_images() {
        let store = MemoryProductStore::new();
        let record = store
            .insert(new_product("lamp", "HOME", 20.0, &["a", "b"]))
            .await
            .unwrap();
        let id = record.product.id;

        assert!(store.delete(id).await.unwrap());
        assert!(store.images(id).await.unwrap().is_empty());
        assert!(store.fetch(id).await.unwrap().is_none());
        assert!(!store.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn creator_is_a_lookup() {
        let store = MemoryProductStore::new();
        let admin = User {
            id: "admin-1".to_string(),
            name: "Admin User".to_string(),
            email: "admin@example.com".to_string(),
            role: "admin".to_string(),
        };
        store.save_user(&admin).await.unwrap();

        let mut with_creator = new_product("lamp", "HOME", 20.0, &[]);
        with_creator.creator_id = Some(admin.id.clone());
        let record = store.insert(with_creator).await.unwrap();
        assert_eq!(record.creator.unwrap().name, "Admin User");

        let mut dangling = new_product("mug", "HOME", 5.0, &[]);
        dangling.creator_id = Some("gone".to_string());
        let record = store.insert(dangling).await.unwrap();
        assert!(record.creator.is_none());
    }

    #[tokio::test]
    async fn distinct_categories_and_brands() {
        let store = MemoryProductStore::new();
        let mut a = new_product("a", "SPORTS", 1.0, &[]);
        a.brand = Some("Nike".to_string());
        let mut b = new_product("b", "BOOKS", 1.0, &[]);
        b.brand = Some("Nike".to_string());
        let c = new_product("c", "SPORTS", 1.0, &[]);
        for p in [a, b, c] {
            store.insert(p).await.unwrap();
        }

        assert_eq!(store.categories().await.unwrap(), vec!["BOOKS", "SPORTS"]);
        assert_eq!(store.brands().await.unwrap(), vec!["Nike"]);
    }
}
