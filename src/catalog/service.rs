//! Cached catalog access
//!
//! [`Catalog`] is what the rest of the storefront talks to. It fetches
//! through the CMS client, normalizes the documents and keeps them in
//! [`TtlCache`]s, so a CMS outage degrades to older (or built-in) data
//! instead of an error page.

use crate::cache::{Fetcher, Loader, TtlCache};
use crate::catalog::defaults::default_categories;
use crate::catalog::normalize;
use crate::catalog::ordering::order_by_rank;
use crate::catalog::types::{Category, Product, ProductQuery};
use crate::cms::client::CmsClient;
use crate::cms::images::ImageResolver;
use crate::config::schema::CacheConfig;
use crate::error::{OstrivError, OstrivResult};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Cache key of the category list
pub const CATEGORIES_KEY: &str = "categories";

/// Loads the category list, ordered by rank
pub struct CategoryFetcher {
    client: Arc<dyn CmsClient>,
    images: Arc<dyn ImageResolver>,
    limit: u32,
}

#[async_trait]
impl Fetcher<String, Vec<Category>> for CategoryFetcher {
    async fn fetch(&self, _key: &String) -> OstrivResult<Vec<Category>> {
        let raw = self.client.categories(self.limit).await?;
        let categories = normalize::categories(raw, self.images.as_ref());
        Ok(order_by_rank(&categories))
    }
}

/// Loads one slice of the product catalog
pub struct ProductFetcher {
    client: Arc<dyn CmsClient>,
    images: Arc<dyn ImageResolver>,
    limit: u32,
}

#[async_trait]
impl Fetcher<ProductQuery, Vec<Product>> for ProductFetcher {
    async fn fetch(&self, query: &ProductQuery) -> OstrivResult<Vec<Product>> {
        let raw = self.client.products(query.where_clause(), self.limit).await?;
        Ok(normalize::products(raw, self.images.as_ref()))
    }
}

/// Categories and products served through the TTL caches
pub struct Catalog {
    categories: TtlCache<String, Vec<Category>>,
    products: Arc<TtlCache<ProductQuery, Vec<Product>>>,
    images: Arc<dyn ImageResolver>,
}

impl Catalog {
    /// `page_limit` caps the documents requested per query
    pub fn new(
        client: Arc<dyn CmsClient>,
        images: Arc<dyn ImageResolver>,
        cache: &CacheConfig,
        page_limit: u32,
    ) -> Self {
        let categories = Loader::new(
            Arc::new(CategoryFetcher {
                client: Arc::clone(&client),
                images: Arc::clone(&images),
                limit: page_limit,
            }),
            cache.ttl(),
        );
        let products = Loader::new(
            Arc::new(ProductFetcher {
                client,
                images: Arc::clone(&images),
                limit: page_limit,
            }),
            cache.ttl(),
        );

        Self {
            categories: TtlCache::new(categories, cache.degraded_ttl()),
            products: Arc::new(TtlCache::new(products, cache.degraded_ttl())),
            images,
        }
    }

    /// Category list; never fails
    ///
    /// When the CMS has never answered, the built-in list is served under
    /// the degraded TTL and the CMS is asked again once that expires.
    pub async fn categories(&self) -> Arc<Vec<Category>> {
        let key = CATEGORIES_KEY.to_string();
        match self.categories.get(&key).await {
            Ok(categories) => categories,
            Err(err) => {
                warn!("Categories unavailable, serving built-in list: {}", err);
                let defaults = order_by_rank(&default_categories(self.images.as_ref()));
                self.categories.install_degraded(&key, defaults)
            }
        }
    }

    /// Whether the category list currently served is a fallback
    pub fn categories_degraded(&self) -> bool {
        self.categories
            .loader()
            .entry(&CATEGORIES_KEY.to_string())
            .is_some_and(|entry| entry.is_degraded())
    }

    /// Products for `query`; an empty list when the CMS cannot be reached
    pub async fn products(&self, query: &ProductQuery) -> Arc<Vec<Product>> {
        match self.products.get(query).await {
            Ok(products) => products,
            Err(err) => {
                warn!("Products unavailable for {}: {}", query, err);
                Arc::new(Vec::new())
            }
        }
    }

    /// The product with `slug`
    ///
    /// Unlike [`Catalog::products`], CMS failures are returned so that a
    /// missing product and an unreachable CMS stay distinguishable.
    pub async fn product_by_slug(&self, slug: &str) -> OstrivResult<Product> {
        let products = self
            .products
            .get(&ProductQuery::Slug(slug.to_string()))
            .await?;

        products
            .first()
            .cloned()
            .ok_or_else(|| OstrivError::ProductNotFound(slug.to_string()))
    }

    /// The product cache, shared with search sessions
    pub fn product_cache(&self) -> Arc<TtlCache<ProductQuery, Vec<Product>>> {
        Arc::clone(&self.products)
    }

    pub fn images(&self) -> &Arc<dyn ImageResolver> {
        &self.images
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeCms;
    use super::*;
    use crate::cms::images::CmsImageResolver;
    use std::time::Duration;

    fn catalog(cms: &Arc<FakeCms>) -> Catalog {
        Catalog::new(
            Arc::clone(cms) as Arc<dyn CmsClient>,
            Arc::new(CmsImageResolver::new("https://cms.test")),
            &CacheConfig::default(),
            100,
        )
    }

    fn slugs(categories: &[Category]) -> Vec<&str> {
        categories.iter().map(|c| c.slug.as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn categories_are_ordered_by_rank() {
        let cms = FakeCms::hardware_store();
        let catalog = catalog(&cms);

        let categories = catalog.categories().await;

        assert_eq!(slugs(&categories), vec!["misc", "drills", "generators"]);
        assert_eq!(categories[0].id, "misc");
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_range_ttls_from_config_are_served() {
        let cache: CacheConfig = toml::from_str(
            "ttl_secs = 9223372036854775807\ndegraded_ttl_secs = 18446744073709551615\n",
        )
        .unwrap();
        let build = |cms: &Arc<FakeCms>| {
            Catalog::new(
                Arc::clone(cms) as Arc<dyn CmsClient>,
                Arc::new(CmsImageResolver::new("https://cms.test")),
                &cache,
                100,
            )
        };

        let cms = FakeCms::hardware_store();
        let catalog = build(&cms);
        assert_eq!(catalog.categories().await.len(), 3);
        assert_eq!(catalog.categories().await.len(), 3);
        assert_eq!(cms.category_calls(), 1);

        let offline = FakeCms::hardware_store();
        offline.set_failing(true);
        let catalog = build(&offline);
        assert!(!catalog.categories().await.is_empty());
        assert!(catalog.categories_degraded());
        assert!(catalog.products(&ProductQuery::Hit).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_category_loads_share_one_request() {
        let cms = FakeCms::hardware_store();
        let catalog = catalog(&cms);

        let (a, b) = tokio::join!(catalog.categories(), catalog.categories());

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cms.category_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_cms_serves_builtin_categories_then_retries() {
        let cms = FakeCms::hardware_store();
        cms.set_failing(true);
        let catalog = catalog(&cms);

        let categories = catalog.categories().await;
        assert!(categories.iter().any(|c| c.slug == "generators"));
        assert!(categories.windows(2).all(|w| w[0].order <= w[1].order));
        assert!(categories[0].image.starts_with("https://cms.test/"));
        assert_eq!(cms.category_calls(), 1);
        assert!(catalog.categories_degraded());

        // Served from the degraded entry without asking the CMS
        catalog.categories().await;
        assert_eq!(cms.category_calls(), 1);

        cms.set_failing(false);
        tokio::time::advance(Duration::from_secs(31)).await;

        let categories = catalog.categories().await;
        assert_eq!(cms.category_calls(), 2);
        assert_eq!(slugs(&categories), vec!["misc", "drills", "generators"]);
        assert!(!catalog.categories_degraded());
    }

    #[tokio::test(start_paused = true)]
    async fn outage_after_success_keeps_cms_categories() {
        let cms = FakeCms::hardware_store();
        let catalog = catalog(&cms);
        let first = catalog.categories().await;

        cms.set_failing(true);
        tokio::time::advance(Duration::from_secs(61)).await;

        let second = catalog.categories().await;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cms.category_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn product_failure_is_empty_and_not_cached() {
        let cms = FakeCms::hardware_store();
        cms.set_failing(true);
        let catalog = catalog(&cms);

        assert!(catalog.products(&ProductQuery::All).await.is_empty());

        cms.set_failing(false);
        assert_eq!(catalog.products(&ProductQuery::All).await.len(), 3);
        assert_eq!(cms.product_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn product_queries_send_filters() {
        let cms = FakeCms::hardware_store();
        let catalog = catalog(&cms);

        catalog.products(&ProductQuery::Hit).await;
        catalog
            .products(&ProductQuery::Category("drills".to_string()))
            .await;

        let filters = cms.filters();
        assert_eq!(filters[0], ProductQuery::Hit.where_clause());
        assert_eq!(
            filters[1].as_ref().unwrap()["category.slug"]["equals"],
            "drills"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn product_by_slug() {
        let cms = FakeCms::hardware_store();
        let catalog = catalog(&cms);

        let product = catalog.product_by_slug("makita-hp").await.unwrap();
        assert_eq!(product.name, "Hammer drill");
        assert_eq!(product.brand_title(), "Makita");

        let err = catalog.product_by_slug("missing").await.unwrap_err();
        assert!(matches!(err, OstrivError::ProductNotFound(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn product_by_slug_surfaces_outage() {
        let cms = FakeCms::hardware_store();
        cms.set_failing(true);
        let catalog = catalog(&cms);

        let err = catalog.product_by_slug("makita-hp").await.unwrap_err();
        assert!(err.is_retryable());
    }
}
