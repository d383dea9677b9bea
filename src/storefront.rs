//! Storefront services wired from configuration

use crate::catalog::Catalog;
use crate::cms::{http_agent, CmsEndpoint, CmsImageResolver, ContactRelay, GraphqlClient};
use crate::config::Config;
use crate::error::OstrivResult;
use crate::navigation::Navigator;
use crate::search::SearchSession;
use std::sync::Arc;
use tracing::debug;

/// The catalog, search and contact relay sharing one CMS connection
pub struct Storefront {
    config: Config,
    endpoint: CmsEndpoint,
    agent: ureq::Agent,
    catalog: Catalog,
}

impl Storefront {
    /// Resolve the CMS endpoint and build the services on top of it
    ///
    /// Fails when the configured CMS URL is invalid or points back at the
    /// storefront's own origin.
    pub fn from_config(config: &Config) -> OstrivResult<Self> {
        let endpoint = CmsEndpoint::resolve(&config.cms, &config.site.url)?;
        let agent = http_agent(config.cms.timeout());

        let client = Arc::new(GraphqlClient::new(&endpoint, agent.clone()));
        let images = Arc::new(CmsImageResolver::new(endpoint.base_url()));
        let catalog = Catalog::new(client, images, &config.cache, config.cms.page_limit);

        debug!("Storefront connected to {}", endpoint.graphql_url());

        Ok(Self {
            config: config.clone(),
            endpoint,
            agent,
            catalog,
        })
    }

    pub fn endpoint(&self) -> &CmsEndpoint {
        &self.endpoint
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn site_url(&self) -> &str {
        &self.config.site.url
    }

    /// A search box over the catalog's product cache
    pub fn search_session(&self, navigator: Arc<dyn Navigator>) -> SearchSession {
        SearchSession::new(self.catalog.product_cache(), navigator, &self.config.search)
    }

    pub fn contact_relay(&self) -> ContactRelay {
        ContactRelay::new(&self.endpoint, self.agent.clone())
    }
}
