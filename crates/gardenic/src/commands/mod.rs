use gardenic::api::HttpSiteApi;
use gardenic::config::SiteConfig;
use gardenic::prelude::{println, *};

pub mod fetch;
pub mod render;
pub mod send;

/// Build the HTTP client from the environment and the global flags
pub fn site_api(global: &crate::Global) -> Result<HttpSiteApi> {
    let config = SiteConfig::from_env().with_overrides(global.base_url.clone())?;

    if global.verbose {
        println!("Site API Base: {}", config.base_url);
        println!();
    }

    HttpSiteApi::new(&config)
}
