pub mod context;

use std::path::Path;

use log::{info, warn};

use crate::browser::WebDriverSession;
use crate::error::PicResult;
use crate::http::UreqClient;
use crate::import::{self, ImportStats};
use crate::ops::run_ops::{process_contacts, RunSummary};
use crate::picture::JpegCodec;
use crate::providers::{EmailHashProvider, PictureProvider, ProviderKind, SocialSearchProvider};
use crate::store::SqliteContactStore;
use context::RunContext;

/// Fill in missing pictures for every contact, skipping `disabled` providers.
pub fn run(ctx: &RunContext, disabled: &[ProviderKind]) -> PicResult<RunSummary> {
    let database = ctx.database_path();
    info!("Using contact store {}", database.display());
    let mut store = SqliteContactStore::open(&database)?;

    let kinds = ctx.config.enabled_providers(disabled);
    let mut providers = build_providers(ctx, &kinds);
    if providers.is_empty() {
        warn!("No picture providers enabled; only cached pictures will be applied");
    }

    let codec = JpegCodec::default();
    process_contacts(&mut store, &codec, &mut providers, &ctx.paths.picture_dir())
}

/// Load contacts from a JSON file into the contact store.
pub fn import(ctx: &RunContext, json_path: &Path) -> PicResult<ImportStats> {
    let store = SqliteContactStore::open(&ctx.database_path())?;
    import::import_json(json_path, &store)
}

fn build_providers(ctx: &RunContext, kinds: &[ProviderKind]) -> Vec<Box<dyn PictureProvider>> {
    let mut providers: Vec<Box<dyn PictureProvider>> = Vec::new();

    for kind in kinds {
        match kind {
            ProviderKind::Gravatar => providers.push(Box::new(EmailHashProvider::with_base_url(
                UreqClient::default(),
                &ctx.config.gravatar.base_url,
            ))),
            ProviderKind::LinkedIn => match start_linkedin(ctx) {
                Ok(provider) => providers.push(Box::new(provider)),
                Err(e) => warn!("LinkedIn provider unavailable: {}", e),
            },
        }
    }

    providers
}

fn start_linkedin(ctx: &RunContext) -> PicResult<SocialSearchProvider<WebDriverSession, UreqClient>> {
    let config = &ctx.config.linkedin;
    let profile_dir = ctx
        .paths
        .provider_cache_dir(ProviderKind::LinkedIn)
        .join("browser-profile");

    let session = WebDriverSession::start(&config.webdriver_url, &profile_dir)?;
    let mut provider = SocialSearchProvider::new(session, UreqClient::default())
        .with_element_timeout(config.element_timeout());
    provider.ensure_logged_in(config.credentials().as_ref(), config.login_timeout())?;
    Ok(provider)
}
