//! Finds a contact's LinkedIn profile among first-degree connections and
//! downloads the full-size profile photo through a browser session.

use std::path::Path;
use std::time::Duration;

use log::{debug, info, warn};

use super::{PictureProvider, ProviderKind};
use crate::browser::{BrowserSession, POLL_INTERVAL};
use crate::error::{PicError, PicResult};
use crate::http::HttpClient;
use crate::matcher;
use crate::model::{Contact, SocialProfile, SocialService};

pub const PROFILE_PREFIX: &str = "https://www.linkedin.com/in/";
const PROFILE_PATH: &str = "/in/";
const FEED_URL: &str = "https://www.linkedin.com/feed/";
const LOGIN_URL: &str = "https://www.linkedin.com/login";
const SEARCH_URL: &str = "https://www.linkedin.com/search/results/people/";

/// Time for the photo viewer overlay to render after it is opened.
const OVERLAY_RENDER_DELAY: Duration = Duration::from_secs(2);
const DEFAULT_ELEMENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Classes LinkedIn puts on the enlarged photo in the viewer overlay.
const ENLARGED_PHOTO_CLASSES: [&str; 3] = [
    "pv-member-photo-modal__content-image",
    "pv-member-photo-modal__content-image--loaded",
    "profile-photo-edit__preview",
];

/// Where things are on LinkedIn pages.
pub mod page {
    use crate::browser::Locator;

    pub const PRIMARY_HEADING_CLASS: &str = "text-heading-xlarge";

    pub fn loaded() -> Locator {
        Locator::tag("main")
    }

    pub fn search_results() -> Locator {
        Locator::css(".reusable-search__result-container .entity-result__title-text a")
    }

    pub fn heading() -> Locator {
        Locator::tag("h1")
    }

    pub fn video_menu() -> Locator {
        Locator::class("pv-top-card__video-menu-trigger")
    }

    pub fn view_photo() -> Locator {
        Locator::css("[aria-label='View profile photo']")
    }

    pub fn photo_wrapper() -> Locator {
        Locator::class("pv-top-card__photo-wrapper")
    }

    pub fn image() -> Locator {
        Locator::tag("img")
    }

    pub fn login_username() -> Locator {
        Locator::css("#username")
    }

    pub fn login_password() -> Locator {
        Locator::css("#password")
    }

    pub fn login_submit() -> Locator {
        Locator::css("button[type='submit']")
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub struct SocialSearchProvider<B, H> {
    browser: B,
    http: H,
    element_timeout: Duration,
}

impl<B: BrowserSession, H: HttpClient> SocialSearchProvider<B, H> {
    pub fn new(browser: B, http: H) -> Self {
        Self {
            browser,
            http,
            element_timeout: DEFAULT_ELEMENT_TIMEOUT,
        }
    }

    pub fn with_element_timeout(mut self, timeout: Duration) -> Self {
        self.element_timeout = timeout;
        self
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// Make sure the browser profile is logged in, filling in `credentials`
    /// when given and otherwise waiting for the user to log in by hand.
    pub fn ensure_logged_in(
        &mut self,
        credentials: Option<&Credentials>,
        timeout: Duration,
    ) -> PicResult<()> {
        self.browser.navigate(FEED_URL)?;
        if !needs_login(&self.browser.current_url()?) {
            debug!("LinkedIn session already logged in");
            return Ok(());
        }

        match credentials {
            Some(credentials) => {
                info!("Logging in to LinkedIn as {}", credentials.email);
                self.browser.navigate(LOGIN_URL)?;
                let username = self.browser.wait_for(&page::login_username(), self.element_timeout)?;
                self.browser.type_text(&username, &credentials.email)?;
                let password = self.browser.wait_for(&page::login_password(), self.element_timeout)?;
                self.browser.type_text(&password, &credentials.password)?;
                let submit = self.browser.wait_for(&page::login_submit(), self.element_timeout)?;
                self.browser.click(&submit)?;
            }
            None => warn!(
                "Log in to LinkedIn in the browser window; waiting up to {}s",
                timeout.as_secs()
            ),
        }

        let attempts = (timeout.as_millis() / POLL_INTERVAL.as_millis()).max(1);
        for _ in 0..attempts {
            if !needs_login(&self.browser.current_url()?) {
                info!("LinkedIn login complete");
                return Ok(());
            }
            self.browser.pause(POLL_INTERVAL);
        }
        Err(PicError::Browser("LinkedIn login did not complete in time".into()))
    }

    /// The contact's profile url, searching first-degree connections when
    /// none is stored. A match found by search is stored on the contact.
    pub fn search_profile(&mut self, contact: &mut Contact) -> PicResult<Option<String>> {
        if let Some(url) = get_social(contact)? {
            return Ok(Some(url));
        }

        if contact.first_name.trim().is_empty() || contact.last_name.trim().is_empty() {
            debug!("{} needs a first and last name to search LinkedIn", contact.display_name());
            return Ok(None);
        }

        let full_name = contact.full_name();
        self.browser.navigate(&search_url(&full_name))?;
        self.browser.wait_for(&page::loaded(), self.element_timeout)?;

        let results = self.browser.find_elements(&page::search_results())?;
        let Some(first) = results.first() else {
            debug!("No LinkedIn connections named {}", full_name);
            return Ok(None);
        };

        match self.browser.attribute(first, "href")? {
            Some(href) => self.browser.navigate(&href)?,
            None => self.browser.click(first)?,
        }
        self.browser.wait_for(&page::heading(), self.element_timeout)?;

        if !self.primary_heading_matches(&full_name)? {
            debug!("First LinkedIn result for {} is someone else", full_name);
            return Ok(None);
        }

        let url = self.browser.current_url()?;
        set_social(contact, &url);
        info!("Resolved {} to {}", full_name, url);
        get_social(contact)
    }

    fn primary_heading_matches(&mut self, full_name: &str) -> PicResult<bool> {
        for heading in self.browser.find_elements(&page::heading())? {
            let class = self.browser.attribute(&heading, "class")?.unwrap_or_default();
            if !class.split_whitespace().any(|c| c == page::PRIMARY_HEADING_CLASS) {
                continue;
            }
            if matcher::matches(&self.browser.text(&heading)?, full_name) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Open the photo viewer on the current profile page. Video profiles hide
    /// the photo behind a context menu.
    fn open_photo_viewer(&mut self) -> PicResult<()> {
        match self.browser.find_element(&page::video_menu())? {
            Some(menu) => {
                self.browser.click(&menu)?;
                let view_photo = self.browser.wait_for(&page::view_photo(), self.element_timeout)?;
                self.browser.click(&view_photo)
            }
            None => {
                let wrapper = self.browser.wait_for(&page::photo_wrapper(), self.element_timeout)?;
                self.browser.click(&wrapper)
            }
        }
    }

    /// `src` of the enlarged photo, or `None` when the overlay has no image
    /// carrying one of the known classes.
    fn enlarged_photo_src(&mut self) -> PicResult<Option<String>> {
        for image in self.browser.find_elements(&page::image())? {
            let class = self.browser.attribute(&image, "class")?.unwrap_or_default();
            if class
                .split_whitespace()
                .any(|c| ENLARGED_PHOTO_CLASSES.contains(&c))
            {
                return Ok(Some(self.browser.attribute(&image, "src")?.unwrap_or_default()));
            }
        }
        Ok(None)
    }
}

impl<B: BrowserSession, H: HttpClient> PictureProvider for SocialSearchProvider<B, H> {
    fn kind(&self) -> ProviderKind {
        ProviderKind::LinkedIn
    }

    fn get_image(&mut self, contact: &mut Contact, output_path: &Path) -> PicResult<bool> {
        let Some(url) = self.search_profile(contact)? else {
            return Ok(false);
        };

        if !same_profile(&self.browser.current_url()?, &url) {
            self.browser.navigate(&url)?;
            self.browser.wait_for(&page::heading(), self.element_timeout)?;
        }

        self.open_photo_viewer()?;
        self.browser.pause(OVERLAY_RENDER_DELAY);

        let Some(src) = self.enlarged_photo_src()? else {
            warn!("No LinkedIn photo viewer image found for {}", contact.display_name());
            return Ok(false);
        };

        // A placeholder is rendered without an absolute source when the
        // member has no photo.
        if !src.starts_with("https://") {
            debug!("{} has no LinkedIn photo", contact.display_name());
            return Ok(false);
        }

        let response = self.http.get(&src)?;
        if response.status != 200 {
            debug!(
                "LinkedIn photo download for {} returned HTTP {}",
                contact.display_name(),
                response.status
            );
            return Ok(false);
        }

        std::fs::write(output_path, &response.body)?;
        Ok(true)
    }
}

/// The stored LinkedIn profile url, filling in and storing whichever of
/// url and username is missing.
pub fn get_social(contact: &mut Contact) -> PicResult<Option<String>> {
    let Some(profile) = contact.social_profile(SocialService::LinkedIn).cloned() else {
        return Ok(None);
    };

    let url = profile.url.filter(|u| !u.trim().is_empty());
    let username = profile.username.filter(|u| !u.trim().is_empty());

    match (url, username) {
        (Some(url), Some(_)) => Ok(Some(url)),
        (Some(url), None) => {
            match username_from_url(&url) {
                Some(username) => contact.set_social_profile(SocialProfile::new(
                    SocialService::LinkedIn,
                    Some(url.clone()),
                    Some(username),
                )),
                None => warn!(
                    "Cannot derive a LinkedIn username for {} from {}",
                    contact.display_name(),
                    url
                ),
            }
            Ok(Some(url))
        }
        (None, Some(username)) => {
            let url = profile_url(&username);
            contact.set_social_profile(SocialProfile::new(
                SocialService::LinkedIn,
                Some(url.clone()),
                Some(username),
            ));
            Ok(Some(url))
        }
        (None, None) => Err(PicError::DataIntegrity {
            contact: contact.display_name(),
            service: SocialService::LinkedIn.to_string(),
        }),
    }
}

/// Store `url` as the contact's LinkedIn profile, canonicalized when it
/// carries a username.
pub fn set_social(contact: &mut Contact, url: &str) {
    let profile = match username_from_url(url) {
        Some(username) => SocialProfile::new(
            SocialService::LinkedIn,
            Some(profile_url(&username)),
            Some(username),
        ),
        None => SocialProfile::new(SocialService::LinkedIn, Some(url.to_string()), None),
    };
    contact.set_social_profile(profile);
}

/// The path segment after `/in/`.
pub fn username_from_url(url: &str) -> Option<String> {
    let start = url.find(PROFILE_PATH)? + PROFILE_PATH.len();
    let username = url[start..]
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    if username.is_empty() {
        None
    } else {
        Some(username.to_string())
    }
}

pub fn profile_url(username: &str) -> String {
    format!("{}{}/", PROFILE_PREFIX, username.trim().trim_matches('/'))
}

/// People search restricted to first-degree connections.
pub fn search_url(full_name: &str) -> String {
    format!(
        "{}?keywords={}&network=%5B%22F%22%5D&origin=FACETED_SEARCH",
        SEARCH_URL,
        urlencoding::encode(full_name)
    )
}

fn needs_login(url: &str) -> bool {
    ["/login", "/authwall", "/checkpoint", "/uas/"]
        .iter()
        .any(|marker| url.contains(marker))
}

fn same_profile(a: &str, b: &str) -> bool {
    fn canonical(url: &str) -> &str {
        url.split(['?', '#']).next().unwrap_or_default().trim_end_matches('/')
    }
    canonical(a) == canonical(b)
}
