#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use contact_pictures::browser::{BrowserSession, ElementRef, Locator};
use contact_pictures::error::{PicError, PicResult};
use contact_pictures::http::{HttpClient, HttpResponse};
use contact_pictures::model::Contact;
use contact_pictures::providers::{PictureProvider, ProviderKind};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

// ==========================================================================
// IMAGES
// ==========================================================================

/// A PNG with a gradient so crops and scales are visible in the pixels.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

// ==========================================================================
// HTTP
// ==========================================================================

/// Canned responses by URL; anything unknown answers 404.
#[derive(Default)]
pub struct FakeHttp {
    routes: HashMap<String, HttpResponse>,
    broken: Vec<String>,
    requests: RefCell<Vec<String>>,
}

impl FakeHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, status: u16, body: &[u8]) -> Self {
        self.routes.insert(
            url.to_string(),
            HttpResponse {
                status,
                body: body.to_vec(),
            },
        );
        self
    }

    /// Requests to `url` fail at the transport level.
    pub fn broken(mut self, url: &str) -> Self {
        self.broken.push(url.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl HttpClient for FakeHttp {
    fn get(&self, url: &str) -> PicResult<HttpResponse> {
        self.requests.borrow_mut().push(url.to_string());
        if self.broken.iter().any(|u| u == url) {
            return Err(PicError::Http(format!("connection refused: {}", url)));
        }
        Ok(self.routes.get(url).cloned().unwrap_or(HttpResponse {
            status: 404,
            body: Vec::new(),
        }))
    }
}

// ==========================================================================
// PROVIDERS
// ==========================================================================

pub enum StubResult {
    Image(Vec<u8>),
    Nothing,
    Fail,
}

/// A provider with a fixed answer that counts how often it is asked.
pub struct StubProvider {
    kind: ProviderKind,
    result: StubResult,
    calls: Rc<Cell<usize>>,
}

impl StubProvider {
    pub fn new(result: StubResult) -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (
            Self {
                kind: ProviderKind::Gravatar,
                result,
                calls: Rc::clone(&calls),
            },
            calls,
        )
    }
}

impl PictureProvider for StubProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn get_image(&mut self, _contact: &mut Contact, output_path: &Path) -> PicResult<bool> {
        self.calls.set(self.calls.get() + 1);
        match &self.result {
            StubResult::Image(bytes) => {
                std::fs::write(output_path, bytes)?;
                Ok(true)
            }
            StubResult::Nothing => Ok(false),
            StubResult::Fail => Err(PicError::Http("stub failure".into())),
        }
    }
}

// ==========================================================================
// BROWSER
// ==========================================================================

#[derive(Debug, Clone)]
pub enum ClickAction {
    /// Load another page directly, as following a link would.
    Navigate(String),
    /// Add elements to the current page, as opening an overlay would.
    Reveal(Vec<FakeElement>),
}

#[derive(Debug, Clone)]
pub struct FakeElement {
    locators: Vec<Locator>,
    attributes: HashMap<String, String>,
    text: String,
    on_click: Option<ClickAction>,
}

impl FakeElement {
    pub fn new(locator: Locator) -> Self {
        Self {
            locators: vec![locator],
            attributes: HashMap::new(),
            text: String::new(),
            on_click: None,
        }
    }

    pub fn matching(mut self, locator: Locator) -> Self {
        self.locators.push(locator);
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn on_click(mut self, action: ClickAction) -> Self {
        self.on_click = Some(action);
        self
    }
}

/// A browser that serves scripted pages keyed by exact URL.
#[derive(Default)]
pub struct FakeBrowser {
    pages: HashMap<String, Vec<FakeElement>>,
    redirects: HashMap<String, String>,
    current_url: String,
    current: Vec<(ElementRef, FakeElement)>,
    next_id: usize,
    pub visited: Vec<String>,
    pub clicks: usize,
    pub typed: Vec<String>,
    pub pauses: Vec<Duration>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, elements: Vec<FakeElement>) -> Self {
        self.pages.insert(url.to_string(), elements);
        self
    }

    /// Navigating to `from` lands on `to`.
    pub fn redirect(mut self, from: &str, to: &str) -> Self {
        self.redirects.insert(from.to_string(), to.to_string());
        self
    }

    /// Start on `url` without recording a visit.
    pub fn starting_at(mut self, url: &str) -> Self {
        self.load(url);
        self
    }

    fn load(&mut self, url: &str) {
        self.current_url = url.to_string();
        let elements = self.pages.get(url).cloned().unwrap_or_default();
        self.current = Vec::new();
        for element in elements {
            self.add(element);
        }
    }

    fn add(&mut self, element: FakeElement) {
        self.next_id += 1;
        self.current
            .push((ElementRef(format!("el-{}", self.next_id)), element));
    }

    fn element(&self, element: &ElementRef) -> PicResult<&FakeElement> {
        self.current
            .iter()
            .find(|(id, _)| id == element)
            .map(|(_, e)| e)
            .ok_or_else(|| PicError::Browser(format!("stale element {}", element.0)))
    }
}

impl BrowserSession for FakeBrowser {
    fn navigate(&mut self, url: &str) -> PicResult<()> {
        self.visited.push(url.to_string());
        let target = self.redirects.get(url).cloned().unwrap_or_else(|| url.to_string());
        self.load(&target);
        Ok(())
    }

    fn current_url(&mut self) -> PicResult<String> {
        Ok(self.current_url.clone())
    }

    fn find_elements(&mut self, locator: &Locator) -> PicResult<Vec<ElementRef>> {
        Ok(self
            .current
            .iter()
            .filter(|(_, e)| e.locators.contains(locator))
            .map(|(id, _)| id.clone())
            .collect())
    }

    fn attribute(&mut self, element: &ElementRef, name: &str) -> PicResult<Option<String>> {
        Ok(self.element(element)?.attributes.get(name).cloned())
    }

    fn text(&mut self, element: &ElementRef) -> PicResult<String> {
        Ok(self.element(element)?.text.clone())
    }

    fn click(&mut self, element: &ElementRef) -> PicResult<()> {
        let action = self.element(element)?.on_click.clone();
        self.clicks += 1;
        match action {
            Some(ClickAction::Navigate(url)) => self.load(&url),
            Some(ClickAction::Reveal(elements)) => {
                for element in elements {
                    self.add(element);
                }
            }
            None => {}
        }
        Ok(())
    }

    fn type_text(&mut self, element: &ElementRef, text: &str) -> PicResult<()> {
        self.element(element)?;
        self.typed.push(text.to_string());
        Ok(())
    }

    fn pause(&mut self, duration: Duration) {
        self.pauses.push(duration);
    }
}
