//! Navigation menu, carousel and accordion state for the landing page.

/// Vertical gap kept above the product carousel when scrolling to it (fixed nav + margin).
pub const PRODUCT_SCROLL_OFFSET: f64 = 80.0 + 150.0;

/// Collapsible mobile navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The menu button flips the menu.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Following any nav link closes the menu.
    pub fn link_clicked(&mut self) {
        self.open = false;
    }
}

/// A set of slides where exactly one is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Index of the highlighted slide, if the current index names one.
    pub fn active(&self) -> Option<usize> {
        (self.current < self.len).then_some(self.current)
    }

    pub fn next(&mut self) -> Option<usize> {
        if self.len > 0 {
            self.current = (self.current + 1) % self.len;
        }
        self.active()
    }

    pub fn prev(&mut self) -> Option<usize> {
        if self.len > 0 {
            self.current = (self.current % self.len + self.len - 1) % self.len;
        }
        self.active()
    }

    /// Jumps to `index` (a dot was clicked). Out-of-range indices leave no slide active.
    pub fn show(&mut self, index: usize) -> Option<usize> {
        self.current = index;
        self.active()
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Auto-play step; a no-op on an empty carousel.
    pub fn tick(&mut self) -> Option<usize> {
        self.next()
    }
}

/// Product cards that each reveal one product slide with its own image carousel.
#[derive(Debug, Clone)]
pub struct ProductShowcase {
    products: Vec<(String, Carousel)>,
    active: Option<usize>,
}

impl ProductShowcase {
    /// `products` pairs each product id with its number of images.
    pub fn new<I, S>(products: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        Self {
            products: products
                .into_iter()
                .map(|(id, images)| (id.into(), Carousel::new(images)))
                .collect(),
            active: None,
        }
    }

    /// Shows the slide for `product_id`, rewinding its images to the first one.
    ///
    /// Returns false (and hides every slide) when the id is unknown.
    pub fn select(&mut self, product_id: &str) -> bool {
        self.active = self.products.iter().position(|(id, _)| id == product_id);
        match self.active {
            Some(idx) => {
                self.products[idx].1.reset();
                true
            }
            None => false,
        }
    }

    pub fn active_product(&self) -> Option<&str> {
        self.active.map(|idx| self.products[idx].0.as_str())
    }

    pub fn images_mut(&mut self, product_id: &str) -> Option<&mut Carousel> {
        self.products
            .iter_mut()
            .find(|(id, _)| id == product_id)
            .map(|(_, carousel)| carousel)
    }

    /// Page offset to scroll to so the carousel section sits below the nav.
    pub fn scroll_target(section_top: f64) -> f64 {
        (section_top - PRODUCT_SCROLL_OFFSET).max(0.0)
    }
}

/// FAQ list where at most one answer is expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accordion {
    open: Option<usize>,
}

impl Accordion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_item(&self) -> Option<usize> {
        self.open
    }

    /// Clicking closes every item, then reopens the clicked one unless it was the open one.
    pub fn toggle(&mut self, index: usize) -> Option<usize> {
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
        self.open
    }
}
