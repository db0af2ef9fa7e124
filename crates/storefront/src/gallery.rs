//! Image carousels.
//!
//! Two carousels exist: the product gallery on the details page (manual
//! only) and the customer showcase on the home page, which advances on its
//! own every [`AUTOPLAY_PERIOD`] while the visitor is not hovering it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Notify;

use crate::task::TaskGuard;

/// Time between automatic slides.
pub const AUTOPLAY_PERIOD: Duration = Duration::from_secs(3);

/// Height/width ratio used until the image size is known (4:3).
pub const DEFAULT_ASPECT_RATIO: f64 = 0.75;

/// Height used when the container has no measurable width.
pub const DEFAULT_HEIGHT: f64 = 350.0;

pub const MIN_HEIGHT: f64 = 180.0;
pub const MAX_HEIGHT: f64 = 450.0;

/// Photos of customers on the trail, shown on the home page.
pub const SHOWCASE_IMAGES: [&str; 4] = [
    "/images/galery.jpg",
    "/images/galery2.jpg",
    "/images/galery3.jpg",
    "/images/galery4.jpg",
];

/// Natural size of an image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, serde::Deserialize)]
pub struct ImageDimensions {
    pub width: f64,
    pub height: f64,
}

/// Height of the showcase container for the current image.
///
/// Uses the image's own ratio when both dimensions are positive, otherwise
/// [`DEFAULT_ASPECT_RATIO`]. The result is clamped to
/// [`MIN_HEIGHT`]..=[`MAX_HEIGHT`].
#[must_use]
pub fn container_height(width: f64, dims: Option<ImageDimensions>) -> f64 {
    if width.is_nan() || width <= 0.0 {
        return DEFAULT_HEIGHT;
    }
    let ratio = dims
        .filter(|d| d.width > 0.0 && d.height > 0.0)
        .map_or(DEFAULT_ASPECT_RATIO, |d| d.height / d.width);
    (width * ratio).clamp(MIN_HEIGHT, MAX_HEIGHT)
}

/// Position within an ordered list of images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Carousel {
    images: Vec<String>,
    index: usize,
    hovered: bool,
    autoplay: bool,
}

impl Carousel {
    /// A carousel on the first image, autoplay off.
    #[must_use]
    pub const fn new(images: Vec<String>) -> Self {
        Self {
            images,
            index: 0,
            hovered: false,
            autoplay: false,
        }
    }

    /// The home page showcase, autoplay on.
    #[must_use]
    pub fn showcase() -> Self {
        Self {
            autoplay: true,
            ..Self::new(SHOWCASE_IMAGES.iter().map(|&s| s.to_owned()).collect())
        }
    }

    /// Advance, wrapping from the last image to the first.
    pub fn next(&mut self) {
        if !self.images.is_empty() {
            self.index = if self.index + 1 >= self.images.len() {
                0
            } else {
                self.index + 1
            };
        }
    }

    /// Go back, wrapping from the first image to the last.
    pub fn prev(&mut self) {
        if !self.images.is_empty() {
            self.index = if self.index == 0 {
                self.images.len() - 1
            } else {
                self.index - 1
            };
        }
    }

    /// Jump to `index`. Out-of-range values are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.images.len() {
            self.index = index;
        }
    }

    pub const fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub const fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
    }

    /// Whether an autoplay tick should advance right now.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.autoplay && !self.hovered && self.images.len() > 1
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.images.get(self.index).map(String::as_str)
    }

    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }
}

/// A carousel shared with its autoplay task.
pub type SharedCarousel = Arc<Mutex<Carousel>>;

/// Lock a shared carousel, recovering from poisoning.
pub fn lock(carousel: &SharedCarousel) -> MutexGuard<'_, Carousel> {
    carousel.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Advances a shared carousel every `period` while it is playing.
///
/// Stops when dropped.
#[derive(Debug)]
pub struct Autoplay {
    restart: Arc<Notify>,
    _task: TaskGuard,
}

impl Autoplay {
    /// Start advancing `carousel`. Must be called within a tokio runtime.
    #[must_use]
    pub fn start(carousel: SharedCarousel, period: Duration) -> Self {
        let restart = Arc::new(Notify::new());
        let signal = Arc::clone(&restart);
        let task = TaskGuard::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let mut slide = lock(&carousel);
                        if slide.is_playing() {
                            slide.next();
                        }
                    }
                    () = signal.notified() => interval.reset(),
                }
            }
        });
        Self {
            restart,
            _task: task,
        }
    }

    /// Start a full `period` over from now.
    ///
    /// Called when the carousel starts playing again, so the first slide
    /// after a pause is never early.
    pub fn restart(&self) {
        self.restart.notify_one();
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn carousel(n: usize) -> Carousel {
        Carousel::new((0..n).map(|i| format!("/images/{i}.jpg")).collect())
    }

    #[test]
    fn test_next_prev_wrap() {
        let mut c = carousel(3);
        c.prev();
        assert_eq!(c.index(), 2);
        c.next();
        assert_eq!(c.index(), 0);
        c.next();
        c.next();
        assert_eq!(c.current(), Some("/images/2.jpg"));
    }

    #[test]
    fn test_empty_carousel_is_inert() {
        let mut c = carousel(0);
        c.next();
        c.prev();
        c.select(0);
        assert_eq!(c.index(), 0);
        assert!(c.current().is_none());
    }

    #[test]
    fn test_select_ignores_out_of_range() {
        let mut c = carousel(4);
        c.select(2);
        assert_eq!(c.index(), 2);
        c.select(4);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn test_container_height() {
        let square = ImageDimensions {
            width: 100.0,
            height: 100.0,
        };
        let unknown = ImageDimensions {
            width: 0.0,
            height: 100.0,
        };
        assert_eq!(container_height(400.0, None), 300.0);
        assert_eq!(container_height(300.0, Some(square)), 300.0);
        assert_eq!(container_height(400.0, Some(unknown)), 300.0);
        assert_eq!(container_height(1000.0, Some(square)), MAX_HEIGHT);
        assert_eq!(container_height(100.0, None), MIN_HEIGHT);
        assert_eq!(container_height(0.0, Some(square)), DEFAULT_HEIGHT);
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_advances_and_pauses_on_hover() {
        let shared: SharedCarousel = Arc::new(Mutex::new(Carousel::showcase()));
        let _autoplay = Autoplay::start(Arc::clone(&shared), AUTOPLAY_PERIOD);

        tokio::time::sleep(Duration::from_millis(3100)).await;
        assert_eq!(lock(&shared).index(), 1);

        lock(&shared).set_hovered(true);
        tokio::time::sleep(Duration::from_secs(9)).await;
        assert_eq!(lock(&shared).index(), 1);

        lock(&shared).set_hovered(false);
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(lock(&shared).index(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_waits_full_period_after_resume() {
        let shared: SharedCarousel = Arc::new(Mutex::new(Carousel::showcase()));
        let autoplay = Autoplay::start(Arc::clone(&shared), AUTOPLAY_PERIOD);

        tokio::time::sleep(Duration::from_millis(3100)).await;
        lock(&shared).set_hovered(true);
        tokio::time::sleep(Duration::from_millis(2700)).await;

        // t = 5.8s: the old schedule would tick at 6s
        lock(&shared).set_hovered(false);
        autoplay.restart();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(lock(&shared).index(), 1);

        tokio::time::sleep(Duration::from_millis(2600)).await;
        assert_eq!(lock(&shared).index(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_disabled_does_not_advance() {
        let shared: SharedCarousel = Arc::new(Mutex::new(Carousel::showcase()));
        let _autoplay = Autoplay::start(Arc::clone(&shared), AUTOPLAY_PERIOD);
        lock(&shared).set_autoplay(false);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(lock(&shared).index(), 0);
        assert!(!lock(&shared).is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_stops_when_dropped() {
        let shared: SharedCarousel = Arc::new(Mutex::new(Carousel::showcase()));
        let autoplay = Autoplay::start(Arc::clone(&shared), AUTOPLAY_PERIOD);
        drop(autoplay);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(lock(&shared).index(), 0);
    }
}
