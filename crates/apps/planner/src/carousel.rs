use serde::{Deserialize, Serialize};

pub const DEFAULT_CAROUSEL_INTERVAL_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: String,
}

impl Photo {
    fn sample(id: &str, url: &str, alt: &str, caption: &str) -> Self {
        Self {
            id: id.to_string(),
            url: url.to_string(),
            alt: alt.to_string(),
            caption: caption.to_string(),
        }
    }
}

pub fn sample_photos() -> Vec<Photo> {
    vec![
        Photo::sample(
            "1",
            "https://images.unsplash.com/photo-1530521954074-e64f6810b32d?w=800&q=80",
            "Santorini, Greece with white buildings and blue domes",
            "Stunning views of Santorini, Greece",
        ),
        Photo::sample(
            "2",
            "https://images.unsplash.com/photo-1476514525535-07fb3b4ae5f1?w=800&q=80",
            "Lush green mountains and waterfall in Hawaii",
            "Tropical paradise in Hawaii",
        ),
        Photo::sample(
            "3",
            "https://images.unsplash.com/photo-1523906834658-6e24ef2386f9?w=800&q=80",
            "Venice canal with gondolas and historic buildings",
            "Romantic canals of Venice, Italy",
        ),
        Photo::sample(
            "4",
            "https://images.unsplash.com/photo-1533105079780-92b9be482077?w=800&q=80",
            "Snowy mountain peaks in Switzerland",
            "Majestic Swiss Alps",
        ),
        Photo::sample(
            "5",
            "https://images.unsplash.com/photo-1516483638261-f4dbaf036963?w=800&q=80",
            "Colorful buildings in Cinque Terre, Italy",
            "Picturesque Cinque Terre coastline",
        ),
    ]
}

/// Destination preview photos with a wrapping cursor.
///
/// Auto-play is only a flag here; the session owns the periodic task that
/// calls [`PhotoCarousel::advance`].
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoCarousel {
    photos: Vec<Photo>,
    index: usize,
    auto_play: bool,
}

impl PhotoCarousel {
    pub fn new(photos: Vec<Photo>, auto_play: bool) -> Self {
        Self {
            photos,
            index: 0,
            auto_play,
        }
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Photo> {
        self.photos.get(self.index)
    }

    pub fn auto_play(&self) -> bool {
        self.auto_play
    }

    pub(crate) fn set_auto_play(&mut self, on: bool) {
        self.auto_play = on;
    }

    pub fn next(&mut self) {
        self.advance(1);
    }

    pub fn previous(&mut self) {
        let n = self.photos.len();
        if n > 0 {
            self.index = (self.index + n - 1) % n;
        }
    }

    /// Returns `false` for an out-of-range index.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.photos.len() {
            return false;
        }
        self.index = index;
        true
    }

    /// Moves forward `steps` photos. An empty carousel ignores this.
    pub fn advance(&mut self, steps: u64) {
        let n = self.photos.len();
        if n == 0 {
            return;
        }
        let steps = (steps % n as u64) as usize;
        self.index = (self.index + steps) % n;
    }
}

#[cfg(test)]
mod tests {
    use super::{PhotoCarousel, sample_photos};

    #[test]
    fn wraps_both_ways() {
        let mut c = PhotoCarousel::new(sample_photos(), true);
        c.previous();
        assert_eq!(c.index(), 4);
        c.next();
        assert_eq!(c.index(), 0);
        c.advance(12);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn go_to_checks_range() {
        let mut c = PhotoCarousel::new(sample_photos(), false);
        assert!(c.go_to(3));
        assert_eq!(c.current().map(|p| p.id.as_str()), Some("4"));
        assert!(!c.go_to(5));
        assert_eq!(c.index(), 3);
    }

    #[test]
    fn empty_carousel_ignores_movement() {
        let mut c = PhotoCarousel::new(Vec::new(), true);
        c.advance(3);
        c.next();
        c.previous();
        assert_eq!(c.index(), 0);
        assert!(c.current().is_none());
    }
}
